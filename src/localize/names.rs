//! Deterministic local filenames for downloaded assets.
//!
//! Names derive from the percent-decoded basename of the asset URL. Two
//! distinct URLs that map to the same name get a numeric suffix in
//! encounter order (`photo.png`, `photo-2.png`, ...), so a run over an
//! unchanged page always produces the same layout.

use percent_encoding::percent_decode_str;
use rustc_hash::FxHashSet;
use url::Url;

use crate::utils::mime;

use super::scan::AssetKind;

/// Allocator for collision-free paths relative to the post directory.
#[derive(Debug, Default)]
pub struct NameSet {
    taken: FxHashSet<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a relative path (`css/...` or `images/...`) for an asset.
    ///
    /// `content_type` is consulted only when the URL path has no usable
    /// basename.
    pub fn assign(&mut self, kind: AssetKind, url: &Url, content_type: Option<&str>) -> String {
        let name = basename(url).unwrap_or_else(|| fallback_name(kind, content_type));
        let (stem, ext) = split_name(&name);

        let mut candidate = format!("{}/{name}", kind.subdir());
        let mut n = 2u32;
        while self.taken.contains(&candidate) {
            candidate = match ext {
                Some(ext) => format!("{}/{stem}-{n}.{ext}", kind.subdir()),
                None => format!("{}/{stem}-{n}", kind.subdir()),
            };
            n += 1;
        }

        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Percent-decoded, filesystem-safe basename of the URL path.
fn basename(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    if segment.is_empty() {
        return None;
    }

    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    // Decoding may reintroduce separators
    let safe = decoded.replace(['/', '\\'], "_");
    if safe.is_empty() { None } else { Some(safe) }
}

/// Name for assets whose URL carries no basename (e.g. `https://host/`).
fn fallback_name(kind: AssetKind, content_type: Option<&str>) -> String {
    match kind {
        AssetKind::Stylesheet => "style.css".to_string(),
        AssetKind::Image => {
            let ext = content_type.and_then(mime::extension_for).unwrap_or("bin");
            format!("image.{ext}")
        }
    }
}

/// Split into stem and extension for suffix insertion.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_assign_uses_url_basename() {
        let mut names = NameSet::new();
        assert_eq!(
            names.assign(AssetKind::Image, &url("https://x/images/photo.png"), None),
            "images/photo.png"
        );
        assert_eq!(
            names.assign(AssetKind::Stylesheet, &url("https://x/theme/main.css"), None),
            "css/main.css"
        );
    }

    #[test]
    fn test_assign_percent_decodes() {
        let mut names = NameSet::new();
        assert_eq!(
            names.assign(AssetKind::Image, &url("https://x/a%20b.png"), None),
            "images/a b.png"
        );
    }

    #[test]
    fn test_assign_disambiguates_collisions() {
        let mut names = NameSet::new();
        let a = names.assign(AssetKind::Image, &url("https://a.example/photo.png"), None);
        let b = names.assign(AssetKind::Image, &url("https://b.example/photo.png"), None);
        let c = names.assign(AssetKind::Image, &url("https://c.example/photo.png"), None);
        assert_eq!(a, "images/photo.png");
        assert_eq!(b, "images/photo-2.png");
        assert_eq!(c, "images/photo-3.png");
    }

    #[test]
    fn test_assign_kinds_do_not_collide() {
        // Same basename in different subdirectories is fine
        let mut names = NameSet::new();
        let css = names.assign(AssetKind::Stylesheet, &url("https://x/shared.css"), None);
        let img = names.assign(AssetKind::Image, &url("https://x/shared.css"), None);
        assert_eq!(css, "css/shared.css");
        assert_eq!(img, "images/shared.css");
    }

    #[test]
    fn test_assign_fallback_names() {
        let mut names = NameSet::new();
        assert_eq!(
            names.assign(AssetKind::Stylesheet, &url("https://x/"), None),
            "css/style.css"
        );
        assert_eq!(
            names.assign(AssetKind::Image, &url("https://x/"), Some("image/png")),
            "images/image.png"
        );
        assert_eq!(
            names.assign(AssetKind::Image, &url("https://y/"), None),
            "images/image.bin"
        );
    }

    #[test]
    fn test_split_name_without_extension() {
        let mut names = NameSet::new();
        let a = names.assign(AssetKind::Image, &url("https://a.example/photo"), None);
        let b = names.assign(AssetKind::Image, &url("https://b.example/photo"), None);
        assert_eq!(a, "images/photo");
        assert_eq!(b, "images/photo-2");
    }
}
