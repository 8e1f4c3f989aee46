//! Single-pass HTML scan collecting stylesheet and image references.
//!
//! Collected reference sources:
//! - `<link rel="stylesheet" href=...>`
//! - `<link rel="image_src" href=...>`
//! - `<meta property="og:image" content=...>`
//! - `<img src=...>`
//! - `url(...)` values inside inline `style` attributes and `<style>` blocks
//!
//! `data:` URIs, bare fragments and non-HTTP(S) schemes are never download
//! targets and are left untouched.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::ArchiveError;

/// What a reference points at; decides the subdirectory it is localized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Image,
}

impl AssetKind {
    /// Subdirectory inside the post's archive folder.
    pub const fn subdir(self) -> &'static str {
        match self {
            Self::Stylesheet => "css",
            Self::Image => "images",
        }
    }
}

/// One reference as written in the document.
#[derive(Debug, Clone)]
pub struct AssetRef {
    /// Attribute or `url(...)` value exactly as it appears in the HTML
    pub raw: String,
    /// Absolute URL after resolving against the page
    pub resolved: Url,
    pub kind: AssetKind,
}

/// `url(...)` values in CSS text.
static CSS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\(\s*['"]?([^'")\s]+)['"]?\s*\)"#).unwrap());

/// Collect every localizable reference in document order.
pub fn collect_refs(html: &str, page_url: &Url) -> Result<Vec<AssetRef>, ArchiveError> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|err| ArchiveError::parse("post html", err.to_string()))?;
    let parser = dom.parser();

    let mut refs = Vec::new();

    for node in dom.nodes() {
        let Some(tag) = node.as_tag() else { continue };

        match tag.name().as_utf8_str().to_ascii_lowercase().as_str() {
            "link" => {
                let rel = attr(tag, "rel");
                if let Some(href) = attr(tag, "href") {
                    if rel_is(&rel, "stylesheet") {
                        push_ref(&mut refs, href, AssetKind::Stylesheet, page_url);
                    } else if rel_is(&rel, "image_src") {
                        push_ref(&mut refs, href, AssetKind::Image, page_url);
                    }
                }
            }
            "meta" => {
                if rel_is(&attr(tag, "property"), "og:image")
                    && let Some(content) = attr(tag, "content")
                {
                    push_ref(&mut refs, content, AssetKind::Image, page_url);
                }
            }
            "img" => {
                if let Some(src) = attr(tag, "src") {
                    push_ref(&mut refs, src, AssetKind::Image, page_url);
                }
            }
            "style" => {
                for raw in css_urls(&tag.inner_text(parser)) {
                    push_ref(&mut refs, raw, AssetKind::Image, page_url);
                }
            }
            _ => {}
        }

        // Inline style attribute on any element
        if let Some(style) = attr(tag, "style") {
            for raw in css_urls(&style) {
                push_ref(&mut refs, raw, AssetKind::Image, page_url);
            }
        }
    }

    Ok(refs)
}

/// Extract `url(...)` values from a CSS fragment.
fn css_urls(css: &str) -> Vec<String> {
    CSS_URL
        .captures_iter(css)
        .map(|captures| captures[1].to_string())
        .collect()
}

fn attr(tag: &tl::HTMLTag, name: &str) -> Option<String> {
    tag.attributes()
        .iter()
        .find(|pair| pair.0.eq_ignore_ascii_case(name))
        .and_then(|pair| pair.1.map(|value| value.into_owned()))
}

fn rel_is(value: &Option<String>, expected: &str) -> bool {
    value
        .as_deref()
        .is_some_and(|v| v.eq_ignore_ascii_case(expected))
}

fn push_ref(refs: &mut Vec<AssetRef>, raw: String, kind: AssetKind, page_url: &Url) {
    if raw.is_empty() || raw.starts_with('#') || raw.starts_with("data:") {
        return;
    }
    let Ok(resolved) = page_url.join(&raw) else {
        return;
    };
    if !matches!(resolved.scheme(), "http" | "https") {
        return;
    }
    refs.push(AssetRef {
        raw,
        resolved,
        kind,
    });
}
