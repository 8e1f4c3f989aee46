//! Asset localization: download referenced assets and rewrite the HTML to
//! point at local copies.
//!
//! Algorithm, per page:
//! 1. single scan pass collecting references (`scan`)
//! 2. dedupe by resolved absolute URL (download once, rewrite every
//!    referencing value to the same local file)
//! 3. download each unique URL; pick a collision-free local name (`names`)
//! 4. rewrite the HTML only for assets whose download succeeded
//!
//! A failed download is a warning: the reference keeps pointing at the
//! remote URL and the page is still archived.

mod names;
mod scan;

pub use scan::{AssetKind, AssetRef};

use reqwest::blocking::Client;
use rustc_hash::FxHashMap;
use url::Url;

use crate::error::ArchiveError;
use crate::http;
use crate::{log, warn};

use names::NameSet;

/// One successfully downloaded asset, held in memory until the archive
/// writer persists it next to `index.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAsset {
    /// Path relative to the post directory (`css/...` or `images/...`)
    pub rel_path: String,
    pub bytes: Vec<u8>,
}

/// Result of localizing one page.
#[derive(Debug)]
pub struct LocalizedPage {
    /// HTML with successful references rewritten to relative paths
    pub html: String,
    pub assets: Vec<LocalAsset>,
    /// Number of references left on their remote URL because the download
    /// failed
    pub failed: usize,
}

/// Localize a page using the run's HTTP client.
pub fn localize_page(
    client: &Client,
    page_url: &Url,
    html: &str,
) -> Result<LocalizedPage, ArchiveError> {
    localize_with(page_url, html, |url| http::get_bytes(client, url.as_str()))
}

/// Localize with an injected fetch function.
///
/// The seam keeps the rewrite logic testable without a network; `fetch`
/// returns the body plus the response `Content-Type`.
pub fn localize_with<F>(
    page_url: &Url,
    html: &str,
    mut fetch: F,
) -> Result<LocalizedPage, ArchiveError>
where
    F: FnMut(&Url) -> Result<(Vec<u8>, Option<String>), ArchiveError>,
{
    let refs = scan::collect_refs(html, page_url)?;

    // Dedupe by resolved URL, preserving encounter order. The first kind
    // seen for a URL wins; every distinct raw value is remembered so all
    // referencing nodes get rewritten together.
    let mut order: Vec<Url> = Vec::new();
    let mut by_url: FxHashMap<Url, (AssetKind, Vec<String>)> = FxHashMap::default();
    for reference in refs {
        let slot = by_url.entry(reference.resolved.clone()).or_insert_with(|| {
            order.push(reference.resolved.clone());
            (reference.kind, Vec::new())
        });
        if !slot.1.contains(&reference.raw) {
            slot.1.push(reference.raw);
        }
    }

    let mut names = NameSet::new();
    let mut rewrites: Vec<(String, String)> = Vec::new();
    let mut assets = Vec::new();
    let mut failed = 0usize;

    for url in &order {
        let (kind, raws) = &by_url[url];
        match fetch(url) {
            Ok((bytes, content_type)) => {
                let rel_path = names.assign(*kind, url, content_type.as_deref());
                log!("asset"; "{url} -> {rel_path}");
                for raw in raws {
                    rewrites.push((raw.clone(), format!("./{rel_path}")));
                }
                assets.push(LocalAsset { rel_path, bytes });
            }
            Err(err) => {
                failed += 1;
                warn!("asset {url} failed: {err}; keeping remote reference");
            }
        }
    }

    Ok(LocalizedPage {
        html: rewrite_html(html, &rewrites),
        assets,
        failed,
    })
}

/// Replace every raw reference value with its local path in one pass.
///
/// A single simultaneous substitution (longest raw first) keeps overlapping
/// values - one raw being a substring of another, or of a rewritten path -
/// from corrupting each other.
fn rewrite_html(html: &str, rewrites: &[(String, String)]) -> String {
    if rewrites.is_empty() {
        return html.to_string();
    }

    let mut sorted: Vec<&(String, String)> = rewrites.iter().collect();
    sorted.sort_by_key(|pair| std::cmp::Reverse(pair.0.len()));

    let by_raw: FxHashMap<&str, &str> = sorted
        .iter()
        .map(|pair| (pair.0.as_str(), pair.1.as_str()))
        .collect();

    let pattern = sorted
        .iter()
        .map(|pair| regex::escape(&pair.0))
        .collect::<Vec<_>>()
        .join("|");

    // Escaped literals are always a valid pattern
    let matcher = regex::Regex::new(&pattern).unwrap();
    matcher
        .replace_all(html, |captures: &regex::Captures| {
            by_raw
                .get(&captures[0])
                .copied()
                .unwrap_or(&captures[0])
                .to_string()
        })
        .into_owned()
}
