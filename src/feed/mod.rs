//! Range fetching from the blog's listing feed.
//!
//! Pages through `/feeds/posts/default?alt=json` with `start-index` /
//! `max-results` until the remote runs dry, then filters, orders and
//! deduplicates the entries locally. The feed is asked to pre-filter with
//! `published-min`/`published-max`, but the local half-open range check
//! stays authoritative.
//!
//! Failure policy: a network or parse failure on the first page is fatal;
//! on any later page it is treated as end-of-stream.

mod entry;

pub use entry::{FeedDocument, FeedEntry};

use reqwest::blocking::Client;

use crate::error::ArchiveError;
use crate::http;
use crate::post::Post;
use crate::utils::DateTimeUtc;
use crate::{debug, warn};

/// Entries requested per listing page.
const PAGE_SIZE: usize = 100;

/// Fetch all posts published in `[start, end)`, ordered by publish time
/// ascending with no duplicate `(published, url)` pair.
pub fn fetch_posts(
    client: &Client,
    blog_url: &str,
    start: &DateTimeUtc,
    end: &DateTimeUtc,
) -> Result<Vec<Post>, ArchiveError> {
    let mut entries = Vec::new();
    let mut index = 1usize;

    loop {
        let url = page_url(blog_url, start, end, index);
        debug!("feed"; "requesting {url}");

        let text = match http::get_text(client, &url) {
            Ok(text) => text,
            Err(err) if index == 1 => return Err(err),
            Err(err) => {
                debug!("feed"; "page at index {index} failed ({err}), treating as end of feed");
                break;
            }
        };

        let batch = match parse_page(&text) {
            Ok(batch) => batch,
            Err(err) if index == 1 => return Err(err),
            Err(err) => {
                debug!("feed"; "page at index {index} malformed ({err}), treating as end of feed");
                break;
            }
        };

        if batch.is_empty() {
            break;
        }

        let count = batch.len();
        entries.extend(batch);

        // A short batch is the remote's end-of-results signal
        if count < PAGE_SIZE {
            break;
        }
        index += count;
    }

    Ok(select_in_range(entries, start, end))
}

/// Listing URL for one page of results.
fn page_url(blog_url: &str, start: &DateTimeUtc, end: &DateTimeUtc, index: usize) -> String {
    let base = blog_url.trim_end_matches('/');
    format!(
        "{base}/feeds/posts/default?alt=json\
         &published-min={}&published-max={}\
         &start-index={index}&max-results={PAGE_SIZE}",
        start.to_rfc3339(),
        end.to_rfc3339(),
    )
}

/// Parse one listing page into its entries.
fn parse_page(text: &str) -> Result<Vec<FeedEntry>, ArchiveError> {
    let document: FeedDocument = serde_json::from_str(text)
        .map_err(|err| ArchiveError::parse("feed listing", err.to_string()))?;
    Ok(document.feed.unwrap_or_default().entry)
}

/// Filter entries to `[start, end)`, sort ascending by publish time and
/// drop duplicate `(published, url)` pairs.
///
/// Entries without an HTML link or with an unparseable timestamp are
/// skipped with a warning; the remote's ordering is not trusted.
fn select_in_range(entries: Vec<FeedEntry>, start: &DateTimeUtc, end: &DateTimeUtc) -> Vec<Post> {
    let mut posts: Vec<Post> = entries
        .iter()
        .filter_map(|entry| {
            let post = entry.to_post();
            if post.is_none() {
                warn!(
                    "skipping \"{}\": no HTML link or bad publish timestamp",
                    entry.title.value
                );
            }
            post
        })
        .filter(|post| post.published >= *start && post.published < *end)
        .collect();

    posts.sort_by(|a, b| (a.published, &a.url).cmp(&(b.published, &b.url)));
    posts.dedup_by(|a, b| a.published == b.published && a.url == b.url);
    posts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, published: &str, href: Option<&str>) -> FeedEntry {
        let link = match href {
            Some(href) => format!(
                r#"[{{"rel": "alternate", "type": "text/html", "href": "{href}"}}]"#
            ),
            None => "[]".to_string(),
        };
        let json = format!(
            r#"{{"title": {{"$t": "{title}"}}, "published": {{"$t": "{published}"}}, "link": {link}}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn range(start: &str, end: &str) -> (DateTimeUtc, DateTimeUtc) {
        (
            DateTimeUtc::parse(start).unwrap(),
            DateTimeUtc::parse(end).unwrap(),
        )
    }

    #[test]
    fn test_page_url_shape() {
        let (start, end) = range("2025-05-01T00:00:00Z", "2025-05-04T00:00:00Z");
        let url = page_url("https://x.blogspot.com/", &start, &end, 101);
        assert_eq!(
            url,
            "https://x.blogspot.com/feeds/posts/default?alt=json\
             &published-min=2025-05-01T00:00:00Z&published-max=2025-05-04T00:00:00Z\
             &start-index=101&max-results=100"
        );
    }

    #[test]
    fn test_parse_page_malformed() {
        assert!(parse_page("not json").is_err());
        assert!(parse_page(r#"{"feed": {"entry": 3}}"#).is_err());
    }

    #[test]
    fn test_parse_page_empty_feed() {
        assert!(parse_page(r#"{}"#).unwrap().is_empty());
        assert!(parse_page(r#"{"feed": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_select_filters_half_open_range() {
        let (start, end) = range("2025-05-01T00:00:00Z", "2025-05-02T00:00:00Z");
        let entries = vec![
            entry("before", "2025-04-30T23:59:59Z", Some("https://x/a.html")),
            entry("at start", "2025-05-01T00:00:00Z", Some("https://x/b.html")),
            entry("inside", "2025-05-01T12:00:00Z", Some("https://x/c.html")),
            entry("at end", "2025-05-02T00:00:00Z", Some("https://x/d.html")),
        ];

        let posts = select_in_range(entries, &start, &end);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["at start", "inside"]);
        assert!(posts.iter().all(|p| p.published >= start && p.published < end));
    }

    #[test]
    fn test_select_sorts_ascending() {
        let (start, end) = range("2025-05-01T00:00:00Z", "2025-06-01T00:00:00Z");
        let entries = vec![
            entry("newest", "2025-05-03T00:00:00Z", Some("https://x/3.html")),
            entry("oldest", "2025-05-01T00:00:00Z", Some("https://x/1.html")),
            entry("middle", "2025-05-02T00:00:00Z", Some("https://x/2.html")),
        ];

        let posts = select_in_range(entries, &start, &end);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["oldest", "middle", "newest"]);
    }

    #[test]
    fn test_select_drops_duplicates() {
        let (start, end) = range("2025-05-01T00:00:00Z", "2025-06-01T00:00:00Z");
        let entries = vec![
            entry("dup", "2025-05-01T00:00:00Z", Some("https://x/1.html")),
            entry("dup", "2025-05-01T00:00:00Z", Some("https://x/1.html")),
            entry("same time, other url", "2025-05-01T00:00:00Z", Some("https://x/2.html")),
        ];

        let posts = select_in_range(entries, &start, &end);
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_select_skips_entries_without_link() {
        let (start, end) = range("2025-05-01T00:00:00Z", "2025-06-01T00:00:00Z");
        let entries = vec![
            entry("no link", "2025-05-01T00:00:00Z", None),
            entry("ok", "2025-05-01T00:00:00Z", Some("https://x/1.html")),
        ];

        let posts = select_in_range(entries, &start, &end);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "ok");
    }

    #[test]
    fn test_select_empty_range() {
        let (start, end) = range("2025-05-01T00:00:00Z", "2025-05-01T00:00:00Z");
        let entries = vec![entry("any", "2025-05-01T00:00:00Z", Some("https://x/1.html"))];
        assert!(select_in_range(entries, &start, &end).is_empty());
    }
}
