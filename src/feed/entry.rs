//! Typed models for the Blogger GData JSON feed.
//!
//! The feed wraps every text field in a `{"$t": "..."}` object and lists the
//! canonical page URL among several `link` relations; only
//! `rel="alternate" type="text/html"` points at the rendered post.

use serde::Deserialize;

use crate::post::Post;
use crate::utils::DateTimeUtc;

/// Top-level response: `{"feed": {...}}`
#[derive(Debug, Deserialize)]
pub struct FeedDocument {
    pub feed: Option<FeedBody>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedBody {
    #[serde(default)]
    pub entry: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FeedEntry {
    pub title: TextValue,
    pub published: TextValue,
    #[serde(default)]
    pub link: Vec<FeedLink>,
}

/// GData text wrapper: `{"$t": "..."}`
#[derive(Debug, Deserialize)]
pub struct TextValue {
    #[serde(rename = "$t")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedLink {
    #[serde(default)]
    pub rel: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub href: String,
}

impl FeedEntry {
    /// The canonical HTML page URL, if the entry carries one.
    pub fn alternate_link(&self) -> Option<&str> {
        self.link
            .iter()
            .find(|link| link.rel == "alternate" && link.kind == "text/html")
            .map(|link| link.href.as_str())
    }

    /// Convert to a [`Post`].
    ///
    /// Returns `None` when the entry has no HTML link or its publish
    /// timestamp cannot be parsed; such entries are skipped with a warning
    /// at the call site.
    pub fn to_post(&self) -> Option<Post> {
        let url = self.alternate_link()?;
        let published = DateTimeUtc::parse(&self.published.value)?;
        Some(Post {
            published,
            url: url.to_string(),
            title: self.title.value.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ENTRY: &str = r#"{
        "title": {"$t": "A post"},
        "published": {"$t": "2025-05-02T05:05:00.002-04:00"},
        "link": [
            {"rel": "self", "type": "application/atom+xml", "href": "https://x.blogspot.com/feeds/posts/default/1"},
            {"rel": "alternate", "type": "text/html", "href": "https://x.blogspot.com/2025/05/a-post.html"}
        ]
    }"#;

    #[test]
    fn test_entry_deserialize() {
        let entry: FeedEntry = serde_json::from_str(SAMPLE_ENTRY).unwrap();
        assert_eq!(entry.title.value, "A post");
        assert_eq!(
            entry.alternate_link(),
            Some("https://x.blogspot.com/2025/05/a-post.html")
        );
    }

    #[test]
    fn test_entry_to_post_normalizes_offset() {
        let entry: FeedEntry = serde_json::from_str(SAMPLE_ENTRY).unwrap();
        let post = entry.to_post().unwrap();
        assert_eq!(post.published, DateTimeUtc::new(2025, 5, 2, 9, 5, 0));
        assert_eq!(post.title, "A post");
    }

    #[test]
    fn test_entry_without_alternate_link() {
        let json = r#"{
            "title": {"$t": "No link"},
            "published": {"$t": "2025-05-02T05:05:00Z"},
            "link": [{"rel": "self", "type": "application/atom+xml", "href": "https://x/feeds/1"}]
        }"#;
        let entry: FeedEntry = serde_json::from_str(json).unwrap();
        assert!(entry.to_post().is_none());
    }

    #[test]
    fn test_entry_with_bad_timestamp() {
        let json = r#"{
            "title": {"$t": "Bad date"},
            "published": {"$t": "yesterday"},
            "link": [{"rel": "alternate", "type": "text/html", "href": "https://x/p.html"}]
        }"#;
        let entry: FeedEntry = serde_json::from_str(json).unwrap();
        assert!(entry.to_post().is_none());
    }

    #[test]
    fn test_feed_document_missing_entries() {
        let doc: FeedDocument = serde_json::from_str(r#"{"feed": {}}"#).unwrap();
        assert!(doc.feed.unwrap().entry.is_empty());

        let doc: FeedDocument = serde_json::from_str(r#"{}"#).unwrap();
        assert!(doc.feed.is_none());
    }
}
