//! Post descriptor and page retrieval.

use reqwest::blocking::Client;

use crate::error::ArchiveError;
use crate::http;
use crate::utils::DateTimeUtc;

/// A single published blog entry.
///
/// Produced by the feed module, consumed once by the pipeline, not retained
/// after the post is archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Publish instant, normalized to UTC
    pub published: DateTimeUtc,
    /// Canonical URL of the rendered page
    pub url: String,
    pub title: String,
}

impl Post {
    /// Archive directory name derived from the publish timestamp.
    pub fn folder_name(&self) -> String {
        self.published.to_compact()
    }
}

/// Retrieve the full HTML document for a post as served (content plus
/// surrounding template).
///
/// A failure here aborts only this post; the caller skips and continues.
pub fn render_page(client: &Client, post: &Post) -> Result<String, ArchiveError> {
    http::get_text(client, &post.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_name() {
        let post = Post {
            published: DateTimeUtc::new(2025, 5, 2, 9, 5, 0),
            url: "https://example.blogspot.com/2025/05/hello.html".into(),
            title: "Hello".into(),
        };
        assert_eq!(post.folder_name(), "20250502T090500Z");
    }
}
