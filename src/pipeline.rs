//! Sequential archiving pipeline.
//!
//! Each post moves through fetch -> localize -> write before the next one
//! starts. A post that fails at any stage is skipped with a warning; only a
//! failure on the initial feed listing kills the run.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use url::Url;

use crate::error::ArchiveError;
use crate::logger::ProgressLine;
use crate::utils::{DateTimeUtc, plural_count};
use crate::{archive, feed, http, localize, log, post, warn};

/// Validated inputs for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub blog_url: String,
    /// Inclusive start of the range
    pub start: DateTimeUtc,
    /// Exclusive end of the range
    pub end: DateTimeUtc,
    pub output: PathBuf,
    pub timeout: Duration,
}

/// Terminal state of a run, derived from the terminal state of every post.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Posts written to disk
    pub archived: usize,
    /// Posts that failed to fetch, localize or write
    pub skipped: usize,
    /// Asset downloads that failed across all archived posts
    pub asset_failures: usize,
}

/// Archive every post in the configured range.
///
/// Per-post failures are reported and skipped; the run itself only fails on
/// an unreachable or malformed listing.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let client = http::build_client(options.timeout)?;

    log!(
        "fetch";
        "listing posts from {} between {} and {}",
        options.blog_url, options.start, options.end
    );

    let posts = feed::fetch_posts(&client, &options.blog_url, &options.start, &options.end)
        .context("could not list posts from the blog feed")?;

    log!("fetch"; "found {}", plural_count(posts.len(), "post"));

    let mut summary = RunSummary::default();
    let progress = (!posts.is_empty()).then(|| ProgressLine::new(&[("posts", posts.len())]));

    for post in &posts {
        match archive_post(&client, options, post) {
            Ok(failed_assets) => {
                summary.archived += 1;
                summary.asset_failures += failed_assets;
            }
            Err(err) => {
                summary.skipped += 1;
                warn!("skipping \"{}\": {err}", post.title);
            }
        }
        if let Some(progress) = &progress {
            progress.inc("posts");
        }
    }

    if let Some(progress) = progress {
        progress.finish();
    }

    log!(
        "archive";
        "{} archived, {} skipped",
        plural_count(summary.archived, "post"),
        summary.skipped
    );

    Ok(summary)
}

/// Run one post through the pipeline. Returns the number of asset downloads
/// that failed (the post is still archived when assets fail).
fn archive_post(
    client: &Client,
    options: &RunOptions,
    post: &post::Post,
) -> Result<usize, ArchiveError> {
    // Fetching
    let html = post::render_page(client, post)?;
    let page_url = Url::parse(&post.url)
        .map_err(|err| ArchiveError::parse("post url", format!("{}: {err}", post.url)))?;

    // Localizing
    let page = localize::localize_page(client, &page_url, &html)?;

    // Writing
    let dir = archive::write_entry(&options.output, post, &page)?;
    log!("archive"; "\"{}\" -> {}", post.title, dir.display());

    Ok(page.failed)
}
