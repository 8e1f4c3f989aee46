//! Blocking HTTP layer shared by the feed, page and asset fetchers.
//!
//! One client for the whole run: custom User-Agent, bounded per-request
//! timeout, no retries. Every request is a single attempt; the caller
//! decides whether a failure is fatal.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;

use crate::error::ArchiveError;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("blogarch/", env!("CARGO_PKG_VERSION"));

/// Build the blocking client used for the whole run.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")
}

/// GET a URL and return the body as text.
pub fn get_text(client: &Client, url: &str) -> Result<String, ArchiveError> {
    let response = send(client, url)?;
    response.text().map_err(|source| ArchiveError::Fetch {
        url: url.to_string(),
        source,
    })
}

/// GET a URL and return the raw body plus the response `Content-Type`.
pub fn get_bytes(client: &Client, url: &str) -> Result<(Vec<u8>, Option<String>), ArchiveError> {
    let response = send(client, url)?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let bytes = response.bytes().map_err(|source| ArchiveError::Fetch {
        url: url.to_string(),
        source,
    })?;

    Ok((bytes.to_vec(), content_type))
}

fn send(client: &Client, url: &str) -> Result<Response, ArchiveError> {
    let response = client
        .get(url)
        .send()
        .map_err(|source| ArchiveError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ArchiveError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(response)
}
