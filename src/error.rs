//! Error taxonomy for the archive pipeline.
//!
//! Three kinds, matching where a failure can originate:
//! - fetch: network or remote-service failure (includes non-2xx statuses
//!   and timeouts)
//! - parse: malformed feed listing, post HTML, or timestamp
//! - write: local filesystem failure
//!
//! Fatality is decided by the caller: a fetch failure on the first listing
//! page kills the run, the same failure on a single post or asset does not.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("request to `{url}` failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed {what}: {detail}")]
    Parse { what: &'static str, detail: String },

    #[error("write failed for `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

impl ArchiveError {
    pub fn parse(what: &'static str, detail: impl Into<String>) -> Self {
        Self::Parse {
            what,
            detail: detail.into(),
        }
    }
}
