//! Command-line interface definitions.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ColorChoice, Parser};

use crate::pipeline::RunOptions;
use crate::utils::DateTimeUtc;

/// Archive blog posts (HTML, CSS, images) as fully offline pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Base blog URL (e.g. https://foo.blogspot.com)
    #[arg(short = 'b', long = "blog-url", value_hint = clap::ValueHint::Url)]
    pub blog_url: String,

    /// UTC start of the range, inclusive (e.g. 2025-05-01T00:00:00Z)
    pub start: String,

    /// UTC end of the range, exclusive (e.g. 2025-05-04T00:00:00Z)
    pub end: String,

    /// Root output folder
    #[arg(short, long, default_value = "archive", value_hint = clap::ValueHint::DirPath)]
    pub output: PathBuf,

    /// Timeout in seconds applied to every network request
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate the arguments into run options.
    pub fn into_options(self) -> Result<RunOptions> {
        let start = parse_timestamp(&self.start).context("invalid start timestamp")?;
        let end = parse_timestamp(&self.end).context("invalid end timestamp")?;

        Ok(RunOptions {
            blog_url: self.blog_url,
            start,
            end,
            output: self.output,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

fn parse_timestamp(s: &str) -> Result<DateTimeUtc> {
    match DateTimeUtc::parse(s) {
        Some(dt) => Ok(dt),
        None => bail!("expected an ISO-8601 UTC timestamp like 2025-05-01T00:00:00Z, got `{s}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_minimal_arguments() {
        let cli = parse(&[
            "blogarch",
            "-b",
            "https://foo.blogspot.com",
            "2025-05-01T00:00:00Z",
            "2025-05-04T00:00:00Z",
        ]);
        assert_eq!(cli.blog_url, "https://foo.blogspot.com");
        assert_eq!(cli.output, PathBuf::from("archive"));
        assert_eq!(cli.timeout, 30);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_output_override() {
        let cli = parse(&[
            "blogarch",
            "-b",
            "https://foo.blogspot.com",
            "2025-05-01T00:00:00Z",
            "2025-05-04T00:00:00Z",
            "-o",
            "snapshots",
        ]);
        assert_eq!(cli.output, PathBuf::from("snapshots"));
    }

    #[test]
    fn test_into_options_parses_range() {
        let options = parse(&[
            "blogarch",
            "-b",
            "https://foo.blogspot.com",
            "2025-05-01T00:00:00Z",
            "2025-05-04T00:00:00Z",
        ])
        .into_options()
        .unwrap();

        assert_eq!(options.start, DateTimeUtc::new(2025, 5, 1, 0, 0, 0));
        assert_eq!(options.end, DateTimeUtc::new(2025, 5, 4, 0, 0, 0));
        assert_eq!(options.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_into_options_rejects_bad_timestamp() {
        let result = parse(&[
            "blogarch",
            "-b",
            "https://foo.blogspot.com",
            "yesterday",
            "2025-05-04T00:00:00Z",
        ])
        .into_options();
        assert!(result.is_err());
    }

    #[test]
    fn test_blog_url_is_required() {
        let result =
            Cli::try_parse_from(["blogarch", "2025-05-01T00:00:00Z", "2025-05-04T00:00:00Z"]);
        assert!(result.is_err());
    }
}
