//! blogarch - offline archiver for hosted blog posts.

mod archive;
mod cli;
mod error;
mod feed;
mod http;
mod localize;
mod logger;
mod pipeline;
mod post;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let options = cli.into_options()?;
    pipeline::run(&options)?;
    Ok(())
}
