//! # siol_tags
//!
//! Tools for auditing the tags editors attach to siol.net news articles.
//!
//! ## Features
//!
//! - Scrapes article URLs, text, tags, counters and reader comments from
//!   siol.net into a JSON article store
//! - Scores every article's tags: a relevance index (how many tags occur in
//!   the text) and a similarity index (how many tag pairs are near duplicates)
//! - Imports legacy spreadsheet exports and writes CSV reports
//! - Word frequency, tokenizing, declension and tag suggestion helpers for
//!   picking new tags
//!
//! ## Usage
//!
//! ```sh
//! siol_tags fetch-urls --from 2017-5-1 --to 2017-5-7
//! siol_tags import --urls articles.txt
//! siol_tags export --from 2017-5-1 --to 2017-5-7 --section /dom
//! ```
//!
//! ## Architecture
//!
//! 1. **Indexing**: discover article URLs from the daily archive pages
//! 2. **Fetching**: download and parse each article and its comments
//! 3. **Scoring**: compute tag relevance and similarity per article
//! 4. **Output**: update the store and write CSV and text reports

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod commands;
mod config;
mod error;
mod importers;
mod models;
mod outputs;
mod scoring;
mod scrapers;
mod store;
mod utils;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(store = %args.store.display(), config = ?args.config, command = ?args.command, "Parsed CLI arguments");

    let config = config::load_config(args.config.as_deref())?;
    commands::run(args.command, &args.store, &config).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Finished"
    );
    Ok(())
}
