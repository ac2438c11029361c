//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// Archive podcast episodes from an RSS feed.
///
/// Downloads each episode's media file into a Show/Year/Mon tree under the
/// output directory, skipping episodes that are already archived.
#[derive(Parser, Debug)]
#[command(name = "podarchive")]
#[command(author, version, about)]
pub struct Args {
    /// The URL of the podcast RSS feed
    #[arg(short, long)]
    pub url: String,

    /// Only archive episodes published on or after this date (yyyy-MM-dd)
    #[arg(short, long, value_parser = parse_calendar_date)]
    pub start: Option<NaiveDate>,

    /// Only archive episodes published on or before this date (yyyy-MM-dd)
    #[arg(short, long, value_parser = parse_calendar_date)]
    pub end: Option<NaiveDate>,

    /// Directory the archive tree is created under
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_calendar_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("'{value}' is not a yyyy-MM-dd date (e.g. 2021-01-01)"))
}
