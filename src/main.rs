//! CLI entry point for the podcast archiver.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Parser;
use podarchive::{ArchiveEngine, ArchiveStats, Feed, HttpClient, filter_by_date};
use tracing::{debug, info, warn};
use url::Url;

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    // An unusable feed URL is fatal; nothing can be archived without one.
    let feed_url = Url::parse(&args.url)
        .with_context(|| format!("invalid feed URL: {}", args.url))?;

    let client = HttpClient::new();

    let feed = Feed::fetch(client.inner(), &feed_url)
        .await
        .context("failed to load feed")?;

    info!(
        show = %feed.title,
        episodes = feed.episodes.len(),
        "feed loaded"
    );

    if feed.episodes.is_empty() {
        info!("the feed was empty, nothing to archive");
        return Ok(());
    }

    let start = args.start.map(day_start);
    let end = args.end.map(day_end);
    let selected = filter_by_date(&feed.episodes, start, end);

    if selected.is_empty() {
        info!("date filter resulted in 0 matches, nothing to archive");
        return Ok(());
    }
    if selected.len() == feed.episodes.len() {
        info!("archiving all {} episodes", selected.len());
    } else {
        info!(
            "found {} of {} episodes matching the date filter",
            selected.len(),
            feed.episodes.len()
        );
    }

    let engine = ArchiveEngine::new(client, args.output);
    let reports = engine.archive(&selected).await;

    for report in &reports {
        if let podarchive::DownloadOutcome::Failed { reason } = &report.outcome {
            warn!(title = %report.title, reason, "episode was not archived");
        }
    }

    let stats = ArchiveStats::tally(&reports);
    info!(
        downloaded = stats.downloaded,
        skipped = stats.skipped,
        failed = stats.failed,
        total = stats.total(),
        "finished"
    );

    Ok(())
}

/// Midnight UTC at the start of a calendar date.
fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Last second of a calendar date, so an end bound includes the whole day.
fn day_end(date: NaiveDate) -> DateTime<Utc> {
    day_start(date) + chrono::Duration::seconds(86_399)
}
