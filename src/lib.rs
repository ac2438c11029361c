//! Podcast archive library.
//!
//! Fetches a podcast RSS feed and downloads each episode's media file into
//! a deterministic `Show/Year/Mon/Title.ext` tree, skipping files that are
//! already present with a matching length.
//!
//! # Architecture
//!
//! - [`feed`] - Feed retrieval, episode extraction, pubDate normalization
//! - [`archive`] - Path layout, date filtering, and the download engine
//! - [`download`] - HTTP transport: content-length probe and body transfer

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod download;
pub mod feed;

// Re-export commonly used types
pub use archive::{
    ArchiveEngine, ArchiveStats, DEFAULT_EXTENSION, DownloadOutcome, DownloadTarget,
    EpisodeReport, filter_by_date, layout_for, sanitize_component,
};
pub use download::{DownloadError, HttpClient};
pub use feed::{DateParseError, Episode, Feed, FeedError};
pub use feed::date::{parse_pub_date, try_parse_pub_date};
