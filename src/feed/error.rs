//! Error types for feed retrieval and date parsing.

use thiserror::Error;

/// A publication date that matched neither supported layout.
///
/// Callers that can tolerate a missing date should use
/// [`parse_pub_date`](super::date::parse_pub_date), which converts this
/// into the epoch sentinel instead.
#[derive(Debug, Error)]
pub enum DateParseError {
    /// The raw string did not match either RFC-822-style layout.
    #[error("unrecognized publication date: {raw}")]
    Unrecognized {
        /// The original, uncleaned date string from the feed.
        raw: String,
    },
}

/// Errors that can occur while fetching and reading a feed.
///
/// These are fatal for the run: without a readable feed there is nothing
/// to archive.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level error while retrieving the feed XML.
    #[error("failed to fetch feed {url}: {source}")]
    Fetch {
        /// The feed URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status} fetching feed {url}")]
    HttpStatus {
        /// The feed URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not a readable RSS document.
    #[error("failed to parse feed {url}: {source}")]
    Parse {
        /// The feed URL.
        url: String,
        /// The underlying RSS parse error.
        #[source]
        source: rss::Error,
    },
}

impl FeedError {
    /// Creates a fetch error from a reqwest error.
    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a parse error from an RSS error.
    pub fn parse(url: impl Into<String>, source: rss::Error) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }
}
