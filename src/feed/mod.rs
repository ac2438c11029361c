//! Podcast feed retrieval and episode extraction.
//!
//! A [`Feed`] is fetched over HTTP, read as RSS, and reduced to the episode
//! fields the archiver needs: title, publication instant, and enclosure URL.
//! Items missing any of those are skipped; one malformed item must not stop
//! the rest of the feed from being archived.

pub mod date;
mod error;

use chrono::{DateTime, Utc};
use rss::Channel;
use tracing::{debug, instrument, warn};
use url::Url;

use date::parse_pub_date;
pub use error::{DateParseError, FeedError};

/// One downloadable episode extracted from a feed.
///
/// `show_title` is copied from the channel at construction time; episodes
/// carry no reference back to the feed that produced them.
#[derive(Debug, Clone)]
pub struct Episode {
    /// Episode title as published.
    pub title: String,
    /// Publication instant, normalized to UTC (epoch when unparseable).
    pub published_at: DateTime<Utc>,
    /// Media enclosure URL.
    pub media_url: Url,
    /// Title of the show this episode belongs to.
    pub show_title: String,
}

/// A parsed podcast feed: the show title and its episodes.
#[derive(Debug, Clone)]
pub struct Feed {
    /// Channel title, used as the archive's root directory name.
    pub title: String,
    /// Episodes in chronological ascending order (oldest first).
    pub episodes: Vec<Episode>,
}

impl Feed {
    /// Fetches a feed URL and extracts its episodes.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] if the feed cannot be retrieved, the server
    /// answers with a non-success status, or the body is not readable RSS.
    #[instrument(skip(client), fields(url = %url))]
    pub async fn fetch(client: &reqwest::Client, url: &Url) -> Result<Self, FeedError> {
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FeedError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::http_status(url.as_str(), status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::fetch(url.as_str(), e))?;

        let channel =
            Channel::read_from(&body[..]).map_err(|e| FeedError::parse(url.as_str(), e))?;

        Ok(Self::from_channel(&channel))
    }

    /// Builds a feed from an already-parsed RSS channel.
    ///
    /// Items missing a title, publication date, or enclosure URL are skipped
    /// with a warning. The resulting episode list is sorted by publication
    /// date ascending, whatever order the channel listed them in.
    #[must_use]
    pub fn from_channel(channel: &Channel) -> Self {
        let show_title = channel.title().trim().to_string();

        let mut episodes: Vec<Episode> = channel
            .items()
            .iter()
            .filter_map(|item| extract_episode(item, &show_title))
            .collect();
        episodes.sort_by_key(|episode| episode.published_at);

        debug!(
            show = %show_title,
            episodes = episodes.len(),
            items = channel.items().len(),
            "extracted feed"
        );

        Self {
            title: show_title,
            episodes,
        }
    }
}

/// Extracts a single episode from an RSS item, or `None` if a required
/// field is missing or the enclosure URL is invalid.
fn extract_episode(item: &rss::Item, show_title: &str) -> Option<Episode> {
    let title = item.title().map(str::trim).filter(|t| !t.is_empty())?;

    let Some(raw_date) = item.pub_date() else {
        warn!(title, "skipping item without a pubDate");
        return None;
    };

    let Some(enclosure) = item.enclosure() else {
        warn!(title, "skipping item without an enclosure");
        return None;
    };

    let media_url = match Url::parse(enclosure.url()) {
        Ok(url) => url,
        Err(_) => {
            warn!(title, url = enclosure.url(), "skipping item with an invalid enclosure URL");
            return None;
        }
    };

    Some(Episode {
        title: title.to_string(),
        published_at: parse_pub_date(raw_date),
        media_url,
        show_title: show_title.to_string(),
    })
}
