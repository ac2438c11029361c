//! Sequential archive engine: decide, transfer or skip, report.
//!
//! Episodes are processed strictly one at a time. Each episode ends in
//! exactly one [`DownloadOutcome`]; a failure is reported and the run
//! continues with the next episode.

use std::path::PathBuf;

use filetime::FileTime;
use tracing::{info, instrument, warn};
use url::Url;

use super::layout::{DownloadTarget, layout_for};
use crate::download::{DownloadError, HttpClient};
use crate::feed::Episode;

/// How one episode ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The media file was transferred to the archive.
    Downloaded {
        /// Bytes written to disk.
        bytes: u64,
    },
    /// A local file with the remote's exact length already exists.
    SkippedAlreadyExists,
    /// The probe or transfer failed; the reason is the error's display text.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Per-episode result of an archive run.
#[derive(Debug, Clone)]
pub struct EpisodeReport {
    /// Episode title as published.
    pub title: String,
    /// The archive path the episode maps to.
    pub path: PathBuf,
    /// What happened.
    pub outcome: DownloadOutcome,
}

/// Tallied counts over a run's reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Episodes transferred this run.
    pub downloaded: usize,
    /// Episodes already present with a matching length.
    pub skipped: usize,
    /// Episodes that failed.
    pub failed: usize,
}

impl ArchiveStats {
    /// Tallies outcomes from a slice of reports.
    #[must_use]
    pub fn tally(reports: &[EpisodeReport]) -> Self {
        let mut stats = Self::default();
        for report in reports {
            match report.outcome {
                DownloadOutcome::Downloaded { .. } => stats.downloaded += 1,
                DownloadOutcome::SkippedAlreadyExists => stats.skipped += 1,
                DownloadOutcome::Failed { .. } => stats.failed += 1,
            }
        }
        stats
    }

    /// Total episodes processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }
}

/// Archive engine for sequential episode downloads.
///
/// Holds the HTTP client and the archive root; [`archive`](Self::archive)
/// walks an episode list and produces one report per episode.
#[derive(Debug)]
pub struct ArchiveEngine {
    client: HttpClient,
    archive_root: PathBuf,
}

impl ArchiveEngine {
    /// Creates an engine writing under `archive_root`.
    #[must_use]
    pub fn new(client: HttpClient, archive_root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            archive_root: archive_root.into(),
        }
    }

    /// Archives every episode in order, one at a time.
    ///
    /// Never aborts on a per-episode failure; the failure is recorded in
    /// that episode's report and the run moves on.
    pub async fn archive(&self, episodes: &[Episode]) -> Vec<EpisodeReport> {
        let total = episodes.len();
        let mut reports = Vec::with_capacity(total);

        for (index, episode) in episodes.iter().enumerate() {
            info!(
                episode = index + 1,
                total,
                title = %episode.title,
                "archiving episode"
            );

            let target = layout_for(&self.archive_root, episode);
            let outcome = match self.archive_episode(episode, &target).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(title = %episode.title, error = %error, "episode failed");
                    DownloadOutcome::Failed {
                        reason: error.to_string(),
                    }
                }
            };

            reports.push(EpisodeReport {
                title: episode.title.clone(),
                path: target.full_path,
                outcome,
            });
        }

        reports
    }

    /// Decides whether `media_url` needs to be fetched into `target`.
    ///
    /// True when no local file exists, or when the local length differs
    /// from the remote content length (a shorter or longer local copy is
    /// equally stale). Only response headers are read.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] when the probe itself fails; a failed
    /// probe is never treated as "already downloaded".
    #[instrument(skip(self, target), fields(url = %media_url))]
    pub async fn is_download_needed(
        &self,
        media_url: &Url,
        target: &DownloadTarget,
    ) -> Result<bool, DownloadError> {
        let remote_length = self.client.content_length(media_url).await?;

        match tokio::fs::metadata(&target.full_path).await {
            Ok(metadata) => Ok(metadata.len() != remote_length),
            Err(_) => Ok(true),
        }
    }

    /// Runs the decision and, when needed, the transfer for one episode.
    async fn archive_episode(
        &self,
        episode: &Episode,
        target: &DownloadTarget,
    ) -> Result<DownloadOutcome, DownloadError> {
        if !self.is_download_needed(&episode.media_url, target).await? {
            info!(path = %target.full_path.display(), "already archived, skipping");
            return Ok(DownloadOutcome::SkippedAlreadyExists);
        }

        tokio::fs::create_dir_all(&target.directory)
            .await
            .map_err(|e| DownloadError::io(target.directory.clone(), e))?;

        let bytes = self
            .client
            .fetch_to_file(&episode.media_url, &target.full_path)
            .await?;

        // Stamp the file with the episode date so the archive sorts by
        // publication time rather than download time.
        let stamp = FileTime::from_unix_time(episode.published_at.timestamp(), 0);
        filetime::set_file_times(&target.full_path, stamp, stamp)
            .map_err(|e| DownloadError::io(target.full_path.clone(), e))?;

        info!(path = %target.full_path.display(), bytes, "episode archived");
        Ok(DownloadOutcome::Downloaded { bytes })
    }
}
