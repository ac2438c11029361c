//! Deterministic archive layout: `Show/Year/Mon/Title.ext`.
//!
//! Every path segment is sanitized independently, and the resulting target
//! is a pure function of the episode's show title, publish date, episode
//! title, and media URL. Re-running the tool therefore always computes the
//! same path for the same episode, which is what makes skip decisions
//! possible.

use std::path::{Path, PathBuf};

use url::Url;

use crate::feed::Episode;

/// Extension used when the media URL carries none.
pub const DEFAULT_EXTENSION: &str = ".mp3";

/// Where one episode lands on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Directory the episode file belongs in (`root/Show/Year/Mon`).
    pub directory: PathBuf,
    /// Sanitized file name including extension.
    pub filename: String,
    /// `directory` joined with `filename`.
    pub full_path: PathBuf,
}

/// Replaces filesystem-invalid characters in a single path segment with `_`.
///
/// The invalid set is `< > : " / \ | ? * #` plus control characters. Must be
/// applied per segment, never to a joined path, or intentional separators
/// would be escaped too.
#[must_use]
pub fn sanitize_component(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '#' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Extracts the extension (including the dot) from a media URL's path,
/// ignoring any query string.
pub(crate) fn extension_from_media_url(url: &Url) -> Option<String> {
    let last_segment = url.path_segments()?.next_back()?;
    let dot_index = last_segment.rfind('.')?;
    let ext = &last_segment[dot_index..];
    if ext.len() <= 1 || ext.len() > 12 {
        return None;
    }
    Some(ext.to_string())
}

/// Computes the archive target for an episode under `archive_root`.
///
/// Pure: identical episode fields always yield an identical target.
#[must_use]
pub fn layout_for(archive_root: &Path, episode: &Episode) -> DownloadTarget {
    let year = episode.published_at.format("%Y").to_string();
    let month = episode.published_at.format("%b").to_string();

    let directory = archive_root
        .join(sanitize_component(&episode.show_title))
        .join(sanitize_component(&year))
        .join(sanitize_component(&month));

    let extension = extension_from_media_url(&episode.media_url)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let filename = format!("{}{extension}", sanitize_component(&episode.title));

    let full_path = directory.join(&filename);
    DownloadTarget {
        directory,
        filename,
        full_path,
    }
}
