//! Archive organization: layout, date filtering, and the download engine.

mod engine;
mod filter;
mod layout;

pub use engine::{ArchiveEngine, ArchiveStats, DownloadOutcome, EpisodeReport};
pub use filter::filter_by_date;
pub use layout::{DEFAULT_EXTENSION, DownloadTarget, layout_for, sanitize_component};
