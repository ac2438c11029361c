//! HTTP transport for media downloads.
//!
//! Provides the [`HttpClient`] used by the archive engine: a header-only
//! content-length probe and a streaming body transfer, each with its own
//! timeout.

mod client;
pub mod constants;
mod error;

pub use client::HttpClient;
pub use error::DownloadError;
