//! Constants for the download module (timeouts, identification).

/// HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Timeout for the header-only content-length probe (30 seconds).
pub const PROBE_TIMEOUT_SECS: u64 = 30;

/// Timeout for a full media body transfer (1 hour, large audio files on
/// slow connections).
pub const TRANSFER_TIMEOUT_SECS: u64 = 3600;

/// User-Agent sent on feed and media requests. Some podcast CDNs refuse
/// requests that do not look like a browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
