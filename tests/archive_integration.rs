//! Integration tests for the archive engine.
//!
//! These tests verify skip decisions, transfers, and failure isolation
//! against mock HTTP servers.

use std::time::{Duration, UNIX_EPOCH};

use chrono::{TimeZone, Utc};
use podarchive::{ArchiveEngine, ArchiveStats, DownloadOutcome, Episode, HttpClient, layout_for};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a media file endpoint on a fresh mock server.
async fn setup_media_server(path_str: &str, content: &[u8]) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(&mock_server)
        .await;

    mock_server
}

fn episode(server: &MockServer, media_path: &str, title: &str) -> Episode {
    Episode {
        title: title.to_string(),
        published_at: Utc.with_ymd_and_hms(2021, 6, 15, 8, 30, 0).unwrap(),
        media_url: Url::parse(&format!("{}{media_path}", server.uri())).unwrap(),
        show_title: "My Show".to_string(),
    }
}

#[tokio::test]
async fn test_fresh_episode_is_downloaded_with_content() {
    let content = b"fake mp3 bytes for a full episode";
    let server = setup_media_server("/ep1.mp3", content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let engine = ArchiveEngine::new(HttpClient::new(), temp_dir.path());
    let episodes = [episode(&server, "/ep1.mp3", "Ep 1")];
    let reports = engine.archive(&episodes).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].outcome,
        DownloadOutcome::Downloaded {
            bytes: content.len() as u64
        }
    );

    let expected_path = temp_dir.path().join("My Show/2021/Jun/Ep 1.mp3");
    assert_eq!(reports[0].path, expected_path);
    let written = std::fs::read(&expected_path).expect("archived file should exist");
    assert_eq!(written, content);
}

#[tokio::test]
async fn test_downloaded_file_is_stamped_with_publish_date() {
    let server = setup_media_server("/ep1.mp3", b"audio").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let engine = ArchiveEngine::new(HttpClient::new(), temp_dir.path());
    let episodes = [episode(&server, "/ep1.mp3", "Ep 1")];
    let reports = engine.archive(&episodes).await;
    assert!(matches!(
        reports[0].outcome,
        DownloadOutcome::Downloaded { .. }
    ));

    let metadata = std::fs::metadata(&reports[0].path).expect("should stat archived file");
    let modified = metadata.modified().expect("should read mtime");
    let expected =
        UNIX_EPOCH + Duration::from_secs(episodes[0].published_at.timestamp() as u64);
    assert_eq!(modified, expected, "mtime should match the episode date");
}

#[tokio::test]
async fn test_matching_length_skips_without_transfer() {
    // Local file has the remote's exact length but different bytes; a skip
    // must leave it untouched, proving no body transfer happened.
    let remote = b"remote content, 1000 bytes? no";
    let local = b"local content, same byte count";
    assert_eq!(remote.len(), local.len());

    let server = setup_media_server("/ep1.mp3", remote).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let episodes = [episode(&server, "/ep1.mp3", "Ep 1")];
    let target = layout_for(temp_dir.path(), &episodes[0]);
    std::fs::create_dir_all(&target.directory).expect("should create layout dirs");
    std::fs::write(&target.full_path, local).expect("should seed local file");

    let engine = ArchiveEngine::new(HttpClient::new(), temp_dir.path());
    let reports = engine.archive(&episodes).await;

    assert_eq!(reports[0].outcome, DownloadOutcome::SkippedAlreadyExists);
    let after = std::fs::read(&target.full_path).expect("local file should remain");
    assert_eq!(after, local, "skip must not rewrite the local file");
}

#[tokio::test]
async fn test_length_mismatch_triggers_redownload() {
    let remote = b"the complete remote episode body";
    let server = setup_media_server("/ep1.mp3", remote).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let episodes = [episode(&server, "/ep1.mp3", "Ep 1")];
    let target = layout_for(temp_dir.path(), &episodes[0]);
    std::fs::create_dir_all(&target.directory).expect("should create layout dirs");
    // Stale partial copy from an interrupted earlier run
    std::fs::write(&target.full_path, b"truncated").expect("should seed stale file");

    let engine = ArchiveEngine::new(HttpClient::new(), temp_dir.path());
    let reports = engine.archive(&episodes).await;

    assert!(matches!(
        reports[0].outcome,
        DownloadOutcome::Downloaded { .. }
    ));
    let after = std::fs::read(&target.full_path).expect("file should exist");
    assert_eq!(after, remote, "stale copy should be replaced");
}

#[tokio::test]
async fn test_second_run_skips_everything() {
    let server = setup_media_server("/ep1.mp3", b"episode one body").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let engine = ArchiveEngine::new(HttpClient::new(), temp_dir.path());
    let episodes = [episode(&server, "/ep1.mp3", "Ep 1")];

    let first = engine.archive(&episodes).await;
    assert!(matches!(
        first[0].outcome,
        DownloadOutcome::Downloaded { .. }
    ));

    let second = engine.archive(&episodes).await;
    assert_eq!(second[0].outcome, DownloadOutcome::SkippedAlreadyExists);
}

#[tokio::test]
async fn test_failed_episode_does_not_abort_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.mp3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fine".to_vec()))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let engine = ArchiveEngine::new(HttpClient::new(), temp_dir.path());

    let episodes = [
        episode(&server, "/missing.mp3", "Gone"),
        episode(&server, "/ok.mp3", "Fine"),
    ];
    let reports = engine.archive(&episodes).await;

    assert_eq!(reports.len(), 2);
    match &reports[0].outcome {
        DownloadOutcome::Failed { reason } => {
            assert!(reason.contains("404"), "reason should name the status: {reason}");
        }
        other => panic!("expected a failure, got {other:?}"),
    }
    assert!(
        matches!(reports[1].outcome, DownloadOutcome::Downloaded { .. }),
        "the episode after a failure must still be archived"
    );

    let stats = ArchiveStats::tally(&reports);
    assert_eq!((stats.downloaded, stats.skipped, stats.failed), (1, 0, 1));
}

#[tokio::test]
async fn test_probe_failure_is_a_failure_not_a_skip() {
    // Server refuses the probe; an existing local file must not be
    // silently treated as up to date.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ep1.mp3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let episodes = [episode(&server, "/ep1.mp3", "Ep 1")];
    let target = layout_for(temp_dir.path(), &episodes[0]);
    std::fs::create_dir_all(&target.directory).expect("should create layout dirs");
    std::fs::write(&target.full_path, b"whatever").expect("should seed local file");

    let engine = ArchiveEngine::new(HttpClient::new(), temp_dir.path());
    let reports = engine.archive(&episodes).await;

    assert!(matches!(reports[0].outcome, DownloadOutcome::Failed { .. }));
}

#[tokio::test]
async fn test_sanitized_layout_for_awkward_titles() {
    let server = setup_media_server("/audio.mp3", b"body").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let ep = episode(&server, "/audio.mp3?x=1", "Ep #1: Hello?");

    let engine = ArchiveEngine::new(HttpClient::new(), temp_dir.path());
    let reports = engine.archive(std::slice::from_ref(&ep)).await;

    assert!(matches!(
        reports[0].outcome,
        DownloadOutcome::Downloaded { .. }
    ));
    assert_eq!(
        reports[0].path,
        temp_dir.path().join("My Show/2021/Jun/Ep _1_ Hello_.mp3")
    );
    assert!(reports[0].path.exists());
}
