//! Integration tests for the upload completion watcher against a real
//! HTTP probe

use geopack::adapters::objectstore::{HttpHeadProbe, UploadProbe};
use geopack::core::{spawn_watch, watch_upload, WatchOptions, WatchOutcome};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;

fn fast_options() -> WatchOptions {
    WatchOptions {
        poll_interval: Duration::from_millis(10),
        deadline: Duration::from_millis(200),
    }
}

fn artifact(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"export payload").unwrap();
    path
}

#[tokio::test]
async fn test_confirmed_upload_deletes_local_file() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("HEAD", "/exports/pokhara.zip")
        .with_status(200)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let local = artifact(&dir, "pokhara.zip");
    let url = Url::parse(&format!("{}/exports/pokhara.zip", server.url())).unwrap();

    let probe = HttpHeadProbe::new(Duration::from_secs(1));
    let outcome = watch_upload(&probe, &url, &local, fast_options()).await;

    assert_eq!(outcome, WatchOutcome::Uploaded);
    assert!(!local.exists());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_upload_retains_local_file() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("HEAD", "/exports/missing.zip")
        .with_status(404)
        .expect_at_least(2)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let local = artifact(&dir, "missing.zip");
    let url = Url::parse(&format!("{}/exports/missing.zip", server.url())).unwrap();

    let probe = HttpHeadProbe::new(Duration::from_secs(1));
    let outcome = watch_upload(&probe, &url, &local, fast_options()).await;

    assert_eq!(outcome, WatchOutcome::TimedOut);
    assert!(local.exists(), "local copy must survive a timed-out watch");
}

#[tokio::test]
async fn test_server_error_is_treated_as_not_yet_available() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("HEAD", "/exports/flaky.zip")
        .with_status(503)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let local = artifact(&dir, "flaky.zip");
    let url = Url::parse(&format!("{}/exports/flaky.zip", server.url())).unwrap();

    let probe = HttpHeadProbe::new(Duration::from_secs(1));
    let outcome = watch_upload(&probe, &url, &local, fast_options()).await;

    assert_eq!(outcome, WatchOutcome::TimedOut);
    assert!(local.exists());
}

#[tokio::test]
async fn test_unreachable_host_never_deletes() {
    let dir = TempDir::new().unwrap();
    let local = artifact(&dir, "unreachable.zip");
    let url = Url::parse("http://127.0.0.1:1/exports/unreachable.zip").unwrap();

    let probe = HttpHeadProbe::new(Duration::from_millis(50));
    let outcome = watch_upload(&probe, &url, &local, fast_options()).await;

    assert_eq!(outcome, WatchOutcome::TimedOut);
    assert!(local.exists());
}

/// Probe that reports success only from the nth call onward
struct EventualProbe {
    calls: AtomicUsize,
    exists_after: usize,
}

#[async_trait]
impl UploadProbe for EventualProbe {
    async fn exists(&self, _url: &Url) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.exists_after
    }
}

#[tokio::test]
async fn test_upload_confirmed_after_retries() {
    let dir = TempDir::new().unwrap();
    let local = artifact(&dir, "eventual.zip");
    let url = Url::parse("https://objects.example.com/exports/eventual.zip").unwrap();

    let probe = EventualProbe {
        calls: AtomicUsize::new(0),
        exists_after: 3,
    };
    let outcome = watch_upload(&probe, &url, &local, fast_options()).await;

    assert_eq!(outcome, WatchOutcome::Uploaded);
    assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
    assert!(!local.exists());
}

#[tokio::test]
async fn test_spawned_watches_run_independently() {
    let dir = TempDir::new().unwrap();
    let uploaded = artifact(&dir, "done.zip");
    let pending = artifact(&dir, "pending.zip");

    let yes: Arc<dyn UploadProbe> = Arc::new(EventualProbe {
        calls: AtomicUsize::new(0),
        exists_after: 1,
    });
    let never: Arc<dyn UploadProbe> = Arc::new(EventualProbe {
        calls: AtomicUsize::new(0),
        exists_after: usize::MAX,
    });

    let first = spawn_watch(
        yes,
        Url::parse("https://objects.example.com/done.zip").unwrap(),
        uploaded.clone(),
        fast_options(),
    );
    let second = spawn_watch(
        never,
        Url::parse("https://objects.example.com/pending.zip").unwrap(),
        pending.clone(),
        fast_options(),
    );

    assert_eq!(first.await.unwrap(), WatchOutcome::Uploaded);
    assert_eq!(second.await.unwrap(), WatchOutcome::TimedOut);
    assert!(!uploaded.exists());
    assert!(pending.exists());
}

#[tokio::test]
async fn test_directory_artifacts_are_removed_recursively() {
    let dir = TempDir::new().unwrap();
    let work_dir = dir.path().join("task-output");
    std::fs::create_dir(&work_dir).unwrap();
    std::fs::write(work_dir.join("export.geojson"), b"{}").unwrap();

    let probe = EventualProbe {
        calls: AtomicUsize::new(0),
        exists_after: 1,
    };
    let url = Url::parse("https://objects.example.com/task-output.zip").unwrap();
    let outcome = watch_upload(&probe, &url, &work_dir, fast_options()).await;

    assert_eq!(outcome, WatchOutcome::Uploaded);
    assert!(!work_dir.exists());
}

#[tokio::test]
async fn test_missing_local_path_does_not_fail_the_watch() {
    let probe = EventualProbe {
        calls: AtomicUsize::new(0),
        exists_after: 1,
    };
    let url = Url::parse("https://objects.example.com/ghost.zip").unwrap();
    let outcome = watch_upload(
        &probe,
        &url,
        Path::new("/nonexistent/ghost.zip"),
        fast_options(),
    )
    .await;

    // cleanup errors are logged and swallowed; the upload still counts
    assert_eq!(outcome, WatchOutcome::Uploaded);
}
