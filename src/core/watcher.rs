//! Upload completion watcher
//!
//! After an export artifact is produced and handed to the object store,
//! this watcher polls the artifact's URL until it is retrievable or a
//! deadline elapses, then cleans up the task's local temporary state.
//!
//! This is the highest-risk correctness boundary in the system: local
//! state is deleted only after positive confirmation of remote
//! availability, never speculatively and never on an ambiguous probe
//! result. A timed-out watch deliberately retains the local artifact for
//! manual recovery.

use crate::adapters::objectstore::UploadProbe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use url::Url;

/// How one watch cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Remote availability confirmed; local state removed
    Uploaded,
    /// Deadline elapsed without confirmation; local state retained
    TimedOut,
}

/// Poll interval and overall deadline for one watch cycle
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub poll_interval: Duration,
    pub deadline: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            deadline: Duration::from_secs(300),
        }
    }
}

/// Watches one uploaded artifact until it is retrievable or the deadline
/// elapses
///
/// The probe-and-sleep sequence is strictly sequential: probes never
/// overlap within a cycle. There is no cancellation signal; the only exit
/// conditions are confirmed upload and deadline expiry.
pub async fn watch_upload(
    probe: &dyn UploadProbe,
    url: &Url,
    local_path: &Path,
    options: WatchOptions,
) -> WatchOutcome {
    let started = Instant::now();
    loop {
        if started.elapsed() >= options.deadline {
            tracing::error!(
                url = %url,
                path = %local_path.display(),
                deadline_secs = options.deadline.as_secs(),
                "Upload watch deadline elapsed, keeping local artifact"
            );
            return WatchOutcome::TimedOut;
        }

        if probe.exists(url).await {
            tracing::debug!(
                url = %url,
                path = %local_path.display(),
                "Upload confirmed, flushing local artifact"
            );
            remove_local_artifact(local_path).await;
            return WatchOutcome::Uploaded;
        }

        tracing::debug!(url = %url, "Upload is not done yet, waiting");
        tokio::time::sleep(options.poll_interval).await;
    }
}

/// Spawns a watch as its own tokio task
///
/// The watch runs as an independently schedulable unit: waiting for one
/// task's upload never blocks acceptance or processing of other tasks, and
/// watches across tasks run concurrently without coordination.
pub fn spawn_watch(
    probe: Arc<dyn UploadProbe>,
    url: Url,
    local_path: PathBuf,
    options: WatchOptions,
) -> JoinHandle<WatchOutcome> {
    tokio::spawn(async move { watch_upload(probe.as_ref(), &url, &local_path, options).await })
}

/// Removes the task's local temporary state (file or directory)
///
/// Cleanup failures are logged and swallowed: the watch outcome is
/// reported independently of cleanup success.
async fn remove_local_artifact(path: &Path) {
    let result = if path.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    if let Err(e) = result {
        tracing::error!(path = %path.display(), error = %e, "Failed to remove local artifact");
    }
}
