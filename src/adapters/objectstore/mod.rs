//! Object-store adapter seam
//!
//! The upload completion watcher only needs one capability from the object
//! store: a lightweight existence probe against the artifact's public URL.

pub mod head;

pub use head::HttpHeadProbe;

use async_trait::async_trait;
use url::Url;

/// Lightweight existence probe against an object-store URL
///
/// Implementations must treat any ambiguous or failed probe as "not yet
/// available" and return `false`; only a positive confirmation may return
/// `true`. The watcher deletes local state based on this answer.
#[async_trait]
pub trait UploadProbe: Send + Sync {
    async fn exists(&self, url: &Url) -> bool;
}
