//! Domain identifier types with validation
//!
//! Newtype wrapper for the export task identifier. The id is opaque to
//! clients: it is the tracking token returned on submission and the name of
//! the task's private working directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Export task identifier newtype wrapper
///
/// Generated at dispatch time, globally unique per submission, and safe to
/// expose to clients as an opaque tracking token.
///
/// # Examples
///
/// ```
/// use geopack::domain::ids::TaskId;
///
/// let a = TaskId::generate();
/// let b = TaskId::generate();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh, globally unique task id (UUIDv4)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a TaskId from an existing string token
    ///
    /// # Errors
    ///
    /// Returns an error when the token is empty or contains path
    /// separators (the id doubles as a directory name).
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("task id cannot be empty".to_string());
        }
        if id.contains('/') || id.contains('\\') {
            return Err("task id cannot contain path separators".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the task id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
