//! Submission persistence seen from the verifier: look a record up, flip its verified flag.

pub mod json_file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use json_file::JsonFileSubmissionStore;
pub use memory::MemorySubmissionStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    /// First successful verification. Re-verification keeps the original time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl SubmissionRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            website: None,
            is_verified: false,
            verified_at: None,
        }
    }

    pub(crate) fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.is_verified = true;
        if self.verified_at.is_none() {
            self.verified_at = Some(now);
        }
    }
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Set `is_verified = true` for `submission_id`. Returns whether a record matched.
    async fn mark_verified(&self, submission_id: &str) -> Result<bool>;

    async fn get(&self, submission_id: &str) -> Result<Option<SubmissionRecord>>;
}
