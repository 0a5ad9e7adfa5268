use super::{SubmissionRecord, SubmissionStore};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local submissions. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySubmissionStore {
    records: RwLock<HashMap<String, SubmissionRecord>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submissions(records: impl IntoIterator<Item = SubmissionRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect::<HashMap<_, _>>();
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn insert(&self, record: SubmissionRecord) {
        self.records.write().await.insert(record.id.clone(), record);
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn mark_verified(&self, submission_id: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(submission_id) {
            Some(record) => {
                record.mark_verified(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, submission_id: &str) -> Result<Option<SubmissionRecord>> {
        Ok(self.records.read().await.get(submission_id).cloned())
    }
}
