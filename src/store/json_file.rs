use super::{SubmissionRecord, SubmissionStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SubmissionsFile {
    #[serde(default)]
    submissions: Vec<SubmissionRecord>,
}

/// Submissions kept in a JSON document:
///
/// ```json
/// { "submissions": [ { "id": "abc-123", "is_verified": false } ] }
/// ```
///
/// The file is re-read on every call so records added by other processes are seen, and
/// rewritten atomically (temp file + rename) on every successful mark.
#[derive(Debug)]
pub struct JsonFileSubmissionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSubmissionStore {
    /// Open the store at `path`, creating an empty document if none exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        if tokio::fs::metadata(&store.path).await.is_err() {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            store.write(&SubmissionsFile::default()).await?;
            info!("Created empty submissions file at {}", store.path.display());
        } else {
            // Fail fast on a corrupt file instead of on the first verification.
            let file = store.read().await?;
            info!(
                "Loaded {} submission(s) from {}",
                file.submissions.len(),
                store.path.display()
            );
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add or replace a record.
    pub async fn upsert(&self, record: SubmissionRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read().await?;
        match file.submissions.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => file.submissions.push(record),
        }
        self.write(&file).await
    }

    async fn read(&self) -> Result<SubmissionsFile> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(SubmissionsFile::default());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", self.path.display()))
    }

    async fn write(&self, file: &SubmissionsFile) -> Result<()> {
        let json = serde_json::to_vec_pretty(file)?;
        let tmp = self
            .path
            .with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for JsonFileSubmissionStore {
    async fn mark_verified(&self, submission_id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read().await?;
        let Some(record) = file.submissions.iter_mut().find(|r| r.id == submission_id) else {
            return Ok(false);
        };
        record.mark_verified(Utc::now());
        self.write(&file).await?;
        Ok(true)
    }

    async fn get(&self, submission_id: &str) -> Result<Option<SubmissionRecord>> {
        let file = self.read().await?;
        Ok(file.submissions.into_iter().find(|r| r.id == submission_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("toolcategory-verify-{}", uuid::Uuid::new_v4()))
            .join("submissions.json")
    }

    #[tokio::test]
    async fn creates_missing_file_and_round_trips_records() {
        let path = temp_path();
        let store = JsonFileSubmissionStore::open(&path).await.unwrap();
        assert!(path.exists());

        store.upsert(SubmissionRecord::new("abc-123")).await.unwrap();
        assert!(store.mark_verified("abc-123").await.unwrap());
        assert!(!store.mark_verified("nope").await.unwrap());

        // A second handle sees the persisted flag.
        let reopened = JsonFileSubmissionStore::open(&path).await.unwrap();
        let record = reopened.get("abc-123").await.unwrap().unwrap();
        assert!(record.is_verified);
        assert!(record.verified_at.is_some());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn reads_externally_written_records() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{"submissions":[{"id":"ext-1","name":"Acme","website":"https://acme.example"}]}"#,
        )
        .unwrap();

        let store = JsonFileSubmissionStore::open(&path).await.unwrap();
        let record = store.get("ext-1").await.unwrap().unwrap();
        assert_eq!(record.name.as_deref(), Some("Acme"));
        assert!(!record.is_verified);
        assert!(store.mark_verified("ext-1").await.unwrap());
        assert!(store.get("ext-1").await.unwrap().unwrap().is_verified);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn corrupt_file_fails_on_open() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(JsonFileSubmissionStore::open(&path).await.is_err());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
