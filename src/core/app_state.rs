use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use super::config::VerifyConfig;
use crate::scraping::PageFetcher;
use crate::store::{JsonFileSubmissionStore, MemorySubmissionStore, SubmissionStore};
use crate::verify::BadgePolicy;

#[derive(Clone)]
pub struct AppState {
    /// File-based config loaded from `toolcategory-verify.json` (env-var fallback for all fields).
    pub config: Arc<VerifyConfig>,
    /// Badge/backlink constants, read-only for the process lifetime.
    pub policy: Arc<BadgePolicy>,
    pub fetcher: Arc<PageFetcher>,
    pub store: Arc<dyn SubmissionStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("policy", &self.policy)
            .field("fetch", self.fetcher.settings())
            .finish()
    }
}

impl AppState {
    /// State with an in-memory store. Swap it with [`AppState::with_store`].
    pub fn new(config: VerifyConfig) -> anyhow::Result<Self> {
        let fetcher = PageFetcher::new(config.fetch_settings()).context("building HTTP client")?;
        Ok(Self {
            policy: Arc::new(config.badge_policy()),
            fetcher: Arc::new(fetcher),
            store: Arc::new(MemorySubmissionStore::new()),
            config: Arc::new(config),
        })
    }

    /// Build state from config, opening the JSON store when `store_path` resolves.
    pub async fn from_config(config: VerifyConfig) -> anyhow::Result<Self> {
        let store_path = config.resolve_store_path();
        let state = Self::new(config)?;
        match store_path {
            Some(path) => {
                let store = JsonFileSubmissionStore::open(&path)
                    .await
                    .with_context(|| format!("opening submissions file {}", path.display()))?;
                info!("Using submissions file at {}", store.path().display());
                Ok(state.with_store(Arc::new(store)))
            }
            None => {
                info!("SUBMISSIONS_PATH not set. Using in-memory submission store.");
                Ok(state)
            }
        }
    }

    pub fn with_store(mut self, store: Arc<dyn SubmissionStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_policy(mut self, policy: BadgePolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }
}
