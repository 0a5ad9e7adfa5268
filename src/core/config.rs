use std::path::PathBuf;
use std::time::Duration;

use crate::verify::BadgePolicy;

// ---------------------------------------------------------------------------
// VerifyConfig: file-based config loader (toolcategory-verify.json) with env-var fallback
// ---------------------------------------------------------------------------

pub const ENV_CONFIG_PATH: &str = "TOOLCATEGORY_VERIFY_CONFIG";
pub const ENV_CANONICAL_ROOT: &str = "TOOLCATEGORY_CANONICAL_ROOT";
pub const ENV_BADGE_SRC: &str = "TOOLCATEGORY_BADGE_SRC";
pub const ENV_BADGE_ALT: &str = "TOOLCATEGORY_BADGE_ALT";
pub const ENV_MAX_BODY_BYTES: &str = "VERIFY_MAX_BODY_BYTES";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "VERIFY_FETCH_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "VERIFY_USER_AGENT";
pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_SUBMISSIONS_PATH: &str = "SUBMISSIONS_PATH";

pub const DEFAULT_CANONICAL_ROOT: &str = "https://toolcategory.com/";
pub const DEFAULT_BADGE_SRC: &str = "https://toolcategory.com/badge-light.svg";
pub const DEFAULT_BADGE_ALT: &str = "Featured on ToolCategory.com";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_000_000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 25;

/// Top-level config loaded from `toolcategory-verify.json`.
///
/// Every field is optional; the `resolve_*` accessors fall back to an env var and then
/// to the built-in default.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct VerifyConfig {
    /// Root URL a backlink must contain. Default: `https://toolcategory.com/`.
    pub canonical_root: Option<String>,
    /// Exact `src` the badge `<img>` must carry.
    pub badge_src: Option<String>,
    /// Exact `alt` text the badge `<img>` must carry.
    pub badge_alt: Option<String>,
    /// Upper bound on bytes read from the maker's page. Default: 1,000,000.
    pub max_body_bytes: Option<usize>,
    /// Whole-request timeout for the outbound fetch. Default: 25.
    pub fetch_timeout_secs: Option<u64>,
    /// User agent sent with the outbound fetch.
    pub user_agent: Option<String>,
    /// `production` suppresses upstream error detail in logs.
    pub environment: Option<String>,
    /// JSON file holding submission records. Unset → in-memory store.
    pub store_path: Option<String>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl VerifyConfig {
    /// Canonical root: JSON field → `TOOLCATEGORY_CANONICAL_ROOT` → `https://toolcategory.com/`.
    pub fn resolve_canonical_root(&self) -> String {
        non_empty(&self.canonical_root)
            .or_else(|| env_string(ENV_CANONICAL_ROOT))
            .unwrap_or_else(|| DEFAULT_CANONICAL_ROOT.to_string())
    }

    /// Badge asset URL: JSON field → `TOOLCATEGORY_BADGE_SRC` → `.../badge-light.svg`.
    pub fn resolve_badge_src(&self) -> String {
        non_empty(&self.badge_src)
            .or_else(|| env_string(ENV_BADGE_SRC))
            .unwrap_or_else(|| DEFAULT_BADGE_SRC.to_string())
    }

    /// Badge alt text: JSON field → `TOOLCATEGORY_BADGE_ALT` → `Featured on ToolCategory.com`.
    pub fn resolve_badge_alt(&self) -> String {
        non_empty(&self.badge_alt)
            .or_else(|| env_string(ENV_BADGE_ALT))
            .unwrap_or_else(|| DEFAULT_BADGE_ALT.to_string())
    }

    /// Max body bytes: JSON field → `VERIFY_MAX_BODY_BYTES` → 1,000,000. Zero is ignored.
    pub fn resolve_max_body_bytes(&self) -> usize {
        self.max_body_bytes
            .or_else(|| env_string(ENV_MAX_BODY_BYTES).and_then(|v| v.parse().ok()))
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    /// Fetch timeout: JSON field → `VERIFY_FETCH_TIMEOUT_SECS` → 25s.
    pub fn resolve_fetch_timeout(&self) -> Duration {
        let secs = self
            .fetch_timeout_secs
            .or_else(|| env_string(ENV_FETCH_TIMEOUT_SECS).and_then(|v| v.parse().ok()))
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// User agent: JSON field → `VERIFY_USER_AGENT` → `ToolCategoryBadgeVerifier/<version>`.
    pub fn resolve_user_agent(&self) -> String {
        non_empty(&self.user_agent)
            .or_else(|| env_string(ENV_USER_AGENT))
            .unwrap_or_else(default_user_agent)
    }

    /// Deployment environment: JSON field → `APP_ENV` → `development`.
    pub fn resolve_environment(&self) -> String {
        non_empty(&self.environment)
            .or_else(|| env_string(ENV_APP_ENV))
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
    }

    pub fn is_production(&self) -> bool {
        matches!(self.resolve_environment().as_str(), "production" | "prod")
    }

    /// Submission store path: JSON field → `SUBMISSIONS_PATH` → `None` (memory store).
    pub fn resolve_store_path(&self) -> Option<PathBuf> {
        non_empty(&self.store_path)
            .or_else(|| env_string(ENV_SUBMISSIONS_PATH))
            .map(PathBuf::from)
    }

    pub fn badge_policy(&self) -> BadgePolicy {
        BadgePolicy {
            canonical_root: self.resolve_canonical_root(),
            badge_src: self.resolve_badge_src(),
            badge_alt: self.resolve_badge_alt(),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self.resolve_user_agent(),
            timeout: self.resolve_fetch_timeout(),
            max_body_bytes: self.resolve_max_body_bytes(),
            log_upstream_detail: !self.is_production(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!(
        "ToolCategoryBadgeVerifier/{} (+https://toolcategory.com/)",
        env!("CARGO_PKG_VERSION")
    )
}

/// Resolved knobs for the outbound page fetch.
#[derive(Clone, Debug)]
pub struct FetchSettings {
    pub user_agent: String,
    pub timeout: Duration,
    pub max_body_bytes: usize,
    /// When `false`, upstream failures are logged without status/error detail.
    pub log_upstream_detail: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_upstream_detail: true,
        }
    }
}

/// Load `toolcategory-verify.json` from standard locations.
///
/// Search order (first found wins):
/// 1. `TOOLCATEGORY_VERIFY_CONFIG` env var path
/// 2. `./toolcategory-verify.json`
/// 3. `../toolcategory-verify.json`
///
/// Missing file → `VerifyConfig::default()` (silent, all env-var fallbacks apply).
/// Parse error → log a warning, return `VerifyConfig::default()`.
pub fn load_verify_config() -> VerifyConfig {
    let mut candidates = vec![
        PathBuf::from("toolcategory-verify.json"),
        PathBuf::from("../toolcategory-verify.json"),
    ];
    if let Some(env_path) = env_string(ENV_CONFIG_PATH) {
        candidates.insert(0, PathBuf::from(env_path));
    }

    for path in &candidates {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };
        return match serde_json::from_str::<VerifyConfig>(&contents) {
            Ok(cfg) => {
                tracing::info!("toolcategory-verify.json loaded from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    "toolcategory-verify.json parse error at {}: {}; using defaults",
                    path.display(),
                    e
                );
                VerifyConfig::default()
            }
        };
    }

    VerifyConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_fields_win_over_defaults() {
        let cfg: VerifyConfig = serde_json::from_str(
            r#"{
                "canonical_root": "https://staging.toolcategory.com/",
                "badge_alt": "Featured on Staging",
                "max_body_bytes": 2048,
                "fetch_timeout_secs": 3,
                "environment": "Production"
            }"#,
        )
        .unwrap();

        let policy = cfg.badge_policy();
        assert_eq!(policy.canonical_root, "https://staging.toolcategory.com/");
        assert_eq!(policy.badge_alt, "Featured on Staging");

        let fetch = cfg.fetch_settings();
        assert_eq!(fetch.max_body_bytes, 2048);
        assert_eq!(fetch.timeout, Duration::from_secs(3));
        assert!(!fetch.log_upstream_detail);
        assert!(cfg.is_production());
    }

    #[test]
    fn blank_and_zero_fields_are_ignored() {
        let cfg = VerifyConfig {
            badge_src: Some("   ".to_string()),
            max_body_bytes: Some(0),
            ..Default::default()
        };
        // Env vars are not set in the test environment for these keys.
        if std::env::var(ENV_BADGE_SRC).is_err() {
            assert_eq!(cfg.resolve_badge_src(), DEFAULT_BADGE_SRC);
        }
        assert_eq!(cfg.resolve_max_body_bytes(), DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn user_agent_identifies_the_bot() {
        let ua = default_user_agent();
        assert!(ua.starts_with("ToolCategoryBadgeVerifier/"));
        assert!(ua.contains("toolcategory.com"));
    }
}
