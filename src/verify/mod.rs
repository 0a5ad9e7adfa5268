pub mod checks;
pub mod orchestrator;
pub mod snippet;

use crate::core::config::{DEFAULT_BADGE_ALT, DEFAULT_BADGE_SRC, DEFAULT_CANONICAL_ROOT};
use serde::{Deserialize, Serialize};

pub use checks::{check_page, has_backlink, has_badge};
pub use orchestrator::{check_url, verify_submission, VerificationRequest};
pub use snippet::badge_snippet;

/// What a maker's page must contain to be verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgePolicy {
    /// Substring every qualifying `<a href>` must contain.
    pub canonical_root: String,
    /// Exact `src` of the badge `<img>`.
    pub badge_src: String,
    /// Exact `alt` of the badge `<img>`.
    pub badge_alt: String,
}

impl Default for BadgePolicy {
    fn default() -> Self {
        Self {
            canonical_root: DEFAULT_CANONICAL_ROOT.to_string(),
            badge_src: DEFAULT_BADGE_SRC.to_string(),
            badge_alt: DEFAULT_BADGE_ALT.to_string(),
        }
    }
}

impl BadgePolicy {
    pub fn backlink_message(&self) -> String {
        format!("Add a link pointing to {}.", self.canonical_root)
    }

    pub fn badge_message(&self) -> String {
        format!(
            "Include the ToolCategory badge image with alt text \"{}\".",
            self.badge_alt
        )
    }
}
