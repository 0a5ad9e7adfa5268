pub mod api;
pub mod core;
pub mod scraping;
pub mod store;
pub mod verify;

// --- Primary core exports ---
pub use self::core::types;
pub use self::core::types::*;
pub use self::core::AppState;
pub use self::core::VerifyError;

pub use api::router;
pub use verify::BadgePolicy;
