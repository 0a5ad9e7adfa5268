pub mod badge_snippet;
pub mod common;
pub mod health;
pub mod verify_badge;
