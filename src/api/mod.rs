//! Typed wrappers over [`ApiClient`](crate::client::ApiClient), one module per
//! backend resource. All of them go through the authenticated pipeline.

pub mod auth;
pub mod body;
pub mod chat;
pub mod dashboard;
pub mod food;
pub mod ingredient;
pub mod insight;
pub mod profile;

pub use chat::{ChatConversation, ChatVisibility};
pub use dashboard::DEFAULT_DASHBOARD_DAYS;
