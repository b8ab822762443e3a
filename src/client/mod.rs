//! The authenticated request pipeline.
//!
//! Every backend call goes through [`ApiClient::execute`], which attaches the
//! session's bearer token and recovers from one expired access token per request
//! by way of the single-flight [`Refresher`].

pub mod client;
pub mod error;
pub mod navigator;
pub mod refresh;
pub mod request;

pub use client::ApiClient;
pub use error::{ApiError, RefreshError};
pub use navigator::{LogNavigator, Navigator, RecordingNavigator};
pub use refresh::{RefreshOutcome, Refresher};
pub use request::{ApiRequest, MAX_SENDS, RequestAttempt};
