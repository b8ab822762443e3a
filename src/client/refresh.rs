use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::RefreshError;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::{RefreshRequest, TokenPair};
use crate::session::SessionStore;

/// What a caller's refresh request amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// This caller exchanged the refresh token itself.
    Refreshed,
    /// Another caller refreshed while this one waited; the new token is already stored.
    Joined,
}

/// Exchanges the refresh token for new credentials, one exchange at a time.
///
/// Callers that hit a 401 while an exchange is in flight wait for it and then
/// reuse its result instead of starting their own.
pub struct Refresher {
    http: reqwest::Client,
    url: String,
    session: Arc<SessionStore>,
    in_flight: Mutex<()>,
    metrics: Metrics,
}

impl Refresher {
    pub fn new(
        http: reqwest::Client,
        url: impl Into<String>,
        session: Arc<SessionStore>,
        metrics: Metrics,
    ) -> Self {
        Refresher {
            http,
            url: url.into(),
            session,
            in_flight: Mutex::new(()),
            metrics,
        }
    }

    /// Refreshes unless the session already moved past `stale_token`, the access
    /// token the failed request was sent with.
    ///
    /// On success the new pair is in the session store. On error the session is
    /// left as it was; clearing it is the pipeline's call.
    pub async fn refresh(&self, stale_token: Option<&str>) -> Result<RefreshOutcome, RefreshError> {
        let _flight = self.in_flight.lock().await;

        if let Some(current) = self.session.access_token() {
            if stale_token != Some(current.as_str()) {
                debug!("Access token changed while waiting, reusing it.");
                self.metrics.record_refresh("joined");
                return Ok(RefreshOutcome::Joined);
            }
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            self.metrics.record_refresh(RefreshError::MissingRefreshToken.outcome());
            return Err(RefreshError::MissingRefreshToken);
        };

        match self.exchange(refresh_token).await {
            Ok(pair) => {
                self.session.set_tokens(&pair.access_token, &pair.refresh_token);
                self.metrics.record_refresh("success");
                info!(
                    event_name = "session.refreshed",
                    event_domain = "session",
                    "access token refreshed"
                );
                Ok(RefreshOutcome::Refreshed)
            }
            Err(e) => {
                self.metrics.record_refresh(e.outcome());
                warn!(
                    event_name = "session.refresh_failed",
                    event_domain = "session",
                    error = %e,
                    "token refresh failed"
                );
                Err(e)
            }
        }
    }

    /// The refresh call carries only the refresh token, never a bearer header.
    async fn exchange(&self, refresh_token: String) -> Result<TokenPair, RefreshError> {
        let response = self
            .http
            .post(&self.url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(RefreshError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::Rejected(status));
        }
        let body = response.bytes().await.map_err(RefreshError::Transport)?;
        serde_json::from_slice(&body).map_err(RefreshError::Decode)
    }
}
