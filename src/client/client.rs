use std::sync::Arc;
use std::time::Instant;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiError, ApiRequest, Navigator, RefreshError, Refresher, RequestAttempt};
use crate::config::{ConfigV1, GuardConfig};
use crate::metrics::{Metrics, MetricsRecorder};
use crate::session::SessionStore;

/// The HTTP client every backend call goes through.
///
/// Cloning is cheap; clones share the session, the navigator and the refresh gate.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    root: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    refresher: Arc<Refresher>,
    metrics: Metrics,
    routes: GuardConfig,
}

impl ApiClient {
    /// Builds a client for `config.api`, redirecting to `config.guard.login_path`
    /// when the session cannot be recovered.
    pub fn new(
        config: &ConfigV1,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        metrics: Metrics,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.api.timeout())
            .build()
            .map_err(ApiError::Client)?;
        let root = config.api.endpoint_root();
        let refresher = Refresher::new(
            http.clone(),
            format!("{}/auth/refresh", root),
            session.clone(),
            metrics.clone(),
        );
        Ok(ApiClient {
            http,
            root,
            session,
            navigator,
            refresher: Arc::new(refresher),
            metrics,
            routes: config.guard.clone(),
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Page paths used for post-login and forced-logout navigation.
    pub fn routes(&self) -> &GuardConfig {
        &self.routes
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    /// Sends `request` with the current access token and, if the backend answers
    /// 401, refreshes once and sends it again.
    ///
    /// Whatever the last send returned comes back unchanged, including a second
    /// 401. If no refresh is possible the session is cleared, the navigator is
    /// sent to the login page and `ApiError::SessionExpired` is returned.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let mut attempt = RequestAttempt::new();
        loop {
            let token = self.session.access_token();
            let response = self.dispatch(request, token.as_deref(), &mut attempt).await?;

            if response.status() != StatusCode::UNAUTHORIZED
                || !request.refresh_on_401
                || !attempt.can_retry()
            {
                return Ok(response);
            }

            debug!(
                request_id = %attempt.id(),
                path = request.path.as_str(),
                "401 received, refreshing session"
            );
            if let Err(e) = self.refresher.refresh(token.as_deref()).await {
                return Err(self.force_logout(e));
            }
        }
    }

    /// Executes `request` and decodes a successful JSON body into `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let url = self.url(&request.path);
        let response = ensure_success(self.execute(&request).await?).await?;
        let body = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }

    /// Executes `request` and discards a successful body.
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        ensure_success(self.execute(&request).await?).await?;
        Ok(())
    }

    /// User-initiated sign out.
    pub fn logout(&self) {
        self.session.clear_auth();
        self.navigator.navigate(&self.routes.login_path);
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
        attempt: &mut RequestAttempt,
    ) -> Result<Response, ApiError> {
        let url = self.url(&request.path);
        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        let send_number = attempt.begin_send();
        let started = Instant::now();
        let result = builder.send().await;
        self.metrics
            .record_request_duration(request.method.as_str(), started.elapsed().as_secs_f64());

        match result {
            Ok(response) => {
                self.metrics.record_request(
                    request.method.as_str(),
                    response.status().as_str(),
                    send_number,
                );
                debug!(
                    request_id = %attempt.id(),
                    method = request.method.as_str(),
                    url = url.as_str(),
                    status = response.status().as_u16(),
                    send = send_number,
                    authenticated = token.is_some(),
                    "API call completed"
                );
                Ok(response)
            }
            Err(source) => {
                let label = if source.is_timeout() { "timeout" } else { "error" };
                self.metrics
                    .record_request(request.method.as_str(), label, send_number);
                Err(ApiError::Transport { url, source })
            }
        }
    }

    fn force_logout(&self, cause: RefreshError) -> ApiError {
        warn!(
            event_name = "session.forced_logout",
            event_domain = "session",
            reason = %cause,
            "session could not be recovered, signing out"
        );
        self.metrics.record_forced_logout();
        self.logout();
        ApiError::SessionExpired(cause)
    }
}

/// Turns a non-2xx response into `ApiError::Status`, keeping the backend's
/// `detail` message when the body carries one.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<Value>(&body).ok())
        .and_then(|value| match value.get("detail") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        });
    Err(ApiError::Status { status, detail })
}
