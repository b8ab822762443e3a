use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::ApiError;

/// How many times one logical request may be sent: the first send plus one retry
/// after a refresh.
pub const MAX_SENDS: u8 = 2;

/// One logical backend call, described independently of any attempt to send it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API root, e.g. `/food/logs`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Whether a 401 should trigger the refresh-and-retry cycle. Credential
    /// entry points (login, register) turn this off so a wrong password is
    /// reported as-is instead of signing the user out.
    pub refresh_on_401: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            refresh_on_401: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn without_refresh(mut self) -> Self {
        self.refresh_on_401 = false;
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }
}

/// Tracks the sends of one logical request, so the retry bound lives with the
/// call instead of on a shared request descriptor.
#[derive(Debug)]
pub struct RequestAttempt {
    id: Uuid,
    sent: u8,
}

impl RequestAttempt {
    pub fn new() -> Self {
        RequestAttempt {
            id: Uuid::new_v4(),
            sent: 0,
        }
    }

    /// Correlates log lines for every send of the same logical request.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Counts a send and returns its 1-based number.
    pub fn begin_send(&mut self) -> u8 {
        self.sent = self.sent.saturating_add(1);
        self.sent
    }

    pub fn sends(&self) -> u8 {
        self.sent
    }

    /// Whether another send is allowed after the current one.
    pub fn can_retry(&self) -> bool {
        self.sent < MAX_SENDS
    }
}

impl Default for RequestAttempt {
    fn default() -> Self {
        Self::new()
    }
}
