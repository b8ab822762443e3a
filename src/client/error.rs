use reqwest::StatusCode;

/// Why a token refresh did not produce new credentials.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("no refresh token in session")]
    MissingRefreshToken,
    #[error("refresh token rejected with status {0}")]
    Rejected(StatusCode),
    #[error("refresh call failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("refresh response was not a token pair: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RefreshError {
    /// Label used for the refresh outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            RefreshError::MissingRefreshToken => "missing",
            RefreshError::Rejected(_) => "rejected",
            RefreshError::Transport(_) | RefreshError::Decode(_) => "error",
        }
    }
}

/// Errors surfaced by the request pipeline to its callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{status}: {}", describe(.detail))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("session expired, signed out: {0}")]
    SessionExpired(#[source] RefreshError),
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

fn describe(detail: &Option<String>) -> &str {
    detail.as_deref().unwrap_or("request failed")
}

impl ApiError {
    /// The HTTP status the backend answered with, if the call got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's `detail` message, suitable for showing to the user.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            ApiError::Transport { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_uses_detail() {
        let err = ApiError::Status {
            status: StatusCode::CONFLICT,
            detail: Some("Email already registered".into()),
        };
        assert_eq!(err.to_string(), "409 Conflict: Email already registered");
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(err.detail(), Some("Email already registered"));
    }

    #[test]
    fn test_status_error_display_without_detail() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };
        assert_eq!(err.to_string(), "500 Internal Server Error: request failed");
    }

    #[test]
    fn test_refresh_outcome_labels() {
        assert_eq!(RefreshError::MissingRefreshToken.outcome(), "missing");
        assert_eq!(RefreshError::Rejected(StatusCode::UNAUTHORIZED).outcome(), "rejected");
        let err = ApiError::SessionExpired(RefreshError::MissingRefreshToken);
        assert!(err.is_session_expired());
        assert_eq!(err.status(), None);
    }
}
