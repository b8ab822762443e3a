//! Sign-in, registration and the current-user lookup.

use tracing::info;

use crate::client::{ApiClient, ApiError, ApiRequest};
use crate::models::{LoginRequest, RegisterRequest, TokenPair, User};

impl ApiClient {
    /// Signs in, stores the issued tokens, caches the user and navigates to
    /// the dashboard (or to onboarding when the user has no profile yet).
    ///
    /// Returns the page navigated to. If the user lookup fails the tokens stay
    /// stored, the session is left pending and the lookup error is returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = ApiRequest::post("/auth/login")
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })?
            .without_refresh();
        let pair: TokenPair = self.send(request).await?;
        self.session().set_tokens(&pair.access_token, &pair.refresh_token);

        let user = self.refresh_user().await?;
        let destination = if user.has_profile() {
            self.routes().dashboard_path.clone()
        } else {
            self.routes().onboarding_path.clone()
        };
        info!(
            event_name = "session.login",
            event_domain = "session",
            user_id = user.id.as_str(),
            destination = destination.as_str(),
            "signed in"
        );
        self.navigator().navigate(&destination);
        Ok(destination)
    }

    /// Creates an account and signs in with the returned tokens. A new account
    /// never has a profile, so this always lands on onboarding.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<String, ApiError> {
        let request = ApiRequest::post("/auth/register")
            .json(&RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                name: name.to_string(),
            })?
            .without_refresh();
        let pair: TokenPair = self.send(request).await?;
        self.session().set_tokens(&pair.access_token, &pair.refresh_token);

        let user = self.refresh_user().await?;
        info!(
            event_name = "session.registered",
            event_domain = "session",
            user_id = user.id.as_str(),
            "account created"
        );
        let destination = self.routes().onboarding_path.clone();
        self.navigator().navigate(&destination);
        Ok(destination)
    }

    /// `GET /auth/me` without touching the cached user.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.send(ApiRequest::get("/auth/me")).await
    }

    /// Fetches the current user and caches it in the session.
    pub async fn refresh_user(&self) -> Result<User, ApiError> {
        let user = self.me().await?;
        self.session().set_user(user.clone());
        Ok(user)
    }
}
