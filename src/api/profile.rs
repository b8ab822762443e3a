use reqwest::Method;

use crate::client::{ApiClient, ApiError, ApiRequest};
use crate::models::{ProfileData, ProfileRequest, User};

impl ApiClient {
    /// Completes onboarding: creates the profile, refreshes the cached user and
    /// navigates to the dashboard.
    pub async fn create_profile(&self, profile: &ProfileData) -> Result<User, ApiError> {
        self.save_profile(Method::POST, profile).await
    }

    pub async fn update_profile(&self, profile: &ProfileData) -> Result<User, ApiError> {
        self.save_profile(Method::PUT, profile).await
    }

    async fn save_profile(&self, method: Method, profile: &ProfileData) -> Result<User, ApiError> {
        let request = ApiRequest::new(method, "/profile").json(&ProfileRequest::from(profile))?;
        self.send_empty(request).await?;
        let user = self.refresh_user().await?;
        self.navigator().navigate(&self.routes().dashboard_path);
        Ok(user)
    }
}
