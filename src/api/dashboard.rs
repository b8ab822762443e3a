use crate::client::{ApiClient, ApiError, ApiRequest};
use crate::models::DashboardData;

/// Window used when the caller does not pick one.
pub const DEFAULT_DASHBOARD_DAYS: u32 = 7;

impl ApiClient {
    /// Trends and completion rates over the last `days` days.
    pub async fn dashboard(&self, days: Option<u32>) -> Result<DashboardData, ApiError> {
        let days = days.unwrap_or(DEFAULT_DASHBOARD_DAYS);
        self.send(ApiRequest::get("/dashboard").query("days", days))
            .await
    }
}
