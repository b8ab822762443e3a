use reqwest::StatusCode;

use crate::client::{ApiClient, ApiError, ApiRequest};
use crate::models::{DailyInsight, GenerateInsightRequest};

impl ApiClient {
    /// The stored insight for `date`, or `None` when none has been generated yet.
    pub async fn daily_insight(&self, date: &str) -> Result<Option<DailyInsight>, ApiError> {
        match self
            .send::<DailyInsight>(ApiRequest::get("/insight/daily").query("date", date))
            .await
        {
            Ok(insight) => Ok(Some(insight)),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn generate_insight(&self, date: &str) -> Result<DailyInsight, ApiError> {
        let request = ApiRequest::post("/insight/generate").json(&GenerateInsightRequest {
            date: date.to_string(),
        })?;
        self.send(request).await
    }
}
