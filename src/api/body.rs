//! Body-weight and workout logs. Both listings take an inclusive date window.

use crate::client::{ApiClient, ApiError, ApiRequest};
use crate::models::{BodyLog, DateRange, NewBodyLog, NewWorkoutLog, WorkoutLog};

impl ApiClient {
    pub async fn body_logs(&self, range: &DateRange) -> Result<Vec<BodyLog>, ApiError> {
        self.send(ranged(ApiRequest::get("/body/logs"), range)).await
    }

    pub async fn add_body_log(&self, log: &NewBodyLog) -> Result<BodyLog, ApiError> {
        self.send(ApiRequest::post("/body/logs").json(log)?).await
    }

    pub async fn workout_logs(&self, range: &DateRange) -> Result<Vec<WorkoutLog>, ApiError> {
        self.send(ranged(ApiRequest::get("/workout/logs"), range))
            .await
    }

    pub async fn add_workout_log(&self, log: &NewWorkoutLog) -> Result<WorkoutLog, ApiError> {
        self.send(ApiRequest::post("/workout/logs").json(log)?)
            .await
    }
}

fn ranged(request: ApiRequest, range: &DateRange) -> ApiRequest {
    range
        .query()
        .into_iter()
        .fold(request, |request, (key, value)| request.query(key, value))
}
