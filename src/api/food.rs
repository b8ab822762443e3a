use crate::client::{ApiClient, ApiError, ApiRequest};
use crate::models::{FoodItem, FoodLog, FoodParseRequest, NewFoodLog};

impl ApiClient {
    /// Food logs for one day (`YYYY-MM-DD`).
    pub async fn food_logs(&self, date: &str) -> Result<Vec<FoodLog>, ApiError> {
        self.send(ApiRequest::get("/food/logs").query("date", date))
            .await
    }

    /// Asks the backend to estimate food items from free text.
    pub async fn parse_food(&self, request: &FoodParseRequest) -> Result<Vec<FoodItem>, ApiError> {
        self.send(ApiRequest::post("/food/parse").json(request)?)
            .await
    }

    pub async fn add_food_log(&self, log: &NewFoodLog) -> Result<FoodLog, ApiError> {
        self.send(ApiRequest::post("/food/logs").json(log)?).await
    }

    pub async fn delete_food_log(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete(format!("/food/logs/{}", id)))
            .await
    }
}
