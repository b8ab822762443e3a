use crate::client::{ApiClient, ApiError, ApiRequest};
use crate::models::{IngredientAnalysisRequest, IngredientAnalysisResult, IngredientCheck};

impl ApiClient {
    pub async fn analyze_ingredients(
        &self,
        request: &IngredientAnalysisRequest,
    ) -> Result<IngredientAnalysisResult, ApiError> {
        self.send(ApiRequest::post("/ingredient/analyze").json(request)?)
            .await
    }

    /// Past analyses, newest first as the backend returns them.
    pub async fn ingredient_history(&self) -> Result<Vec<IngredientCheck>, ApiError> {
        self.send(ApiRequest::get("/ingredient/checks")).await
    }
}
