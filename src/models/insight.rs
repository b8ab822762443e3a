//! Ingredient analysis, daily insight, chat and dashboard payloads.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IngredientAnalysisRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_goal: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IngredientVerdict {
    pub category: String,
    pub reason: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IngredientAnalysisResult {
    pub verdict: IngredientVerdict,
    pub details: String,
}

/// A past analysis from `GET /ingredient/checks`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IngredientCheck {
    pub id: String,
    pub user_id: String,
    pub raw_input: String,
    pub result_json: IngredientAnalysisResult,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyInsight {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub gap_analysis: String,
    #[serde(default)]
    pub attribution: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cautions: Option<Vec<String>>,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerateInsightRequest {
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Where the user was when they asked, so the assistant can ground its answer.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeightPoint {
    pub date: String,
    pub weight: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionRate {
    pub calories: f64,
    pub workouts: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DashboardData {
    #[serde(default)]
    pub weight_trends: Vec<WeightPoint>,
    pub completion_rate: CompletionRate,
    #[serde(default)]
    pub weekly_insights: Vec<String>,
}
