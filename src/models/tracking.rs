//! Food, body-weight and workout log payloads.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Free text the backend turns into food items.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoodParseRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub name: String,
    pub calories_min: f64,
    pub calories_max: f64,
    pub portion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoodLog {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub food_items: Vec<FoodItem>,
    pub total_calories: f64,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewFoodLog {
    pub date: String,
    pub food_items: Vec<FoodItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyLog {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewBodyLog {
    pub date: String,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub workout_type: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewWorkoutLog {
    pub date: String,
    pub workout_type: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Inclusive date window used by the body and workout listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub(crate) fn query(&self) -> [(&'static str, String); 2] {
        [("date_from", self.from.clone()), ("date_to", self.to.clone())]
    }
}
