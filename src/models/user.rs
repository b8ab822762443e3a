use serde::{Deserialize, Serialize};

/// The signed-in user as returned by `GET /auth/me`.
///
/// `profile` is only present once onboarding has been completed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileData>,
    pub created_at: String,
}

impl User {
    pub fn has_profile(&self) -> bool {
        self.profile.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Cut,
    Bulk,
    Gain,
    #[default]
    Maintain,
}

/// Onboarding answers, in the shape the client collects them.
///
/// The same shape comes back embedded in `/auth/me`, where age and gender may
/// be null and gender is free text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    #[serde(default, deserialize_with = "goal_or_default")]
    pub goal: GoalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<u32>,
}

fn goal_or_default<'de, D>(deserializer: D) -> Result<GoalType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<GoalType>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /profile` and `PUT /profile`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileRequest {
    pub goal_type: GoalType,
    pub height_cm: f64,
    pub start_weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    pub activity_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

pub const DEFAULT_ACTIVITY_LEVEL: &str = "moderate";

impl From<&ProfileData> for ProfileRequest {
    /// The onboarding form does not ask for a target weight or activity level,
    /// so the current weight and "moderate" stand in for them.
    fn from(profile: &ProfileData) -> Self {
        ProfileRequest {
            goal_type: profile.goal,
            height_cm: profile.height,
            start_weight_kg: profile.weight,
            target_weight_kg: Some(profile.weight),
            activity_level: DEFAULT_ACTIVITY_LEVEL.to_string(),
            age: profile.age,
            gender: profile.gender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_profile() -> ProfileData {
        ProfileData {
            name: "Ana".into(),
            age: Some(31),
            gender: Some("female".into()),
            height: 168.0,
            weight: 62.5,
            goal: GoalType::Cut,
            target_calories: None,
        }
    }

    #[test]
    fn test_user_without_profile() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@example.com",
            "name": "",
            "created_at": "2024-05-01T10:00:00"
        }))
        .unwrap();
        assert!(!user.has_profile());
    }

    #[test]
    fn test_user_with_null_profile() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@example.com",
            "profile": null,
            "created_at": "2024-05-01T10:00:00"
        }))
        .unwrap();
        assert!(!user.has_profile());
        assert_eq!(user.name, "");
    }

    #[test]
    fn test_profile_request_from_profile_data() {
        let request = ProfileRequest::from(&sample_profile());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["goal_type"], "cut");
        assert_eq!(value["height_cm"], 168.0);
        assert_eq!(value["start_weight_kg"], 62.5);
        assert_eq!(value["target_weight_kg"], 62.5);
        assert_eq!(value["activity_level"], "moderate");
        assert_eq!(value["gender"], "female");
    }

    #[test]
    fn test_profile_with_null_fields_from_me() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@example.com",
            "name": "Ana",
            "profile": {
                "name": "",
                "age": null,
                "gender": null,
                "height": 170.0,
                "weight": 70.0,
                "goal": null
            },
            "created_at": "2024-05-01T10:00:00"
        }))
        .unwrap();
        let profile = user.profile.expect("profile present");
        assert_eq!(profile.age, None);
        assert_eq!(profile.gender, None);
        assert_eq!(profile.goal, GoalType::Maintain);
    }

    #[test]
    fn test_profile_keeps_free_text_gender() {
        let profile: ProfileData = serde_json::from_value(json!({
            "name": "Sam",
            "gender": "nonbinary",
            "height": 175.0,
            "weight": 72.0
        }))
        .unwrap();
        assert_eq!(profile.gender.as_deref(), Some("nonbinary"));
        assert_eq!(profile.goal, GoalType::Maintain);
        let request = ProfileRequest::from(&profile);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["gender"], "nonbinary");
        assert!(value.get("age").is_none());
    }
}
