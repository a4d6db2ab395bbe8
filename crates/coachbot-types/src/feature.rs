//! Coaching features and feature requests.
//!
//! The ten coaching plans are a closed enum so template dispatch is an
//! exhaustive match. Free-text questions travel through [`FeatureId::Custom`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoachError;
use crate::profile::Profile;

/// Shown alongside every generated plan.
pub const SAFETY_NOTE: &str = "⚠️ Consult professionals for serious training/injuries";

/// One of the ten fixed coaching-plan categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Workout,
    Recovery,
    Tactical,
    Nutrition,
    Warmup,
    Mental,
    Stamina,
    Hydration,
    Mobility,
    Matchday,
}

impl Feature {
    /// All features in the order they appear on the trigger grid.
    pub const ALL: [Feature; 10] = [
        Feature::Workout,
        Feature::Recovery,
        Feature::Tactical,
        Feature::Nutrition,
        Feature::Warmup,
        Feature::Mental,
        Feature::Stamina,
        Feature::Hydration,
        Feature::Mobility,
        Feature::Matchday,
    ];

    /// Stable identifier used in requests, history and download file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Workout => "workout",
            Feature::Recovery => "recovery",
            Feature::Tactical => "tactical",
            Feature::Nutrition => "nutrition",
            Feature::Warmup => "warmup",
            Feature::Mental => "mental",
            Feature::Stamina => "stamina",
            Feature::Hydration => "hydration",
            Feature::Mobility => "mobility",
            Feature::Matchday => "matchday",
        }
    }

    /// Button label shown on the trigger grid.
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Workout => "Workout Plan",
            Feature::Recovery => "Recovery",
            Feature::Tactical => "Tactical",
            Feature::Nutrition => "Nutrition",
            Feature::Warmup => "Warmup",
            Feature::Mental => "Mental",
            Feature::Stamina => "Stamina",
            Feature::Hydration => "Hydration",
            Feature::Mobility => "Mobility",
            Feature::Matchday => "Match Day",
        }
    }

    /// Emoji shown next to the label.
    pub fn icon(&self) -> &'static str {
        match self {
            Feature::Workout => "💪",
            Feature::Recovery => "❤️",
            Feature::Tactical => "🎯",
            Feature::Nutrition => "🍎",
            Feature::Warmup => "⚡",
            Feature::Mental => "🧠",
            Feature::Stamina => "📈",
            Feature::Hydration => "💧",
            Feature::Mobility => "🤸",
            Feature::Matchday => "🏆",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "workout" => Ok(Feature::Workout),
            "recovery" => Ok(Feature::Recovery),
            "tactical" => Ok(Feature::Tactical),
            "nutrition" => Ok(Feature::Nutrition),
            "warmup" => Ok(Feature::Warmup),
            "mental" => Ok(Feature::Mental),
            "stamina" => Ok(Feature::Stamina),
            "hydration" => Ok(Feature::Hydration),
            "mobility" => Ok(Feature::Mobility),
            "matchday" => Ok(Feature::Matchday),
            _ => Err(CoachError::UnknownFeature(s.trim().to_string())),
        }
    }
}

/// Identifier carried by a [`FeatureRequest`]: a fixed plan or a custom query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FeatureId {
    Plan(Feature),
    Custom,
}

impl FeatureId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureId::Plan(feature) => feature.as_str(),
            FeatureId::Custom => "custom",
        }
    }

    /// Human-readable name used in history listings.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureId::Plan(feature) => feature.label(),
            FeatureId::Custom => "Custom Question",
        }
    }

    /// File name of the plain-text download artifact for this feature.
    pub fn download_filename(&self) -> String {
        format!("coachbot_{}.txt", self.as_str())
    }
}

impl From<Feature> for FeatureId {
    fn from(feature: Feature) -> Self {
        FeatureId::Plan(feature)
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureId {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("custom") {
            return Ok(FeatureId::Custom);
        }
        s.parse::<Feature>().map(FeatureId::Plan)
    }
}

impl TryFrom<String> for FeatureId {
    type Error = CoachError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FeatureId> for String {
    fn from(id: FeatureId) -> Self {
        id.as_str().to_string()
    }
}

/// A single invocation from the feature grid or the custom query box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRequest {
    pub feature: FeatureId,
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_question: Option<String>,
}

impl FeatureRequest {
    /// Request one of the fixed coaching plans.
    pub fn plan(feature: Feature, profile: Profile) -> Self {
        Self {
            feature: FeatureId::Plan(feature),
            profile,
            custom_question: None,
        }
    }

    /// Request an answer to a free-text question.
    pub fn custom(profile: Profile, question: impl Into<String>) -> Self {
        Self {
            feature: FeatureId::Custom,
            profile,
            custom_question: Some(question.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_roundtrip() {
        for feature in Feature::ALL {
            let parsed: Feature = feature.to_string().parse().unwrap();
            assert_eq!(feature, parsed);
        }
    }

    #[test]
    fn test_unknown_feature_rejected() {
        for bad in ["sleep", "", "work out", "customs"] {
            match bad.parse::<FeatureId>() {
                Err(CoachError::UnknownFeature(id)) => assert_eq!(id, bad.trim()),
                other => panic!("expected UnknownFeature for '{bad}', got {other:?}"),
            }
        }
    }

    #[test]
    fn test_custom_feature_id() {
        assert_eq!("custom".parse::<FeatureId>().unwrap(), FeatureId::Custom);
        assert_eq!("Custom".parse::<FeatureId>().unwrap(), FeatureId::Custom);
        assert!("custom".parse::<Feature>().is_err());
    }

    #[test]
    fn test_feature_id_serde_is_plain_string() {
        let id = FeatureId::Plan(Feature::Matchday);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"matchday\"");

        let parsed: FeatureId = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(parsed, FeatureId::Custom);

        let err = serde_json::from_str::<FeatureId>("\"yoga\"").unwrap_err();
        assert!(err.to_string().contains("yoga"));
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(
            FeatureId::Plan(Feature::Workout).download_filename(),
            "coachbot_workout.txt"
        );
        assert_eq!(FeatureId::Custom.download_filename(), "coachbot_custom.txt");
    }

    #[test]
    fn test_feature_request_deserialize() {
        let json = r#"{
            "feature": "nutrition",
            "profile": {"sport": "cricket", "position": "Bowler", "age": 17, "diet_type": "vegan"}
        }"#;
        let request: FeatureRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.feature, FeatureId::Plan(Feature::Nutrition));
        assert!(request.custom_question.is_none());
    }
}
