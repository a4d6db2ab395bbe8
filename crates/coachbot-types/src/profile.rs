//! Athlete profile types.
//!
//! A [`Profile`] is the set of athlete attributes interpolated into every
//! coaching prompt. It is re-read from the form on each request and never
//! mutated once a request is underway.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoachError;

/// Youngest athlete age accepted by the profile form.
pub const MIN_AGE: u8 = 10;

/// Oldest athlete age accepted by the profile form.
pub const MAX_AGE: u8 = 25;

/// Sport practiced by the athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Cricket,
    Basketball,
    Tennis,
    Athletics,
}

impl Sport {
    /// Every sport offered by the profile selector, in display order.
    pub const ALL: [Sport; 5] = [
        Sport::Football,
        Sport::Cricket,
        Sport::Basketball,
        Sport::Tennis,
        Sport::Athletics,
    ];

    /// Stable lowercase key used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Cricket => "cricket",
            Sport::Basketball => "basketball",
            Sport::Tennis => "tennis",
            Sport::Athletics => "athletics",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Football => write!(f, "Football"),
            Sport::Cricket => write!(f, "Cricket"),
            Sport::Basketball => write!(f, "Basketball"),
            Sport::Tennis => write!(f, "Tennis"),
            Sport::Athletics => write!(f, "Athletics"),
        }
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "football" => Ok(Sport::Football),
            "cricket" => Ok(Sport::Cricket),
            "basketball" => Ok(Sport::Basketball),
            "tennis" => Ok(Sport::Tennis),
            "athletics" => Ok(Sport::Athletics),
            other => Err(format!("invalid sport: '{other}'")),
        }
    }
}

/// Dietary pattern followed by the athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    #[default]
    Balanced,
    Vegetarian,
    Vegan,
    NonVegetarian,
    Eggetarian,
}

impl DietType {
    /// Every diet offered by the profile selector, in display order.
    pub const ALL: [DietType; 5] = [
        DietType::Balanced,
        DietType::Vegetarian,
        DietType::Vegan,
        DietType::NonVegetarian,
        DietType::Eggetarian,
    ];

    /// Stable snake_case key used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Balanced => "balanced",
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
            DietType::NonVegetarian => "non_vegetarian",
            DietType::Eggetarian => "eggetarian",
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietType::Balanced => write!(f, "balanced"),
            DietType::Vegetarian => write!(f, "vegetarian"),
            DietType::Vegan => write!(f, "vegan"),
            DietType::NonVegetarian => write!(f, "non-vegetarian"),
            DietType::Eggetarian => write!(f, "eggetarian"),
        }
    }
}

impl FromStr for DietType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "balanced" => Ok(DietType::Balanced),
            "vegetarian" => Ok(DietType::Vegetarian),
            "vegan" => Ok(DietType::Vegan),
            "non_vegetarian" | "nonvegetarian" => Ok(DietType::NonVegetarian),
            "eggetarian" => Ok(DietType::Eggetarian),
            _ => Err(format!("invalid diet type: '{}'", s.trim())),
        }
    }
}

/// Athlete attributes entered on the profile form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub sport: Sport,
    pub position: String,
    pub age: u8,
    #[serde(default = "default_injury_history")]
    pub injury_history: String,
    #[serde(default = "default_goal")]
    pub goal: String,
    #[serde(default)]
    pub diet_type: DietType,
}

fn default_injury_history() -> String {
    "None".to_string()
}

fn default_goal() -> String {
    "Build stamina".to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            sport: Sport::Football,
            position: "Midfielder".to_string(),
            age: 15,
            injury_history: default_injury_history(),
            goal: default_goal(),
            diet_type: DietType::default(),
        }
    }
}

impl Profile {
    /// Check the form constraints: age within [`MIN_AGE`]..=[`MAX_AGE`] and a
    /// non-blank position.
    pub fn validate(&self) -> Result<(), CoachError> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(CoachError::InvalidProfile(format!(
                "age must be between {MIN_AGE} and {MAX_AGE}, got {}",
                self.age
            )));
        }
        if self.position.trim().is_empty() {
            return Err(CoachError::InvalidProfile(
                "position must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_parse_is_case_insensitive() {
        assert_eq!("Tennis".parse::<Sport>().unwrap(), Sport::Tennis);
        assert_eq!(" CRICKET ".parse::<Sport>().unwrap(), Sport::Cricket);
        assert!("curling".parse::<Sport>().is_err());
    }

    #[test]
    fn test_diet_type_accepts_hyphenated_form() {
        assert_eq!(
            "non-vegetarian".parse::<DietType>().unwrap(),
            DietType::NonVegetarian
        );
        assert_eq!(
            "Non Vegetarian".parse::<DietType>().unwrap(),
            DietType::NonVegetarian
        );
        assert_eq!(
            DietType::NonVegetarian.to_string().parse::<DietType>().unwrap(),
            DietType::NonVegetarian
        );
    }

    #[test]
    fn test_diet_type_serde_key() {
        let json = serde_json::to_string(&DietType::NonVegetarian).unwrap();
        assert_eq!(json, "\"non_vegetarian\"");
    }

    #[test]
    fn test_default_profile_matches_form_defaults() {
        let profile = Profile::default();
        assert_eq!(profile.sport, Sport::Football);
        assert_eq!(profile.position, "Midfielder");
        assert_eq!(profile.age, 15);
        assert_eq!(profile.injury_history, "None");
        assert_eq!(profile.goal, "Build stamina");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_age_out_of_range() {
        let young = Profile {
            age: 9,
            ..Profile::default()
        };
        let old = Profile {
            age: 26,
            ..Profile::default()
        };
        assert!(matches!(young.validate(), Err(CoachError::InvalidProfile(_))));
        assert!(matches!(old.validate(), Err(CoachError::InvalidProfile(_))));

        let edge = Profile {
            age: MAX_AGE,
            ..Profile::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_position() {
        let profile = Profile {
            position: "   ".to_string(),
            ..Profile::default()
        };
        assert!(matches!(profile.validate(), Err(CoachError::InvalidProfile(_))));
    }

    #[test]
    fn test_profile_deserialize_fills_optional_fields() {
        let json = r#"{"sport":"tennis","position":"Baseline player","age":16}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.sport, Sport::Tennis);
        assert_eq!(profile.injury_history, "None");
        assert_eq!(profile.diet_type, DietType::Balanced);
    }
}
