//! Prompt template engine.
//!
//! Maps a [`Feature`] and a [`Profile`] to the natural-language instruction
//! sent to the model. Pure functions: no I/O, no state.

use coachbot_types::error::CoachError;
use coachbot_types::feature::{Feature, FeatureId, FeatureRequest};
use coachbot_types::profile::Profile;

/// Profile attribute interpolated into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Sport,
    Position,
    Age,
    InjuryHistory,
    Goal,
    DietType,
}

impl ProfileField {
    /// Wire name of the field, matching the `Profile` serde keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Sport => "sport",
            ProfileField::Position => "position",
            ProfileField::Age => "age",
            ProfileField::InjuryHistory => "injury_history",
            ProfileField::Goal => "goal",
            ProfileField::DietType => "diet_type",
        }
    }

    /// The text this field contributes to a prompt.
    pub fn value_of(&self, profile: &Profile) -> String {
        match self {
            ProfileField::Sport => profile.sport.to_string(),
            ProfileField::Position => profile.position.trim().to_string(),
            ProfileField::Age => profile.age.to_string(),
            ProfileField::InjuryHistory => profile.injury_history.trim().to_string(),
            ProfileField::Goal => profile.goal.trim().to_string(),
            ProfileField::DietType => profile.diet_type.to_string(),
        }
    }
}

/// Profile fields each template interpolates.
pub fn fields_used(feature: Feature) -> &'static [ProfileField] {
    use ProfileField::*;

    match feature {
        Feature::Workout => &[Age, Position, Sport, InjuryHistory],
        Feature::Recovery => &[Age, InjuryHistory, Sport],
        Feature::Tactical => &[Position, Sport, Goal],
        Feature::Nutrition => &[Age, Sport, DietType, Goal],
        Feature::Warmup => &[Position, Sport, InjuryHistory],
        Feature::Mental => &[Age, Sport],
        Feature::Stamina => &[Sport, Age, Goal],
        Feature::Hydration => &[Sport],
        Feature::Mobility => &[Position, InjuryHistory],
        Feature::Matchday => &[Age, Position, Sport, DietType],
    }
}

/// Render the prompt for one of the fixed coaching plans.
pub fn render_prompt(feature: Feature, profile: &Profile) -> String {
    let age = profile.age;
    let sport = profile.sport;
    let position = profile.position.trim();
    let injury = profile.injury_history.trim();
    let goal = profile.goal.trim();
    let diet = profile.diet_type;

    match feature {
        Feature::Workout => format!(
            "Create a detailed workout plan for a {age}yr old {position} in {sport}. \
             Include warmup, exercises with sets/reps, and cooldown. \
             Consider injury history: {injury}"
        ),
        Feature::Recovery => format!(
            "Design a safe recovery plan for a {age}yr athlete with injury history: {injury}. \
             Include phases, exercises, timeline, and safety tips for {sport}"
        ),
        Feature::Tactical => format!(
            "Give tactical coaching for a {position} in {sport}. \
             Include skills, drills, and game awareness. Goal: {goal}"
        ),
        Feature::Nutrition => format!(
            "Create a 7-day nutrition plan for a {age}yr {sport} athlete on a {diet} diet. \
             Include meals, meal timing, and portions. Goal: {goal}"
        ),
        Feature::Warmup => format!(
            "Design a warmup and cooldown for a {position} in {sport}. \
             Include stretches, movements, and duration. Consider injury history: {injury}"
        ),
        Feature::Mental => format!(
            "Develop mental training for a {age}yr {sport} athlete. \
             Include visualization, breathing, and confidence building for competition"
        ),
        Feature::Stamina => format!(
            "Create a stamina program for {sport}. \
             Include cardio, intervals, and progression. Age: {age}, Goal: {goal}"
        ),
        Feature::Hydration => format!(
            "Provide a hydration strategy for a {sport} athlete. \
             Include timing, amounts, and electrolytes for training and match days"
        ),
        Feature::Mobility => format!(
            "Design a mobility program for a {position}. \
             Include stretches, exercises, and progression. Consider injury history: {injury}"
        ),
        Feature::Matchday => format!(
            "Create a complete match-day routine for a {age}yr {position} in {sport} \
             following a {diet} diet. Include meals, warmup, mental prep, and timing"
        ),
    }
}

/// Render the wrapper prompt for a free-text question.
///
/// The whole profile is included so the model can tailor its answer.
pub fn render_custom_prompt(profile: &Profile, question: &str) -> String {
    format!(
        "You are an experienced youth sports coach. Athlete profile: {age}yr {position} in {sport}; \
         injury history: {injury}; goal: {goal}; diet: {diet}.\n\n\
         Answer the athlete's question: {question}",
        age = profile.age,
        position = profile.position.trim(),
        sport = profile.sport,
        injury = profile.injury_history.trim(),
        goal = profile.goal.trim(),
        diet = profile.diet_type,
        question = question.trim(),
    )
}

/// Render the prompt for a full [`FeatureRequest`].
///
/// Custom requests without a non-blank question fail with
/// [`CoachError::EmptyQuery`].
pub fn render_request(request: &FeatureRequest) -> Result<String, CoachError> {
    match request.feature {
        FeatureId::Plan(feature) => Ok(render_prompt(feature, &request.profile)),
        FeatureId::Custom => {
            let question = request
                .custom_question
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .ok_or(CoachError::EmptyQuery)?;
            Ok(render_custom_prompt(&request.profile, question))
        }
    }
}
