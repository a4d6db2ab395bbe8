//! Static catalog endpoints: features, profile options and prompt preview.
//!
//! Endpoints:
//! - GET  /api/v1/features         - The ten coaching features
//! - GET  /api/v1/profile/options  - Choices and defaults for the profile form
//! - POST /api/v1/prompts/preview  - Render a prompt without calling the model

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use uuid::Uuid;

use coachbot_core::template::{fields_used, render_request};
use coachbot_types::feature::{Feature, FeatureRequest, SAFETY_NOTE};
use coachbot_types::profile::{DietType, MAX_AGE, MIN_AGE, Profile, Sport};

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::handlers::generate::FeatureRequestBody;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// One button on the feature grid.
#[derive(Debug, Serialize)]
pub struct FeatureView {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub fields: Vec<&'static str>,
}

impl From<Feature> for FeatureView {
    fn from(feature: Feature) -> Self {
        Self {
            id: feature.as_str(),
            label: feature.label(),
            icon: feature.icon(),
            fields: fields_used(feature).iter().map(|f| f.as_str()).collect(),
        }
    }
}

/// A selectable value with its display label.
#[derive(Debug, Serialize)]
pub struct OptionView {
    pub id: &'static str,
    pub label: String,
}

/// Temperature slider bounds.
#[derive(Debug, Serialize)]
pub struct TemperatureRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

/// Everything the profile form needs to render.
#[derive(Debug, Serialize)]
pub struct ProfileOptions {
    pub sports: Vec<OptionView>,
    pub diets: Vec<OptionView>,
    pub min_age: u8,
    pub max_age: u8,
    pub defaults: Profile,
    pub temperature: TemperatureRange,
    /// Safety note the form shows with every result.
    pub disclaimer: &'static str,
}

/// Rendered prompt for a request.
#[derive(Debug, Serialize)]
pub struct PromptPreview {
    pub feature: String,
    pub prompt: String,
}

/// GET /api/v1/features - List the ten features in grid order.
pub async fn list_features() -> Json<ApiResponse<Vec<FeatureView>>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let features = Feature::ALL.into_iter().map(FeatureView::from).collect();

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(features, request_id, elapsed).with_link("self", "/api/v1/features"))
}

/// GET /api/v1/profile/options - Choices, ranges and defaults for the form.
pub async fn profile_options(
    State(state): State<AppState>,
) -> Json<ApiResponse<ProfileOptions>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let options = ProfileOptions {
        sports: Sport::ALL
            .iter()
            .map(|s| OptionView {
                id: s.as_str(),
                label: s.to_string(),
            })
            .collect(),
        diets: DietType::ALL
            .iter()
            .map(|d| OptionView {
                id: d.as_str(),
                label: d.to_string(),
            })
            .collect(),
        min_age: MIN_AGE,
        max_age: MAX_AGE,
        defaults: Profile::default(),
        temperature: TemperatureRange {
            min: 0.0,
            max: 1.0,
            default: state.config.default_temperature,
        },
        disclaimer: SAFETY_NOTE,
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(options, request_id, elapsed))
}

/// POST /api/v1/prompts/preview - Render the prompt a request would send.
pub async fn preview_prompt(
    ApiJson(body): ApiJson<FeatureRequestBody>,
) -> Result<Json<ApiResponse<PromptPreview>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let request = FeatureRequest::try_from(body)?;
    request.profile.validate()?;
    let prompt = render_request(&request)?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        PromptPreview {
            feature: request.feature.to_string(),
            prompt,
        },
        request_id,
        elapsed,
    )))
}
