//! Completion results and the history entries recorded for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::feature::FeatureId;
use crate::profile::Sport;

/// Outcome of one successful feature invocation.
///
/// Produced once per request and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub feature: FeatureId,
    pub text: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

impl CompletionResult {
    /// File name for the plain-text download of this result.
    pub fn download_filename(&self) -> String {
        self.feature.download_filename()
    }
}

/// One row in the session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub feature: FeatureId,
    pub feature_name: String,
    pub sport: Sport,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_question: Option<String>,
    pub response_text: String,
}

impl HistoryEntry {
    /// Build the history row for a completed result.
    ///
    /// The response text is copied verbatim; the timestamp is the result's
    /// generation time.
    pub fn from_result(
        result: &CompletionResult,
        sport: Sport,
        position: &str,
        custom_question: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp: result.generated_at,
            feature: result.feature,
            feature_name: result.feature.label().to_string(),
            sport,
            position: position.to_string(),
            custom_question: custom_question.map(str::to_string),
            response_text: result.text.clone(),
        }
    }

    /// Title shown on the collapsed history row, e.g. `"workout - Football"`.
    pub fn title(&self) -> String {
        format!("{} - {}", self.feature, self.sport)
    }
}
