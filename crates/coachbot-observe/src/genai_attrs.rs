//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! `info_span!` needs literal field names, so span declarations spell the
//! request attributes out; these constants cover the values recorded after
//! the call returns, plus the operation and provider identifiers.

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The finish reason reported for the response (e.g., "STOP", "MAX_TOKENS").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// Text completion operation.
pub const OP_COMPLETE: &str = "complete";

/// Provider name for Google Gemini.
pub const PROVIDER_GEMINI: &str = "gemini";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_names_share_prefix() {
        for name in [
            GEN_AI_USAGE_INPUT_TOKENS,
            GEN_AI_USAGE_OUTPUT_TOKENS,
            GEN_AI_RESPONSE_FINISH_REASONS,
        ] {
            assert!(name.starts_with("gen_ai."), "{name}");
        }
    }
}
