//! Global configuration types for CoachBot.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! model, generation limits, request timeout, history capacity and how many
//! sessions the server keeps alive. The API
//! credential is never part of it; users enter that per session.

use serde::{Deserialize, Serialize};

/// Top-level configuration for CoachBot.
///
/// Loaded from `~/.coachbot/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Model identifier sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Provider API base URL (override for proxies or tests).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Output-length cap for every completion.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Temperature a new session starts with.
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Per-request timeout for the provider call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum history entries kept per session; 0 keeps everything.
    #[serde(default = "default_max_history_entries")]
    pub max_history_entries: usize,

    /// Live sessions kept by the server; the least recently used one is
    /// dropped when a new session would exceed it. 0 means no cap.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Sessions idle for longer than this many seconds are dropped. 0 keeps
    /// them until they are deleted or pushed out by `max_sessions`.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_max_output_tokens() -> u32 {
    1500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_history_entries() -> usize {
    200
}

fn default_max_sessions() -> usize {
    1000
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            max_output_tokens: default_max_output_tokens(),
            default_temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            max_history_entries: default_max_history_entries(),
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.max_output_tokens, 1500);
        assert!((config.default_temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.max_history_entries, 200);
        assert_eq!(config.max_sessions, 1000);
        assert_eq!(config.session_idle_secs, 3600);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
model = "gemini-2.5-flash"
max_output_tokens = 800
default_temperature = 0.4
request_timeout_secs = 15
max_history_entries = 0
max_sessions = 50
session_idle_secs = 0
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.max_output_tokens, 800);
        assert!((config.default_temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.max_history_entries, 0);
        assert_eq!(config.max_sessions, 50);
        assert_eq!(config.session_idle_secs, 0);
    }
}
