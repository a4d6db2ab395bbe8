//! Global configuration loader for CoachBot.
//!
//! Reads `config.toml` from the data directory (`~/.coachbot/` by default)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use coachbot_types::config::GlobalConfig;

use crate::filesystem::config_path;

/// Smallest request timeout accepted from the config file, in seconds.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Out-of-range values are corrected with a warning (see [`normalize`]).
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => normalize(config),
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Bring loaded values back into their valid ranges.
///
/// The default temperature is clamped into `[0.0, 1.0]`, the timeout has a
/// one-second floor, and a blank model or base URL reverts to the default.
pub fn normalize(mut config: GlobalConfig) -> GlobalConfig {
    let defaults = GlobalConfig::default();

    if !config.default_temperature.is_finite() {
        tracing::warn!("default_temperature is not a number, using {}", defaults.default_temperature);
        config.default_temperature = defaults.default_temperature;
    } else if !(0.0..=1.0).contains(&config.default_temperature) {
        let clamped = config.default_temperature.clamp(0.0, 1.0);
        tracing::warn!(
            "default_temperature {} outside [0, 1], clamping to {clamped}",
            config.default_temperature
        );
        config.default_temperature = clamped;
    }

    if config.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS {
        tracing::warn!("request_timeout_secs must be at least {MIN_REQUEST_TIMEOUT_SECS}");
        config.request_timeout_secs = MIN_REQUEST_TIMEOUT_SECS;
    }

    if config.model.trim().is_empty() {
        config.model = defaults.model;
    }
    if config.base_url.trim().is_empty() {
        config.base_url = defaults.base_url;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.max_output_tokens, 1500);
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
model = "gemini-2.0-flash"
base_url = "http://localhost:9000/v1beta"
max_history_entries = 25
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://localhost:9000/v1beta");
        assert_eq!(config.max_history_entries, 25);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[tokio::test]
    async fn load_global_config_clamps_temperature() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "default_temperature = 1.8\nrequest_timeout_secs = 0\n",
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert!((config.default_temperature - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.request_timeout_secs, 1);
    }

    #[test]
    fn normalize_restores_blank_model() {
        let config = GlobalConfig {
            model: "  ".to_string(),
            base_url: String::new(),
            ..GlobalConfig::default()
        };
        let config = normalize(config);
        assert_eq!(config.model, "gemini-1.5-pro");
        assert!(config.base_url.starts_with("https://"));
    }

    #[test]
    fn normalize_keeps_valid_values() {
        let config = GlobalConfig {
            default_temperature: 0.2,
            ..GlobalConfig::default()
        };
        assert!((normalize(config).default_temperature - 0.2).abs() < f32::EPSILON);
    }
}
