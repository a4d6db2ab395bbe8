//! `coachbot ask`: run one feature (or a custom question) against Gemini.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use console::style;
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};

use coachbot_types::error::CoachError;
use coachbot_types::feature::{FeatureId, FeatureRequest, SAFETY_NOTE};
use coachbot_types::history::CompletionResult;
use coachbot_types::profile::Profile;

use crate::state::AppState;

/// Options for a single `ask` invocation.
pub struct AskOptions {
    pub feature: Option<String>,
    pub question: Option<String>,
    pub profile: Profile,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub output: Option<PathBuf>,
}

/// Generate a plan and print it, optionally saving it to a file.
///
/// # Examples
///
/// ```bash
/// # Fixed plan, key from the environment
/// GEMINI_API_KEY=... coachbot ask warmup --sport tennis --position "Baseline player" --age 16
///
/// # Custom question, saved next to other downloads
/// coachbot ask --question "How should I taper before a final?" --output ./plans/
/// ```
pub async fn ask(state: &AppState, options: AskOptions, json: bool) -> Result<()> {
    let request = build_request(options.feature.as_deref(), options.question, options.profile)?;

    let mut session = state.scratch_session();
    session.settings.set_credential(resolve_api_key(options.api_key)?);
    if let Some(temperature) = options.temperature {
        session.settings.set_temperature(temperature)?;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Generating {}...", request.feature.label()));
    if !json {
        spinner.enable_steady_tick(Duration::from_millis(80));
    }

    let outcome = state.controller.invoke(&mut session, &request).await;
    spinner.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            if json {
                println!("{}", serde_json::json!({ "error": error_json(&err) }));
            } else {
                print_error(&err);
            }
            return Err(err.into());
        }
    };

    let saved_to = match &options.output {
        Some(output) => Some(save_result(output, &result).await?),
        None => None,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "result": result,
                "saved_to": saved_to,
                "disclaimer": SAFETY_NOTE,
            }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(header_icon(result.feature)).bold(),
        style(result.feature.label()).cyan().bold()
    );
    println!();
    println!("{}", result.text);
    println!();
    println!("  {}", style(SAFETY_NOTE).yellow());
    println!();
    if let Some(path) = saved_to {
        println!(
            "  {} Saved to {}",
            style("✓").green().bold(),
            style(path.display()).dim()
        );
        println!();
    }

    Ok(())
}

/// Turn the positional feature and `--question` into a [`FeatureRequest`].
///
/// A question without a feature (or with `custom`) is a custom query; a
/// fixed feature ignores any question.
pub fn build_request(
    feature: Option<&str>,
    question: Option<String>,
    profile: Profile,
) -> Result<FeatureRequest> {
    match (feature, question) {
        (None, Some(question)) => Ok(FeatureRequest::custom(profile, question)),
        (None, None) => bail!("name a feature (see `coachbot features`) or pass --question"),
        (Some(id), question) => match id.parse::<FeatureId>()? {
            FeatureId::Custom => Ok(FeatureRequest::custom(profile, question.unwrap_or_default())),
            FeatureId::Plan(feature) => {
                if question.is_some() {
                    tracing::warn!(%feature, "--question is ignored for fixed features");
                }
                Ok(FeatureRequest::plan(feature, profile))
            }
        },
    }
}

/// Use the flag or environment value, else prompt when a user is present.
fn resolve_api_key(api_key: Option<String>) -> Result<Option<String>> {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        return Ok(Some(key));
    }
    if !console::user_attended() {
        return Ok(None);
    }
    let key = Password::new()
        .with_prompt("Gemini API key")
        .allow_empty_password(true)
        .interact()?;
    Ok(Some(key))
}

/// Where a result is written: the path itself, or the download file name
/// inside it when the path is a directory.
pub fn output_path(output: &Path, result: &CompletionResult) -> PathBuf {
    if output.is_dir() {
        output.join(result.download_filename())
    } else {
        output.to_path_buf()
    }
}

async fn save_result(output: &Path, result: &CompletionResult) -> Result<PathBuf> {
    let path = output_path(output, result);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &result.text).await?;
    tracing::info!(path = %path.display(), "saved response");
    Ok(path)
}

fn header_icon(feature: FeatureId) -> &'static str {
    match feature {
        FeatureId::Plan(feature) => feature.icon(),
        FeatureId::Custom => "💬",
    }
}

fn error_json(err: &CoachError) -> serde_json::Value {
    serde_json::json!({
        "message": err.to_string(),
        "hint": err.hint(),
    })
}

fn print_error(err: &CoachError) {
    eprintln!();
    eprintln!("  {} {}", style("✗").red().bold(), err);
    if let Some(hint) = err.hint() {
        eprintln!("    {}", style(hint).dim());
    }
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use coachbot_types::feature::Feature;
    use tempfile::TempDir;

    fn result(feature: FeatureId) -> CompletionResult {
        CompletionResult {
            feature,
            text: "Hydrate early.".to_string(),
            model: "gemini-1.5-pro".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_request_variants() {
        let plan = build_request(Some("Nutrition"), None, Profile::default()).unwrap();
        assert_eq!(plan.feature, FeatureId::Plan(Feature::Nutrition));

        let custom = build_request(None, Some("Why?".to_string()), Profile::default()).unwrap();
        assert_eq!(custom.feature, FeatureId::Custom);
        assert_eq!(custom.custom_question.as_deref(), Some("Why?"));

        let explicit = build_request(Some("custom"), None, Profile::default()).unwrap();
        assert_eq!(explicit.feature, FeatureId::Custom);

        assert!(build_request(None, None, Profile::default()).is_err());
    }

    #[test]
    fn test_build_request_unknown_feature() {
        let err = build_request(Some("yoga"), None, Profile::default()).unwrap_err();
        let coach = err.downcast_ref::<CoachError>().unwrap();
        assert!(matches!(coach, CoachError::UnknownFeature(id) if id == "yoga"));
    }

    #[test]
    fn test_output_path_uses_download_name_for_directories() {
        let tmp = TempDir::new().unwrap();
        let hydration = result(FeatureId::Plan(Feature::Hydration));
        assert_eq!(
            output_path(tmp.path(), &hydration),
            tmp.path().join("coachbot_hydration.txt")
        );

        let file = tmp.path().join("plan.md");
        assert_eq!(output_path(&file, &hydration), file);
    }

    #[tokio::test]
    async fn test_save_result_writes_text_verbatim() {
        let tmp = TempDir::new().unwrap();
        let custom = result(FeatureId::Custom);
        let path = save_result(tmp.path(), &custom).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "coachbot_custom.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Hydrate early.");
    }
}
