//! `coachbot prompt`: show the rendered prompt for a feature or a custom question.

use anyhow::Result;
use console::style;

use coachbot_core::template::render_request;
use coachbot_types::feature::FeatureRequest;
use coachbot_types::profile::Profile;

use crate::cli::ask::build_request;

/// Build and render the prompt a request would send, after the same checks
/// generation runs on the profile.
pub fn render_preview(
    feature: Option<&str>,
    question: Option<String>,
    profile: Profile,
) -> Result<(FeatureRequest, String)> {
    let request = build_request(feature, question, profile)?;
    request.profile.validate()?;
    let prompt = render_request(&request)?;
    Ok((request, prompt))
}

/// Render and print the prompt without any network call.
pub fn show_prompt(
    feature: Option<&str>,
    question: Option<String>,
    profile: Profile,
    json: bool,
) -> Result<()> {
    let (request, prompt) = render_preview(feature, question, profile)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "feature": request.feature,
                "profile": request.profile,
                "custom_question": request.custom_question,
                "prompt": prompt,
            }))?
        );
        return Ok(());
    }

    println!();
    println!("  {} {}", style("Prompt").bold(), style(request.feature.label()).dim());
    println!();
    for line in prompt.lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}
