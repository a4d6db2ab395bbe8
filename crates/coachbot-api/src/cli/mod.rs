//! CLI command definitions and dispatch for the `coachbot` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod features;
pub mod prompt;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use coachbot_types::profile::{DietType, MAX_AGE, MIN_AGE, Profile, Sport};

/// AI coaching plans for young athletes.
#[derive(Parser)]
#[command(name = "coachbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web form and REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// List the ten coaching features.
    #[command(alias = "ls")]
    Features,

    /// Print the prompt a feature would send, without calling the model.
    Prompt {
        /// Feature identifier (e.g. workout, nutrition, custom).
        feature: Option<String>,

        /// Preview the wrapper for a free-form question.
        #[arg(short, long)]
        question: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Generate a coaching plan or answer a custom question.
    Ask {
        /// Feature identifier. Omit when using --question.
        feature: Option<String>,

        /// Ask a free-form question instead of a fixed plan.
        #[arg(short, long)]
        question: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Gemini API key. Prompted for when missing and stdin is a terminal.
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Creativity, 0.0 to 1.0. Defaults to the configured value.
        #[arg(short, long)]
        temperature: Option<f32>,

        /// Save the response to this file (or into this directory as coachbot_<feature>.txt).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Athlete profile flags shared by `prompt` and `ask`.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Sport: football, cricket, basketball, tennis, athletics.
    #[arg(long, default_value = "football")]
    pub sport: Sport,

    /// Playing position or event.
    #[arg(long, default_value = "Midfielder")]
    pub position: String,

    /// Athlete age.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u8).range(i64::from(MIN_AGE)..=i64::from(MAX_AGE)))]
    pub age: u8,

    /// Injury history, or "None".
    #[arg(long, default_value = "None")]
    pub injury: String,

    /// Training goal.
    #[arg(long, default_value = "Build stamina")]
    pub goal: String,

    /// Diet: balanced, vegetarian, vegan, non-vegetarian, eggetarian.
    #[arg(long, default_value = "balanced")]
    pub diet: DietType,
}

impl ProfileArgs {
    pub fn into_profile(self) -> Profile {
        Profile {
            sport: self.sport,
            position: self.position,
            age: self.age,
            injury_history: self.injury,
            goal: self.goal,
            diet_type: self.diet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_profile_defaults_match_form_defaults() {
        let cli = Cli::try_parse_from(["coachbot", "prompt", "workout"]).unwrap();
        let Commands::Prompt {
            feature,
            question,
            profile,
        } = cli.command
        else {
            panic!("expected prompt command");
        };
        assert_eq!(feature.as_deref(), Some("workout"));
        assert!(question.is_none());
        assert_eq!(profile.into_profile(), Profile::default());
    }

    #[test]
    fn test_age_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["coachbot", "prompt", "workout", "--age", "30"]).is_err());
        assert!(Cli::try_parse_from(["coachbot", "prompt", "workout", "--age", "9"]).is_err());
    }

    #[test]
    fn test_ask_with_question_and_profile() {
        let cli = Cli::try_parse_from([
            "coachbot",
            "--json",
            "ask",
            "--question",
            "How do I fix my toss?",
            "--sport",
            "Tennis",
            "--diet",
            "vegetarian",
            "--temperature",
            "0.3",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Ask {
            feature,
            question,
            profile,
            temperature,
            ..
        } = cli.command
        else {
            panic!("expected ask command");
        };
        assert!(feature.is_none());
        assert_eq!(question.as_deref(), Some("How do I fix my toss?"));
        assert_eq!(profile.sport, Sport::Tennis);
        assert_eq!(profile.diet, DietType::Vegetarian);
        assert_eq!(temperature, Some(0.3));
    }
}
