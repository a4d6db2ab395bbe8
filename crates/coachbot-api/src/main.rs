//! CoachBot CLI and web server entry point.
//!
//! Binary name: `coachbot`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the appropriate
//! command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use coachbot_infra::filesystem::config_path;
use coachbot_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let outcome = run(cli).await;
    shutdown_tracing();
    outcome
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "coachbot", &mut std::io::stdout());
        }

        Commands::Features => {
            cli::features::list_features(cli.json)?;
        }

        Commands::Prompt {
            feature,
            question,
            profile,
        } => {
            cli::prompt::show_prompt(
                feature.as_deref(),
                question,
                profile.into_profile(),
                cli.json,
            )?;
        }

        Commands::Ask {
            feature,
            question,
            profile,
            api_key,
            temperature,
            output,
        } => {
            let state = AppState::init().await?;
            let options = cli::ask::AskOptions {
                feature,
                question,
                profile: profile.into_profile(),
                api_key,
                temperature,
                output,
            };
            cli::ask::ask(&state, options, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            let state = AppState::init().await?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} CoachBot listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!(
                    "  {} {} ({})",
                    console::style("Model:").dim(),
                    state.config.model,
                    console::style(config_path(&state.data_dir).display()).dim()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
