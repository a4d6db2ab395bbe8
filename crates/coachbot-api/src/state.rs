//! Application state wiring all services together.
//!
//! AppState holds the shared provider, the interaction controller and the
//! session store used by both CLI commands and REST API handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use coachbot_core::controller::{GenerationConfig, InteractionController};
use coachbot_core::llm::box_provider::BoxLlmProvider;
use coachbot_core::session::{SessionContext, SessionStore};
use coachbot_infra::config::load_global_config;
use coachbot_infra::filesystem::resolve_data_dir;
use coachbot_infra::llm::create_provider;
use coachbot_types::config::GlobalConfig;

/// Shared application state.
///
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GlobalConfig>,
    pub controller: Arc<InteractionController>,
    pub sessions: Arc<SessionStore>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, build the provider.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_global_config(&data_dir).await;
        let provider = create_provider(&config)?;

        tracing::info!(
            data_dir = %data_dir.display(),
            model = %config.model,
            "application state initialized"
        );

        Ok(Self::with_provider(config, provider, data_dir))
    }

    /// Build state around an already constructed provider.
    pub fn with_provider(config: GlobalConfig, provider: BoxLlmProvider, data_dir: PathBuf) -> Self {
        let controller = InteractionController::new(
            Arc::new(provider),
            GenerationConfig {
                model: config.model.clone(),
                max_output_tokens: config.max_output_tokens,
            },
        );
        let sessions = SessionStore::new(config.default_temperature, config.max_history_entries)
            .with_limits(
                config.max_sessions,
                Some(Duration::from_secs(config.session_idle_secs)),
            );

        Self {
            config: Arc::new(config),
            controller: Arc::new(controller),
            sessions: Arc::new(sessions),
            data_dir,
        }
    }

    /// A standalone session for one-shot CLI use; it is not registered in the store.
    pub fn scratch_session(&self) -> SessionContext {
        SessionContext::new(self.config.default_temperature, self.config.max_history_entries)
    }
}
