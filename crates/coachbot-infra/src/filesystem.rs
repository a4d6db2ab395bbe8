//! Data directory layout for CoachBot.

use std::path::{Path, PathBuf};

/// Path of the global configuration file inside the data directory.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `COACHBOT_DATA_DIR` environment variable
/// 2. `~/.coachbot`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COACHBOT_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".coachbot");
    }

    // Last resort: current directory
    PathBuf::from(".coachbot")
}
