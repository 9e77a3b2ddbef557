/// Application configuration management
/// Stores user overrides in ~/.config/nfs-tui/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::utils::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the exports file read and edited by the logs screen.
    pub exports_file: String,
    /// Server provisioning script, invoked positionally.
    pub server_script: String,
    /// Client mount script, invoked positionally.
    pub client_script: String,
    /// Elevation command prefixed to privileged OS commands.
    /// An empty string disables elevation (e.g. when running as root).
    pub elevation: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            exports_file: constants::EXPORTS_FILE.to_string(),
            server_script: constants::SERVER_SCRIPT.to_string(),
            client_script: constants::CLIENT_SCRIPT.to_string(),
            elevation: constants::ELEVATION_CMD.to_string(),
        }
    }
}

impl AppConfig {
    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine the user config directory")?
            .join("nfs-tui");

        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_standard_locations() {
        let config = AppConfig::default();
        assert_eq!(config.exports_file, "/etc/exports");
        assert_eq!(config.elevation, "sudo");
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let config: AppConfig = toml::from_str("exports_file = \"/tmp/exports\"").unwrap();
        assert_eq!(config.exports_file, "/tmp/exports");
        assert_eq!(config.server_script, constants::SERVER_SCRIPT);
        assert_eq!(config.elevation, "sudo");
    }
}
