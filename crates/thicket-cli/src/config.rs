//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use thicket::{ThicketError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ThicketError {
    fn from(err: ConfigError) -> Self {
        ThicketError::Config(err.to_string())
    }
}

/// Find, load and validate configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (thicket/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - The loaded values fail [`AppConfig::validate`]
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ThicketError> {
    let config = find_config(explicit_path)?;
    config.validate()?;
    Ok(config)
}

fn find_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ThicketError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("thicket/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "thicket", "thicket") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file doesn't exist, cannot be read or is not valid
/// TOML for [`AppConfig`].
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ThicketError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(config)
}
