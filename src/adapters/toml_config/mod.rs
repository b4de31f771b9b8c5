// TOML config adapter - Optional configuration file

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::errors::*;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "subembed.toml";

/// Settings read from the `[subembed]` table; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub ffmpeg: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub crf: Option<u8>,
    pub preset: Option<String>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    subembed: FileConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> DomainResult<FileConfig> {
        let document: ConfigDocument = toml::from_str(content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(document.subembed)
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> DomainResult<FileConfig> {
        if !path.is_file() {
            return Err(DomainError::Config(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Load the explicit file, or the first implicit location that exists
    ///
    /// Returns the file that was used, if any. Missing implicit files are
    /// not an error.
    pub fn discover(explicit: Option<&Path>) -> DomainResult<(Option<PathBuf>, FileConfig)> {
        if let Some(path) = explicit {
            let config = Self::load(path)?;
            info!("Loaded configuration from: {}", path.display());
            return Ok((Some(path.to_path_buf()), config));
        }

        for candidate in Self::default_locations() {
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                info!("Loaded configuration from: {}", candidate.display());
                return Ok((Some(candidate), config));
            }
            debug!("No config file at {}", candidate.display());
        }

        Ok((None, FileConfig::default()))
    }

    /// Implicit config locations, in lookup order
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];

        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            locations.push(PathBuf::from(xdg).join("subembed").join("config.toml"));
        } else if let Some(home) = std::env::var_os("HOME") {
            locations.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("subembed")
                    .join("config.toml"),
            );
        }
        // On Windows, use %APPDATA%/subembed/config.toml
        if let Some(appdata) = std::env::var_os("APPDATA") {
            locations.push(PathBuf::from(appdata).join("subembed").join("config.toml"));
        }

        locations
    }
}
