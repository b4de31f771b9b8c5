//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::adapters::exec_ffmpeg::DEFAULT_FFMPEG;
use crate::adapters::toml_config::{FileConfig, TomlConfigAdapter};
use crate::cli::Cli;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::EncodeSettings;
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// FFmpeg executable name or path
    pub ffmpeg: String,
    pub encode: EncodeSettings,
    pub logging: LoggingConfig,
    /// File the settings were read from, if any
    pub config_file: Option<PathBuf>,
}

/// Values given on the command line or through environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub ffmpeg: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub crf: Option<u8>,
    pub preset: Option<String>,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl ConfigOverrides {
    /// Collect overrides from parsed arguments (clap already folded in the environment)
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            ffmpeg: cli.embed.ffmpeg.clone(),
            video_codec: cli.embed.video_codec.clone(),
            audio_codec: cli.embed.audio_codec.clone(),
            crf: cli.embed.crf,
            preset: cli.embed.preset.clone(),
            log_level: cli.log_level.clone(),
            log_json: cli.log_json,
        }
    }
}

/// Initialize configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<AppConfig> {
    let (config_file, file_config) = TomlConfigAdapter::discover(cli.config.as_deref())
        .context("Failed to load configuration file")?;

    let mut config = resolve(&ConfigOverrides::from_cli(cli), file_config)
        .context("Invalid configuration")?;
    config.config_file = config_file;
    Ok(config)
}

/// Merge overrides over file values over defaults
pub fn resolve(overrides: &ConfigOverrides, file: FileConfig) -> DomainResult<AppConfig> {
    let defaults = EncodeSettings::default();

    let crf = overrides.crf.or(file.crf).unwrap_or(defaults.crf);
    if crf > 51 {
        return Err(DomainError::Config(format!(
            "CRF value cannot exceed 51 (got {})",
            crf
        )));
    }

    let encode = EncodeSettings {
        video_codec: pick(&overrides.video_codec, file.video_codec, defaults.video_codec),
        audio_codec: pick(&overrides.audio_codec, file.audio_codec, defaults.audio_codec),
        crf,
        preset: pick(&overrides.preset, file.preset, defaults.preset),
    };

    let level = match overrides.log_level.as_deref().or(file.log_level.as_deref()) {
        Some(level) => LogLevel::parse(level)?,
        None => LoggingConfig::default().level,
    };
    let format = if overrides.log_json || file.log_json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(AppConfig {
        ffmpeg: pick(&overrides.ffmpeg, file.ffmpeg, DEFAULT_FFMPEG.to_string()),
        encode,
        logging: LoggingConfig { level, format },
        config_file: None,
    })
}

fn pick(over: &Option<String>, file: Option<String>, default: String) -> String {
    over.clone().or(file).unwrap_or(default)
}
