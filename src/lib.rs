//! SubEmbed Library
//!
//! Embeds subtitle files into video containers as selectable soft subtitle
//! tracks. All container work is delegated to FFmpeg; this crate validates
//! the inputs, builds the FFmpeg invocation and runs it.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{EmbedInteractor, EmbedJob, EmbedReport};
pub use domain::errors::{DomainError, DomainResult, FileKind};
pub use domain::model::{
    Container, EmbedOptions, EmbedRequest, EncodeSettings, SubtitleFormat, SubtitleTrackSpec,
};
pub use planner::{CommandBuilder, CommandPlan};
