//! Command planning for the media tool
//!
//! A `CommandPlan` records which input index each file occupies and which
//! output subtitle index each mapped stream lands on. The argument list is
//! rendered from that structure, so the positional `-map` and
//! `-metadata:s:s:N` arguments can be audited without running anything.

use std::path::PathBuf;

use serde::Serialize;

pub mod command;

pub use command::CommandBuilder;

/// Global flags placed before any input: no banner, never read stdin, overwrite output
pub const GLOBAL_FLAGS: [&str; 3] = ["-hide_banner", "-nostdin", "-y"];

/// What an input file contributes to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputRole {
    /// Source of the video and audio streams
    Video,
    /// Source of exactly one subtitle stream
    Subtitle,
}

/// One `-i` input with its positional index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSlot {
    pub index: usize,
    pub role: InputRole,
    pub path: PathBuf,
}

/// How a stream kind is written to the output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "codec")]
pub enum StreamCodec {
    /// Pass through unchanged
    Copy,
    /// Encode with the named codec
    Encode(String),
}

impl StreamCodec {
    /// Value for a `-c:<kind>` argument
    pub fn as_arg(&self) -> &str {
        match self {
            StreamCodec::Copy => "copy",
            StreamCodec::Encode(codec) => codec.as_str(),
        }
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, StreamCodec::Copy)
    }
}

/// Video encoder tuning, present only when video is re-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoTuning {
    pub preset: String,
    pub crf: u8,
}

/// One output subtitle stream and where it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleStreamPlan {
    /// Index among subtitle streams in the output (`-metadata:s:s:N`)
    pub output_index: usize,
    /// Index of the `-i` input it is taken from
    pub input_index: usize,
    pub codec: StreamCodec,
    pub language: String,
    pub title: String,
    /// Also tag the title as the stream handler name
    pub handler_name: bool,
}

/// Full invocation plan for one embed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandPlan {
    /// Executable name or path of the media tool
    pub program: String,
    pub inputs: Vec<InputSlot>,
    pub video_codec: StreamCodec,
    pub video_tuning: Option<VideoTuning>,
    pub audio_codec: StreamCodec,
    pub subtitle_streams: Vec<SubtitleStreamPlan>,
    pub output_path: PathBuf,
}
