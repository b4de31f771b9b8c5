//! CLI module for SubEmbed
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

pub mod args;
pub mod commands;

pub use args::EmbedArgs;

const EXAMPLES: &str = "\
Examples:
  # Single subtitle
  subembed video.mp4 subtitle.srt:eng:English

  # Multiple subtitles
  subembed video.mp4 english.srt:eng:English spanish.srt:spa:Spanish

  # With custom output
  subembed video.mp4 sub.srt:eng:English -o output.mp4

  # Re-encode video (slower but more compatible)
  subembed video.mp4 sub.srt:eng --no-copy-video

Language codes (ISO 639-2):
  eng - English    spa - Spanish    fra - French
  deu - German     ita - Italian    por - Portuguese
  jpn - Japanese   kor - Korean     zho - Chinese
  ara - Arabic     rus - Russian    hin - Hindi";

/// SubEmbed
///
/// Embeds subtitle files into a video as selectable (soft) subtitle tracks
/// by driving FFmpeg. Subtitles are never burned into the picture.
#[derive(Parser, Debug)]
#[command(name = "subembed")]
#[command(about = "Embed subtitle files as soft subtitle tracks into video files")]
#[command(version)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    #[command(flatten)]
    pub embed: EmbedArgs,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, env = "SUBEMBED_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Configuration file (default: ./subembed.toml or the user config directory)
    #[arg(long, env = "SUBEMBED_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}
