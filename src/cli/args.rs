//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for embedding subtitle tracks
#[derive(Args, Debug, Clone)]
pub struct EmbedArgs {
    /// Input video file (MP4, M4V, MKV, AVI, MOV)
    #[arg(value_name = "VIDEO_FILE")]
    pub video: PathBuf,

    /// Subtitle files as file.srt[:lang[:title]] (SRT, ASS, SSA, VTT)
    #[arg(value_name = "SUBTITLE[:LANG[:TITLE]]", required = true, num_args = 1..)]
    pub subtitles: Vec<String>,

    /// Output video file (default: <input>_subtitled.<ext>)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Re-encode video instead of copying (slower)
    #[arg(long)]
    pub no_copy_video: bool,

    /// Re-encode audio instead of copying
    #[arg(long)]
    pub no_copy_audio: bool,

    /// Video codec used with --no-copy-video
    #[arg(long, env = "SUBEMBED_VIDEO_CODEC")]
    pub video_codec: Option<String>,

    /// Audio codec used with --no-copy-audio
    #[arg(long, env = "SUBEMBED_AUDIO_CODEC")]
    pub audio_codec: Option<String>,

    /// Constant Rate Factor (0-51) used with --no-copy-video
    #[arg(long, env = "SUBEMBED_CRF", value_parser = clap::value_parser!(u8).range(0..=51))]
    pub crf: Option<u8>,

    /// Encoding preset used with --no-copy-video
    #[arg(long, env = "SUBEMBED_PRESET")]
    pub preset: Option<String>,

    /// FFmpeg executable name or path
    #[arg(long, env = "SUBEMBED_FFMPEG", value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// Print the FFmpeg command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON report instead of the human-readable summary
    #[arg(long)]
    pub json: bool,
}
