// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult, FileKind};
use crate::utils::path::{file_stem_string, lowercase_extension};

/// Language tag used when a subtitle argument carries none (ISO 639-2 "undetermined")
pub const DEFAULT_LANGUAGE: &str = "und";

/// Separator between fields of a subtitle argument
pub const TOKEN_SEPARATOR: char = ':';

/// Supported subtitle file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// SubRip (.srt)
    Srt,
    /// Advanced SubStation Alpha (.ass)
    Ass,
    /// SubStation Alpha (.ssa)
    Ssa,
    /// WebVTT (.vtt)
    Vtt,
}

impl SubtitleFormat {
    /// Recognise a format from a file extension (case-insensitive, no leading dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "srt" => Some(SubtitleFormat::Srt),
            "ass" => Some(SubtitleFormat::Ass),
            "ssa" => Some(SubtitleFormat::Ssa),
            "vtt" => Some(SubtitleFormat::Vtt),
            _ => None,
        }
    }

    /// Codec name the media tool reports for a stream decoded from this format
    pub fn native_codec(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "subrip",
            // SSA is decoded into the ASS codec
            SubtitleFormat::Ass | SubtitleFormat::Ssa => "ass",
            SubtitleFormat::Vtt => "webvtt",
        }
    }
}

/// Supported video containers, used for both input and output paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    /// MP4, M4V and QuickTime MOV
    Mp4,
    /// Matroska
    Matroska,
    /// Audio Video Interleave
    Avi,
}

impl Container {
    /// Recognise a container from a file extension (case-insensitive, no leading dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "mp4" | "m4v" | "mov" => Some(Container::Mp4),
            "mkv" => Some(Container::Matroska),
            "avi" => Some(Container::Avi),
            _ => None,
        }
    }

    /// Whether the container can store text subtitle streams at all
    pub fn supports_text_subtitles(&self) -> bool {
        !matches!(self, Container::Avi)
    }

    /// Whether players read the stream handler name as the track label
    pub fn uses_handler_name(&self) -> bool {
        matches!(self, Container::Mp4)
    }
}

/// One requested subtitle track, built from a `path[:lang[:title]]` argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleTrackSpec {
    pub path: PathBuf,
    pub format: SubtitleFormat,
    pub language: String,
    pub title: String,
}

impl SubtitleTrackSpec {
    /// Parse a subtitle argument of the form `path[:lang[:title]]`
    ///
    /// Only the grammar and the extension are checked here; whether the
    /// file exists is decided by the request rules.
    pub fn parse(token: &str) -> DomainResult<Self> {
        let fields: Vec<&str> = token.split(TOKEN_SEPARATOR).collect();
        if fields.len() > 3 {
            return Err(DomainError::malformed(
                token,
                format!("expected at most 3 ':'-separated fields, found {}", fields.len()),
            ));
        }

        let path = fields[0];
        if path.is_empty() {
            return Err(DomainError::malformed(token, "subtitle path is empty"));
        }

        let language = match fields.get(1) {
            Some(lang) => {
                validate_language(token, lang)?;
                lang.to_string()
            }
            None => DEFAULT_LANGUAGE.to_string(),
        };

        let path = PathBuf::from(path);
        let title = match fields.get(2) {
            Some(title) if title.is_empty() => {
                return Err(DomainError::malformed(token, "title is empty"));
            }
            Some(title) => title.to_string(),
            None => file_stem_string(&path).unwrap_or_default(),
        };

        let extension = lowercase_extension(&path).unwrap_or_default();
        let format = SubtitleFormat::from_extension(&extension).ok_or_else(|| {
            DomainError::UnsupportedFormat {
                kind: FileKind::Subtitle,
                extension: display_extension(&extension),
            }
        })?;

        Ok(Self {
            path,
            format,
            language,
            title,
        })
    }

    /// Render back into the `path:lang:title` argument form
    pub fn to_token(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.path.display(),
            self.language,
            self.title,
            sep = TOKEN_SEPARATOR
        )
    }
}

impl fmt::Display for SubtitleTrackSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.language)
    }
}

fn validate_language(token: &str, language: &str) -> DomainResult<()> {
    if language.is_empty() {
        return Err(DomainError::malformed(token, "language code is empty"));
    }
    if !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::malformed(
            token,
            format!("language code '{}' must contain only letters", language),
        ));
    }
    Ok(())
}

/// Extension as shown in error messages
pub(crate) fn display_extension(extension: &str) -> String {
    if extension.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{}", extension)
    }
}

/// Codec settings applied when a stream is re-encoded instead of copied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeSettings {
    pub video_codec: String,
    pub audio_codec: String,
    /// Constant Rate Factor (0-51)
    pub crf: u8,
    pub preset: String,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            crf: 23,
            preset: "medium".to_string(),
        }
    }
}

/// Caller-chosen options that accompany the positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    pub output_path: Option<PathBuf>,
    pub copy_video: bool,
    pub copy_audio: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            output_path: None,
            copy_video: true,
            copy_audio: true,
        }
    }
}

/// A validated embed job
///
/// Subtitle order is significant: output subtitle track `i` is `subtitles[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedRequest {
    pub video_path: PathBuf,
    pub subtitles: Vec<SubtitleTrackSpec>,
    pub output_path: PathBuf,
    pub output_container: Container,
    pub copy_video: bool,
    pub copy_audio: bool,
}

impl EmbedRequest {
    /// Name of the input video file, for display
    pub fn video_name(&self) -> String {
        file_name_string(&self.video_path)
    }

    /// Name of the output file, for display
    pub fn output_name(&self) -> String {
        file_name_string(&self.output_path)
    }
}

fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
