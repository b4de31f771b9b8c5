// Domain rules - Request validation policies

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::utils::path::{derive_output_path, lowercase_extension, same_file};

/// Turns raw command-line inputs into a validated `EmbedRequest`
///
/// Everything here happens before the media tool is touched: a request
/// that comes back `Ok` has an existing video, existing subtitle files
/// with recognised extensions, and an output path the tool can write.
pub struct RequestParser;

impl RequestParser {
    /// Parse and validate a full embed request
    pub fn parse(
        video: &Path,
        tokens: &[String],
        options: EmbedOptions,
    ) -> DomainResult<EmbedRequest> {
        validate_video(video)?;

        if tokens.is_empty() {
            return Err(DomainError::malformed("", "at least one subtitle is required"));
        }

        let mut subtitles: Vec<SubtitleTrackSpec> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let spec = SubtitleTrackSpec::parse(token)?;
            validate_subtitle(&spec)?;
            if subtitles.iter().any(|existing| same_file(&existing.path, &spec.path)) {
                return Err(DomainError::DuplicateSubtitle { path: spec.path });
            }
            debug!(path = %spec.path.display(), language = %spec.language, title = %spec.title, "Parsed subtitle track");
            subtitles.push(spec);
        }

        let output_path = options
            .output_path
            .unwrap_or_else(|| derive_output_path(video));
        let output_container = validate_output(video, &output_path)?;

        Ok(EmbedRequest {
            video_path: video.to_path_buf(),
            subtitles,
            output_path,
            output_container,
            copy_video: options.copy_video,
            copy_audio: options.copy_audio,
        })
    }
}

/// Check that the input video exists and is in a supported container
pub fn validate_video(path: &Path) -> DomainResult<Container> {
    if !path.is_file() {
        return Err(DomainError::FileNotFound {
            kind: FileKind::Video,
            path: path.to_path_buf(),
        });
    }
    container_for(path, FileKind::Video)
}

/// Check that a subtitle file exists
pub fn validate_subtitle(spec: &SubtitleTrackSpec) -> DomainResult<()> {
    if !spec.path.is_file() {
        return Err(DomainError::FileNotFound {
            kind: FileKind::Subtitle,
            path: spec.path.clone(),
        });
    }
    Ok(())
}

/// Check that the output can hold text subtitles and does not clobber the input
pub fn validate_output(video: &Path, output: &Path) -> DomainResult<Container> {
    let container = container_for(output, FileKind::Output)?;
    if !container.supports_text_subtitles() {
        return Err(DomainError::UnsupportedFormat {
            kind: FileKind::Output,
            extension: format!(
                "{} (cannot hold text subtitle tracks; choose an .mkv or .mp4 output)",
                display_extension(&lowercase_extension(output).unwrap_or_default())
            ),
        });
    }
    if same_file(video, output) {
        return Err(DomainError::OutputCollision {
            path: PathBuf::from(output),
        });
    }
    Ok(container)
}

fn container_for(path: &Path, kind: FileKind) -> DomainResult<Container> {
    let extension = lowercase_extension(path).unwrap_or_default();
    Container::from_extension(&extension).ok_or_else(|| DomainError::UnsupportedFormat {
        kind,
        extension: display_extension(&extension),
    })
}
