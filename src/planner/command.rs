//! Command builder: `EmbedRequest` to an ordered media-tool argument list

use std::path::Path;

use tracing::debug;

use crate::domain::model::{Container, EmbedRequest, EncodeSettings, SubtitleFormat};
use crate::planner::*;
use crate::utils::shell::escape;

/// Builds `CommandPlan`s for a given tool and encode settings
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    settings: EncodeSettings,
}

impl CommandBuilder {
    /// Create a new builder
    pub fn new(program: impl Into<String>, settings: EncodeSettings) -> Self {
        Self {
            program: program.into(),
            settings,
        }
    }

    /// Plan the invocation for a validated request. Performs no I/O.
    pub fn build(&self, request: &EmbedRequest) -> CommandPlan {
        let mut inputs = Vec::with_capacity(request.subtitles.len() + 1);
        inputs.push(InputSlot {
            index: 0,
            role: InputRole::Video,
            path: request.video_path.clone(),
        });

        let mut subtitle_streams = Vec::with_capacity(request.subtitles.len());
        for (output_index, spec) in request.subtitles.iter().enumerate() {
            let input_index = inputs.len();
            inputs.push(InputSlot {
                index: input_index,
                role: InputRole::Subtitle,
                path: spec.path.clone(),
            });
            subtitle_streams.push(SubtitleStreamPlan {
                output_index,
                input_index,
                codec: subtitle_codec(request.output_container, spec.format),
                language: spec.language.clone(),
                title: spec.title.clone(),
                handler_name: request.output_container.uses_handler_name(),
            });
            debug!(output_index, input_index, language = %spec.language, "Planned subtitle stream");
        }

        let (video_codec, video_tuning) = if request.copy_video {
            (StreamCodec::Copy, None)
        } else {
            (
                StreamCodec::Encode(self.settings.video_codec.clone()),
                Some(VideoTuning {
                    preset: self.settings.preset.clone(),
                    crf: self.settings.crf,
                }),
            )
        };
        let audio_codec = if request.copy_audio {
            StreamCodec::Copy
        } else {
            StreamCodec::Encode(self.settings.audio_codec.clone())
        };

        CommandPlan {
            program: self.program.clone(),
            inputs,
            video_codec,
            video_tuning,
            audio_codec,
            subtitle_streams,
            output_path: request.output_path.clone(),
        }
    }
}

/// Pick the subtitle codec for a source format in a given output container
///
/// Streams are copied only when the container stores the source format
/// natively; otherwise they are converted to the container's text codec.
pub fn subtitle_codec(container: Container, format: SubtitleFormat) -> StreamCodec {
    let target = match container {
        Container::Mp4 => "mov_text",
        Container::Matroska => format.native_codec(),
        // Rejected during validation; kept total for direct callers
        Container::Avi => "srt",
    };
    if target == format.native_codec() {
        StreamCodec::Copy
    } else {
        StreamCodec::Encode(target.to_string())
    }
}

/// Output positional as the tool should see it
///
/// A relative name starting with `-` would be read as an option, so it is
/// anchored to the current directory.
fn output_arg(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if path.is_relative() && rendered.starts_with('-') {
        Path::new(".").join(path).to_string_lossy().to_string()
    } else {
        rendered.to_string()
    }
}

impl CommandPlan {
    /// Render the ordered argument list (without the program name)
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = GLOBAL_FLAGS.iter().map(|flag| flag.to_string()).collect();

        for input in &self.inputs {
            args.push("-i".to_string());
            args.push(input.path.to_string_lossy().to_string());
        }

        args.push("-map".to_string());
        args.push("0:v".to_string());
        // Audio is optional in the source
        args.push("-map".to_string());
        args.push("0:a?".to_string());
        for stream in &self.subtitle_streams {
            args.push("-map".to_string());
            args.push(format!("{}:s:0", stream.input_index));
        }

        args.push("-c:v".to_string());
        args.push(self.video_codec.as_arg().to_string());
        if let Some(tuning) = &self.video_tuning {
            args.push("-preset".to_string());
            args.push(tuning.preset.clone());
            args.push("-crf".to_string());
            args.push(tuning.crf.to_string());
        }
        args.push("-c:a".to_string());
        args.push(self.audio_codec.as_arg().to_string());

        for stream in &self.subtitle_streams {
            args.push(format!("-c:s:{}", stream.output_index));
            args.push(stream.codec.as_arg().to_string());
        }

        for stream in &self.subtitle_streams {
            let key = format!("-metadata:s:s:{}", stream.output_index);
            args.push(key.clone());
            args.push(format!("language={}", stream.language));
            args.push(key.clone());
            args.push(format!("title={}", stream.title));
            if stream.handler_name {
                args.push(key);
                args.push(format!("handler_name={}", stream.title));
            }
        }

        args.push(output_arg(&self.output_path));
        args
    }

    /// Shell-quoted command line, for display and dry runs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args())
            .map(escape)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
