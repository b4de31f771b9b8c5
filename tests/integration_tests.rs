use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use subembed_cli::*;

/// Test utilities for embedding scenarios
mod test_utils {
    use super::*;

    pub const SAMPLE_SRT: &str = "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n2\n00:00:01,000 --> 00:00:02,000\nWorld\n";

    /// Workspace with fixture files and an isolated config environment
    pub struct Workspace {
        pub dir: TempDir,
    }

    impl Workspace {
        pub fn new(files: &[&str]) -> Self {
            let dir = TempDir::new().unwrap();
            for name in files {
                let content: &[u8] = if name.ends_with(".srt") {
                    SAMPLE_SRT.as_bytes()
                } else {
                    b"not really media"
                };
                fs::write(dir.path().join(name), content).unwrap();
            }
            Self { dir }
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        /// The CLI binary, run inside the workspace with no ambient config
        pub fn cmd(&self) -> Command {
            let mut cmd = Command::cargo_bin("subembed").unwrap();
            cmd.current_dir(self.dir.path())
                .env("XDG_CONFIG_HOME", self.dir.path().join("config-home"))
                .env_remove("SUBEMBED_CONFIG")
                .env_remove("SUBEMBED_FFMPEG")
                .env_remove("SUBEMBED_VIDEO_CODEC")
                .env_remove("SUBEMBED_AUDIO_CODEC")
                .env_remove("SUBEMBED_CRF")
                .env_remove("SUBEMBED_PRESET")
                .env_remove("SUBEMBED_LOG_LEVEL")
                .env_remove("RUST_LOG");
            cmd
        }
    }

    /// Parse the `--json` report printed on stdout
    pub fn report(stdout: &[u8]) -> serde_json::Value {
        serde_json::from_slice(stdout).expect("stdout should be a JSON report")
    }

    pub fn args_of(report: &serde_json::Value) -> Vec<String> {
        report["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    pub fn values_of(args: &[String], flag: &str) -> Vec<String> {
        args.windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].clone())
            .collect()
    }

    pub fn ffmpeg_available() -> bool {
        which::which("ffmpeg").is_ok()
    }

    /// Create a short test video using FFmpeg
    pub fn create_test_video(output_path: &Path) {
        let output = std::process::Command::new("ffmpeg")
            .args([
                "-hide_banner",
                "-f",
                "lavfi",
                "-i",
                "testsrc=duration=2:size=320x240:rate=25",
                "-f",
                "lavfi",
                "-i",
                "sine=frequency=1000:duration=2",
                "-c:v",
                "mpeg4",
                "-c:a",
                "aac",
                "-shortest",
                "-y",
            ])
            .arg(output_path)
            .output()
            .expect("ffmpeg should start");
        assert!(
            output.status.success(),
            "FFmpeg failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

use test_utils::*;

#[test]
fn test_help_lists_usage() {
    let ws = Workspace::new(&[]);
    ws.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-copy-video"))
        .stdout(predicate::str::contains("ISO 639-2"));
}

#[test]
fn test_dry_run_single_track() {
    let ws = Workspace::new(&["video.mp4", "english.srt"]);
    let assert = ws
        .cmd()
        .args(["video.mp4", "english.srt:eng:English", "--dry-run", "--json"])
        .assert()
        .success();

    let report = report(&assert.get_output().stdout);
    assert_eq!(report["executed"], false);
    assert_eq!(report["output_path"], "video_subtitled.mp4");

    let args = args_of(&report);
    assert_eq!(values_of(&args, "-i"), vec!["video.mp4", "english.srt"]);
    assert_eq!(values_of(&args, "-c:v"), vec!["copy"]);
    assert_eq!(values_of(&args, "-c:a"), vec!["copy"]);
    let tags = values_of(&args, "-metadata:s:s:0");
    assert_eq!(tags.iter().filter(|t| t.starts_with("language=")).count(), 1);
    assert!(tags.contains(&"language=eng".to_string()));
    assert!(tags.contains(&"title=English".to_string()));
    assert!(args.contains(&"-y".to_string()));
    assert_eq!(args.last().unwrap(), "video_subtitled.mp4");
}

#[test]
fn test_dry_run_two_tracks_reencode_video() {
    let ws = Workspace::new(&["video.mkv", "a.srt", "b.srt"]);
    let assert = ws
        .cmd()
        .args(["video.mkv", "a.srt:eng", "b.srt:fas", "--no-copy-video", "--dry-run", "--json"])
        .assert()
        .success();

    let report = report(&assert.get_output().stdout);
    let args = args_of(&report);
    assert_eq!(values_of(&args, "-map"), vec!["0:v", "0:a?", "1:s:0", "2:s:0"]);
    assert_eq!(values_of(&args, "-metadata:s:s:0"), vec!["language=eng", "title=a"]);
    assert_eq!(values_of(&args, "-metadata:s:s:1"), vec!["language=fas", "title=b"]);
    assert_eq!(values_of(&args, "-c:v"), vec!["libx264"]);
    assert_eq!(values_of(&args, "-c:a"), vec!["copy"]);
    assert_eq!(report["output_path"], "video_subtitled.mkv");
}

#[test]
fn test_dry_run_prints_command_line() {
    let ws = Workspace::new(&["video.mp4", "a.srt"]);
    ws.cmd()
        .args(["video.mp4", "a.srt:spa:Spanish", "--dry-run", "-o", "out.mp4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ffmpeg -hide_banner -nostdin -y -i video.mp4 -i a.srt"))
        .stdout(predicate::str::contains("'language=spa'"))
        .stdout(predicate::str::contains("out.mp4"));
}

#[test]
fn test_dash_leading_video_name() {
    let ws = Workspace::new(&["-clip.mp4", "a.srt"]);
    let assert = ws
        .cmd()
        .args(["--dry-run", "--json", "--", "-clip.mp4", "a.srt:eng"])
        .assert()
        .success();

    let args = args_of(&report(&assert.get_output().stdout));
    assert_eq!(values_of(&args, "-i"), vec!["-clip.mp4", "a.srt"]);
    assert_eq!(args.last().unwrap(), "./-clip_subtitled.mp4");
}

#[test]
fn test_config_file_codecs_apply() {
    let ws = Workspace::new(&["video.mp4", "a.srt"]);
    fs::write(
        ws.path("subembed.toml"),
        "[subembed]\nvideo_codec = \"libx265\"\ncrf = 30\npreset = \"fast\"\n",
    )
    .unwrap();

    let assert = ws
        .cmd()
        .args(["video.mp4", "a.srt", "--no-copy-video", "--dry-run", "--json"])
        .assert()
        .success();
    let args = args_of(&report(&assert.get_output().stdout));
    assert_eq!(values_of(&args, "-c:v"), vec!["libx265"]);
    assert_eq!(values_of(&args, "-crf"), vec!["30"]);
    assert_eq!(values_of(&args, "-preset"), vec!["fast"]);
}

#[test]
fn test_unsupported_video_format_fails() {
    let ws = Workspace::new(&["video.txt", "a.srt"]);
    ws.cmd()
        .args(["video.txt", "a.srt:eng", "--ffmpeg", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported video format: .txt"));
}

#[test]
fn test_missing_subtitle_fails() {
    let ws = Workspace::new(&["video.mp4"]);
    ws.cmd()
        .args(["video.mp4", "missing.srt:eng", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("subtitle file not found"));
}

#[test]
fn test_malformed_token_fails() {
    let ws = Workspace::new(&["video.mp4", "a.srt"]);
    ws.cmd()
        .args(["video.mp4", "a.srt:eng:Title:extra", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed subtitle argument"));
}

#[test]
fn test_missing_tool_fails_fast() {
    let ws = Workspace::new(&["video.mp4", "a.srt"]);
    ws.cmd()
        .args(["video.mp4", "a.srt", "--ffmpeg", "/nonexistent/bin/ffmpeg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not installed or not in PATH"));
    assert!(!ws.path("video_subtitled.mp4").exists());
}

#[cfg(unix)]
#[test]
fn test_tool_failure_shows_diagnostics() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new(&["video.mp4", "a.srt"]);
    let fake = ws.path("fake-ffmpeg");
    fs::write(&fake, "#!/bin/sh\necho 'Error opening output file' >&2\nexit 1\n").unwrap();
    fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

    ws.cmd()
        .args(["video.mp4", "a.srt"])
        .arg("--ffmpeg")
        .arg(&fake)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exit code 1"))
        .stderr(predicate::str::contains("Error opening output file"));
}

#[test]
fn test_builder_from_library_api() {
    let ws = Workspace::new(&["clip.mov", "one.vtt", "two.ass"]);
    let tokens = vec![
        format!("{}:eng:One", ws.path("one.vtt").display()),
        format!("{}:deu:Two", ws.path("two.ass").display()),
    ];
    let request = domain::rules::RequestParser::parse(
        &ws.path("clip.mov"),
        &tokens,
        EmbedOptions::default(),
    )
    .unwrap();
    let plan = CommandBuilder::new("ffmpeg", EncodeSettings::default()).build(&request);
    let args = plan.args();

    assert_eq!(request.output_container, Container::Mp4);
    assert_eq!(values_of(&args, "-c:s:0"), vec!["mov_text"]);
    assert_eq!(values_of(&args, "-c:s:1"), vec!["mov_text"]);
    assert_eq!(
        values_of(&args, "-metadata:s:s:1"),
        vec!["language=deu", "title=Two", "handler_name=Two"]
    );
}

#[test]
fn test_real_ffmpeg_embed() {
    if !ffmpeg_available() {
        eprintln!("ffmpeg not found on PATH; skipping");
        return;
    }

    let ws = Workspace::new(&["english.srt", "spanish.srt"]);
    create_test_video(&ws.path("video.mp4"));

    ws.cmd()
        .args(["video.mp4", "english.srt:eng:English", "spanish.srt:spa:Spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtitles embedded successfully"));

    let output = ws.path("video_subtitled.mp4");
    assert!(output.exists());
    assert!(fs::metadata(&output).unwrap().len() > 1000);

    // Running again overwrites without prompting
    ws.cmd()
        .args(["video.mp4", "english.srt:eng:English"])
        .assert()
        .success();
}
