//! SubEmbed
//!
//! A command-line tool that muxes subtitle files into a video as selectable
//! (non-burned) subtitle tracks using FFmpeg.
//!
//! # Usage
//!
//! ```bash
//! subembed video.mp4 english.srt:eng:English spanish.srt:spa:Spanish
//! subembed video.mkv a.srt:eng b.srt:fas --no-copy-video -o out.mkv
//! subembed video.mp4 sub.srt --dry-run
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use subembed_cli::cli::{commands, Cli};
use subembed_cli::config_initialization::initialize_configuration;
use subembed_cli::utils::logging::init_logging;
use subembed_cli::DomainError;

/// Main entry point for the SubEmbed CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = match initialize_configuration(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    init_logging(&config.logging);
    if let Some(path) = &config.config_file {
        debug!("Using configuration file: {}", path.display());
    }

    match commands::embed(&cli.embed, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Embedding failed: {:#}", e);
            eprintln!("❌ Error: {:#}", e);
            if let Some(diagnostics) = e.downcast_ref::<DomainError>().and_then(|d| d.diagnostics()) {
                if !diagnostics.is_empty() {
                    eprintln!("{}", diagnostics);
                }
            }
            ExitCode::FAILURE
        }
    }
}
