//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::{EmbedJob, EmbedReport, PreparedEmbed};
use crate::cli::args::EmbedArgs;
use crate::config_initialization::AppConfig;
use crate::domain::model::EmbedOptions;

/// Execute the embed command
pub async fn embed(args: &EmbedArgs, config: &AppConfig) -> Result<()> {
    let container = DefaultAppContainer::new(config);
    let interactor = container.embed_interactor();
    let job = job_from_args(args);

    if args.dry_run {
        info!("Dry run: the media tool will not be started");
        let prepared = interactor.plan(&job).context("Invalid embed request")?;
        if args.json {
            print_json(&prepared.report(false))?;
        } else {
            println!("{}", prepared.plan.command_line());
        }
        return Ok(());
    }

    let prepared = interactor.prepare(&job).await.context("Cannot start embedding")?;
    if !args.json {
        display_job_summary(&prepared);
    }

    let report = interactor
        .run(&prepared)
        .await
        .context("Error during embedding")?;

    if args.json {
        print_json(&report)?;
    } else {
        println!("✅ Success! Subtitles embedded successfully.");
        println!("📁 Output saved to: {}", report.output_path.display());
    }
    Ok(())
}

/// Translate parsed arguments into an embed job
pub fn job_from_args(args: &EmbedArgs) -> EmbedJob {
    EmbedJob {
        video: args.video.clone(),
        subtitles: args.subtitles.clone(),
        options: EmbedOptions {
            output_path: args.output.clone(),
            copy_video: !args.no_copy_video,
            copy_audio: !args.no_copy_audio,
        },
    }
}

fn print_json(report: &EmbedReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Display the job in human-readable format before running it
fn display_job_summary(prepared: &PreparedEmbed) {
    let request = &prepared.request;
    println!();
    println!("🎬 Embedding subtitles into: {}", request.video_name());
    println!("📝 Subtitle tracks: {}", request.subtitles.len());
    for (i, track) in request.subtitles.iter().enumerate() {
        println!("   {}. {}", i + 1, track);
    }
    println!("💾 Output: {}", request.output_name());
    println!();
}
