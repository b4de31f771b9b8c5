// Embed interactor - Orchestrates the parse, build and run pipeline

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::RequestParser;
use crate::planner::{CommandBuilder, CommandPlan};
use crate::ports::*;

/// Raw inputs for one embed job, as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedJob {
    pub video: PathBuf,
    pub subtitles: Vec<String>,
    pub options: EmbedOptions,
}

/// A validated request together with its planned invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedEmbed {
    pub request: EmbedRequest,
    pub plan: CommandPlan,
}

/// Summary of an embed job, printable as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedReport {
    pub video_path: PathBuf,
    pub output_path: PathBuf,
    pub tracks: Vec<SubtitleTrackSpec>,
    pub program: String,
    pub args: Vec<String>,
    /// False for dry runs
    pub executed: bool,
}

impl PreparedEmbed {
    /// Build the report for this job
    pub fn report(&self, executed: bool) -> EmbedReport {
        EmbedReport {
            video_path: self.request.video_path.clone(),
            output_path: self.request.output_path.clone(),
            tracks: self.request.subtitles.clone(),
            program: self.plan.program.clone(),
            args: self.plan.args(),
            executed,
        }
    }
}

/// Interactor for the subtitle embed use case
pub struct EmbedInteractor {
    execute_port: Arc<dyn ExecutePort>,
    builder: CommandBuilder,
}

impl EmbedInteractor {
    /// Create new embed interactor with injected ports
    pub fn new(execute_port: Arc<dyn ExecutePort>, builder: CommandBuilder) -> Self {
        Self {
            execute_port,
            builder,
        }
    }

    /// Validate the job and build its invocation without touching the media tool
    pub fn plan(&self, job: &EmbedJob) -> Result<PreparedEmbed, DomainError> {
        let request = RequestParser::parse(&job.video, &job.subtitles, job.options.clone())?;
        info!(
            video = %request.video_path.display(),
            tracks = request.subtitles.len(),
            output = %request.output_path.display(),
            "Validated embed request"
        );

        let plan = self.builder.build(&request);
        debug!(args = plan.args().len(), "Built media tool invocation");
        Ok(PreparedEmbed { request, plan })
    }

    /// Check that the media tool is available, then plan the job
    ///
    /// A missing tool fails before the request is parsed or built.
    pub async fn prepare(&self, job: &EmbedJob) -> Result<PreparedEmbed, DomainError> {
        let tool = self.execute_port.locate_tool().await?;
        debug!(tool = %tool.display(), "Preflight check passed");
        self.plan(job)
    }

    /// Run a prepared job. Failures are terminal; nothing is retried.
    pub async fn run(&self, prepared: &PreparedEmbed) -> Result<EmbedReport, DomainError> {
        let outcome = self.execute_port.execute(&prepared.plan).await?;
        info!(output = %outcome.output_path.display(), "Subtitles embedded");
        Ok(prepared.report(true))
    }

    /// Preflight, plan and run in one step
    pub async fn execute(&self, job: &EmbedJob) -> Result<EmbedReport, DomainError> {
        let prepared = self.prepare(job).await?;
        self.run(&prepared).await
    }
}
