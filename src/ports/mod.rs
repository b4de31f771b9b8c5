// Ports - Interface definitions (contracts)

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::planner::CommandPlan;

/// Port for running the external media tool
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Resolve the tool on the search path, failing with `ToolNotFound`
    async fn locate_tool(&self) -> Result<PathBuf, DomainError>;

    /// Run a plan to completion
    ///
    /// Blocks until the tool exits. A non-zero exit becomes
    /// `ExternalToolFailure` carrying the captured diagnostic output.
    async fn execute(&self, plan: &CommandPlan) -> Result<ExecutionOutcome, DomainError>;
}

/// Result of a successful tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub output_path: PathBuf,
    /// Diagnostic output of the tool; not shown on success
    pub diagnostics: String,
}
