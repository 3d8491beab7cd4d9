//! Progress reporting seam between the workflow and any presentation layer.
//!
//! The orchestrator only ever talks to the [`ProgressReporter`] trait; it
//! never references a concrete display technology. The binary installs a
//! tracing-backed reporter.

use std::fmt;

use tracing::info;

/// Workflow stage a status message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    EnsureTransform,
    ResolveInput,
    Upload,
    CreateOutput,
    SubmitJob,
    Poll,
    Publish,
    Cleanup,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::EnsureTransform => "ensure_transform",
            Stage::ResolveInput => "resolve_input",
            Stage::Upload => "upload",
            Stage::CreateOutput => "create_output",
            Stage::SubmitJob => "submit_job",
            Stage::Poll => "poll",
            Stage::Publish => "publish",
            Stage::Cleanup => "cleanup",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Write-only sink for human-readable status lines, one per workflow stage
/// transition plus one per observed job state.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, stage: Stage, message: &str);
}

/// Reporter that writes status lines to the tracing log.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, stage: Stage, message: &str) {
        info!(stage = %stage, "{}", message);
    }
}
