//! Job wire types and the job state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle state reported by the platform for an encoding job.
///
/// `Finished`, `Error` and `Canceled` are terminal; the platform never
/// updates a job again once it has reached one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JobState {
    /// Job accepted, waiting to be scheduled
    #[default]
    Queued,
    /// Job assigned to an encoding unit
    Scheduled,
    /// Job is actively encoding
    Processing,
    /// Job completed successfully
    Finished,
    /// Job failed
    Error,
    /// Job was canceled
    Canceled,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Queued => "Queued",
            JobState::Scheduled => "Scheduled",
            JobState::Processing => "Processing",
            JobState::Finished => "Finished",
            JobState::Error => "Error",
            JobState::Canceled => "Canceled",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Finished | JobState::Error | JobState::Canceled
        )
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unrecognized job state string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized job state: {0}")]
pub struct ParseJobStateError(pub String);

impl FromStr for JobState {
    type Err = ParseJobStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Queued" => Ok(JobState::Queued),
            "Scheduled" => Ok(JobState::Scheduled),
            "Processing" => Ok(JobState::Processing),
            "Finished" => Ok(JobState::Finished),
            "Error" => Ok(JobState::Error),
            "Canceled" => Ok(JobState::Canceled),
            other => Err(ParseJobStateError(other.to_string())),
        }
    }
}

/// Input fed to an encoding job.
///
/// Exactly one variant is active per run: either a list of remote URLs or a
/// reference to an already-populated input asset. Consumers match
/// exhaustively; there is no "both" or "neither" shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JobInput {
    /// Remote URL(s) the platform pulls directly.
    #[serde(rename_all = "camelCase")]
    Http { files: Vec<String> },
    /// Reference to an input asset uploaded ahead of submission.
    #[serde(rename_all = "camelCase")]
    Asset { asset_name: String },
}

impl JobInput {
    /// Build an HTTP input wrapping a single remote URL, unchanged.
    pub fn http(url: impl Into<String>) -> Self {
        Self::Http {
            files: vec![url.into()],
        }
    }

    /// Build an asset-reference input.
    pub fn asset(name: impl Into<String>) -> Self {
        Self::Asset {
            asset_name: name.into(),
        }
    }

    /// Name of the backing input asset, when there is one.
    pub fn asset_name(&self) -> Option<&str> {
        match self {
            JobInput::Asset { asset_name } => Some(asset_name),
            JobInput::Http { .. } => None,
        }
    }
}

/// Structured error detail attached to a failed job output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.code.as_deref().unwrap_or("Unknown"),
            self.message.as_deref().unwrap_or("no detail")
        )
    }
}

/// One output target of a job. Submission bodies carry only the asset name;
/// responses may carry an error detail once the job has failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutput {
    pub asset_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobError>,
}

impl JobOutput {
    /// Output directed at the named asset.
    pub fn for_asset(asset_name: impl Into<String>) -> Self {
        Self {
            asset_name: asset_name.into(),
            error: None,
        }
    }
}

/// Body for creating a job: one input, exactly one output asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub input: JobInput,
    pub outputs: Vec<JobOutput>,
}

impl JobRequest {
    pub fn new(input: JobInput, output_asset_name: impl Into<String>) -> Self {
        Self {
            input,
            outputs: vec![JobOutput::for_asset(output_asset_name)],
        }
    }
}

/// Job as reported by the platform. Identity is `(transform name, job name)`;
/// only the job name travels in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub state: JobState,
    pub input: JobInput,
    #[serde(default)]
    pub outputs: Vec<JobOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Job {
    /// Error detail of the first output, present once the job has failed.
    pub fn error_detail(&self) -> Option<&JobError> {
        self.outputs.first().and_then(|o| o.error.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(JobState::Finished.is_terminal());
        assert!(JobState::Error.is_terminal());
        assert!(JobState::Canceled.is_terminal());
        assert!(!JobState::Queued.is_terminal());
        assert!(!JobState::Scheduled.is_terminal());
        assert!(!JobState::Processing.is_terminal());
    }

    #[test]
    fn test_state_round_trip() {
        for state in [
            JobState::Queued,
            JobState::Scheduled,
            JobState::Processing,
            JobState::Finished,
            JobState::Error,
            JobState::Canceled,
        ] {
            assert_eq!(state.as_str().parse::<JobState>(), Ok(state));
        }
        assert!("Paused".parse::<JobState>().is_err());
    }

    #[test]
    fn test_job_input_is_tagged() {
        let http = serde_json::to_value(JobInput::http("https://example.com/in.mp4")).unwrap();
        assert_eq!(http["type"], "Http");
        assert_eq!(http["files"][0], "https://example.com/in.mp4");

        let asset = serde_json::to_value(JobInput::asset("demo-input-1")).unwrap();
        assert_eq!(asset["type"], "Asset");
        assert_eq!(asset["assetName"], "demo-input-1");
    }

    #[test]
    fn test_job_input_asset_name() {
        assert_eq!(JobInput::asset("a").asset_name(), Some("a"));
        assert_eq!(JobInput::http("https://x/y.mp4").asset_name(), None);
    }

    #[test]
    fn test_job_request_has_single_output() {
        let request = JobRequest::new(JobInput::http("https://x/y.mp4"), "out-asset");
        assert_eq!(request.outputs.len(), 1);
        assert_eq!(request.outputs[0].asset_name, "out-asset");
        assert!(request.outputs[0].error.is_none());
    }

    #[test]
    fn test_error_detail_reads_first_output() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "name": "j1",
            "state": "Error",
            "input": {"type": "Http", "files": ["https://x/y.mp4"]},
            "outputs": [
                {"assetName": "out", "error": {"code": "EncodeFailed", "message": "boom"}}
            ]
        }))
        .unwrap();

        let detail = job.error_detail().expect("error detail");
        assert_eq!(detail.code.as_deref(), Some("EncodeFailed"));
        assert_eq!(detail.to_string(), "EncodeFailed: boom");
    }
}
