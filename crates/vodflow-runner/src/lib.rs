//! Encode-and-publish workflow runner.
//!
//! One run: ensure the encoding transform exists, resolve the job input
//! (remote URL or uploaded local file), create an output asset, submit the
//! job, poll it to a terminal state or a wall-clock deadline, then publish
//! streaming URLs on success. Strictly linear; every remote call is awaited
//! before the next one is issued.

pub mod config;
pub mod error;
pub mod poller;
pub mod progress;
pub mod workflow;

pub use config::{InputSource, RunnerConfig};
pub use error::{RunnerError, RunnerResult};
pub use poller::{wait_for_job, PollOptions, WaitOutcome};
pub use progress::{ProgressReporter, Stage, TracingReporter};
pub use workflow::{EncodeWorkflow, RunOutcome};
