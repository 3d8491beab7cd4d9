//! Bounded job polling.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::warn;

use vodflow_client::ClientResult;
use vodflow_models::Job;

use crate::error::RunnerResult;
use crate::progress::{ProgressReporter, Stage};

/// Polling cadence and wall-clock bound.
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    /// Delay between consecutive status fetches
    pub interval: Duration,
    /// Wall-clock bound on the whole polling phase
    pub deadline: Duration,
}

/// How the polling phase ended.
#[derive(Debug)]
pub enum WaitOutcome {
    /// Job reached a terminal state (Finished, Error or Canceled).
    Terminal(Job),
    /// Deadline passed while the job was still non-terminal; carries the
    /// last observed job so callers never confuse a timeout with completion.
    TimedOut(Job),
}

impl WaitOutcome {
    pub fn job(&self) -> &Job {
        match self {
            WaitOutcome::Terminal(job) | WaitOutcome::TimedOut(job) => job,
        }
    }
}

/// Poll the job until it is terminal or the deadline passes.
///
/// Always fetches at least once and never fetches again after observing a
/// terminal state. The deadline is only checked after a fetch, so the
/// phase overruns it by at most one interval plus one fetch. A failed fetch
/// propagates immediately; there is no transport-level retry.
pub async fn wait_for_job<F, Fut>(
    fetch: F,
    options: &PollOptions,
    reporter: &dyn ProgressReporter,
) -> RunnerResult<WaitOutcome>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ClientResult<Job>>,
{
    let deadline = Instant::now() + options.deadline;
    loop {
        let job = fetch().await?;
        reporter.report(Stage::Poll, job.state.as_str());

        if job.state.is_terminal() {
            return Ok(WaitOutcome::Terminal(job));
        }
        if Instant::now() > deadline {
            warn!("Job {} timed out in state {}", job.name, job.state);
            return Ok(WaitOutcome::TimedOut(job));
        }
        tokio::time::sleep(options.interval).await;
    }
}
