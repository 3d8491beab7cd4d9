//! The linear encode-and-publish workflow.

use std::sync::Arc;

use tracing::info;

use vodflow_client::PlatformClient;
use vodflow_models::{
    new_uniqueness_token, playable_url, JobError, JobInput, JobRequest, JobState, Preset, RunNames,
    SasRequest, StreamingLocator, Transform, TransformRequest, DEFAULT_STREAMING_ENDPOINT,
};
use vodflow_storage::BlobUploader;

use crate::config::{InputSource, RunnerConfig};
use crate::error::{RunnerError, RunnerResult};
use crate::poller::{wait_for_job, WaitOutcome};
use crate::progress::{ProgressReporter, Stage};

/// How one run ended. Terminal job failure, cancellation and timeout are
/// outcomes, not errors; only transport/configuration problems propagate as
/// `RunnerError`.
#[derive(Debug)]
pub enum RunOutcome {
    /// Job finished; streaming URLs are live and cleanup ran.
    Published { job_name: String, urls: Vec<String> },
    /// Job ended in the Error state; detail from the first output.
    Failed {
        job_name: String,
        error: Option<JobError>,
    },
    /// Job was canceled out from under the run.
    Canceled { job_name: String },
    /// Deadline passed while the job was still non-terminal. Distinct from
    /// every terminal outcome; no state comparison against the clock needed.
    TimedOut {
        job_name: String,
        last_state: JobState,
    },
}

/// One run of the encode-and-publish workflow. Owns the client handle, the
/// uploader and the injected progress reporter; holds no other state between
/// stages.
pub struct EncodeWorkflow {
    client: PlatformClient,
    uploader: BlobUploader,
    config: RunnerConfig,
    reporter: Arc<dyn ProgressReporter>,
}

impl EncodeWorkflow {
    pub fn new(
        client: PlatformClient,
        uploader: BlobUploader,
        config: RunnerConfig,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            client,
            uploader,
            config,
            reporter,
        }
    }

    /// Run the workflow end to end: transform, input, output asset, job,
    /// poll, publish, cleanup. Stages run strictly in order; a failure at
    /// any stage aborts the run and leaves already-created resources behind.
    pub async fn run(&self) -> RunnerResult<RunOutcome> {
        let token = new_uniqueness_token();
        let names = RunNames::derive(&self.config.name_prefix, &token);
        info!("Starting run {}", token);

        self.reporter
            .report(Stage::EnsureTransform, "creating encoding transform...");
        self.ensure_transform().await?;

        self.reporter
            .report(Stage::ResolveInput, "resolving job input...");
        let input = self.resolve_input(&names).await?;

        self.reporter
            .report(Stage::CreateOutput, "creating output asset...");
        let output = self.client.create_asset(&names.output_asset).await?;

        self.reporter.report(Stage::SubmitJob, "submitting job...");
        let request = JobRequest::new(input.clone(), &output.name);
        self.client
            .create_job(&self.config.transform_name, &names.job, &request)
            .await?;

        self.reporter
            .report(Stage::Poll, "waiting for job to finish...");
        let outcome = wait_for_job(
            || self.client.get_job(&self.config.transform_name, &names.job),
            &self.config.poll_options(),
            self.reporter.as_ref(),
        )
        .await?;

        self.conclude(outcome, &input, &names).await
    }

    /// Guarantee the durable encoding transform exists. Idempotent; safe to
    /// call every run.
    async fn ensure_transform(&self) -> RunnerResult<Transform> {
        if let Some(transform) = self.client.get_transform(&self.config.transform_name).await? {
            return Ok(transform);
        }
        let request = TransformRequest::single(
            &self.config.location,
            Preset::built_in(&self.config.preset_name),
        );
        Ok(self
            .client
            .create_transform(&self.config.transform_name, &request)
            .await?)
    }

    /// Produce the job input: wrap a remote URL unchanged, or create an
    /// input asset, obtain a one-hour read-write delegated URL and upload
    /// the local file into it. Upload failure aborts the run; a half-filled
    /// asset is never submitted.
    async fn resolve_input(&self, names: &RunNames) -> RunnerResult<JobInput> {
        match self.config.input_source()? {
            InputSource::RemoteUrl(url) => Ok(JobInput::http(url)),
            InputSource::LocalFile(path) => {
                self.client.create_asset(&names.input_asset).await?;

                let sas = self
                    .client
                    .list_container_sas(&names.input_asset, &SasRequest::read_write(1))
                    .await?;
                let upload_url = sas
                    .first_url()
                    .ok_or_else(|| RunnerError::MissingSasUrl(names.input_asset.clone()))?;

                let blob_name = BlobUploader::blob_name_for(&path);
                self.reporter.report(Stage::Upload, "uploading to blob...");
                self.uploader
                    .upload_file(upload_url, &blob_name, &path)
                    .await?;

                Ok(JobInput::asset(&names.input_asset))
            }
        }
    }

    /// Turn the polling outcome into a run outcome: publish streaming URLs
    /// and clean up on Finished, surface detail otherwise.
    async fn conclude(
        &self,
        outcome: WaitOutcome,
        input: &JobInput,
        names: &RunNames,
    ) -> RunnerResult<RunOutcome> {
        match outcome {
            WaitOutcome::Terminal(job) if job.state == JobState::Finished => {
                self.reporter
                    .report(Stage::Publish, "creating streaming locator...");
                self.client
                    .create_streaming_locator(
                        &names.locator,
                        &StreamingLocator::clear(&names.output_asset),
                    )
                    .await?;

                let endpoint = self
                    .client
                    .get_streaming_endpoint(DEFAULT_STREAMING_ENDPOINT)
                    .await?;
                let paths = self.client.list_streaming_paths(&names.locator).await?;
                let urls: Vec<String> = paths
                    .primary_paths()
                    .map(|p| playable_url(&endpoint.host_name, p))
                    .collect();
                for url in &urls {
                    self.reporter.report(Stage::Publish, url);
                }

                // The output asset outlives the run so the URLs stay playable;
                // the job record and any input asset do not.
                self.reporter.report(Stage::Cleanup, "deleting job...");
                self.client
                    .delete_job(&self.config.transform_name, &names.job)
                    .await?;
                if let JobInput::Asset { asset_name } = input {
                    self.client.delete_asset(asset_name).await?;
                }

                self.reporter.report(Stage::Done, "done");
                Ok(RunOutcome::Published {
                    job_name: job.name,
                    urls,
                })
            }
            WaitOutcome::Terminal(job) if job.state == JobState::Error => {
                let error = job.error_detail().cloned();
                let detail = error
                    .as_ref()
                    .map(JobError::to_string)
                    .unwrap_or_else(|| "no error detail".to_string());
                self.reporter
                    .report(Stage::Done, &format!("{} failed: {}", job.name, detail));
                Ok(RunOutcome::Failed {
                    job_name: job.name,
                    error,
                })
            }
            WaitOutcome::Terminal(job) => {
                self.reporter.report(
                    Stage::Done,
                    &format!("{} was unexpectedly canceled", job.name),
                );
                Ok(RunOutcome::Canceled { job_name: job.name })
            }
            WaitOutcome::TimedOut(job) => {
                self.reporter.report(
                    Stage::Done,
                    &format!(
                        "{} is still in progress, current state is {}",
                        job.name, job.state
                    ),
                );
                Ok(RunOutcome::TimedOut {
                    job_name: job.name,
                    last_state: job.state,
                })
            }
        }
    }
}
