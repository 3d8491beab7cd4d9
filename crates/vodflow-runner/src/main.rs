//! Encode-and-publish runner binary.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vodflow_client::{PlatformClient, TokenClient};
use vodflow_runner::{EncodeWorkflow, RunOutcome, RunnerConfig, TracingReporter};
use vodflow_storage::BlobUploader;

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vodflow=info".parse().unwrap())
        .add_directive("vodflow_runner=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting vodflow-runner");

    let config = match RunnerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.input_source() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!("Run failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: RunnerConfig) -> anyhow::Result<()> {
    let token = TokenClient::new()?.acquire(&config.auth()).await?;
    let client = PlatformClient::new(config.platform(), &token)?;
    let uploader = BlobUploader::new()?;

    let workflow = EncodeWorkflow::new(client, uploader, config, Arc::new(TracingReporter));
    match workflow.run().await? {
        RunOutcome::Published { job_name, urls } => {
            info!("Job {} published {} streaming URL(s)", job_name, urls.len());
            for url in urls {
                info!("{}", url);
            }
        }
        RunOutcome::Failed { job_name, error } => {
            error!(
                "Job {} failed: {}",
                job_name,
                error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no error detail".to_string())
            );
        }
        RunOutcome::Canceled { job_name } => {
            error!("Job {} was unexpectedly canceled", job_name);
        }
        RunOutcome::TimedOut {
            job_name,
            last_state,
        } => {
            info!(
                "Job {} is still in progress, current state is {}",
                job_name, last_state
            );
        }
    }
    Ok(())
}
