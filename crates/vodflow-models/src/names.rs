//! Per-run resource-name derivation.
//!
//! Every run generates one uniqueness token and derives all resource names
//! from it, so concurrent or repeated runs never collide and every name in
//! one run traces back to the same logical invocation.

use uuid::Uuid;

/// Generate a fresh uniqueness token. Must be called once per run and never
/// reused across runs.
pub fn new_uniqueness_token() -> String {
    Uuid::new_v4().to_string()
}

/// Names of the resources owned by one run, derived deterministically from
/// the prefix and the run's uniqueness token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunNames {
    pub input_asset: String,
    pub output_asset: String,
    pub job: String,
    pub locator: String,
}

impl RunNames {
    pub fn derive(prefix: &str, token: &str) -> Self {
        Self {
            input_asset: format!("{}-input-{}", prefix, token),
            output_asset: format!("{}-output-{}", prefix, token),
            job: format!("{}-job-{}", prefix, token),
            locator: format!("locator-{}", token),
        }
    }
}
