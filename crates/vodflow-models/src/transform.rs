//! Encoding transforms: durable, named server-side encoding templates.

use serde::{Deserialize, Serialize};

/// Encoding preset descriptor carried by a transform output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Preset {
    /// One of the platform's built-in standard encoder presets.
    #[serde(rename_all = "camelCase")]
    BuiltInStandardEncoder { preset_name: String },
}

impl Preset {
    /// Built-in preset by name.
    pub fn built_in(preset_name: impl Into<String>) -> Self {
        Self::BuiltInStandardEncoder {
            preset_name: preset_name.into(),
        }
    }

    /// The adaptive-streaming ladder the default workflow encodes with.
    pub fn adaptive_streaming() -> Self {
        Self::built_in("AdaptiveStreaming")
    }
}

/// One output of a transform, holding the preset applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub preset: Preset,
}

/// Body for creating a transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub location: String,
    pub outputs: Vec<TransformOutput>,
}

impl TransformRequest {
    /// Request with a single output carrying the given preset.
    pub fn single(location: impl Into<String>, preset: Preset) -> Self {
        Self {
            location: location.into(),
            outputs: vec![TransformOutput { preset }],
        }
    }
}

/// Transform as reported by the platform. Identity is the name; transforms
/// are created once and reused across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub name: String,
    #[serde(default)]
    pub outputs: Vec<TransformOutput>,
}
