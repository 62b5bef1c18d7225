use crate::backends::openai::OpenAiGenerator;
use crate::config::{GeneratorConfig, ModelParameters};
use async_trait::async_trait;
use growth_core::GrowthResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Named strict JSON schema a generated payload must satisfy.
///
/// Serializes to the `json_schema` object of an OpenAI structured-output request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Schema name sent to the provider.
    pub name: String,
    /// Ask the provider to enforce the schema during decoding.
    #[serde(default = "default_strict")]
    pub strict: bool,
    /// The JSON Schema document.
    pub schema: serde_json::Value,
}

fn default_strict() -> bool {
    true
}

impl OutputSchema {
    /// A strict schema named `name`.
    pub fn strict(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            strict: true,
            schema,
        }
    }
}

/// Everything a generator needs for one call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Task name, for logging and routing only.
    pub task: &'a str,
    /// Fully rendered prompt.
    pub prompt: &'a str,
    /// Shape the payload must have.
    pub schema: &'a OutputSchema,
    /// Model settings for this task.
    pub parameters: &'a ModelParameters,
    /// Output token cap.
    pub max_output_tokens: u32,
    /// Remaining time budget; backends should not wait longer than this.
    pub timeout: Duration,
}

/// A structured payload plus the token counts the backend reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Schema-conforming payload.
    pub payload: serde_json::Value,
    /// Prompt tokens billed.
    pub input_tokens: u64,
    /// Completion tokens billed.
    pub output_tokens: u64,
}

/// Given a prompt and a strict output schema, return a structured result or fail.
///
/// Implementations own schema conformance: a returned payload is trusted as-is.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce one payload for `request`.
    async fn generate(&self, request: GenerationRequest<'_>) -> GrowthResult<Generation>;
}

/// Build the process-wide generator client from configuration.
pub fn build_generator(config: GeneratorConfig) -> GrowthResult<Arc<dyn Generator>> {
    Ok(Arc::new(OpenAiGenerator::new(config)?))
}
