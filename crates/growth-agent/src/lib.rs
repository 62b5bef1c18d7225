//! Schema-validated generation for the growth-plan orchestrator.
//!
//! The orchestrator only sees the [`Generator`] trait: given a prompt and a
//! strict output schema, return a structured payload or fail. This crate
//! provides that contract, the per-task [`ModelParameters`] passed through it,
//! an OpenAI-compatible backend, and the attempt-budget helper used by the
//! task runner.

/// Generator backends.
pub mod backends;
/// Generator and per-task model configuration.
pub mod config;
/// The generator contract.
pub mod generator;
/// Attempt budget and backoff.
pub mod retry;
/// Payload conformance against a JSON schema.
pub mod schema;

pub use backends::OpenAiGenerator;
pub use config::{GeneratorConfig, ModelParameters, Provider, ReasoningEffort, Verbosity};
pub use generator::{build_generator, Generation, GenerationRequest, Generator, OutputSchema};
pub use retry::{generate_with_retry, RetryPolicy};
