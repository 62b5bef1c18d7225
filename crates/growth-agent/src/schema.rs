//! Conformance check for generated payloads.
//!
//! Backed by the `jsonschema` crate, so any keyword a task schema uses is
//! enforced (`pattern`, `minLength`, `$ref` included), not just the shapes
//! strict structured outputs happen to need.

use growth_core::{GrowthError, GrowthResult};
use serde_json::Value;

/// Check `payload` against `schema`, reporting the first violation.
pub fn validate(schema: &Value, payload: &Value) -> GrowthResult<()> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| GrowthError::Schema(format!("invalid output schema: {e}")))?;
    validator
        .validate(payload)
        .map_err(|e| GrowthError::Schema(e.to_string()))
}
