use crate::types::TaskSpec;
use growth_agent::{generate_with_retry, GenerationRequest, Generator};
use growth_core::{GrowthError, ResourceUsage, TaskOutcome};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Runs one task against the generator and packages the result.
///
/// Never fails: every generator error, schema violation, and timeout comes
/// back as a failed [`TaskOutcome`]. Holds no per-run state, so one runner
/// serves any number of overlapping requests.
#[derive(Clone)]
pub struct TaskRunner {
    generator: Arc<dyn Generator>,
}

impl TaskRunner {
    /// A runner that calls `generator` for every task.
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Render the prompt, call the generator within the task's time budget,
    /// and return the outcome.
    ///
    /// When the budget runs out the in-flight call is dropped and the outcome
    /// fails with reason `"timeout"`. A late result is discarded.
    pub async fn run(&self, spec: &TaskSpec, input: &str) -> TaskOutcome {
        let start = Instant::now();
        let prompt = spec.render_prompt(input);
        let request = GenerationRequest {
            task: &spec.name,
            prompt: &prompt,
            schema: &spec.output_schema,
            parameters: &spec.model,
            max_output_tokens: spec.budget.max_output_tokens,
            timeout: spec.budget.timeout,
        };

        info!(task = %spec.name, timeout_ms = spec.budget.timeout.as_millis() as u64, "Task started");

        let mut usage = ResourceUsage::default();
        let result = tokio::time::timeout(
            spec.budget.timeout,
            generate_with_retry(self.generator.as_ref(), request, &spec.budget.retry, &mut usage),
        )
        .await
        .unwrap_or(Err(GrowthError::Timeout));

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(generation) => {
                info!(
                    task = %spec.name,
                    elapsed_ms,
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "Task succeeded"
                );
                TaskOutcome::success(&spec.name, generation.payload, elapsed_ms, usage)
            }
            Err(e) => {
                warn!(task = %spec.name, elapsed_ms, error = %e, "Task failed");
                TaskOutcome::failure(&spec.name, e.to_string(), elapsed_ms, usage)
            }
        }
    }
}
