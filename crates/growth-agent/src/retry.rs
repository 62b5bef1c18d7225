use crate::generator::{Generation, GenerationRequest, Generator};
use growth_core::{GrowthError, GrowthResult, ResourceUsage};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Attempt budget for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total generator calls allowed, including the first. Never less than one.
    pub max_attempts: u32,
    /// Base delay in milliseconds for exponential backoff.
    pub backoff_base_ms: u64,
    /// Maximum delay in milliseconds (cap for exponential backoff).
    pub backoff_max_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_base_ms: 500,
            backoff_max_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    /// Set the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Backoff before retry number `attempt` (0-based), capped at `backoff_max_ms`.
    pub fn backoff_ms(&self, attempt: u32) -> u64 {
        let delay = self
            .backoff_base_ms
            .saturating_mul(2u64.saturating_pow(attempt));
        delay.min(self.backoff_max_ms)
    }
}

/// Call the generator until it succeeds, fails permanently, or the attempt
/// budget runs out.
///
/// `usage` is updated after every attempt so the caller keeps accurate counters
/// even when this future is dropped by an outer timeout.
pub async fn generate_with_retry(
    generator: &dyn Generator,
    request: GenerationRequest<'_>,
    policy: &RetryPolicy,
    usage: &mut ResourceUsage,
) -> GrowthResult<Generation> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_err: Option<GrowthError> = None;

    for attempt in 0..max_attempts {
        if attempt > 0 {
            let delay = policy.backoff_ms(attempt - 1);
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        usage.attempts += 1;
        match generator.generate(request).await {
            Ok(generation) => {
                usage.input_tokens += generation.input_tokens;
                usage.output_tokens += generation.output_tokens;
                return Ok(generation);
            }
            Err(e) if e.is_transient() && attempt + 1 < max_attempts => {
                warn!(
                    task = %request.task,
                    attempt = attempt + 1,
                    error = %e,
                    "Transient generation error, retrying"
                );
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err.unwrap_or_else(|| GrowthError::Generation("attempt budget exhausted".into())))
}
