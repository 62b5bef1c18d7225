use growth_agent::{ModelParameters, OutputSchema, RetryPolicy};
use std::time::Duration;

/// Substitution point every prompt template must contain.
pub const INPUT_PLACEHOLDER: &str = "{{transcript}}";

/// Resource budget for one task execution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskBudget {
    /// Hard wall-clock limit covering every attempt.
    pub timeout: Duration,
    /// Output token cap per generator call.
    pub max_output_tokens: u32,
    /// Attempt budget inside `timeout`.
    pub retry: RetryPolicy,
}

impl Default for TaskBudget {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(45),
            max_output_tokens: 2000,
            retry: RetryPolicy::default(),
        }
    }
}

/// Immutable definition of one generation task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    /// Unique within a registry; also the report slot key.
    pub name: String,
    /// Prompt text containing [`INPUT_PLACEHOLDER`].
    pub prompt_template: String,
    /// Schema every successful payload satisfies.
    pub output_schema: OutputSchema,
    /// Time, token and attempt limits.
    pub budget: TaskBudget,
    /// Passed through to the generator, never interpreted here.
    pub model: ModelParameters,
}

impl TaskSpec {
    /// A task with the default budget.
    pub fn new(
        name: impl Into<String>,
        prompt_template: impl Into<String>,
        output_schema: OutputSchema,
        model: ModelParameters,
    ) -> Self {
        Self {
            name: name.into(),
            prompt_template: prompt_template.into(),
            output_schema,
            budget: TaskBudget::default(),
            model,
        }
    }

    /// Set the wall-clock budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.budget.timeout = timeout;
        self
    }

    /// Set the output token cap.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.budget.max_output_tokens = max_output_tokens;
        self
    }

    /// Set the number of generator calls allowed.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.budget.retry.max_attempts = max_attempts;
        self
    }

    /// Substitute `input` into the template. Text inside `input` is never re-expanded.
    pub fn render_prompt(&self, input: &str) -> String {
        self.prompt_template.replacen(INPUT_PLACEHOLDER, input, 1)
    }
}
