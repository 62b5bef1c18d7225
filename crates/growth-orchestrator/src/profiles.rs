use crate::prompts::{
    compose, AMPLIFY_PROMPT, HOOK_PROMPT, INSIGHT_PROMPT, PULSE_PROMPT, SPOTLIGHT_PROMPT,
};
use crate::registry::TaskRegistry;
use crate::schemas;
use crate::types::TaskSpec;
use growth_agent::{ModelParameters, ReasoningEffort, Verbosity};
use growth_core::GrowthResult;
use std::time::Duration;

/// Model used by every default task unless overridden.
pub const DEFAULT_MODEL: &str = "gpt-5";

/// Names of the default tasks, in registry order.
pub const DEFAULT_TASKS: [&str; 5] = ["insight", "hook", "spotlight", "amplify", "pulse"];

/// Create the default growth-plan task specs.
/// Uses `model` for every task, adjusting sampling and budget per task.
pub fn default_specs(model: &str) -> Vec<TaskSpec> {
    vec![
        insight_spec(model),
        hook_spec(model),
        spotlight_spec(model),
        amplify_spec(model),
        pulse_spec(model),
    ]
}

/// The default registry with [`DEFAULT_MODEL`].
pub fn default_registry() -> GrowthResult<TaskRegistry> {
    TaskRegistry::new(default_specs(DEFAULT_MODEL))
}

fn insight_spec(model: &str) -> TaskSpec {
    let params = ModelParameters::new(model)
        .with_temperature(0.7)
        .with_reasoning_effort(ReasoningEffort::Medium)
        .with_verbosity(Verbosity::Medium);

    TaskSpec::new(
        "insight",
        compose("Insight", INSIGHT_PROMPT),
        schemas::insight(),
        params,
    )
    .with_max_output_tokens(2000)
    .with_timeout(Duration::from_secs(45))
}

fn hook_spec(model: &str) -> TaskSpec {
    let params = ModelParameters::new(model)
        .with_temperature(0.7)
        .with_reasoning_effort(ReasoningEffort::Medium)
        .with_verbosity(Verbosity::Low);

    TaskSpec::new("hook", compose("Hook", HOOK_PROMPT), schemas::hook(), params)
        .with_max_output_tokens(1000)
        .with_timeout(Duration::from_secs(40))
}

fn spotlight_spec(model: &str) -> TaskSpec {
    let params = ModelParameters::new(model)
        .with_temperature(0.6)
        .with_reasoning_effort(ReasoningEffort::Low)
        .with_verbosity(Verbosity::Low);

    TaskSpec::new(
        "spotlight",
        compose("Spotlight", SPOTLIGHT_PROMPT),
        schemas::spotlight(),
        params,
    )
    .with_max_output_tokens(1500)
    .with_timeout(Duration::from_secs(40))
}

fn amplify_spec(model: &str) -> TaskSpec {
    // Community research needs the deepest reasoning of the five.
    let params = ModelParameters::new(model)
        .with_temperature(0.5)
        .with_reasoning_effort(ReasoningEffort::High)
        .with_verbosity(Verbosity::Medium);

    TaskSpec::new(
        "amplify",
        compose("Amplify", AMPLIFY_PROMPT),
        schemas::amplify(),
        params,
    )
    .with_max_output_tokens(2500)
    .with_timeout(Duration::from_secs(60))
}

fn pulse_spec(model: &str) -> TaskSpec {
    let params = ModelParameters::new(model)
        .with_temperature(0.6)
        .with_reasoning_effort(ReasoningEffort::Medium)
        .with_verbosity(Verbosity::Low);

    TaskSpec::new("pulse", compose("Pulse", PULSE_PROMPT), schemas::pulse(), params)
        .with_max_output_tokens(1500)
        .with_timeout(Duration::from_secs(45))
}
