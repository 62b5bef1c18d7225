use crate::registry::TaskRegistry;
use crate::runner::TaskRunner;
use futures_util::future::join_all;
use growth_core::{ResourceUsage, TaskOutcome};
use std::sync::Arc;
use tracing::{error, info};

/// Runs every registered task concurrently over one shared input.
///
/// Join-all, not race: `run_all` returns only after every task has reached a
/// terminal state, and a failure in one task never cancels its siblings.
#[derive(Clone)]
pub struct FanOutScheduler {
    runner: TaskRunner,
}

impl FanOutScheduler {
    /// A scheduler that drives every task through `runner`.
    pub fn new(runner: TaskRunner) -> Self {
        Self { runner }
    }

    /// Launch one runner per task and collect outcomes in registry order.
    ///
    /// Each task runs on its own tokio task so a panic is confined to that
    /// task's outcome.
    pub async fn run_all(&self, registry: &TaskRegistry, input: Arc<str>) -> Vec<TaskOutcome> {
        info!(tasks = registry.len(), input_chars = input.chars().count(), "Fan-out started");

        let handles: Vec<_> = registry
            .iter()
            .map(|spec| {
                let runner = self.runner.clone();
                let spec = Arc::clone(spec);
                let input = Arc::clone(&input);
                tokio::spawn(async move { runner.run(&spec, &input).await })
            })
            .collect();

        let joined = join_all(handles).await;

        let outcomes: Vec<TaskOutcome> = registry
            .iter()
            .zip(joined)
            .map(|(spec, joined)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(task = %spec.name, error = %e, "Task aborted");
                    TaskOutcome::failure(
                        &spec.name,
                        format!("task aborted: {e}"),
                        0,
                        ResourceUsage::default(),
                    )
                }
            })
            .collect();

        let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
        info!(
            succeeded,
            failed = outcomes.len() - succeeded,
            "Fan-out complete"
        );

        outcomes
    }
}
