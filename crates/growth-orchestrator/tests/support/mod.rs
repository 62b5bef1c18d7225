//! Scripted generator shared by the orchestration integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use growth_agent::{Generation, GenerationRequest, Generator, ModelParameters, OutputSchema};
use growth_core::{GrowthError, GrowthResult};
use growth_orchestrator::{TaskRegistry, TaskSpec};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct Step {
    pub delay: Duration,
    pub result: Result<Value, String>,
}

/// Replies per task name from a queue; the last step repeats once the queue
/// is down to one entry. Unscripted tasks fail.
#[derive(Default)]
pub struct ScriptedGenerator {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: Mutex<HashMap<String, u32>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(self, task: &str, payload: Value) -> Self {
        self.step(task, Duration::ZERO, Ok(payload))
    }

    pub fn fail(self, task: &str, reason: &str) -> Self {
        self.step(task, Duration::ZERO, Err(reason.to_string()))
    }

    pub fn slow(self, task: &str, delay: Duration, payload: Value) -> Self {
        self.step(task, delay, Ok(payload))
    }

    pub fn step(self, task: &str, delay: Duration, result: Result<Value, String>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(task.to_string())
            .or_default()
            .push_back(Step { delay, result });
        self
    }

    /// Append replies for later calls while the generator is in use.
    pub fn push(&self, task: &str, result: Result<Value, String>) {
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.entry(task.to_string()).or_default();
        // Drop the repeating tail so the new step is served next.
        if queue.len() == 1 {
            queue.clear();
        }
        queue.push_back(Step {
            delay: Duration::ZERO,
            result,
        });
    }

    pub fn calls(&self, task: &str) -> u32 {
        self.calls.lock().unwrap().get(task).copied().unwrap_or(0)
    }

    fn next_step(&self, task: &str) -> Option<Step> {
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(task)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest<'_>) -> GrowthResult<Generation> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(request.task.to_string())
            .or_default() += 1;

        let step = self
            .next_step(request.task)
            .ok_or_else(|| GrowthError::Generation(format!("no script for {}", request.task)))?;

        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }

        match step.result {
            Ok(payload) => Ok(Generation {
                payload,
                input_tokens: request.prompt.len() as u64,
                output_tokens: 10,
            }),
            Err(reason) => Err(GrowthError::Generation(reason)),
        }
    }
}

/// A registry of plain tasks named `names`, each with `timeout`.
pub fn registry(names: &[&str], timeout: Duration) -> TaskRegistry {
    TaskRegistry::new(
        names
            .iter()
            .map(|name| {
                TaskSpec::new(
                    *name,
                    format!("Task {name}:\n{{{{transcript}}}}"),
                    OutputSchema::strict(
                        format!("{name}_output"),
                        serde_json::json!({"type": "object"}),
                    ),
                    ModelParameters::new("gpt-5"),
                )
                .with_timeout(timeout)
            })
            .collect(),
    )
    .unwrap()
}

pub const TRANSCRIPT: &str = "Today we talk about keeping a sourdough starter alive \
    while working full time, and why feeding schedules matter less than temperature.";
