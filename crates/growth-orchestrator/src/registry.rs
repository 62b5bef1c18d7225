use crate::types::{TaskSpec, INPUT_PLACEHOLDER};
use growth_core::{GrowthError, GrowthResult};
use std::sync::Arc;

/// Ordered, read-only table of task definitions.
///
/// Built once at startup and shared by every request. Order is significant:
/// fan-out results are always returned in registry order.
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    specs: Vec<Arc<TaskSpec>>,
}

impl TaskRegistry {
    /// Validate and freeze a set of task specs.
    ///
    /// Rejects empty or duplicate names, templates without the input
    /// placeholder, and zero timeouts.
    pub fn new(specs: Vec<TaskSpec>) -> GrowthResult<Self> {
        let mut seen: Vec<&str> = Vec::with_capacity(specs.len());
        for spec in &specs {
            if spec.name.trim().is_empty() {
                return Err(GrowthError::Config("Task name must not be empty".into()));
            }
            if seen.contains(&spec.name.as_str()) {
                return Err(GrowthError::Config(format!(
                    "Duplicate task name '{}'",
                    spec.name
                )));
            }
            if !spec.prompt_template.contains(INPUT_PLACEHOLDER) {
                return Err(GrowthError::Config(format!(
                    "Prompt template for '{}' has no {INPUT_PLACEHOLDER} placeholder",
                    spec.name
                )));
            }
            if spec.budget.timeout.is_zero() {
                return Err(GrowthError::Config(format!(
                    "Task '{}' has a zero timeout",
                    spec.name
                )));
            }
            seen.push(&spec.name);
        }

        Ok(Self {
            specs: specs.into_iter().map(Arc::new).collect(),
        })
    }

    /// The task named `name`, if registered.
    pub fn get(&self, name: &str) -> Option<&Arc<TaskSpec>> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Like [`get`](Self::get) but fails with [`GrowthError::UnknownTask`].
    pub fn require(&self, name: &str) -> GrowthResult<&Arc<TaskSpec>> {
        self.get(name)
            .ok_or_else(|| GrowthError::UnknownTask(name.to_string()))
    }

    /// Task names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.name.as_str()).collect()
    }

    /// Specs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TaskSpec>> {
        self.specs.iter()
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no task is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
