use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Informational resource counters for one task execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Prompt tokens consumed, summed over attempts.
    pub input_tokens: u64,
    /// Completion tokens produced, summed over attempts.
    pub output_tokens: u64,
    /// Number of generator calls made.
    pub attempts: u32,
}

impl ResourceUsage {
    /// Fold another attempt's counters into this one.
    pub fn absorb(&mut self, other: ResourceUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.attempts += other.attempts;
    }
}

/// Terminal status of a task execution. Exactly one of payload or reason exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The generator produced a conforming payload.
    Succeeded {
        /// Structured result, stored and forwarded without interpretation.
        payload: serde_json::Value,
    },
    /// The generator failed, timed out, or produced a non-conforming payload.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Result of a single task runner invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// Name of the task spec that produced this outcome.
    pub task: String,
    /// Success payload or failure reason.
    #[serde(flatten)]
    pub status: OutcomeStatus,
    /// Wall-clock time spent in the runner, in milliseconds.
    pub elapsed_ms: u64,
    /// Token and attempt counters.
    pub usage: ResourceUsage,
    /// When the outcome reached its terminal state.
    pub finished_at: DateTime<Utc>,
}

impl TaskOutcome {
    /// Build a successful outcome.
    pub fn success(
        task: impl Into<String>,
        payload: serde_json::Value,
        elapsed_ms: u64,
        usage: ResourceUsage,
    ) -> Self {
        Self {
            task: task.into(),
            status: OutcomeStatus::Succeeded { payload },
            elapsed_ms,
            usage,
            finished_at: Utc::now(),
        }
    }

    /// Build a failed outcome.
    pub fn failure(
        task: impl Into<String>,
        reason: impl Into<String>,
        elapsed_ms: u64,
        usage: ResourceUsage,
    ) -> Self {
        Self {
            task: task.into(),
            status: OutcomeStatus::Failed {
                reason: reason.into(),
            },
            elapsed_ms,
            usage,
            finished_at: Utc::now(),
        }
    }

    /// Whether a payload was produced.
    pub fn succeeded(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded { .. })
    }

    /// The payload, on success.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match &self.status {
            OutcomeStatus::Succeeded { payload } => Some(payload),
            OutcomeStatus::Failed { .. } => None,
        }
    }

    /// The reason, on failure.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Succeeded { .. } => None,
            OutcomeStatus::Failed { reason } => Some(reason),
        }
    }
}

/// Lifecycle of one task slot.
///
/// `Pending -> Running -> {Succeeded, Failed}`; a re-run moves a terminal slot
/// back through `Running`. Reports only ever contain terminal slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    /// Not started yet.
    Pending,
    /// Generator call in flight.
    Running,
    /// Holds a payload.
    Succeeded,
    /// Holds a failure reason.
    Failed,
}

impl SlotState {
    /// Succeeded or failed.
    pub fn is_terminal(self) -> bool {
        matches!(self, SlotState::Succeeded | SlotState::Failed)
    }
}

impl std::fmt::Display for SlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotState::Pending => write!(f, "pending"),
            SlotState::Running => write!(f, "running"),
            SlotState::Succeeded => write!(f, "succeeded"),
            SlotState::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_payload_only() {
        let outcome = TaskOutcome::success(
            "hook",
            serde_json::json!({"title_options": []}),
            12,
            ResourceUsage::default(),
        );
        assert!(outcome.succeeded());
        assert!(outcome.payload().is_some());
        assert!(outcome.failure_reason().is_none());
    }

    #[test]
    fn test_failure_has_reason_only() {
        let outcome = TaskOutcome::failure("hook", "timeout", 40_000, ResourceUsage::default());
        assert!(!outcome.succeeded());
        assert!(outcome.payload().is_none());
        assert_eq!(outcome.failure_reason(), Some("timeout"));
    }

    #[test]
    fn test_outcome_serializes_flat_status() {
        let outcome = TaskOutcome::failure("pulse", "boom", 5, ResourceUsage::default());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "boom");
        assert_eq!(json["task"], "pulse");
        assert!(json.get("payload").is_none());
    }

    #[test]
    fn test_usage_absorb() {
        let mut usage = ResourceUsage {
            input_tokens: 10,
            output_tokens: 5,
            attempts: 1,
        };
        usage.absorb(ResourceUsage {
            input_tokens: 3,
            output_tokens: 2,
            attempts: 1,
        });
        assert_eq!(usage.input_tokens, 13);
        assert_eq!(usage.output_tokens, 7);
        assert_eq!(usage.attempts, 2);
    }

    #[test]
    fn test_slot_state_terminal() {
        assert!(!SlotState::Pending.is_terminal());
        assert!(!SlotState::Running.is_terminal());
        assert!(SlotState::Succeeded.is_terminal());
        assert_eq!(SlotState::Failed.to_string(), "failed");
    }
}
