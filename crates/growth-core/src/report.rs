use crate::outcome::{ResourceUsage, SlotState, TaskOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Success/failure counts over every configured task.
///
/// `succeeded + failed == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Slots holding a payload.
    pub succeeded: usize,
    /// Slots without one.
    pub failed: usize,
    /// Configured tasks.
    pub total: usize,
}

impl Tally {
    /// Count slots holding a payload as succeeded, the rest as failed.
    pub fn from_slots(slots: &BTreeMap<String, Option<serde_json::Value>>) -> Self {
        let succeeded = slots.values().filter(|v| v.is_some()).count();
        Self {
            succeeded,
            failed: slots.len() - succeeded,
            total: slots.len(),
        }
    }
}

/// One entry of the report's error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskError {
    /// Task that failed.
    pub task: String,
    /// Failure reason; `timeout` when the budget ran out.
    pub reason: String,
    /// When the failure was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Audit fingerprint of the input a report was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFingerprint {
    /// Length in characters.
    pub chars: usize,
    /// Length in UTF-8 bytes.
    pub bytes: usize,
    /// Hex-encoded SHA-256 of the input.
    pub sha256: String,
}

impl InputFingerprint {
    /// Fingerprint `input`.
    pub fn of(input: &str) -> Self {
        Self {
            chars: input.chars().count(),
            bytes: input.len(),
            sha256: hex::encode(Sha256::digest(input.as_bytes())),
        }
    }
}

/// Per-task timing and usage kept for information only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMetrics {
    /// Wall-clock time of the last run.
    pub elapsed_ms: u64,
    /// Attempts and tokens of the last run.
    pub usage: ResourceUsage,
}

impl From<&TaskOutcome> for TaskMetrics {
    fn from(outcome: &TaskOutcome) -> Self {
        Self {
            elapsed_ms: outcome.elapsed_ms,
            usage: outcome.usage,
        }
    }
}

/// How the input of a report reached the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    /// A transcript handed over directly as text.
    #[default]
    DirectTranscriptUpload,
}

/// The aggregated, persistable growth plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// `rprt_<unix-millis>_<9 chars>`.
    pub id: String,
    /// Episode the transcript belongs to. Empty on reports written before
    /// episodes were tracked.
    #[serde(default)]
    pub episode_id: String,
    /// How the input arrived.
    #[serde(default)]
    pub source: ReportSource,
    /// When the fan-out finished.
    pub created_at: DateTime<Utc>,
    /// Bumped by every merged re-run.
    pub updated_at: DateTime<Utc>,
    /// Size and hash of the input.
    pub input_fingerprint: InputFingerprint,
    /// The original input. Absent on reports written before input retention existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_echo: Option<String>,
    /// Wall-clock time of the fan-out.
    pub total_elapsed_ms: u64,
    /// One entry per configured task; `None` when the task has never succeeded.
    pub task_results: BTreeMap<String, Option<serde_json::Value>>,
    /// At most one entry per task, for tasks whose latest run failed.
    pub task_errors: Vec<TaskError>,
    /// Counts recomputed from `task_results`.
    pub tally: Tally,
    /// Timing and usage per task.
    #[serde(default)]
    pub task_metrics: BTreeMap<String, TaskMetrics>,
}

impl Report {
    /// Generate a fresh report identifier: `rprt_<unix-millis>_<9 chars>`.
    pub fn new_id() -> String {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
        format!("rprt_{}_{}", Utc::now().timestamp_millis(), suffix)
    }

    /// Episode identifier used when the caller supplies none: `episode-<unix-millis>`.
    pub fn default_episode_id(at: DateTime<Utc>) -> String {
        format!("episode-{}", at.timestamp_millis())
    }

    /// Terminal state of a slot, or `None` if the report has no such task.
    pub fn slot_state(&self, task: &str) -> Option<SlotState> {
        self.task_results.get(task).map(|slot| match slot {
            Some(_) => SlotState::Succeeded,
            None => SlotState::Failed,
        })
    }

    /// The payload of `task`, if it succeeded.
    pub fn result(&self, task: &str) -> Option<&serde_json::Value> {
        self.task_results.get(task).and_then(Option::as_ref)
    }

    /// The error entry of `task`, if any.
    pub fn error_for(&self, task: &str) -> Option<&TaskError> {
        self.task_errors.iter().find(|e| e.task == task)
    }

    /// Recount the tally from the stored slots.
    pub fn recompute_tally(&mut self) {
        self.tally = Tally::from_slots(&self.task_results);
    }

    /// Every task failed. Still a well-formed report.
    pub fn is_fully_degraded(&self) -> bool {
        self.tally.total > 0 && self.tally.succeeded == 0
    }
}
