use crate::registry::TaskRegistry;
use chrono::Utc;
use growth_core::{InputFingerprint, Report, ReportSource, TaskError, TaskMetrics, TaskOutcome};
use std::collections::BTreeMap;

/// Merge fan-out outcomes into a fresh report.
///
/// Slots are seeded from the registry, so the report always carries one
/// entry per configured task. A task with no outcome in `outcomes` is
/// recorded as failed rather than silently dropped. The episode id defaults
/// to `episode-<unix-millis>` of the assembly time.
pub fn assemble(
    registry: &TaskRegistry,
    input: &str,
    outcomes: &[TaskOutcome],
    total_elapsed_ms: u64,
) -> Report {
    let now = Utc::now();
    let mut task_results = BTreeMap::new();
    let mut task_errors = Vec::new();
    let mut task_metrics = BTreeMap::new();

    for spec in registry.iter() {
        match outcomes.iter().find(|o| o.task == spec.name) {
            Some(outcome) => {
                task_metrics.insert(spec.name.clone(), TaskMetrics::from(outcome));
                match outcome.payload() {
                    Some(payload) => {
                        task_results.insert(spec.name.clone(), Some(payload.clone()));
                    }
                    None => {
                        task_results.insert(spec.name.clone(), None);
                        task_errors.push(TaskError {
                            task: spec.name.clone(),
                            reason: outcome.failure_reason().unwrap_or_default().to_string(),
                            timestamp: outcome.finished_at,
                        });
                    }
                }
            }
            None => {
                task_results.insert(spec.name.clone(), None);
                task_errors.push(TaskError {
                    task: spec.name.clone(),
                    reason: "no outcome produced".to_string(),
                    timestamp: now,
                });
            }
        }
    }

    let mut report = Report {
        id: Report::new_id(),
        episode_id: Report::default_episode_id(now),
        source: ReportSource::DirectTranscriptUpload,
        created_at: now,
        updated_at: now,
        input_fingerprint: InputFingerprint::of(input),
        input_echo: Some(input.to_string()),
        total_elapsed_ms,
        task_results,
        task_errors,
        tally: Default::default(),
        task_metrics,
    };
    report.recompute_tally();
    report
}
