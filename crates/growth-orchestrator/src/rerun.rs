use crate::registry::TaskRegistry;
use crate::runner::TaskRunner;
use chrono::Utc;
use growth_core::{GrowthError, GrowthResult, Report, TaskError, TaskMetrics, TaskOutcome};
use serde::Serialize;
use tracing::info;

/// Result of a selective re-run: the merged report plus the fresh outcome.
///
/// On failure the report may still hold the previous payload for the task,
/// so callers that need to know whether the re-run itself worked look at
/// `outcome`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RerunOutcome {
    /// The report as persisted after the merge.
    pub report: Report,
    /// What the re-run itself produced.
    pub outcome: TaskOutcome,
}

/// Re-execute exactly one task against the report's retained input and merge
/// the result in place.
///
/// Fails with [`GrowthError::UnknownTask`] before touching anything when the
/// task is not registered, and with [`GrowthError::MissingInput`] when the
/// report has no retained input.
pub async fn rerun(
    report: &mut Report,
    task: &str,
    registry: &TaskRegistry,
    runner: &TaskRunner,
) -> GrowthResult<TaskOutcome> {
    let spec = registry.require(task)?;
    let input = report
        .input_echo
        .as_deref()
        .ok_or_else(|| GrowthError::MissingInput(report.id.clone()))?;

    info!(report_id = %report.id, task = %task, "Re-running task");
    let outcome = runner.run(spec, input).await;
    merge_outcome(report, &outcome);
    Ok(outcome)
}

/// Fold one fresh outcome into an existing report.
///
/// Success replaces the slot and clears the task's error entry. Failure keeps
/// the previous slot value and replaces the task's error entry. Other slots are
/// never touched; the tally is recounted from the stored slots.
pub fn merge_outcome(report: &mut Report, outcome: &TaskOutcome) {
    let task = outcome.task.as_str();
    report.task_errors.retain(|e| e.task != task);

    match outcome.payload() {
        Some(payload) => {
            report
                .task_results
                .insert(task.to_string(), Some(payload.clone()));
        }
        None => {
            report.task_results.entry(task.to_string()).or_insert(None);
            report.task_errors.push(TaskError {
                task: task.to_string(),
                reason: outcome.failure_reason().unwrap_or_default().to_string(),
                timestamp: outcome.finished_at,
            });
        }
    }

    report
        .task_metrics
        .insert(task.to_string(), TaskMetrics::from(outcome));
    report.updated_at = Utc::now();
    report.recompute_tally();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use growth_core::{InputFingerprint, ReportSource, ResourceUsage, Tally};
    use std::collections::BTreeMap;

    fn report() -> Report {
        let now = Utc::now();
        let mut task_results = BTreeMap::new();
        task_results.insert("a".to_string(), Some(serde_json::json!({"v": 1})));
        task_results.insert("b".to_string(), None);
        let mut report = Report {
            id: "rprt_1_abcdefghi".to_string(),
            episode_id: "episode-1".to_string(),
            source: ReportSource::default(),
            created_at: now,
            updated_at: now,
            input_fingerprint: InputFingerprint::of("input"),
            input_echo: Some("input".to_string()),
            total_elapsed_ms: 5,
            task_results,
            task_errors: vec![TaskError {
                task: "b".to_string(),
                reason: "timeout".to_string(),
                timestamp: now,
            }],
            tally: Tally::default(),
            task_metrics: BTreeMap::new(),
        };
        report.recompute_tally();
        report
    }

    #[test]
    fn test_success_clears_error() {
        let mut report = report();
        let outcome =
            TaskOutcome::success("b", serde_json::json!({"v": 2}), 3, ResourceUsage::default());
        merge_outcome(&mut report, &outcome);

        assert_eq!(report.result("b").unwrap()["v"], 2);
        assert!(report.task_errors.is_empty());
        assert_eq!(report.tally.succeeded, 2);
        assert_eq!(report.result("a").unwrap()["v"], 1);
        assert!(report.task_metrics.contains_key("b"));
    }

    #[test]
    fn test_failure_keeps_previous_payload() {
        let mut report = report();
        let outcome = TaskOutcome::failure("a", "timeout", 3, ResourceUsage::default());
        merge_outcome(&mut report, &outcome);

        assert_eq!(report.result("a").unwrap()["v"], 1);
        assert_eq!(report.error_for("a").unwrap().reason, "timeout");
        assert_eq!(report.tally.succeeded, 1);
        assert_eq!(report.tally.total, 2);
    }

    #[test]
    fn test_failure_replaces_existing_error() {
        let mut report = report();
        let outcome = TaskOutcome::failure("b", "bad json", 3, ResourceUsage::default());
        merge_outcome(&mut report, &outcome);

        let errors: Vec<_> = report.task_errors.iter().filter(|e| e.task == "b").collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].reason, "bad json");
    }

    #[test]
    fn test_repeated_success_never_duplicates_errors() {
        let mut report = report();
        for v in 0..3 {
            let outcome =
                TaskOutcome::success("a", serde_json::json!({"v": v}), 1, ResourceUsage::default());
            merge_outcome(&mut report, &outcome);
        }
        assert_eq!(report.result("a").unwrap()["v"], 2);
        assert!(report.error_for("a").is_none());
        assert_eq!(report.task_errors.len(), 1);
    }

    #[test]
    fn test_updated_at_advances() {
        let mut report = report();
        let before = report.updated_at;
        let outcome = TaskOutcome::failure("b", "x", 1, ResourceUsage::default());
        merge_outcome(&mut report, &outcome);
        assert!(report.updated_at >= before);
        assert_eq!(report.created_at, before);
    }
}
