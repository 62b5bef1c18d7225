//! End-to-end orchestration tests.
//!
//! Drives `GrowthEngine` with a scripted generator and checks coverage,
//! isolation, join-all, timeouts, and the selective re-run contract.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use growth_core::{GrowthError, Report, ReportSource, SlotState, Tally};
use growth_orchestrator::{default_registry, GrowthEngine, Section, DEFAULT_TASKS};
use growth_store::{FileReportStore, MemoryReportStore, ReportStore};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use support::{registry, ScriptedGenerator, TRANSCRIPT};

fn engine(
    names: &[&str],
    timeout: Duration,
    generator: ScriptedGenerator,
) -> (GrowthEngine, Arc<ScriptedGenerator>, Arc<MemoryReportStore>) {
    let generator = Arc::new(generator);
    let store = Arc::new(MemoryReportStore::new());
    let engine = GrowthEngine::new(registry(names, timeout), generator.clone(), store.clone());
    (engine, generator, store)
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_report_covers_every_task() {
    let generator = ScriptedGenerator::new()
        .succeed("a", json!({"v": "a"}))
        .fail("b", "model refused")
        .succeed("c", json!({"v": "c"}))
        .fail("d", "bad json");
    let (engine, _, _) = engine(&["a", "b", "c", "d"], Duration::from_secs(5), generator);

    let report = engine.generate(TRANSCRIPT).await.unwrap();

    assert_eq!(report.task_results.len(), 4);
    assert_eq!(
        report.tally,
        Tally {
            succeeded: 2,
            failed: 2,
            total: 4
        }
    );
    assert_eq!(report.task_errors.len(), 2);
    assert!(report.task_results["b"].is_none());
    assert_eq!(report.error_for("b").unwrap().reason, "Generation error: model refused");
}

#[tokio::test]
async fn test_failing_sibling_does_not_affect_success() {
    let alone = {
        let generator = ScriptedGenerator::new().succeed("b", json!({"titles": ["x", "y"]}));
        let (engine, _, _) = engine(&["b"], Duration::from_secs(5), generator);
        engine.generate(TRANSCRIPT).await.unwrap()
    };
    let together = {
        let generator = ScriptedGenerator::new()
            .fail("a", "boom")
            .succeed("b", json!({"titles": ["x", "y"]}));
        let (engine, _, _) = engine(&["a", "b"], Duration::from_secs(5), generator);
        engine.generate(TRANSCRIPT).await.unwrap()
    };

    assert_eq!(together.task_results["b"], alone.task_results["b"]);
    assert_eq!(together.slot_state("a"), Some(SlotState::Failed));
}

#[tokio::test]
async fn test_waits_for_slow_task_within_budget() {
    let generator = ScriptedGenerator::new()
        .succeed("fast", json!({"v": 1}))
        .slow("slow", Duration::from_millis(300), json!({"v": 2}));
    let (engine, _, _) = engine(&["fast", "slow"], Duration::from_secs(5), generator);

    let start = Instant::now();
    let report = engine.generate(TRANSCRIPT).await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(300));
    assert_eq!(report.tally.succeeded, 2);
    assert_eq!(report.result("slow").unwrap()["v"], 2);
}

#[tokio::test]
async fn test_timeout_fails_only_that_task() {
    let generator = ScriptedGenerator::new()
        .slow("stuck", Duration::from_secs(30), json!({"late": true}))
        .succeed("ok", json!({"v": 1}));
    let (engine, _, _) = engine(&["stuck", "ok"], Duration::from_millis(100), generator);

    let start = Instant::now();
    let report = engine.generate(TRANSCRIPT).await.unwrap();

    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(report.task_results["stuck"].is_none());
    assert_eq!(report.error_for("stuck").unwrap().reason, "timeout");
    assert_eq!(report.result("ok").unwrap()["v"], 1);
}

#[tokio::test]
async fn test_overlapping_runs_do_not_share_state() {
    let generator = ScriptedGenerator::new()
        .slow("a", Duration::from_millis(300), json!({"run": "slow"}))
        .succeed("a", json!({"run": "fast"}));
    let (engine, _, _) = engine(&["a"], Duration::from_secs(5), generator);

    let (first, second) = tokio::join!(engine.generate(TRANSCRIPT), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        engine.generate(TRANSCRIPT).await
    });
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_ne!(first.id, second.id);
    assert_eq!(first.result("a").unwrap()["run"], "slow");
    assert_eq!(second.result("a").unwrap()["run"], "fast");
    assert_eq!(first.tally.total, 1);
    assert_eq!(second.tally.total, 1);
}

#[tokio::test]
async fn test_full_degradation_is_a_report() {
    let generator = ScriptedGenerator::new()
        .fail("a", "x")
        .fail("b", "y")
        .fail("c", "z");
    let (engine, _, store) = engine(&["a", "b", "c"], Duration::from_secs(5), generator);

    let report = engine.generate(TRANSCRIPT).await.unwrap();

    assert_eq!(
        report.tally,
        Tally {
            succeeded: 0,
            failed: 3,
            total: 3
        }
    );
    assert!(report.is_fully_degraded());
    assert!(store.raw(&report.id).await.is_some());
}

// ---------------------------------------------------------------------------
// rerun_task
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_rerun_touches_only_its_slot() {
    let generator = ScriptedGenerator::new()
        .succeed("a", json!({"v": 1}))
        .fail("b", "boom");
    let (engine, generator, _) = engine(&["a", "b"], Duration::from_secs(5), generator);
    let report = engine.generate(TRANSCRIPT).await.unwrap();

    generator.push("a", Ok(json!({"v": 2})));
    let rerun = engine.rerun_task(&report.id, "a").await.unwrap();

    assert!(rerun.outcome.succeeded());
    assert_eq!(rerun.report.result("a").unwrap()["v"], 2);
    assert_eq!(rerun.report.task_results["b"], report.task_results["b"]);
    assert_eq!(rerun.report.error_for("b"), report.error_for("b"));
    assert_eq!(rerun.report.tally, report.tally);
    assert_eq!(rerun.report.created_at, report.created_at);
    assert_eq!(generator.calls("b"), 1);
}

#[tokio::test]
async fn test_rerun_recovers_failed_task() {
    let generator = ScriptedGenerator::new()
        .succeed("a", json!({"v": 1}))
        .fail("b", "boom");
    let (engine, generator, store) = engine(&["a", "b"], Duration::from_secs(5), generator);
    let report = engine.generate(TRANSCRIPT).await.unwrap();

    generator.push("b", Ok(json!({"v": "fixed"})));
    let rerun = engine.rerun_task(&report.id, "b").await.unwrap();

    assert!(rerun.report.task_errors.is_empty());
    assert_eq!(rerun.report.tally.succeeded, 2);

    let stored = store.load(&report.id).await.unwrap();
    assert_eq!(stored, rerun.report);
}

#[tokio::test]
async fn test_failed_rerun_keeps_previous_payload() {
    let generator = ScriptedGenerator::new().succeed("a", json!({"v": 1}));
    let (engine, generator, _) = engine(&["a"], Duration::from_secs(5), generator);
    let report = engine.generate(TRANSCRIPT).await.unwrap();

    generator.push("a", Err("rate limited".to_string()));
    let rerun = engine.rerun_task(&report.id, "a").await.unwrap();

    assert!(!rerun.outcome.succeeded());
    assert_eq!(rerun.report.result("a").unwrap()["v"], 1);
    assert!(rerun.report.error_for("a").unwrap().reason.contains("rate limited"));
    assert_eq!(rerun.report.tally.succeeded, 1);
}

#[tokio::test]
async fn test_rerun_unknown_task_leaves_store_untouched() {
    let generator = ScriptedGenerator::new().succeed("a", json!({"v": 1}));
    let (engine, generator, store) = engine(&["a"], Duration::from_secs(5), generator);
    let report = engine.generate(TRANSCRIPT).await.unwrap();
    let before = store.raw(&report.id).await.unwrap();

    let err = engine.rerun_task(&report.id, "nonexistent").await.unwrap_err();

    assert!(matches!(err, GrowthError::UnknownTask(ref name) if name == "nonexistent"));
    assert_eq!(store.raw(&report.id).await.unwrap(), before);
    assert_eq!(generator.calls("a"), 1);
}

#[tokio::test]
async fn test_rerun_keeps_episode_and_source() {
    let generator = ScriptedGenerator::new().fail("a", "boom");
    let (engine, generator, _) = engine(&["a"], Duration::from_secs(5), generator);
    let report = engine
        .generate_for_episode(TRANSCRIPT, Some("sourdough-ep-12"))
        .await
        .unwrap();

    generator.push("a", Ok(json!({"v": 1})));
    let rerun = engine.rerun_task(&report.id, "a").await.unwrap();

    assert_eq!(rerun.report.episode_id, "sourdough-ep-12");
    assert_eq!(rerun.report.source, ReportSource::DirectTranscriptUpload);
}

#[tokio::test]
async fn test_repeated_rerun_replaces_payload() {
    let generator = ScriptedGenerator::new().succeed("a", json!({"v": 1}));
    let (engine, generator, _) = engine(&["a"], Duration::from_secs(5), generator);
    let report = engine.generate(TRANSCRIPT).await.unwrap();

    generator.push("a", Ok(json!({"v": 2})));
    let first = engine.rerun_task(&report.id, "a").await.unwrap();
    generator.push("a", Ok(json!({"v": 3})));
    let second = engine.rerun_task(&report.id, "a").await.unwrap();

    assert_eq!(first.report.result("a").unwrap()["v"], 2);
    assert_eq!(second.report.result("a").unwrap()["v"], 3);
    assert!(second.report.task_errors.is_empty());
    assert_eq!(second.report.tally.total, 1);
}

#[tokio::test]
async fn test_rerun_missing_report() {
    let (engine, _, _) = engine(&["a"], Duration::from_secs(5), ScriptedGenerator::new());
    let err = engine.rerun_task("rprt_1_notthere0", "a").await.unwrap_err();
    assert!(matches!(err, GrowthError::ReportNotFound(_)));
}

#[tokio::test]
async fn test_rerun_without_retained_input() {
    let generator = ScriptedGenerator::new().fail("a", "boom");
    let (engine, _, store) = engine(&["a"], Duration::from_secs(5), generator);
    let mut report: Report = engine.generate(TRANSCRIPT).await.unwrap();
    report.input_echo = None;
    store.save(&report).await.unwrap();

    let err = engine.rerun_task(&report.id, "a").await.unwrap_err();
    assert!(matches!(err, GrowthError::MissingInput(_)));
}

#[tokio::test]
async fn test_concurrent_reruns_on_one_report_both_land() {
    let generator = ScriptedGenerator::new().fail("a", "boom").fail("b", "boom");
    let (engine, generator, store) = engine(&["a", "b"], Duration::from_secs(5), generator);
    let report = engine.generate(TRANSCRIPT).await.unwrap();

    generator.push("a", Ok(json!({"v": "a"})));
    generator.push("b", Ok(json!({"v": "b"})));
    let (ra, rb) = tokio::join!(
        engine.rerun_task(&report.id, "a"),
        engine.rerun_task(&report.id, "b"),
    );
    ra.unwrap();
    rb.unwrap();

    let stored = store.load(&report.id).await.unwrap();
    assert_eq!(stored.tally.succeeded, 2);
    assert!(stored.task_errors.is_empty());
}

// ---------------------------------------------------------------------------
// Default registry with the file store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_default_registry_round_trip_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileReportStore::new(dir.path().join("reports")).await.unwrap());
    let generator = Arc::new(
        ScriptedGenerator::new()
            .succeed(
                "pulse",
                json!({"durable_trend": null, "viral_moment": null, "dad_joke": "Knead I say more?"}),
            )
            .fail("insight", "timeout upstream")
            .fail("hook", "boom")
            .fail("spotlight", "boom")
            .fail("amplify", "boom"),
    );
    let engine = GrowthEngine::new(default_registry().unwrap(), generator, store.clone());

    let report = engine.generate(TRANSCRIPT).await.unwrap();
    assert_eq!(report.tally.total, DEFAULT_TASKS.len());

    let stored = engine.report(&report.id).await.unwrap();
    let pulse = Section::decode("pulse", stored.result("pulse").unwrap()).unwrap();
    assert!(matches!(pulse, Section::Pulse(ref p) if p.is_empty()));
    assert_eq!(engine.list_reports().await.unwrap(), vec![report.id]);
}
