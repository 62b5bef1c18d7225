use crate::aggregator::assemble;
use crate::input::TranscriptPolicy;
use crate::registry::TaskRegistry;
use crate::rerun::{rerun, RerunOutcome};
use crate::runner::TaskRunner;
use crate::scheduler::FanOutScheduler;
use growth_agent::Generator;
use growth_core::{GrowthResult, Report};
use growth_store::ReportStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// The growth-plan engine.
/// Implements the fan-out → aggregate → persist pipeline and selective re-runs.
pub struct GrowthEngine {
    registry: Arc<TaskRegistry>,
    runner: TaskRunner,
    scheduler: FanOutScheduler,
    store: Arc<dyn ReportStore>,
    policy: TranscriptPolicy,
    /// One lock per report with a re-run in flight.
    rerun_locks: RerunLocks,
}

type RerunLocks = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

/// A caller's claim on one report's re-run lock.
///
/// Dropping it removes the map entry once no other caller holds the lock,
/// including when the re-run future is cancelled mid-flight.
struct LockLease<'a> {
    locks: &'a RerunLocks,
    report_id: String,
    lock: Arc<Mutex<()>>,
}

impl<'a> LockLease<'a> {
    fn acquire(locks: &'a RerunLocks, report_id: &str) -> Self {
        let mut map = locks.lock().unwrap_or_else(|e| e.into_inner());
        let lock = Arc::clone(map.entry(report_id.to_string()).or_default());
        Self {
            locks,
            report_id: report_id.to_string(),
            lock,
        }
    }
}

impl Drop for LockLease<'_> {
    fn drop(&mut self) {
        let mut map = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map and this lease still point at the lock.
        let last = map.get(&self.report_id).is_some_and(|lock| {
            Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(&self.lock) == 2
        });
        if last {
            map.remove(&self.report_id);
        }
    }
}

impl GrowthEngine {
    /// Create an engine over a frozen registry, an injected generator, and a store.
    pub fn new(
        registry: TaskRegistry,
        generator: Arc<dyn Generator>,
        store: Arc<dyn ReportStore>,
    ) -> Self {
        let runner = TaskRunner::new(generator);
        Self {
            registry: Arc::new(registry),
            scheduler: FanOutScheduler::new(runner.clone()),
            runner,
            store,
            policy: TranscriptPolicy::default(),
            rerun_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Replace the transcript admission policy.
    pub fn with_policy(mut self, policy: TranscriptPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The registry every run and re-run uses.
    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Run every task over `input`, assemble the report, and persist it.
    ///
    /// Task failures never fail this call; they are recorded in the report.
    /// Only input rejection and store errors surface as `Err`.
    pub async fn generate(&self, input: &str) -> GrowthResult<Report> {
        self.generate_for_episode(input, None).await
    }

    /// [`generate`](Self::generate) tagged with an episode identifier.
    ///
    /// Without one the report gets `episode-<unix-millis>`.
    pub async fn generate_for_episode(
        &self,
        input: &str,
        episode_id: Option<&str>,
    ) -> GrowthResult<Report> {
        let start = Instant::now();
        let transcript = self.policy.admit(input)?;

        info!(tasks = self.registry.len(), episode_id, "Engine: starting growth plan");

        let outcomes = self
            .scheduler
            .run_all(&self.registry, Arc::from(transcript))
            .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        let mut report = assemble(&self.registry, transcript, &outcomes, elapsed_ms);
        if let Some(episode_id) = episode_id.filter(|id| !id.trim().is_empty()) {
            report.episode_id = episode_id.trim().to_string();
        }

        if report.is_fully_degraded() {
            warn!(report_id = %report.id, "Engine: every task failed");
        }

        self.store.save(&report).await?;

        info!(
            report_id = %report.id,
            episode_id = %report.episode_id,
            succeeded = report.tally.succeeded,
            failed = report.tally.failed,
            elapsed_ms,
            "Engine: growth plan complete"
        );

        Ok(report)
    }

    /// Re-run one task of a stored report and persist the merged result.
    ///
    /// The task name is checked before the report is loaded, so an unknown
    /// task never touches the store. Re-runs on the same report are
    /// serialized; re-runs on different reports proceed independently.
    pub async fn rerun_task(&self, report_id: &str, task: &str) -> GrowthResult<RerunOutcome> {
        self.registry.require(task)?;

        let lease = LockLease::acquire(&self.rerun_locks, report_id);
        let _guard = lease.lock.lock().await;
        self.rerun_locked(report_id, task).await
    }

    async fn rerun_locked(&self, report_id: &str, task: &str) -> GrowthResult<RerunOutcome> {
        let mut report = self.store.load(report_id).await?;
        let outcome = rerun(&mut report, task, &self.registry, &self.runner).await?;
        self.store.save(&report).await?;

        info!(
            report_id = %report.id,
            task = %task,
            succeeded = outcome.succeeded(),
            tally_succeeded = report.tally.succeeded,
            tally_total = report.tally.total,
            "Engine: re-run merged"
        );

        Ok(RerunOutcome { report, outcome })
    }

    /// Load a stored report.
    pub async fn report(&self, report_id: &str) -> GrowthResult<Report> {
        self.store.load(report_id).await
    }

    /// Identifiers of every stored report.
    pub async fn list_reports(&self) -> GrowthResult<Vec<String>> {
        self.store.list().await
    }

}
