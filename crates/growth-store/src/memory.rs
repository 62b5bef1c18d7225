use crate::store::{check_id, ReportStore};
use async_trait::async_trait;
use growth_core::{GrowthError, GrowthResult, Report};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process report store. Reports are kept as serialized JSON so a load
/// always returns an independent copy, as a real store would.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<HashMap<String, String>>,
}

impl MemoryReportStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored JSON for a report, for byte-level comparisons.
    pub async fn raw(&self, id: &str) -> Option<String> {
        self.reports.read().await.get(id).cloned()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn load(&self, id: &str) -> GrowthResult<Report> {
        let reports = self.reports.read().await;
        let json = reports
            .get(id)
            .ok_or_else(|| GrowthError::ReportNotFound(id.to_string()))?;
        Ok(serde_json::from_str(json)?)
    }

    async fn save(&self, report: &Report) -> GrowthResult<()> {
        check_id(&report.id)?;
        let json = serde_json::to_string(report)?;
        self.reports.write().await.insert(report.id.clone(), json);
        Ok(())
    }

    async fn list(&self) -> GrowthResult<Vec<String>> {
        let mut ids: Vec<String> = self.reports.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
