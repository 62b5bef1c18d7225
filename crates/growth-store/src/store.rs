use async_trait::async_trait;
use growth_core::{GrowthError, GrowthResult, Report};
use std::path::PathBuf;
use tracing::debug;

/// Key → report persistence. Deletion and expiry are store policy, not exposed here.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Load a report, failing with [`GrowthError::ReportNotFound`] when absent.
    async fn load(&self, id: &str) -> GrowthResult<Report>;
    /// Create or overwrite the report stored under `report.id`.
    async fn save(&self, report: &Report) -> GrowthResult<()>;
    /// Identifiers of every stored report, sorted.
    async fn list(&self) -> GrowthResult<Vec<String>>;
}

/// Report identifiers become file names, so only a safe alphabet is accepted.
pub(crate) fn check_id(id: &str) -> GrowthResult<()> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(GrowthError::Store(format!("Invalid report id: {id:?}")))
    }
}

/// File-based report store: one pretty-printed JSON file per report.
pub struct FileReportStore {
    dir: PathBuf,
}

impl FileReportStore {
    /// Open a store under `dir`, creating the directory if needed.
    pub async fn new(dir: PathBuf) -> GrowthResult<Self> {
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn report_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl ReportStore for FileReportStore {
    async fn load(&self, id: &str) -> GrowthResult<Report> {
        check_id(id)?;
        let path = self.report_path(id);
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GrowthError::ReportNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data)
            .map_err(|e| GrowthError::Store(format!("Failed to parse report {id}: {e}")))
    }

    async fn save(&self, report: &Report) -> GrowthResult<()> {
        check_id(&report.id)?;
        let path = self.report_path(&report.id);
        let tmp = self.dir.join(format!(".{}.json.tmp", report.id));
        let json = serde_json::to_string_pretty(report)?;
        // Write-then-rename so readers never see a half-written report.
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(report_id = %report.id, path = %path.display(), "Report saved");
        Ok(())
    }

    async fn list(&self) -> GrowthResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if let Some(stem) = name.strip_suffix(".json") {
                    if check_id(stem).is_ok() {
                        ids.push(stem.to_string());
                    }
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
