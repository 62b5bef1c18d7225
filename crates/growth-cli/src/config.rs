//! `growth.toml` loading and per-task overrides.

use growth_agent::{GeneratorConfig, ReasoningEffort, Verbosity};
use growth_core::{GrowthError, GrowthResult};
use growth_orchestrator::{default_specs, TaskRegistry, TaskSpec, TranscriptPolicy, DEFAULT_MODEL};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted when `generator.api_key` is empty.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize)]
pub struct GrowthConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub transcript: TranscriptPolicy,
    /// Keyed by task name; every key must name a registered task.
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskOverride>,
}

/// Optional replacements for one task's model parameters and budget.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskOverride {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub reasoning_effort: Option<ReasoningEffort>,
    pub verbosity: Option<Verbosity>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            generator: GeneratorConfig::default(),
            transcript: TranscriptPolicy::default(),
            tasks: BTreeMap::new(),
        }
    }
}

impl GrowthConfig {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub async fn load(path: &Path) -> GrowthResult<Self> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> GrowthResult<Self> {
        toml::from_str(raw).map_err(|e| GrowthError::Config(format!("Invalid growth.toml: {e}")))
    }

    /// Fill an empty API key from the environment.
    pub fn resolve_api_key(&mut self, env_value: Option<String>) {
        if self.generator.api_key.is_empty() {
            if let Some(key) = env_value.filter(|k| !k.is_empty()) {
                self.generator.api_key = key;
            }
        }
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }

    /// The default task registry with this config's overrides applied.
    pub fn registry(&self) -> GrowthResult<TaskRegistry> {
        let mut specs = default_specs(DEFAULT_MODEL);
        for (name, task_override) in &self.tasks {
            let spec = specs
                .iter_mut()
                .find(|s| &s.name == name)
                .ok_or_else(|| {
                    GrowthError::Config(format!("Override for unknown task '{name}'"))
                })?;
            task_override.apply(spec);
        }
        TaskRegistry::new(specs)
    }
}

impl TaskOverride {
    fn apply(&self, spec: &mut TaskSpec) {
        if let Some(model) = &self.model {
            spec.model.model.clone_from(model);
        }
        if let Some(temperature) = self.temperature {
            spec.model.temperature = temperature;
        }
        if let Some(effort) = self.reasoning_effort {
            spec.model.reasoning_effort = Some(effort);
        }
        if let Some(verbosity) = self.verbosity {
            spec.model.verbosity = Some(verbosity);
        }
        if let Some(tokens) = self.max_output_tokens {
            spec.budget.max_output_tokens = tokens;
        }
        if let Some(secs) = self.timeout_secs {
            spec.budget.timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = self.max_attempts {
            spec.budget.retry.max_attempts = attempts;
        }
    }
}
