use serde::{Deserialize, Serialize};

/// Which OpenAI-compatible endpoint serves generation requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// api.openai.com
    #[default]
    OpenAi,
    /// OpenRouter's OpenAI-compatible gateway.
    OpenRouter,
    /// Groq cloud inference. Free tier is rate limited.
    Groq,
}

/// Process-wide generator settings. One client is built from this at startup
/// and injected into the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Endpoint family; picks the default base URL.
    #[serde(default)]
    pub provider: Provider,
    /// Bearer token. Empty means "read it from the environment".
    #[serde(default)]
    pub api_key: String,
    /// Overrides the provider's base URL (proxies, tests).
    pub api_base_url: Option<String>,
    /// Connect timeout for the HTTP client. Per-task budgets bound each request.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: String::new(),
            api_base_url: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl GeneratorConfig {
    /// Base URL requests go to, without the `/v1/...` path.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                Provider::OpenAi => "https://api.openai.com",
                Provider::OpenRouter => "https://openrouter.ai/api",
                Provider::Groq => "https://api.groq.com/openai",
            }
        }
    }
}

/// How much hidden reasoning a reasoning model may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    /// Almost none; fastest.
    Minimal,
    /// Light reasoning.
    Low,
    /// Provider default.
    Medium,
    /// Most thorough and slowest.
    High,
}

/// Requested answer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Terse.
    Low,
    /// Provider default.
    Medium,
    /// Expansive.
    High,
}

/// Per-task model settings, passed through to the generator untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Model identifier as the provider knows it.
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Omitted from the request when `None`.
    #[serde(default)]
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Omitted from the request when `None`.
    #[serde(default)]
    pub verbosity: Option<Verbosity>,
}

fn default_temperature() -> f32 {
    0.7
}

impl ModelParameters {
    /// Parameters for `model` with default temperature and nothing else set.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: default_temperature(),
            reasoning_effort: None,
            verbosity: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the reasoning effort.
    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    /// Set the verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }
}
