/// Top-level error type for the growth-plan workspace.
///
/// Generation-side variants (`Generation`, `Http`, `Schema`, `Timeout`) never
/// escape the task runner: they are folded into a failed
/// [`TaskOutcome`](crate::TaskOutcome). The re-run variants (`UnknownTask`,
/// `MissingInput`, `ReportNotFound`) are returned to callers as-is.
#[derive(Debug, thiserror::Error)]
pub enum GrowthError {
    /// The generator returned something unusable (empty content, bad JSON, truncation).
    #[error("Generation error: {0}")]
    Generation(String),

    /// An outbound HTTP request to the generation backend failed.
    ///
    /// `status` is the response status code, or `None` when no response
    /// arrived (connection refused, reset, DNS failure).
    #[error("HTTP error: {message}")]
    Http {
        /// Response status code, if the server answered.
        status: Option<u16>,
        /// Status line and response body, or the transport error.
        message: String,
    },

    /// The generated payload does not satisfy the task's output schema.
    #[error("Schema violation: {0}")]
    Schema(String),

    /// The task did not finish inside its timeout budget.
    #[error("timeout")]
    Timeout,

    /// A re-run named a task that is not in the registry.
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// A re-run targeted a report stored without its original input.
    #[error("Report {0} has no retained input; re-process the episode instead")]
    MissingInput(String),

    /// No report exists under the given identifier.
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    /// The report store failed to load or persist a report.
    #[error("Store error: {0}")]
    Store(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// The input was rejected before any task ran.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`GrowthError`].
pub type GrowthResult<T> = Result<T, GrowthError>;

impl GrowthError {
    /// An HTTP error for a response that came back with `status`.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        GrowthError::Http {
            status: Some(status),
            message: message.into(),
        }
    }

    /// An HTTP error raised before any response arrived.
    pub fn transport(message: impl Into<String>) -> Self {
        GrowthError::Http {
            status: None,
            message: message.into(),
        }
    }

    /// Whether a fresh attempt of the same generation call could plausibly succeed.
    ///
    /// Rate limits (429), server errors (5xx) and transport failures are
    /// transient. Every other 4xx, schema violations and timeouts are not.
    pub fn is_transient(&self) -> bool {
        match self {
            GrowthError::Http { status: None, .. } => true,
            GrowthError::Http {
                status: Some(code), ..
            } => *code == 429 || (500..600).contains(code),
            GrowthError::Generation(msg) => msg.to_lowercase().contains("no content"),
            _ => false,
        }
    }
}
