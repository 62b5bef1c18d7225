use growth_core::{GrowthError, GrowthResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Admission rules applied to a transcript before any task runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TranscriptPolicy {
    /// Longer input is rejected.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Shorter input is accepted with a warning.
    #[serde(default = "default_min_recommended_chars")]
    pub min_recommended_chars: usize,
    /// Minimum share of alphanumeric characters, to reject symbol soup.
    #[serde(default = "default_min_alnum_ratio")]
    pub min_alnum_ratio: f64,
}

fn default_max_chars() -> usize {
    100_000
}

fn default_min_recommended_chars() -> usize {
    1_000
}

fn default_min_alnum_ratio() -> f64 {
    0.5
}

impl Default for TranscriptPolicy {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            min_recommended_chars: default_min_recommended_chars(),
            min_alnum_ratio: default_min_alnum_ratio(),
        }
    }
}

impl TranscriptPolicy {
    /// Check `raw` and return the trimmed transcript to run on.
    pub fn admit<'a>(&self, raw: &'a str) -> GrowthResult<&'a str> {
        let transcript = raw.trim();
        let chars = transcript.chars().count();

        if chars == 0 {
            return Err(GrowthError::InvalidInput("transcript is required".into()));
        }
        if chars > self.max_chars {
            return Err(GrowthError::InvalidInput(format!(
                "Transcript too long: {chars} characters (maximum {})",
                self.max_chars
            )));
        }

        let alnum = transcript.chars().filter(|c| c.is_alphanumeric()).count();
        let ratio = alnum as f64 / chars as f64;
        if ratio < self.min_alnum_ratio {
            return Err(GrowthError::InvalidInput(
                "Transcript appears to contain mostly non-alphanumeric characters".into(),
            ));
        }

        if chars < self.min_recommended_chars {
            warn!(
                chars,
                recommended = self.min_recommended_chars,
                "Transcript is shorter than recommended, results may be limited"
            );
        }

        Ok(transcript)
    }
}
