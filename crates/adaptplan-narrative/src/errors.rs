use std::time::Duration;

use adaptplan_plan::ValidationReport;
use thiserror::Error;

/// Failures reaching the text-generation service.
///
/// These are not recovered by the fallback narrative; callers see them.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
}

impl TransportError {
    /// Rate limiting and quota exhaustion.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, TransportError::Api { status: 429, .. })
    }

    /// Missing or rejected credentials.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            TransportError::MissingApiKey | TransportError::Api { status: 401 | 403, .. }
        )
    }
}

/// Reasons a service response was rejected. Recovered by the fallback narrative.
#[derive(Debug, Error)]
pub enum NarrativeRejection {
    #[error("response is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("response failed schema validation with {} error(s)", .0.errors.len())]
    Schema(ValidationReport),
}

/// Errors surfaced by narrative generation and chat queries.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("payload serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for narrative operations.
pub type Result<T> = std::result::Result<T, NarrativeError>;
