use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeckServiceError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: HTTP {status}")]
    Network { status: u16 },

    #[error("HTTP error: {0}")]
    Http(Arc<reqwest::Error>),

    #[error("JSON error: {0}")]
    Json(Arc<serde_json::Error>),

    #[error("deck index payload is not an array of index entries")]
    IndexInvalid,

    #[error("deck id must not be empty")]
    InvalidId,

    #[error("deck payload is not a JSON object")]
    DeckShape,

    #[error("deck payload has missing or mistyped fields: {0}")]
    DeckValidation(String),

    #[error("fetch task stopped before publishing a result")]
    Aborted,
}

// Sources are Arc-wrapped so the error can be cloned to every caller
// coalesced onto the same in-flight fetch.
impl From<reqwest::Error> for DeckServiceError {
    fn from(err: reqwest::Error) -> Self {
        DeckServiceError::Http(Arc::new(err))
    }
}

impl From<serde_json::Error> for DeckServiceError {
    fn from(err: serde_json::Error) -> Self {
        DeckServiceError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DeckServiceError>;
