use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("unknown gate: {0}")]
    UnknownGate(String),

    #[error("no gate defined for transition {from} -> {to}")]
    UnsupportedTransition { from: String, to: String },

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("context for phase '{phase}' must be a {expected} record, got {found}")]
    ContextMismatch {
        phase: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to persist state to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InsightError>;
