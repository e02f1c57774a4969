//! Waitlist errors.

use std::path::PathBuf;

/// Errors from the local signup store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed store contents: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from a remote submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("submission worker stopped without a result")]
    WorkerGone,
}
