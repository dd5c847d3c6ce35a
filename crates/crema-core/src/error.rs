//! Error types for crema.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CremaError {
    /// The service returned nothing to gate, extract, or score.
    /// This is the only condition the pipeline cannot default through.
    #[error("analysis text is empty")]
    EmptyResponse,

    #[error("history error: {0}")]
    History(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
