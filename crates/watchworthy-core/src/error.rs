//! Error types surfaced by the orchestrator and cache

use thiserror::Error;

/// Why `submit` declined to start a request. Rejections have no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("query is empty")]
    InvalidQuery,

    #[error("a request is already in flight")]
    RequestInFlight,
}

/// The remote analysis call did not produce a document
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("could not reach the analysis service: {0}")]
    Transport(String),

    #[error("analysis service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("analysis service returned an unreadable document: {0}")]
    Decode(String),

    #[error("analysis client is misconfigured: {0}")]
    Configuration(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("history index {index} is out of range (history holds {len} entries)")]
    OutOfRange { index: usize, len: usize },
}
