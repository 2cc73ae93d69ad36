//! Port for the remote analysis service

use crate::error::AnalysisError;
use crate::types::{AnalysisDocument, AnalysisQuery};
use async_trait::async_trait;

/// Turns a video URL into an [`AnalysisDocument`].
///
/// Implementations own transport details. Every failure mode maps to an
/// [`AnalysisError`]; callers do not retry.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, query: &AnalysisQuery) -> Result<AnalysisDocument, AnalysisError>;
}
