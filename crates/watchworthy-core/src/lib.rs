//! Request lifecycle orchestration and the recent-results cache

mod cache;
mod config;
mod error;
mod orchestrator;
mod service;
mod ticker;
mod types;

pub use cache::{
    decode_history, load_history, persist_history, RecencyCache, HISTORY_CAPACITY, HISTORY_KEY,
};
pub use config::{Config, DEFAULT_ENDPOINT};
pub use error::{AnalysisError, ReplayError, SubmitError};
pub use orchestrator::RequestOrchestrator;
pub use service::AnalysisService;
pub use ticker::ElapsedTicker;
pub use types::{
    AnalysisDocument, AnalysisQuery, HistoryEntry, Person, RequestState, Summary, VideoMetadata,
};
