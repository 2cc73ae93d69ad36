//! HTTP client for the remote video analysis service

mod client;

pub use client::HttpAnalysisClient;
