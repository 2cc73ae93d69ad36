//! Core types for analysis requests and their results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A video URL submitted for analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisQuery {
    pub url: String,
}

impl AnalysisQuery {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Empty or whitespace-only queries are never submitted
    pub fn is_blank(&self) -> bool {
        self.url.trim().is_empty()
    }
}

/// Video metadata as reported by the analysis service.
///
/// Fields the service may leave out or send as `null` are optional and are
/// written back only when present. Anything not modelled here is kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "thumbnail", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(default, rename = "uploader", skip_serializing_if = "Option::is_none")]
    pub uploader_name: Option<String>,
    #[serde(default, rename = "channel_url", skip_serializing_if = "Option::is_none")]
    pub uploader_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A person identified in the video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// The generated summary; `video_summary` is markdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub video_summary: String,
    #[serde(default)]
    pub people: Vec<Person>,
}

/// Result of one successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub metadata: VideoMetadata,
    pub summary: Summary,
}

/// A cached (query, result) pair, stored as `{"url": ..., "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub query: AnalysisQuery,
    #[serde(rename = "data")]
    pub document: AnalysisDocument,
}

impl HistoryEntry {
    pub fn new(query: AnalysisQuery, document: AnalysisDocument) -> Self {
        Self { query, document }
    }
}

/// Lifecycle of the single request the orchestrator drives
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight {
        started_at: DateTime<Utc>,
        elapsed_seconds: u64,
    },
    Resolved {
        document: AnalysisDocument,
    },
    Failed {
        reason: String,
    },
}

impl RequestState {
    pub fn in_flight(started_at: DateTime<Utc>) -> Self {
        RequestState::InFlight {
            started_at,
            elapsed_seconds: 0,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight { .. })
    }

    /// Seconds spent in flight; 0 in every other state
    pub fn elapsed_seconds(&self) -> u64 {
        match self {
            RequestState::InFlight {
                elapsed_seconds, ..
            } => *elapsed_seconds,
            _ => 0,
        }
    }

    /// Advance the elapsed counter of the request that started at `request_started`.
    ///
    /// Returns false in any other state, including a later request's `InFlight`.
    pub fn tick(&mut self, request_started: DateTime<Utc>) -> bool {
        match self {
            RequestState::InFlight {
                started_at,
                elapsed_seconds,
            } if *started_at == request_started => {
                *elapsed_seconds += 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE_RESPONSE: &str = r###"{
        "metadata": {
            "title": "Transformers, explained",
            "uploader": "Some Channel",
            "channel_url": "https://www.youtube.com/channel/abc",
            "upload_date": "20240115",
            "description": "A long description",
            "tags": ["ai", "ml"],
            "categories": ["Education"],
            "view_count": 125000,
            "like_count": 4200,
            "duration": 1830,
            "thumbnail": "https://i.ytimg.com/vi/x/hq.jpg"
        },
        "summary": {
            "video_summary": "## Key points\n- attention",
            "people": [
                {"name": "Ada", "background": "Researcher"},
                {"name": "Bob"}
            ]
        }
    }"###;

    #[test]
    fn test_blank_query() {
        assert!(AnalysisQuery::new("").is_blank());
        assert!(AnalysisQuery::new("  \t\n").is_blank());
        assert!(!AnalysisQuery::new(" https://youtu.be/x ").is_blank());
    }

    #[test]
    fn test_document_from_service_response() {
        let doc: AnalysisDocument = serde_json::from_str(SERVICE_RESPONSE).unwrap();

        assert_eq!(doc.metadata.title.as_deref(), Some("Transformers, explained"));
        assert_eq!(doc.metadata.uploader_name.as_deref(), Some("Some Channel"));
        assert_eq!(doc.metadata.view_count, Some(125000));
        assert_eq!(doc.metadata.categories, Some(vec!["Education".to_string()]));
        assert_eq!(doc.summary.people.len(), 2);
        assert_eq!(doc.summary.people[1].background, None);
    }

    #[test]
    fn test_unmodelled_metadata_passes_through() {
        let doc: AnalysisDocument = serde_json::from_str(SERVICE_RESPONSE).unwrap();
        assert_eq!(doc.metadata.extra["duration"], 1830);

        let written = serde_json::to_value(&doc).unwrap();
        assert_eq!(written["metadata"]["tags"], serde_json::json!(["ai", "ml"]));
        assert_eq!(written["metadata"]["thumbnail"], "https://i.ytimg.com/vi/x/hq.jpg");
    }

    #[test]
    fn test_null_metadata_fields_are_tolerated() {
        let json = r#"{
            "metadata": {"title": null, "view_count": null, "categories": null},
            "summary": {"video_summary": "", "people": []}
        }"#;
        let doc: AnalysisDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.metadata.title, None);
        assert_eq!(doc.metadata.view_count, None);
        assert_eq!(doc.metadata.categories, None);
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        let json = r#"{
            "metadata": {"view_count": -1},
            "summary": {"video_summary": "", "people": []}
        }"#;
        assert!(serde_json::from_str::<AnalysisDocument>(json).is_err());
    }

    #[test]
    fn test_history_entry_storage_shape() {
        let doc: AnalysisDocument = serde_json::from_str(SERVICE_RESPONSE).unwrap();
        let entry = HistoryEntry::new(AnalysisQuery::new("https://youtu.be/x"), doc);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["url"], "https://youtu.be/x");
        assert_eq!(value["data"]["summary"]["people"][0]["name"], "Ada");
    }

    #[test]
    fn test_document_written_back_as_received() {
        for json in [
            SERVICE_RESPONSE,
            r#"{"metadata":{"title":"T"},"summary":{"video_summary":"s","people":[{"name":"A"}]}}"#,
            r#"{"metadata":{"categories":[]},"summary":{"video_summary":"","people":[]}}"#,
        ] {
            let received: serde_json::Value = serde_json::from_str(json).unwrap();
            let doc: AnalysisDocument = serde_json::from_str(json).unwrap();
            assert_eq!(serde_json::to_value(&doc).unwrap(), received);
        }
    }

    #[test]
    fn test_tick_only_counts_in_flight() {
        let started = Utc::now();
        let mut state = RequestState::in_flight(started);
        assert!(state.tick(started));
        assert!(state.tick(started));
        assert_eq!(state.elapsed_seconds(), 2);

        let mut failed = RequestState::Failed {
            reason: "boom".to_string(),
        };
        assert!(!failed.tick(started));
        assert_eq!(failed.elapsed_seconds(), 0);
        assert!(!RequestState::Idle.is_in_flight());
    }

    #[test]
    fn test_tick_ignores_a_later_request() {
        let first = Utc::now();
        let second = first + chrono::Duration::seconds(10);
        let mut state = RequestState::in_flight(second);

        assert!(!state.tick(first));
        assert_eq!(state.elapsed_seconds(), 0);
        assert!(state.tick(second));
    }
}
