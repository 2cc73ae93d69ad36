use async_trait::async_trait;
use std::time::Duration;
use watchworthy_core::{AnalysisDocument, AnalysisError, AnalysisQuery, AnalysisService, Config};

const MAX_ERROR_BODY_CHARS: usize = 300;

/// Posts the video URL as form data and decodes the JSON document reply
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint).map_err(|e| {
            AnalysisError::Configuration(format!("invalid endpoint {:?}: {}", endpoint, e))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AnalysisError::Configuration(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, query: &AnalysisQuery) -> Result<AnalysisDocument, AnalysisError> {
        tracing::debug!(endpoint = %self.endpoint, url = %query.url, "posting analysis request");

        let response = self
            .http
            .post(&self.endpoint)
            .form(&[("url", query.url.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        serde_json::from_slice(&body).map_err(|e| AnalysisError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> AnalysisError {
    if e.is_timeout() {
        AnalysisError::Transport(format!("request timed out: {}", e))
    } else {
        AnalysisError::Transport(e.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let kept: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", kept)
    } else {
        body.to_string()
    }
}
