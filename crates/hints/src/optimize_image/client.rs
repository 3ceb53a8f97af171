use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::config::OptimizeImageConfig;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Service(String),

    #[error("request to the analysis service failed: {0}")]
    Transport(String),

    #[error("analysis service responded with status {0}")]
    Status(u16),

    #[error("could not decode the analysis response: {0}")]
    Decode(String),
}

/// Outbound payload of one analysis submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteStats {
    pub input: i64,
    pub output: i64,
    pub savings: i64,
}

/// One analyzed image. The service reports `savings == input - output`; the
/// equality is assumed here, not re-verified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileStat {
    pub url: String,
    pub name: String,
    pub bytes: ByteStats,
    #[serde(default)]
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub colorspace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sampling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quality: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub image: u64,
    #[serde(default)]
    pub bytes: ByteStats,
}

/// Resolved value of one analysis submission. Entries in `files` may be
/// absent and are skipped during reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub files: Vec<Option<FileStat>>,
    #[serde(default)]
    pub summary: AnalysisSummary,
}

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, ClientError>;
}

/// Talks to the image-optimization analysis service over HTTP: a single
/// POST of the target URL, authenticated with the configured username.
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    endpoint: Url,
    username: Option<String>,
}

impl HttpAnalysisClient {
    pub fn new(config: &OptimizeImageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            username: config.username().map(str::to_string),
        }
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        debug!("submitting {} to {}", request.url, self.endpoint);

        let mut builder = self.client.post(self.endpoint.clone()).json(&request);
        if let Some(username) = &self.username {
            builder = builder.basic_auth(username, None::<&str>);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let result = response
            .json::<AnalysisResult>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        debug!(
            "analysis of {} covered {} file entries",
            request.url,
            result.files.len()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_url_only() {
        let request = AnalysisRequest::new("http://localhost/");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({ "url": "http://localhost/" }));
    }

    #[test]
    fn test_result_deserializes_service_payload() {
        let payload = r#"{
            "files": [
                null,
                {
                    "url": "https://example.com/images/bigImage.png",
                    "name": "bigImage.png",
                    "bytes": { "input": 4054, "output": 2835, "savings": 1219 },
                    "format": "PNG",
                    "width": 216,
                    "height": 46,
                    "depth": 32
                }
            ],
            "summary": {
                "image": 1,
                "bytes": { "input": 4054, "output": 2835, "savings": 1219 }
            }
        }"#;

        let result: AnalysisResult = serde_json::from_str(payload).unwrap();
        assert_eq!(result.files.len(), 2);
        assert!(result.files[0].is_none());

        let file = result.files[1].as_ref().unwrap();
        assert_eq!(file.name, "bigImage.png");
        assert_eq!(file.bytes.savings, 1219);
        assert_eq!(file.width, Some(216));
        assert_eq!(result.summary.image, 1);
    }

    #[test]
    fn test_service_error_displays_bare_message() {
        let error = ClientError::Service("Error with optimizing images.".to_string());
        assert_eq!(error.to_string(), "Error with optimizing images.");
    }
}
