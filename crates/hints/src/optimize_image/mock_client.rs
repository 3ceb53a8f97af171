use super::client::{AnalysisClient, AnalysisRequest, AnalysisResult, ClientError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned analysis client for tests and offline runs.
pub struct MockAnalysisClient {
    result: AnalysisResult,
    failure: Option<String>,
    call_count: AtomicUsize,
}

impl Default for MockAnalysisClient {
    fn default() -> Self {
        Self::empty()
    }
}

impl MockAnalysisClient {
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            failure: None,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(AnalysisResult::default())
    }

    /// A client whose submissions all reject with the given service message.
    pub fn failing(message: &str) -> Self {
        let mut client = Self::empty();
        client.failure = Some(message.to_string());
        client
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn reset_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl AnalysisClient for MockAnalysisClient {
    async fn analyze(&self, _request: AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        if let Some(message) = &self.failure {
            return Err(ClientError::Service(message.clone()));
        }

        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_call_counting() {
        let client = MockAnalysisClient::empty();
        assert_eq!(client.call_count(), 0);

        client
            .analyze(AnalysisRequest::new("http://localhost/"))
            .await
            .unwrap();
        assert_eq!(client.call_count(), 1);

        client
            .analyze(AnalysisRequest::new("http://localhost/"))
            .await
            .unwrap();
        assert_eq!(client.call_count(), 2);

        client.reset_count();
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_client_failure() {
        let client = MockAnalysisClient::failing("Error with optimizing images.");

        let result = client.analyze(AnalysisRequest::new("http://localhost/")).await;
        match result {
            Err(ClientError::Service(message)) => {
                assert_eq!(message, "Error with optimizing images.");
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }
}
