//! The coordinator anchoring one analysis submission between the two scan
//! lifecycle events: fetch-start fires the submission, scan-end reconciles
//! the outcome into findings.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::client::{AnalysisClient, AnalysisRequest, AnalysisResult, ClientError, FileStat};
use super::config::OptimizeImageConfig;
use crate::core::{Category, FetchStart, Hint, Reporter, ScanEnd};

pub const HINT_ID: &str = "optimize-image";

/// Lifecycle of one scan. Scan-end on `Failed` is a no-op by construction;
/// the failure was already reported when the state was entered.
enum ScanState {
    Idle,
    Pending(JoinHandle<Result<AnalysisResult, ClientError>>),
    Failed,
    Completed,
}

pub struct OptimizeImageHint {
    config: OptimizeImageConfig,
    client: Arc<dyn AnalysisClient>,
    reporter: Arc<dyn Reporter>,
    state: Mutex<ScanState>,
}

impl OptimizeImageHint {
    pub fn new(config: OptimizeImageConfig, reporter: Arc<dyn Reporter>) -> Self {
        let client = Arc::new(super::client::HttpAnalysisClient::new(&config));
        Self::with_client(config, client, reporter)
    }

    pub fn with_client(
        config: OptimizeImageConfig,
        client: Arc<dyn AnalysisClient>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config,
            client,
            reporter,
            state: Mutex::new(ScanState::Idle),
        }
    }
}

/// Sole error-surfacing path for submission and transport failures. Never
/// raises; a reporter rejection here is logged and dropped.
async fn notify_failure(reporter: &dyn Reporter, resource: &str, error: impl fmt::Display) {
    debug!("error getting analysis result for {resource}: {error}");

    let message = format!("Couldn't get results for {resource}. Error: {error}");
    if let Err(report_error) = reporter.report(resource, None, &message).await {
        warn!("could not deliver failure notification for {resource}: {report_error}");
    }
}

fn unoptimized_files(result: &AnalysisResult) -> Vec<&FileStat> {
    result
        .files
        .iter()
        .flatten()
        .filter(|file| file.bytes.output < file.bytes.input)
        .collect()
}

fn savings_message(file: &FileStat) -> String {
    let size_diff_kb = file.bytes.savings as f64 / 1024.0;
    let percentage_diff = (file.bytes.savings as f64 / file.bytes.input as f64 * 100.0).round();

    format!(
        "File \"{}\" can be {:.2}kB ({}%) smaller.",
        file.name, size_diff_kb, percentage_diff as i64
    )
}

#[async_trait]
impl Hint for OptimizeImageHint {
    fn id(&self) -> &'static str {
        HINT_ID
    }

    fn description(&self) -> &'static str {
        "Optimize images."
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    async fn on_fetch_start(&self, event: &FetchStart) -> Result<()> {
        let resource = event.resource.clone();

        debug!("validating hint preconditions for {resource}");

        let mut state = self.state.lock().await;
        if let ScanState::Pending(handle) = &*state {
            // Host contract violation: one scan at a time.
            warn!("fetch-start for {resource} arrived with an analysis still pending; dropping it");
            handle.abort();
        }

        if self.config.username().is_none() {
            notify_failure(
                self.reporter.as_ref(),
                &resource,
                "No username is provided for authentication.",
            )
            .await;
            *state = ScanState::Failed;
            return Ok(());
        }

        let client = Arc::clone(&self.client);
        let reporter = Arc::clone(&self.reporter);
        let request = AnalysisRequest::new(&resource);

        // The spawned task is the single settled-once completion value: it
        // owns the failure notification, so the later await cannot report the
        // same rejection twice.
        let handle = tokio::spawn(async move {
            match client.analyze(request).await {
                Ok(result) => Ok(result),
                Err(error) => {
                    notify_failure(reporter.as_ref(), &resource, &error).await;
                    Err(error)
                }
            }
        });

        *state = ScanState::Pending(handle);
        Ok(())
    }

    async fn on_scan_end(&self, event: &ScanEnd) -> Result<()> {
        let resource = &event.resource;

        let mut state = self.state.lock().await;
        let handle = match std::mem::replace(&mut *state, ScanState::Idle) {
            ScanState::Pending(handle) => handle,
            settled => {
                *state = settled;
                return Ok(());
            }
        };

        debug!("waiting for the optimizing result of {resource}");

        let result = match handle.await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => {
                // Already surfaced by the submission task.
                *state = ScanState::Failed;
                return Ok(());
            }
            Err(join_error) => {
                *state = ScanState::Failed;
                return Err(anyhow!("analysis task for {resource} failed: {join_error}"));
            }
        };

        debug!("received the optimizing result of {resource}");

        let unoptimized = unoptimized_files(&result);
        if unoptimized.is_empty() {
            debug!("all images on {resource} are optimized");
            *state = ScanState::Completed;
            return Ok(());
        }

        let emissions = unoptimized.iter().map(|&file| {
            let message = savings_message(file);
            async move { self.reporter.report(&file.url, None, &message).await }
        });

        // Wait for every emission to settle before surfacing any failure.
        let settled = join_all(emissions).await;
        *state = ScanState::Completed;

        for outcome in settled {
            outcome?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize_image::client::ByteStats;

    fn stat(name: &str, input: i64, output: i64) -> FileStat {
        FileStat {
            url: format!("https://example.com/images/{name}"),
            name: name.to_string(),
            bytes: ByteStats {
                input,
                output,
                savings: input - output,
            },
            format: "PNG".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_savings_message_rounding() {
        let file = stat("bigImage.png", 4054, 2835);
        assert_eq!(
            savings_message(&file),
            "File \"bigImage.png\" can be 1.19kB (30%) smaller."
        );
    }

    #[test]
    fn test_filter_skips_absent_and_optimized_entries() {
        let result = AnalysisResult {
            files: vec![
                None,
                Some(stat("optimizedImage.svg", 465, 465)),
                Some(stat("bigImage.png", 4054, 2835)),
                Some(stat("inflated.jpg", 100, 120)),
            ],
            ..Default::default()
        };

        let unoptimized = unoptimized_files(&result);
        assert_eq!(unoptimized.len(), 1);
        assert_eq!(unoptimized[0].name, "bigImage.png");
    }

    #[test]
    fn test_filter_and_format_are_pure() {
        let result = AnalysisResult {
            files: vec![
                Some(stat("a.png", 2048, 1024)),
                Some(stat("b.png", 4054, 2835)),
            ],
            ..Default::default()
        };

        let first: Vec<String> = unoptimized_files(&result)
            .into_iter()
            .map(savings_message)
            .collect();
        let second: Vec<String> = unoptimized_files(&result)
            .into_iter()
            .map(savings_message)
            .collect();

        assert_eq!(first, second);
        assert_eq!(first[0], "File \"a.png\" can be 1.00kB (50%) smaller.");
    }
}
