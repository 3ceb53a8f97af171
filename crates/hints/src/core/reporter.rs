//! Reporting collaborator.
//!
//! The Reporter is the only channel through which hints produce user-visible
//! output. How reports are rendered is the host's concern; hints hand over a
//! resource URL, an optional in-page location and a message, and await the
//! acknowledgement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("reporting channel closed: {0}")]
    Closed(String),

    #[error("report rejected by host: {0}")]
    Rejected(String),
}

/// In-page position of a finding. Hints that inspect remote services rather
/// than page content pass `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub resource: String,
    pub location: Option<Location>,
    pub message: String,
}

#[async_trait]
pub trait Reporter: Send + Sync {
    async fn report(
        &self,
        resource: &str,
        location: Option<Location>,
        message: &str,
    ) -> Result<(), ReportError>;
}

/// In-memory reporter preserving emission order. Used by hosts that batch
/// reports and by the test suites of individual hints.
pub struct CollectingReporter {
    reports: Mutex<Vec<Report>>,
    call_count: AtomicUsize,
    should_fail: bool,
}

impl Default for CollectingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// A reporter whose emissions are all rejected, for exercising the
    /// emission failure path of a hint.
    pub fn failing() -> Self {
        let mut reporter = Self::new();
        reporter.should_fail = true;
        reporter
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn reports(&self) -> Vec<Report> {
        self.lock_reports().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock_reports().iter().map(|r| r.message.clone()).collect()
    }

    fn lock_reports(&self) -> MutexGuard<'_, Vec<Report>> {
        match self.reports.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl Reporter for CollectingReporter {
    async fn report(
        &self,
        resource: &str,
        location: Option<Location>,
        message: &str,
    ) -> Result<(), ReportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            return Err(ReportError::Rejected(
                "collecting reporter configured to fail".to_string(),
            ));
        }

        self.lock_reports().push(Report {
            resource: resource.to_string(),
            location,
            message: message.to_string(),
        });

        Ok(())
    }
}
