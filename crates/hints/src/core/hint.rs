//! Hint trait shared by all inspection units.
//!
//! A hint is attached to the scan lifecycle by the host tool, which fires
//! exactly one fetch-start per top-level target followed by exactly one
//! scan-end once the scan has finished. Handlers default to no-ops so a hint
//! only implements the events it actually observes.

use crate::core::events::{FetchStart, ScanEnd};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Accessibility,
    Interoperability,
    Performance,
    Security,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accessibility => write!(f, "accessibility"),
            Self::Interoperability => write!(f, "interoperability"),
            Self::Performance => write!(f, "performance"),
            Self::Security => write!(f, "security"),
        }
    }
}

#[async_trait]
pub trait Hint: Send + Sync {
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "No description provided"
    }

    fn category(&self) -> Category;

    fn recommended(&self) -> bool {
        false
    }

    fn works_with_local_files(&self) -> bool {
        false
    }

    async fn on_fetch_start(&self, event: &FetchStart) -> Result<()> {
        let _ = event;
        Ok(())
    }

    async fn on_scan_end(&self, event: &ScanEnd) -> Result<()> {
        let _ = event;
        Ok(())
    }
}
