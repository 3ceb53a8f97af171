use serde::{Deserialize, Serialize};

/// Fired once per scanned target, before any asynchronous work begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchStart {
    pub resource: String,
}

impl FetchStart {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}

/// Fired once per scan, after all per-page processing has finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEnd {
    pub resource: String,
}

impl ScanEnd {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}
