//! Optimize-image hint.
//!
//! Submits the scanned page to an external image-optimization analysis
//! service when the target fetch starts, and once the scan ends reports
//! which images on the page could be compressed further and by how much.

pub mod client;
pub mod config;
pub mod hint;
pub mod mock_client;

pub use client::{
    AnalysisClient, AnalysisRequest, AnalysisResult, AnalysisSummary, ByteStats, ClientError,
    FileStat, HttpAnalysisClient,
};
pub use config::{ConfigError, OptimizeImageConfig};
pub use hint::{OptimizeImageHint, HINT_ID};
pub use mock_client::MockAnalysisClient;
