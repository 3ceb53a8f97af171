//! Core abstractions and infrastructure for the hint framework
//!
//! Fundamental building blocks shared by every inspection unit. The Hint
//! trait defines the interface hints implement against the scan lifecycle,
//! the Reporter trait is the single channel through which hints surface
//! user-visible findings, and the registry keeps hints addressable by id so
//! a host can wire them to its event dispatch.

pub mod events;
pub mod hint;
pub mod registry;
pub mod reporter;

pub use events::{FetchStart, ScanEnd};
pub use hint::{Category, Hint};
pub use registry::{HintRegistry, HintRegistryBuilder};
pub use reporter::{CollectingReporter, Location, Report, ReportError, Reporter};
