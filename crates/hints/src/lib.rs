//! Pagescan Hints - Page Inspection Units
//!
//! This crate provides the trait-based hint system used by the pagescan
//! site-analysis tool. A hint observes lifecycle events of a page scan and
//! surfaces its conclusions through the `Reporter` collaborator.

pub mod core;

pub mod optimize_image;

pub use core::{Category, CollectingReporter, FetchStart, Hint, Location, Reporter, ScanEnd};

pub use core::{HintRegistry, HintRegistryBuilder};

pub use optimize_image::OptimizeImageHint;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_registration() {
        let registry = HintRegistry::default();
        assert_eq!(registry.list_ids().len(), 0);
    }
}
