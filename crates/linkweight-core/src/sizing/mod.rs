//! Connectivity-based node sizing
//!
//! Data flows per node: exclusion evaluation, reachability aggregation,
//! size resolution, then assignment into a view by the batch driver.
//! The scheduler runs the driver periodically for every live view.

pub mod driver;
pub mod exclusion;
pub mod reach;
pub mod resolve;
pub mod scheduler;
pub mod view;

pub use driver::{run_pass, size_keys, PassReport};
pub use exclusion::{ExclusionReason, ExclusionRules};
pub use reach::{reach, reach_weight, Reach};
pub use resolve::{resolve_size, scale_weight, Resolution};
pub use scheduler::SizingScheduler;
pub use view::{MemoryView, SizedView, ViewId, ViewNode};

use crate::config::SizingConfig;

/// Configuration snapshot plus exclusion rules compiled for one pass
#[derive(Debug)]
pub struct SizingPolicy<'c> {
    config: &'c SizingConfig,
    rules: ExclusionRules,
}

impl<'c> SizingPolicy<'c> {
    /// Compile the exclusion rules of `config`; malformed patterns are
    /// reported and skipped
    pub fn new(config: &'c SizingConfig) -> Self {
        SizingPolicy {
            config,
            rules: ExclusionRules::from_config(config),
        }
    }

    pub fn config(&self) -> &SizingConfig {
        self.config
    }

    pub fn rules(&self) -> &ExclusionRules {
        &self.rules
    }
}
