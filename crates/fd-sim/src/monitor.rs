//! Auto-designation of a primary destination after the grace delay.

use std::time::Duration;

use fd_core::DestinationId;
use fd_registry::DestinationRegistry;
use tracing::info;

use crate::PrimaryDesignator;

#[derive(Clone, Debug)]
pub struct AutoDesignationMonitor {
    delay: Duration,
}

impl AutoDesignationMonitor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        info!(old = ?self.delay, new = ?delay, "auto-designation delay changed");
        self.delay = delay;
    }

    /// `true` when no primary exists and `elapsed` has reached the delay.
    pub fn is_due(&self, registry: &DestinationRegistry, elapsed: Duration) -> bool {
        registry.primary().is_none() && elapsed >= self.delay
    }

    /// Try candidates in creation order; stop at the first one `designator`
    /// accepts.
    pub fn check(
        &self,
        registry:   &mut DestinationRegistry,
        designator: &mut dyn PrimaryDesignator,
        elapsed:    Duration,
    ) -> Option<DestinationId> {
        if !self.is_due(registry, elapsed) {
            return None;
        }
        let candidates: Vec<DestinationId> =
            registry.find_primary_candidates().map(|d| d.id).collect();
        candidates
            .into_iter()
            .find(|&id| designator.designate(registry, id, None))
    }
}
