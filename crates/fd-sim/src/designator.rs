//! Primary designation collaborator.

use fd_core::{ActorId, DestinationId};
use fd_registry::DestinationRegistry;
use tracing::{debug, info};

/// Decides whether a destination may become primary, and makes it so.
///
/// Implementations may refuse for reasons the registry does not know
/// about; the auto-designation monitor simply moves on to the next
/// candidate.
pub trait PrimaryDesignator {
    /// Returns `true` if `destination` is now the primary destination.
    fn designate(
        &mut self,
        registry:    &mut DestinationRegistry,
        destination: DestinationId,
        actor:       Option<ActorId>,
    ) -> bool;
}

/// Designator that defers entirely to the registry's own rules.
#[derive(Copy, Clone, Default, Debug)]
pub struct RegistryDesignator;

impl PrimaryDesignator for RegistryDesignator {
    fn designate(
        &mut self,
        registry:    &mut DestinationRegistry,
        destination: DestinationId,
        actor:       Option<ActorId>,
    ) -> bool {
        match registry.designate_primary(destination) {
            Ok(()) => {
                info!(%destination, ?actor, "primary destination designated");
                true
            }
            Err(e) => {
                debug!(%destination, error = %e, "designation refused");
                false
            }
        }
    }
}
