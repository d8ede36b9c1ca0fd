use thiserror::Error;

use fd_core::{CraftId, DestinationId};
use fd_registry::RegistryError;

/// Why a launch was refused.  A refused launch changes nothing.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0} is not a transit vehicle")]
    NotTransitVehicle(CraftId),

    #[error("{0} is already in transit")]
    AlreadyInTransit(CraftId),

    #[error("{0} has crashed")]
    Crashed(CraftId),

    #[error("{craft} is already bound for {destination}")]
    SameDestination { craft: CraftId, destination: DestinationId },

    #[error("destination {0} not found")]
    DestinationNotFound(DestinationId),

    #[error("claim refused: {0}")]
    Claim(#[from] RegistryError),
}

/// Coarse grouping of [`LaunchError`]s.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LaunchErrorKind {
    /// The craft itself cannot go right now.
    PreconditionFailed,
    /// The destination is held by someone else.
    ClaimConflict,
    NotFound,
}

impl LaunchError {
    pub fn kind(&self) -> LaunchErrorKind {
        match self {
            LaunchError::NotTransitVehicle(_)
            | LaunchError::AlreadyInTransit(_)
            | LaunchError::Crashed(_)
            | LaunchError::SameDestination { .. } => LaunchErrorKind::PreconditionFailed,
            LaunchError::DestinationNotFound(_)
            | LaunchError::Claim(RegistryError::DestinationNotFound(_)) => LaunchErrorKind::NotFound,
            LaunchError::Claim(_) => LaunchErrorKind::ClaimConflict,
        }
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;
