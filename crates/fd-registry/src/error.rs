use thiserror::Error;

use fd_core::{CraftId, DestinationId};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{destination} is already claimed by {holder}")]
    AlreadyClaimed {
        destination: DestinationId,
        holder:      CraftId,
    },

    #[error("destination {0} not found")]
    DestinationNotFound(DestinationId),

    #[error("{0} is already the primary destination")]
    PrimaryExists(DestinationId),

    #[error("destination {0} cannot be designated primary")]
    NotDesignatable(DestinationId),

    #[error("duplicate destination name {0:?}")]
    DuplicateName(String),

    #[error("manifest parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
