use thiserror::Error;

use fd_core::{CraftId, DoorId};

#[derive(Debug, Error)]
pub enum DoorError {
    #[error("door {0} not found")]
    DoorNotFound(DoorId),

    #[error("door {door} is already mounted on {craft}")]
    AlreadyMounted { door: DoorId, craft: CraftId },
}

pub type DoorResult<T> = Result<T, DoorError>;
