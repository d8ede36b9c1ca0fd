use fd_core::{CoreError, CraftId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{what} references {craft}, which has no registered hull")]
    UnknownHull {
        what:  &'static str,
        craft: CraftId,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
