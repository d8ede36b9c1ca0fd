use thiserror::Error;

use fd_core::TerminalId;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal {0} not found")]
    TerminalNotFound(TerminalId),
}

pub type TerminalResult<T> = Result<T, TerminalError>;
