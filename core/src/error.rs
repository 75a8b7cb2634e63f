use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell index")]
    InvalidCell,
    #[error("Input is disabled, clicks are not accepted right now")]
    NotAcceptingInput,
    #[error("Session is not running")]
    SessionNotRunning,
}

pub type Result<T> = core::result::Result<T, GameError>;
