use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration, need rows > 0, cols > 0 and 0 < mines < rows * cols")]
    InvalidConfiguration,
    #[error("Coordinates out of range")]
    OutOfRange,
}

pub type Result<T> = core::result::Result<T, GameError>;
