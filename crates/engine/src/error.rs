use thiserror::Error;
use twenty48_core::{BoardError, ParseDirectionError};

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    InvalidDirection(#[from] ParseDirectionError),
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
