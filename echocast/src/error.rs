//! Error types for echocast

use crate::scene::EntityId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EchoCastError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Source {0} is not tracked")]
    UnknownSource(EntityId),

    #[error("Source {0} is already tracked")]
    DuplicateSource(EntityId),
}

pub type Result<T> = std::result::Result<T, EchoCastError>;
