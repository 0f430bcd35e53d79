//! Shared error types for the group balancer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Invalid pair key: {input}")]
    InvalidPairKey { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
