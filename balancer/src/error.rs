//! Balancer-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalancerError {
    #[error("Not enough participants ({available}) for {groups} groups of {group_size}")]
    Capacity {
        available: usize,
        groups: usize,
        group_size: usize,
    },

    #[error("State file is malformed: {message}")]
    MalformedState { message: String },

    #[error("Invalid configuration: {field} = {value}")]
    Configuration { field: String, value: String },

    #[error("Roster error: {message}")]
    Roster { message: String },

    #[error("Shared component error")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type BalancerResult<T> = Result<T, BalancerError>;
