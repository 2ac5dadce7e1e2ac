use std::fmt;

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Kind of record an id-keyed operation was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Client,
    Address,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Client => f.write_str("Client"),
            Entity::Address => f.write_str("Address"),
        }
    }
}

/// Failure of a client roster operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No record with the requested id. Expected, reported distinctly.
    #[error("{0} not found")]
    NotFound(Entity),

    /// The submitted record broke one or more field rules.
    #[error("invalid data")]
    Validation(#[from] ValidationErrors),

    /// The list query could not be executed.
    #[error("query failed")]
    QueryFailed(#[source] sqlx::Error),

    /// Any other persistence failure.
    #[error("storage fault")]
    Storage(#[source] sqlx::Error),
}

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;
