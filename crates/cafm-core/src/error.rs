//! Error types for the CAFM ticket service.

use thiserror::Error;
use uuid::Uuid;

use crate::models::TicketStatus;

/// Result type alias using the service's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ticket workflow and store operations.
///
/// The keyword routing engine itself never fails; these errors come from the
/// workflow and store layers that consume it.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Ticket not found
    #[error("Ticket not found: {0}")]
    TicketNotFound(Uuid),

    /// Technician not found
    #[error("Technician not found: {0}")]
    TechnicianNotFound(Uuid),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Ticket lifecycle transition not allowed
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: TicketStatus, to: TicketStatus },

    /// No active technician holds the role required for assignment
    #[error("No active technician available for role: {0}")]
    NoTechnicianAvailable(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
