//! Ticket and technician stores.

pub mod memory;

pub use memory::{InMemoryTechnicianDirectory, InMemoryTicketStore};
