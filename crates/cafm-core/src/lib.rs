//! # cafm-core
//!
//! Core types, traits, and abstractions for the CAFM ticket service.
//!
//! This crate provides the domain types (categories, tickets, technicians,
//! routing results) and the store traits that the routing engine and the
//! ticket workflow depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
