//! # cafm-api
//!
//! HTTP API for CAFM maintenance tickets.
//!
//! Tickets are classified by the keyword router on creation, stored, and
//! assigned to an active technician holding the role of their category.
//! The binary in `main.rs` wires configuration and logging around
//! [`build_router`].

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod store;

pub use app::{build_rate_limiter, build_router, ApiDoc, AppState, MakeRequestUuidV7};
pub use config::{AssignmentPolicyKind, ConfigError, ServerConfig};
pub use error::ApiError;
pub use services::{AssignmentPolicy, RandomPolicy, RoundRobinPolicy, TicketWorkflow};
pub use store::{InMemoryTechnicianDirectory, InMemoryTicketStore};
