//! Services for the ticket API.
//!
//! Business logic between the HTTP handlers and the stores:
//! - `assignment`: technician selection policies
//! - `ticket_workflow`: ticket creation, routing, assignment, lifecycle

pub mod assignment;
pub mod ticket_workflow;

pub use assignment::{policy_for, AssignmentPolicy, RandomPolicy, RoundRobinPolicy};
pub use ticket_workflow::TicketWorkflow;
