//! Core traits for the ticket store.
//!
//! The store is opaque to the routing engine and the workflow: these traits
//! define what the workflow needs, and concrete backends implement them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// TICKET REPOSITORY TRAITS
// =============================================================================

/// Request for listing tickets.
#[derive(Debug, Clone, Default)]
pub struct ListTicketsRequest {
    /// Filter by status
    pub status: Option<TicketStatus>,
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by assigned technician
    pub assigned_to: Option<Uuid>,
    /// Maximum results
    pub limit: Option<usize>,
    /// Pagination offset
    pub offset: Option<usize>,
}

impl ListTicketsRequest {
    /// Whether a ticket passes every filter set on this request.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.status.map_or(true, |s| ticket.status == s)
            && self.category.map_or(true, |c| ticket.category == c)
            && self
                .assigned_to
                .map_or(true, |id| ticket.assigned_to == Some(id))
    }
}

/// Response for listing tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTicketsResponse {
    pub tickets: Vec<Ticket>,
    /// Number of tickets matching the filters, across all pages
    pub total: usize,
}

/// In-place change applied by [`TicketRepository::modify`].
pub type TicketMutation = Box<dyn FnOnce(&mut Ticket) -> Result<()> + Send>;

/// Repository for ticket persistence.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a new ticket.
    async fn insert(&self, ticket: Ticket) -> Result<()>;

    /// Fetch a ticket by ID.
    async fn fetch(&self, id: Uuid) -> Result<Ticket>;

    /// Replace a stored ticket. Fails if it does not exist.
    async fn update(&self, ticket: Ticket) -> Result<()>;

    /// Apply `mutation` to the stored ticket with no other writer in between
    /// and return the result. When `mutation` fails the stored ticket is left
    /// untouched and its error is returned.
    async fn modify(&self, id: Uuid, mutation: TicketMutation) -> Result<Ticket>;

    /// List tickets with filtering and pagination, newest first.
    async fn list(&self, req: ListTicketsRequest) -> Result<ListTicketsResponse>;
}

// =============================================================================
// TECHNICIAN DIRECTORY TRAITS
// =============================================================================

/// Lookup of technicians by role for assignment.
#[async_trait]
pub trait TechnicianDirectory: Send + Sync {
    /// Register a technician.
    async fn insert(&self, technician: Technician) -> Result<()>;

    /// Fetch a technician by ID.
    async fn fetch(&self, id: Uuid) -> Result<Technician>;

    /// List every technician, ordered by name.
    async fn list(&self) -> Result<Vec<Technician>>;

    /// Active technicians holding `role` (case-insensitive), ordered by name
    /// then ID so callers see a stable candidate order.
    async fn active_with_role(&self, role: &str) -> Result<Vec<Technician>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(category: Category, status: TicketStatus) -> Ticket {
        let classification = Classification {
            category,
            keywords: Vec::new(),
            role: "AssetManager".to_string(),
        };
        let mut t = Ticket::new(
            CreateTicketRequest {
                title: "t".to_string(),
                ..Default::default()
            },
            &classification,
        );
        t.status = status;
        t
    }

    #[test]
    fn test_empty_request_matches_everything() {
        let req = ListTicketsRequest::default();
        assert!(req.matches(&ticket(Category::It, TicketStatus::Closed)));
    }

    #[test]
    fn test_filters_combine() {
        let req = ListTicketsRequest {
            status: Some(TicketStatus::Open),
            category: Some(Category::Plumbing),
            ..Default::default()
        };
        assert!(req.matches(&ticket(Category::Plumbing, TicketStatus::Open)));
        assert!(!req.matches(&ticket(Category::Plumbing, TicketStatus::Closed)));
        assert!(!req.matches(&ticket(Category::Cleaning, TicketStatus::Open)));
    }

    #[test]
    fn test_assigned_filter_excludes_unassigned() {
        let req = ListTicketsRequest {
            assigned_to: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(!req.matches(&ticket(Category::General, TicketStatus::Open)));
    }
}
