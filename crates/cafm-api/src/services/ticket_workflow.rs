//! Ticket workflow service.
//!
//! Ties the keyword router to the stores:
//! 1. Validate the request
//! 2. Classify title and description (category, keywords, role)
//! 3. Persist the ticket as Open
//! 4. Optionally auto-assign an active technician holding the role
//!
//! Lifecycle changes go through [`TicketStatus::can_transition_to`].

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use cafm_core::{
    defaults, Classification, CreateTechnicianRequest, CreateTicketRequest, Error,
    KeywordSuggestion, ListTicketsRequest, ListTicketsResponse, Result, TechnicianDirectory,
    Technician, Ticket, TicketRepository, TicketStatus,
};
use cafm_routing::{CategoryProfile, KeywordRouter};

use super::assignment::AssignmentPolicy;

/// Ticket creation, routing, assignment and lifecycle.
#[derive(Clone)]
pub struct TicketWorkflow {
    tickets: Arc<dyn TicketRepository>,
    technicians: Arc<dyn TechnicianDirectory>,
    policy: Arc<dyn AssignmentPolicy>,
    router: KeywordRouter,
    auto_assign: bool,
}

impl TicketWorkflow {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        technicians: Arc<dyn TechnicianDirectory>,
        policy: Arc<dyn AssignmentPolicy>,
        router: KeywordRouter,
    ) -> Self {
        Self {
            tickets,
            technicians,
            policy,
            router,
            auto_assign: true,
        }
    }

    /// Enable or disable assignment at creation time.
    pub fn with_auto_assign(mut self, enabled: bool) -> Self {
        self.auto_assign = enabled;
        self
    }

    pub fn router(&self) -> &KeywordRouter {
        &self.router
    }

    pub fn auto_assign_enabled(&self) -> bool {
        self.auto_assign
    }

    /// Every category profile of the router's taxonomy.
    pub fn profiles(&self) -> &[CategoryProfile] {
        self.router.taxonomy().profiles()
    }

    /// Create a ticket, routing it by keywords.
    ///
    /// When auto-assignment is enabled but no technician holds the role, the
    /// ticket is still created and stays Open.
    pub async fn create_ticket(&self, req: CreateTicketRequest) -> Result<Ticket> {
        let start = Instant::now();
        validate_ticket_request(&req)?;

        let classification = self.router.classify(&req.title, &req.description);
        let ticket = Ticket::new(req, &classification);
        let ticket_id = ticket.id;
        self.tickets.insert(ticket.clone()).await?;

        info!(
            subsystem = "workflow",
            op = "create_ticket",
            ticket_id = %ticket_id,
            category = %classification.category,
            role = %classification.role,
            keyword_count = classification.keywords.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Ticket created"
        );

        if !self.auto_assign {
            return Ok(ticket);
        }

        match self.auto_assign(ticket_id).await {
            Ok(assigned) => Ok(assigned),
            Err(Error::NoTechnicianAvailable(role)) => {
                warn!(
                    subsystem = "workflow",
                    op = "create_ticket",
                    ticket_id = %ticket_id,
                    role = %role,
                    "No technician available, ticket left open"
                );
                Ok(ticket)
            }
            Err(e) => Err(e),
        }
    }

    /// Assign a ticket to an active technician holding its category's role.
    ///
    /// Candidates are resolved from a snapshot; the assignment itself is
    /// re-validated against the stored ticket when it is written.
    pub async fn auto_assign(&self, ticket_id: Uuid) -> Result<Ticket> {
        let snapshot = self.tickets.fetch(ticket_id).await?;
        ensure_assignable(&snapshot)?;

        let role = self
            .router
            .get_role_for_category(snapshot.category)
            .to_string();
        let candidates = self.technicians.active_with_role(&role).await?;
        debug!(
            ticket_id = %ticket_id,
            role = %role,
            candidate_count = candidates.len(),
            policy = self.policy.name(),
            "Resolving assignee"
        );

        let technician = self
            .policy
            .pick(&role, &candidates)
            .ok_or_else(|| Error::NoTechnicianAvailable(role.clone()))?;
        let technician_id = technician.id;

        let assigned_role = role.clone();
        let ticket = self
            .tickets
            .modify(
                ticket_id,
                Box::new(move |ticket: &mut Ticket| {
                    ensure_assignable(ticket)?;
                    ticket.assign_to(&technician, &assigned_role);
                    Ok(())
                }),
            )
            .await?;

        info!(
            subsystem = "workflow",
            op = "auto_assign",
            ticket_id = %ticket_id,
            technician_id = %technician_id,
            role = %role,
            "Ticket assigned"
        );
        Ok(ticket)
    }

    /// Assign a ticket to a specific technician.
    pub async fn assign(&self, ticket_id: Uuid, technician_id: Uuid) -> Result<Ticket> {
        let technician = self.technicians.fetch(technician_id).await?;
        if !technician.active {
            return Err(Error::InvalidInput(format!(
                "Technician is inactive: {}",
                technician_id
            )));
        }

        let role = technician.role.clone();
        let assigned_role = role.clone();
        let ticket = self
            .tickets
            .modify(
                ticket_id,
                Box::new(move |ticket: &mut Ticket| {
                    ensure_assignable(ticket)?;
                    ticket.assign_to(&technician, &assigned_role);
                    Ok(())
                }),
            )
            .await?;

        info!(
            subsystem = "workflow",
            op = "assign",
            ticket_id = %ticket_id,
            technician_id = %technician_id,
            role = %role,
            "Ticket assigned manually"
        );
        Ok(ticket)
    }

    /// Move a ticket through its lifecycle.
    ///
    /// The transition is checked against the stored ticket under the
    /// store's write lock.
    pub async fn change_status(&self, ticket_id: Uuid, status: TicketStatus) -> Result<Ticket> {
        let ticket = self
            .tickets
            .modify(
                ticket_id,
                Box::new(move |ticket: &mut Ticket| {
                    let from = ticket.status;
                    if !from.can_transition_to(status) {
                        return Err(Error::InvalidTransition { from, to: status });
                    }
                    if status == TicketStatus::Assigned && ticket.assigned_to.is_none() {
                        return Err(Error::InvalidInput(
                            "Ticket has no technician; assign it instead".to_string(),
                        ));
                    }

                    if status == TicketStatus::Open {
                        ticket.clear_assignment();
                    }
                    ticket.status = status;
                    ticket.updated_at = chrono::Utc::now();
                    Ok(())
                }),
            )
            .await?;

        info!(
            subsystem = "workflow",
            op = "change_status",
            ticket_id = %ticket_id,
            to = %status,
            "Ticket status changed"
        );
        Ok(ticket)
    }

    pub async fn get_ticket(&self, ticket_id: Uuid) -> Result<Ticket> {
        self.tickets.fetch(ticket_id).await
    }

    pub async fn list_tickets(&self, req: ListTicketsRequest) -> Result<ListTicketsResponse> {
        self.tickets.list(req).await
    }

    /// Autocomplete suggestions; `limit` is clamped to 1..=10.
    pub fn suggestions(&self, input: &str, limit: Option<usize>) -> Vec<KeywordSuggestion> {
        self.router
            .get_suggestions_with_limit(input, limit.unwrap_or(defaults::SUGGESTION_LIMIT))
    }

    /// Classify a text without creating a ticket.
    pub fn classify(&self, title: &str, description: &str) -> Classification {
        self.router.classify(title, description)
    }

    pub async fn register_technician(&self, req: CreateTechnicianRequest) -> Result<Technician> {
        if req.name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Technician name must not be empty".to_string(),
            ));
        }
        if req.role.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Technician role must not be empty".to_string(),
            ));
        }

        let technician = Technician::new(req);
        self.technicians.insert(technician.clone()).await?;
        info!(
            subsystem = "workflow",
            op = "register_technician",
            technician_id = %technician.id,
            role = %technician.role,
            active = technician.active,
            "Technician registered"
        );
        Ok(technician)
    }

    pub async fn list_technicians(&self) -> Result<Vec<Technician>> {
        self.technicians.list().await
    }
}

/// Resolved and Closed tickets take no assignments.
fn ensure_assignable(ticket: &Ticket) -> Result<()> {
    if ticket.status.is_finished() {
        return Err(Error::InvalidInput(format!(
            "Cannot assign a {} ticket",
            ticket.status
        )));
    }
    if ticket.status != TicketStatus::Assigned
        && !ticket.status.can_transition_to(TicketStatus::Assigned)
    {
        return Err(Error::InvalidTransition {
            from: ticket.status,
            to: TicketStatus::Assigned,
        });
    }
    Ok(())
}

fn validate_ticket_request(req: &CreateTicketRequest) -> Result<()> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("Title must not be empty".to_string()));
    }
    if title.chars().count() > defaults::TITLE_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "Title must be at most {} characters",
            defaults::TITLE_MAX_CHARS
        )));
    }
    if req.description.chars().count() > defaults::DESCRIPTION_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "Description must be at most {} characters",
            defaults::DESCRIPTION_MAX_CHARS
        )));
    }
    Ok(())
}
