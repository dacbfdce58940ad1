//! Domain types for tickets, technicians, and routing results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

// =============================================================================
// CATEGORY
// =============================================================================

/// Service category a maintenance ticket is routed to.
///
/// The set is closed and fixed at build time. `General` is the fallback for
/// text that matches no keyword and has no keyword profile of its own.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    utoipa::ToSchema,
)]
pub enum Category {
    #[default]
    General,
    Plumbing,
    Electrical,
    Cleaning,
    AssetManagement,
    #[serde(rename = "HVAC")]
    Hvac,
    Security,
    #[serde(rename = "IT")]
    It,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 8] = [
        Category::General,
        Category::Plumbing,
        Category::Electrical,
        Category::Cleaning,
        Category::AssetManagement,
        Category::Hvac,
        Category::Security,
        Category::It,
    ];

    /// Canonical display and wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Plumbing => "Plumbing",
            Self::Electrical => "Electrical",
            Self::Cleaning => "Cleaning",
            Self::AssetManagement => "AssetManagement",
            Self::Hvac => "HVAC",
            Self::Security => "Security",
            Self::It => "IT",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "plumbing" => Ok(Self::Plumbing),
            "electrical" => Ok(Self::Electrical),
            "cleaning" => Ok(Self::Cleaning),
            "assetmanagement" | "asset_management" | "asset-management" => {
                Ok(Self::AssetManagement)
            }
            "hvac" => Ok(Self::Hvac),
            "security" => Ok(Self::Security),
            "it" => Ok(Self::It),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

// =============================================================================
// TICKET LIFECYCLE
// =============================================================================

/// Ticket priority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Invalid ticket priority: {}", s)),
        }
    }
}

/// Ticket status.
///
/// | From | Allowed next |
/// |------|--------------|
/// | open | assigned, in_progress, closed |
/// | assigned | open, in_progress, closed |
/// | in_progress | resolved, assigned |
/// | resolved | closed, in_progress |
/// | closed | (terminal) |
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// Staying in the same status is not a transition.
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        use TicketStatus::*;
        matches!(
            (self, next),
            (Open, Assigned)
                | (Open, InProgress)
                | (Open, Closed)
                | (Assigned, Open)
                | (Assigned, InProgress)
                | (Assigned, Closed)
                | (InProgress, Resolved)
                | (InProgress, Assigned)
                | (Resolved, Closed)
                | (Resolved, InProgress)
        )
    }

    /// Resolved and closed tickets no longer accept assignment.
    pub fn is_finished(self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Assigned => write!(f, "assigned"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Resolved => write!(f, "resolved"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "assigned" => Ok(Self::Assigned),
            "in_progress" | "inprogress" | "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Invalid ticket status: {}", s)),
        }
    }
}

// =============================================================================
// ROUTING RESULTS
// =============================================================================

/// Autocomplete suggestion for a partially typed keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct KeywordSuggestion {
    pub keyword: String,
    pub category: Category,
    /// Match quality, 0-100
    pub relevance: u8,
}

/// Combined routing result for one ticket text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Classification {
    pub category: Category,
    /// Matched keywords across every profile, in taxonomy order
    pub keywords: Vec<String>,
    /// Role responsible for `category`
    pub role: String,
}

impl Classification {
    /// Keywords as stored on a ticket (comma-joined, empty when none).
    pub fn joined_keywords(&self) -> String {
        self.keywords.join(defaults::KEYWORD_SEPARATOR)
    }
}

// =============================================================================
// TICKETS
// =============================================================================

/// A maintenance request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Comma-joined keywords matched at creation
    pub extracted_keywords: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    /// Role the assignment was resolved through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Build a new open ticket from a request and its classification.
    pub fn new(req: CreateTicketRequest, classification: &Classification) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: req.title.trim().to_string(),
            description: req.description,
            category: classification.category,
            extracted_keywords: classification.joined_keywords(),
            priority: req.priority.unwrap_or_default(),
            status: TicketStatus::Open,
            requester: req.requester.filter(|r| !r.trim().is_empty()),
            assigned_to: None,
            assigned_role: None,
            assigned_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record an assignment and move the ticket to `Assigned`.
    ///
    /// `role` is the role the assignee was resolved through, which may differ
    /// in case from the technician's own spelling.
    pub fn assign_to(&mut self, technician: &Technician, role: &str) {
        let now = Utc::now();
        self.assigned_to = Some(technician.id);
        self.assigned_role = Some(role.to_string());
        self.assigned_at = Some(now);
        self.status = TicketStatus::Assigned;
        self.updated_at = now;
    }

    /// Drop the current assignment.
    pub fn clear_assignment(&mut self) {
        self.assigned_to = None;
        self.assigned_role = None;
        self.assigned_at = None;
        self.updated_at = Utc::now();
    }

    /// Extracted keywords split back into a list.
    pub fn keyword_list(&self) -> Vec<&str> {
        self.extracted_keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Request for creating a ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateTicketRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
    #[serde(default)]
    pub requester: Option<String>,
}

// =============================================================================
// TECHNICIANS
// =============================================================================

/// A user who can be assigned tickets through their role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Technician {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role name, e.g. "Plumber"
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Technician {
    pub fn new(req: CreateTechnicianRequest) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: req.name.trim().to_string(),
            email: req.email.filter(|e| !e.trim().is_empty()),
            role: req.role.trim().to_string(),
            active: req.active.unwrap_or(true),
            created_at: Utc::now(),
        }
    }

    /// Role comparison is case-insensitive.
    pub fn has_role(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }
}

/// Request for registering a technician.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateTechnicianRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default)]
    pub active: Option<bool>,
}
