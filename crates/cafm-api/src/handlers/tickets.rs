//! Ticket HTTP handlers.
//!
//! Creation, listing, lookup, assignment and status changes, plus the two
//! read-only routing helpers used by ticket forms: classification preview and
//! keyword autocomplete.

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cafm_core::{
    defaults, Category, Classification, CreateTicketRequest, KeywordSuggestion,
    ListTicketsRequest, Ticket, TicketStatus,
};

use super::{json_body, path_param, query_params, ListResponse, PaginationMeta};
use crate::{ApiError, AppState};

/// Body for a classification preview.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClassifyRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Query for keyword autocomplete.
#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    /// Partially typed keyword
    pub input: Option<String>,
    /// Maximum suggestions, clamped to 1..=10
    pub limit: Option<usize>,
}

/// Query for listing tickets.
#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Body for assigning a ticket. Without a technician the ticket is routed
/// by its category.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AssignTicketRequest {
    #[serde(default)]
    pub technician_id: Option<Uuid>,
}

/// Body for a status change.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateStatusRequest {
    pub status: TicketStatus,
}

/// Classify a title and description without creating a ticket.
#[utoipa::path(post, path = "/api/v1/tickets/classify", tag = "Tickets",
    request_body = ClassifyRequest,
    responses((status = 200, description = "Routing result", body = Classification)))]
pub async fn classify_ticket(
    State(state): State<AppState>,
    body: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<Classification>, ApiError> {
    let req = json_body(body)?;
    Ok(Json(state.workflow.classify(&req.title, &req.description)))
}

/// Keyword autocomplete for partially typed input.
///
/// Inputs shorter than two characters yield an empty list.
#[utoipa::path(get, path = "/api/v1/tickets/suggestions", tag = "Tickets",
    params(
        ("input" = Option<String>, Query, description = "Partially typed keyword"),
        ("limit" = Option<usize>, Query, description = "Maximum suggestions (1-10)"),
    ),
    responses(
        (status = 200, description = "Ranked suggestions", body = [KeywordSuggestion]),
        (status = 400, description = "Invalid query"),
    ))]
pub async fn get_suggestions(
    State(state): State<AppState>,
    query: Result<Query<SuggestionsQuery>, QueryRejection>,
) -> Result<Json<Vec<KeywordSuggestion>>, ApiError> {
    let query = query_params(query)?;
    let input = query.input.unwrap_or_default();
    Ok(Json(state.workflow.suggestions(&input, query.limit)))
}

/// Create a ticket, routing it to a category and optionally a technician.
#[utoipa::path(post, path = "/api/v1/tickets", tag = "Tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Created", body = Ticket),
        (status = 400, description = "Invalid input"),
    ))]
pub async fn create_ticket(
    State(state): State<AppState>,
    body: Result<Json<CreateTicketRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(body)?;
    let ticket = state.workflow.create_ticket(req).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// List tickets, newest first.
#[utoipa::path(get, path = "/api/v1/tickets", tag = "Tickets",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("assigned_to" = Option<Uuid>, Query, description = "Filter by technician"),
        ("limit" = Option<usize>, Query, description = "Page size (max 200)"),
        ("offset" = Option<usize>, Query, description = "Items to skip"),
    ),
    responses(
        (status = 200, description = "Success"),
        (status = 400, description = "Invalid query"),
    ))]
pub async fn list_tickets(
    State(state): State<AppState>,
    query: Result<Query<ListTicketsQuery>, QueryRejection>,
) -> Result<Json<ListResponse<Ticket>>, ApiError> {
    let query = query_params(query)?;
    let status = query
        .status
        .as_deref()
        .map(str::parse::<TicketStatus>)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let category = query
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let limit = query
        .limit
        .unwrap_or(defaults::PAGE_LIMIT)
        .min(defaults::PAGE_LIMIT_MAX);
    let offset = query.offset.unwrap_or(defaults::PAGE_OFFSET);

    let response = state
        .workflow
        .list_tickets(ListTicketsRequest {
            status,
            category,
            assigned_to: query.assigned_to,
            limit: Some(limit),
            offset: Some(offset),
        })
        .await?;

    Ok(Json(ListResponse {
        data: response.tickets,
        pagination: PaginationMeta::new(response.total, limit, offset),
    }))
}

#[utoipa::path(get, path = "/api/v1/tickets/{id}", tag = "Tickets",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Success", body = Ticket),
        (status = 400, description = "Malformed ticket ID"),
        (status = 404, description = "Not found"),
    ))]
pub async fn get_ticket(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let id = path_param(id)?;
    Ok(Json(state.workflow.get_ticket(id).await?))
}

/// Assign a ticket. An empty body or a null `technician_id` auto-assigns by
/// the ticket's category.
#[utoipa::path(post, path = "/api/v1/tickets/{id}/assign", tag = "Tickets",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body(content = AssignTicketRequest, description = "Optional; omit to auto-assign"),
    responses(
        (status = 200, description = "Assigned", body = Ticket),
        (status = 404, description = "Ticket or technician not found"),
        (status = 409, description = "No technician available"),
    ))]
pub async fn assign_ticket(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Bytes,
) -> Result<Json<Ticket>, ApiError> {
    let id = path_param(id)?;
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        AssignTicketRequest::default()
    } else {
        serde_json::from_slice::<AssignTicketRequest>(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?
    };

    let ticket = match req.technician_id {
        Some(technician_id) => state.workflow.assign(id, technician_id).await?,
        None => state.workflow.auto_assign(id).await?,
    };
    Ok(Json(ticket))
}

#[utoipa::path(patch, path = "/api/v1/tickets/{id}/status", tag = "Tickets",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated", body = Ticket),
        (status = 400, description = "Invalid transition"),
        (status = 404, description = "Not found"),
    ))]
pub async fn update_status(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let id = path_param(id)?;
    let req = json_body(body)?;
    Ok(Json(state.workflow.change_status(id, req.status).await?))
}
