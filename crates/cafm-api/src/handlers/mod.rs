//! HTTP handlers for cafm-api.

pub mod system;
pub mod technicians;
pub mod tickets;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ApiError;

// =============================================================================
// STANDARD RESPONSE TYPES
// =============================================================================

/// Pagination metadata for list responses.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PaginationMeta {
    /// Total number of items matching the query (across all pages)
    pub total: usize,
    /// Maximum number of items per page
    pub limit: usize,
    /// Number of items skipped
    pub offset: usize,
    /// True if more items are available after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: usize, limit: usize, offset: usize) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// List response wrapper with pagination metadata.
///
/// ```json
/// {
///   "data": [...],
///   "pagination": { "total": 100, "limit": 50, "offset": 0, "has_more": true }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Unwrap a JSON body, reporting malformed bodies as 400.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Unwrap path parameters, reporting unparsable segments as 400.
pub(crate) fn path_param<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Unwrap a query string, reporting unparsable parameters as 400.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}
