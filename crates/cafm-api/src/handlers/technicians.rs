//! Technician HTTP handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use cafm_core::{CreateTechnicianRequest, Technician};

use super::json_body;
use crate::{ApiError, AppState};

#[utoipa::path(post, path = "/api/v1/technicians", tag = "Technicians",
    request_body = CreateTechnicianRequest,
    responses(
        (status = 201, description = "Created", body = Technician),
        (status = 400, description = "Invalid input"),
    ))]
pub async fn create_technician(
    State(state): State<AppState>,
    body: Result<Json<CreateTechnicianRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(body)?;
    let technician = state.workflow.register_technician(req).await?;
    Ok((StatusCode::CREATED, Json(technician)))
}

#[utoipa::path(get, path = "/api/v1/technicians", tag = "Technicians",
    responses((status = 200, description = "Success", body = [Technician])))]
pub async fn list_technicians(
    State(state): State<AppState>,
) -> Result<Json<Vec<Technician>>, ApiError> {
    Ok(Json(state.workflow.list_technicians().await?))
}
