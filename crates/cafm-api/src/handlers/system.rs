//! Health, API document and taxonomy handlers.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::OpenApi;

use cafm_core::Category;

use crate::{ApiDoc, AppState};

/// A category with the role it routes to and its keywords.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CategoryInfo {
    pub category: Category,
    pub role: String,
    pub keywords: Vec<String>,
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// OpenAPI document rendered as YAML.
pub async fn openapi_yaml() -> impl IntoResponse {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => (StatusCode::OK, [(header::CONTENT_TYPE, "application/yaml")], yaml),
        Err(e) => {
            error!(error = %e, "Failed to render OpenAPI document");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                "Failed to render OpenAPI document".to_string(),
            )
        }
    }
}

/// Every routing category: General first with the default role, then the
/// taxonomy's profiles in declaration order.
#[utoipa::path(get, path = "/api/v1/categories", tag = "Categories",
    responses((status = 200, description = "Success", body = [CategoryInfo])))]
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    let general = CategoryInfo {
        category: Category::General,
        role: state
            .workflow
            .router()
            .get_role_for_category(Category::General)
            .to_string(),
        keywords: Vec::new(),
    };
    let profiles = state.workflow.profiles().iter().map(|p| CategoryInfo {
        category: p.category,
        role: p.role.clone(),
        keywords: p.keywords.clone(),
    });

    Json(std::iter::once(general).chain(profiles).collect())
}
