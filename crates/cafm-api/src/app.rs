//! Application state, middleware and route table.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use governor::{Quota, RateLimiter};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use uuid::Uuid;

use cafm_core::defaults;
use cafm_routing::KeywordRouter;

use crate::config::{ConfigError, ConfigResult, RateLimitConfig, ServerConfig};
use crate::handlers::{system, technicians, tickets};
use crate::services::{policy_for, TicketWorkflow};
use crate::store::{InMemoryTechnicianDirectory, InMemoryTicketStore};

/// Request ID generator using UUIDv7 (time-ordered).
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CAFM Ticket API",
        version = "2026.10.0",
        description = "Maintenance tickets routed to service categories and technicians by keyword"
    ),
    paths(
        system::list_categories,
        tickets::classify_ticket,
        tickets::get_suggestions,
        tickets::create_ticket,
        tickets::list_tickets,
        tickets::get_ticket,
        tickets::assign_ticket,
        tickets::update_status,
        technicians::create_technician,
        technicians::list_technicians,
    ),
    components(schemas(
        cafm_core::Category,
        cafm_core::TicketPriority,
        cafm_core::TicketStatus,
        cafm_core::KeywordSuggestion,
        cafm_core::Classification,
        cafm_core::Ticket,
        cafm_core::CreateTicketRequest,
        cafm_core::Technician,
        cafm_core::CreateTechnicianRequest,
        tickets::ClassifyRequest,
        tickets::AssignTicketRequest,
        tickets::UpdateStatusRequest,
        system::CategoryInfo,
        crate::handlers::PaginationMeta,
    )),
    tags(
        (name = "Tickets", description = "Ticket routing, assignment and lifecycle"),
        (name = "Technicians", description = "Technician directory"),
        (name = "Categories", description = "Routing taxonomy"),
    )
)]
pub struct ApiDoc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub workflow: TicketWorkflow,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    pub fn new(workflow: TicketWorkflow, rate_limiter: Option<Arc<GlobalRateLimiter>>) -> Self {
        Self {
            workflow,
            rate_limiter,
        }
    }

    /// In-memory stores, the standard taxonomy and the configured policy.
    pub fn from_config(config: &ServerConfig) -> ConfigResult<Self> {
        let workflow = TicketWorkflow::new(
            Arc::new(InMemoryTicketStore::new()),
            Arc::new(InMemoryTechnicianDirectory::new()),
            policy_for(config.assignment_policy),
            KeywordRouter::default(),
        )
        .with_auto_assign(config.auto_assign);

        Ok(Self::new(workflow, build_rate_limiter(&config.rate_limit)?))
    }
}

/// Build the global limiter: `requests` per `period_secs`, with the full
/// allowance available as a burst.
pub fn build_rate_limiter(config: &RateLimitConfig) -> ConfigResult<Option<Arc<GlobalRateLimiter>>> {
    if !config.enabled {
        return Ok(None);
    }

    let burst = NonZeroU32::new(config.requests).ok_or_else(|| {
        ConfigError::Validation("RATE_LIMIT_REQUESTS must be greater than zero".to_string())
    })?;
    let replenish = Duration::from_secs(config.period_secs) / config.requests;
    let quota = Quota::with_period(replenish)
        .ok_or_else(|| {
            ConfigError::Validation("RATE_LIMIT_PERIOD_SECS must be greater than zero".to_string())
        })?
        .allow_burst(burst);

    info!(
        requests = config.requests,
        period_secs = config.period_secs,
        "Rate limiting enabled"
    );
    Ok(Some(Arc::new(RateLimiter::direct(quota))))
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(defaults::CORS_MAX_AGE_SECS))
}

/// Full route table with the middleware stack.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(system::health_check))
        .route("/openapi.yaml", get(system::openapi_yaml))
        .route("/api/v1/categories", get(system::list_categories))
        .route("/api/v1/tickets/classify", post(tickets::classify_ticket))
        .route("/api/v1/tickets/suggestions", get(tickets::get_suggestions))
        .route(
            "/api/v1/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route("/api/v1/tickets/:id", get(tickets::get_ticket))
        .route("/api/v1/tickets/:id/assign", post(tickets::assign_ticket))
        .route("/api/v1/tickets/:id/status", patch(tickets::update_status))
        .route(
            "/api/v1/technicians",
            get(technicians::list_technicians).post(technicians::create_technician),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(&config.allowed_origins))
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_SIZE_BYTES))
        .with_state(state)
}
