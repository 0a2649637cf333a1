//! REST API handlers for the process dashboard
//!
//! These handlers use the shared DashboardService.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::service::DashboardService;
use crate::aggregates::{Action, CarrierEfficiency, ExecutiveSummary, ProcessFlow, RiskEntry, RootCauseShare, StatusLeakage};
use crate::models::ProcessRow;
use crate::simulator::{Scenario, SimulationResult};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: ExecutiveSummary,
    pub loaded_at: String,
}

#[derive(Serialize)]
pub struct OrdersResponse {
    pub total: usize,
    pub orders: Vec<ProcessRow>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = DashboardService;

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/summary
pub async fn get_summary(State(service): State<AppState>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        summary: service.summary(),
        loaded_at: service.table().loaded_at().to_rfc3339(),
    })
}

/// GET /api/v1/leakage/by-status
pub async fn get_leakage_by_status(State(service): State<AppState>) -> Json<Vec<StatusLeakage>> {
    Json(service.leakage_by_status())
}

/// GET /api/v1/carriers
pub async fn get_carriers(State(service): State<AppState>) -> Json<Vec<CarrierEfficiency>> {
    Json(service.carriers())
}

/// GET /api/v1/actions
pub async fn get_actions(State(service): State<AppState>) -> Json<Vec<Action>> {
    Json(service.actions())
}

/// GET /api/v1/flow
pub async fn get_flow(State(service): State<AppState>) -> Json<ProcessFlow> {
    Json(service.flow())
}

/// GET /api/v1/root-causes
pub async fn get_root_causes(State(service): State<AppState>) -> Json<Vec<RootCauseShare>> {
    Json(service.root_causes())
}

/// GET /api/v1/risk?limit=N
pub async fn get_risk(
    State(service): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Json<Vec<RiskEntry>> {
    Json(service.highest_risk(params.limit.unwrap_or(10)))
}

/// GET /api/v1/simulate?delay_reduction=&damage_reduction=&route_saving=
pub async fn simulate(
    State(service): State<AppState>,
    Query(scenario): Query<Scenario>,
) -> Result<Json<SimulationResult>, (StatusCode, Json<ErrorResponse>)> {
    match service.simulate(&scenario) {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() }))),
    }
}

/// GET /api/v1/orders?limit=N
pub async fn get_orders(
    State(service): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Json<OrdersResponse> {
    let limit = params.limit.unwrap_or(100);
    Json(OrdersResponse {
        total: service.table().len(),
        orders: service.orders(limit).to_vec(),
    })
}
