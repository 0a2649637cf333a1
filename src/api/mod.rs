//! API module for the process dashboard
//!
//! REST access to the loaded process table and its views.

pub mod handlers;
pub mod service;

pub use service::DashboardService;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(service: DashboardService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        // Executive dashboard
        .route("/api/v1/summary", get(handlers::get_summary))
        .route("/api/v1/leakage/by-status", get(handlers::get_leakage_by_status))
        .route("/api/v1/carriers", get(handlers::get_carriers))
        .route("/api/v1/actions", get(handlers::get_actions))
        // Deviation mining
        .route("/api/v1/flow", get(handlers::get_flow))
        .route("/api/v1/root-causes", get(handlers::get_root_causes))
        .route("/api/v1/risk", get(handlers::get_risk))
        // Simulator
        .route("/api/v1/simulate", get(handlers::simulate))
        // Raw data
        .route("/api/v1/orders", get(handlers::get_orders))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
