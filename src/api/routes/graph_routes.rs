//! Graph routes (e.g., /api/v1/graph/*)

use axum::{routing::{get, post}, Router};

use crate::api::controller::graph::GraphController;
use crate::app_state::AppState;

/// Build the router for graph endpoints under /api/v1/graph
pub fn graph_routes() -> Router<AppState> {
    Router::new()
        .route("/parse", post(GraphController::parse))
        .route("/fill", post(GraphController::fill))
        .route("/merge", post(GraphController::merge))
        .route("/step", get(GraphController::step))
        .route("/date-range", get(GraphController::date_range))

        // Energy
        .route("/energy/donut", post(GraphController::energy_donut))
        .route("/energy/{device_type}", get(GraphController::energy_graph))
}
