//! Format routes (e.g., /api/v1/format/*)

use axum::{routing::get, Router};

use crate::api::controller::format::FormatController;
use crate::app_state::AppState;

pub fn format_routes() -> Router<AppState> {
    Router::new().route("/{kind}", get(FormatController::format))
}
