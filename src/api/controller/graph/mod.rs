use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::dto::graph_dto::{DateRangeQuery, EnergyGraphQuery, StepQuery};
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::common::model::GraphData;
use crate::domain::graph::dto::graph_fill_request::GraphFillRequest;
use crate::domain::graph::dto::graph_merge_request::GraphMergeRequest;
use crate::domain::graph::dto::graph_parse_request::GraphParseRequest;
use crate::domain::graph::dto::graph_response::{DateRangeResponse, GraphRowsResponse, StepResponse};
use crate::domain::graph::service::energy_service::DonutSlice;
use crate::domain::promql::model::PromQlResponse;
use crate::errors::AppError;

pub struct GraphController;

impl GraphController {
    pub async fn parse(
        State(state): State<AppState>,
        Json(payload): Json<GraphParseRequest>,
    ) -> Result<Json<ApiResponse<GraphRowsResponse>>, AppError> {
        to_json(state.graph_service.parse(payload).await)
    }

    pub async fn fill(
        State(state): State<AppState>,
        Json(payload): Json<GraphFillRequest>,
    ) -> Result<Json<ApiResponse<GraphRowsResponse>>, AppError> {
        to_json(state.graph_service.fill(payload).await)
    }

    pub async fn merge(
        State(state): State<AppState>,
        Json(payload): Json<GraphMergeRequest>,
    ) -> Result<Json<ApiResponse<GraphData>>, AppError> {
        to_json(state.graph_service.merge(payload).await)
    }

    pub async fn step(
        State(state): State<AppState>,
        Query(q): Query<StepQuery>,
    ) -> Result<Json<ApiResponse<StepResponse>>, AppError> {
        to_json(state.graph_service.step(q).await)
    }

    pub async fn date_range(
        State(state): State<AppState>,
        Query(q): Query<DateRangeQuery>,
    ) -> Result<Json<ApiResponse<DateRangeResponse>>, AppError> {
        to_json(state.graph_service.date_range(q).await)
    }

    pub async fn energy_donut(
        State(state): State<AppState>,
        Json(payload): Json<Option<PromQlResponse>>,
    ) -> Result<Json<ApiResponse<Vec<DonutSlice>>>, AppError> {
        to_json(state.graph_service.energy_donut(payload).await)
    }

    pub async fn energy_graph(
        State(state): State<AppState>,
        Path(device_type): Path<String>,
        Query(q): Query<EnergyGraphQuery>,
    ) -> Result<Json<ApiResponse<GraphRowsResponse>>, AppError> {
        to_json(state.graph_service.energy_graph(device_type, q).await)
    }
}
