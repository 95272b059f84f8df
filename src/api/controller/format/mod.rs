use axum::extract::{Path, Query};
use axum::Json;

use crate::api::dto::graph_dto::FormatQuery;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::domain::format::service::format_service::{self, FormattedValue};
use crate::errors::AppError;

pub struct FormatController;

impl FormatController {
    pub async fn format(
        Path(kind): Path<String>,
        Query(q): Query<FormatQuery>,
    ) -> Result<Json<ApiResponse<FormattedValue>>, AppError> {
        to_json(format_service::format(kind, q.value).await)
    }
}
