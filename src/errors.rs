use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::api::dto::ApiResponse;
use crate::core::client::promql_client::PromQlClientError;
use crate::domain::format::service::format_service::UnknownFormatKind;
use crate::domain::graph::util::graph_fill::GraphFillError;
use crate::domain::resource::util::device_type::UnknownDeviceType;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Body parsing error: {0}")]
    BodyParsingError(String),

    #[error("Metrics backend error: {0}")]
    UpstreamError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BodyParsingError(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            AppError::BodyParsingError(_) => "BAD_REQUEST",
            AppError::UpstreamError(_) => "BAD_GATEWAY",
            AppError::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// Classifies service errors by their root type; anything unrecognized is a 500.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        if err.is::<validator::ValidationErrors>() || err.is::<GraphFillError>() {
            AppError::BodyParsingError(err.to_string())
        } else if err.is::<UnknownDeviceType>() || err.is::<UnknownFormatKind>() {
            AppError::NotFound(err.to_string())
        } else if err.is::<PromQlClientError>() {
            AppError::UpstreamError(err.to_string())
        } else {
            internal_error(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = Json(ApiResponse::<()>::err(self.code(), self.to_string()));

        (status, body).into_response()
    }
}
