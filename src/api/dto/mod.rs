use serde::Serialize;

pub mod graph_dto;

/// Envelope of every `/api/v1` response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub is_successful: bool,
    pub data: Option<T>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            is_successful: true,
            data: Some(data),
            error_code: None,
            error_msg: None,
        }
    }

    pub fn err(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            data: None,
            error_code: Some(code.into()),
            error_msg: Some(msg.into()),
        }
    }
}
