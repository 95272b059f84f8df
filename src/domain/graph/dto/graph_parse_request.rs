use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::promql::model::PromQlResponse;

/// Payload for turning a fetched range response into chart rows.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GraphParseRequest {
    /// Absent when the fetch produced nothing; answered with `rows: null`.
    pub response: Option<PromQlResponse>,
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(length(min = 2))]
    pub locale: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}
