use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::common::model::GraphData;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GraphFillRequest {
    #[serde(default)]
    pub rows: GraphData,
    pub start: Option<String>,
    pub end: Option<String>,
    #[validate(length(min = 2))]
    pub locale: Option<String>,
    /// `<n>s|m|h|d`; anything else means one hour.
    pub step: Option<String>,
}
