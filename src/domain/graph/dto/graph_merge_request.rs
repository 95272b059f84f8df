use serde::{Deserialize, Serialize};

use crate::domain::common::model::GraphData;

/// Series to combine; `null` entries stand for series without data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphMergeRequest {
    #[serde(default)]
    pub series: Vec<Option<GraphData>>,
}
