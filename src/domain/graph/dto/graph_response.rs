use serde::Serialize;

use crate::domain::common::model::GraphData;
use crate::domain::graph::util::graph_step::StepSize;

/// Chart rows plus the step they were sampled at. `rows` is `null` when there is nothing to plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphRowsResponse {
    pub step: StepSize,
    pub rows: Option<GraphData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepResponse {
    pub step: StepSize,
}

/// Backend query window for a picked date range, with the step that window selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeResponse {
    pub start: String,
    pub end: String,
    pub step: StepSize,
}
