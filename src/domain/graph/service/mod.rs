//! Graph services: PromQL extraction, date-range resolution, energy charts, and the
//! [`GraphService`] facade the HTTP layer calls into.

pub mod energy_service;
pub mod graph_parse_service;
pub mod metric_date_range;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};
use validator::Validate;

use crate::api::dto::graph_dto::{DateRangeQuery, EnergyGraphQuery, StepQuery};
use crate::core::client::metrics_source_trait::MetricsSource;
use crate::core::util::date_util::{Clock, DateLabeler, SystemClock};
use crate::domain::common::model::GraphData;
use crate::domain::graph::dto::graph_fill_request::GraphFillRequest;
use crate::domain::graph::dto::graph_merge_request::GraphMergeRequest;
use crate::domain::graph::dto::graph_parse_request::GraphParseRequest;
use crate::domain::graph::dto::graph_response::{DateRangeResponse, GraphRowsResponse, StepResponse};
use crate::domain::graph::service::energy_service::{
    all_energy_query, energy_label, parse_energy_donut_chart_data, DonutSlice,
};
use crate::domain::graph::service::graph_parse_service::{parse_graph_data, GraphParseError};
use crate::domain::graph::service::metric_date_range::{
    create_promql_params, last_month_params, resolve_metric_date_range,
};
use crate::domain::graph::util::graph_fill::{fill_missing_graph_data, GraphFillError};
use crate::domain::graph::util::graph_merge::merge_multi_graph_data;
use crate::domain::graph::util::graph_step::{get_step_from_range, StepSize};
use crate::domain::promql::model::PromQlResponse;
use crate::domain::resource::util::device_type::DeviceType;

pub const ALL_DEVICES: &str = "all";

#[derive(Clone)]
pub struct GraphService {
    labeler: DateLabeler,
    clock: Arc<dyn Clock>,
    source: Option<Arc<dyn MetricsSource>>,
    default_locale: String,
}

impl Default for GraphService {
    fn default() -> Self {
        Self::new(DateLabeler::utc(), Arc::new(SystemClock), None, "en")
    }
}

impl GraphService {
    pub fn new(
        labeler: DateLabeler,
        clock: Arc<dyn Clock>,
        source: Option<Arc<dyn MetricsSource>>,
        default_locale: impl Into<String>,
    ) -> Self {
        Self {
            labeler,
            clock,
            source,
            default_locale: default_locale.into(),
        }
    }

    pub fn labeler(&self) -> &DateLabeler {
        &self.labeler
    }

    fn locale<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_locale)
    }

    fn step_for(&self, start: Option<&str>, end: Option<&str>) -> StepSize {
        let step = get_step_from_range(start, end, &self.labeler);
        debug!(?start, ?end, %step, "selected graph step");
        step
    }

    /// Missing series and unusable windows become `None`; an oversized grid is an error.
    fn rows_or_none(&self, label: &str, result: Result<GraphData, GraphParseError>) -> Result<Option<GraphData>> {
        match result {
            Ok(rows) => Ok(Some(rows)),
            Err(GraphParseError::MetricNotFound(_)) => {
                warn!(label, "series missing from metrics response");
                Ok(None)
            }
            Err(GraphParseError::Fill(err @ GraphFillError::TooManyPoints { .. })) => Err(err.into()),
            Err(err) => {
                debug!(label, error = %err, "no graph rows");
                Ok(None)
            }
        }
    }

    pub async fn parse(&self, req: GraphParseRequest) -> Result<GraphRowsResponse> {
        req.validate()?;

        let start = req.start.as_deref();
        let end = req.end.as_deref();
        let step = self.step_for(start, end);
        let parsed = parse_graph_data(
            req.response.as_ref(),
            &req.label,
            self.locale(req.locale.as_deref()),
            start,
            end,
            &self.labeler,
        );

        Ok(GraphRowsResponse {
            step,
            rows: self.rows_or_none(&req.label, parsed)?,
        })
    }

    pub async fn fill(&self, req: GraphFillRequest) -> Result<GraphRowsResponse> {
        req.validate()?;

        let step = req.step.as_deref().map(StepSize::parse).unwrap_or_default();
        let rows = match fill_missing_graph_data(
            &req.rows,
            req.start.as_deref(),
            req.end.as_deref(),
            self.locale(req.locale.as_deref()),
            req.step.as_deref(),
            &self.labeler,
        ) {
            Ok(rows) => Some(rows),
            Err(err @ GraphFillError::TooManyPoints { .. }) => {
                warn!(error = %err, "rejected gap-fill window");
                return Err(err.into());
            }
            Err(err) => {
                debug!(error = %err, "nothing to fill");
                None
            }
        };

        Ok(GraphRowsResponse { step, rows })
    }

    pub async fn merge(&self, req: GraphMergeRequest) -> Result<GraphData> {
        Ok(merge_multi_graph_data(req.series.iter().map(|s| s.as_deref())))
    }

    pub async fn step(&self, q: StepQuery) -> Result<StepResponse> {
        Ok(StepResponse {
            step: self.step_for(q.start.as_deref(), q.end.as_deref()),
        })
    }

    pub async fn date_range(&self, q: DateRangeQuery) -> Result<DateRangeResponse> {
        let (start, end) = resolve_metric_date_range(
            q.from.as_deref(),
            q.to.as_deref(),
            self.clock.as_ref(),
            &self.labeler,
        );
        let step = self.step_for(Some(&start), Some(&end));
        Ok(DateRangeResponse { start, end, step })
    }

    pub async fn energy_donut(&self, response: Option<PromQlResponse>) -> Result<Vec<DonutSlice>> {
        Ok(parse_energy_donut_chart_data(response.as_ref()))
    }

    /// Fetches and parses the hourly energy series of one device type (or `all`).
    pub async fn energy_graph(&self, device_type: String, q: EnergyGraphQuery) -> Result<GraphRowsResponse> {
        if device_type != ALL_DEVICES {
            device_type.parse::<DeviceType>()?;
        }

        let query = all_energy_query(&device_type);
        let params = if q.from.is_none() && q.to.is_none() {
            last_month_params(&query, self.clock.as_ref())
        } else {
            let (start, end) = resolve_metric_date_range(
                q.from.as_deref(),
                q.to.as_deref(),
                self.clock.as_ref(),
                &self.labeler,
            );
            let step = get_step_from_range(Some(&start), Some(&end), &self.labeler).to_string();
            create_promql_params(&query, Some(&start), Some(&end), &step, self.clock.as_ref(), &self.labeler)
        };

        let step = self.step_for(Some(&params.start), Some(&params.end));
        let Some(source) = self.source.as_ref() else {
            warn!(%device_type, "no metrics backend configured");
            return Ok(GraphRowsResponse { step, rows: None });
        };

        let response = source.query_range(&params).await.inspect_err(|err| {
            warn!(%device_type, error = %err, "energy query failed");
        })?;

        let label = energy_label(&device_type);
        let parsed = parse_graph_data(
            Some(&response),
            &label,
            self.locale(q.locale.as_deref()),
            Some(&params.start),
            Some(&params.end),
            &self.labeler,
        );

        Ok(GraphRowsResponse {
            step,
            rows: self.rows_or_none(&label, parsed)?,
        })
    }
}
