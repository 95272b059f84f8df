use chrono::DateTime;
use thiserror::Error;

use crate::core::util::date_util::DateLabelFormat;
use crate::core::util::number_util::parse_string_into_number;
use crate::domain::common::model::{GraphData, GraphRow};
use crate::domain::graph::util::graph_fill::{fill_missing_graph_data, GraphFillError};
use crate::domain::graph::util::graph_step::get_step_from_range;
use crate::domain::promql::model::{PromQlResponse, PromQlSample};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphParseError {
    #[error("no series labeled `{0}` in response")]
    MetricNotFound(String),

    #[error(transparent)]
    Fill(#[from] GraphFillError),
}

/// Samples of the first series whose `data_label` equals `data_label`.
pub fn get_target_metrics<'a>(
    response: Option<&'a PromQlResponse>,
    data_label: &str,
) -> Option<&'a [PromQlSample]> {
    response?
        .data
        .result
        .iter()
        .find(|series| series.metric.data_label == data_label)
        .map(|series| series.values.as_slice())
}

/// `"cpu_usage"` -> `"Cpu"`: the text before the first underscore, first letter upper-cased.
pub fn category_from_label(data_label: &str) -> String {
    let head = data_label.split('_').next().unwrap_or_default();
    let mut chars = head.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One row per sample, keyed by the localized label of its timestamp.
/// Samples whose timestamp is out of range are dropped.
pub fn build_graph_rows(
    samples: &[PromQlSample],
    data_label: &str,
    locale: &str,
    dates: &dyn DateLabelFormat,
) -> GraphData {
    let category = category_from_label(data_label);

    samples
        .iter()
        .filter_map(|sample| {
            let instant = DateTime::from_timestamp_millis((sample.timestamp() * 1000.0) as i64)?;
            Some(
                GraphRow::new(dates.format_local_date(instant, locale))
                    .with_value(category.as_str(), parse_string_into_number(sample.raw_value())),
            )
        })
        .collect()
}

/// Extracts the series named `data_label` and turns it into a gap-free, chart-ready sequence
/// over `[start, end]` at the step chosen for that window.
pub fn parse_graph_data(
    response: Option<&PromQlResponse>,
    data_label: &str,
    locale: &str,
    start: Option<&str>,
    end: Option<&str>,
    dates: &dyn DateLabelFormat,
) -> Result<GraphData, GraphParseError> {
    let samples = get_target_metrics(response, data_label)
        .ok_or_else(|| GraphParseError::MetricNotFound(data_label.to_string()))?;

    let rows = build_graph_rows(samples, data_label, locale, dates);
    let step = get_step_from_range(start, end, dates).to_string();

    Ok(fill_missing_graph_data(&rows, start, end, locale, Some(&step), dates)?)
}
