use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::core::util::number_util::parse_leading_float;
use crate::domain::graph::service::graph_parse_service::{category_from_label, get_target_metrics};
use crate::domain::promql::model::{PromQlResponse, PromQlSample};
use crate::domain::resource::util::device_type::{DeviceType, DEVICE_TYPE_ORDER};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Series label carrying a device type's energy, e.g. `CPU_energy` or `all_energy`.
pub fn energy_label(device_type: &str) -> String {
    format!("{device_type}_energy")
}

/// Hourly total energy (Wh) across every device, labeled `<device_type>_energy`.
pub fn all_energy_query(device_type: &str) -> String {
    format!(
        r#"label_replace(sum(increase({{__name__=~".*_metricEnergyJoules_reading",job=~".*"}}[1h])/3600),"data_label","{}","","")"#,
        energy_label(device_type)
    )
}

fn device_energy_query(device_type: DeviceType) -> String {
    format!(
        r#"label_replace(sum(increase({{__name__=~"{t}_metricEnergyJoules_reading",job=~".*"}}[1h])),"data_label","{label}","","")"#,
        t = device_type,
        label = energy_label(device_type.as_str())
    )
}

/// Per-device-type energy increase (J), one series per type in catalogue order.
pub fn energy_donut_query() -> String {
    DEVICE_TYPE_ORDER
        .into_iter()
        .map(device_energy_query)
        .collect::<Vec<_>>()
        .join(" or ")
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSlice {
    pub name: String,
    pub value: Option<f64>,
}

/// Joules to Wh. Each sample counts its leading number (`"12abc"` is 12); samples
/// without one are skipped.
fn sum_total_consumptions(samples: &[PromQlSample]) -> f64 {
    let joules: f64 = samples
        .iter()
        .filter_map(|s| parse_leading_float(s.raw_value()))
        .sum();
    joules / SECONDS_PER_HOUR
}

/// One slice per device type; `value` is absent when the response lacks that type's series.
pub fn parse_energy_donut_chart_data(response: Option<&PromQlResponse>) -> Vec<DonutSlice> {
    DEVICE_TYPE_ORDER
        .into_iter()
        .map(|device_type| DonutSlice {
            name: category_from_label(device_type.as_str()),
            value: get_target_metrics(response, &energy_label(device_type.as_str()))
                .map(sum_total_consumptions),
        })
        .collect()
}
