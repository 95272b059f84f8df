//! Wire types of the metrics backend (Prometheus-compatible `query_range` responses).

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromQlResponse {
    pub status: String,
    pub data: PromQlData,
    #[serde(default)]
    pub stats: Option<PromQlStats>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromQlData {
    #[serde(rename = "resultType", default)]
    pub result_type: String,
    #[serde(default)]
    pub result: Vec<PromQlSeries>,
}

/// One named series: identifying labels plus ordered `[timestamp, value]` samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromQlSeries {
    pub metric: PromQlMetric,
    #[serde(default)]
    pub values: Vec<PromQlSample>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromQlMetric {
    #[serde(rename = "__name__", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub data_label: String,
}

/// `[unix seconds, value string]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromQlSample(pub f64, pub String);

impl PromQlSample {
    pub fn timestamp(&self) -> f64 {
        self.0
    }

    pub fn raw_value(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromQlStats {
    #[serde(rename = "seriesFetched")]
    pub series_fetched: String,
}

/// Form parameters of a `query_range` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromQlParams {
    pub query: String,
    pub start: String,
    pub end: String,
    pub step: String,
}

impl PromQlParams {
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("query", self.query.as_str()),
            ("start", self.start.as_str()),
            ("end", self.end.as_str()),
            ("step", self.step.as_str()),
        ]
    }

    /// `application/x-www-form-urlencoded` rendering of the parameters.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
