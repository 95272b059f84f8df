//! Shared domain types (graph rows, filter ranges)

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One chart-ready entry: the x-axis label plus one numeric-or-null field per category.
///
/// Serialized flat, e.g. `{"date": "7/9/2023, 12:00:00 PM", "CPU": 10.0, "Memory": null}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphRow {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<f64>>,
}

pub type GraphData = Vec<GraphRow>;

impl GraphRow {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, category: impl Into<String>, value: Option<f64>) -> Self {
        self.values.insert(category.into(), value);
        self
    }

    /// A placeholder row carrying `null` for every category.
    pub fn blank<S: AsRef<str>>(date: impl Into<String>, categories: &[S]) -> Self {
        Self {
            date: date.into(),
            values: categories
                .iter()
                .map(|c| (c.as_ref().to_string(), None))
                .collect(),
        }
    }

    /// `None` when the category is absent, `Some(None)` when it is present but null.
    pub fn value(&self, category: &str) -> Option<Option<f64>> {
        self.values.get(category).copied()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Shallow merge: fields of `other` overwrite fields of `self` with the same name.
    pub fn merge_from(&mut self, other: &GraphRow) {
        self.date.clone_from(&other.date);
        for (category, value) in &other.values {
            self.values.insert(category.clone(), *value);
        }
    }
}

/// Inclusive `[from, to]` bound pair; either side may be open.
pub type DateRange = (Option<NaiveDate>, Option<NaiveDate>);
pub type NumberRange = (Option<f64>, Option<f64>);
