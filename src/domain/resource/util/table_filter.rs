//! Row predicates for the resource tables' column filters.
//!
//! An empty query never filters a row out. A non-empty query filters out rows whose value
//! is missing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::model::{DateRange, NumberRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Existence {
    Exist,
    NotExist,
}

/// Inclusive calendar-day comparison; either bound may be open.
pub fn is_date_in_range(target: Option<NaiveDate>, query: DateRange) -> bool {
    let (from, to) = query;
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(target) = target else {
        return false;
    };

    from.map_or(true, |from| from <= target) && to.map_or(true, |to| target <= to)
}

/// Every whitespace-separated word of `query` occurs in `val`, ignoring case.
pub fn is_all_string_included(val: Option<&str>, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let Some(val) = val else {
        return false;
    };

    let val = val.to_lowercase();
    query
        .split(' ')
        .all(|word| val.contains(&word.to_lowercase()))
}

fn in_bounds(value: f64, (min, max): NumberRange) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

pub fn is_number_in_range(val: Option<f64>, query: NumberRange) -> bool {
    if query.0.is_none() && query.1.is_none() {
        return true;
    }
    val.is_some_and(|v| in_bounds(v, query))
}

/// At least one of `val` lies within the range.
pub fn is_numbers_in_range(val: Option<&[f64]>, query: NumberRange) -> bool {
    if query.0.is_none() && query.1.is_none() {
        return true;
    }
    val.unwrap_or_default().iter().any(|v| in_bounds(*v, query))
}

/// OR filter over the selected options.
pub fn is_selected<S: AsRef<str>>(val: Option<&str>, query: &[S]) -> bool {
    if query.is_empty() {
        return true;
    }
    val.is_some_and(|v| query.iter().any(|q| q.as_ref() == v))
}

pub fn is_any_value_selected<S: AsRef<str>>(val: Option<&[S]>, query: &[S]) -> bool {
    if query.is_empty() {
        return true;
    }
    val.unwrap_or_default()
        .iter()
        .any(|v| query.iter().any(|q| q.as_ref() == v.as_ref()))
}

/// `NotExist` matches a zero count, `Exist` a positive one; both together match anything present.
pub fn is_existence_selected(val: Option<f64>, query: &[Existence]) -> bool {
    if query.is_empty() {
        return true;
    }
    let Some(val) = val else {
        return false;
    };

    let exist = query.contains(&Existence::Exist);
    let not_exist = query.contains(&Existence::NotExist);
    match (exist, not_exist) {
        (true, true) => true,
        (_, true) => val == 0.0,
        _ => val > 0.0,
    }
}
