use chrono::{DateTime, Days, Months, TimeDelta, Timelike, Utc};

use crate::core::util::date_util::{to_iso_millis, Clock, DateLabelFormat, DateLabeler};
use crate::domain::graph::util::graph_step::StepSize;
use crate::domain::promql::model::PromQlParams;

fn parse_optional(raw: Option<&str>, dates: &DateLabeler) -> Option<DateTime<Utc>> {
    raw.and_then(|s| dates.parse_instant(s))
}

fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Resolves a picker range into the `[start, end]` ISO strings sent to the metrics backend.
///
/// Missing or invalid bounds default to the last 24 hours. An end on today's local date
/// becomes "now" truncated to the minute; any other end is extended to the following local
/// midnight so the whole picked day is covered.
pub fn resolve_metric_date_range(
    from: Option<&str>,
    to: Option<&str>,
    clock: &dyn Clock,
    dates: &DateLabeler,
) -> (String, String) {
    let now = clock.now();
    let start = parse_optional(from, dates).unwrap_or(now - TimeDelta::hours(24));
    let end = parse_optional(to, dates).unwrap_or(now);

    let end_day = dates.local_date(end);
    let metric_end = if end_day == dates.local_date(now) {
        truncate_to_minute(now)
    } else {
        end_day
            .checked_add_days(Days::new(1))
            .and_then(|next| dates.start_of_local_day(next))
            .unwrap_or(end)
    };

    (to_iso_millis(start), to_iso_millis(metric_end))
}

/// Builds `query_range` parameters. Missing bounds are sent empty; an end on today's local
/// date is replaced with the current instant.
pub fn create_promql_params(
    query: &str,
    start: Option<&str>,
    end: Option<&str>,
    step: &str,
    clock: &dyn Clock,
    dates: &DateLabeler,
) -> PromQlParams {
    let now = clock.now();
    let end = match end {
        Some(raw) => match dates.parse_instant(raw) {
            Some(instant) if dates.local_date(instant) == dates.local_date(now) => to_iso_millis(now),
            _ => raw.to_string(),
        },
        None => String::new(),
    };

    PromQlParams {
        query: query.to_string(),
        start: start.unwrap_or_default().to_string(),
        end,
        step: step.to_string(),
    }
}

/// One calendar month back from now, hourly.
pub fn last_month_params(query: &str, clock: &dyn Clock) -> PromQlParams {
    let now = clock.now();
    let start = now.checked_sub_months(Months::new(1)).unwrap_or(now);

    PromQlParams {
        query: query.to_string(),
        start: to_iso_millis(start),
        end: to_iso_millis(now),
        step: StepSize::ONE_HOUR.to_string(),
    }
}
