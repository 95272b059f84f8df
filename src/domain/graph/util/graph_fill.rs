use std::collections::HashMap;
use std::iter::FusedIterator;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::core::util::date_util::DateLabelFormat;
use crate::domain::common::model::{GraphData, GraphRow};
use crate::domain::graph::util::graph_alignment::calculate_start_alignment;
use crate::domain::graph::util::graph_step::{StepSize, MAX_GRID_POINTS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphFillError {
    #[error("no rows to fill")]
    NoRows,

    #[error("time window bound is missing")]
    MissingBound,

    #[error("invalid time window bound: {0}")]
    InvalidBound(String),

    #[error("window needs {points} points at this step, limit is {limit}")]
    TooManyPoints { points: usize, limit: usize },
}

/// Evenly spaced instants from `start` to `end`, both inclusive.
#[derive(Debug, Clone)]
pub struct StepGrid {
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: TimeDelta,
}

impl StepGrid {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step: StepSize) -> Self {
        let step = step.as_duration();
        Self {
            next: (step > TimeDelta::zero()).then_some(start),
            end,
            step,
        }
    }
}

impl Iterator for StepGrid {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|instant| *instant <= self.end)?;
        self.next = current.checked_add_signed(self.step);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(next) if next <= self.end => {
                let remaining = (self.end - next).num_milliseconds() / self.step.num_milliseconds();
                let len = usize::try_from(remaining).map_or(usize::MAX, |n| n.saturating_add(1));
                (len, Some(len))
            }
            _ => (0, Some(0)),
        }
    }
}

impl FusedIterator for StepGrid {}

fn resolve_bound(
    raw: Option<&str>,
    dates: &dyn DateLabelFormat,
) -> Result<DateTime<Utc>, GraphFillError> {
    let raw = raw.filter(|s| !s.is_empty()).ok_or(GraphFillError::MissingBound)?;
    dates
        .parse_instant(raw)
        .ok_or_else(|| GraphFillError::InvalidBound(raw.to_string()))
}

/// Emits one row per grid instant between `start` and `end`, reusing the input row whose
/// label matches and otherwise inserting a row with `null` for every category.
///
/// The grid starts at `start` shifted onto the phase of the first row's date (when that
/// label parses). The category set for placeholder rows is taken from the first row only,
/// so callers must pass rows sharing one category vocabulary.
///
/// Grids longer than [`MAX_GRID_POINTS`] are rejected before any row is built.
pub fn fill_missing_graph_data(
    rows: &[GraphRow],
    start: Option<&str>,
    end: Option<&str>,
    locale: &str,
    step: Option<&str>,
    dates: &dyn DateLabelFormat,
) -> Result<GraphData, GraphFillError> {
    let first = rows.first().ok_or(GraphFillError::NoRows)?;
    let start = resolve_bound(start, dates)?;
    let end = resolve_bound(end, dates)?;
    let step = step.map(StepSize::parse).unwrap_or_default();

    let start = match dates.parse_instant(&first.date) {
        Some(first_data) => calculate_start_alignment(start, first_data, step.seconds()),
        None => start,
    };

    let by_label: HashMap<&str, &GraphRow> =
        rows.iter().map(|row| (row.date.as_str(), row)).collect();
    let categories: Vec<&str> = first.categories().collect();

    let grid = StepGrid::new(start, end, step);
    let (points, _) = grid.size_hint();
    if points > MAX_GRID_POINTS {
        return Err(GraphFillError::TooManyPoints {
            points,
            limit: MAX_GRID_POINTS,
        });
    }

    let filled = grid
        .map(|instant| {
            let label = dates.format_local_date(instant, locale);
            match by_label.get(label.as_str()) {
                Some(row) => (*row).clone(),
                None => GraphRow::blank(label, &categories),
            }
        })
        .collect();

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::util::date_util::DateLabeler;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn label(raw: &str) -> String {
        DateLabeler::utc().format_local_date(at(raw), "en")
    }

    fn fill(rows: &[GraphRow], start: &str, end: &str, step: &str) -> Result<GraphData, GraphFillError> {
        fill_missing_graph_data(rows, Some(start), Some(end), "en", Some(step), &DateLabeler::utc())
    }

    #[test]
    fn grid_is_inclusive_and_lazy() {
        let grid = StepGrid::new(
            at("2023-07-09T00:00:00Z"),
            at("2023-07-09T01:00:00Z"),
            StepSize::from_seconds(1_200),
        );
        assert_eq!(grid.size_hint(), (4, Some(4)));
        let instants: Vec<_> = grid.collect();
        assert_eq!(instants.len(), 4);
        assert_eq!(instants[3], at("2023-07-09T01:00:00Z"));

        let empty = StepGrid::new(at("2023-07-09T02:00:00Z"), at("2023-07-09T01:00:00Z"), StepSize::ONE_HOUR);
        assert_eq!(empty.count(), 0);
        let zero = StepGrid::new(at("2023-07-09T00:00:00Z"), at("2023-07-09T01:00:00Z"), StepSize::from_seconds(0));
        assert_eq!(zero.count(), 0);
    }

    #[test]
    fn point_count_matches_window_for_each_step() {
        let end = "2023-07-09T12:00:00Z";
        let rows = vec![GraphRow::new(label(end)).with_value("CPU", Some(10.0))];

        assert_eq!(fill(&rows, "2023-07-09T11:45:00Z", end, "5m").unwrap().len(), 4);
        assert_eq!(fill(&rows, "2023-07-09T08:00:00Z", end, "2h").unwrap().len(), 3);
        assert_eq!(fill(&rows, "2023-07-07T12:00:00Z", end, "1d").unwrap().len(), 3);
        assert_eq!(fill(&rows, "2023-07-09T11:58:30Z", end, "30s").unwrap().len(), 4);
    }

    #[test]
    fn sub_second_start_is_pulled_onto_data_phase() {
        // Labels carry whole seconds, so a start with millis is shifted forward and the
        // first grid point before the data is dropped.
        let end = "2023-07-09T12:00:00.250Z";
        let rows = vec![GraphRow::new(label("2023-07-09T12:00:00Z")).with_value("CPU", Some(10.0))];
        let filled = fill(&rows, "2023-07-09T11:45:00.250Z", end, "5m").unwrap();

        assert_eq!(filled.len(), 3);
        assert_eq!(filled[2].value("CPU"), Some(Some(10.0)));
    }

    #[test]
    fn fills_gaps_with_null() {
        let now = "2023-07-09T12:00:00Z";
        let rows = vec![GraphRow::new(label(now)).with_value("CPU", Some(10.0))];
        let filled = fill(&rows, "2023-07-09T10:00:00Z", "2023-07-09T13:00:00Z", "1h").unwrap();

        assert_eq!(filled.len(), 4);
        assert_eq!(filled[2], rows[0]);
        let nulls = filled.iter().filter(|row| row.value("CPU") == Some(None)).count();
        assert_eq!(nulls, 3);
        assert_eq!(filled[0].date, label("2023-07-09T10:00:00Z"));
    }

    #[test]
    fn labels_are_unique_and_increasing() {
        let labeler = DateLabeler::utc();
        let rows = vec![GraphRow::new(label("2023-07-09T00:10:00Z")).with_value("GPU", Some(1.0))];
        let filled = fill(&rows, "2023-07-09T00:00:00Z", "2023-07-10T00:00:00Z", "15m").unwrap();

        let instants: Vec<_> = filled
            .iter()
            .map(|row| labeler.parse_instant(&row.date).unwrap())
            .collect();
        assert!(instants.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(instants[0], at("2023-07-09T00:10:00Z"));
    }

    #[test]
    fn refilling_output_is_identity() {
        let rows = vec![
            GraphRow::new(label("2023-07-09T01:00:00Z")).with_value("CPU", Some(1.0)),
            GraphRow::new(label("2023-07-09T03:00:00Z")).with_value("CPU", Some(3.0)),
        ];
        let start = "2023-07-09T00:00:00Z";
        let end = "2023-07-09T06:00:00Z";

        let once = fill(&rows, start, end, "1h").unwrap();
        let twice = fill(&once, start, end, "1h").unwrap();
        assert_eq!(once.len(), 7);
        assert_eq!(once, twice);
    }

    #[test]
    fn placeholder_categories_come_from_first_row() {
        let rows = vec![
            GraphRow::new(label("2023-07-09T01:00:00Z")).with_value("CPU", Some(1.0)),
            GraphRow::new(label("2023-07-09T02:00:00Z"))
                .with_value("CPU", Some(2.0))
                .with_value("Memory", Some(5.0)),
        ];
        let filled = fill(&rows, "2023-07-09T01:00:00Z", "2023-07-09T03:00:00Z", "1h").unwrap();

        assert_eq!(filled[1], rows[1]);
        assert_eq!(filled[2].categories().collect::<Vec<_>>(), vec!["CPU"]);
    }

    #[test]
    fn unknown_step_falls_back_to_one_hour() {
        let rows = vec![GraphRow::new("2023-07-09 12:00:00").with_value("CPU", Some(10.0))];
        let filled = fill(&rows, "2023-07-09T00:00:00Z", "2023-07-09T12:00:00Z", "5x").unwrap();
        assert_eq!(filled.len(), 13);
        let filled = fill(&rows, "2023-07-09T00:00:00Z", "2023-07-09T12:00:00Z", "invalid").unwrap();
        assert_eq!(filled.len(), 13);

        let no_step = fill_missing_graph_data(
            &rows,
            Some("2023-07-09T00:00:00Z"),
            Some("2023-07-09T12:00:00Z"),
            "en",
            None,
            &DateLabeler::utc(),
        )
        .unwrap();
        assert_eq!(no_step.len(), 13);
    }

    #[test]
    fn unparseable_first_label_skips_alignment() {
        let rows = vec![GraphRow::new("not a date").with_value("CPU", Some(10.0))];
        let filled = fill(&rows, "2023-07-09T00:00:00Z", "2023-07-09T02:00:00Z", "1h").unwrap();
        assert_eq!(filled.len(), 3);
        assert!(filled.iter().all(|row| row.value("CPU") == Some(None)));
    }

    #[test]
    fn rejects_oversized_grids() {
        let rows = vec![GraphRow::new(label("2023-01-01T00:00:00Z")).with_value("CPU", Some(1.0))];

        assert_eq!(
            fill(&rows, "2023-01-01T00:00:00Z", "2024-01-01T00:00:00Z", "1m"),
            Err(GraphFillError::TooManyPoints { points: 525_601, limit: MAX_GRID_POINTS })
        );
        assert!(matches!(
            fill(&rows, "1000-01-01T00:00:00Z", "9000-01-01T00:00:00Z", "1s"),
            Err(GraphFillError::TooManyPoints { .. })
        ));
        assert_eq!(fill(&rows, "2023-01-01T00:00:00Z", "2024-01-01T00:00:00Z", "1d").unwrap().len(), 366);
    }

    #[test]
    fn rejects_invalid_inputs() {
        let rows = vec![GraphRow::new("2023-07-09 12:00:00").with_value("CPU", Some(10.0))];
        let labeler = DateLabeler::utc();
        let start = Some("2023-07-09T00:00:00Z");
        let end = Some("2023-07-10T00:00:00Z");

        assert_eq!(
            fill_missing_graph_data(&[], start, end, "en", None, &labeler),
            Err(GraphFillError::NoRows)
        );
        assert_eq!(
            fill_missing_graph_data(&rows, None, end, "en", None, &labeler),
            Err(GraphFillError::MissingBound)
        );
        assert_eq!(
            fill_missing_graph_data(&rows, start, Some(""), "en", None, &labeler),
            Err(GraphFillError::MissingBound)
        );
        assert_eq!(
            fill_missing_graph_data(&rows, Some("invalid"), end, "en", None, &labeler),
            Err(GraphFillError::InvalidBound("invalid".into()))
        );
    }
}
