use std::collections::HashMap;

use crate::domain::common::model::{GraphData, GraphRow};

/// Combines several series into one, keyed by `date`.
///
/// Rows sharing a date are shallow-merged, later inputs overwriting earlier fields of the
/// same name. Output keeps the order in which each date was first seen. `None` inputs are
/// skipped.
pub fn merge_multi_graph_data<'a, I>(inputs: I) -> GraphData
where
    I: IntoIterator<Item = Option<&'a [GraphRow]>>,
{
    let mut merged: GraphData = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in inputs.into_iter().flatten().flatten() {
        match index.get(&row.date) {
            Some(&position) => merged[position].merge_from(row),
            None => {
                index.insert(row.date.clone(), merged.len());
                merged.push(row.clone());
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, values: &[(&str, Option<f64>)]) -> GraphRow {
        values
            .iter()
            .fold(GraphRow::new(date), |row, (k, v)| row.with_value(*k, *v))
    }

    #[test]
    fn empty_inputs() {
        assert!(merge_multi_graph_data(Vec::<Option<&[GraphRow]>>::new()).is_empty());
        assert!(merge_multi_graph_data([None::<&[GraphRow]>, None]).is_empty());
        assert!(merge_multi_graph_data([Some(&[] as &[GraphRow])]).is_empty());
    }

    #[test]
    fn skips_missing_inputs() {
        let cpu = vec![row("d1", &[("CPU", Some(10.0))])];
        let merged = merge_multi_graph_data([None, Some(cpu.as_slice()), None]);
        assert_eq!(merged, cpu);
    }

    #[test]
    fn keeps_distinct_dates_in_first_seen_order() {
        let first = vec![row("d2", &[("CPU", Some(1.0))]), row("d1", &[("CPU", Some(2.0))])];
        let second = vec![row("d3", &[("GPU", Some(3.0))]), row("d1", &[("GPU", Some(4.0))])];

        let merged = merge_multi_graph_data([Some(first.as_slice()), Some(second.as_slice())]);
        let dates: Vec<_> = merged.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["d2", "d1", "d3"]);
        assert_eq!(merged[1], row("d1", &[("CPU", Some(2.0)), ("GPU", Some(4.0))]));
    }

    #[test]
    fn later_inputs_overwrite_shared_fields() {
        let first = vec![row("d1", &[("CPU", Some(10.0)), ("Memory", Some(50.0))])];
        let second = vec![row("d1", &[("CPU", Some(20.0)), ("Storage", Some(30.0))])];

        let merged = merge_multi_graph_data([Some(first.as_slice()), Some(second.as_slice())]);
        assert_eq!(
            merged,
            vec![row(
                "d1",
                &[("CPU", Some(20.0)), ("Memory", Some(50.0)), ("Storage", Some(30.0))]
            )]
        );
    }

    #[test]
    fn null_overwrites_value() {
        let first = vec![row("d1", &[("CPU", Some(10.0))])];
        let second = vec![row("d1", &[("CPU", None)])];
        let merged = merge_multi_graph_data([Some(first.as_slice()), Some(second.as_slice())]);
        assert_eq!(merged[0].value("CPU"), Some(None));
    }

    #[test]
    fn merging_is_associative() {
        let a = vec![row("d1", &[("CPU", Some(1.0))]), row("d2", &[("CPU", Some(2.0))])];
        let b = vec![row("d2", &[("GPU", Some(3.0))]), row("d3", &[("CPU", Some(4.0))])];
        let c = vec![row("d1", &[("CPU", Some(5.0))]), row("d4", &[("Memory", None)])];

        let ab = merge_multi_graph_data([Some(a.as_slice()), Some(b.as_slice())]);
        let left = merge_multi_graph_data([Some(ab.as_slice()), Some(c.as_slice())]);
        let bc = merge_multi_graph_data([Some(b.as_slice()), Some(c.as_slice())]);
        let right = merge_multi_graph_data([Some(a.as_slice()), Some(bc.as_slice())]);
        let flat = merge_multi_graph_data([Some(a.as_slice()), Some(b.as_slice()), Some(c.as_slice())]);

        assert_eq!(left, flat);
        assert_eq!(right, flat);
    }
}
