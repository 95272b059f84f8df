use std::fmt;

use chrono::TimeDelta;
use serde::{Serialize, Serializer};

use crate::core::util::date_util::DateLabelFormat;

/// Upper bound on `(end - start) / step` for a chosen step.
pub const MAX_POINTS: f64 = 744.0;

/// Hard cap on the rows one gap-fill may emit, well above any window/step pair
/// [`get_step_from_range`] selects.
pub const MAX_GRID_POINTS: usize = 64 * MAX_POINTS as usize;

pub const DEFAULT_STEP_SECONDS: u64 = 3600;

/// Candidate steps in seconds, ascending: 10m .. 30d.
pub const ALLOWED_STEPS: [u64; 15] = [
    600,
    900,
    1_800,
    3_600,
    7_200,
    10_800,
    21_600,
    43_200,
    86_400,
    172_800,
    259_200,
    432_000,
    604_800,
    1_296_000,
    2_592_000,
];

/// Sampling interval in whole seconds; displays as `10m`, `1h`, `1d`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepSize(u64);

impl StepSize {
    pub const ONE_HOUR: StepSize = StepSize(DEFAULT_STEP_SECONDS);

    pub const fn from_seconds(seconds: u64) -> Self {
        StepSize(seconds)
    }

    pub const fn seconds(self) -> u64 {
        self.0
    }

    /// Parses a `^(\d+)([smhd])$` label; anything else is one hour.
    pub fn parse(raw: &str) -> Self {
        StepSize(parse_step_to_seconds(raw))
    }

    pub fn as_duration(self) -> TimeDelta {
        TimeDelta::try_seconds(self.0 as i64).unwrap_or(TimeDelta::MAX)
    }
}

impl Default for StepSize {
    fn default() -> Self {
        Self::ONE_HOUR
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_step(self.0))
    }
}

impl Serialize for StepSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Renders seconds in the largest unit that divides them exactly.
pub fn format_step(sec: u64) -> String {
    if sec % 86_400 == 0 {
        format!("{}d", sec / 86_400)
    } else if sec % 3_600 == 0 {
        format!("{}h", sec / 3_600)
    } else if sec % 60 == 0 {
        format!("{}m", sec / 60)
    } else {
        format!("{sec}s")
    }
}

/// `"30s"` -> 30, `"5m"` -> 300, `"2h"` -> 7200, `"1d"` -> 86400.
///
/// Malformed labels, unknown units, overflow and zero all fall back to 3600 so a
/// grid built from the result always advances.
pub fn parse_step_to_seconds(step: &str) -> u64 {
    let Some(unit) = step.chars().last() else {
        return DEFAULT_STEP_SECONDS;
    };
    let digits = &step[..step.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_STEP_SECONDS;
    }

    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3_600,
        'd' => 86_400,
        _ => return DEFAULT_STEP_SECONDS,
    };

    digits
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(multiplier))
        .filter(|seconds| *seconds > 0)
        .unwrap_or(DEFAULT_STEP_SECONDS)
}

/// Smallest catalogue step keeping a window of `diff_seconds` within [`MAX_POINTS`].
/// Non-positive windows get the one hour default; windows too long for every
/// candidate get the largest one.
pub fn step_for_duration(diff_seconds: f64) -> StepSize {
    if diff_seconds.is_nan() || diff_seconds <= 0.0 {
        return StepSize::ONE_HOUR;
    }

    ALLOWED_STEPS
        .iter()
        .find(|step| diff_seconds / **step as f64 <= MAX_POINTS)
        .or(ALLOWED_STEPS.last())
        .map(|step| StepSize(*step))
        .unwrap_or_default()
}

/// Chooses the query/grid step for an ISO `start`..`end` window.
/// Missing or unparseable bounds yield the one hour default.
pub fn get_step_from_range(
    start: Option<&str>,
    end: Option<&str>,
    dates: &dyn DateLabelFormat,
) -> StepSize {
    let (Some(start), Some(end)) = (start, end) else {
        return StepSize::ONE_HOUR;
    };
    let (Some(start), Some(end)) = (dates.parse_instant(start), dates.parse_instant(end)) else {
        return StepSize::ONE_HOUR;
    };

    let diff_seconds = (end - start).num_milliseconds() as f64 / 1000.0;
    step_for_duration(diff_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::util::date_util::DateLabeler;

    fn step(start: Option<&str>, end: Option<&str>) -> String {
        get_step_from_range(start, end, &DateLabeler::utc()).to_string()
    }

    #[test]
    fn formats_steps() {
        assert_eq!(format_step(86_400), "1d");
        assert_eq!(format_step(172_800), "2d");
        assert_eq!(format_step(2_592_000), "30d");
        assert_eq!(format_step(3_600), "1h");
        assert_eq!(format_step(7_200), "2h");
        assert_eq!(format_step(43_200), "12h");
        assert_eq!(format_step(60), "1m");
        assert_eq!(format_step(300), "5m");
        assert_eq!(format_step(900), "15m");
        assert_eq!(format_step(1), "1s");
        assert_eq!(format_step(30), "30s");
        assert_eq!(format_step(59), "59s");
    }

    #[test]
    fn parses_step_labels() {
        assert_eq!(parse_step_to_seconds("30s"), 30);
        assert_eq!(parse_step_to_seconds("5m"), 300);
        assert_eq!(parse_step_to_seconds("2h"), 7_200);
        assert_eq!(parse_step_to_seconds("1d"), 86_400);
        assert_eq!(parse_step_to_seconds("15m"), 900);
    }

    #[test]
    fn malformed_step_labels_default_to_one_hour() {
        for raw in ["", "h", "invalid", "5x", "-5m", "5 m", "1.5h", "0s", "99999999999999999999d", "５m"] {
            assert_eq!(parse_step_to_seconds(raw), 3_600, "{raw:?}");
        }
    }

    #[test]
    fn step_size_round_trips_through_labels() {
        for seconds in ALLOWED_STEPS {
            let step = StepSize::from_seconds(seconds);
            assert_eq!(StepSize::parse(&step.to_string()), step);
        }
        assert_eq!(StepSize::default().to_string(), "1h");
        assert_eq!(serde_json::to_string(&StepSize::from_seconds(600)).unwrap(), "\"10m\"");
    }

    #[test]
    fn defaults_for_missing_or_invalid_bounds() {
        assert_eq!(step(None, Some("2023-07-10T00:00:00Z")), "1h");
        assert_eq!(step(Some("2023-07-09T00:00:00Z"), None), "1h");
        assert_eq!(step(None, None), "1h");
        assert_eq!(step(Some("invalid"), Some("2023-07-10T00:00:00Z")), "1h");
        assert_eq!(step(Some("2023-07-09T00:00:00Z"), Some("invalid")), "1h");
    }

    #[test]
    fn defaults_for_empty_or_negative_windows() {
        assert_eq!(step(Some("2023-07-10T00:00:00Z"), Some("2023-07-09T00:00:00Z")), "1h");
        assert_eq!(step(Some("2023-07-09T00:00:00Z"), Some("2023-07-09T00:00:00Z")), "1h");
    }

    #[test]
    fn picks_steps_for_typical_windows() {
        assert_eq!(step(Some("2023-07-09T00:00:00Z"), Some("2023-07-09T01:00:00Z")), "10m");
        assert_eq!(step(Some("2023-07-09T00:00:00Z"), Some("2023-07-10T00:00:00Z")), "10m");
        // 31 days = 4464 ten-minute points, 2976 fifteen-minute, 1488 half-hour, 744 hourly.
        assert_eq!(step(Some("2023-07-01T00:00:00Z"), Some("2023-08-01T00:00:00Z")), "1h");
        assert_eq!(step(Some("2023-01-01T00:00:00Z"), Some("2024-01-01T00:00:00Z")), "12h");
    }

    #[test]
    fn falls_back_to_largest_step_for_huge_windows() {
        assert_eq!(step(Some("1000-01-01T00:00:00Z"), Some("3000-01-01T00:00:00Z")), "30d");
    }

    #[test]
    fn chosen_step_is_smallest_within_point_budget() {
        let mut diff = 1.0;
        while diff < 1.0e10 {
            let chosen = step_for_duration(diff).seconds();
            let position = ALLOWED_STEPS.iter().position(|s| *s == chosen).unwrap();

            if diff / chosen as f64 <= MAX_POINTS {
                if position > 0 {
                    assert!(diff / ALLOWED_STEPS[position - 1] as f64 > MAX_POINTS, "diff {diff}");
                }
            } else {
                assert_eq!(chosen, 2_592_000, "diff {diff}");
            }
            diff *= 1.37;
        }
    }
}
