use chrono::{DateTime, TimeDelta, Utc};

/// Shifts `start` onto the sampling phase of the series whose first point is `first_data`.
///
/// * data after start: move forward by `(data - start) mod step`;
/// * data before start: move back `ceil(|diff| / step)` steps, then forward by
///   `|diff| mod step`;
/// * equal: unchanged.
///
/// The backward branch can land earlier than the caller's window when `|diff|` is not a
/// multiple of `step`; callers must not assume `result >= start`.
pub fn calculate_start_alignment(
    start: DateTime<Utc>,
    first_data: DateTime<Utc>,
    step_seconds: u64,
) -> DateTime<Utc> {
    let step_ms = i64::try_from(step_seconds)
        .ok()
        .and_then(|s| s.checked_mul(1000))
        .unwrap_or(0);
    if step_ms == 0 {
        return start;
    }

    let diff_ms = (first_data - start).num_milliseconds();

    let shift_ms = if diff_ms > 0 {
        diff_ms % step_ms
    } else if diff_ms < 0 {
        let abs_diff = diff_ms.unsigned_abs() as i64;
        let steps_back = (abs_diff + step_ms - 1) / step_ms;
        (abs_diff % step_ms).saturating_sub(steps_back.saturating_mul(step_ms))
    } else {
        0
    };

    start
        .checked_add_signed(TimeDelta::milliseconds(shift_ms))
        .unwrap_or(start)
}
