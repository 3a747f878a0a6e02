//! Axis tick selection for time (minutes) and count axes.

/// Candidate label spacings, in minutes.
pub const TICK_INTERVALS_MINUTES: [f64; 10] =
    [1.0, 2.0, 5.0, 10.0, 15.0, 20.0, 30.0, 60.0, 120.0, 240.0];

/// Upper bound on labelled ticks across a time axis.
pub const MAX_TIME_TICKS: f64 = 12.0;

/// Enumerations longer than this yield no ticks at all.
pub const MAX_TICK_STEPS: i64 = 1_000;

/// Divisions on a count axis (`divisions + 1` labels including zero).
pub const COUNT_AXIS_DIVISIONS: usize = 6;

/// Picks the smallest candidate interval that keeps the number of ticks over
/// `[min_minutes, max_minutes]` at or below [`MAX_TIME_TICKS`].
#[must_use]
pub fn choose_tick_interval(min_minutes: f64, max_minutes: f64) -> f64 {
    let range = (max_minutes - min_minutes).abs();
    if !range.is_finite() {
        return TICK_INTERVALS_MINUTES[TICK_INTERVALS_MINUTES.len() - 1];
    }

    TICK_INTERVALS_MINUTES
        .iter()
        .copied()
        .find(|interval| range / interval <= MAX_TIME_TICKS)
        .unwrap_or(TICK_INTERVALS_MINUTES[TICK_INTERVALS_MINUTES.len() - 1])
}

/// Multiples of `interval` inside `[min, max]`, ascending. Empty when the
/// range would need more than [`MAX_TICK_STEPS`] ticks.
#[must_use]
pub fn tick_values(min: f64, max: f64, interval: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || !interval.is_finite() || interval <= 0.0 {
        return Vec::new();
    }
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    let first = (min / interval).ceil() as i64;
    let last = (max / interval + 1e-9).floor() as i64;
    if last.saturating_sub(first) > MAX_TICK_STEPS {
        return Vec::new();
    }
    (first..=last).map(|step| step as f64 * interval).collect()
}

/// Evenly spaced values from zero to `max_count` for a count axis.
#[must_use]
pub fn count_ticks(max_count: f64, divisions: usize) -> Vec<f64> {
    let divisions = divisions.max(1);
    (0..=divisions)
        .map(|index| max_count / divisions as f64 * index as f64)
        .collect()
}
