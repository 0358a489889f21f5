//! Chart projection: check samples to a plot-ready response time series.
//!
//! Everything here is pure. The x coordinate of a point is the sample
//! timestamp in Unix seconds; formatted labels are for display only.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::CheckSample;

/// Bounds used when there is nothing to plot.
const EMPTY_BOUNDS: [f64; 2] = [0.0, 1.0];

/// Half-width of the x window around a lone sample, in seconds.
const SINGLE_POINT_PAD_SECS: f64 = 60.0;

/// Number of y axis ticks (including zero).
const Y_TICKS: usize = 3;

/// Response time series ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// `(unix seconds, response time ms)` in input order.
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// UTC time labels for the x axis, evenly spread across `x_bounds`.
    pub x_labels: Vec<String>,
    /// Response time labels for the y axis, with `ms` suffix.
    pub y_labels: Vec<String>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Formats a timestamp as `"Jan 1, 00:10"` (UTC, 24-hour).
pub fn format_time_label(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %H:%M").to_string()
}

/// Formats a response time with a literal `ms` suffix.
pub fn format_ms(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}ms", value)
    } else {
        format!("{:.1}ms", value)
    }
}

/// Projects samples onto a response time series.
///
/// Samples with an unparseable timestamp are left out. An empty input yields
/// an empty series with placeholder bounds.
pub fn project(checks: &[CheckSample]) -> ChartSeries {
    let points: Vec<(f64, f64)> = checks
        .iter()
        .filter_map(|c| c.timestamp().map(|ts| (unix_secs(ts), c.rt)))
        .collect();

    if points.is_empty() {
        return ChartSeries {
            points,
            x_bounds: EMPTY_BOUNDS,
            y_bounds: EMPTY_BOUNDS,
            x_labels: Vec::new(),
            y_labels: y_labels(EMPTY_BOUNDS[1]),
        };
    }

    let (x_min, x_max) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (x, _)| (lo.min(*x), hi.max(*x)));
    let y_max = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);

    let x_bounds = if x_max > x_min {
        [x_min, x_max]
    } else {
        [x_min - SINGLE_POINT_PAD_SECS, x_max + SINGLE_POINT_PAD_SECS]
    };
    let y_top = if y_max > 0.0 { y_max } else { EMPTY_BOUNDS[1] };

    ChartSeries {
        x_labels: x_labels(x_bounds, points.len()),
        y_labels: y_labels(y_top),
        points,
        x_bounds,
        y_bounds: [0.0, y_top],
    }
}

/// Tooltip text for the sample at `index`: `"Jan 1, 00:10  340ms"`.
pub fn tooltip(checks: &[CheckSample], index: usize) -> Option<String> {
    let sample = checks.get(index)?;
    let label = sample
        .timestamp()
        .map(format_time_label)
        .unwrap_or_else(|| sample.t.clone());
    Some(format!("{}  {}", label, format_ms(sample.rt)))
}

/// Chart x coordinate of a timestamp, in Unix seconds with millisecond precision.
pub(crate) fn unix_secs(ts: DateTime<Utc>) -> f64 {
    ts.timestamp() as f64 + f64::from(ts.timestamp_subsec_millis()) / 1000.0
}

fn label_at(secs: f64) -> String {
    let whole = secs.floor() as i64;
    Utc.timestamp_opt(whole, 0)
        .single()
        .map(format_time_label)
        .unwrap_or_default()
}

/// Start, middle and end labels; two labels for exactly two samples.
/// A lone sample sits in the middle of its window, so its own time is the
/// middle label.
fn x_labels(bounds: [f64; 2], samples: usize) -> Vec<String> {
    let [lo, hi] = bounds;
    match samples {
        0 => Vec::new(),
        2 => vec![label_at(lo), label_at(hi)],
        _ => vec![label_at(lo), label_at((lo + hi) / 2.0), label_at(hi)],
    }
}

fn y_labels(top: f64) -> Vec<String> {
    (0..Y_TICKS)
        .map(|i| format_ms((top * i as f64 / (Y_TICKS - 1) as f64).round()))
        .collect()
}
