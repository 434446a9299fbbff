//! Body weight series prepared for charting
//!
//! Produces normalized point positions plus axis ticks and labels; drawing
//! is left to the presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workout::WeightLogEntry;

/// Gap between neighbouring Y ticks around the base value (kg)
const TICK_STEP: f64 = 20.0;

/// Number of horizontal gridlines
const TICK_COUNT: usize = 5;

/// Position of a single measurement in chart units (0..1 on both axes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
    pub date: NaiveDate,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightSeries {
    pub points: Vec<SeriesPoint>,
    pub y_ticks: Vec<f64>,
    pub x_labels: Vec<AxisLabel>,
}

fn round_to_ten(value: f64) -> f64 {
    (value / 10.0).round() * 10.0
}

/// Y ticks anchored on the first measurement.
///
/// The top two ticks stretch when later values outgrow the initial scale;
/// the lower ones never move.
pub fn compute_y_ticks(first: f64, max: f64) -> Vec<f64> {
    let base = round_to_ten(first);
    let mut ticks: Vec<f64> = (-2..=2)
        .map(|step| (base + step as f64 * TICK_STEP).max(0.0))
        .collect();

    if max > ticks[TICK_COUNT - 1] {
        // next whole tick step above the maximum: 130 -> 140
        let top = (max / TICK_STEP).ceil() * TICK_STEP;
        ticks[TICK_COUNT - 2] = round_to_ten((base + top) / 2.0);
        ticks[TICK_COUNT - 1] = top;
    }
    ticks
}

/// Map a value onto the chart's vertical axis.
///
/// Gridline `i` sits at `i / 4`. Values up to the second tick are squeezed
/// into the lowest band starting from zero; above it the mapping is linear
/// within each band between consecutive ticks.
pub fn y_position(value: f64, ticks: &[f64]) -> f64 {
    if ticks.len() < 2 {
        return 0.0;
    }
    let band = 1.0 / (ticks.len() - 1) as f64;

    if value <= ticks[1] {
        if ticks[1] <= 0.0 {
            return 0.0;
        }
        return value.max(0.0) / ticks[1] * band;
    }

    // first band whose upper tick reaches the value, else extend the last one
    let upper = (2..ticks.len())
        .find(|&i| value <= ticks[i])
        .unwrap_or(ticks.len() - 1);
    let (lo, hi) = (ticks[upper - 1], ticks[upper]);
    let within = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };

    (upper - 1) as f64 * band + within * band
}

fn x_position(index: usize, len: usize) -> f64 {
    if len <= 1 {
        0.5
    } else {
        index as f64 / (len - 1) as f64
    }
}

fn day_month(date: NaiveDate) -> String {
    date.format("%-d/%-m").to_string()
}

/// Build the renderable series, one point per entry in date order
pub fn prepare_weight_series(entries: &[WeightLogEntry]) -> WeightSeries {
    let mut sorted: Vec<&WeightLogEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let Some(first) = sorted.first() else {
        return WeightSeries::default();
    };

    let max = sorted.iter().map(|e| e.weight).fold(f64::MIN, f64::max);
    let y_ticks = compute_y_ticks(first.weight, max);

    let len = sorted.len();
    let points = sorted
        .iter()
        .enumerate()
        .map(|(i, e)| SeriesPoint {
            x: x_position(i, len),
            y: y_position(e.weight, &y_ticks),
            date: e.date,
            weight: e.weight,
        })
        .collect();

    let labelled: Vec<usize> = if len <= 1 { (0..len).collect() } else { vec![0, len - 1] };
    let x_labels = labelled
        .into_iter()
        .map(|index| AxisLabel {
            index,
            text: day_month(sorted[index].date),
        })
        .collect();

    WeightSeries { points, y_ticks, x_labels }
}
