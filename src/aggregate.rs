//! Collection-wide summary statistics.
//!
//! Means are taken over filtered lists: a value that is present but not
//! numeric is left out rather than counted as zero, while a metric that is
//! missing altogether contributes its default.

use crate::fields::{
    self, Lookup, NumericField, BASELINE_COST, BASELINE_TIMELINE, COST, COST_OVERRUN_PCT,
    PREDICTED_COST_ONLY, PREDICTED_TIMELINE_ONLY, TIMELINE, TIMELINE_OVERRUN_PCT,
};
use crate::types::{Record, SummaryStats};
use crate::util::{average, max_or_zero, min_or_zero};

/// Values for the mean of `field`, one per record unless the record holds
/// a non-numeric value.
fn mean_input(data: &[Record], field: &NumericField) -> Vec<f64> {
    data.iter().filter_map(|r| defaulted(field, r)).collect()
}

/// `predicted - baseline` per record, both sides defaulting to 0 when missing.
fn deltas(data: &[Record], predicted: &NumericField, baseline: &NumericField) -> Vec<f64> {
    data.iter()
        .filter_map(|r| {
            let p = defaulted(predicted, r)?;
            let b = defaulted(baseline, r)?;
            Some(p - b).filter(|d| d.is_finite())
        })
        .collect()
}

fn defaulted(field: &NumericField, record: &Record) -> Option<f64> {
    match field.lookup(record) {
        Lookup::Number(v) => Some(v),
        Lookup::Missing => Some(field.default),
        Lookup::NonNumeric => None,
    }
}

/// Both sides as numbers, or `None` when either cannot be resolved.
fn paired(record: &Record, predicted: &NumericField, baseline: &NumericField) -> Option<(f64, f64)> {
    let p = predicted.lookup(record).number()?;
    let b = baseline.lookup(record).number()?;
    Some((p, b))
}

/// Percentage change from baseline, skipping records whose baseline is zero.
fn diff_pcts(data: &[Record], predicted: &NumericField, baseline: &NumericField) -> Vec<f64> {
    data.iter()
        .filter_map(|r| paired(r, predicted, baseline))
        .filter(|(_, b)| *b != 0.0)
        .map(|(p, b)| ((p - b) / b) * 100.0)
        .filter(|v| v.is_finite())
        .collect()
}

/// Records whose prediction strictly exceeds the baseline. A zero baseline is
/// allowed here, unlike in [`diff_pcts`].
fn count_above(data: &[Record], predicted: &NumericField, baseline: &NumericField) -> usize {
    data.iter()
        .filter_map(|r| paired(r, predicted, baseline))
        .filter(|(p, b)| p > b)
        .count()
}

pub fn summarize(data: &[Record]) -> SummaryStats {
    let costs = mean_input(data, &COST);
    let timelines = mean_input(data, &TIMELINE);

    SummaryStats {
        total: data.len(),
        avg_cost: average(&costs),
        avg_timeline: average(&timelines),
        avg_cost_overrun: average(&mean_input(data, &COST_OVERRUN_PCT)),
        avg_timeline_overrun: average(&mean_input(data, &TIMELINE_OVERRUN_PCT)),
        avg_estimated_cost: average(&mean_input(data, &BASELINE_COST)),
        avg_estimated_timeline: average(&mean_input(data, &BASELINE_TIMELINE)),
        avg_cost_delta: average(&deltas(data, &PREDICTED_COST_ONLY, &BASELINE_COST)),
        avg_time_delta: average(&deltas(data, &PREDICTED_TIMELINE_ONLY, &BASELINE_TIMELINE)),
        avg_cost_diff_pct: average(&diff_pcts(data, &COST, &BASELINE_COST)),
        avg_time_diff_pct: average(&diff_pcts(data, &TIMELINE, &BASELINE_TIMELINE)),
        count_pred_cost_above_est: count_above(data, &COST, &BASELINE_COST),
        count_pred_time_above_est: count_above(data, &TIMELINE, &BASELINE_TIMELINE),
        max_cost: max_or_zero(&costs),
        min_cost: min_or_zero(&costs),
        max_timeline: max_or_zero(&timelines),
        min_timeline: min_or_zero(&timelines),
    }
}

/// Records whose risk label reads "high", ignoring case. Unlabelled records
/// never count.
pub fn count_high_risk(data: &[Record]) -> usize {
    data.iter()
        .filter(|r| {
            fields::RISK
                .resolve_or(r, "")
                .value
                .eq_ignore_ascii_case("high")
        })
        .count()
}
