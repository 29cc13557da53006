//! Index-ordered trend series and the cost/timeline scatter.

use crate::fields::{NumericField, COST, PROJECT_ID, TIMELINE};
use crate::types::{Record, ScatterPoint, SeriesPoint};

/// One point per record in input order, indexed from 1. Unresolvable values
/// plot as the field default, so the series always matches the record count.
pub fn trend(data: &[Record], field: &NumericField) -> Vec<SeriesPoint> {
    data.iter()
        .enumerate()
        .map(|(i, r)| SeriesPoint {
            index: i + 1,
            value: field.value(r),
        })
        .collect()
}

/// Cost against timeline for records where both are known and nonzero.
pub fn scatter(data: &[Record]) -> Vec<ScatterPoint> {
    data.iter()
        .filter_map(|r| {
            let x = COST.lookup(r).number().filter(|v| *v != 0.0)?;
            let y = TIMELINE.lookup(r).number().filter(|v| *v != 0.0)?;
            Some(ScatterPoint {
                x,
                y,
                label: PROJECT_ID.value(r),
            })
        })
        .collect()
}
