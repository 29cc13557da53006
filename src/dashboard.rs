//! Every derived view of a record collection, computed in one go.

use crate::aggregate::{count_high_risk, summarize};
use crate::fields::{COST, COST_OVERRUN_PCT, TIMELINE, TIMELINE_OVERRUN_PCT};
use crate::grouping::{by_project_type, by_risk, by_terrain};
use crate::ranking::top_by_cost;
use crate::series::{scatter, trend};
use crate::types::{GroupAggregate, RankedEntry, Record, ScatterPoint, SeriesPoint, SummaryStats};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    pub cost: Vec<SeriesPoint>,
    pub timeline: Vec<SeriesPoint>,
    pub cost_overrun: Vec<SeriesPoint>,
    pub timeline_overrun: Vec<SeriesPoint>,
}

/// Snapshot of all views. Holds copied values only, so it stays valid after
/// the collection it came from is replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: SummaryStats,
    pub high_risk: usize,
    pub trends: TrendSeries,
    pub scatter: Vec<ScatterPoint>,
    pub by_project_type: Vec<GroupAggregate>,
    pub by_terrain: Vec<GroupAggregate>,
    pub by_risk: Vec<GroupAggregate>,
    pub top_cost: Vec<RankedEntry>,
}

impl Dashboard {
    pub fn compute(data: &[Record]) -> Self {
        log::debug!("Computing dashboard over {} records", data.len());
        Dashboard {
            summary: summarize(data),
            high_risk: count_high_risk(data),
            trends: TrendSeries {
                cost: trend(data, &COST),
                timeline: trend(data, &TIMELINE),
                cost_overrun: trend(data, &COST_OVERRUN_PCT),
                timeline_overrun: trend(data, &TIMELINE_OVERRUN_PCT),
            },
            scatter: scatter(data),
            by_project_type: by_project_type(data),
            by_terrain: by_terrain(data),
            by_risk: by_risk(data),
            top_cost: top_by_cost(data),
        }
    }

    /// An empty collection is a valid state, rendered as "no data".
    pub fn is_empty(&self) -> bool {
        self.summary.total == 0
    }
}
