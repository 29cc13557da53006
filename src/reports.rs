//! Table projections of the dashboard for console previews and CSV export.

use crate::dashboard::{Dashboard, TrendSeries};
use crate::fields::{
    BASELINE_COST, BASELINE_TIMELINE, COST, COST_ESCALATION, COST_OVERRUN_PCT, PROJECT_ID,
    PROJECT_TYPE, RISK, TIMELINE, TIMELINE_OVERRUN_PCT,
};
use crate::grouping::{AVG_COST, AVG_COST_OVERRUN, AVG_TIMELINE, AVG_TIMELINE_OVERRUN};
use crate::types::{
    GroupAggregate, ProjectDetailRow, ProjectTypeRow, Record, RiskShareRow, ScatterPoint,
    ScatterRow, SummaryRow, TerrainRow, TopCostRow, TrendRow,
};
use crate::util::{format_int, format_number, format_pct, ratio};

fn row(metric: &str, value: String) -> SummaryRow {
    SummaryRow {
        metric: metric.to_string(),
        value,
    }
}

pub fn summary_rows(d: &Dashboard) -> Vec<SummaryRow> {
    let s = &d.summary;
    vec![
        row("Total Projects", format_int(s.total)),
        row("High Risk", format_int(d.high_risk)),
        row("Average Cost", format_number(s.avg_cost, 1)),
        row("Average Timeline", format_number(s.avg_timeline, 1)),
        row("Max Cost", format_number(s.max_cost, 1)),
        row("Min Cost", format_number(s.min_cost, 1)),
        row("Max Timeline", format_number(s.max_timeline, 1)),
        row("Min Timeline", format_number(s.min_timeline, 1)),
        row("Avg Cost Overrun", format_pct(s.avg_cost_overrun, 1)),
        row("Avg Timeline Overrun", format_pct(s.avg_timeline_overrun, 1)),
        row("Avg Estimated Cost", format_number(s.avg_estimated_cost, 1)),
        row("Avg Estimated Timeline", format_number(s.avg_estimated_timeline, 1)),
        row("Avg Cost Delta", format_number(s.avg_cost_delta, 1)),
        row("Avg Timeline Delta", format_number(s.avg_time_delta, 1)),
        row("Avg Cost Diff", format_pct(s.avg_cost_diff_pct, 1)),
        row("Avg Timeline Diff", format_pct(s.avg_time_diff_pct, 1)),
        row("Predicted Cost Above Estimate", format_int(s.count_pred_cost_above_est)),
        row("Predicted Timeline Above Estimate", format_int(s.count_pred_time_above_est)),
    ]
}

fn avg(g: &GroupAggregate, metric: &str, decimals: usize) -> String {
    format_number(g.average(metric).unwrap_or(0.0), decimals)
}

pub fn project_type_rows(d: &Dashboard) -> Vec<ProjectTypeRow> {
    d.by_project_type
        .iter()
        .map(|g| ProjectTypeRow {
            project_type: g.name.clone(),
            count: g.count,
            avg_cost: avg(g, AVG_COST, 2),
            avg_timeline: avg(g, AVG_TIMELINE, 1),
            avg_cost_overrun: avg(g, AVG_COST_OVERRUN, 1),
            avg_timeline_overrun: avg(g, AVG_TIMELINE_OVERRUN, 1),
        })
        .collect()
}

pub fn terrain_rows(d: &Dashboard) -> Vec<TerrainRow> {
    d.by_terrain
        .iter()
        .map(|g| TerrainRow {
            terrain: g.name.clone(),
            count: g.count,
            avg_timeline: avg(g, AVG_TIMELINE, 1),
        })
        .collect()
}

/// Each risk level's share of the collection, for the distribution view.
pub fn risk_rows(d: &Dashboard) -> Vec<RiskShareRow> {
    let total: usize = d.by_risk.iter().map(|g| g.count).sum();
    d.by_risk
        .iter()
        .map(|g| RiskShareRow {
            risk: g.name.clone(),
            count: g.count,
            share_pct: format_number(ratio(g.count as f64 * 100.0, total), 1),
        })
        .collect()
}

pub fn top_cost_rows(d: &Dashboard) -> Vec<TopCostRow> {
    d.top_cost
        .iter()
        .map(|e| TopCostRow {
            rank: e.rank,
            project_id: e.project_id.clone(),
            project_type: e.project_type.clone(),
            cost: format_number(e.cost, 2),
            timeline: format_number(e.timeline, 1),
            risk: e.risk.clone(),
        })
        .collect()
}

/// One row per record in input order; `CostEscalation` passes through as-is.
pub fn detail_rows(data: &[Record]) -> Vec<ProjectDetailRow> {
    data.iter()
        .map(|r| ProjectDetailRow {
            project_id: PROJECT_ID.resolve_or(r, "").value,
            project_type: PROJECT_TYPE.resolve_or(r, "").value,
            estimated_cost: format_number(BASELINE_COST.value(r), 2),
            cost: format_number(COST.value(r), 2),
            estimated_timeline: format_number(BASELINE_TIMELINE.value(r), 1),
            timeline: format_number(TIMELINE.value(r), 1),
            cost_overrun: format_number(COST_OVERRUN_PCT.value(r), 1),
            timeline_overrun: format_number(TIMELINE_OVERRUN_PCT.value(r), 1),
            cost_escalation: format_number(COST_ESCALATION.value(r), 1),
            risk: RISK.resolve_or(r, "").value,
        })
        .collect()
}

/// The four trend series side by side; they share one index per record.
pub fn trend_rows(t: &TrendSeries) -> Vec<TrendRow> {
    t.cost
        .iter()
        .zip(&t.timeline)
        .zip(&t.cost_overrun)
        .zip(&t.timeline_overrun)
        .map(|(((c, tl), co), to)| TrendRow {
            index: c.index,
            cost: c.value,
            timeline: tl.value,
            cost_overrun: co.value,
            timeline_overrun: to.value,
        })
        .collect()
}

pub fn scatter_rows(points: &[ScatterPoint]) -> Vec<ScatterRow> {
    points
        .iter()
        .map(|p| ScatterRow {
            label: p.label.clone(),
            cost: p.x,
            timeline: p.y,
        })
        .collect()
}
