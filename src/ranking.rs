use crate::fields::{COST, PROJECT_ID, PROJECT_TYPE, RISK, TIMELINE};
use crate::types::{RankedEntry, Record};
use std::cmp::Ordering;

/// Length of the top-cost list.
pub const TOP_N: usize = 8;

/// Highest-cost projects first, at most [`TOP_N`] of them.
///
/// `sort_by` is stable, so projects with equal cost keep their input order.
/// Identity and category columns default to an empty string here rather than
/// `"Unknown"`, matching how the table shows blanks.
pub fn top_by_cost(data: &[Record]) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = data
        .iter()
        .map(|r| RankedEntry {
            rank: 0,
            project_id: PROJECT_ID.resolve_or(r, "").value,
            project_type: PROJECT_TYPE.resolve_or(r, "").value,
            cost: COST.value(r),
            timeline: TIMELINE.value(r),
            risk: RISK.resolve_or(r, "").value,
        })
        .collect();
    entries.sort_by(|a, b| b.cost.partial_cmp(&a.cost).unwrap_or(Ordering::Equal));
    entries.truncate(TOP_N);
    for (idx, e) in entries.iter_mut().enumerate() {
        e.rank = idx + 1;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;

    fn project(id: &str, cost: f64) -> Record {
        [("ProjectID", FieldValue::from(id)), ("TotalCost", cost.into())]
            .into_iter()
            .collect()
    }

    #[test]
    fn keeps_top_eight_descending() {
        let data: Vec<Record> = (1..=10).map(|i| project(&format!("P{i}"), i as f64 * 10.0)).collect();
        let top = top_by_cost(&data);
        assert_eq!(top.len(), TOP_N);
        assert_eq!(top[0].project_id, "P10");
        assert_eq!(top[7].project_id, "P3");
        assert!(top.windows(2).all(|w| w[0].cost > w[1].cost));
        assert_eq!(top.iter().map(|e| e.rank).collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn ties_keep_input_order() {
        let data = vec![project("first", 50.0), project("big", 90.0), project("second", 50.0)];
        let ids: Vec<String> = top_by_cost(&data).into_iter().map(|e| e.project_id).collect();
        assert_eq!(ids, vec!["big", "first", "second"]);
    }

    #[test]
    fn short_input_returns_everything() {
        let data = vec![project("a", 1.0), project("b", 2.0)];
        assert_eq!(top_by_cost(&data).len(), 2);
        assert!(top_by_cost(&[]).is_empty());
    }

    #[test]
    fn blanks_default_to_empty() {
        let top = top_by_cost(&[Record::new()]);
        assert_eq!(top[0].project_type, "");
        assert_eq!(top[0].risk, "");
        assert_eq!(top[0].cost, 0.0);
    }
}
