//! Categorical rollups.
//!
//! [`group_by`] is the single pass behind every breakdown: groups come out in
//! the order their category first appears, and each tracked metric is reported
//! as its per-group mean.

use crate::fields::{
    TextField, COST, COST_OVERRUN_PCT, PROJECT_TYPE, RISK, TERRAIN, TIMELINE,
    TIMELINE_OVERRUN_PCT,
};
use crate::types::{GroupAggregate, GroupMetric, Record};
use crate::util::ratio;
use std::collections::HashMap;

/// A named numeric extractor tracked per group.
#[derive(Clone, Copy)]
pub struct MetricExtractor {
    pub name: &'static str,
    pub extract: fn(&Record) -> f64,
}

pub const AVG_COST: &str = "avg_cost";
pub const AVG_TIMELINE: &str = "avg_timeline";
pub const AVG_COST_OVERRUN: &str = "avg_cost_overrun";
pub const AVG_TIMELINE_OVERRUN: &str = "avg_timeline_overrun";

fn cost(r: &Record) -> f64 {
    COST.value(r)
}

fn timeline(r: &Record) -> f64 {
    TIMELINE.value(r)
}

fn cost_overrun(r: &Record) -> f64 {
    COST_OVERRUN_PCT.value(r)
}

fn timeline_overrun(r: &Record) -> f64 {
    TIMELINE_OVERRUN_PCT.value(r)
}

const PROJECT_TYPE_METRICS: &[MetricExtractor] = &[
    MetricExtractor {
        name: AVG_COST,
        extract: cost,
    },
    MetricExtractor {
        name: AVG_TIMELINE,
        extract: timeline,
    },
    MetricExtractor {
        name: AVG_COST_OVERRUN,
        extract: cost_overrun,
    },
    MetricExtractor {
        name: AVG_TIMELINE_OVERRUN,
        extract: timeline_overrun,
    },
];

const TERRAIN_METRICS: &[MetricExtractor] = &[MetricExtractor {
    name: AVG_TIMELINE,
    extract: timeline,
}];

pub fn group_by<K>(data: &[Record], key: K, metrics: &[MetricExtractor]) -> Vec<GroupAggregate>
where
    K: Fn(&Record) -> String,
{
    struct Acc {
        name: String,
        count: usize,
        sums: Vec<f64>,
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Acc> = Vec::new();
    for r in data {
        let name = key(r);
        let slot = *index.entry(name.clone()).or_insert_with(|| {
            groups.push(Acc {
                name,
                count: 0,
                sums: vec![0.0; metrics.len()],
            });
            groups.len() - 1
        });
        let acc = &mut groups[slot];
        acc.count += 1;
        for (sum, m) in acc.sums.iter_mut().zip(metrics) {
            let v = (m.extract)(r);
            *sum += if v.is_finite() { v } else { 0.0 };
        }
    }

    groups
        .into_iter()
        .map(|acc| GroupAggregate {
            metrics: metrics
                .iter()
                .zip(&acc.sums)
                .map(|(m, sum)| GroupMetric {
                    name: m.name,
                    average: ratio(*sum, acc.count),
                })
                .collect(),
            name: acc.name,
            count: acc.count,
        })
        .collect()
}

fn by_field(data: &[Record], field: &TextField, metrics: &[MetricExtractor]) -> Vec<GroupAggregate> {
    group_by(data, |r| field.value(r), metrics)
}

/// Mean cost, timeline and both overrun percentages per project type.
pub fn by_project_type(data: &[Record]) -> Vec<GroupAggregate> {
    by_field(data, &PROJECT_TYPE, PROJECT_TYPE_METRICS)
}

/// Mean timeline per terrain.
pub fn by_terrain(data: &[Record]) -> Vec<GroupAggregate> {
    by_field(data, &TERRAIN, TERRAIN_METRICS)
}

/// Counts only; feeds the risk distribution.
pub fn by_risk(data: &[Record]) -> Vec<GroupAggregate> {
    by_field(data, &RISK, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;
    use pretty_assertions::assert_eq;

    fn rec(pairs: &[(&str, FieldValue)]) -> Record {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let data = vec![
            rec(&[("ProjectType", "Solar".into())]),
            rec(&[("ProjectType", "Wind".into())]),
            rec(&[("ProjectType", "Solar".into())]),
        ];
        let groups = by_project_type(&data);
        let names: Vec<(&str, usize)> = groups.iter().map(|g| (g.name.as_str(), g.count)).collect();
        assert_eq!(names, vec![("Solar", 2), ("Wind", 1)]);
    }

    #[test]
    fn averages_per_group() {
        let data = vec![
            rec(&[("ProjectType", "Line".into()), ("TotalCost", 100.0.into()), ("Cost_Overrun_Pct", 10.0.into())]),
            rec(&[("ProjectType", "Line".into()), ("TotalCost", 300.0.into())]),
        ];
        let groups = by_project_type(&data);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].average(AVG_COST), Some(200.0));
        assert_eq!(groups[0].average(AVG_COST_OVERRUN), Some(5.0));
        assert_eq!(groups[0].average(AVG_TIMELINE), Some(0.0));
    }

    #[test]
    fn missing_category_is_unknown() {
        let data = vec![Record::new(), rec(&[("Terrain", "Hilly".into()), ("Timeline", 6.0.into())])];
        let groups = by_terrain(&data);
        assert_eq!(groups[0].name, "Unknown");
        assert_eq!(groups[1].average(AVG_TIMELINE), Some(6.0));
    }

    #[test]
    fn risk_groups_carry_counts_only() {
        let data = vec![
            rec(&[("Overall_Risk", "Low".into())]),
            rec(&[("Overall_Risk", "High".into())]),
            rec(&[("Overall_Risk", "Low".into())]),
        ];
        let groups = by_risk(&data);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].count, 2);
        assert!(groups[0].metrics.is_empty());
    }

    #[test]
    fn non_finite_extractions_sum_as_zero() {
        let metrics = [MetricExtractor {
            name: "odd",
            extract: |_| f64::NAN,
        }];
        let data = vec![Record::new(), Record::new()];
        let groups = group_by(&data, |_| "all".to_string(), &metrics);
        assert_eq!(groups[0].average("odd"), Some(0.0));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(by_project_type(&[]).is_empty());
    }
}
