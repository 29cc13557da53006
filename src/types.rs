use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tabled::Tabled;

/// A single cell of a project record as delivered by the ingestion side.
///
/// CSV parsing infers these from cell text; prediction responses carry them
/// as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// One project: field name to dynamically typed scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored under `name`, treating JSON `null` as absent.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Collection-wide headline numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    pub avg_cost: f64,
    pub avg_timeline: f64,
    pub avg_cost_overrun: f64,
    pub avg_timeline_overrun: f64,
    pub avg_estimated_cost: f64,
    pub avg_estimated_timeline: f64,
    pub avg_cost_delta: f64,
    pub avg_time_delta: f64,
    pub avg_cost_diff_pct: f64,
    pub avg_time_diff_pct: f64,
    pub count_pred_cost_above_est: usize,
    pub count_pred_time_above_est: usize,
    pub max_cost: f64,
    pub min_cost: f64,
    pub max_timeline: f64,
    pub min_timeline: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub index: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetric {
    pub name: &'static str,
    pub average: f64,
}

/// Per-category rollup. `metrics` keeps the order the metrics were requested in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    pub name: String,
    pub count: usize,
    pub metrics: Vec<GroupMetric>,
}

impl GroupAggregate {
    pub fn average(&self, metric: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|m| m.name == metric)
            .map(|m| m.average)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub project_id: String,
    pub project_type: String,
    pub cost: f64,
    pub timeline: f64,
    pub risk: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SummaryRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ProjectTypeRow {
    #[serde(rename = "ProjectType")]
    #[tabled(rename = "ProjectType")]
    pub project_type: String,
    #[serde(rename = "Projects")]
    #[tabled(rename = "Projects")]
    pub count: usize,
    #[serde(rename = "AvgCost")]
    #[tabled(rename = "AvgCost")]
    pub avg_cost: String,
    #[serde(rename = "AvgTimeline")]
    #[tabled(rename = "AvgTimeline")]
    pub avg_timeline: String,
    #[serde(rename = "AvgCostOverrunPct")]
    #[tabled(rename = "AvgCostOverrunPct")]
    pub avg_cost_overrun: String,
    #[serde(rename = "AvgTimelineOverrunPct")]
    #[tabled(rename = "AvgTimelineOverrunPct")]
    pub avg_timeline_overrun: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TerrainRow {
    #[serde(rename = "Terrain")]
    #[tabled(rename = "Terrain")]
    pub terrain: String,
    #[serde(rename = "Projects")]
    #[tabled(rename = "Projects")]
    pub count: usize,
    #[serde(rename = "AvgTimeline")]
    #[tabled(rename = "AvgTimeline")]
    pub avg_timeline: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RiskShareRow {
    #[serde(rename = "Risk")]
    #[tabled(rename = "Risk")]
    pub risk: String,
    #[serde(rename = "Projects")]
    #[tabled(rename = "Projects")]
    pub count: usize,
    #[serde(rename = "SharePct")]
    #[tabled(rename = "SharePct")]
    pub share_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TopCostRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "ProjectID")]
    #[tabled(rename = "ProjectID")]
    pub project_id: String,
    #[serde(rename = "ProjectType")]
    #[tabled(rename = "ProjectType")]
    pub project_type: String,
    #[serde(rename = "Cost")]
    #[tabled(rename = "Cost")]
    pub cost: String,
    #[serde(rename = "Timeline")]
    #[tabled(rename = "Timeline")]
    pub timeline: String,
    #[serde(rename = "Risk")]
    #[tabled(rename = "Risk")]
    pub risk: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ProjectDetailRow {
    #[serde(rename = "ProjectID")]
    #[tabled(rename = "ProjectID")]
    pub project_id: String,
    #[serde(rename = "ProjectType")]
    #[tabled(rename = "ProjectType")]
    pub project_type: String,
    #[serde(rename = "EstimatedCost")]
    #[tabled(rename = "EstimatedCost")]
    pub estimated_cost: String,
    #[serde(rename = "Cost")]
    #[tabled(rename = "Cost")]
    pub cost: String,
    #[serde(rename = "EstimatedTimeline")]
    #[tabled(rename = "EstimatedTimeline")]
    pub estimated_timeline: String,
    #[serde(rename = "Timeline")]
    #[tabled(rename = "Timeline")]
    pub timeline: String,
    #[serde(rename = "CostOverrunPct")]
    #[tabled(rename = "CostOverrunPct")]
    pub cost_overrun: String,
    #[serde(rename = "TimelineOverrunPct")]
    #[tabled(rename = "TimelineOverrunPct")]
    pub timeline_overrun: String,
    #[serde(rename = "CostEscalation")]
    #[tabled(rename = "CostEscalation")]
    pub cost_escalation: String,
    #[serde(rename = "Risk")]
    #[tabled(rename = "Risk")]
    pub risk: String,
}

/// The four trend series flattened to one row per record for export.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TrendRow {
    #[serde(rename = "Index")]
    #[tabled(rename = "Index")]
    pub index: usize,
    #[serde(rename = "Cost")]
    #[tabled(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Timeline")]
    #[tabled(rename = "Timeline")]
    pub timeline: f64,
    #[serde(rename = "CostOverrunPct")]
    #[tabled(rename = "CostOverrunPct")]
    pub cost_overrun: f64,
    #[serde(rename = "TimelineOverrunPct")]
    #[tabled(rename = "TimelineOverrunPct")]
    pub timeline_overrun: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ScatterRow {
    #[serde(rename = "ProjectID")]
    #[tabled(rename = "ProjectID")]
    pub label: String,
    #[serde(rename = "Cost")]
    #[tabled(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Timeline")]
    #[tabled(rename = "Timeline")]
    pub timeline: f64,
}
