//! Field resolution: picking a value for a metric out of a loosely shaped record.
//!
//! Every metric is described by an ordered list of candidate column names
//! and a default. Resolution walks the candidates once and always ends with a
//! well-defined value, so the downstream stages never see a missing or
//! non-finite number.

use crate::types::{FieldValue, Record};
use crate::util::parse_f64_safe;

/// Coerce one cell to a finite number.
///
/// Booleans count as 1/0, text goes through [`parse_f64_safe`], and `Null`
/// or a non-finite float is not a number.
pub fn coerce_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Null => None,
        FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        FieldValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        FieldValue::Text(s) => parse_f64_safe(s),
    }
}

/// Render a present cell as a category label.
pub fn coerce_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        FieldValue::Bool(b) => Some(b.to_string()),
        FieldValue::Number(n) => Some(n.to_string()),
        FieldValue::Text(s) => Some(s.clone()),
    }
}

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub found: bool,
}

/// What a numeric lookup saw before any default is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup {
    /// The first candidate that coerced to a number.
    Number(f64),
    /// At least one candidate was present but none was numeric.
    NonNumeric,
    /// No candidate was present at all.
    Missing,
}

impl Lookup {
    pub fn number(self) -> Option<f64> {
        match self {
            Lookup::Number(v) => Some(v),
            _ => None,
        }
    }
}

/// A numeric metric: candidate columns in priority order plus a default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericField {
    pub candidates: &'static [&'static str],
    pub default: f64,
}

impl NumericField {
    pub const fn new(candidates: &'static [&'static str], default: f64) -> Self {
        Self {
            candidates,
            default,
        }
    }

    pub fn lookup(&self, record: &Record) -> Lookup {
        let mut seen = false;
        for name in self.candidates {
            if let Some(value) = record.get(name) {
                if let Some(n) = coerce_number(value) {
                    return Lookup::Number(n);
                }
                seen = true;
            }
        }
        if seen {
            Lookup::NonNumeric
        } else {
            Lookup::Missing
        }
    }

    pub fn resolve_or(&self, record: &Record, fallback: f64) -> Resolved<f64> {
        match self.lookup(record) {
            Lookup::Number(value) => Resolved { value, found: true },
            Lookup::NonNumeric | Lookup::Missing => Resolved {
                value: fallback,
                found: false,
            },
        }
    }

    pub fn resolve(&self, record: &Record) -> Resolved<f64> {
        self.resolve_or(record, self.default)
    }

    /// Shorthand for the resolved number when the found flag is irrelevant.
    pub fn value(&self, record: &Record) -> f64 {
        self.resolve(record).value
    }
}

/// A categorical or identity column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextField {
    pub candidates: &'static [&'static str],
    pub default: &'static str,
}

impl TextField {
    pub const fn new(candidates: &'static [&'static str], default: &'static str) -> Self {
        Self {
            candidates,
            default,
        }
    }

    pub fn resolve_or(&self, record: &Record, fallback: &str) -> Resolved<String> {
        self.candidates
            .iter()
            .find_map(|name| record.get(name).and_then(coerce_text))
            .map(|value| Resolved { value, found: true })
            .unwrap_or_else(|| Resolved {
                value: fallback.to_string(),
                found: false,
            })
    }

    pub fn resolve(&self, record: &Record) -> Resolved<String> {
        self.resolve_or(record, self.default)
    }

    pub fn value(&self, record: &Record) -> String {
        self.resolve(record).value
    }
}

pub const PROJECT_ID: TextField = TextField::new(&["ProjectID"], "");
pub const PROJECT_TYPE: TextField = TextField::new(&["ProjectType"], "Unknown");
pub const TERRAIN: TextField = TextField::new(&["Terrain"], "Unknown");
pub const RISK: TextField = TextField::new(&["Overall_Risk"], "Unknown");

pub const COST: NumericField = NumericField::new(&["Predicted_Cost", "TotalCost"], 0.0);
pub const BASELINE_COST: NumericField = NumericField::new(&["EstimatedCost", "TotalCost"], 0.0);
pub const TIMELINE: NumericField = NumericField::new(&["Predicted_Timeline", "Timeline"], 0.0);
pub const BASELINE_TIMELINE: NumericField =
    NumericField::new(&["EstimatedTimeline", "Timeline"], 0.0);
pub const COST_OVERRUN_PCT: NumericField = NumericField::new(&["Cost_Overrun_Pct"], 0.0);
pub const TIMELINE_OVERRUN_PCT: NumericField = NumericField::new(&["Timeline_Overrun_Pct"], 0.0);
pub const COST_ESCALATION: NumericField = NumericField::new(&["CostEscalation"], 0.0);

/// Model output only, without the `TotalCost`/`Timeline` fallback; used for
/// the raw predicted-minus-baseline deltas.
pub const PREDICTED_COST_ONLY: NumericField = NumericField::new(&["Predicted_Cost"], 0.0);
pub const PREDICTED_TIMELINE_ONLY: NumericField = NumericField::new(&["Predicted_Timeline"], 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, FieldValue)]) -> Record {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn first_candidate_wins() {
        let r = rec(&[("Predicted_Cost", 150.0.into()), ("TotalCost", 100.0.into())]);
        assert_eq!(COST.resolve(&r), Resolved { value: 150.0, found: true });
    }

    #[test]
    fn falls_back_to_later_candidate() {
        let r = rec(&[("TotalCost", 100.0.into())]);
        assert_eq!(COST.resolve(&r), Resolved { value: 100.0, found: true });
    }

    #[test]
    fn zero_counts_as_present() {
        let r = rec(&[("Predicted_Cost", 0.0.into()), ("TotalCost", 100.0.into())]);
        assert_eq!(COST.lookup(&r), Lookup::Number(0.0));
    }

    #[test]
    fn null_is_absent() {
        let r = rec(&[("Predicted_Cost", FieldValue::Null), ("TotalCost", 7.0.into())]);
        assert_eq!(COST.value(&r), 7.0);
    }

    #[test]
    fn non_numeric_skips_to_next_candidate() {
        let r = rec(&[("Predicted_Cost", "n/a".into()), ("TotalCost", "1,200".into())]);
        assert_eq!(COST.lookup(&r), Lookup::Number(1200.0));
    }

    #[test]
    fn non_numeric_everywhere_is_reported_and_defaults() {
        let r = rec(&[("Predicted_Cost", "n/a".into())]);
        assert_eq!(COST.lookup(&r), Lookup::NonNumeric);
        assert_eq!(COST.resolve(&r), Resolved { value: 0.0, found: false });
    }

    #[test]
    fn missing_defaults() {
        assert_eq!(TIMELINE.lookup(&Record::new()), Lookup::Missing);
        assert_eq!(TIMELINE.resolve_or(&Record::new(), 3.0).value, 3.0);
    }

    #[test]
    fn booleans_coerce_to_one_and_zero() {
        let r = rec(&[("Cost_Overrun_Pct", true.into())]);
        assert_eq!(COST_OVERRUN_PCT.value(&r), 1.0);
    }

    #[test]
    fn non_finite_numbers_are_not_numbers() {
        let r = rec(&[("TotalCost", f64::INFINITY.into())]);
        assert_eq!(COST.lookup(&r), Lookup::NonNumeric);
    }

    #[test]
    fn categories_default_to_unknown() {
        assert_eq!(PROJECT_TYPE.value(&Record::new()), "Unknown");
        assert_eq!(PROJECT_TYPE.resolve_or(&Record::new(), "").value, "");
    }

    #[test]
    fn empty_text_is_a_present_category() {
        let r = rec(&[("Terrain", "".into())]);
        assert_eq!(TERRAIN.resolve(&r), Resolved { value: String::new(), found: true });
    }

    #[test]
    fn numeric_categories_render_as_text() {
        let r = rec(&[("ProjectID", 42.0.into())]);
        assert_eq!(PROJECT_ID.value(&r), "42");
    }
}
