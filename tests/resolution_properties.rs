use overrun_dashboard::fields::{
    BASELINE_COST, BASELINE_TIMELINE, COST, COST_ESCALATION, COST_OVERRUN_PCT, TIMELINE,
    TIMELINE_OVERRUN_PCT,
};
use overrun_dashboard::{Dashboard, FieldValue, Record};
use proptest::prelude::*;

const COLUMNS: &[&str] = &[
    "Predicted_Cost",
    "TotalCost",
    "EstimatedCost",
    "Predicted_Timeline",
    "Timeline",
    "EstimatedTimeline",
    "Cost_Overrun_Pct",
    "Timeline_Overrun_Pct",
    "CostEscalation",
    "Overall_Risk",
    "ProjectType",
];

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        any::<bool>().prop_map(FieldValue::Bool),
        (-1.0e9f64..1.0e9).prop_map(FieldValue::Number),
        Just(FieldValue::Number(f64::NAN)),
        Just(FieldValue::Number(f64::INFINITY)),
        "[A-Za-z _-]{0,8}|[0-9,]{1,7}(\\.[0-9]{1,2})?".prop_map(FieldValue::Text),
    ]
}

fn record() -> impl Strategy<Value = Record> {
    prop::collection::vec((prop::sample::select(COLUMNS), field_value()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect::<Record>())
}

proptest! {
    #[test]
    fn every_metric_resolves_to_a_finite_number(r in record()) {
        for field in [
            COST, BASELINE_COST, TIMELINE, BASELINE_TIMELINE,
            COST_OVERRUN_PCT, TIMELINE_OVERRUN_PCT, COST_ESCALATION,
        ] {
            prop_assert!(field.value(&r).is_finite());
        }
    }

    #[test]
    fn dashboard_never_holds_non_finite_values(data in prop::collection::vec(record(), 0..20)) {
        let d = Dashboard::compute(&data);
        let s = &d.summary;
        for v in [
            s.avg_cost, s.avg_timeline, s.avg_cost_overrun, s.avg_timeline_overrun,
            s.avg_estimated_cost, s.avg_estimated_timeline, s.avg_cost_delta,
            s.avg_time_delta, s.avg_cost_diff_pct, s.avg_time_diff_pct,
            s.max_cost, s.min_cost, s.max_timeline, s.min_timeline,
        ] {
            prop_assert!(v.is_finite());
        }
        prop_assert_eq!(d.trends.cost.len(), data.len());
        prop_assert!(d.top_cost.len() <= 8);
        prop_assert!(d.by_project_type.iter().all(|g| g.metrics.iter().all(|m| m.average.is_finite())));
    }
}
