//! Property-based tests for incremental filtering.
//!
//! Covers: agreement of every group with a from-scratch fold after arbitrary
//! filter sequences (NaN bounds included), round trips back to the
//! unfiltered state, and idempotence of repeated filters.

use crossplot_filter::reducer::{Count, CountAndSum, Sum};
use crossplot_filter::{
    DimensionId, FilterCoordinator, FilterSpec, GroupScope, Projection, Record, RecordStore,
};
use crossplot_test_utils::{RecordingListener, reference};
use proptest::prelude::*;

const FIELDS: [&str; 3] = ["a", "b", "c"];

/// Integer values keep sums exact; `None` becomes NaN or a missing field.
fn arb_cell() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![
        8 => (0..12i32).prop_map(Some),
        1 => Just(None),
    ]
}

fn arb_store() -> impl Strategy<Value = RecordStore> {
    prop::collection::vec((arb_cell(), arb_cell(), arb_cell()), 0..60).prop_map(|rows| {
        rows.into_iter()
            .map(|(a, b, c)| {
                Record::new()
                    .with("a", a.map_or(f64::NAN, f64::from))
                    .with("b", b.map(f64::from))
                    .with("c", c.map(f64::from))
            })
            .collect()
    })
}

fn arb_spec() -> impl Strategy<Value = FilterSpec> {
    prop_oneof![
        1 => Just(FilterSpec::All),
        2 => (0..12i32).prop_map(|k| FilterSpec::Exact(f64::from(k))),
        3 => (0..12i32, 0..12i32).prop_map(|(lo, hi)| FilterSpec::Range(f64::from(lo), f64::from(hi))),
        2 => (0..12i32, 0..12i32)
            .prop_map(|(lo, hi)| FilterSpec::RangeInclusive(f64::from(lo), f64::from(hi))),
        1 => (2..4i32).prop_map(|m| FilterSpec::predicate(move |k| k as i32 % m == 0)),
        1 => prop_oneof![
            Just(FilterSpec::Exact(f64::NAN)),
            (0..12i32).prop_map(|hi| FilterSpec::Range(f64::NAN, f64::from(hi))),
            (0..12i32).prop_map(|lo| FilterSpec::RangeInclusive(f64::from(lo), f64::NAN)),
        ],
    ]
}

fn arb_steps() -> impl Strategy<Value = Vec<(usize, FilterSpec)>> {
    prop::collection::vec((0..FIELDS.len(), arb_spec()), 1..12)
}

struct Fixture {
    xf: FilterCoordinator,
    dims: Vec<DimensionId>,
}

fn fixture(store: RecordStore) -> Fixture {
    let mut xf = FilterCoordinator::new(store);
    let dims = FIELDS
        .iter()
        .map(|f| xf.dimension(*f, Projection::field(*f)))
        .collect();
    Fixture { xf, dims }
}

proptest! {
    /// Every group equals a fold over the records it currently observes.
    #[test]
    fn groups_match_recomputation(store in arb_store(), steps in arb_steps()) {
        let Fixture { mut xf, dims } = fixture(store);

        let sum_a = xf.group(dims[0], Sum::of("b")).unwrap();
        let count_b = xf.group_with_scope(dims[1], Count, GroupScope::ExceptOwn).unwrap();
        let cs_c = xf.group(dims[2], CountAndSum::of("a")).unwrap();
        let all_a = xf.group_all(dims[0], CountAndSum::of("c")).unwrap();
        let all_b = xf.group_all_with_scope(dims[1], Count, GroupScope::ExceptOwn).unwrap();

        for (dim, spec) in steps {
            xf.filter(dims[dim], spec).unwrap();

            prop_assert_eq!(reference::current_values(&xf, sum_a), reference::group_values(&xf, sum_a));
            prop_assert_eq!(reference::current_values(&xf, count_b), reference::group_values(&xf, count_b));
            prop_assert_eq!(reference::current_values(&xf, cs_c), reference::group_values(&xf, cs_c));
            prop_assert_eq!(Some(*xf.value_all(all_a).unwrap()), reference::group_all_value(&xf, all_a));
            prop_assert_eq!(Some(*xf.value_all(all_b).unwrap()), reference::group_all_value(&xf, all_b));
            prop_assert_eq!(xf.visible_count(), reference::visible_count(&xf));
        }
    }

    /// Clearing every filter restores the never-filtered state.
    #[test]
    fn clearing_restores_initial_state(store in arb_store(), steps in arb_steps()) {
        let Fixture { mut xf, dims } = fixture(store);
        let sum = xf.group(dims[0], Sum::of("b")).unwrap();
        let total = xf.group_all(dims[2], CountAndSum::of("b")).unwrap();

        let initial_sum = reference::current_values(&xf, sum);
        let initial_total = *xf.value_all(total).unwrap();
        let initial_visible = xf.visible_count();

        for (dim, spec) in steps {
            xf.filter(dims[dim], spec).unwrap();
        }
        xf.clear_filters().unwrap();

        prop_assert_eq!(reference::current_values(&xf, sum), initial_sum);
        prop_assert_eq!(*xf.value_all(total).unwrap(), initial_total);
        prop_assert_eq!(xf.visible_count(), initial_visible);
        prop_assert!(!xf.has_active_filters());
    }

    /// Applying the active filter again changes nothing and notifies nobody.
    #[test]
    fn repeated_filter_is_idempotent(store in arb_store(), dim in 0..FIELDS.len(), spec in arb_spec()) {
        let Fixture { mut xf, dims } = fixture(store);
        let sum = xf.group(dims[dim], Sum::of("b")).unwrap();
        let recorder = RecordingListener::new();
        xf.subscribe(recorder.clone());

        xf.filter(dims[dim], spec.clone()).unwrap();
        let after_first = reference::current_values(&xf, sum);
        let notified = recorder.count();

        prop_assert!(!xf.filter(dims[dim], spec).unwrap().is_applied());
        prop_assert_eq!(reference::current_values(&xf, sum), after_first);
        prop_assert_eq!(recorder.count(), notified);
    }
}
