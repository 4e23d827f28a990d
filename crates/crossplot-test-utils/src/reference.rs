//! Reference aggregation: folds the currently visible records from scratch.
//!
//! These functions only read each dimension's projection and active filter
//! spec. Keys are projected again from the raw record and tested with
//! [`crossplot_filter::FilterSpec::accepts`], never through the resolved key selections, so
//! they make an independent oracle for group values after any sequence of
//! filter calls.

use crossplot_filter::{
    Dimension, DimensionId, FilterCoordinator, GroupAllId, GroupId, GroupScope, Key, Reducer,
};

/// Project a record onto a dimension's key from scratch.
fn project(xf: &FilterCoordinator, dimension: &Dimension, record: usize) -> Option<Key> {
    let record = xf.store().get(record)?;
    dimension.projection().key_of(record)
}

/// Check a record against one dimension's active filter predicate.
///
/// Keyless records pass only while the dimension is unfiltered.
pub fn passes(xf: &FilterCoordinator, dimension: &Dimension, record: usize) -> bool {
    let filter = dimension.filter();
    match project(xf, dimension, record) {
        Some(key) => filter.accepts(key.value()),
        None => filter.is_all(),
    }
}

/// Check if a record is seen by a group on `own` with the given scope.
pub fn observes(
    xf: &FilterCoordinator,
    own: DimensionId,
    scope: GroupScope,
    record: usize,
) -> bool {
    xf.dimensions().iter().all(|dimension| {
        (scope == GroupScope::ExceptOwn && dimension.id() == own)
            || passes(xf, dimension, record)
    })
}

/// A keyed group's accumulators, recomputed, in ascending key order.
pub fn group_values<R: Reducer>(xf: &FilterCoordinator, id: GroupId<R>) -> Vec<R::Acc> {
    let Ok(group) = xf.get_group(id) else {
        return Vec::new();
    };
    let Ok(dimension) = xf.get_dimension(group.dimension()) else {
        return Vec::new();
    };

    let reducer = group.reducer();
    let mut values: Vec<R::Acc> = group.keys().iter().map(|_| reducer.initial()).collect();

    for (index, record) in xf.store().iter().enumerate() {
        if !observes(xf, group.dimension(), group.scope(), index)
            || !record.has_finite(reducer.fields())
        {
            continue;
        }
        let Some(key) = project(xf, dimension, index) else {
            continue;
        };
        if let Ok(ordinal) = group.keys().binary_search(&key) {
            reducer.add(&mut values[ordinal], record);
        }
    }

    values
}

/// A keyed group's accumulators as currently maintained by the coordinator.
pub fn current_values<R: Reducer>(xf: &FilterCoordinator, id: GroupId<R>) -> Vec<R::Acc> {
    xf.get_group(id)
        .map(|group| group.all().map(|(_, acc)| acc.clone()).collect())
        .unwrap_or_default()
}

/// A scalar group's accumulator, recomputed.
pub fn group_all_value<R: Reducer>(xf: &FilterCoordinator, id: GroupAllId<R>) -> Option<R::Acc> {
    let group = xf.get_group_all(id).ok()?;
    let dimension = xf.get_dimension(group.dimension()).ok()?;

    let reducer = group.reducer();
    let mut value = reducer.initial();
    for (index, record) in xf.store().iter().enumerate() {
        if observes(xf, group.dimension(), group.scope(), index)
            && project(xf, dimension, index).is_some()
            && record.has_finite(reducer.fields())
        {
            reducer.add(&mut value, record);
        }
    }
    Some(value)
}

/// Number of records passing every active filter, recomputed.
pub fn visible_count(xf: &FilterCoordinator) -> usize {
    (0..xf.store().len())
        .filter(|&index| xf.dimensions().iter().all(|d| passes(xf, d, index)))
        .count()
}
