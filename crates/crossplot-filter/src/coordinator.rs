//! The filter coordinator: owns dimensions, groups and active filters, and
//! turns each filter change into incremental group updates plus one
//! notification.

use crate::dimension::{Dimension, DimensionId, FilterDelta};
use crate::error::{FilterError, FilterResult};
use crate::event::{FilterEvent, FilterListener, FilterOutcome};
use crate::filter::FilterSpec;
use crate::group::{Group, GroupAll, GroupAllId, GroupId, GroupScope, GroupState};
use crate::key::Projection;
use crate::reducer::Reducer;
use crate::store::RecordStore;
use crossplot_core::alloc::HashMap;
use crossplot_core::profiling::{profile_function, profile_scope};
use std::sync::atomic::{AtomicU32, Ordering};

/// Source of coordinator tags stamped into every handle.
static NEXT_OWNER: AtomicU32 = AtomicU32::new(1);

/// Coordinates filtering across every dimension of one record store.
///
/// A record is *visible* when it passes the active filter of every
/// dimension. For each record the coordinator keeps the number of
/// dimensions rejecting it, so a filter change only touches the records
/// that cross that dimension's filter boundary:
///
/// - a record leaving dimension D becomes invisible when no other dimension
///   was already rejecting it,
/// - a record entering D becomes visible when no other dimension rejects it.
///
/// Groups are updated with `add`/`remove` for exactly those records, then
/// every listener is notified once.
///
/// # Example
///
/// ```
/// use crossplot_filter::{FilterCoordinator, FilterSpec, Projection, Record, RecordStore};
/// use crossplot_filter::reducer::CountAndSum;
///
/// let store = RecordStore::new(vec![
///     Record::new().with("day", 1.0).with("val", 5.0),
///     Record::new().with("day", 1.0).with("val", f64::NAN),
///     Record::new().with("day", 2.0).with("val", 10.0),
/// ]);
///
/// let mut coordinator = FilterCoordinator::new(store);
/// let day = coordinator.dimension("day", Projection::field("day"));
/// let by_day = coordinator.group(day, CountAndSum::of("val")).unwrap();
///
/// coordinator.filter(day, FilterSpec::Exact(1.0)).unwrap();
///
/// let acc = coordinator.value(by_day, 1.0).unwrap().unwrap();
/// assert_eq!((acc.count, acc.sum), (1, 5.0));
/// ```
pub struct FilterCoordinator {
    /// Tag carried by every handle this coordinator issues.
    owner: u32,
    store: RecordStore,
    dimensions: Vec<Dimension>,
    /// First dimension created under each name.
    names: HashMap<String, DimensionId>,
    groups: Vec<Box<dyn GroupState>>,
    /// Number of dimensions whose active filter rejects each record.
    rejections: Vec<u32>,
    visible: usize,
    listeners: Vec<Box<dyn FilterListener>>,
}

impl FilterCoordinator {
    /// Create a coordinator over a record store.
    pub fn new(store: RecordStore) -> Self {
        let len = store.len();
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            store,
            dimensions: Vec::new(),
            names: HashMap::new(),
            groups: Vec::new(),
            rejections: vec![0; len],
            visible: len,
            listeners: Vec::new(),
        }
    }

    /// The shared record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Create a dimension. It starts unfiltered.
    pub fn dimension(&mut self, name: impl Into<String>, projection: Projection) -> DimensionId {
        let id = DimensionId::new(self.owner, self.dimensions.len() as u32);
        let dimension = Dimension::new(id, name, &self.store, projection);

        tracing::debug!(
            dimension = %id,
            name = dimension.name(),
            keys = dimension.keys().len(),
            keyless = dimension.keyless().len(),
            "created dimension"
        );

        self.names.entry(dimension.name().to_string()).or_insert(id);
        self.dimensions.push(dimension);
        id
    }

    /// Look up a dimension by name. Returns the first one created when
    /// several share a name.
    pub fn find_dimension(&self, name: &str) -> Option<DimensionId> {
        self.names.get(name).copied()
    }

    /// Get a dimension.
    pub fn get_dimension(&self, id: DimensionId) -> FilterResult<&Dimension> {
        self.check_dimension(id)?;
        self.dimensions
            .get(id.index())
            .ok_or(FilterError::UnknownDimension(id))
    }

    fn check_dimension(&self, id: DimensionId) -> FilterResult<()> {
        if id.owner() == self.owner {
            Ok(())
        } else {
            tracing::warn!(dimension = %id, "dimension id from another coordinator");
            Err(FilterError::ForeignDimension(id))
        }
    }

    /// All dimensions in creation order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Create a keyed group observing every active filter.
    pub fn group<R: Reducer>(
        &mut self,
        dimension: DimensionId,
        reducer: R,
    ) -> FilterResult<GroupId<R>> {
        self.group_with_scope(dimension, reducer, GroupScope::Visible)
    }

    /// Create a keyed group with an explicit scope.
    pub fn group_with_scope<R: Reducer>(
        &mut self,
        dimension: DimensionId,
        reducer: R,
        scope: GroupScope,
    ) -> FilterResult<GroupId<R>> {
        let dim = self.get_dimension(dimension)?;
        let group = Group::new(reducer, &self.store, dim, scope);
        let index = self.register(Box::new(group));
        Ok(GroupId::new(self.owner, index))
    }

    /// Create a scalar group observing every active filter.
    pub fn group_all<R: Reducer>(
        &mut self,
        dimension: DimensionId,
        reducer: R,
    ) -> FilterResult<GroupAllId<R>> {
        self.group_all_with_scope(dimension, reducer, GroupScope::Visible)
    }

    /// Create a scalar group with an explicit scope.
    pub fn group_all_with_scope<R: Reducer>(
        &mut self,
        dimension: DimensionId,
        reducer: R,
        scope: GroupScope,
    ) -> FilterResult<GroupAllId<R>> {
        let dim = self.get_dimension(dimension)?;
        let group = GroupAll::new(reducer, &self.store, dim, scope);
        let index = self.register(Box::new(group));
        Ok(GroupAllId::new(self.owner, index))
    }

    /// Fold the currently visible records into a new group and store it.
    fn register(&mut self, mut group: Box<dyn GroupState>) -> usize {
        profile_function!();

        let dimension = group.dimension();
        let scope = group.scope();
        for index in 0..self.store.len() {
            if self.observes(dimension, scope, index) {
                group.insert(index, &self.store);
            }
        }

        self.groups.push(group);
        tracing::debug!(group = self.groups.len() - 1, %dimension, ?scope, "created group");
        self.groups.len() - 1
    }

    /// Check if a group on `dimension` with `scope` currently sees a record.
    fn observes(&self, dimension: DimensionId, scope: GroupScope, index: usize) -> bool {
        let rejections = self.rejections[index];
        match scope {
            GroupScope::Visible => rejections == 0,
            GroupScope::ExceptOwn => {
                let own = u32::from(!self.dimensions[dimension.index()].passes(index));
                rejections - own == 0
            }
        }
    }

    /// Get a keyed group.
    pub fn get_group<R: Reducer>(&self, id: GroupId<R>) -> FilterResult<&Group<R>> {
        self.downcast(id.owner(), id.index())
    }

    /// Get a scalar group.
    pub fn get_group_all<R: Reducer>(&self, id: GroupAllId<R>) -> FilterResult<&GroupAll<R>> {
        self.downcast(id.owner(), id.index())
    }

    fn downcast<T: 'static>(&self, owner: u32, index: usize) -> FilterResult<&T> {
        if owner != self.owner {
            tracing::warn!(group = index, "group handle from another coordinator");
            return Err(FilterError::ForeignGroup(index));
        }
        let group = self
            .groups
            .get(index)
            .ok_or(FilterError::UnknownGroup(index))?;
        group
            .as_any()
            .downcast_ref::<T>()
            .ok_or(FilterError::GroupTypeMismatch {
                index,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Accumulator of one key of a keyed group.
    pub fn value<R: Reducer>(&self, id: GroupId<R>, key: f64) -> FilterResult<Option<&R::Acc>> {
        Ok(self.get_group(id)?.value(key))
    }

    /// Accumulator of a scalar group.
    pub fn value_all<R: Reducer>(&self, id: GroupAllId<R>) -> FilterResult<&R::Acc> {
        Ok(self.get_group_all(id)?.value_all())
    }

    /// Change counter of any group, keyed or scalar.
    pub fn group_version(&self, index: usize) -> FilterResult<u64> {
        self.groups
            .get(index)
            .map(|g| g.version())
            .ok_or(FilterError::UnknownGroup(index))
    }

    /// Register a listener. Listeners are called in registration order.
    pub fn subscribe(&mut self, listener: impl FilterListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replace the active filter of a dimension.
    ///
    /// Before this returns, every dependent group is up to date and every
    /// listener has been called once. Passing the active filter again is a
    /// no-op and notifies nobody.
    pub fn filter(
        &mut self,
        id: DimensionId,
        spec: impl Into<FilterSpec>,
    ) -> FilterResult<FilterOutcome> {
        profile_function!();

        self.check_dimension(id)?;
        let Some(dimension) = self.dimensions.get_mut(id.index()) else {
            tracing::warn!(dimension = %id, "filter on unknown dimension");
            return Err(FilterError::UnknownDimension(id));
        };

        let Some((previous, delta)) = dimension.set_filter(spec.into()) else {
            tracing::trace!(dimension = %id, "filter unchanged");
            return Ok(FilterOutcome::Unchanged);
        };
        let current = dimension.filter().clone();

        self.apply_delta(id, &delta);

        let event = FilterEvent {
            dimension: id,
            previous,
            current,
            entered: delta.entered.len(),
            exited: delta.exited.len(),
        };
        tracing::debug!(
            dimension = %id,
            filter = ?event.current,
            entered = event.entered,
            exited = event.exited,
            visible = self.visible,
            "applied filter"
        );

        self.notify(&event);

        Ok(FilterOutcome::Applied {
            entered: event.entered,
            exited: event.exited,
        })
    }

    /// Clear the active filter of a dimension.
    pub fn filter_all(&mut self, id: DimensionId) -> FilterResult<FilterOutcome> {
        self.filter(id, FilterSpec::All)
    }

    /// Clear every active filter, one transition per filtered dimension.
    pub fn clear_filters(&mut self) -> FilterResult<usize> {
        let filtered: Vec<DimensionId> = self
            .dimensions
            .iter()
            .filter(|d| d.is_filtered())
            .map(Dimension::id)
            .collect();

        for &id in &filtered {
            self.filter_all(id)?;
        }
        Ok(filtered.len())
    }

    /// Update rejection counts and groups for the records that crossed the
    /// filter boundary of `changed`.
    fn apply_delta(&mut self, changed: DimensionId, delta: &FilterDelta) {
        profile_scope!("apply_delta");

        let Self {
            store,
            dimensions,
            groups,
            rejections,
            visible,
            ..
        } = self;
        let dimensions: &[Dimension] = dimensions;

        let plans: Vec<(DimensionId, GroupScope)> =
            groups.iter().map(|g| (g.dimension(), g.scope())).collect();

        // Whether a group sees a record, given the number of dimensions
        // rejecting it. `changed` is the only dimension whose state moves,
        // so the other dimensions can be asked directly.
        let sees = |plan: (DimensionId, GroupScope), index: usize, count: u32| match plan.1 {
            GroupScope::Visible => count == 0,
            GroupScope::ExceptOwn => {
                let own = u32::from(!dimensions[plan.0.index()].passes(index));
                count - own == 0
            }
        };

        for &index in &delta.exited {
            let before = rejections[index];
            rejections[index] = before + 1;
            if before == 0 {
                *visible -= 1;
            }

            for (group, &plan) in groups.iter_mut().zip(&plans) {
                if plan.1 == GroupScope::ExceptOwn && plan.0 == changed {
                    continue;
                }
                if sees(plan, index, before) {
                    group.retract(index, store);
                }
            }
        }

        for &index in &delta.entered {
            let after = rejections[index] - 1;
            rejections[index] = after;
            if after == 0 {
                *visible += 1;
            }

            for (group, &plan) in groups.iter_mut().zip(&plans) {
                if plan.1 == GroupScope::ExceptOwn && plan.0 == changed {
                    continue;
                }
                if sees(plan, index, after) {
                    group.insert(index, store);
                }
            }
        }
    }

    fn notify(&mut self, event: &FilterEvent) {
        profile_scope!("notify");

        // Listeners only get `&self`, so none can subscribe mid-dispatch
        let mut listeners = std::mem::take(&mut self.listeners);
        for (position, listener) in listeners.iter_mut().enumerate() {
            tracing::trace!(
                listener = position,
                dimension = %event.dimension,
                "dispatching filter event"
            );
            listener.on_filtered(event, self);
        }
        self.listeners = listeners;
    }

    /// Check if a record passes every active filter.
    pub fn is_visible(&self, index: usize) -> bool {
        self.rejections.get(index).is_some_and(|&r| r == 0)
    }

    /// Number of records passing every active filter.
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// Check if any dimension has an active filter.
    pub fn has_active_filters(&self) -> bool {
        self.dimensions.iter().any(Dimension::is_filtered)
    }
}

impl std::fmt::Debug for FilterCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterCoordinator")
            .field("records", &self.store.len())
            .field("visible", &self.visible)
            .field("dimensions", &self.dimensions.len())
            .field("groups", &self.groups.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::{Count, CountAndSum, CountSum, Sum};
    use crate::record::Record;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn example_store() -> RecordStore {
        RecordStore::new(vec![
            Record::new().with("day", 1.0).with("val", 5.0),
            Record::new().with("day", 1.0).with("val", f64::NAN),
            Record::new().with("day", 2.0).with("val", 10.0),
        ])
    }

    #[test]
    fn test_nan_record_is_excluded_from_sum() {
        let mut xf = FilterCoordinator::new(example_store());
        let day = xf.dimension("day", Projection::field("day"));
        let by_day = xf.group(day, CountAndSum::of("val")).unwrap();

        xf.filter(day, FilterSpec::Exact(1.0)).unwrap();

        assert_eq!(
            xf.value(by_day, 1.0).unwrap(),
            Some(&CountSum { count: 1, sum: 5.0 })
        );
        assert_eq!(
            xf.value(by_day, 2.0).unwrap(),
            Some(&CountSum::default())
        );
        assert_eq!(xf.value(by_day, 3.0).unwrap(), None);
    }

    #[test]
    fn test_group_all_average_with_nothing_visible() {
        let mut xf = FilterCoordinator::new(example_store());
        let val = xf.dimension("val", Projection::field("val"));
        let total = xf.group_all(val, CountAndSum::of("val")).unwrap();

        xf.filter(val, FilterSpec::Range(100.0, 200.0)).unwrap();

        let acc = xf.value_all(total).unwrap();
        assert_eq!(acc.count, 0);
        assert_eq!(acc.average(), 0.0);
        assert_eq!(xf.visible_count(), 0);
    }

    #[test]
    fn test_filters_compose_across_dimensions() {
        let mut xf = FilterCoordinator::new(example_store());
        let day = xf.dimension("day", Projection::field("day"));
        let val = xf.dimension("val", Projection::field("val"));
        let count = xf.group_all(day, Count).unwrap();

        xf.filter(day, FilterSpec::Exact(1.0)).unwrap();
        assert_eq!(*xf.value_all(count).unwrap(), 2);

        // The NaN record has no key on `val`, so any filter there drops it
        xf.filter(val, FilterSpec::RangeInclusive(0.0, 100.0)).unwrap();
        assert_eq!(*xf.value_all(count).unwrap(), 1);

        xf.filter_all(day).unwrap();
        assert_eq!(*xf.value_all(count).unwrap(), 2);
        assert!(xf.has_active_filters());

        assert_eq!(xf.clear_filters().unwrap(), 1);
        assert_eq!(*xf.value_all(count).unwrap(), 3);
        assert!(!xf.has_active_filters());
    }

    #[test]
    fn test_except_own_scope_ignores_own_filter() {
        let mut xf = FilterCoordinator::new(example_store());
        let day = xf.dimension("day", Projection::field("day"));
        let val = xf.dimension("val", Projection::field("val"));
        let own = xf
            .group_with_scope(day, Sum::of("val"), GroupScope::ExceptOwn)
            .unwrap();
        let visible = xf.group(day, Sum::of("val")).unwrap();

        xf.filter(day, FilterSpec::Exact(1.0)).unwrap();
        assert_eq!(xf.value(own, 2.0).unwrap(), Some(&10.0));
        assert_eq!(xf.value(visible, 2.0).unwrap(), Some(&0.0));

        xf.filter(val, FilterSpec::Range(0.0, 6.0)).unwrap();
        assert_eq!(xf.value(own, 2.0).unwrap(), Some(&0.0));
        assert_eq!(xf.value(own, 1.0).unwrap(), Some(&5.0));

        xf.filter_all(val).unwrap();
        assert_eq!(xf.value(own, 2.0).unwrap(), Some(&10.0));
    }

    #[test]
    fn test_group_created_after_filter_starts_consistent() {
        let mut xf = FilterCoordinator::new(example_store());
        let day = xf.dimension("day", Projection::field("day"));
        xf.filter(day, FilterSpec::Exact(2.0)).unwrap();

        let sum = xf.group(day, Sum::of("val")).unwrap();
        assert_eq!(xf.value(sum, 2.0).unwrap(), Some(&10.0));
        assert_eq!(xf.value(sum, 1.0).unwrap(), Some(&0.0));

        xf.filter_all(day).unwrap();
        assert_eq!(xf.value(sum, 1.0).unwrap(), Some(&5.0));
    }

    #[test]
    fn test_listeners_run_once_in_order() {
        let mut xf = FilterCoordinator::new(example_store());
        let day = xf.dimension("day", Projection::field("day"));
        let count = xf.group_all(day, Count).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            xf.subscribe(move |event: &FilterEvent, xf: &FilterCoordinator| {
                // Groups are already up to date when listeners run
                let seen = *xf.value_all(count).unwrap();
                log.borrow_mut().push((name, event.current.clone(), seen));
            });
        }

        xf.filter(day, FilterSpec::Exact(1.0)).unwrap();
        assert_eq!(
            xf.filter(day, FilterSpec::Exact(1.0)).unwrap(),
            FilterOutcome::Unchanged
        );
        xf.filter_all(day).unwrap();

        let log = log.borrow();
        assert_eq!(
            *log,
            vec![
                ("first", FilterSpec::Exact(1.0), 2),
                ("second", FilterSpec::Exact(1.0), 2),
                ("first", FilterSpec::All, 3),
                ("second", FilterSpec::All, 3),
            ]
        );
    }

    #[test]
    fn test_handle_errors() {
        let mut xf = FilterCoordinator::new(example_store());
        let day = xf.dimension("day", Projection::field("day"));
        let sum = xf.group(day, Sum::of("val")).unwrap();

        assert_eq!(xf.find_dimension("day"), Some(day));
        assert_eq!(xf.find_dimension("nope"), None);

        let bogus = DimensionId::new(xf.owner, 9);
        assert_eq!(
            xf.filter(bogus, FilterSpec::All),
            Err(FilterError::UnknownDimension(bogus))
        );
        assert!(xf.group(bogus, Count).is_err());

        // Same index, different reducer type
        let wrong: GroupId<Count> = GroupId::new(xf.owner, sum.index());
        assert!(matches!(
            xf.get_group(wrong),
            Err(FilterError::GroupTypeMismatch { index: 0, .. })
        ));
        assert_eq!(
            xf.get_group(GroupId::<Sum>::new(xf.owner, 5)).unwrap_err(),
            FilterError::UnknownGroup(5)
        );
    }

    #[test]
    fn test_handles_from_another_coordinator_are_rejected() {
        let mut a = FilterCoordinator::new(example_store());
        let mut b = FilterCoordinator::new(RecordStore::new(vec![
            Record::new().with("day", 1.0).with("val", 999.0),
        ]));
        let day_a = a.dimension("day", Projection::field("day"));
        let sum_a = a.group(day_a, Sum::of("val")).unwrap();
        let total_a = a.group_all(day_a, Count).unwrap();
        let day_b = b.dimension("day", Projection::field("day"));
        let sum_b = b.group(day_b, Sum::of("val")).unwrap();

        // Same indices on both sides
        assert_eq!(day_a.index(), day_b.index());
        assert_eq!(sum_a.index(), sum_b.index());
        assert_ne!(day_a, day_b);
        assert_ne!(sum_a, sum_b);

        assert_eq!(b.value(sum_a, 1.0), Err(FilterError::ForeignGroup(0)));
        assert_eq!(b.value_all(total_a), Err(FilterError::ForeignGroup(1)));
        assert_eq!(
            b.filter(day_a, FilterSpec::Exact(2.0)),
            Err(FilterError::ForeignDimension(day_a))
        );
        assert!(b.get_dimension(day_a).is_err());
        assert!(b.group(day_a, Count).is_err());

        // Nothing in b moved
        assert!(!b.has_active_filters());
        assert_eq!(b.value(sum_b, 1.0).unwrap(), Some(&999.0));
        assert_eq!(a.value(sum_a, 1.0).unwrap(), Some(&5.0));
    }

    #[test]
    fn test_repeated_nan_filter_is_unchanged() {
        let mut xf = FilterCoordinator::new(example_store());
        let val = xf.dimension("val", Projection::field("val"));
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        xf.subscribe(move |_: &FilterEvent, _: &FilterCoordinator| *counter.borrow_mut() += 1);

        for spec in [
            FilterSpec::Exact(f64::NAN),
            FilterSpec::Range(f64::NAN, 10.0),
            FilterSpec::RangeInclusive(0.0, f64::NAN),
        ] {
            assert!(xf.filter(val, spec.clone()).unwrap().is_applied());
            assert_eq!(xf.filter(val, spec).unwrap(), FilterOutcome::Unchanged);
        }
        assert_eq!(*calls.borrow(), 3);
        assert_eq!(xf.visible_count(), 0);
    }

    #[test]
    fn test_versions_track_changes() {
        let mut xf = FilterCoordinator::new(example_store());
        let day = xf.dimension("day", Projection::field("day"));
        let val = xf.dimension("val", Projection::field("val"));
        let own = xf
            .group_with_scope(day, Count, GroupScope::ExceptOwn)
            .unwrap();

        let v0 = xf.get_group(own).unwrap().version();
        xf.filter(day, FilterSpec::Exact(1.0)).unwrap();
        assert_eq!(xf.get_group(own).unwrap().version(), v0);

        xf.filter(val, FilterSpec::Exact(10.0)).unwrap();
        assert_ne!(xf.get_group(own).unwrap().version(), v0);
        assert_eq!(xf.group_version(own.index()).unwrap(), xf.get_group(own).unwrap().version());
    }
}
