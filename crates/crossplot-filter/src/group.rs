//! Group aggregators: per-key and scalar accumulators kept in sync with the
//! visible record set.

use crate::dimension::{Dimension, DimensionId};
use crate::key::Key;
use crate::reducer::Reducer;
use crate::store::RecordStore;
use std::any::Any;
use std::marker::PhantomData;
use std::rc::Rc;

/// Which filters a group observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupScope {
    /// Every active filter, including the group's own dimension.
    #[default]
    Visible,
    /// Every active filter except the group's own dimension.
    ///
    /// A brushed chart keeps showing the records outside its brush while
    /// the other charts narrow down to the selection.
    ExceptOwn,
}

/// Typed handle to a keyed group.
pub struct GroupId<R> {
    owner: u32,
    index: usize,
    _reducer: PhantomData<fn() -> R>,
}

/// Typed handle to a scalar (`group_all`) group.
pub struct GroupAllId<R> {
    owner: u32,
    index: usize,
    _reducer: PhantomData<fn() -> R>,
}

macro_rules! impl_group_handle {
    ($name:ident) => {
        impl<R> $name<R> {
            pub(crate) fn new(owner: u32, index: usize) -> Self {
                Self {
                    owner,
                    index,
                    _reducer: PhantomData,
                }
            }

            /// Position of the group in creation order.
            pub fn index(&self) -> usize {
                self.index
            }

            pub(crate) fn owner(&self) -> u32 {
                self.owner
            }
        }

        impl<R> Clone for $name<R> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<R> Copy for $name<R> {}

        impl<R> PartialEq for $name<R> {
            fn eq(&self, other: &Self) -> bool {
                self.owner == other.owner && self.index == other.index
            }
        }

        impl<R> Eq for $name<R> {}

        impl<R> std::fmt::Debug for $name<R> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.index).finish()
            }
        }
    };
}

impl_group_handle!(GroupId);
impl_group_handle!(GroupAllId);

/// Accumulator slots shared by keyed and scalar groups.
///
/// `slots[record]` is the accumulator a record folds into, or `None` when
/// the record has no key or fails the reducer's finite-field check. Slots
/// are fixed at creation, which keeps `add` and `remove` balanced.
struct Accumulators<R: Reducer> {
    reducer: R,
    slots: Vec<Option<u32>>,
    values: Vec<R::Acc>,
    /// Records currently folded in.
    size: usize,
    version: u64,
}

impl<R: Reducer> Accumulators<R> {
    fn new(
        reducer: R,
        store: &RecordStore,
        dimension: &Dimension,
        slot_count: usize,
        slot_of: impl Fn(usize) -> u32,
    ) -> Self {
        let fields = reducer.fields();
        let slots = store
            .iter()
            .enumerate()
            .map(|(index, record)| {
                dimension
                    .ordinal(index)
                    .filter(|_| record.has_finite(fields))
                    .map(&slot_of)
            })
            .collect();
        let values = (0..slot_count).map(|_| reducer.initial()).collect();

        Self {
            reducer,
            slots,
            values,
            size: 0,
            version: 0,
        }
    }

    #[inline]
    fn add(&mut self, index: usize, store: &RecordStore) -> bool {
        let (Some(Some(slot)), Some(record)) = (self.slots.get(index), store.get(index)) else {
            return false;
        };
        self.reducer.add(&mut self.values[*slot as usize], record);
        self.size += 1;
        self.version = self.version.wrapping_add(1);
        true
    }

    #[inline]
    fn remove(&mut self, index: usize, store: &RecordStore) -> bool {
        let (Some(Some(slot)), Some(record)) = (self.slots.get(index), store.get(index)) else {
            return false;
        };
        self.reducer.remove(&mut self.values[*slot as usize], record);
        self.size -= 1;
        self.version = self.version.wrapping_add(1);
        true
    }
}

/// A keyed group: one accumulator per distinct key of its dimension.
///
/// Every key of the dimension is present, with `initial()` when none of its
/// records are visible.
pub struct Group<R: Reducer> {
    dimension: DimensionId,
    scope: GroupScope,
    keys: Rc<[Key]>,
    acc: Accumulators<R>,
}

impl<R: Reducer> Group<R> {
    pub(crate) fn new(
        reducer: R,
        store: &RecordStore,
        dimension: &Dimension,
        scope: GroupScope,
    ) -> Self {
        let keys = dimension.shared_keys();
        let acc = Accumulators::new(reducer, store, dimension, keys.len(), |o| o as u32);
        Self {
            dimension: dimension.id(),
            scope,
            keys,
            acc,
        }
    }

    /// The dimension this group is keyed by.
    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    /// Which filters this group observes.
    pub fn scope(&self) -> GroupScope {
        self.scope
    }

    /// The reducer folding records into each key.
    pub fn reducer(&self) -> &R {
        &self.acc.reducer
    }

    /// Accumulator of a key, `None` when the key is not in the dimension.
    pub fn value(&self, key: f64) -> Option<&R::Acc> {
        let key = Key::new(key)?;
        let ordinal = self.keys.binary_search(&key).ok()?;
        self.acc.values.get(ordinal)
    }

    /// All `(key, accumulator)` pairs in ascending key order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = (Key, &R::Acc)> + '_ {
        self.keys.iter().copied().zip(self.acc.values.iter())
    }

    /// Distinct keys in ascending order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the group has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of records currently folded in.
    pub fn size(&self) -> usize {
        self.acc.size
    }

    /// Counter bumped on every accumulator change.
    pub fn version(&self) -> u64 {
        self.acc.version
    }
}

/// A scalar group: one accumulator over every visible record of its
/// dimension's key space.
pub struct GroupAll<R: Reducer> {
    dimension: DimensionId,
    scope: GroupScope,
    acc: Accumulators<R>,
}

impl<R: Reducer> GroupAll<R> {
    pub(crate) fn new(
        reducer: R,
        store: &RecordStore,
        dimension: &Dimension,
        scope: GroupScope,
    ) -> Self {
        let acc = Accumulators::new(reducer, store, dimension, 1, |_| 0);
        Self {
            dimension: dimension.id(),
            scope,
            acc,
        }
    }

    /// The dimension whose key space this group covers.
    pub fn dimension(&self) -> DimensionId {
        self.dimension
    }

    /// Which filters this group observes.
    pub fn scope(&self) -> GroupScope {
        self.scope
    }

    /// The reducer folding every visible record.
    pub fn reducer(&self) -> &R {
        &self.acc.reducer
    }

    /// The accumulator over the whole visible set.
    pub fn value_all(&self) -> &R::Acc {
        &self.acc.values[0]
    }

    /// Number of records currently folded in.
    pub fn size(&self) -> usize {
        self.acc.size
    }

    /// Counter bumped on every accumulator change.
    pub fn version(&self) -> u64 {
        self.acc.version
    }
}

/// Type-erased view of a group used by the coordinator.
pub(crate) trait GroupState: Any {
    fn dimension(&self) -> DimensionId;

    fn scope(&self) -> GroupScope;

    /// Fold a record in. Returns `false` for records outside the group's
    /// key space.
    fn insert(&mut self, index: usize, store: &RecordStore) -> bool;

    /// Fold a record out. Returns `false` for records outside the group's
    /// key space.
    fn retract(&mut self, index: usize, store: &RecordStore) -> bool;

    fn version(&self) -> u64;

    fn as_any(&self) -> &dyn Any;
}

impl<R: Reducer> GroupState for Group<R> {
    fn dimension(&self) -> DimensionId {
        self.dimension
    }

    fn scope(&self) -> GroupScope {
        self.scope
    }

    fn insert(&mut self, index: usize, store: &RecordStore) -> bool {
        self.acc.add(index, store)
    }

    fn retract(&mut self, index: usize, store: &RecordStore) -> bool {
        self.acc.remove(index, store)
    }

    fn version(&self) -> u64 {
        self.acc.version
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<R: Reducer> GroupState for GroupAll<R> {
    fn dimension(&self) -> DimensionId {
        self.dimension
    }

    fn scope(&self) -> GroupScope {
        self.scope
    }

    fn insert(&mut self, index: usize, store: &RecordStore) -> bool {
        self.acc.add(index, store)
    }

    fn retract(&mut self, index: usize, store: &RecordStore) -> bool {
        self.acc.remove(index, store)
    }

    fn version(&self) -> u64 {
        self.acc.version
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<R: Reducer> std::fmt::Debug for Group<R>
where
    R::Acc: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("dimension", &self.dimension)
            .field("scope", &self.scope)
            .field("size", &self.acc.size)
            .field("values", &self.acc.values)
            .finish()
    }
}

impl<R: Reducer> std::fmt::Debug for GroupAll<R>
where
    R::Acc: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupAll")
            .field("dimension", &self.dimension)
            .field("scope", &self.scope)
            .field("size", &self.acc.size)
            .field("value", self.value_all())
            .finish()
    }
}
