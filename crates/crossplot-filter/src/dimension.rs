//! Dimension index: records sorted by projected key, plus the active filter.

use crate::filter::{FilterSpec, Selection};
use crate::key::{Key, Projection};
use crate::store::RecordStore;
use crossplot_core::profiling::profile_function;
use std::ops::Range;
use std::rc::Rc;

/// Identifies a dimension within its coordinator.
///
/// Ids carry the tag of the coordinator that issued them, so another
/// coordinator rejects them instead of resolving the bare index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DimensionId {
    owner: u32,
    index: u32,
}

impl DimensionId {
    pub(crate) fn new(owner: u32, index: u32) -> Self {
        Self { owner, index }
    }

    /// Position of the dimension in creation order.
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn owner(self) -> u32 {
        self.owner
    }
}

impl std::fmt::Display for DimensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dimension#{}", self.index)
    }
}

/// Records entering and leaving a dimension's filter in one transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FilterDelta {
    pub entered: Vec<usize>,
    pub exited: Vec<usize>,
}

/// A key index over the record store with at most one active filter.
///
/// Records with a key are stored grouped by key in ascending key order, so
/// the records of any run of keys form one contiguous slice. Records without
/// a key pass only while the dimension is unfiltered.
#[derive(Debug)]
pub struct Dimension {
    id: DimensionId,
    name: String,
    projection: Projection,
    /// Distinct keys, ascending. Shared with the groups of this dimension.
    keys: Rc<[Key]>,
    /// `offsets[i]..offsets[i + 1]` are the positions in `members` of key `i`.
    offsets: Vec<usize>,
    /// Record indices sorted by key, then by load order.
    members: Vec<usize>,
    /// Key ordinal of every record, `None` when excluded.
    ordinals: Vec<Option<u32>>,
    keyless: Vec<usize>,
    filter: FilterSpec,
    selection: Selection,
}

impl Dimension {
    pub(crate) fn new(
        id: DimensionId,
        name: impl Into<String>,
        store: &RecordStore,
        projection: Projection,
    ) -> Self {
        profile_function!();

        let mut keyed = Vec::with_capacity(store.len());
        let mut keyless = Vec::new();
        for (index, record) in store.iter().enumerate() {
            match projection.key_of(record) {
                Some(key) => keyed.push((key, index)),
                None => keyless.push(index),
            }
        }
        keyed.sort_unstable();

        let mut keys = Vec::new();
        let mut offsets = Vec::new();
        let mut members = Vec::with_capacity(keyed.len());
        let mut ordinals = vec![None; store.len()];
        for (position, (key, index)) in keyed.into_iter().enumerate() {
            if keys.last() != Some(&key) {
                keys.push(key);
                offsets.push(position);
            }
            ordinals[index] = Some((keys.len() - 1) as u32);
            members.push(index);
        }
        offsets.push(members.len());

        Self {
            id,
            name: name.into(),
            projection,
            keys: keys.into(),
            offsets,
            members,
            ordinals,
            keyless,
            filter: FilterSpec::All,
            selection: Selection::All,
        }
    }

    /// The id of this dimension.
    pub fn id(&self) -> DimensionId {
        self.id
    }

    /// The name given at creation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The projection this dimension was built from.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Distinct keys in ascending order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub(crate) fn shared_keys(&self) -> Rc<[Key]> {
        Rc::clone(&self.keys)
    }

    /// Smallest and largest key.
    pub fn extent(&self) -> Option<(Key, Key)> {
        Some((*self.keys.first()?, *self.keys.last()?))
    }

    /// The active filter.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Check whether a filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.filter.is_all()
    }

    /// Key of a record, `None` when the record is outside the key space.
    pub fn key_of(&self, record: usize) -> Option<Key> {
        self.ordinal(record).map(|o| self.keys[o])
    }

    /// Number of records with a key.
    pub fn keyed_len(&self) -> usize {
        self.members.len()
    }

    /// Records excluded from the key space.
    pub fn keyless(&self) -> &[usize] {
        &self.keyless
    }

    #[inline]
    pub(crate) fn ordinal(&self, record: usize) -> Option<usize> {
        self.ordinals.get(record).copied().flatten().map(|o| o as usize)
    }

    /// Check whether a record passes the active filter.
    #[inline]
    pub fn passes(&self, record: usize) -> bool {
        match self.selection {
            Selection::All => true,
            _ => self
                .ordinal(record)
                .is_some_and(|o| self.selection.contains(o)),
        }
    }

    /// Records of a run of key ordinals.
    fn members_of(&self, ordinals: Range<usize>) -> &[usize] {
        &self.members[self.offsets[ordinals.start]..self.offsets[ordinals.end]]
    }

    /// Replace the active filter and report which records changed side.
    ///
    /// Returns `None` when `spec` equals the active filter.
    pub(crate) fn set_filter(&mut self, spec: FilterSpec) -> Option<(FilterSpec, FilterDelta)> {
        profile_function!();

        if spec == self.filter {
            return None;
        }

        let selection = spec.select(&self.keys);
        let diff = self.selection.diff(&selection, self.keys.len());

        let mut delta = FilterDelta::default();
        for run in diff.entered {
            delta.entered.extend_from_slice(self.members_of(run));
        }
        for run in diff.exited {
            delta.exited.extend_from_slice(self.members_of(run));
        }
        if diff.keyless_entered {
            delta.entered.extend_from_slice(&self.keyless);
        }
        if diff.keyless_exited {
            delta.exited.extend_from_slice(&self.keyless);
        }

        self.selection = selection;
        let previous = std::mem::replace(&mut self.filter, spec);
        Some((previous, delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn store() -> RecordStore {
        RecordStore::new(
            [3.0, 1.0, f64::NAN, 2.0, 1.0, 3.0]
                .into_iter()
                .map(|v| Record::new().with("v", v))
                .collect(),
        )
    }

    fn dimension() -> Dimension {
        Dimension::new(DimensionId::new(0, 0), "v", &store(), Projection::field("v"))
    }

    #[test]
    fn test_index_layout() {
        let dim = dimension();
        let keys: Vec<f64> = dim.keys().iter().map(|k| k.value()).collect();
        assert_eq!(keys, vec![1.0, 2.0, 3.0]);
        assert_eq!(dim.keyless(), &[2]);
        assert_eq!(dim.keyed_len(), 5);
        assert_eq!(dim.members_of(0..1), &[1, 4]);
        assert_eq!(dim.members_of(2..3), &[0, 5]);
        assert_eq!(dim.key_of(3), Key::new(2.0));
        assert_eq!(dim.key_of(2), None);
    }

    #[test]
    fn test_unfiltered_passes_keyless() {
        let dim = dimension();
        assert!((0..6).all(|r| dim.passes(r)));
    }

    #[test]
    fn test_set_filter_delta() {
        let mut dim = dimension();

        let (previous, delta) = dim.set_filter(FilterSpec::Exact(1.0)).unwrap();
        assert!(previous.is_all());
        let mut exited = delta.exited.clone();
        exited.sort();
        assert_eq!(exited, vec![0, 2, 3, 5]);
        assert!(delta.entered.is_empty());
        assert!(!dim.passes(2));
        assert!(dim.passes(1));

        let (_, delta) = dim.set_filter(FilterSpec::RangeInclusive(1.0, 2.0)).unwrap();
        assert_eq!(delta.entered, vec![3]);
        assert!(delta.exited.is_empty());

        let (_, delta) = dim.set_filter(FilterSpec::All).unwrap();
        let mut entered = delta.entered.clone();
        entered.sort();
        assert_eq!(entered, vec![0, 2, 5]);
    }

    #[test]
    fn test_same_filter_is_noop() {
        let mut dim = dimension();
        assert!(dim.set_filter(FilterSpec::Range(1.0, 3.0)).is_some());
        assert!(dim.set_filter(FilterSpec::Range(1.0, 3.0)).is_none());
        assert!(dim.set_filter(FilterSpec::All).is_some());
        assert!(dim.set_filter(FilterSpec::All).is_none());
    }

    #[test]
    fn test_empty_dimension() {
        let dim = Dimension::new(
            DimensionId::new(0, 1),
            "empty",
            &RecordStore::default(),
            Projection::field("v"),
        );
        assert!(dim.keys().is_empty());
        assert_eq!(dim.extent(), None);
    }
}
