//! Shared read-only record storage.

use crate::record::Record;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The dataset of a charting session.
///
/// Loaded once, never mutated. Cloning is cheap and shares the records, so
/// every dimension, group and view reads the same rows. Records are
/// addressed by their position in load order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<[Record]>,
}

impl RecordStore {
    /// Create a store from loaded records.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// All records in load order.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Get the (min, max) of a numeric field, ignoring non-finite values.
    pub fn extent(&self, field: &str) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.number(field))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    /// Get the maximum of a numeric field, ignoring non-finite values.
    pub fn max(&self, field: &str) -> Option<f64> {
        self.extent(field).map(|(_, max)| max)
    }

    /// Get the (earliest, latest) timestamp of a date field.
    pub fn time_extent(&self, field: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.records
            .iter()
            .filter_map(|r| r.time(field))
            .fold(None, |acc, t| match acc {
                None => Some((t, t)),
                Some((min, max)) => Some((min.min(t), max.max(t))),
            })
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
