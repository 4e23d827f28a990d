//! Dimension keys and projections.

use crate::record::Record;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Milliseconds in one UTC day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// A finite, totally ordered dimension key.
///
/// Day buckets are keyed by their start in epoch milliseconds, numeric
/// fields by their value. `-0.0` is normalized to `0.0` so equal keys hash
/// equally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key(f64);

static_assertions::assert_eq_size!(Key, f64);

impl Key {
    /// Create a key. Returns `None` for NaN and infinities.
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() {
            // Adding 0.0 turns -0.0 into 0.0
            Some(Self(value + 0.0))
        } else {
            None
        }
    }

    /// The key as a number.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a record to its dimension key.
///
/// A projection that yields no value, or a non-finite one, excludes the
/// record from the dimension's key space.
#[derive(Clone)]
pub struct Projection {
    func: Rc<dyn Fn(&Record) -> Option<f64>>,
}

impl Projection {
    /// Create a projection from a closure.
    pub fn new(func: impl Fn(&Record) -> Option<f64> + 'static) -> Self {
        Self {
            func: Rc::new(func),
        }
    }

    /// Project a numeric field (numeric text is coerced).
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |record| record.number(&name))
    }

    /// Project a date field onto the start of its UTC day, in epoch
    /// milliseconds.
    pub fn day(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |record| {
            let millis = record.time(&name)?.timestamp_millis();
            Some(millis.div_euclid(MILLIS_PER_DAY).saturating_mul(MILLIS_PER_DAY) as f64)
        })
    }

    /// Compute the key of a record.
    #[inline]
    pub fn key_of(&self, record: &Record) -> Option<Key> {
        (self.func)(record).and_then(Key::new)
    }
}

impl std::fmt::Debug for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Projection").finish_non_exhaustive()
    }
}
