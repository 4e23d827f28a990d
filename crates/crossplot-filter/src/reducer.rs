//! Reducers: the `add` / `remove` / `initial` triples that drive groups.
//!
//! A reducer must be invertible and commutative: starting from `initial()`,
//! any interleaving of `add` for records entering the visible set and
//! `remove` for records leaving it must end at the same accumulator as
//! folding `add` over the final visible set. Sums and counts qualify.
//! Extremes (min/max) and percentiles do not, and need an accumulator that
//! keeps the full multiset instead.

use crate::record::Record;

/// An incremental, invertible aggregate.
pub trait Reducer: 'static {
    /// Accumulator shape.
    type Acc: Clone + 'static;

    /// The accumulator of an empty record set.
    fn initial(&self) -> Self::Acc;

    /// Fold a record in.
    fn add(&self, acc: &mut Self::Acc, record: &Record);

    /// Fold a record out. Only ever called for a record previously added.
    fn remove(&self, acc: &mut Self::Acc, record: &Record);

    /// Fields that must hold finite numbers for a record to be aggregated.
    ///
    /// Records failing this check are excluded from the group's key space
    /// up front and never reach `add` or `remove`.
    fn fields(&self) -> &[String] {
        &[]
    }
}

/// Counts records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl Reducer for Count {
    type Acc = u64;

    fn initial(&self) -> u64 {
        0
    }

    fn add(&self, acc: &mut u64, _record: &Record) {
        *acc += 1;
    }

    fn remove(&self, acc: &mut u64, _record: &Record) {
        *acc -= 1;
    }
}

/// Sums a numeric field.
#[derive(Debug, Clone)]
pub struct Sum {
    fields: [String; 1],
}

impl Sum {
    pub fn of(field: impl Into<String>) -> Self {
        Self {
            fields: [field.into()],
        }
    }

    pub fn field(&self) -> &str {
        &self.fields[0]
    }

    fn read(&self, record: &Record) -> f64 {
        record.number(self.field()).unwrap_or(0.0)
    }
}

impl Reducer for Sum {
    type Acc = f64;

    fn initial(&self) -> f64 {
        0.0
    }

    fn add(&self, acc: &mut f64, record: &Record) {
        *acc += self.read(record);
    }

    fn remove(&self, acc: &mut f64, record: &Record) {
        *acc -= self.read(record);
    }

    fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Running count and sum of a numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountSum {
    pub count: u64,
    pub sum: f64,
}

impl CountSum {
    /// Mean of the aggregated values, `0.0` for an empty set.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Sum of the aggregated values, `0.0` for an empty set.
    pub fn total(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.sum }
    }
}

/// Reducer producing [`CountSum`].
#[derive(Debug, Clone)]
pub struct CountAndSum {
    fields: [String; 1],
}

impl CountAndSum {
    pub fn of(field: impl Into<String>) -> Self {
        Self {
            fields: [field.into()],
        }
    }

    pub fn field(&self) -> &str {
        &self.fields[0]
    }
}

impl Reducer for CountAndSum {
    type Acc = CountSum;

    fn initial(&self) -> CountSum {
        CountSum::default()
    }

    fn add(&self, acc: &mut CountSum, record: &Record) {
        acc.count += 1;
        acc.sum += record.number(self.field()).unwrap_or(0.0);
    }

    fn remove(&self, acc: &mut CountSum, record: &Record) {
        acc.count -= 1;
        acc.sum -= record.number(self.field()).unwrap_or(0.0);
    }

    fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// A reducer assembled from closures.
///
/// # Example
///
/// ```
/// use crossplot_filter::reducer::{ReduceFns, Reducer};
/// use crossplot_filter::Record;
///
/// let field_count = ReduceFns::new(
///     |acc: &mut usize, r: &Record| *acc += r.len(),
///     |acc: &mut usize, r: &Record| *acc -= r.len(),
///     || 0usize,
/// );
/// let mut acc = field_count.initial();
/// field_count.add(&mut acc, &Record::new().with("a", 1.0));
/// assert_eq!(acc, 1);
/// ```
pub struct ReduceFns<A, Add, Remove, Init> {
    add: Add,
    remove: Remove,
    initial: Init,
    fields: Vec<String>,
    _acc: std::marker::PhantomData<fn() -> A>,
}

impl<A, Add, Remove, Init> ReduceFns<A, Add, Remove, Init>
where
    A: Clone + 'static,
    Add: Fn(&mut A, &Record) + 'static,
    Remove: Fn(&mut A, &Record) + 'static,
    Init: Fn() -> A + 'static,
{
    pub fn new(add: Add, remove: Remove, initial: Init) -> Self {
        Self {
            add,
            remove,
            initial,
            fields: Vec::new(),
            _acc: std::marker::PhantomData,
        }
    }

    /// Declare fields that must be finite for a record to be aggregated.
    pub fn requiring<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }
}

impl<A, Add, Remove, Init> Reducer for ReduceFns<A, Add, Remove, Init>
where
    A: Clone + 'static,
    Add: Fn(&mut A, &Record) + 'static,
    Remove: Fn(&mut A, &Record) + 'static,
    Init: Fn() -> A + 'static,
{
    type Acc = A;

    fn initial(&self) -> A {
        (self.initial)()
    }

    fn add(&self, acc: &mut A, record: &Record) {
        (self.add)(acc, record)
    }

    fn remove(&self, acc: &mut A, record: &Record) {
        (self.remove)(acc, record)
    }

    fn fields(&self) -> &[String] {
        &self.fields
    }
}
