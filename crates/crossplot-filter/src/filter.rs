//! Filter specifications and key selections.

use crate::key::Key;
use std::ops::Range;
use std::rc::Rc;

/// The active filter of a dimension.
///
/// A dimension holds exactly one of these at a time. Setting a new one
/// replaces the old one; filters never compose within a dimension.
#[derive(Clone, Default)]
pub enum FilterSpec {
    /// No filter: every record passes, including records without a key.
    #[default]
    All,
    /// Keys equal to the value.
    Exact(f64),
    /// Keys in `[lo, hi)`, the shape of a brush selection.
    Range(f64, f64),
    /// Keys in `[lo, hi]`.
    RangeInclusive(f64, f64),
    /// Keys accepted by an arbitrary predicate.
    Predicate(Rc<dyn Fn(f64) -> bool>),
}

impl FilterSpec {
    /// Create a predicate filter.
    pub fn predicate(func: impl Fn(f64) -> bool + 'static) -> Self {
        FilterSpec::Predicate(Rc::new(func))
    }

    /// Check if this is the "no filter" spec.
    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, FilterSpec::All)
    }

    /// Check if a key passes this filter.
    pub fn accepts(&self, key: f64) -> bool {
        match self {
            FilterSpec::All => true,
            FilterSpec::Exact(v) => key == *v,
            FilterSpec::Range(lo, hi) => *lo <= key && key < *hi,
            FilterSpec::RangeInclusive(lo, hi) => *lo <= key && key <= *hi,
            FilterSpec::Predicate(func) => func(key),
        }
    }

    /// Resolve this filter against the ascending distinct keys of a
    /// dimension.
    ///
    /// Value filters resolve by binary search. Predicates are evaluated once
    /// per distinct key.
    pub(crate) fn select(&self, keys: &[Key]) -> Selection {
        let lower = |bound: f64| keys.partition_point(|k| k.value() < bound);
        let upper = |bound: f64| keys.partition_point(|k| k.value() <= bound);
        let span = |start: usize, end: usize| Selection::Span(start..end.max(start));
        let empty = || Selection::Span(0..0);

        match self {
            FilterSpec::All => Selection::All,
            FilterSpec::Exact(v) => span(lower(*v), upper(*v)),
            FilterSpec::Range(lo, hi) | FilterSpec::RangeInclusive(lo, hi)
                if lo.is_nan() || hi.is_nan() =>
            {
                empty()
            }
            FilterSpec::Range(lo, hi) => span(lower(*lo), lower(*hi)),
            FilterSpec::RangeInclusive(lo, hi) => span(lower(*lo), upper(*hi)),
            FilterSpec::Predicate(func) => {
                Selection::Keys(keys.iter().map(|k| func(k.value())).collect())
            }
        }
    }
}

/// Bound equality where every NaN matches every other NaN.
fn same_bound(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl PartialEq for FilterSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FilterSpec::All, FilterSpec::All) => true,
            (FilterSpec::Exact(a), FilterSpec::Exact(b)) => same_bound(*a, *b),
            (FilterSpec::Range(a0, a1), FilterSpec::Range(b0, b1))
            | (FilterSpec::RangeInclusive(a0, a1), FilterSpec::RangeInclusive(b0, b1)) => {
                same_bound(*a0, *b0) && same_bound(*a1, *b1)
            }
            // Predicates are opaque; only the same closure is the same filter
            (FilterSpec::Predicate(a), FilterSpec::Predicate(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for FilterSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterSpec::All => write!(f, "All"),
            FilterSpec::Exact(v) => f.debug_tuple("Exact").field(v).finish(),
            FilterSpec::Range(lo, hi) => f.debug_tuple("Range").field(lo).field(hi).finish(),
            FilterSpec::RangeInclusive(lo, hi) => f
                .debug_tuple("RangeInclusive")
                .field(lo)
                .field(hi)
                .finish(),
            FilterSpec::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl From<Range<f64>> for FilterSpec {
    fn from(range: Range<f64>) -> Self {
        FilterSpec::Range(range.start, range.end)
    }
}

impl From<std::ops::RangeInclusive<f64>> for FilterSpec {
    fn from(range: std::ops::RangeInclusive<f64>) -> Self {
        let (lo, hi) = range.into_inner();
        FilterSpec::RangeInclusive(lo, hi)
    }
}

/// A filter resolved to key ordinals of one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selection {
    /// Unfiltered. Keyless records pass too.
    All,
    /// A contiguous run of key ordinals.
    Span(Range<usize>),
    /// Per-ordinal membership.
    Keys(Vec<bool>),
}

impl Selection {
    /// Check if the key at `ordinal` is selected.
    #[inline]
    pub(crate) fn contains(&self, ordinal: usize) -> bool {
        match self {
            Selection::All => true,
            Selection::Span(span) => span.contains(&ordinal),
            Selection::Keys(mask) => mask.get(ordinal).copied().unwrap_or(false),
        }
    }

    fn as_span(&self, key_count: usize) -> Option<Range<usize>> {
        match self {
            Selection::All => Some(0..key_count),
            Selection::Span(span) => Some(span.clone()),
            Selection::Keys(_) => None,
        }
    }

    /// Compute which key ordinals enter and leave when moving from `self` to
    /// `next`.
    ///
    /// Between two spans only the non-overlapping ends are visited.
    pub(crate) fn diff(&self, next: &Selection, key_count: usize) -> SelectionDiff {
        let mut diff = SelectionDiff::default();

        if let (Some(old), Some(new)) = (self.as_span(key_count), next.as_span(key_count)) {
            push_difference(&mut diff.entered, &new, &old);
            push_difference(&mut diff.exited, &old, &new);
        } else {
            for ordinal in 0..key_count {
                match (self.contains(ordinal), next.contains(ordinal)) {
                    (false, true) => diff.entered.push(ordinal..ordinal + 1),
                    (true, false) => diff.exited.push(ordinal..ordinal + 1),
                    _ => {}
                }
            }
        }

        diff.keyless_entered = !matches!(self, Selection::All) && matches!(next, Selection::All);
        diff.keyless_exited = matches!(self, Selection::All) && !matches!(next, Selection::All);
        diff
    }
}

/// Ordinal ranges entering and leaving a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectionDiff {
    pub entered: Vec<Range<usize>>,
    pub exited: Vec<Range<usize>>,
    pub keyless_entered: bool,
    pub keyless_exited: bool,
}

/// Push `a \ b` as at most two ranges.
fn push_difference(out: &mut Vec<Range<usize>>, a: &Range<usize>, b: &Range<usize>) {
    if a.is_empty() {
        return;
    }
    if b.is_empty() || b.end <= a.start || a.end <= b.start {
        out.push(a.clone());
        return;
    }
    if a.start < b.start {
        out.push(a.start..b.start);
    }
    if b.end < a.end {
        out.push(b.end..a.end);
    }
}
