//! Error types for the filtering engine.

use crate::dimension::DimensionId;

/// Errors that can occur when addressing dimensions and groups.
///
/// Data quality problems (missing or non-finite values) are never errors:
/// such records are excluded from the affected key space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The dimension id was not issued by this coordinator.
    UnknownDimension(DimensionId),

    /// The group index was not issued by this coordinator.
    UnknownGroup(usize),

    /// The dimension id was issued by another coordinator.
    ForeignDimension(DimensionId),

    /// The group handle was issued by another coordinator.
    ForeignGroup(usize),

    /// The group exists but was created with a different reducer type.
    GroupTypeMismatch {
        index: usize,
        expected: &'static str,
    },
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::UnknownDimension(id) => write!(f, "Unknown dimension: {}", id),
            FilterError::UnknownGroup(index) => write!(f, "Unknown group: #{}", index),
            FilterError::ForeignDimension(id) => {
                write!(f, "{} belongs to another coordinator", id)
            }
            FilterError::ForeignGroup(index) => {
                write!(f, "Group #{} belongs to another coordinator", index)
            }
            FilterError::GroupTypeMismatch { index, expected } => {
                write!(f, "Group #{} is not a group of {}", index, expected)
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Result type for filtering operations.
pub type FilterResult<T> = Result<T, FilterError>;
