use crate::types::ChartId;
use crossplot_filter::FilterError;

/// Errors that can occur when building or driving linked charts.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The filtering engine rejected a handle.
    Filter(FilterError),

    /// The chart id was not issued by this dashboard.
    UnknownChart(ChartId),

    /// A required option was left empty.
    MissingField(&'static str),

    /// Width or height is zero.
    InvalidSize { width: u32, height: u32 },
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::Filter(err) => write!(f, "Filter error: {}", err),
            ChartError::UnknownChart(id) => write!(f, "Unknown chart: {}", id),
            ChartError::MissingField(name) => write!(f, "Missing chart option: {}", name),
            ChartError::InvalidSize { width, height } => {
                write!(f, "Invalid chart size: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChartError::Filter(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FilterError> for ChartError {
    fn from(err: FilterError) -> Self {
        ChartError::Filter(err)
    }
}

/// Result type for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;
