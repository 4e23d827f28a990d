//! Records and field values.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;

/// A single field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    /// Numeric value. May be non-finite in raw data.
    Number(f64),
    /// Free text. Numeric text coerces to a number.
    Text(String),
    /// Point in time.
    Time(DateTime<Utc>),
}

impl Value {
    /// Coerce to a finite number.
    ///
    /// Numbers pass through, numeric text is parsed, timestamps become epoch
    /// milliseconds. Everything else, including NaN and infinities, is `None`.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Value::Null => return None,
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            Value::Time(t) => t.timestamp_millis() as f64,
        };
        number.is_finite().then_some(number)
    }

    /// Coerce to a timestamp.
    ///
    /// Text is accepted as RFC 3339 or as a plain `%Y-%m-%d` date (midnight
    /// UTC). Numbers are read as epoch milliseconds.
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            Value::Number(n) if n.is_finite() => DateTime::from_timestamp_millis(*n as i64),
            Value::Text(s) => {
                let s = s.trim();
                if let Ok(t) = DateTime::parse_from_rfc3339(s) {
                    return Some(t.with_timezone(&Utc));
                }
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            }
            _ => None,
        }
    }

    /// Check if this value is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Time(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// An immutable row of named fields.
///
/// Fields keep their insertion order. Records are built once and only read
/// afterwards; the store hands out shared references only.
///
/// # Example
///
/// ```
/// use crossplot_filter::Record;
///
/// let record = Record::new().with("day", 1.0).with("val", "5");
/// assert_eq!(record.number("val"), Some(5.0));
/// assert_eq!(record.number("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous value under the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a raw field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a field coerced to a finite number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    /// Get a field coerced to a timestamp.
    pub fn time(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(Value::as_time)
    }

    /// Check whether every named field holds a finite number.
    pub fn has_finite(&self, names: &[String]) -> bool {
        names.iter().all(|name| self.number(name).is_some())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
