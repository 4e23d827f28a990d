//! Deterministic record sets.

use crossplot_filter::{MILLIS_PER_DAY, Record, RecordStore, Value};

/// 2022-01-01T00:00:00Z in epoch milliseconds.
pub const EPOCH_START: i64 = 1_640_995_200_000;

/// The three-record store of the filter examples: two records on day 1 (one
/// with a NaN value) and one on day 2.
pub fn tiny() -> RecordStore {
    RecordStore::new(vec![
        Record::new().with("day", 1.0).with("val", 5.0),
        Record::new().with("day", 1.0).with("val", f64::NAN),
        Record::new().with("day", 2.0).with("val", 10.0),
    ])
}

/// `count` records spread over `days` day keys.
///
/// Fields:
/// - `day`: `i % days`
/// - `value`: an integer in `0..100`, NaN for every 13th record
/// - `weight`: an integer in `0..10`, missing for every 17th record
///
/// Integer values keep floating point sums exact regardless of the order
/// records are added and removed.
pub fn events(count: usize, days: usize) -> RecordStore {
    let days = days.max(1);
    (0..count)
        .map(|i| {
            let value = if i % 13 == 12 {
                f64::NAN
            } else {
                ((i * 7919) % 100) as f64
            };
            let weight: Value = if i % 17 == 16 {
                Value::Null
            } else {
                Value::from(((i * 31) % 10) as f64)
            };
            Record::new()
                .with("day", (i % days) as f64)
                .with("value", value)
                .with("weight", weight)
        })
        .collect()
}

/// `count` records with a `time` field (epoch milliseconds, several records
/// per day) and a `value` field.
pub fn timeline(count: usize) -> RecordStore {
    (0..count)
        .map(|i| {
            let millis = EPOCH_START + (i as i64) * (MILLIS_PER_DAY / 4) + 3_600_000;
            Record::new()
                .with("time", millis as f64)
                .with("value", ((i * 37) % 50) as f64)
        })
        .collect()
}
