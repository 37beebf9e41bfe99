//! Assertion helpers shared across harnesses.

use prebox_core::{Record, SensorKind};
use serde_json::Value;

/// Compare a record against an expected JSON value, with a readable diff on
/// mismatch. Object key order is not compared here; the emit harness checks
/// ordering on the rendered text.
pub fn assert_record_json(record: &Record, expected: &Value) {
    let actual = serde_json::to_value(record).expect("record serializes");
    pretty_assertions::assert_eq!(&actual, expected);
}

/// The coefficient `name` of `kind`'s calibration entry.
pub fn coefficient<'r>(record: &'r Record, kind: SensorKind, name: &str) -> Option<&'r Value> {
    record
        .sensor(kind)
        .calibration()
        .calibration_coefficients
        .get(name)
}

/// Coefficient names of `kind` in insertion order.
pub fn coefficient_names(record: &Record, kind: SensorKind) -> Vec<&str> {
    record
        .sensor(kind)
        .calibration()
        .calibration_coefficients
        .keys()
        .map(String::as_str)
        .collect()
}

/// Assert that every sensor slot is still in its fixed position.
#[macro_export]
macro_rules! assert_slots_fixed {
    ($record:expr) => {{
        let record: &prebox_core::Record = &$record;
        let kinds: Vec<prebox_core::SensorKind> =
            record.sensors.iter().map(|s| s.sensor_type).collect();
        if kinds != prebox_core::SensorKind::ALL.to_vec() {
            panic!(
                "assert_slots_fixed! failed:\n  expected: {:?}\n  actual:   {:?}",
                prebox_core::SensorKind::ALL,
                kinds
            );
        }
    }};
}
