//! Extractor — folds ordered rule lists over the segmented log text.
//!
//! Each [`Rule`] is a named function that inspects one line and, when its
//! trigger is present, patches the in-progress [`Extraction`]. Every line is
//! offered to every rule of the pass in list order; rules never
//! short-circuit one another, so a line may fire several of them.
//!
//! Two passes run per log:
//!
//! ```text
//! self-test block ──► SELFTEST_RULES ──┐
//!                                      ├──► Record
//! optode block    ──► OPTODE_RULES  ───┘
//! ```
//!
//! Rule order is significant wherever two rules write the same field or the
//! cumulative platform tag, so the lists below are the single place that
//! order is defined.

mod ctd;
mod flbb;
mod msc;
mod ocr;
mod optode;
mod platform;

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::config::Config;
use crate::error::ExtractError;
use crate::segment::Segments;
use crate::text::split_lines;
use crate::types::{Record, SensorKind};

pub(crate) use msc::NitrateTable;
pub(crate) use platform::PlatformTags;

/// `Ok(true)` when the rule's trigger was present on the line.
pub(crate) type RuleResult = Result<bool, ExtractError>;

/// A named extraction rule.
#[derive(Clone, Copy)]
pub(crate) struct Rule {
    pub name: &'static str,
    pub apply: fn(&str, &mut Extraction) -> RuleResult,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

const SELFTEST_RULES: &[Rule] = &[
    Rule { name: "timestamp", apply: platform::timestamp },
    Rule { name: "platform_firmware", apply: platform::firmware },
    Rule { name: "platform_id", apply: platform::platform_id },
    Rule { name: "ctd_identity", apply: ctd::identity },
    Rule { name: "ctd_platform_tag", apply: platform::ctd_tag },
    Rule { name: "temperature_cal_date", apply: ctd::temperature_cal_date },
    Rule { name: "conductivity_cal_date", apply: ctd::conductivity_cal_date },
    Rule { name: "pressure", apply: ctd::pressure },
    Rule { name: "ctd_calibration", apply: ctd::calibration },
    Rule { name: "ph_config", apply: msc::ph_config },
    Rule { name: "nitrate_config", apply: msc::nitrate_config },
    Rule { name: "msc_cal_file", apply: msc::cal_file },
    Rule { name: "nitrate_cal_date", apply: msc::nitrate_cal_date },
    Rule { name: "nitrate_table", apply: msc::nitrate_table },
    Rule { name: "flbb", apply: flbb::flbb },
    Rule { name: "ocr_selftest", apply: ocr::selftest },
    Rule { name: "ocr_config", apply: ocr::config },
    Rule { name: "optode_selftest", apply: optode::selftest },
];

const OPTODE_RULES: &[Rule] = &[
    Rule { name: "optode_product_name", apply: optode::product_name },
    Rule { name: "optode_production_date", apply: optode::production_date },
    Rule { name: "sbe83_config", apply: optode::sbe83_config },
    Rule { name: "optode_identity", apply: optode::identity },
    Rule { name: "optode_coefficients", apply: optode::coefficients },
];

/// Names of the self-test rules in application order.
pub fn selftest_rule_names() -> impl Iterator<Item = &'static str> {
    SELFTEST_RULES.iter().map(|rule| rule.name)
}

/// Names of the optode-block rules in application order.
pub fn optode_rule_names() -> impl Iterator<Item = &'static str> {
    OPTODE_RULES.iter().map(|rule| rule.name)
}

// ---------------------------------------------------------------------------
// Extraction state
// ---------------------------------------------------------------------------

/// The record being built plus the cross-line state some rules carry.
#[derive(Debug)]
pub(crate) struct Extraction {
    pub record: Record,
    pub tags: PlatformTags,
    /// How many sensor slots receive the captured add date.
    pub add_date_slots: usize,
    pub nitrate_table: NitrateTable,
    /// Coefficient key of the OCR optical channel declared most recently.
    pub ocr_channel: Option<String>,
}

impl Extraction {
    fn new(base_model: &str, sensor_count: usize) -> Self {
        Self {
            record: Record::new(base_model),
            tags: PlatformTags::new(base_model),
            add_date_slots: sensor_count.saturating_add(1).min(SensorKind::ALL.len()),
            nitrate_table: NitrateTable::default(),
            ocr_channel: None,
        }
    }

    fn run(&mut self, pass: &'static str, text: &str, rules: &[Rule]) -> Result<(), ExtractError> {
        let mut lines = 0usize;
        let mut fired = 0usize;
        for (index, line) in split_lines(text).enumerate() {
            lines += 1;
            for rule in rules {
                let hit = (rule.apply)(line, self).inspect_err(|err| {
                    tracing::debug!(pass, rule = rule.name, line = index + 1, %err, "rule failed");
                })?;
                if hit {
                    fired += 1;
                    tracing::trace!(pass, rule = rule.name, line = index + 1, "rule fired");
                }
            }
        }
        tracing::debug!(pass, lines, fired, "extraction pass complete");
        Ok(())
    }
}

/// Run both passes over `segments` and return the finished record.
///
/// `sensor_count` bounds add-date propagation to the first
/// `sensor_count + 1` slots (never more than eight). The only error is a
/// coefficient that must be numeric and is not; every other miss leaves its
/// field unset.
pub fn extract(
    segments: &Segments<'_>,
    sensor_count: usize,
    config: &Config,
) -> Result<Record, ExtractError> {
    let mut extraction = Extraction::new(&config.platform.base_model, sensor_count);
    extraction.run("selftest", segments.selftest, SELFTEST_RULES)?;
    extraction.run("optode", segments.optode, OPTODE_RULES)?;
    Ok(extraction.record)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("valid bracket regex"));

/// First capture group of `re` in `line`.
pub(crate) fn capture<'l>(re: &Regex, line: &'l str) -> Option<&'l str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Text inside the first `[...]` on the line.
pub(crate) fn bracketed(line: &str) -> Option<&str> {
    capture(&BRACKETED, line)
}

/// Overwrite `field` with `value` when there is one.
pub(crate) fn set(field: &mut Option<String>, value: Option<&str>) {
    if let Some(value) = value {
        *field = Some(value.to_string());
    }
}

/// Parse a coefficient that must be a finite number.
pub(crate) fn numeric(sensor: SensorKind, name: &str, value: &str) -> Result<Value, ExtractError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Value::from(number)),
        Ok(_) => Err(ExtractError::invalid_coefficient(sensor, name, value, None)),
        Err(source) => Err(ExtractError::invalid_coefficient(sensor, name, value, Some(source))),
    }
}

/// Merge every `(name, value)` capture pair of `re` on `line` into `sensor`'s
/// coefficients as numbers.
pub(crate) fn merge_numeric(
    re: &Regex,
    line: &str,
    sensor: SensorKind,
    record: &mut Record,
) -> Result<bool, ExtractError> {
    let mut merged = false;
    for caps in re.captures_iter(line) {
        let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let number = numeric(sensor, name.as_str(), value.as_str())?;
        record
            .coefficients_mut(sensor)
            .insert(name.as_str().to_string(), number);
        merged = true;
    }
    Ok(merged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
