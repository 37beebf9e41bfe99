//! Oxygen optode rules.
//!
//! Two optode models exist: the Aanderaa 4831, which identifies itself in
//! the self-test and prints its configuration after the `o d` command, and
//! the SBE83, which only appears in the optode dump.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::platform::{retag_for_oxygen, OxygenSensor};
use super::{capture, set, Extraction, RuleResult};
use crate::types::{Record, SensorKind};

const AANDERAA: &str = "Aanderaa";
const SBE: &str = "SBE";

static SERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SerNo:\s*(\d+)").expect("valid optode serial regex"));
static FIRMWARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"accepted:\s*\[([\d.]+)\]").expect("valid optode firmware regex"));
static PRODUCT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Product Name\s+(\d+)").expect("valid product name regex"));
static PRODUCTION_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})$").expect("valid production date regex"));

/// Aanderaa manufacturer, serial and firmware from a line naming the optode.
fn aanderaa_identity(line: &str, record: &mut Record) {
    let sensor = record.sensor_mut(SensorKind::Optode);
    sensor.sensor_manufacturer = Some(AANDERAA.to_string());
    set(&mut sensor.sensor_serial_no, capture(&SERIAL, line));
    set(&mut sensor.sensor_firmware, capture(&FIRMWARE, line));
}

// ---------------------------------------------------------------------------
// Self-test pass
// ---------------------------------------------------------------------------

pub(crate) fn selftest(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("Optode") {
        return Ok(false);
    }
    aanderaa_identity(line, &mut state.record);
    retag_for_oxygen(state, OxygenSensor::Aanderaa);
    Ok(true)
}

// ---------------------------------------------------------------------------
// Optode block pass
// ---------------------------------------------------------------------------

pub(crate) fn product_name(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("Oxygen Optode") {
        return Ok(false);
    }
    let Some(model) = capture(&PRODUCT_NAME, line) else {
        return Ok(false);
    };
    state.record.sensor_mut(SensorKind::Optode).sensor_model = Some(model.to_string());
    Ok(true)
}

pub(crate) fn production_date(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("Production Date") {
        return Ok(false);
    }
    let Some(date) = capture(&PRODUCTION_DATE, line) else {
        return Ok(false);
    };
    state.record.sensor_mut(SensorKind::Optode).sensor_manufacture_date = Some(date.to_string());
    Ok(true)
}

pub(crate) fn sbe83_config(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("Sbe83LogConfig()") {
        return Ok(false);
    }
    state.record.sensor_mut(SensorKind::Optode).sensor_manufacturer = Some(SBE.to_string());
    retag_for_oxygen(state, OxygenSensor::Sbe83);
    Ok(true)
}

/// Like the self-test optode rule, without touching the platform tag.
pub(crate) fn identity(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("Optode") {
        return Ok(false);
    }
    aanderaa_identity(line, &mut state.record);
    Ok(true)
}

/// `OptodeLogConfig() <name> <x> <x> <values...>`
///
/// The values become a list of numbers when every one of them parses to a
/// finite number, and a list of the original tokens otherwise (e.g.
/// `FoilID 2310M`, or a row containing `nan`).
pub(crate) fn coefficients(line: &str, state: &mut Extraction) -> RuleResult {
    let Some((_, rest)) = line.split_once("OptodeLogConfig()") else {
        return Ok(false);
    };
    // Only the text up to a repeated marker belongs to this entry.
    let rest = rest.split("OptodeLogConfig()").next().unwrap_or(rest);
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 4 {
        return Ok(false);
    }

    let values = &tokens[3..];
    let numbers: Option<Vec<f64>> = values
        .iter()
        .map(|t| t.parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect();
    let value = match numbers {
        Some(numbers) => Value::Array(numbers.into_iter().map(Value::from).collect()),
        None => Value::Array(values.iter().map(|t| Value::String(t.to_string())).collect()),
    };
    state
        .record
        .coefficients_mut(SensorKind::Optode)
        .insert(tokens[0].to_string(), value);
    Ok(true)
}
