//! SBE ECO FLBB fluorescence/backscatter sensor.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};

use super::platform::FlbbVariant;
use super::{bracketed, capture, set, Extraction, RuleResult};
use crate::types::{Coefficients, SensorKind};

const MANUFACTURER: &str = "SBE";

static SERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SerNo:\s*(\d+)").expect("valid FLBB serial regex"));
static CHANNELS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Fl\[(\d+)\]\s*Bb\[(\d+)\]").expect("valid FLBB wavelengths regex"));

/// Identity, firmware and the wavelengths descriptor.
///
/// A wavelengths line replaces the whole coefficient map with single-entry
/// `FL` and `BB` lists, then picks the model and platform tag from the
/// length of the new `FL` list. That list always has one entry, so the
/// two-channel variant is never chosen.
pub(crate) fn flbb(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("FLBB") {
        return Ok(false);
    }
    let sensor = state.record.sensor_mut(SensorKind::Flbb);
    sensor.sensor_manufacturer = Some(MANUFACTURER.to_string());
    set(&mut sensor.sensor_serial_no, capture(&SERIAL, line));
    if line.contains("FwRev") {
        set(&mut sensor.sensor_firmware, bracketed(line));
    }

    if !line.contains("wavelengths:") {
        return Ok(true);
    }
    let Some(caps) = CHANNELS.captures(line) else {
        return Ok(true);
    };
    let (Some(fl), Some(bb)) = (caps.get(1), caps.get(2)) else {
        return Ok(true);
    };

    let fluorescence = vec![Value::String(fl.as_str().to_string())];
    let variant = FlbbVariant::from_fluorescence_channels(fluorescence.len());

    let mut coefficients = Coefficients::new();
    coefficients.insert("FL".to_string(), Value::Array(fluorescence));
    coefficients.insert("BB".to_string(), json!([bb.as_str()]));

    let sensor = state.record.sensor_mut(SensorKind::Flbb);
    sensor.calibration_mut().calibration_coefficients = coefficients;
    sensor.sensor_model = Some(variant.sensor_model().to_string());
    state.record.platform_model = state.tags.flbb(variant);
    Ok(true)
}
