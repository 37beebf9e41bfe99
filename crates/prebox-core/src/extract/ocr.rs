//! OCR504 radiometer: self-test identity and the per-channel calibration
//! dump printed by `Ocr504LogConfig()`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{bracketed, capture, set, Extraction, RuleResult};
use crate::types::{Coefficients, SensorKind};

const MODEL: &str = "OCR504";
const MANUFACTURER: &str = "SBE";

static SERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"serial number:\s*(\d+)").expect("valid OCR serial regex"));
static CHANNEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"optical channel (\d+):").expect("valid OCR channel regex"));
static COEFFICIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+(a0|a1|im):([0-9.-]+(?:e[+-]?\d+)?)").expect("valid OCR coefficient regex")
});

pub(crate) fn selftest(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("SelfTest()") || !line.contains("Ocr504") {
        return Ok(false);
    }
    let sensor = state.record.sensor_mut(SensorKind::Radiometer);
    sensor.sensor_model = Some(MODEL.to_string());
    set(&mut sensor.sensor_firmware, bracketed(line));
    Ok(true)
}

/// Serial number and channel coefficients.
///
/// `optical channel N:` opens (or reopens) the nested `optical_channel_N`
/// object and makes it current; `a0`/`a1`/`im` values go to the current
/// channel as text. A coefficient before any channel header is dropped.
pub(crate) fn config(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("Ocr504LogConfig()") {
        return Ok(false);
    }
    let sensor = state.record.sensor_mut(SensorKind::Radiometer);
    sensor.sensor_manufacturer = Some(MANUFACTURER.to_string());
    if line.contains("serial number:") {
        set(&mut sensor.sensor_serial_no, capture(&SERIAL, line));
    }

    if let Some(number) = capture(&CHANNEL, line) {
        let key = format!("optical_channel_{number}");
        state
            .record
            .coefficients_mut(SensorKind::Radiometer)
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Coefficients::new()));
        state.ocr_channel = Some(key);
    }

    let Some(caps) = COEFFICIENT.captures(line) else {
        return Ok(true);
    };
    let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
        return Ok(true);
    };
    let Some(channel) = state.ocr_channel.as_deref() else {
        tracing::debug!(coefficient = name.as_str(), "OCR coefficient before any channel header");
        return Ok(true);
    };
    if let Some(Value::Object(coefficients)) = state
        .record
        .coefficients_mut(SensorKind::Radiometer)
        .get_mut(channel)
    {
        coefficients.insert(name.as_str().to_string(), Value::String(value.as_str().to_string()));
    }
    Ok(true)
}
