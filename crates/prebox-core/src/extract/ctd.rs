//! SBE41cp CTD rules: identity, per-channel calibration dates and the
//! `Sbe41cpLogCal()` coefficient dump.
//!
//! Temperature and conductivity share the CTD body serial number; the
//! pressure sensor reports its own on the pressure calibration line.

use std::sync::LazyLock;

use regex::Regex;

use super::{capture, merge_numeric, set, Extraction, RuleResult};
use crate::types::SensorKind;

const MODEL: &str = "Sbe41cp";
const MANUFACTURER: &str = "SBE";

static SERNO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)serno[:\s]*([0-9a-fx]+)").expect("valid serno regex"));
static PRESSURE_SN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S/N\s*=\s*(\d+)").expect("valid pressure S/N regex"));
static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"V\s+([\d.]+)").expect("valid CTD version regex"));

// Coefficient values run to the next separator or closing bracket and must parse.
static TEMPERATURE_COEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(TA\d)\s*=\s*([^\s,;)\]}]+)").expect("valid TA regex"));
static CONDUCTIVITY_COEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(G|H|I|J|CTCOR|CPCOR|CWBOTC)\s*=\s*([^\s,;)\]}]+)")
        .expect("valid conductivity coefficient regex")
});
static PRESSURE_COEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(P[A-Z0-9]+)\s*=\s*([^\s,;)\]}]+)").expect("valid pressure coefficient regex"));

pub(crate) fn identity(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("SBE41cp") {
        return Ok(false);
    }
    for kind in SensorKind::CTD {
        let sensor = state.record.sensor_mut(kind);
        sensor.sensor_model = Some(MODEL.to_string());
        sensor.sensor_manufacturer = Some(MANUFACTURER.to_string());
    }
    if let Some(serial) = capture(&SERNO, line) {
        for kind in [SensorKind::CtdTemperature, SensorKind::CtdConductivity] {
            state.record.sensor_mut(kind).sensor_serial_no = Some(serial.to_string());
        }
    }
    Ok(true)
}

fn cal_date_after(line: &str, token: &str, kind: SensorKind, state: &mut Extraction) -> RuleResult {
    let Some((_, date)) = line.split_once(token) else {
        return Ok(false);
    };
    state.record.sensor_mut(kind).calibration_mut().calibration_date = Some(date.trim().to_string());
    Ok(true)
}

pub(crate) fn temperature_cal_date(line: &str, state: &mut Extraction) -> RuleResult {
    cal_date_after(line, "temperature:", SensorKind::CtdTemperature, state)
}

pub(crate) fn conductivity_cal_date(line: &str, state: &mut Extraction) -> RuleResult {
    cal_date_after(line, "conductivity:", SensorKind::CtdConductivity, state)
}

/// Calibration date after the last colon, plus the pressure sensor serial.
pub(crate) fn pressure(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("pressure") {
        return Ok(false);
    }
    let date = line.rsplit(':').next().unwrap_or(line).trim();
    let sensor = state.record.sensor_mut(SensorKind::CtdPressure);
    sensor.calibration_mut().calibration_date = Some(date.to_string());
    set(&mut sensor.sensor_serial_no, capture(&PRESSURE_SN, line));
    Ok(true)
}

/// `Sbe41cpLogCal()`: firmware for all three channels and every coefficient
/// on the line. A coefficient value that is not a number aborts the run.
pub(crate) fn calibration(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("Sbe41cpLogCal()") {
        return Ok(false);
    }
    if let Some(version) = capture(&VERSION, line) {
        for kind in SensorKind::CTD {
            state.record.sensor_mut(kind).sensor_firmware = Some(version.to_string());
        }
    }
    merge_numeric(&TEMPERATURE_COEF, line, SensorKind::CtdTemperature, &mut state.record)?;
    merge_numeric(&CONDUCTIVITY_COEF, line, SensorKind::CtdConductivity, &mut state.record)?;
    merge_numeric(&PRESSURE_COEF, line, SensorKind::CtdPressure, &mut state.record)?;
    Ok(true)
}
