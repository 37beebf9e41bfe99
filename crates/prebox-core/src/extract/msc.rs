//! MBARI MSC board rules: the "Dura" pH sensor, the "Isus" nitrate sensor
//! and the calibration files the board prints through `MscCalFile_()`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use super::{capture, numeric, set, Extraction, RuleResult};
use crate::error::ExtractError;
use crate::types::{Record, SensorKind};

const MANUFACTURER: &str = "MBARI";
const CAL_FILE: &str = "MscCalFile_()";

static SERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SN:([-+0-9.eE]+)").expect("valid MSC serial regex"));
static BUILD_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z]{3}\s+\d{1,2}\s+\d{4},\s+\d{2}:\d{2}:\d{2})").expect("valid build date regex")
});
static APP_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+\s+v\d+\.\d+\.\d+)").expect("valid app version regex"));
static BOARD_MODEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(MSC\d+\s*\d+)").expect("valid MSC model regex"));
static ZEISS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Zeiss Coefficient Vals,(.*)").expect("valid Zeiss regex"));
static CAL_DATE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{8})").expect("valid YYYYMMDD regex"));
static TRAILING_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*?\s([A-Za-z0-9_\[\]]+)\s*=\s*([-+0-9.eE]+)\s*$").expect("valid assignment regex")
});
static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}/\d{2}/\d{4})").expect("valid dd/mm/yyyy regex"));

// ---------------------------------------------------------------------------
// Board configuration dumps
// ---------------------------------------------------------------------------

/// Identity sub-patterns shared by the pH and nitrate config dumps.
fn board_identity(line: &str, kind: SensorKind, record: &mut Record) {
    let sensor = record.sensor_mut(kind);
    sensor.sensor_manufacturer = Some(MANUFACTURER.to_string());

    if line.contains("SN") {
        set(&mut sensor.sensor_serial_no, capture(&SERIAL, line));
    }
    if line.contains("App Build") {
        set(&mut sensor.sensor_manufacture_date, capture(&BUILD_DATE, line));
    }
    if line.contains("Application") {
        set(&mut sensor.sensor_firmware, capture(&APP_VERSION, line));
        set(&mut sensor.sensor_model, capture(&BOARD_MODEL, line));
    }
}

pub(crate) fn ph_config(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("DuraConfigLog_()") {
        return Ok(false);
    }
    board_identity(line, SensorKind::Ph, &mut state.record);
    Ok(true)
}

/// Nitrate identity, the `IsusDura` platform tag and the Zeiss coefficients.
///
/// The tag is only appended while the platform reads exactly `<base>Sbe41cp`,
/// so it lands at most once and not after another payload tag.
pub(crate) fn nitrate_config(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("IsusConfigLog_()") {
        return Ok(false);
    }
    board_identity(line, SensorKind::Nitrate, &mut state.record);

    if state.record.platform_model == state.tags.ctd {
        state.record.platform_model = state.tags.nitrate();
    }

    if line.contains("Zeiss") {
        if let Some(csv) = capture(&ZEISS, line) {
            let values = csv
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| numeric(SensorKind::Nitrate, "Zeiss", value))
                .collect::<Result<Vec<Value>, ExtractError>>()?;
            state
                .record
                .coefficients_mut(SensorKind::Nitrate)
                .insert("Zeiss".to_string(), Value::Array(values));
        }
    }
    Ok(true)
}

// ---------------------------------------------------------------------------
// Calibration files
// ---------------------------------------------------------------------------

/// `20240305` → `March-05-24`. `None` for an impossible date.
fn format_cal_date(digits: &str) -> Option<String> {
    NaiveDate::parse_from_str(digits, "%Y%m%d")
        .ok()
        .map(|date| date.format("%B-%d-%y").to_string())
}

/// pH calibration file: the calibration date from the file name and a
/// trailing `name = value` coefficient on any cal-file line.
pub(crate) fn cal_file(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains(CAL_FILE) {
        return Ok(false);
    }

    if line.contains("pH_CalFile") {
        if let Some(digits) = capture(&CAL_DATE_DIGITS, line) {
            match format_cal_date(digits) {
                Some(date) => {
                    state
                        .record
                        .sensor_mut(SensorKind::Ph)
                        .calibration_mut()
                        .calibration_date = Some(date);
                }
                None => tracing::warn!(digits, "pH calibration file date is not a valid YYYYMMDD date"),
            }
        }
    }

    if let Some(caps) = TRAILING_ASSIGNMENT.captures(line) {
        if let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) {
            let number = numeric(SensorKind::Ph, name.as_str(), value.as_str())?;
            state
                .record
                .coefficients_mut(SensorKind::Ph)
                .insert(name.as_str().to_string(), number);
        }
    }
    Ok(true)
}

pub(crate) fn nitrate_cal_date(line: &str, state: &mut Extraction) -> RuleResult {
    if !line.contains("H,") {
        return Ok(false);
    }
    let Some(date) = capture(&SLASH_DATE, line) else {
        return Ok(false);
    };
    state
        .record
        .sensor_mut(SensorKind::Nitrate)
        .calibration_mut()
        .calibration_date = Some(date.to_string());
    Ok(true)
}

// ---------------------------------------------------------------------------
// Nitrate coefficient table
// ---------------------------------------------------------------------------

/// Columnar nitrate calibration table.
///
/// A `WaveLen,` header names the columns; each following `E,` row appends one
/// value (kept as text) to every named column. Rows before a header are
/// ignored and any other cal-file line closes the table. Lines printed by
/// other tasks in between do not change the state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) enum NitrateTable {
    #[default]
    AwaitingHeader,
    CollectingRows { columns: Vec<String> },
}

pub(crate) fn nitrate_table(line: &str, state: &mut Extraction) -> RuleResult {
    let Some((_, payload)) = line.split_once(CAL_FILE) else {
        return Ok(false);
    };
    let payload = payload.trim();

    if payload.contains("WaveLen,") {
        let columns: Vec<String> = payload
            .split(',')
            .skip(1)
            .map(|name| name.trim().to_string())
            .collect();
        let coefficients = state.record.coefficients_mut(SensorKind::Nitrate);
        for name in &columns {
            coefficients.insert(name.clone(), Value::Array(Vec::new()));
        }
        tracing::debug!(columns = columns.len(), "nitrate coefficient table header");
        state.nitrate_table = NitrateTable::CollectingRows { columns };
        return Ok(true);
    }

    let NitrateTable::CollectingRows { columns } = &state.nitrate_table else {
        return Ok(false);
    };

    let mut fields = payload.split(',');
    if fields.next().map(str::trim) != Some("E") {
        state.nitrate_table = NitrateTable::AwaitingHeader;
        return Ok(false);
    }

    let coefficients = state.record.coefficients_mut(SensorKind::Nitrate);
    for (name, value) in columns.iter().zip(fields) {
        if let Some(Value::Array(column)) = coefficients.get_mut(name) {
            column.push(Value::String(value.trim().to_string()));
        }
    }
    Ok(true)
}
