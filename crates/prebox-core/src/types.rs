//! Core types for prebox-core.
//!
//! This module defines the output [`Record`]: the platform fields, the eight
//! fixed [`Sensor`] slots addressed by [`SensorKind`], and the single
//! [`Calibration`] entry each sensor carries. Field declaration order is the
//! JSON key order, so do not reorder fields casually.

use serde::{Deserialize, Serialize};

/// Calibration coefficients in insertion order.
///
/// Values are numbers, strings, lists of either, or (for the radiometer) a
/// nested object per optical channel. `serde_json` is built with
/// `preserve_order`, so the map keeps the order the extractor wrote it in.
pub type Coefficients = serde_json::Map<String, serde_json::Value>;

/// Calibration type written on every calibration entry.
pub const PRE_DEPLOYMENT: &str = "PRE_DEPLOYMENT";

// ---------------------------------------------------------------------------
// SensorKind
// ---------------------------------------------------------------------------

/// One of the eight sensor slots a float can report.
///
/// The discriminant is the slot position in the serialized `sensors` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    #[serde(rename = "CTD_TEMP")]
    CtdTemperature,
    #[serde(rename = "CTD_CNDC")]
    CtdConductivity,
    #[serde(rename = "CTD_PRESS")]
    CtdPressure,
    #[serde(rename = "Optode")]
    Optode,
    /// MBARI "Dura" pH sensor.
    #[serde(rename = "DURA")]
    Ph,
    /// MBARI "Isus" nitrate sensor.
    #[serde(rename = "Nitrate")]
    Nitrate,
    #[serde(rename = "FLBB")]
    Flbb,
    /// Satlantic OCR504 radiometer.
    #[serde(rename = "Radiometer")]
    Radiometer,
}

impl SensorKind {
    /// Every kind, in slot order.
    pub const ALL: [SensorKind; 8] = [
        SensorKind::CtdTemperature,
        SensorKind::CtdConductivity,
        SensorKind::CtdPressure,
        SensorKind::Optode,
        SensorKind::Ph,
        SensorKind::Nitrate,
        SensorKind::Flbb,
        SensorKind::Radiometer,
    ];

    /// The three CTD channels, which share model, manufacturer and firmware.
    pub const CTD: [SensorKind; 3] = [
        SensorKind::CtdTemperature,
        SensorKind::CtdConductivity,
        SensorKind::CtdPressure,
    ];

    /// Position of this kind in the `sensors` list.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// The `sensor_type` label.
    pub fn sensor_type(self) -> &'static str {
        match self {
            SensorKind::CtdTemperature => "CTD_TEMP",
            SensorKind::CtdConductivity => "CTD_CNDC",
            SensorKind::CtdPressure => "CTD_PRESS",
            SensorKind::Optode => "Optode",
            SensorKind::Ph => "DURA",
            SensorKind::Nitrate => "Nitrate",
            SensorKind::Flbb => "FLBB",
            SensorKind::Radiometer => "Radiometer",
        }
    }

    /// The `parameter_type` label of this kind's calibration entry.
    pub fn parameter_type(self) -> &'static str {
        match self {
            SensorKind::CtdTemperature => "TEMP",
            SensorKind::CtdConductivity => "CNDC",
            SensorKind::CtdPressure => "PRESS",
            SensorKind::Optode => "Oxygen",
            SensorKind::Ph => "pH",
            SensorKind::Nitrate => "Nitrate",
            SensorKind::Flbb => "Fluorescence",
            SensorKind::Radiometer => "irradiance",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sensor_type())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// The structured metadata extracted from one self-test log.
///
/// Built once per run by [`Record::new`], patched in place by the extractor
/// rules and handed whole to the emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub add_date: Option<String>,
    /// Cumulative platform tag, e.g. `APEXapf11Sbe41cpIsusDura`.
    pub platform_model: String,
    pub platform_serial_no: Option<String>,
    pub platform_firmware: Option<String>,
    pub platform_manufacture_date: Option<String>,
    pub platform_comments: Option<String>,
    pub sensors: Sensors,
}

impl Record {
    /// Build the empty skeleton with `platform_model` set to `base_model`.
    pub fn new(base_model: impl Into<String>) -> Self {
        Self {
            add_date: None,
            platform_model: base_model.into(),
            platform_serial_no: None,
            platform_firmware: None,
            platform_manufacture_date: None,
            platform_comments: None,
            sensors: Sensors::default(),
        }
    }

    pub fn sensor(&self, kind: SensorKind) -> &Sensor {
        &self.sensors[kind]
    }

    pub fn sensor_mut(&mut self, kind: SensorKind) -> &mut Sensor {
        &mut self.sensors[kind]
    }

    /// Shorthand for the coefficient map of `kind`'s calibration entry.
    pub fn coefficients_mut(&mut self, kind: SensorKind) -> &mut Coefficients {
        &mut self.sensors[kind].calibration_mut().calibration_coefficients
    }
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// The eight sensor slots, always present and always in [`SensorKind::ALL`]
/// order. Index with a [`SensorKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sensor>", into = "Vec<Sensor>")]
pub struct Sensors(Vec<Sensor>);

impl Sensors {
    pub fn iter(&self) -> std::slice::Iter<'_, Sensor> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Sensor> {
        self.0.iter_mut()
    }
}

impl Default for Sensors {
    fn default() -> Self {
        Self(SensorKind::ALL.into_iter().map(Sensor::new).collect())
    }
}

impl std::ops::Index<SensorKind> for Sensors {
    type Output = Sensor;

    fn index(&self, kind: SensorKind) -> &Sensor {
        &self.0[kind.slot()]
    }
}

impl std::ops::IndexMut<SensorKind> for Sensors {
    fn index_mut(&mut self, kind: SensorKind) -> &mut Sensor {
        &mut self.0[kind.slot()]
    }
}

impl TryFrom<Vec<Sensor>> for Sensors {
    type Error = String;

    fn try_from(sensors: Vec<Sensor>) -> Result<Self, Self::Error> {
        if sensors.len() != SensorKind::ALL.len() {
            return Err(format!(
                "expected {} sensors, found {}",
                SensorKind::ALL.len(),
                sensors.len()
            ));
        }
        for (sensor, expected) in sensors.iter().zip(SensorKind::ALL) {
            if sensor.sensor_type != expected {
                return Err(format!(
                    "sensor slot {} must be {expected}, found {}",
                    expected.slot(),
                    sensor.sensor_type
                ));
            }
        }
        Ok(Self(sensors))
    }
}

impl From<Sensors> for Vec<Sensor> {
    fn from(sensors: Sensors) -> Self {
        sensors.0
    }
}

// ---------------------------------------------------------------------------
// Sensor / Calibration
// ---------------------------------------------------------------------------

/// One sensor slot. Identity fields stay `None` until a rule fills them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub add_date: Option<String>,
    pub sensor_type: SensorKind,
    pub sensor_model: Option<String>,
    pub sensor_serial_no: Option<String>,
    pub sensor_manufacturer: Option<String>,
    pub sensor_firmware: Option<String>,
    pub sensor_manufacture_date: Option<String>,
    pub sensor_comments: Option<String>,
    /// Always exactly one entry.
    pub calibrations: [Calibration; 1],
}

impl Sensor {
    pub fn new(kind: SensorKind) -> Self {
        Self {
            add_date: None,
            sensor_type: kind,
            sensor_model: None,
            sensor_serial_no: None,
            sensor_manufacturer: None,
            sensor_firmware: None,
            sensor_manufacture_date: None,
            sensor_comments: None,
            calibrations: [Calibration::new(kind)],
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibrations[0]
    }

    pub fn calibration_mut(&mut self) -> &mut Calibration {
        &mut self.calibrations[0]
    }
}

/// The pre-deployment calibration entry of a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub add_date: Option<String>,
    pub calibration_date: Option<String>,
    pub parameter_type: String,
    pub provided_to_customer: bool,
    pub calibration_type: String,
    pub parameter_accuracy: Option<String>,
    pub parameter_resolution: Option<String>,
    pub calibration_comments: Option<String>,
    pub calibration_coefficients: Coefficients,
    pub calibration_metadata: Option<String>,
}

impl Calibration {
    pub fn new(kind: SensorKind) -> Self {
        Self {
            add_date: None,
            calibration_date: None,
            parameter_type: kind.parameter_type().to_string(),
            provided_to_customer: true,
            calibration_type: PRE_DEPLOYMENT.to_string(),
            parameter_accuracy: None,
            parameter_resolution: None,
            calibration_comments: None,
            calibration_coefficients: Coefficients::new(),
            calibration_metadata: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
