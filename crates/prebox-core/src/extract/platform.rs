//! Platform-level rules and the cumulative platform model tag.

use std::sync::LazyLock;

use regex::Regex;

use super::{capture, Extraction, RuleResult};
use crate::types::SensorKind;

static FW_REV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FwRev\s+(\d+)").expect("valid firmware regex"));

// ---------------------------------------------------------------------------
// Platform tags
// ---------------------------------------------------------------------------

/// FLBB payload variant, by fluorescence channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlbbVariant {
    Single,
    Dual,
}

impl FlbbVariant {
    pub fn from_fluorescence_channels(channels: usize) -> Self {
        if channels == 2 {
            FlbbVariant::Dual
        } else {
            FlbbVariant::Single
        }
    }

    pub fn sensor_model(self) -> &'static str {
        match self {
            FlbbVariant::Single => "FLBB-FL",
            FlbbVariant::Dual => "FLBB2-FL",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            FlbbVariant::Single => "FLBB",
            FlbbVariant::Dual => "FLBB2",
        }
    }
}

/// Which oxygen sensor a platform carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OxygenSensor {
    Aanderaa,
    Sbe83,
}

impl OxygenSensor {
    fn tag(self) -> &'static str {
        match self {
            OxygenSensor::Aanderaa => "Optode",
            OxygenSensor::Sbe83 => "Sbe83",
        }
    }
}

/// The platform model strings the rules compare against and assign, all
/// derived from the configured base tag.
#[derive(Debug, Clone)]
pub(crate) struct PlatformTags {
    pub base: String,
    /// `<base>Sbe41cp`
    pub ctd: String,
}

impl PlatformTags {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            ctd: format!("{base}Sbe41cp"),
        }
    }

    /// `<base>Sbe41cpIsusDura`
    pub fn nitrate(&self) -> String {
        format!("{}IsusDura", self.ctd)
    }

    /// `<base>Sbe41cpIsusDura<FLBB|FLBB2>`
    pub fn flbb(&self, variant: FlbbVariant) -> String {
        format!("{}IsusDura{}", self.ctd, variant.tag())
    }

    /// `<base>Sbe41cp<Optode|Sbe83>IsusDura<FLBB|FLBB2>`
    pub fn oxygen(&self, sensor: OxygenSensor, variant: FlbbVariant) -> String {
        format!("{}{}IsusDura{}", self.ctd, sensor.tag(), variant.tag())
    }
}

/// Retag the platform after an oxygen sensor line.
///
/// A platform currently tagged with the single-channel FLBB keeps that
/// variant; any other tag becomes the two-channel form. There is no
/// "already tagged" check, so a second oxygen line sees the oxygen tag and
/// moves the platform to the two-channel form.
pub(crate) fn retag_for_oxygen(state: &mut Extraction, sensor: OxygenSensor) {
    let variant = if state.record.platform_model == state.tags.flbb(FlbbVariant::Single) {
        FlbbVariant::Single
    } else {
        FlbbVariant::Dual
    };
    state.record.platform_model = state.tags.oxygen(sensor, variant);
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// First `(...)` group on the log: the text before its first comma becomes
/// the add date of the platform and of the first `add_date_slots` sensors.
pub(crate) fn timestamp(line: &str, state: &mut Extraction) -> RuleResult {
    if state.record.add_date.is_some() || !line.contains('(') || !line.contains(')') {
        return Ok(false);
    }
    let Some((_, after_open)) = line.split_once('(') else {
        return Ok(false);
    };
    let inner = after_open
        .split_once(')')
        .map_or(after_open, |(inner, _)| inner);
    let date = inner.split_once(',').map_or(inner, |(date, _)| date).trim();

    state.record.add_date = Some(date.to_string());
    for kind in SensorKind::ALL.into_iter().take(state.add_date_slots) {
        let sensor = state.record.sensor_mut(kind);
        sensor.add_date = Some(date.to_string());
        sensor.calibration_mut().add_date = Some(date.to_string());
    }
    Ok(true)
}

pub(crate) fn firmware(line: &str, state: &mut Extraction) -> RuleResult {
    if state.record.platform_firmware.is_some() {
        return Ok(false);
    }
    let Some(revision) = capture(&FW_REV, line) else {
        return Ok(false);
    };
    state.record.platform_firmware = Some(revision.to_string());
    Ok(true)
}

/// `ApfId 12345.` → platform serial `12345`.
pub(crate) fn platform_id(line: &str, state: &mut Extraction) -> RuleResult {
    if state.record.platform_serial_no.is_some() {
        return Ok(false);
    }
    let Some((_, rest)) = line.split_once("ApfId") else {
        return Ok(false);
    };
    let id = rest.split('.').next().unwrap_or(rest).trim();
    state.record.platform_serial_no = Some(id.to_string());
    Ok(true)
}

/// Appends the CTD tag while the model is still the bare base tag. Not gated
/// on a CTD line, so it fires on the first line of the pass.
pub(crate) fn ctd_tag(_line: &str, state: &mut Extraction) -> RuleResult {
    if state.record.platform_model != state.tags.base {
        return Ok(false);
    }
    state.record.platform_model = state.tags.ctd.clone();
    Ok(true)
}
