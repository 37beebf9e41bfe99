//! prebox — pre-box-up log to JSON
//!
//! Converts the console log captured while an APEX profiling float is
//! prepared for deployment into a JSON record of the platform and its
//! sensors: serial numbers, firmware, calibration dates and coefficients.
//!
//! # Architecture
//!
//! ```text
//! read (Latin-1) ──► Segmenter ──► Extractor ──► Emitter ──► output file
//! ```
//!
//! The stages live in [`prebox_core`]; this crate wires them to the
//! filesystem so the binary and the integration harnesses share one entry
//! point.

use std::path::Path;

use anyhow::Context;
use prebox_core::{text, Config, Record, Segments};

pub use prebox_core;

/// Extract the record from an in-memory log.
pub fn extract_str(log: &str, sensor_count: usize, config: &Config) -> anyhow::Result<Record> {
    let segments = Segments::split(log, &config.segmenter);
    let record = prebox_core::extract(&segments, sensor_count, config)?;
    Ok(record)
}

/// Read the log at `input`, extract its record and write the JSON document
/// to `output`.
///
/// The output file is only created once extraction has succeeded, so a
/// fatal extraction error leaves no partial file behind.
pub fn convert(
    input: &Path,
    sensor_count: usize,
    output: &Path,
    config: &Config,
) -> anyhow::Result<Record> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("failed to read log file {}", input.display()))?;
    let log = text::decode_latin1(&bytes);
    tracing::debug!(path = %input.display(), bytes = bytes.len(), "log loaded");

    let record = extract_str(&log, sensor_count, config)
        .with_context(|| format!("failed to extract metadata from {}", input.display()))?;

    prebox_core::emit::write_json(output, &record)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        platform = %record.platform_model,
        "conversion complete"
    );
    Ok(record)
}
