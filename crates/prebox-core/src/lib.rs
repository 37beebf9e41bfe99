//! prebox-core — metadata extraction from APEX float pre-box-up logs.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! record types they pass along.
//!
//! # Architecture
//!
//! ```text
//! raw log ──► Segmenter ──► Extractor ──► Emitter ──► JSON
//!                              ▲
//!                   Record::new (skeleton)
//! ```
//!
//! Everything runs on the calling thread. The record is created once per
//! log, patched in place by the extractor rules and serialized whole.

pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod segment;
pub mod text;
pub mod types;

pub use config::Config;
pub use error::{EmitError, ExtractError};
pub use extract::extract;
pub use segment::Segments;
pub use types::{Calibration, Coefficients, Record, Sensor, SensorKind, Sensors};
