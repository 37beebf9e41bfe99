//! Error types for prebox-core.
//!
//! Most extraction is best-effort: a pattern that does not match simply
//! leaves its field unset and never produces an error. The variants here are
//! the conditions that abort a run.

use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::SensorKind;

/// Fatal extraction failure.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// `source` is `None` when the text parsed but is not a finite number
    /// (`nan`, `inf`), which JSON cannot represent.
    #[error("{sensor} coefficient {name} has non-numeric value {value:?}")]
    InvalidCoefficient {
        sensor: SensorKind,
        name: String,
        value: String,
        #[source]
        source: Option<ParseFloatError>,
    },
}

impl ExtractError {
    pub(crate) fn invalid_coefficient(
        sensor: SensorKind,
        name: impl Into<String>,
        value: impl Into<String>,
        source: Option<ParseFloatError>,
    ) -> Self {
        ExtractError::InvalidCoefficient {
            sensor,
            name: name.into(),
            value: value.into(),
            source,
        }
    }
}

/// Failure serializing or writing the output document.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
