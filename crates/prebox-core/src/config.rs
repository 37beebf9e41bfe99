//! Configuration types for prebox.
//!
//! [`Config::load`] layers an optional user TOML file over the built-in
//! defaults. [`Config::defaults`] returns the same defaults without touching
//! the filesystem (useful in tests).

use serde::Deserialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[segmenter]
selftest_markers = ["> a", "> i s"]
optode_marker    = "> o d"

[platform]
base_model = "APEXapf11"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
}

/// `[segmenter]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmenterConfig {
    /// Commands that start a self-test, in preference order. The first one
    /// found anywhere in the log wins.
    #[serde(default = "default_selftest_markers")]
    pub selftest_markers: Vec<String>,
    /// Command that dumps the optode configuration.
    #[serde(default = "default_optode_marker")]
    pub optode_marker: String,
}

fn default_selftest_markers() -> Vec<String> { vec!["> a".to_string(), "> i s".to_string()] }
fn default_optode_marker() -> String { "> o d".to_string() }

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            selftest_markers: default_selftest_markers(),
            optode_marker: default_optode_marker(),
        }
    }
}

/// `[platform]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// Platform tag the model string starts from before sensor tags are added.
    #[serde(default = "default_base_model")]
    pub base_model: String,
}

fn default_base_model() -> String { "APEXapf11".to_string() }

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_model: default_base_model(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Layer `path` (when given) over the built-in defaults. A path that was
    /// asked for but does not exist is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
