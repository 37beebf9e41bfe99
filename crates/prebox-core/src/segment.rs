//! Segmenter — isolates the parts of a pre-box-up log the extractor reads.
//!
//! A log usually holds several console sessions. Only the text after the
//! final self-test command is relevant, plus (optionally) the optode
//! configuration dump that follows the optode command.

use crate::config::SegmenterConfig;

/// The two text blocks the extractor passes run over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Text after the self-test marker, or the whole log when no marker exists.
    pub selftest: &'a str,
    /// Text after the optode marker; empty when the marker is absent.
    pub optode: &'a str,
}

impl<'a> Segments<'a> {
    /// Split `text` using the markers in `config`.
    ///
    /// The optode block is cut from the untruncated text. For the self-test
    /// block the markers are tried in order and the first that occurs
    /// anywhere wins; everything up to and including its first occurrence is
    /// dropped. Missing markers are not an error.
    pub fn split(text: &'a str, config: &SegmenterConfig) -> Self {
        let optode = after_first(text, &config.optode_marker).unwrap_or("");

        let selftest = config
            .selftest_markers
            .iter()
            .find_map(|marker| {
                after_first(text, marker).map(|rest| {
                    tracing::debug!(marker = %marker, "self-test block located");
                    rest
                })
            })
            .unwrap_or_else(|| {
                tracing::debug!("no self-test marker found; using the whole log");
                text
            });

        Self { selftest, optode }
    }
}

fn after_first<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        return None;
    }
    text.split_once(marker).map(|(_, rest)| rest)
}
