//! Emitter — renders a [`Record`] as the JSON document downstream tooling
//! expects.
//!
//! The document is pretty-printed with two-space indentation, keys in field
//! declaration order, no trailing newline, and every non-ASCII character
//! (plus DEL) escaped as `\uXXXX`. The output is plain ASCII, so it reads the same as
//! Latin-1 or UTF-8.

use std::path::Path;

use crate::error::EmitError;
use crate::types::Record;

/// Serialize `record` to the output document.
pub fn to_json_string(record: &Record) -> Result<String, EmitError> {
    let pretty = serde_json::to_string_pretty(record)?;
    Ok(escape_non_ascii(&pretty))
}

/// Serialize `record` and write it to `path`, replacing any existing file.
pub fn write_json(path: &Path, record: &Record) -> Result<(), EmitError> {
    let document = to_json_string(record)?;
    std::fs::write(path, document).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "record written");
    Ok(())
}

/// Replace each non-ASCII char and DEL with its JSON `\uXXXX` escape (a
/// surrogate pair above the BMP). These can only occur inside JSON strings,
/// so the result is still valid JSON with the same value.
fn escape_non_ascii(json: &str) -> String {
    if !json.chars().any(needs_escape) {
        return json.to_string();
    }
    let mut out = String::with_capacity(json.len() + 16);
    let mut units = [0u16; 2];
    for c in json.chars() {
        if needs_escape(c) {
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn needs_escape(c: char) -> bool {
    !c.is_ascii() || c == '\x7f'
}
