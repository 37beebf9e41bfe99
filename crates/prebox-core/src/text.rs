//! Text helpers: Latin-1 decoding and line splitting.
//!
//! Float logs are captured over serial consoles and routinely carry stray
//! high bytes, so input is decoded as Latin-1, which maps every byte to a
//! code point and cannot fail.

/// Decode `bytes` as Latin-1 (ISO 8859-1).
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Split `text` into lines on every line boundary a console log can produce:
/// `\n`, `\r\n`, `\r`, VT, FF, FS, GS, RS, NEL and the Unicode line and
/// paragraph separators. Terminators are not included and a trailing
/// terminator does not yield an empty final line.
pub fn split_lines(text: &str) -> Lines<'_> {
    Lines { rest: text }
}

/// Iterator returned by [`split_lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((at, c)) => {
                let line = &self.rest[..at];
                let mut end = at + c.len_utf8();
                if c == '\r' && self.rest[end..].starts_with('\n') {
                    end += 1;
                }
                self.rest = &self.rest[end..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}
