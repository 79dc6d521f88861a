//! Pretty-printing of JSON and XML payloads before they are logged.
//!
//! A payload that can't be parsed is reported as a [`PayloadError`]; the printer turns that into
//! an error-priority line instead of handing it back to the caller.

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt;

/// Spaces per nesting level, for both JSON and XML.
pub const INDENT: usize = 2;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Why a payload could not be pretty-printed.
#[derive(Debug)]
pub enum PayloadError {
    /// Empty or whitespace-only input.
    Empty,
    /// Input starts with neither `{` nor `[`.
    NotJson,
    Json(serde_json::Error),
    Xml(String),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty payload"),
            Self::NotJson => f.write_str("payload is neither a JSON object nor an array"),
            Self::Json(e) => write!(f, "invalid JSON: {e}"),
            Self::Xml(e) => write!(f, "invalid XML: {e}"),
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Re-serializes a JSON object or array with [`INDENT`]-space indentation.
/// Key order is kept as written, so pretty-printing pretty output is a no-op.
///
/// # Errors
/// [`PayloadError::Empty`] for blank input, [`PayloadError::NotJson`] when the trimmed text does
/// not open with `{` or `[`, [`PayloadError::Json`] on a parse fault.
pub fn pretty_json(text: &str) -> Result<String, PayloadError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PayloadError::Empty);
    }

    let value: Value = match text.as_bytes()[0] {
        b'{' | b'[' => serde_json::from_str(text).map_err(PayloadError::Json)?,
        _ => return Err(PayloadError::NotJson),
    };

    let indent = [b' '; INDENT];
    let mut buf = Vec::with_capacity(text.len() * 2);
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut ser).map_err(PayloadError::Json)?;

    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Indents an XML document by [`INDENT`] spaces per level.
///
/// Output opens with an XML declaration followed directly by the root element, then a newline
/// is inserted after the first `>` so the declaration and root land on separate lines.
///
/// # Errors
/// [`PayloadError::Empty`] for blank input, [`PayloadError::Xml`] for anything that is not a
/// single well-formed root element.
pub fn pretty_xml(text: &str) -> Result<String, PayloadError> {
    if text.trim().is_empty() {
        return Err(PayloadError::Empty);
    }

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut out = Vec::with_capacity(text.len() * 2);
    out.extend_from_slice(XML_DECLARATION.as_bytes());
    let mut writer = Writer::new_with_indent(out, b' ', INDENT);

    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        let event = reader.read_event().map_err(xml_err)?;
        match &event {
            Event::Eof => break,
            // Replaced by our own declaration.
            Event::Decl(_) => continue,
            Event::Start(e) => {
                check_attributes(e)?;
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| PayloadError::Xml("unmatched end tag".to_string()))?;
            }
            Event::Empty(e) => {
                check_attributes(e)?;
                if depth == 0 {
                    roots += 1;
                }
            }
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(PayloadError::Xml("text outside the root element".to_string()));
            }
            Event::Text(t) => {
                t.unescape().map_err(xml_err)?;
            }
            _ => {}
        }
        writer.write_event(event).map_err(xml_err)?;
    }

    if depth != 0 {
        return Err(PayloadError::Xml("unclosed element".to_string()));
    }
    if roots != 1 {
        return Err(PayloadError::Xml(format!(
            "expected exactly one root element, found {roots}"
        )));
    }

    let rendered = String::from_utf8(writer.into_inner()).map_err(xml_err)?;
    Ok(rendered.replacen('>', ">\n", 1))
}

/// The reader hands attributes over unparsed; duplicates, unquoted values and unknown entities
/// only show up when they are walked.
fn check_attributes(start: &BytesStart<'_>) -> Result<(), PayloadError> {
    for attr in start.attributes() {
        attr.map_err(xml_err)?.unescape_value().map_err(xml_err)?;
    }
    Ok(())
}

fn xml_err(e: impl fmt::Display) -> PayloadError {
    PayloadError::Xml(e.to_string())
}
