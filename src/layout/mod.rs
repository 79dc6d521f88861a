//! `%`-style layout patterns (`%d - [%p::%c::%C] - %m%n`) shared by the file and console sinks.
//!
//! Patterns are parsed once into segments when a sink is built and rendered for every record,
//! so the hot path never re-scans the pattern string.

mod date;

use crate::sink::LogRecord;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;

pub use date::java_to_strftime;

/// Default `%d` format when no `{...}` option is given.
const DEFAULT_DATE: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// What a `%x` conversion prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// `%d{...}`, holding the strftime form of the requested format.
    Date(String),
    /// `%p`
    Priority,
    /// `%c` / `%c{n}`: the logger name, optionally only its last `n` dotted segments.
    Logger(Option<usize>),
    /// `%C`: the calling module, derived from the call-site file.
    Caller,
    /// `%F`
    File,
    /// `%L`
    Line,
    /// `%M`: method names are not recoverable in Rust, always `?`.
    Method,
    /// `%t`
    Thread,
    /// `%m`
    Message,
    /// `%n`
    Newline,
    /// `%r`: milliseconds since the directory was created.
    Relative,
    /// `%marker`: the tag-derived marker, empty when absent.
    Marker,
}

/// Width and justification in `%-5p` / `%.30c`. `max` truncates from the left like log4j.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifier {
    pub left_justify: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Modifier {
    fn apply(self, out: &mut String, value: &str) {
        let len = value.chars().count();
        let value = match self.max {
            Some(max) if len > max => {
                let skip = len - max;
                &value[value.char_indices().nth(skip).map_or(0, |(i, _)| i)..]
            }
            _ => value,
        };
        let len = value.chars().count();
        let pad = self.min.map_or(0, |min| min.saturating_sub(len));

        if self.left_justify {
            out.push_str(value);
            out.extend(std::iter::repeat_n(' ', pad));
        } else {
            out.extend(std::iter::repeat_n(' ', pad));
            out.push_str(value);
        }
    }
}

/// Parsing into segments once avoids re-scanning the pattern on every log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSegment {
    /// Separators and unknown conversions pass through untouched.
    Literal(String),
    Field(Conversion, Modifier),
}

/// A parsed pattern.
#[derive(Debug, Clone)]
pub struct Layout {
    pattern: String,
    segments: Vec<LayoutSegment>,
}

impl Layout {
    /// Unknown conversions are kept as literal text rather than rejected; a pattern only fails
    /// to parse when an option brace (`%d{`) is never closed or a date option is not a usable
    /// format.
    ///
    /// # Errors
    /// Returns a description of the offending option.
    pub fn parse(pattern: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] != '%' {
                literal.push(chars[i]);
                i += 1;
                continue;
            }

            let start = i;
            i += 1;
            if chars.get(i) == Some(&'%') {
                literal.push('%');
                i += 1;
                continue;
            }

            let mut modifier = Modifier::default();
            if chars.get(i) == Some(&'-') {
                modifier.left_justify = true;
                i += 1;
            }
            modifier.min = take_number(&chars, &mut i);
            if chars.get(i) == Some(&'.') {
                i += 1;
                modifier.max = take_number(&chars, &mut i);
            }

            let Some(&c) = chars.get(i) else {
                literal.extend(&chars[start..]);
                break;
            };
            i += 1;

            let conversion = match c {
                'd' => {
                    let option = take_option(&chars, &mut i, pattern)?;
                    let format =
                        option.map_or_else(|| DEFAULT_DATE.to_string(), |o| java_to_strftime(&o));
                    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
                        return Err(format!(
                            "invalid date format \"{format}\" in pattern \"{pattern}\""
                        ));
                    }
                    Some(Conversion::Date(format))
                }
                'c' => {
                    let depth = take_option(&chars, &mut i, pattern)?
                        .and_then(|o| o.trim().parse().ok());
                    Some(Conversion::Logger(depth))
                }
                'p' => Some(Conversion::Priority),
                'C' => {
                    // `%C{n}` precision is accepted and ignored.
                    take_option(&chars, &mut i, pattern)?;
                    Some(Conversion::Caller)
                }
                'F' => Some(Conversion::File),
                'L' => Some(Conversion::Line),
                't' => Some(Conversion::Thread),
                'm' if chars[i..].starts_with(&['a', 'r', 'k', 'e', 'r']) => {
                    i += 5;
                    Some(Conversion::Marker)
                }
                'm' => Some(Conversion::Message),
                'M' => Some(Conversion::Method),
                'n' => Some(Conversion::Newline),
                'r' => Some(Conversion::Relative),
                _ => None,
            };

            match conversion {
                Some(conversion) => {
                    if !literal.is_empty() {
                        segments.push(LayoutSegment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(LayoutSegment::Field(conversion, modifier));
                }
                None => literal.extend(&chars[start..i]),
            }
        }

        if !literal.is_empty() {
            segments.push(LayoutSegment::Literal(literal));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    /// Tests need direct access to verify parse results.
    #[must_use]
    pub fn segments(&self) -> &[LayoutSegment] {
        &self.segments
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Renders one record. Call-site conversions print `?` when the record carries no location.
    #[must_use]
    pub fn render(&self, record: &LogRecord) -> String {
        let mut out = String::with_capacity(record.message.len() + 64);
        let mut scratch = String::new();

        for segment in &self.segments {
            let (conversion, modifier) = match segment {
                LayoutSegment::Literal(s) => {
                    out.push_str(s);
                    continue;
                }
                LayoutSegment::Field(c, m) => (c, *m),
            };

            scratch.clear();
            match conversion {
                Conversion::Date(fmt) => {
                    let _ = write!(scratch, "{}", record.timestamp.format(fmt));
                }
                Conversion::Priority => scratch.push_str(record.severity.label()),
                Conversion::Logger(depth) => scratch.push_str(tail_segments(&record.logger, *depth)),
                Conversion::Caller => match &record.location {
                    Some(site) => scratch.push_str(&site.module()),
                    None => scratch.push('?'),
                },
                Conversion::File => match &record.location {
                    Some(site) => scratch.push_str(site.file_name()),
                    None => scratch.push('?'),
                },
                Conversion::Line => match &record.location {
                    Some(site) => {
                        let _ = write!(scratch, "{}", site.line);
                    }
                    None => scratch.push('?'),
                },
                Conversion::Method => scratch.push('?'),
                Conversion::Thread => scratch.push_str(&record.thread),
                Conversion::Message => scratch.push_str(&record.message),
                Conversion::Newline => scratch.push('\n'),
                Conversion::Relative => {
                    let _ = write!(scratch, "{}", record.relative_ms);
                }
                Conversion::Marker => {
                    if let Some(marker) = &record.marker {
                        scratch.push_str(marker.name());
                    }
                }
            }
            modifier.apply(&mut out, &scratch);
        }

        out
    }
}

impl Default for Layout {
    /// `%m%n`: the message alone.
    fn default() -> Self {
        Self {
            pattern: "%m%n".to_string(),
            segments: vec![
                LayoutSegment::Field(Conversion::Message, Modifier::default()),
                LayoutSegment::Field(Conversion::Newline, Modifier::default()),
            ],
        }
    }
}

fn take_number(chars: &[char], i: &mut usize) -> Option<usize> {
    let start = *i;
    while chars.get(*i).is_some_and(char::is_ascii_digit) {
        *i += 1;
    }
    (start != *i)
        .then(|| chars[start..*i].iter().collect::<String>().parse().ok())
        .flatten()
}

fn take_option(chars: &[char], i: &mut usize, pattern: &str) -> Result<Option<String>, String> {
    if chars.get(*i) != Some(&'{') {
        return Ok(None);
    }
    let Some(len) = chars[*i..].iter().position(|&c| c == '}') else {
        return Err(format!("unterminated '{{' in pattern \"{pattern}\""));
    };
    let option: String = chars[*i + 1..*i + len].iter().collect();
    *i += len + 1;
    Ok(Some(option))
}

fn tail_segments(name: &str, depth: Option<usize>) -> &str {
    let Some(depth) = depth.filter(|d| *d > 0) else {
        return name;
    };
    name.rmatch_indices('.')
        .nth(depth - 1)
        .map_or(name, |(idx, _)| &name[idx + 1..])
}
