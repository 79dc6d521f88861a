//! printf-style substitution for the variadic logging calls (`debug("took %d ms", &[12.into()])`).
//!
//! The template is scanned once per call; every `%` conversion consumes the next positional
//! argument unless it names one explicitly (`%2$s`). A template that can't be satisfied is a bug
//! at the call site, so the fault goes back to the caller instead of being logged around.

use std::borrow::Cow;
use std::fmt::{self, Write};

/// One positional argument. Conversions check the variant, so `%d` against a string is a fault.
#[derive(Debug, Clone)]
pub enum Arg<'a> {
    Str(Cow<'a, str>),
    /// A signed integer and the bit width of the type it came from, so `%x` of `-1i32`
    /// prints `ffffffff`.
    Int { value: i64, bits: u32 },
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl Arg<'_> {
    /// Anything with a `Display` impl, rendered eagerly. Only `%s`-family conversions accept it.
    pub fn display(value: &impl fmt::Display) -> Arg<'static> {
        Arg::Str(Cow::Owned(value.to_string()))
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int { .. } | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
        }
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Arg<'_> {
    fn from(s: String) -> Self {
        Self::Str(Cow::Owned(s))
    }
}

macro_rules! signed_arg {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg<'_> {
            fn from(v: $t) -> Self {
                Self::Int { value: i64::from(v), bits: <$t>::BITS }
            }
        })*
    };
}

macro_rules! unsigned_arg {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg<'_> {
            fn from(v: $t) -> Self {
                Self::UInt(u64::from(v))
            }
        })*
    };
}

signed_arg!(i8, i16, i32, i64);
unsigned_arg!(u8, u16, u32, u64);

impl From<isize> for Arg<'_> {
    fn from(v: isize) -> Self {
        Self::Int {
            value: v as i64,
            bits: isize::BITS,
        }
    }
}

impl From<usize> for Arg<'_> {
    fn from(v: usize) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<f32> for Arg<'_> {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Arg<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Arg<'_> {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

/// Why a template could not be applied to its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// `%q` and friends.
    UnknownConversion(char),
    /// The template asks for argument `index` (1-based) but fewer were supplied.
    MissingArgument(usize),
    /// The conversion can't render this kind of argument (`%d` with a string).
    Mismatch { conversion: char, found: &'static str },
    /// Template ends in the middle of a conversion.
    Dangling,
    /// Width or precision above [`MAX_WIDTH`].
    TooWide(usize),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownConversion(c) => write!(f, "unknown conversion '%{c}'"),
            Self::MissingArgument(i) => write!(f, "missing argument #{i}"),
            Self::Mismatch { conversion, found } => {
                write!(f, "'%{conversion}' cannot format a {found} argument")
            }
            Self::Dangling => f.write_str("template ends inside a conversion"),
            Self::TooWide(n) => write!(f, "width or precision {n} exceeds {MAX_WIDTH}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Largest width or precision a conversion may ask for.
pub const MAX_WIDTH: usize = 4096;

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Applies `args` to `template`. With no arguments the template is returned untouched,
/// so messages that merely contain a `%` never fail.
///
/// # Errors
/// Any [`FormatError`] raised while walking the template.
pub fn sprintf(template: &str, args: &[Arg<'_>]) -> Result<String, FormatError> {
    if args.is_empty() {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.chars().peekable();
    let mut next_arg = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut directive = Directive::default();
        let mut explicit: Option<usize> = None;

        // Leading digits are either an explicit index (`2$`) or the width.
        let mut digits = String::new();
        while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
            if digits.is_empty() && d == '0' {
                break;
            }
            digits.push(d);
            chars.next();
        }
        if !digits.is_empty() {
            if chars.peek() == Some(&'$') {
                chars.next();
                explicit = Some(count(&digits));
            } else {
                directive.width = Some(count(&digits));
            }
        }

        if directive.width.is_none() {
            while let Some(&flag) = chars.peek() {
                match flag {
                    '-' => directive.left = true,
                    '0' => directive.zero = true,
                    '+' => directive.plus = true,
                    ' ' => directive.space = true,
                    _ => break,
                }
                chars.next();
            }
            let mut width = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                width.push(d);
                chars.next();
            }
            directive.width = (!width.is_empty()).then(|| count(&width));
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            let mut precision = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                precision.push(d);
                chars.next();
            }
            directive.precision = Some(if precision.is_empty() { 0 } else { count(&precision) });
        }

        for n in [directive.width, directive.precision].into_iter().flatten() {
            if n > MAX_WIDTH {
                return Err(FormatError::TooWide(n));
            }
        }
        let conversion = chars.next().ok_or(FormatError::Dangling)?;
        match conversion {
            '%' => {
                pad_into(&mut out, "%", &directive, false);
                continue;
            }
            'n' => {
                out.push('\n');
                continue;
            }
            _ => {}
        }

        let index = explicit.map_or_else(
            || {
                next_arg += 1;
                next_arg
            },
            |i| i,
        );
        let arg = index
            .checked_sub(1)
            .and_then(|i| args.get(i))
            .ok_or(FormatError::MissingArgument(index))?;

        let rendered = convert(conversion, arg, &directive)?;
        let numeric = matches!(conversion, 'd' | 'i' | 'x' | 'X' | 'o' | 'f' | 'e' | 'E');
        pad_into(&mut out, &rendered, &directive, numeric);
    }

    Ok(out)
}

/// Digit runs too long for `usize` saturate so the width check rejects them.
fn count(digits: &str) -> usize {
    digits.parse().unwrap_or(usize::MAX)
}

fn convert(conversion: char, arg: &Arg<'_>, directive: &Directive) -> Result<String, FormatError> {
    let mismatch = || FormatError::Mismatch {
        conversion,
        found: arg.kind(),
    };

    let text = match conversion {
        's' | 'S' => {
            let mut s = arg.to_string();
            if let Some(p) = directive.precision {
                s = s.chars().take(p).collect();
            }
            if conversion == 'S' { s.to_uppercase() } else { s }
        }
        'b' | 'B' => {
            let b = match arg {
                Arg::Bool(b) => *b,
                _ => true,
            };
            let s = b.to_string();
            if conversion == 'B' { s.to_uppercase() } else { s }
        }
        'c' => match arg {
            Arg::Char(c) => c.to_string(),
            Arg::Int { value, .. } => u32::try_from(*value)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(mismatch)?
                .to_string(),
            Arg::UInt(v) => u32::try_from(*v)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(mismatch)?
                .to_string(),
            _ => return Err(mismatch()),
        },
        'd' | 'i' => match arg {
            Arg::Int { value, .. } => {
                signed(*value >= 0, &value.unsigned_abs().to_string(), directive)
            }
            Arg::UInt(v) => signed(true, &v.to_string(), directive),
            _ => return Err(mismatch()),
        },
        'x' | 'X' | 'o' => {
            let bits = match arg {
                #[allow(clippy::cast_sign_loss)]
                Arg::Int { value, bits } => {
                    let mask = u64::MAX >> 64u32.saturating_sub(*bits);
                    (*value as u64) & mask
                }
                Arg::UInt(v) => *v,
                _ => return Err(mismatch()),
            };
            match conversion {
                'x' => format!("{bits:x}"),
                'X' => format!("{bits:X}"),
                _ => format!("{bits:o}"),
            }
        }
        'f' | 'e' | 'E' => {
            let Arg::Float(v) = arg else {
                return Err(mismatch());
            };
            let precision = directive.precision.unwrap_or(6);
            let body = match conversion {
                'f' => format!("{:.*}", precision, v.abs()),
                'e' => java_exponent(v.abs(), precision),
                _ => java_exponent(v.abs(), precision).to_uppercase(),
            };
            signed(v.is_sign_positive(), &body, directive)
        }
        other => return Err(FormatError::UnknownConversion(other)),
    };

    Ok(text)
}

fn signed(positive: bool, digits: &str, directive: &Directive) -> String {
    let sign = if !positive {
        "-"
    } else if directive.plus {
        "+"
    } else if directive.space {
        " "
    } else {
        ""
    };
    format!("{sign}{digits}")
}

/// Rust prints `1.5e3`; printf prints `1.500000e+03`.
fn java_exponent(v: f64, precision: usize) -> String {
    let raw = format!("{v:.precision$e}");
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

fn pad_into(out: &mut String, text: &str, directive: &Directive, numeric: bool) {
    let len = text.chars().count();
    let Some(width) = directive.width.filter(|w| *w > len) else {
        out.push_str(text);
        return;
    };
    let fill = width - len;

    if directive.left {
        out.push_str(text);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if directive.zero && numeric {
        let (sign, rest) = match text.chars().next() {
            Some(c @ ('-' | '+' | ' ')) => (Some(c), &text[c.len_utf8()..]),
            _ => (None, text),
        };
        if let Some(sign) = sign {
            out.push(sign);
        }
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(rest);
    } else {
        let _ = write!(out, "{:>width$}", text, width = width);
    }
}
