//! Conversion of raw option text into typed values.

use crate::error::BoxError;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced by the built-in conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid boolean: {0:?}")]
    InvalidBool(String),

    #[error("invalid unsigned integer: {0:?}")]
    InvalidUnsigned(String),
}

/// A type that can be set from the text of an option value.
///
/// Every [`FromStr`] type whose error is a standard error implements this,
/// so `IpAddr`, `SocketAddr`, `PathBuf` and friends can be used directly
/// as option destinations. Implement [`FromStr`] for your own types to do
/// the same.
pub trait TextValue {
    fn set_from_text(&mut self, text: &str) -> Result<(), BoxError>;
}

impl<T> TextValue for T
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    fn set_from_text(&mut self, text: &str) -> Result<(), BoxError> {
        *self = text.parse()?;
        Ok(())
    }
}

/// A caller-owned slot that receives the converted value of an option.
///
/// Built from `&mut bool`, `&mut String`, `&mut i32`, `&mut i64` or
/// `&mut u64` through `From`, or from any [`TextValue`] with
/// [`Destination::text`].
pub enum Destination<'a> {
    Bool(&'a mut bool),
    Str(&'a mut String),
    Int32(&'a mut i32),
    Int64(&'a mut i64),
    Uint64(&'a mut u64),
    Text(&'a mut dyn TextValue),
}

impl<'a> Destination<'a> {
    /// Wrap any text-settable value.
    pub fn text<T: TextValue>(slot: &'a mut T) -> Self {
        Destination::Text(slot)
    }

    /// Convert `text` and store it. The slot is left untouched on failure.
    pub fn assign(&mut self, text: &str) -> Result<(), BoxError> {
        match self {
            Destination::Bool(v) => **v = parse_bool(text)?,
            Destination::Str(v) => **v = text.to_string(),
            Destination::Int32(v) => **v = text.parse::<i32>()?,
            Destination::Int64(v) => **v = text.parse::<i64>()?,
            Destination::Uint64(v) => **v = parse_uint_auto(text)?,
            Destination::Text(v) => v.set_from_text(text)?,
        }
        Ok(())
    }

    /// Name of the destination type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Destination::Bool(_) => "bool",
            Destination::Str(_) => "string",
            Destination::Int32(_) => "int32",
            Destination::Int64(_) => "int64",
            Destination::Uint64(_) => "uint64",
            Destination::Text(_) => "text",
        }
    }
}

impl std::fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Destination").field(&self.type_name()).finish()
    }
}

impl<'a> From<&'a mut bool> for Destination<'a> {
    fn from(v: &'a mut bool) -> Self {
        Destination::Bool(v)
    }
}

impl<'a> From<&'a mut String> for Destination<'a> {
    fn from(v: &'a mut String) -> Self {
        Destination::Str(v)
    }
}

impl<'a> From<&'a mut i32> for Destination<'a> {
    fn from(v: &'a mut i32) -> Self {
        Destination::Int32(v)
    }
}

impl<'a> From<&'a mut i64> for Destination<'a> {
    fn from(v: &'a mut i64) -> Self {
        Destination::Int64(v)
    }
}

impl<'a> From<&'a mut u64> for Destination<'a> {
    fn from(v: &'a mut u64) -> Self {
        Destination::Uint64(v)
    }
}

/// Parse a boolean.
///
/// Accepts `y`/`Y`/`yes`/`YES` and `n`/`N`/`no`/`NO` in addition to
/// `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts.
pub fn parse_bool(text: &str) -> Result<bool, ValueError> {
    match text {
        "y" | "Y" | "YES" | "yes" => Ok(true),
        "n" | "N" | "NO" | "no" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::InvalidBool(text.to_string())),
    }
}

/// Parse an unsigned integer, detecting the radix from its prefix.
///
/// `0x` is hexadecimal, `0o` octal, `0b` binary, and a bare leading `0`
/// also means octal. Underscores may separate digits in any base, and may
/// follow a base prefix directly. Signs are rejected.
pub fn parse_uint_auto(text: &str) -> Result<u64, BoxError> {
    let invalid = || -> BoxError { Box::new(ValueError::InvalidUnsigned(text.to_string())) };

    if text.is_empty() || text.starts_with(['+', '-']) {
        return Err(invalid());
    }

    // `after_prefix` is true when the digits follow a prefix or a leading 0
    let (radix, digits, after_prefix) = if let Some(rest) = strip_prefix_ci(text, "0x") {
        (16, rest, true)
    } else if let Some(rest) = strip_prefix_ci(text, "0o") {
        (8, rest, true)
    } else if let Some(rest) = strip_prefix_ci(text, "0b") {
        (2, rest, true)
    } else if text.len() > 1 && text.starts_with('0') {
        (8, &text[1..], true)
    } else {
        (10, text, false)
    };

    let digits = if digits.contains('_') {
        if !underscores_ok(digits, after_prefix) {
            return Err(invalid());
        }
        digits.replace('_', "")
    } else {
        digits.to_string()
    };

    // from_str_radix would otherwise accept a sign after the prefix
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid());
    }

    Ok(u64::from_str_radix(&digits, radix)?)
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

/// Each underscore must follow a digit (or the base prefix, when
/// `after_prefix`) and be followed by a digit.
fn underscores_ok(digits: &str, after_prefix: bool) -> bool {
    let bytes = digits.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'_' {
            continue;
        }
        let next_is_digit = bytes.get(i + 1).is_some_and(|n| *n != b'_');
        let prev_is_digit = if i == 0 {
            after_prefix
        } else {
            bytes[i - 1] != b'_'
        };
        if !next_is_digit || !prev_is_digit {
            return false;
        }
    }
    true
}
