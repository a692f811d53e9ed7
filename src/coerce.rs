//! Field coercion policies.
//!
//! AMI has no type system: every numeric or boolean header is a string with
//! a documented interpretation. Each [`Coercion`] captures one such
//! interpretation together with the fallback Asterisk clients have
//! historically produced when the value is absent or unparsable. The
//! fallbacks are deliberately inconsistent across policies (`NoValue` for
//! some counts, `-1` for others) and must stay that way.

use crate::config::{DecodeOptions, PausedCoercion};
use crate::constants::{FLOAT_SENTINEL, INT_SENTINEL, ONE_TOKEN};
use crate::value::{Coerced, HeaderValue};
use std::borrow::Cow;
use tracing::trace;

/// A reusable rule for turning one raw header into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Coercion {
    /// Integer, or [`HeaderValue::NoValue`] when unparsable or absent.
    IntOrNone,
    /// Integer, or the `-1` sentinel when unparsable or absent.
    IntOrSentinel,
    /// Float, or the `-1.0` sentinel when unparsable or absent.
    FloatOrSentinel,
    /// Integer if present, `NoValue` if present but unparsable; an absent
    /// key stays absent.
    OptionalInt,
    /// `true` only on an exact match of the token; `false` otherwise,
    /// including when absent.
    BoolEquals(&'static str),
    /// The queue-member `Paused` flag. See [`PausedCoercion`].
    PausedFlag,
}

impl Coercion {
    /// Apply the policy to a raw header value.
    ///
    /// `None` in the return means the key must be omitted from the output;
    /// only [`Coercion::OptionalInt`] ever produces that.
    pub fn apply(
        self,
        field: &str,
        raw: Option<&str>,
        options: &DecodeOptions,
    ) -> Option<HeaderValue> {
        let value = match self {
            Coercion::IntOrNone => Some(int_or_none(raw)),
            Coercion::IntOrSentinel => Some(int_or_sentinel(raw)),
            Coercion::FloatOrSentinel => Some(float_or_sentinel(raw)),
            Coercion::OptionalInt => optional_int(raw),
            Coercion::BoolEquals(token) => Some(bool_equals(raw, token)),
            Coercion::PausedFlag => Some(paused_flag(raw, options.paused)),
        };
        trace!(field, policy = self.name(), raw = ?raw, result = ?value, "coerced field");
        value
    }

    /// Short policy name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Coercion::IntOrNone => "int-or-none",
            Coercion::IntOrSentinel => "int-or-sentinel",
            Coercion::FloatOrSentinel => "float-or-sentinel",
            Coercion::OptionalInt => "optional-int",
            Coercion::BoolEquals(_) => "bool-equals",
            Coercion::PausedFlag => "paused-flag",
        }
    }
}

/// Drop `_` digit separators (`1_000`). Each one must sit between two
/// digits, otherwise the input is rejected.
fn strip_digit_separators(raw: &str) -> Option<Cow<'_, str>> {
    if !raw.contains('_') {
        return Some(Cow::Borrowed(raw));
    }
    let bytes = raw.as_bytes();
    let well_placed = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'_')
        .all(|(i, _)| {
            i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes
                    .get(i + 1)
                    .is_some_and(u8::is_ascii_digit)
        });
    well_placed.then(|| Cow::Owned(raw.replace('_', "")))
}

/// Parse a decimal integer, ignoring surrounding whitespace.
///
/// Accepts an optional `+`/`-` sign and `_` between digits. Values outside
/// `i64` are treated as unparsable.
pub fn parse_int(raw: &str) -> Option<i64> {
    strip_digit_separators(raw.trim())?
        .parse()
        .ok()
}

/// Parse a float, ignoring surrounding whitespace.
///
/// Accepts decimal and exponent forms, `_` between digits, plus `inf`,
/// `infinity` and `nan` in any case.
pub fn parse_float(raw: &str) -> Option<f64> {
    strip_digit_separators(raw.trim())?
        .parse()
        .ok()
}

/// `int-or-none`: integer, else the "no value" marker.
pub fn int_or_none(raw: Option<&str>) -> HeaderValue {
    match Coerced::from_raw(raw, parse_int) {
        Coerced::Value(n) => HeaderValue::Int(n),
        Coerced::Missing | Coerced::Invalid(_) => HeaderValue::NoValue,
    }
}

/// `int-or-sentinel`: integer, else `-1`.
pub fn int_or_sentinel(raw: Option<&str>) -> HeaderValue {
    HeaderValue::Int(Coerced::from_raw(raw, parse_int).or_fallback(INT_SENTINEL))
}

/// `float-or-sentinel`: float, else `-1.0`.
pub fn float_or_sentinel(raw: Option<&str>) -> HeaderValue {
    HeaderValue::Float(Coerced::from_raw(raw, parse_float).or_fallback(FLOAT_SENTINEL))
}

/// `optional-int`: only runs when the key is present.
pub fn optional_int(raw: Option<&str>) -> Option<HeaderValue> {
    match Coerced::from_raw(raw, parse_int) {
        Coerced::Missing => None,
        Coerced::Invalid(_) => Some(HeaderValue::NoValue),
        Coerced::Value(n) => Some(HeaderValue::Int(n)),
    }
}

/// `bool-equals(token)`: exact, case-sensitive comparison.
pub fn bool_equals(raw: Option<&str>, token: &str) -> HeaderValue {
    HeaderValue::Bool(raw == Some(token))
}

/// The `Paused` flag on queue-member events.
///
/// Under [`PausedCoercion::Legacy`] the raw value is tested for emptiness
/// before being compared, so an absent header yields `NoValue` and an empty
/// one yields `Str("")` rather than `false`.
pub fn paused_flag(raw: Option<&str>, mode: PausedCoercion) -> HeaderValue {
    match (mode, raw) {
        (PausedCoercion::Legacy, None) => HeaderValue::NoValue,
        (PausedCoercion::Legacy, Some("")) => HeaderValue::Str(String::new()),
        (_, raw) => bool_equals(raw, ONE_TOKEN),
    }
}
