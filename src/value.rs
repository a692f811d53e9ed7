//! Typed header values produced by normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A header value after its coercion policy has run.
///
/// Serializes untagged: `Int(3)` is `3`, `Str("x")` is `"x"`, and
/// [`NoValue`](HeaderValue::NoValue) is `null`. Consumers that persisted
/// legacy output as JSON therefore see the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// Strict boolean from a flag policy.
    Bool(bool),
    /// Integer from an integer policy, possibly the `-1` sentinel.
    Int(i64),
    /// Float from a float policy, possibly the `-1.0` sentinel.
    Float(f64),
    /// Pass-through string, untouched.
    Str(String),
    /// Explicit "no value" marker. Distinct from the key being absent.
    NoValue,
}

impl HeaderValue {
    /// Integer payload, if this is `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Float payload, if this is `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Bool payload, if this is `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String payload, if this is `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for the explicit "no value" marker.
    pub fn is_no_value(&self) -> bool {
        matches!(self, Self::NoValue)
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => f.write_str(s),
            Self::NoValue => Ok(()),
        }
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for HeaderValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for HeaderValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for HeaderValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Internal outcome of reading one field, before a policy decides what the
/// caller gets to see.
///
/// Policies differ only in how they collapse `Missing` and `Invalid`; the
/// parse itself is shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    /// Key not present in the raw headers.
    Missing,
    /// Key present, value not interpretable. Holds the raw text.
    Invalid(String),
    /// Key present and parsed.
    Value(T),
}

impl<T> Coerced<T> {
    /// Run `parse` over a raw value, tracking absence and failure separately.
    pub fn from_raw(raw: Option<&str>, parse: impl FnOnce(&str) -> Option<T>) -> Self {
        match raw {
            None => Self::Missing,
            Some(s) => match parse(s) {
                Some(v) => Self::Value(v),
                None => Self::Invalid(s.to_string()),
            },
        }
    }

    /// Parsed value, or `fallback` for both `Missing` and `Invalid`.
    pub fn or_fallback(self, fallback: T) -> T {
        match self {
            Self::Value(v) => v,
            Self::Missing | Self::Invalid(_) => fallback,
        }
    }

    /// `true` if the key was absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// `true` if the key was present but unparsable.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}
