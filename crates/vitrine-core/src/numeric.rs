//! # Numeric Boundaries
//!
//! Every number that enters the cart from the outside world (price,
//! quantity, discount) arrives as a [`NumericInput`] and is read through
//! one predicate, [`NumericInput::check`].
//!
//! ## The Predicate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      NumericInput::check()                              │
//! │                                                                         │
//! │   JSON number, not NaN ─────────────────────► Numeric::Valid(n)         │
//! │                                                                         │
//! │   NaN                  ──┐                                              │
//! │   "100" (string)         │                                              │
//! │   null / missing         ├──────────────────► Numeric::Fallback         │
//! │   true, [], {}         ──┘                                              │
//! │                                                                         │
//! │   The caller decides what Fallback means:                               │
//! │     price    → contributes 0                                            │
//! │     quantity → counts as 1                                              │
//! │     discount → 0%                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strings are never coerced: `"100"` is not a price.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

// =============================================================================
// Raw Input
// =============================================================================

/// A raw value found at a numeric boundary.
///
/// Deserializes from any JSON value. Missing fields should be marked
/// `#[serde(default)]`, which yields `null`.
///
/// JSON numbers are kept as [`serde_json::Number`], so `100` serializes
/// back as `100` (not `100.0`) and large integers keep every digit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// A JSON number, exactly as it arrived.
    Number(Number),

    /// A float with no JSON form (NaN, infinities).
    Float(f64),

    /// Anything else, kept verbatim so it survives a round trip.
    Other(Value),
}

impl NumericInput {
    /// The value a missing field deserializes to.
    #[inline]
    pub const fn missing() -> Self {
        NumericInput::Other(Value::Null)
    }

    /// Checks if the value is absent (`null` or missing).
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, NumericInput::Other(Value::Null))
    }

    /// Classifies the input as a usable number or a fallback.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::numeric::{Numeric, NumericInput};
    ///
    /// assert_eq!(NumericInput::from(42.0).check(), Numeric::Valid(42.0));
    /// assert_eq!(NumericInput::from(f64::NAN).check(), Numeric::Fallback);
    /// assert_eq!(NumericInput::from("42").check(), Numeric::Fallback);
    /// ```
    pub fn check(&self) -> Numeric {
        let n = match self {
            NumericInput::Number(n) => n.as_f64(),
            NumericInput::Float(n) => Some(*n),
            NumericInput::Other(_) => None,
        };

        match n {
            Some(n) if !n.is_nan() => Numeric::Valid(n),
            _ => Numeric::Fallback,
        }
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::missing()
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        match Number::from_f64(n) {
            Some(number) => NumericInput::Number(number),
            None => NumericInput::Float(n),
        }
    }
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        NumericInput::Number(Number::from(n))
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Other(Value::String(s.to_string()))
    }
}

impl From<Value> for NumericInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => NumericInput::Number(n),
            other => NumericInput::Other(other),
        }
    }
}

// =============================================================================
// Checked Value
// =============================================================================

/// Result of the numeric predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// A number that is not NaN.
    Valid(f64),
    /// Not a usable number; the caller substitutes its own default.
    Fallback,
}

impl Numeric {
    /// Returns the number, or `fallback` when the input was unusable.
    #[inline]
    pub fn or(self, fallback: f64) -> f64 {
        match self {
            Numeric::Valid(n) => n,
            Numeric::Fallback => fallback,
        }
    }

    /// Returns the number if valid.
    #[inline]
    pub fn valid(self) -> Option<f64> {
        match self {
            Numeric::Valid(n) => Some(n),
            Numeric::Fallback => None,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Numeric::Valid(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
