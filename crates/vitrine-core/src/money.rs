//! # Money Module
//!
//! Provides the `Money` type used to display monetary values in reais.
//!
//! ## Where Floats Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart totals are computed on the numbers the catalog sends (f64).       │
//! │  Display is not: the amount is rounded ONCE to integer centavos and    │
//! │  every digit of the formatted string comes from that integer.          │
//! │                                                                         │
//! │    1234567.89 (f64) ──► Money(123456789) ──► "R$1.234.567,89"          │
//! │                                                                         │
//! │  Rounding is half away from zero on the centavo, applied to the        │
//! │  shortest decimal form of the float ("0.145" rounds to 0,15 even       │
//! │  though the binary value is a hair below it).                          │
//! │                                                                         │
//! │  Amounts too large for i64 centavos (and infinities) are displayed     │
//! │  with format_reais(), which never goes through an integer.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::money::Money;
//!
//! let price = Money::from_cents(100000);
//! assert_eq!(price.to_string(), "R$1.000,00");
//!
//! let total = Money::from_amount(1234567.89);
//! assert_eq!(total.to_string(), "R$1.234.567,89");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Currency symbol for Brazilian reais.
pub const CURRENCY_SYMBOL: &str = "R$";

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative amounts appear with degenerate catalog data
///   and must display, not panic
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an amount in reais to the nearest centavo.
    ///
    /// ## Edge Cases
    /// - NaN becomes zero
    /// - Amounts beyond the `i64` range saturate (use [`format_reais`] to
    ///   display them)
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(10.999).cents(), 1100);
    /// assert_eq!(Money::from_amount(1.005).cents(), 101);
    /// assert_eq!(Money::from_amount(-0.125).cents(), -13);
    /// assert_eq!(Money::from_amount(f64::NAN).cents(), 0);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        if amount.is_nan() {
            return Money::zero();
        }

        let saturated = if amount.is_sign_negative() { i64::MIN } else { i64::MAX };
        let Some(rounded) = Rounded::from_amount(amount) else {
            return Money(saturated);
        };

        let cents = rounded
            .reais
            .bytes()
            .try_fold(0_i64, |acc, digit| {
                acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
            })
            .and_then(|reais| reais.checked_mul(100)?.checked_add(i64::from(rounded.cents)));

        match cents {
            Some(cents) if rounded.negative => Money(-cents),
            Some(cents) => Money(cents),
            None => Money(saturated),
        }
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats in pt-BR currency style with no space after the symbol.
///
/// ```text
///   Money(0)           → R$0,00
///   Money(100000)      → R$1.000,00
///   Money(-1000)       → -R$10,00
/// ```
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(
            f,
            "{}{}{}{}{:02}",
            sign,
            CURRENCY_SYMBOL,
            group_thousands(&(cents / 100).to_string()),
            DECIMAL_SEPARATOR,
            cents % 100
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Decimal Rounding
// =============================================================================

/// A finite amount rounded to the centavo, as digits.
#[derive(Debug, PartialEq)]
struct Rounded {
    /// Set only when the rounded amount is not zero.
    negative: bool,

    /// Whole reais, ASCII digits without leading zeros ("0" for none).
    reais: String,

    /// 0-99
    cents: u8,
}

impl Rounded {
    /// Rounds half away from zero on the shortest decimal form of `amount`.
    ///
    /// Returns `None` for NaN and infinities.
    fn from_amount(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        // `Display` for f64 is the shortest round-trip form, never exponential
        let text = amount.abs().to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut fraction = fraction.bytes().map(|b| b - b'0').chain(std::iter::repeat(0));
        let mut next = || fraction.next().unwrap_or(0);
        let (tenths, hundredths, thousandths) = (next(), next(), next());

        let mut reais: Vec<u8> = whole.bytes().collect();
        let mut cents = tenths * 10 + hundredths;

        if thousandths >= 5 {
            cents += 1;
            if cents == 100 {
                cents = 0;
                increment_digits(&mut reais);
            }
        }

        let reais = String::from_utf8_lossy(&reais).into_owned();
        let negative = amount.is_sign_negative() && (cents != 0 || reais.bytes().any(|d| d != b'0'));

        Some(Rounded {
            negative,
            reais,
            cents,
        })
    }
}

/// Adds one to a string of ASCII digits in place.
fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Formats any amount in reais without an integer round trip.
///
/// Same output as `Money::from_amount(amount).to_string()` wherever that
/// fits in `i64`, and the real digits beyond it. Infinities display as
/// `R$∞` / `-R$∞`; NaN displays as zero.
///
/// ```rust
/// use vitrine_core::money::format_reais;
///
/// assert_eq!(format_reais(0.145), "R$0,15");
/// assert_eq!(format_reais(1e17), "R$100.000.000.000.000.000,00");
/// assert_eq!(format_reais(f64::NEG_INFINITY), "-R$∞");
/// ```
pub fn format_reais(amount: f64) -> String {
    if amount.is_nan() {
        return Money::zero().to_string();
    }

    match Rounded::from_amount(amount) {
        Some(rounded) => format!(
            "{}{}{}{}{:02}",
            if rounded.negative { "-" } else { "" },
            CURRENCY_SYMBOL,
            group_thousands(&rounded.reais),
            DECIMAL_SEPARATOR,
            rounded.cents
        ),
        None if amount < 0.0 => format!("-{}∞", CURRENCY_SYMBOL),
        None => format!("{}∞", CURRENCY_SYMBOL),
    }
}

/// Inserts the thousands separator every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(0).to_string(), "R$0,00");
        assert_eq!(Money::from_cents(5).to_string(), "R$0,05");
        assert_eq!(Money::from_cents(99999).to_string(), "R$999,99");
        assert_eq!(Money::from_cents(100000).to_string(), "R$1.000,00");
        assert_eq!(Money::from_cents(123456789).to_string(), "R$1.234.567,89");
        assert_eq!(Money::from_cents(-1000).to_string(), "-R$10,00");
    }

    #[test]
    fn test_from_amount_rounds_to_centavo() {
        assert_eq!(Money::from_amount(1000.0).cents(), 100000);
        assert_eq!(Money::from_amount(1234567.89).cents(), 123456789);
        assert_eq!(Money::from_amount(0.125).cents(), 13);
        assert_eq!(Money::from_amount(-100.0).cents(), -10000);
    }

    #[test]
    fn test_tiny_negative_rounds_to_unsigned_zero() {
        let money = Money::from_amount(-0.001);
        assert!(money.is_zero());
        assert_eq!(money.to_string(), "R$0,00");
    }

    #[test]
    fn test_from_amount_rounds_decimal_form() {
        // Binary values sit just below these halves; the decimal form decides
        assert_eq!(Money::from_amount(0.145).cents(), 15);
        assert_eq!(Money::from_amount(1.005).cents(), 101);
        assert_eq!(Money::from_amount(1.015).cents(), 102);
        assert_eq!(Money::from_amount(-1.005).cents(), -101);
        assert_eq!(Money::from_amount(9.995).cents(), 1000);
        assert_eq!(Money::from_amount(999.999).cents(), 100000);
    }

    #[test]
    fn test_from_amount_out_of_range() {
        assert_eq!(Money::from_amount(f64::INFINITY).cents(), i64::MAX);
        assert_eq!(Money::from_amount(f64::NEG_INFINITY).cents(), i64::MIN);
        assert_eq!(Money::from_amount(1e17).cents(), i64::MAX);
        assert_eq!(Money::from_amount(f64::NAN).cents(), 0);
    }

    #[test]
    fn test_format_reais_half_cents() {
        assert_eq!(format_reais(0.145), "R$0,15");
        assert_eq!(format_reais(1.005), "R$1,01");
        assert_eq!(format_reais(1.015), "R$1,02");
        assert_eq!(format_reais(-1.005), "-R$1,01");
        assert_eq!(format_reais(-0.001), "R$0,00");
    }

    #[test]
    fn test_format_reais_matches_money_display() {
        for amount in [0.0, 0.05, 10.999, 1234567.89, -10.0, 99999.995] {
            assert_eq!(format_reais(amount), Money::from_amount(amount).to_string());
        }
    }

    #[test]
    fn test_format_reais_beyond_i64() {
        assert_eq!(format_reais(1e17), "R$100.000.000.000.000.000,00");
        assert_eq!(format_reais(-1e17), "-R$100.000.000.000.000.000,00");
        assert_eq!(format_reais(f64::INFINITY), "R$∞");
        assert_eq!(format_reais(f64::NEG_INFINITY), "-R$∞");
        assert_eq!(format_reais(f64::NAN), "R$0,00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1.000");
        assert_eq!(group_thousands("1234567"), "1.234.567");
    }
}
