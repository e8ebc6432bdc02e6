//! # Pricing
//!
//! Pure functions deriving totals, discounted totals and display strings
//! from a snapshot of line items. No state, no I/O.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  items ──► for each item:                                               │
//! │              price    = check(price)     Fallback → skip (adds 0)       │
//! │              quantity = check(quantity)  Fallback → 1                   │
//! │              line     = price × quantity                                │
//! │         ──► subtotal = Σ line                   (negatives kept as-is)  │
//! │                                                                         │
//! │  discount ──► check ──► clamp to [0, 100]       Fallback → 0            │
//! │                                                                         │
//! │  total = subtotal × (1 − discount / 100)                                │
//! │                                                                         │
//! │  format_price(total) ──► round on decimal form ──► "R$1.234,56"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use vitrine_core::pricing::{calculate_total_price, calculate_total_price_with_discount};
//! use vitrine_core::{LineItem, NumericInput};
//!
//! let items = vec![
//!     LineItem::new(1_i64, "A", 100.0, 1_i64),
//!     LineItem::new(2_i64, "B", 200.0, 3_i64),
//! ];
//!
//! assert_eq!(calculate_total_price(&items), 700.0);
//! assert_eq!(calculate_total_price_with_discount(&items, &NumericInput::from(10.0)), 630.0);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::money::format_reais;
use crate::numeric::{Numeric, NumericInput};
use crate::types::LineItem;

/// Quantity assumed when an item carries no usable quantity.
pub const DEFAULT_QUANTITY: f64 = 1.0;

// =============================================================================
// Priced Trait
// =============================================================================

/// Anything that carries a price and a quantity.
///
/// Implemented for typed [`LineItem`]s, for the shared handles the cart
/// store hands out, and for raw JSON entries.
pub trait Priced {
    fn price(&self) -> &NumericInput;
    fn quantity(&self) -> &NumericInput;
}

impl Priced for LineItem {
    fn price(&self) -> &NumericInput {
        &self.price
    }

    fn quantity(&self) -> &NumericInput {
        &self.quantity
    }
}

impl<T: Priced + ?Sized> Priced for &T {
    fn price(&self) -> &NumericInput {
        (**self).price()
    }

    fn quantity(&self) -> &NumericInput {
        (**self).quantity()
    }
}

impl<T: Priced + ?Sized> Priced for Arc<T> {
    fn price(&self) -> &NumericInput {
        (**self).price()
    }

    fn quantity(&self) -> &NumericInput {
        (**self).quantity()
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A discount percentage normalized into `[0, 100]`.
///
/// Only constructed through [`DiscountPercent::normalize`], so the range
/// always holds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct DiscountPercent(f64);

impl DiscountPercent {
    /// No discount.
    pub const NONE: DiscountPercent = DiscountPercent(0.0);

    /// Normalizes a raw discount.
    ///
    /// ## Rules
    /// - Not a number (or NaN) → 0
    /// - Below 0 → 0
    /// - Above 100 → 100
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::pricing::DiscountPercent;
    /// use vitrine_core::NumericInput;
    ///
    /// assert_eq!(DiscountPercent::normalize(&NumericInput::from(-10.0)).value(), 0.0);
    /// assert_eq!(DiscountPercent::normalize(&NumericInput::from(200.0)).value(), 100.0);
    /// assert_eq!(DiscountPercent::normalize(&NumericInput::from("10")).value(), 0.0);
    /// ```
    pub fn normalize(input: &NumericInput) -> Self {
        match input.check() {
            Numeric::Valid(d) => DiscountPercent(d.clamp(0.0, 100.0)),
            Numeric::Fallback => DiscountPercent::NONE,
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Applies the discount to a total.
    ///
    /// A full discount yields `0` even for negative totals.
    pub fn apply(self, total: f64) -> f64 {
        let discounted = total * (1.0 - self.0 / 100.0);
        // -100 × 0 is -0; the UI should never see a signed zero
        if discounted == 0.0 {
            0.0
        } else {
            discounted
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Amount one entry contributes to the total.
pub fn line_total<P: Priced + ?Sized>(item: &P) -> f64 {
    match item.price().check() {
        Numeric::Valid(price) => price * item.quantity().check().or(DEFAULT_QUANTITY),
        Numeric::Fallback => 0.0,
    }
}

/// Sums `price × quantity` over every entry with a usable price.
///
/// ## Rules
/// - Entries with a non-numeric or missing price contribute `0`
/// - A non-numeric or missing quantity counts as `1`
/// - Negative prices are summed as-is
/// - Empty input yields `0`
pub fn calculate_total_price<P: Priced>(items: &[P]) -> f64 {
    items.iter().fold(0.0, |acc, item| acc + line_total(item))
}

/// Total after a percentage discount.
///
/// The discount is normalized with [`DiscountPercent::normalize`].
pub fn calculate_total_price_with_discount<P: Priced>(items: &[P], discount: &NumericInput) -> f64 {
    DiscountPercent::normalize(discount).apply(calculate_total_price(items))
}

// =============================================================================
// Untyped Entry Points
// =============================================================================

/// A JSON array element read only for its price and quantity.
#[derive(Debug)]
struct RawEntry {
    price: NumericInput,
    quantity: NumericInput,
}

impl RawEntry {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |name: &str| {
            object
                .get(name)
                .cloned()
                .map(NumericInput::from)
                .unwrap_or_default()
        };

        Some(RawEntry {
            price: field("price"),
            quantity: field("quantity"),
        })
    }
}

impl Priced for RawEntry {
    fn price(&self) -> &NumericInput {
        &self.price
    }

    fn quantity(&self) -> &NumericInput {
        &self.quantity
    }
}

/// [`calculate_total_price`] over data that has not been typed yet.
///
/// ## Rules
/// - Anything other than a JSON array yields `0`
/// - Array elements that are not objects contribute `0`
/// - Objects are priced by their `price` and `quantity` fields, `id` or not
///
/// ## Example
/// ```rust
/// use vitrine_core::pricing::total_price_from_json;
/// use serde_json::json;
///
/// assert_eq!(total_price_from_json(&json!("not an array")), 0.0);
/// assert_eq!(total_price_from_json(&json!([{ "price": 42 }, null])), 42.0);
/// ```
pub fn total_price_from_json(value: &Value) -> f64 {
    let Some(elements) = value.as_array() else {
        return 0.0;
    };

    let entries: Vec<RawEntry> = elements.iter().filter_map(RawEntry::from_value).collect();
    calculate_total_price(&entries)
}

/// [`calculate_total_price_with_discount`] over untyped data.
pub fn total_price_with_discount_from_json(value: &Value, discount: &NumericInput) -> f64 {
    if !value.is_array() {
        return 0.0;
    }
    DiscountPercent::normalize(discount).apply(total_price_from_json(value))
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats a price for display in reais.
///
/// Non-numeric input (strings, null, NaN) displays as zero.
///
/// ## Example
/// ```rust
/// use vitrine_core::pricing::format_price;
/// use vitrine_core::NumericInput;
///
/// assert_eq!(format_price(&NumericInput::from(1000.0)), "R$1.000,00");
/// assert_eq!(format_price(&NumericInput::from(f64::NAN)), "R$0,00");
/// assert_eq!(format_price(&NumericInput::from("1000")), "R$0,00");
/// ```
pub fn format_price(price: &NumericInput) -> String {
    format_reais(price.check().or(0.0))
}

/// Typed shorthand for [`format_price`].
pub fn format_amount(amount: f64) -> String {
    format_price(&NumericInput::from(amount))
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Everything the cart screen renders below the item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Number of entries (duplicated ids count separately).
    pub item_count: usize,

    /// Sum of effective quantities over entries with a usable price.
    pub total_quantity: f64,

    pub subtotal: f64,

    /// Normalized discount in `[0, 100]`.
    pub discount_percent: f64,

    /// `subtotal - total`
    pub discount_amount: f64,

    pub total: f64,

    pub subtotal_display: String,

    pub total_display: String,
}

impl CartSummary {
    /// Summarizes a snapshot of items under a discount.
    pub fn from_items<P: Priced>(items: &[P], discount: DiscountPercent) -> Self {
        let subtotal = calculate_total_price(items);
        let total = discount.apply(subtotal);
        let total_quantity = items
            .iter()
            .filter(|item| item.price().check().is_valid())
            .fold(0.0, |acc, item| acc + item.quantity().check().or(DEFAULT_QUANTITY));

        CartSummary {
            item_count: items.len(),
            total_quantity,
            subtotal,
            discount_percent: discount.value(),
            discount_amount: subtotal - total,
            total,
            subtotal_display: format_amount(subtotal),
            total_display: format_amount(total),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
