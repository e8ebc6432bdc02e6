//! # Domain Types
//!
//! The records that flow between the catalog, the cart and the UI.
//!
//! ## Line-Item Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           LineItem                                      │
//! │                                                                         │
//! │   id        ProductId     required, 1 or "sku-1"                        │
//! │   name      String        defaults to ""                                │
//! │   price     NumericInput  read through the numeric predicate            │
//! │   quantity  NumericInput  read through the numeric predicate            │
//! │   ...       metadata      description, image, category, colors, sizes,  │
//! │                           anything else, carried through unchanged      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` identifies a *product*, not a cart entry. The cart may hold several
//! entries with the same id; nothing here deduplicates.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::numeric::NumericInput;

// =============================================================================
// Product Id
// =============================================================================

/// Opaque product identifier.
///
/// Catalogs hand out either integers or strings. The two never compare
/// equal: `1` and `"1"` are different products. Any other JSON id (`1.5`,
/// `true`, an integer beyond `i64`) is kept as-is in `Other` and compared
/// by exact JSON equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
            ProductId::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId::Text(s)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A product placed in the cart at a given quantity.
///
/// ## Permissive
/// Nothing is validated on construction or deserialization beyond the
/// presence of `id`. A string price or a missing quantity is stored as-is;
/// pricing decides how to read it. See [`crate::validation`] for callers
/// that want to reject such items up front.
///
/// ## Example
/// ```rust
/// use vitrine_core::LineItem;
/// use serde_json::json;
///
/// let item: LineItem = serde_json::from_value(json!({
///     "id": 1,
///     "name": "Camiseta",
///     "price": 100,
///     "quantity": 2,
///     "sizes": ["M", "L"],
/// })).unwrap();
///
/// assert_eq!(item.metadata["sizes"], json!(["M", "L"]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "NumericInput::is_missing")]
    pub price: NumericInput,

    #[serde(default, skip_serializing_if = "NumericInput::is_missing")]
    pub quantity: NumericInput,

    /// Every other field of the product record.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl LineItem {
    /// Creates a line item without metadata.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: impl Into<NumericInput>,
        quantity: impl Into<NumericInput>,
    ) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
            metadata: Map::new(),
        }
    }

    /// Attaches a metadata field (builder style).
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Returns a copy of this item at a different quantity.
    ///
    /// The cart replaces whole items, so a quantity change is expressed as
    /// a complete new item:
    /// ```rust
    /// use vitrine_core::LineItem;
    ///
    /// let item = LineItem::new(1_i64, "Boné", 50.0, 1_i64);
    /// let updated = item.with_quantity(3_i64);
    /// assert_eq!(updated.id, item.id);
    /// ```
    pub fn with_quantity(&self, quantity: impl Into<NumericInput>) -> Self {
        LineItem {
            quantity: quantity.into(),
            ..self.clone()
        }
    }
}

/// Reads `null` as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Numeric;
    use serde_json::json;

    #[test]
    fn test_product_id_variants_do_not_collide() {
        assert_ne!(ProductId::from(1_i64), ProductId::from("1"));
        assert_eq!(ProductId::from(1_i64).to_string(), "1");
        assert_eq!(ProductId::from("sku-1").to_string(), "sku-1");
    }

    #[test]
    fn test_deserialize_full_product_record() {
        let item: LineItem = serde_json::from_value(json!({
            "id": 1,
            "name": "Test Product",
            "price": 100,
            "quantity": 1,
            "image": "test.jpg",
            "description": "Test Description",
            "category": 1,
            "colors": ["red", "blue"],
            "sizes": ["M", "L"],
        }))
        .unwrap();

        assert_eq!(item.id, ProductId::Number(1));
        assert_eq!(item.price.check(), Numeric::Valid(100.0));
        assert_eq!(item.quantity.check(), Numeric::Valid(1.0));
        assert_eq!(item.metadata.len(), 5);
        assert_eq!(item.metadata["image"], json!("test.jpg"));
    }

    #[test]
    fn test_metadata_round_trips_unchanged() {
        let raw = json!({
            "id": "sku-9",
            "name": "Meia",
            "price": 12.5,
            "quantity": 4.0,
            "colors": ["#fff"],
        });
        let item: LineItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_integer_numbers_round_trip_unchanged() {
        let raw = json!({
            "id": 1,
            "name": "A",
            "price": 100,
            "quantity": 2,
        });
        let item: LineItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_null_name_reads_as_empty() {
        let item: LineItem = serde_json::from_value(json!({
            "id": 1,
            "name": null,
            "price": 10,
        }))
        .unwrap();

        assert_eq!(item.name, "");
        assert_eq!(item.price.check(), Numeric::Valid(10.0));
    }

    #[test]
    fn test_unusual_ids_are_kept_opaque() {
        for id in [json!(1.5), json!(true), json!(u64::MAX)] {
            let item: LineItem = serde_json::from_value(json!({ "id": id.clone() })).unwrap();
            assert_eq!(item.id, ProductId::Other(id.clone()));
            assert_eq!(serde_json::to_value(&item).unwrap()["id"], id);
        }

        assert_ne!(ProductId::Other(json!(1.5)), ProductId::Other(json!("1.5")));
        assert_eq!(ProductId::Other(json!(true)).to_string(), "true");
    }

    #[test]
    fn test_bad_numbers_are_kept_not_rejected() {
        let item: LineItem = serde_json::from_value(json!({
            "id": 1,
            "name": "A",
            "price": "100",
        }))
        .unwrap();

        assert_eq!(item.price, NumericInput::from("100"));
        assert!(item.quantity.is_missing());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result = serde_json::from_value::<LineItem>(json!({ "name": "A", "price": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_with_quantity_keeps_everything_else() {
        let item = LineItem::new(5_i64, "Tênis", 300.0, 1_i64).with_metadata("sizes", json!(["42"]));
        let updated = item.with_quantity(2_i64);

        assert_eq!(updated.quantity.check(), Numeric::Valid(2.0));
        assert_eq!(updated.price, item.price);
        assert_eq!(updated.metadata, item.metadata);
    }
}
