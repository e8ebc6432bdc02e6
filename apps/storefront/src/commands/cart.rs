//! # Cart Commands
//!
//! Commands the storefront UI calls to manipulate the cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checked  │                        │
//! │  │  Cart    │     │          │     │   Out    │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │       ▲                │                │                               │
//! │       │           add_to_cart       checkout                           │
//! │       │           update_cart_item  (receipt, cart emptied)            │
//! │       │           remove_from_cart      │                               │
//! │       │                │                │                               │
//! │       │                ▼                │                               │
//! │       └────────── clear_cart ◄──────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Payloads
//! Items arrive as raw JSON, exactly as the product screen built them:
//! the product record plus a `quantity`. Only `id` is required to decode;
//! everything else is accepted as-is unless `strict_validation` is on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vitrine_core::validation::validate_line_item;
use vitrine_core::{CartSummary, DiscountPercent, LineItem, ProductId};

use crate::error::{ApiError, ApiResult};
use crate::state::{CartSnapshot, CartStore, StorefrontConfig};

/// Cart response including items and the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub summary: CartSummary,

    /// Revision of the snapshot this view was built from.
    pub revision: u64,
}

impl CartView {
    pub fn new(snapshot: &CartSnapshot, discount: DiscountPercent) -> Self {
        CartView {
            items: snapshot.to_line_items(),
            summary: CartSummary::from_items(snapshot.items(), discount),
            revision: snapshot.revision(),
        }
    }
}

/// What a completed checkout hands back to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_id: Uuid,
    pub store_name: String,

    /// Items as they were when the cart was emptied.
    pub items: Vec<LineItem>,
    pub summary: CartSummary,
    pub completed_at: DateTime<Utc>,
}

/// Decodes a payload into a line item, validating it when configured to.
fn decode_item(config: &StorefrontConfig, payload: Value) -> ApiResult<LineItem> {
    let item: LineItem = serde_json::from_value(payload)?;

    if config.strict_validation {
        validate_line_item(&item)?;
    }

    Ok(item)
}

fn view(store: &CartStore, config: &StorefrontConfig) -> CartView {
    CartView::new(&store.items(), config.discount())
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and the summary under the configured discount
pub fn get_cart(store: &CartStore, config: &StorefrontConfig) -> CartView {
    debug!("get_cart command");
    view(store, config)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Always appends; a product already in the cart gets a second entry
/// - Price and metadata are kept as sent
///
/// ## Errors
/// - `INVALID_PAYLOAD` when the payload is not a line item
/// - `VALIDATION_ERROR` when strict validation rejects it
pub fn add_to_cart(store: &CartStore, config: &StorefrontConfig, payload: Value) -> ApiResult<CartView> {
    let item = decode_item(config, payload)?;
    debug!(product_id = %item.id, "add_to_cart command");

    store.add_item(item);

    Ok(view(store, config))
}

/// Replaces every entry of a product with the given item.
///
/// The payload is the complete updated item. An id that is not in the
/// cart leaves it untouched.
pub fn update_cart_item(
    store: &CartStore,
    config: &StorefrontConfig,
    payload: Value,
) -> ApiResult<CartView> {
    let item = decode_item(config, payload)?;
    debug!(product_id = %item.id, "update_cart_item command");

    store.change_quantity(item);

    Ok(view(store, config))
}

/// Removes every entry of a product.
pub fn remove_from_cart(
    store: &CartStore,
    config: &StorefrontConfig,
    product_id: &ProductId,
) -> CartView {
    debug!(%product_id, "remove_from_cart command");

    store.remove_item(product_id);

    view(store, config)
}

/// Empties the cart.
pub fn clear_cart(store: &CartStore, config: &StorefrontConfig) -> CartView {
    debug!("clear_cart command");

    store.clear();

    view(store, config)
}

/// Finalizes the cart.
///
/// ## Checkout Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User clicks "Finalizar"                                               │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Atomically take the cart's contents (cart is now empty)   │    │
/// │  │     - Nothing there: EMPTY_CART                                │    │
/// │  │  2. Summarize them under the configured discount               │    │
/// │  │  3. Return a receipt with a fresh order id                     │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn checkout(store: &CartStore, config: &StorefrontConfig) -> ApiResult<CheckoutReceipt> {
    let snapshot = store.drain().ok_or_else(ApiError::empty_cart)?;

    let receipt = CheckoutReceipt {
        order_id: Uuid::new_v4(),
        store_name: config.store_name.clone(),
        items: snapshot.to_line_items(),
        summary: CartSummary::from_items(snapshot.items(), config.discount()),
        completed_at: Utc::now(),
    };

    info!(
        store_id = %store.id(),
        order_id = %receipt.order_id,
        entries = receipt.items.len(),
        total = %receipt.summary.total_display,
        "Checkout completed"
    );

    Ok(receipt)
}

/// Outcome of [`import_items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: usize,
}

/// Adds every element of a JSON array to the cart, in order.
///
/// Elements that fail to decode (or fail strict validation) are logged and
/// skipped; the rest still go in.
///
/// ## Errors
/// - `INVALID_PAYLOAD` when `document` is not an array
pub fn import_items(
    store: &CartStore,
    config: &StorefrontConfig,
    document: Value,
) -> ApiResult<ImportReport> {
    let Value::Array(entries) = document else {
        return Err(ApiError::invalid_payload("Expected a JSON array of line items"));
    };

    let mut report = ImportReport::default();

    for (index, entry) in entries.into_iter().enumerate() {
        match decode_item(config, entry) {
            Ok(item) => {
                store.add_item(item);
                report.added += 1;
            }
            Err(e) => {
                warn!(index, error = %e, "Skipping cart entry");
                report.skipped += 1;
            }
        }
    }

    debug!(added = report.added, skipped = report.skipped, "import_items finished");
    Ok(report)
}
