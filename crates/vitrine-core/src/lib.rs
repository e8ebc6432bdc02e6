//! # vitrine-core: Pure Cart & Pricing Logic for Vitrine
//!
//! Everything the storefront needs to reason about a cart without touching
//! the outside world: line-item types, the numeric guard, totals, discounts
//! and BRL display formatting.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront UI (header, cart screen)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            storefront app: CartStore, commands, config          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitrine-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  numeric  │  │  pricing  │  │   money   │  │   │
//! │  │   │ LineItem  │  │  guard    │  │  totals   │  │   R$ fmt  │  │   │
//! │  │   │ ProductId │  │           │  │  discount │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `LineItem`, `ProductId`
//! - [`numeric`] - The predicate every numeric boundary goes through
//! - [`pricing`] - Totals, discounts, formatting, `CartSummary`
//! - [`money`] - Integer centavos and the BRL display format
//! - [`validation`] - Opt-in strict checks
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrine_core::pricing::{calculate_total_price, format_amount};
//! use vitrine_core::LineItem;
//!
//! let items = vec![LineItem::new(1_i64, "Camiseta", 1000.0, 2_i64)];
//! assert_eq!(format_amount(calculate_total_price(&items)), "R$2.000,00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod numeric;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use money::{format_reais, Money};
pub use numeric::{Numeric, NumericInput};
pub use pricing::{CartSummary, DiscountPercent, Priced};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single entry accepted by strict validation.
///
/// The cart itself does not enforce this; see [`validation`].
pub const MAX_ITEM_QUANTITY: i64 = 999;
