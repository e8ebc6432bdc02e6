//! # Commands Module
//!
//! Everything the storefront UI can invoke.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI                                                                     │
//! │  ──                                                                     │
//! │  invoke('add_to_cart', { id: 1, price: 1000, quantity: 2, ... })        │
//! │         │                                                               │
//! │         │ (JSON payload)                                                │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  fn add_to_cart(                                                        │
//! │      store: &CartStore,         ◄── Application root owns it           │
//! │      config: &StorefrontConfig, ◄── Discount, strictness               │
//! │      payload: Value,            ◄── From invoke params                 │
//! │  ) -> Result<CartView, ApiError>                                        │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  UI receives: { items: [...], summary: {...}, revision }                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
