//! # State Module
//!
//! Application state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │   CartStore                  │   │   StorefrontConfig           │   │
//! │  │                              │   │                              │   │
//! │  │  watch::Sender<CartSnapshot> │   │  store_name                  │   │
//! │  │  (one per application root)  │   │  discount_percent            │   │
//! │  │                              │   │  strict_validation           │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: each mutation runs under the channel's write lock        │
//! │  • StorefrontConfig: read-only after initialization                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{CartEntry, CartSnapshot, CartStore};
pub use config::{StorefrontConfig, CONFIG_FILE_NAME, CONFIG_PATH_ENV};
