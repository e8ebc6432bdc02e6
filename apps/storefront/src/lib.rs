//! # Vitrine Storefront Library
//!
//! Cart state, configuration and the commands a storefront UI calls.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (logging setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore and snapshots
//! │   └── config.rs   ◄─── StorefrontConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── Cart manipulation and checkout
//! ├── error.rs        ◄─── API error type for commands
//! └── main.rs         ◄─── storefront-cart binary
//! ```
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use storefront::commands::cart::{add_to_cart, get_cart};
//! use storefront::state::{CartStore, StorefrontConfig};
//!
//! let store = CartStore::new();
//! let config = StorefrontConfig::default();
//!
//! add_to_cart(&store, &config, json!({"id": 1, "price": 1000, "quantity": 2})).unwrap();
//! assert_eq!(get_cart(&store, &config).summary.total_display, "R$2.000,00");
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

use state::StorefrontConfig;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show no-op cart mutations too
/// - Otherwise the configured `log_filter`, falling back to INFO
///
/// Logs go to stderr; stdout is reserved for command output.
pub fn init_tracing(config: &StorefrontConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
