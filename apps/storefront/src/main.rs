//! # storefront-cart
//!
//! Loads a list of line items into a fresh cart and prints the result.
//!
//! ```text
//! storefront-cart items.json        # read from a file
//! cat items.json | storefront-cart  # or from stdin
//! ```
//!
//! Input is a JSON array of line items. Entries that cannot be decoded are
//! logged and skipped. Output is the cart view (items plus summary under
//! the configured discount) as pretty JSON on stdout.

use std::error::Error;
use std::io::Read;

use serde_json::Value;
use tracing::info;

use storefront::commands::cart::{get_cart, import_items};
use storefront::state::{CartStore, StorefrontConfig};

fn main() -> Result<(), Box<dyn Error>> {
    let config = StorefrontConfig::load()?;
    storefront::init_tracing(&config);

    info!(
        store = %config.store_name,
        discount = config.discount().value(),
        strict = config.strict_validation,
        "Starting storefront-cart"
    );

    let input = match std::env::args_os().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let document: Value = serde_json::from_str(&input)?;

    let store = CartStore::new();
    let report = import_items(&store, &config, document)?;
    info!(added = report.added, skipped = report.skipped, "Cart loaded");

    let view = get_cart(&store, &config);
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
