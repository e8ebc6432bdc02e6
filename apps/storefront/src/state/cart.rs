//! # Cart State
//!
//! Holds the shopping cart and is the only place it changes.
//!
//! ## Snapshots
//! The cart is never edited in place. Every change builds a new
//! [`CartSnapshot`] and publishes it in one step, so a reader holds either
//! the old collection or the new one, never something in between.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action                CartStore               Snapshot Change       │
//! │  ─────────                ─────────               ───────────────       │
//! │                                                                         │
//! │  Click Product ──────────► add_item() ──────────► [.., new]            │
//! │                                                                         │
//! │  Change Quantity ────────► change_quantity() ───► matches replaced     │
//! │                                                    (none? no publish)  │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► matches dropped      │
//! │                                                    (none? no publish)  │
//! │                                                                         │
//! │  Click Clear ────────────► clear() ─────────────► []  (always)         │
//! │                                                                         │
//! │  Checkout ───────────────► drain() ─────────────► []  (old returned)   │
//! │                                                                         │
//! │  Render ─────────────────► items() ─────────────► (read only)          │
//! │                                                                         │
//! │  Entries are Arc<LineItem>: entries a change does not touch keep the   │
//! │  same Arc, so identity-based change detection can skip them.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Observers
//! The current snapshot lives in a `tokio::sync::watch` channel. Observers
//! call [`CartStore::subscribe`] and are woken once per batch of changes;
//! they always read the latest snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, trace};
use uuid::Uuid;
use vitrine_core::{LineItem, ProductId};

/// A shared handle to one cart entry.
pub type CartEntry = Arc<LineItem>;

// =============================================================================
// Snapshot
// =============================================================================

/// An immutable view of the cart at one point in time.
///
/// Cloning is cheap: the collection itself is shared.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    items: Arc<[CartEntry]>,

    /// Incremented on every published change.
    revision: u64,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl CartSnapshot {
    fn empty(revision: u64, created_at: DateTime<Utc>) -> Self {
        CartSnapshot {
            items: Arc::from(Vec::new()),
            revision,
            created_at,
        }
    }

    /// Builds the successor snapshot holding `items`.
    fn next(&self, items: Vec<CartEntry>) -> Self {
        CartSnapshot {
            items: Arc::from(items),
            revision: self.revision + 1,
            created_at: self.created_at,
        }
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[CartEntry] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of entries carrying `product_id`.
    pub fn count_of(&self, product_id: &ProductId) -> usize {
        self.items.iter().filter(|e| &e.id == product_id).count()
    }

    /// Checks if both snapshots share the same collection (not just equal
    /// contents).
    pub fn same_collection(&self, other: &CartSnapshot) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Owned copies of the entries, for serialization.
    pub fn to_line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(|e| LineItem::clone(e)).collect()
    }
}

// =============================================================================
// Store
// =============================================================================

/// The cart store.
///
/// One instance per application root (or per test); pass it by reference
/// to whatever needs the cart.
///
/// ## Invariants
/// - Insertion order is preserved; nothing is sorted
/// - Entries are NOT unique by id (adding the same product twice gives two
///   entries)
/// - No operation fails; unknown ids are silent no-ops
#[derive(Debug)]
pub struct CartStore {
    id: Uuid,
    state: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        let (state, _) = watch::channel(CartSnapshot::empty(0, Utc::now()));
        let store = CartStore {
            id: Uuid::new_v4(),
            state,
        };
        debug!(store_id = %store.id, "cart store created");
        store
    }

    /// Instance id, used in log fields.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The current snapshot.
    pub fn items(&self) -> CartSnapshot {
        self.state.borrow().clone()
    }

    /// Registers an observer.
    ///
    /// The receiver starts with the current snapshot marked as seen and is
    /// notified on every later change.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.state.subscribe()
    }

    /// Appends `item` to the end of the cart.
    ///
    /// No merge: an entry with the same id already in the cart stays, and
    /// the new one is added after it.
    pub fn add_item(&self, item: LineItem) {
        let product_id = item.id.clone();
        let entry = Arc::new(item);

        let published = self.commit(|snapshot| {
            let mut items = Vec::with_capacity(snapshot.len() + 1);
            items.extend(snapshot.items.iter().cloned());
            items.push(entry);
            Some(items)
        });

        if let Some((entries, revision)) = published {
            debug!(store_id = %self.id, %product_id, entries, revision, "item added");
        }
    }

    /// Removes every entry whose id equals `product_id`.
    pub fn remove_item(&self, product_id: &ProductId) {
        let published = self.commit(|snapshot| {
            let kept: Vec<CartEntry> = snapshot
                .items
                .iter()
                .filter(|e| &e.id != product_id)
                .cloned()
                .collect();

            (kept.len() != snapshot.len()).then_some(kept)
        });

        match published {
            Some((entries, revision)) => {
                debug!(store_id = %self.id, %product_id, entries, revision, "item removed")
            }
            None => trace!(store_id = %self.id, %product_id, "remove_item: no matching entry"),
        }
    }

    /// Replaces every entry whose id equals `item.id` with `item`.
    ///
    /// This is a full replacement: the caller passes the complete updated
    /// item, quantity included. All replaced entries share one new `Arc`.
    pub fn change_quantity(&self, item: LineItem) {
        let product_id = item.id.clone();
        let replacement = Arc::new(item);

        let published = self.commit(|snapshot| {
            if !snapshot.items.iter().any(|e| e.id == replacement.id) {
                return None;
            }

            Some(
                snapshot
                    .items
                    .iter()
                    .map(|e| {
                        if e.id == replacement.id {
                            Arc::clone(&replacement)
                        } else {
                            Arc::clone(e)
                        }
                    })
                    .collect(),
            )
        });

        match published {
            Some((entries, revision)) => {
                debug!(store_id = %self.id, %product_id, entries, revision, "item replaced")
            }
            None => trace!(store_id = %self.id, %product_id, "change_quantity: no matching entry"),
        }
    }

    /// Empties the cart. Always publishes, even when already empty.
    pub fn clear(&self) {
        let mut revision = 0;
        self.state.send_modify(|snapshot| {
            *snapshot = CartSnapshot::empty(snapshot.revision + 1, Utc::now());
            revision = snapshot.revision;
        });
        debug!(store_id = %self.id, revision, "cart cleared");
    }

    /// Atomically empties a non-empty cart and returns what it held.
    ///
    /// Publishes like [`clear`](Self::clear). An empty cart yields `None`
    /// and publishes nothing.
    pub fn drain(&self) -> Option<CartSnapshot> {
        let mut drained = None;

        self.state.send_if_modified(|snapshot| {
            if snapshot.is_empty() {
                return false;
            }
            let empty = CartSnapshot::empty(snapshot.revision + 1, Utc::now());
            drained = Some(std::mem::replace(snapshot, empty));
            true
        });

        match &drained {
            Some(previous) => debug!(
                store_id = %self.id,
                entries = previous.len(),
                revision = previous.revision + 1,
                "cart drained"
            ),
            None => trace!(store_id = %self.id, "drain: cart already empty"),
        }

        drained
    }

    /// Publishes the collection returned by `build`, if any.
    ///
    /// `build` runs under the channel's write lock; returning `None` leaves
    /// the current snapshot (and its collection) in place and wakes nobody.
    /// Returns `(entries, revision)` of the published snapshot.
    fn commit<F>(&self, build: F) -> Option<(usize, u64)>
    where
        F: FnOnce(&CartSnapshot) -> Option<Vec<CartEntry>>,
    {
        let mut published = None;

        self.state.send_if_modified(|snapshot| match build(snapshot) {
            Some(items) => {
                *snapshot = snapshot.next(items);
                published = Some((snapshot.len(), snapshot.revision));
                true
            }
            None => false,
        });

        published
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vitrine_core::NumericInput;

    fn product(id: i64, quantity: i64) -> LineItem {
        LineItem::new(id, "Produto", 10.0, quantity)
            .with_metadata("description", json!("Desc"))
            .with_metadata("sizes", json!(["M"]))
    }

    fn ids(snapshot: &CartSnapshot) -> Vec<ProductId> {
        snapshot.items().iter().map(|e| e.id.clone()).collect()
    }

    fn pid(id: i64) -> ProductId {
        ProductId::Number(id)
    }

    #[test]
    fn test_starts_empty() {
        let cart = CartStore::new();
        assert!(cart.items().is_empty());
        assert_eq!(cart.items().revision(), 0);
    }

    #[test]
    fn test_add_item_with_quantity() {
        let cart = CartStore::new();
        cart.add_item(product(1, 2));

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items.items()[0].id, pid(1));
        assert_eq!(items.items()[0].quantity, NumericInput::from(2_i64));
    }

    #[test]
    fn test_add_preserves_call_order() {
        let cart = CartStore::new();
        for id in [3, 1, 2, 1] {
            cart.add_item(product(id, 1));
        }

        assert_eq!(cart.items().len(), 4);
        assert_eq!(ids(&cart.items()), vec![pid(3), pid(1), pid(2), pid(1)]);
    }

    #[test]
    fn test_duplicate_ids_create_separate_entries() {
        let cart = CartStore::new();
        cart.add_item(product(123, 1));
        cart.add_item(product(123, 4));

        let items = cart.items();
        assert_eq!(items.count_of(&pid(123)), 2);

        let quantities: Vec<_> = items.items().iter().map(|e| e.quantity.clone()).collect();
        assert_eq!(
            quantities,
            vec![NumericInput::from(1_i64), NumericInput::from(4_i64)]
        );
    }

    #[test]
    fn test_remove_item_by_id() {
        let cart = CartStore::new();
        cart.add_item(product(1, 1));
        cart.add_item(product(2, 1));
        let kept = Arc::clone(&cart.items().items()[1]);

        cart.remove_item(&pid(1));

        let items = cart.items();
        assert_eq!(ids(&items), vec![pid(2)]);
        assert!(Arc::ptr_eq(&items.items()[0], &kept));
    }

    #[test]
    fn test_remove_item_removes_all_matches() {
        let cart = CartStore::new();
        cart.add_item(product(7, 1));
        cart.add_item(product(8, 1));
        cart.add_item(product(7, 2));

        cart.remove_item(&pid(7));

        assert_eq!(ids(&cart.items()), vec![pid(8)]);
    }

    #[test]
    fn test_remove_unknown_id_keeps_snapshot() {
        let cart = CartStore::new();
        cart.add_item(product(1, 1));
        let before = cart.items();

        cart.remove_item(&pid(999));

        let after = cart.items();
        assert!(after.same_collection(&before));
        assert_eq!(after.revision(), before.revision());
    }

    #[test]
    fn test_string_and_numeric_ids_are_distinct() {
        let cart = CartStore::new();
        cart.add_item(product(1, 1));

        cart.remove_item(&ProductId::from("1"));

        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_change_quantity_only_for_matching_id() {
        let cart = CartStore::new();
        cart.add_item(product(1, 1));
        cart.add_item(product(2, 5));
        let untouched = Arc::clone(&cart.items().items()[0]);

        cart.change_quantity(product(2, 7));

        let items = cart.items();
        assert_eq!(items.items()[0].quantity, NumericInput::from(1_i64));
        assert_eq!(items.items()[1].quantity, NumericInput::from(7_i64));
        assert!(Arc::ptr_eq(&items.items()[0], &untouched));
    }

    #[test]
    fn test_change_quantity_is_full_replacement() {
        let cart = CartStore::new();
        cart.add_item(product(1, 1));

        cart.change_quantity(LineItem::new(1_i64, "Renamed", 99.0, 3_i64));

        let entry = Arc::clone(&cart.items().items()[0]);
        assert_eq!(entry.name, "Renamed");
        assert!(entry.metadata.is_empty());
    }

    #[test]
    fn test_change_quantity_replaces_every_duplicate() {
        let cart = CartStore::new();
        cart.add_item(product(5, 1));
        cart.add_item(product(6, 1));
        cart.add_item(product(5, 2));

        cart.change_quantity(product(5, 9));

        let items = cart.items();
        assert_eq!(items.items()[0].quantity, NumericInput::from(9_i64));
        assert_eq!(items.items()[2].quantity, NumericInput::from(9_i64));
        assert!(Arc::ptr_eq(&items.items()[0], &items.items()[2]));
        assert_eq!(ids(&items), vec![pid(5), pid(6), pid(5)]);
    }

    #[test]
    fn test_change_quantity_unknown_id_keeps_state() {
        let cart = CartStore::new();
        cart.add_item(product(1, 1));
        let before = cart.items();
        let first = Arc::clone(&before.items()[0]);

        cart.change_quantity(product(999, 10));

        let after = cart.items();
        assert_eq!(after.len(), 1);
        assert!(Arc::ptr_eq(&after.items()[0], &first));
        assert_eq!(after.items()[0].quantity, NumericInput::from(1_i64));
        assert!(after.same_collection(&before));
    }

    #[test]
    fn test_clear() {
        let cart = CartStore::new();
        cart.add_item(product(1, 2));
        cart.add_item(product(2, 3));
        let created = cart.items().created_at();

        cart.clear();

        let items = cart.items();
        assert!(items.is_empty());
        assert_eq!(items.revision(), 3);
        assert!(items.created_at() >= created);
    }

    #[test]
    fn test_clear_empty_cart_still_publishes() {
        let cart = CartStore::new();
        let before = cart.items();

        cart.clear();

        let after = cart.items();
        assert!(after.is_empty());
        assert!(!after.same_collection(&before));
        assert_eq!(after.revision(), 1);
    }

    #[test]
    fn test_drain_returns_previous_contents() {
        let cart = CartStore::new();
        cart.add_item(product(1, 1));
        cart.add_item(product(2, 3));
        let observer = cart.subscribe();

        let drained = cart.drain().unwrap();

        assert_eq!(ids(&drained), vec![pid(1), pid(2)]);
        assert_eq!(drained.revision(), 2);
        assert!(cart.items().is_empty());
        assert_eq!(cart.items().revision(), 3);
        assert!(observer.has_changed().unwrap());
    }

    #[test]
    fn test_drain_empty_cart() {
        let cart = CartStore::new();
        let observer = cart.subscribe();

        assert!(cart.drain().is_none());
        assert_eq!(cart.items().revision(), 0);
        assert!(!observer.has_changed().unwrap());
    }

    #[test]
    fn test_old_snapshots_are_immutable() {
        let cart = CartStore::new();
        cart.add_item(product(1, 1));
        let before = cart.items();

        cart.add_item(product(2, 1));
        cart.change_quantity(product(1, 5));

        assert_eq!(before.len(), 1);
        assert_eq!(before.items()[0].quantity, NumericInput::from(1_i64));
    }

    #[test]
    fn test_stores_are_independent() {
        let a = CartStore::new();
        let b = CartStore::new();
        a.add_item(product(1, 1));

        assert_eq!(a.items().len(), 1);
        assert!(b.items().is_empty());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_to_line_items() {
        let cart = CartStore::new();
        cart.add_item(product(1, 2));

        let owned = cart.items().to_line_items();
        assert_eq!(owned, vec![product(1, 2)]);
    }

    #[test]
    fn test_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CartStore>();
        assert_send_sync::<CartSnapshot>();
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    #[test]
    fn test_observer_sees_changes_but_not_no_ops() {
        let cart = CartStore::new();
        let mut observer = cart.subscribe();
        assert!(!observer.has_changed().unwrap());

        cart.add_item(product(1, 1));
        assert!(observer.has_changed().unwrap());
        assert_eq!(observer.borrow_and_update().len(), 1);

        cart.remove_item(&pid(42));
        cart.change_quantity(product(42, 2));
        assert!(!observer.has_changed().unwrap());

        cart.clear();
        assert!(observer.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_observer_is_woken_with_latest_snapshot() {
        let cart = CartStore::new();
        let mut observer = cart.subscribe();

        cart.add_item(product(1, 1));
        cart.add_item(product(2, 1));

        observer.changed().await.unwrap();
        let seen = observer.borrow_and_update().clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen.revision(), 2);
        assert!(!observer.has_changed().unwrap());
    }
}
