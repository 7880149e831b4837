//! # Order Repository
//!
//! The checkout transaction: converts a cart's lines into stock
//! decrements, exactly once per order-sequence value.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Lifecycle                                │
//! │                                                                         │
//! │  place_order(user, expected_sequence)                                  │
//! │     │                                                                   │
//! │     ▼  acquire exclusive write guard (held to the end)                 │
//! │                                                                         │
//! │  1. CHECK  (store untouched until every check passes)                  │
//! │     ├── user and cart exist            else NotFound                   │
//! │     ├── sequence matches cart          else StaleOrderSequence         │
//! │     ├── cart has at least one line     else EmptyCart                  │
//! │     └── every line: stock ≥ count      else InsufficientStock          │
//! │         (a beer deleted since cart-add counts as stock 0)              │
//! │                                                                         │
//! │  2. COMMIT (one atomic step under the same guard)                      │
//! │     ├── cart.order_sequence += 1                                       │
//! │     ├── each line's beer: stock -= count, version += 1                 │
//! │     └── delete every line of the cart                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sequence check runs before the emptiness check so that a
//! duplicate submission of an already-consumed checkout is reported as
//! a stale sequence, not as an empty cart.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::tables::Tables;

/// Repository for the checkout transaction.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    tables: Arc<RwLock<Tables>>,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        OrderRepository { tables }
    }

    /// Checks out the user's cart.
    ///
    /// `expected_sequence` must equal the cart's current order
    /// sequence. Each sequence value admits at most one checkout, so a
    /// retried or duplicated submission loses with a conflict and the
    /// caller must re-read the cart for the fresh sequence.
    ///
    /// The whole operation runs under one exclusive write guard: no
    /// other checkout or stock write can interleave between the checks
    /// and the commit.
    ///
    /// ## Returns
    /// The cart's new order sequence.
    pub async fn place_order(&self, user_id: &str, expected_sequence: u64) -> StoreResult<u64> {
        debug!(user_id = %user_id, expected_sequence, "Placing order");

        let mut tables = self.tables.write().await;

        // ---- Checks. Nothing is written until all of them pass. ----

        let cart_id = tables
            .users
            .get(user_id)
            .map(|user| user.cart_id.clone())
            .ok_or_else(|| StoreError::not_found("User", user_id))?;
        let current_sequence = tables
            .carts
            .get(&cart_id)
            .map(|cart| cart.order_sequence)
            .ok_or_else(|| {
                StoreError::internal(format!("cart {cart_id} missing for user {user_id}"))
            })?;

        if expected_sequence != current_sequence {
            return Err(StoreError::StaleOrderSequence {
                cart_id,
                submitted: expected_sequence,
                current: current_sequence,
            });
        }

        let lines: Vec<(String, u32)> = tables
            .items_in_cart(&cart_id)
            .iter()
            .map(|item| (item.beer_id.clone(), item.count))
            .collect();
        if lines.is_empty() {
            return Err(StoreError::EmptyCart { cart_id });
        }

        for (beer_id, count) in &lines {
            let available = tables.beers.get(beer_id).map(|beer| beer.stock).unwrap_or(0);
            if available < *count {
                return Err(StoreError::InsufficientStock {
                    beer_id: beer_id.clone(),
                    available,
                    requested: *count,
                });
            }
        }

        // ---- Commit. The rows below were all verified present under
        // this same guard, so no step here can fail partway. ----

        let cart = tables
            .carts
            .get_mut(&cart_id)
            .ok_or_else(|| StoreError::internal(format!("cart {cart_id} vanished mid-checkout")))?;
        cart.order_sequence += 1;
        let new_sequence = cart.order_sequence;

        for (beer_id, count) in &lines {
            if let Some(beer) = tables.beers.get_mut(beer_id) {
                beer.stock -= count;
                // A stock decrement is a write like any other, so
                // holders of the old token must re-read before editing.
                beer.version += 1;
            }
        }

        tables.cart_items.retain(|_, item| item.cart_id != cart_id);

        info!(
            user_id = %user_id,
            cart_id = %cart_id,
            sequence = new_sequence,
            lines = lines.len(),
            "Order placed"
        );
        Ok(new_sequence)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
