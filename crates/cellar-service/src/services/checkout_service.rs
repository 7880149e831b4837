//! # Checkout Service
//!
//! Submits a cart for fulfillment.
//!
//! ## Retry Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout from the Caller's Side                     │
//! │                                                                         │
//! │  1. view = get_cart(user)            → lines + order_sequence          │
//! │  2. place_order(user, view.order_sequence)                              │
//! │        │                                                                │
//! │        ├── ok            → done; cart is empty, sequence advanced      │
//! │        │                                                                │
//! │        └── CONFLICT      → somebody got there first (a duplicate       │
//! │                            submission, or stock ran out). Re-read      │
//! │                            the cart and the stocks, then resubmit      │
//! │                            with the fresh sequence.                    │
//! │                                                                         │
//! │  Each order_sequence value admits at most one successful checkout,     │
//! │  so resubmitting the same form twice cannot double-fulfill.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use cellar_store::Store;

use crate::error::ShopResult;

/// The checkout operation.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    store: Store,
}

impl CheckoutService {
    /// Creates a new checkout service.
    pub fn new(store: Store) -> Self {
        CheckoutService { store }
    }

    /// Converts the user's cart into stock decrements, all or nothing.
    ///
    /// `expected_sequence` must be the order sequence read from the
    /// cart. On success the cart is empty and its sequence has advanced
    /// by one; re-read the cart before the next submission.
    pub async fn place_order(&self, user_id: &str, expected_sequence: u64) -> ShopResult<()> {
        debug!(user_id = %user_id, expected_sequence, "place_order");

        match self.store.orders().place_order(user_id, expected_sequence).await {
            Ok(sequence) => {
                debug!(user_id = %user_id, sequence, "Checkout committed");
                Ok(())
            }
            Err(err) => {
                if err.is_conflict() {
                    warn!(user_id = %user_id, error = %err, "Checkout rejected");
                }
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
