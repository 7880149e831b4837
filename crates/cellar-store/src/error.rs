//! # Store Error Types
//!
//! Error types for entity store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Store rejection (missing entity, stale token, shortfall)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShopError (in cellar-service) ← Carries a transport code              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Request layer maps the code onto its status scheme                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Entity store operation errors.
///
/// Every rejection a store operation can produce, with enough context to
/// act on it. A conflict never mutates the store: the caller can refetch
/// the current state and retry.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - ID doesn't exist
    /// - Entity was deleted by a concurrent caller
    /// - A cart line is addressed through the wrong user
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The caller's version token no longer matches the stored one.
    ///
    /// ## When This Occurs
    /// - Another caller replaced or patched the entity first
    /// - The caller reused a token from an old read
    ///
    /// No mutation has happened. Re-read the entity and resubmit
    /// with the current token.
    #[error("Version conflict on {entity} {id}: expected {expected}, current {current}")]
    VersionConflict {
        entity: String,
        id: String,
        expected: u64,
        current: u64,
    },

    /// The submitted order sequence is not the cart's current one.
    ///
    /// ## When This Occurs
    /// - The same checkout was already submitted and committed
    /// - The caller kept a stale checkout token across a page reload
    ///
    /// This is what makes checkout at-most-once per sequence value.
    #[error("Order sequence for cart {cart_id} has moved on: submitted {submitted}, current {current}")]
    StaleOrderSequence {
        cart_id: String,
        submitted: u64,
        current: u64,
    },

    /// Not enough stock to cover a cart line.
    ///
    /// ## When This Occurs
    /// - Checkout found a line whose count exceeds current stock
    /// - Adding a cart line that current stock could not cover
    /// - The referenced beer was deleted (reported as zero available)
    #[error("Insufficient stock for beer {beer_id}: available {available}, requested {requested}")]
    InsufficientStock {
        beer_id: String,
        available: u32,
        requested: u32,
    },

    /// Checkout was attempted on a cart with no lines.
    #[error("Cart {cart_id} has no lines to order")]
    EmptyCart { cart_id: String },

    /// The cart has reached its configured line limit.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Internal store corruption (e.g., a user whose cart record is gone).
    ///
    /// Fatal to the in-flight request. Never silently swallowed.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal(message.into())
    }

    /// Whether this rejection is a concurrency or state conflict that a
    /// caller can resolve by refetching and retrying.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StoreError::VersionConflict { .. }
                | StoreError::StaleOrderSequence { .. }
                | StoreError::InsufficientStock { .. }
        )
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
