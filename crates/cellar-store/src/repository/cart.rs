//! # Cart Repository
//!
//! Store operations for a user's cart lines.
//!
//! A cart holds at most one line per beer. Adding a beer that already
//! has a line replaces that line's count outright; counts are never
//! summed across calls. Cart edits only ever touch cart rows: stock is
//! reserved at checkout, not here.
//!
//! ## Upsert Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 upsert_item(user, beer, count)                          │
//! │                                                                         │
//! │  user exists? ──no──► NotFound(User)                                   │
//! │       │yes                                                              │
//! │  beer exists? ──no──► NotFound(Beer)                                   │
//! │       │yes                                                              │
//! │  stock ≥ count? ──no──► InsufficientStock                              │
//! │       │yes                                                              │
//! │  line for beer already in cart?                                        │
//! │       │yes                    │no                                       │
//! │       ▼                       ▼                                         │
//! │  overwrite count         cart full? ──yes──► CartTooLarge              │
//! │  (added_at kept)              │no                                       │
//! │                               ▼                                         │
//! │                          insert new line                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use cellar_core::types::{Cart, CartItem};

use crate::error::{StoreError, StoreResult};
use crate::store::StoreConfig;
use crate::tables::Tables;

/// Repository for cart store operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    tables: Arc<RwLock<Tables>>,
    config: Arc<StoreConfig>,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub(crate) fn new(tables: Arc<RwLock<Tables>>, config: Arc<StoreConfig>) -> Self {
        CartRepository { tables, config }
    }

    /// The user's cart and its lines, sorted by when they were added.
    pub async fn cart_for_user(&self, user_id: &str) -> StoreResult<(Cart, Vec<CartItem>)> {
        let tables = self.tables.read().await;

        let user = tables
            .users
            .get(user_id)
            .ok_or_else(|| StoreError::not_found("User", user_id))?;
        let cart = tables.carts.get(&user.cart_id).cloned().ok_or_else(|| {
            StoreError::internal(format!("cart {} missing for user {user_id}", user.cart_id))
        })?;
        let items = tables.items_in_cart(&cart.id).into_iter().cloned().collect();

        Ok((cart, items))
    }

    /// Puts a line for `beer_id` into the user's cart, replacing the
    /// count of an existing line for the same beer.
    ///
    /// The requested count must be coverable by the beer's current
    /// stock. That is a point-in-time read: nothing is reserved, and
    /// checkout re-checks every line.
    pub async fn upsert_item(
        &self,
        user_id: &str,
        beer_id: &str,
        count: u32,
    ) -> StoreResult<CartItem> {
        debug!(user_id = %user_id, beer_id = %beer_id, count, "Upserting cart line");

        let mut tables = self.tables.write().await;

        let cart_id = tables
            .users
            .get(user_id)
            .map(|user| user.cart_id.clone())
            .ok_or_else(|| StoreError::not_found("User", user_id))?;

        let beer = tables
            .beers
            .get(beer_id)
            .ok_or_else(|| StoreError::not_found("Beer", beer_id))?;
        if !beer.can_reserve(count) {
            return Err(StoreError::InsufficientStock {
                beer_id: beer_id.to_string(),
                available: beer.stock,
                requested: count,
            });
        }

        // One line per beer: a second add for the same beer overwrites.
        let existing = tables
            .item_for_beer(&cart_id, beer_id)
            .map(|item| item.id.clone());
        if let Some(item_id) = existing {
            let item = tables
                .cart_items
                .get_mut(&item_id)
                .ok_or_else(|| StoreError::internal("cart line vanished under the write guard"))?;
            item.count = count;
            let updated = item.clone();

            info!(user_id = %user_id, item_id = %updated.id, count, "Cart line replaced");
            return Ok(updated);
        }

        if tables.items_in_cart(&cart_id).len() >= self.config.max_cart_lines {
            return Err(StoreError::CartTooLarge {
                max: self.config.max_cart_lines,
            });
        }

        let item = CartItem {
            id: Uuid::new_v4().to_string(),
            cart_id,
            beer_id: beer_id.to_string(),
            count,
            added_at: Utc::now(),
        };
        tables.cart_items.insert(item.id.clone(), item.clone());

        info!(user_id = %user_id, item_id = %item.id, count, "Cart line added");
        Ok(item)
    }

    /// Removes a line from the user's cart. Returns the removed line.
    ///
    /// A line id that exists but belongs to another user's cart is
    /// reported as NotFound, same as an unknown id.
    pub async fn remove_item(&self, user_id: &str, item_id: &str) -> StoreResult<CartItem> {
        let mut tables = self.tables.write().await;

        let cart_id = tables
            .users
            .get(user_id)
            .map(|user| user.cart_id.clone())
            .ok_or_else(|| StoreError::not_found("User", user_id))?;

        let item = match tables.cart_items.get(item_id) {
            Some(item) if item.cart_id == cart_id => item.clone(),
            _ => return Err(StoreError::not_found("CartItem", item_id)),
        };
        tables.cart_items.remove(item_id);

        info!(user_id = %user_id, item_id = %item_id, "Cart line removed");
        Ok(item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use cellar_core::types::{BeerFields, UserFields};

    async fn seeded_user(store: &Store, name: &str) -> String {
        store
            .users()
            .insert(UserFields {
                name: name.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn seeded_beer(store: &Store, name: &str, stock: u32) -> String {
        store
            .beers()
            .insert(BeerFields {
                name: name.to_string(),
                style_id: None,
                brewery_id: None,
                picture: None,
                stock,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_second_add_replaces_count() {
        let store = Store::default();
        let user_id = seeded_user(&store, "Nora").await;
        let beer_id = seeded_beer(&store, "Orval", 10).await;

        let first = store.carts().upsert_item(&user_id, &beer_id, 3).await.unwrap();
        let second = store.carts().upsert_item(&user_id, &beer_id, 5).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.count, 5);
        assert_eq!(second.added_at, first.added_at);

        let (_, items) = store.carts().cart_for_user(&user_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].count, 5);
    }

    #[tokio::test]
    async fn test_add_beyond_stock_is_rejected() {
        let store = Store::default();
        let user_id = seeded_user(&store, "Nora").await;
        let beer_id = seeded_beer(&store, "Westvleteren 12", 2).await;

        let err = store
            .carts()
            .upsert_item(&user_id, &beer_id, 3)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            }
        ));

        let (_, items) = store.carts().cart_for_user(&user_id).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_adding_to_cart_never_touches_stock() {
        let store = Store::default();
        let user_id = seeded_user(&store, "Nora").await;
        let beer_id = seeded_beer(&store, "Chimay Bleue", 4).await;

        store.carts().upsert_item(&user_id, &beer_id, 4).await.unwrap();

        let beer = store.beers().get_by_id(&beer_id).await.unwrap().unwrap();
        assert_eq!(beer.stock, 4);
    }

    #[tokio::test]
    async fn test_full_cart_rejects_new_lines_but_not_replacements() {
        let store = Store::new(StoreConfig::new().max_cart_lines(2));
        let user_id = seeded_user(&store, "Nora").await;
        let first = seeded_beer(&store, "Taras Boulba", 9).await;
        let second = seeded_beer(&store, "Zinnebir", 9).await;
        let third = seeded_beer(&store, "Jambe de Bois", 9).await;

        store.carts().upsert_item(&user_id, &first, 1).await.unwrap();
        store.carts().upsert_item(&user_id, &second, 1).await.unwrap();

        let err = store
            .carts()
            .upsert_item(&user_id, &third, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::CartTooLarge { max: 2 }));

        // Replacing an existing line still works at capacity
        let replaced = store.carts().upsert_item(&user_id, &first, 7).await.unwrap();
        assert_eq!(replaced.count, 7);
    }

    #[tokio::test]
    async fn test_remove_item_checks_ownership() {
        let store = Store::default();
        let owner = seeded_user(&store, "Nora").await;
        let other = seeded_user(&store, "Ines").await;
        let beer_id = seeded_beer(&store, "Saison Dupont", 6).await;

        let item = store.carts().upsert_item(&owner, &beer_id, 2).await.unwrap();

        let err = store
            .carts()
            .remove_item(&other, &item.id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let removed = store.carts().remove_item(&owner, &item.id).await.unwrap();
        assert_eq!(removed.id, item.id);

        let (_, items) = store.carts().cart_for_user(&owner).await.unwrap();
        assert!(items.is_empty());
    }
}
