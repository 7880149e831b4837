//! # User Repository
//!
//! Store operations for users and their favorites.
//!
//! ## User Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       User Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── insert() → User + its Cart, in one write guard                 │
//! │                    (a user without a cart can never be observed)       │
//! │                                                                         │
//! │  2. USE                                                                │
//! │     └── favorites, cart lines, checkouts                               │
//! │                                                                         │
//! │  3. DELETE                                                             │
//! │     └── delete() → removes the user, its cart, the cart's lines,       │
//! │                    and its favorite markers, in one write guard        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use cellar_core::patch::UserPatch;
use cellar_core::types::{Beer, Cart, Favorite, User, UserFields};

use crate::error::{StoreError, StoreResult};
use crate::repository::page_by_name;
use crate::tables::Tables;
use crate::version::check_and_bump;

/// Repository for user store operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        UserRepository { tables }
    }

    /// Gets a user by its ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(id).cloned())
    }

    /// Lists one page of users sorted by name.
    pub async fn list(&self, page: u32, page_size: u32) -> StoreResult<(Vec<User>, usize)> {
        debug!(page, page_size, "Listing users");

        let tables = self.tables.read().await;
        Ok(page_by_name(
            &tables.users,
            |user| (user.name.as_str(), user.id.as_str()),
            page,
            page_size,
        ))
    }

    /// Inserts a new user together with its cart.
    ///
    /// Both rows land under one write guard: no caller can observe the
    /// user without the cart or the cart without the user.
    pub async fn insert(&self, fields: UserFields) -> StoreResult<User> {
        let cart = Cart {
            id: Uuid::new_v4().to_string(),
            order_sequence: 0,
            created_at: Utc::now(),
        };
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            cart_id: cart.id.clone(),
            version: 0,
        };

        debug!(id = %user.id, cart_id = %cart.id, name = %user.name, "Inserting user");

        let mut tables = self.tables.write().await;
        tables.carts.insert(cart.id.clone(), cart);
        tables.users.insert(user.id.clone(), user.clone());

        info!(id = %user.id, "User created");
        Ok(user)
    }

    /// Replaces every caller-supplied field, guarded by the version token.
    pub async fn replace(&self, id: &str, fields: UserFields, expected: u64) -> StoreResult<u64> {
        debug!(id = %id, expected, "Replacing user");

        let mut tables = self.tables.write().await;
        let next = check_and_bump(&mut tables.users, id, Some(expected), |user| {
            user.name = fields.name;
        })?;

        info!(id = %id, version = next, "User replaced");
        Ok(next)
    }

    /// Patches the supplied fields without a token check.
    pub async fn patch(&self, id: &str, patch: &UserPatch) -> StoreResult<u64> {
        debug!(id = %id, "Patching user");

        let mut tables = self.tables.write().await;
        let next = check_and_bump(&mut tables.users, id, None, |user| {
            patch.apply_to(user);
        })?;

        info!(id = %id, version = next, "User patched");
        Ok(next)
    }

    /// Deletes a user and everything it owns: cart, cart lines,
    /// favorite markers. Returns the user's last state.
    pub async fn delete(&self, id: &str) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .remove(id)
            .ok_or_else(|| StoreError::not_found("User", id))?;

        tables.carts.remove(&user.cart_id);
        tables
            .cart_items
            .retain(|_, item| item.cart_id != user.cart_id);
        tables.favorites.retain(|(uid, _)| uid.as_str() != id);

        info!(id = %id, cart_id = %user.cart_id, "User deleted with cart and favorites");
        Ok(user)
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Marks a beer as a favorite of a user. Idempotent: marking an
    /// existing favorite succeeds without change.
    ///
    /// ## Returns
    /// * `Ok(true)` - Newly added
    /// * `Ok(false)` - Was already a favorite
    pub async fn add_favorite(&self, user_id: &str, beer_id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(user_id) {
            return Err(StoreError::not_found("User", user_id));
        }
        if !tables.beers.contains_key(beer_id) {
            return Err(StoreError::not_found("Beer", beer_id));
        }

        let added = tables
            .favorites
            .insert((user_id.to_string(), beer_id.to_string()));

        debug!(user_id = %user_id, beer_id = %beer_id, added, "Favorite added");
        Ok(added)
    }

    /// Unmarks a favorite. NotFound if the pair was never marked.
    pub async fn remove_favorite(&self, user_id: &str, beer_id: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(user_id) {
            return Err(StoreError::not_found("User", user_id));
        }

        let key = (user_id.to_string(), beer_id.to_string());
        if !tables.favorites.remove(&key) {
            return Err(StoreError::not_found(
                "Favorite",
                format!("{user_id}/{beer_id}"),
            ));
        }

        debug!(user_id = %user_id, beer_id = %beer_id, "Favorite removed");
        Ok(())
    }

    /// Raw favorite markers of a user, sorted by beer id. Includes pairs
    /// whose beer has since been deleted.
    pub async fn favorites(&self, user_id: &str) -> StoreResult<Vec<Favorite>> {
        let tables = self.tables.read().await;

        if !tables.users.contains_key(user_id) {
            return Err(StoreError::not_found("User", user_id));
        }

        Ok(tables.favorites_of_user(user_id))
    }

    /// The user's favorite beers that still exist, sorted by name.
    /// Dangling markers are skipped, never an error.
    pub async fn favorite_beers(&self, user_id: &str) -> StoreResult<Vec<Beer>> {
        let tables = self.tables.read().await;

        if !tables.users.contains_key(user_id) {
            return Err(StoreError::not_found("User", user_id));
        }

        let mut beers: Vec<Beer> = tables
            .favorites_of_user(user_id)
            .iter()
            .filter_map(|favorite| tables.beers.get(&favorite.beer_id).cloned())
            .collect();
        beers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        Ok(beers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use cellar_core::types::BeerFields;

    fn user_fields(name: &str) -> UserFields {
        UserFields {
            name: name.to_string(),
        }
    }

    fn beer_fields(name: &str) -> BeerFields {
        BeerFields {
            name: name.to_string(),
            style_id: None,
            brewery_id: None,
            picture: None,
            stock: 5,
        }
    }

    #[tokio::test]
    async fn test_insert_creates_cart_with_sequence_zero() {
        let store = Store::default();
        let user = store.users().insert(user_fields("Nora")).await.unwrap();

        let (cart, items) = store.carts().cart_for_user(&user.id).await.unwrap();
        assert_eq!(cart.id, user.cart_id);
        assert_eq!(cart.order_sequence, 0);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_cart_lines_and_favorites() {
        let store = Store::default();
        let users = store.users();
        let user = users.insert(user_fields("Nora")).await.unwrap();
        let beer = store.beers().insert(beer_fields("Bush")).await.unwrap();

        store.carts().upsert_item(&user.id, &beer.id, 2).await.unwrap();
        users.add_favorite(&user.id, &beer.id).await.unwrap();

        let snapshot = users.delete(&user.id).await.unwrap();
        assert_eq!(snapshot.name, "Nora");

        let sizes = store.table_sizes().await;
        assert_eq!(sizes.users, 0);
        assert_eq!(sizes.carts, 0);
        assert_eq!(sizes.cart_items, 0);
        assert_eq!(sizes.favorites, 0);
        // The beer itself is untouched
        assert_eq!(sizes.beers, 1);
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent() {
        let store = Store::default();
        let users = store.users();
        let user = users.insert(user_fields("Ines")).await.unwrap();
        let beer = store.beers().insert(beer_fields("Cuvée Rose")).await.unwrap();

        assert!(users.add_favorite(&user.id, &beer.id).await.unwrap());
        assert!(!users.add_favorite(&user.id, &beer.id).await.unwrap());

        let favorites = users.favorites(&user.id).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].beer_id, beer.id);
    }

    #[tokio::test]
    async fn test_remove_missing_favorite_is_not_found() {
        let store = Store::default();
        let users = store.users();
        let user = users.insert(user_fields("Ines")).await.unwrap();

        let err = users.remove_favorite(&user.id, "b-404").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_favorite_beers_skips_dangling_markers() {
        let store = Store::default();
        let users = store.users();
        let user = users.insert(user_fields("Ines")).await.unwrap();
        let keep = store.beers().insert(beer_fields("Avec les Bons Vœux")).await.unwrap();
        let gone = store.beers().insert(beer_fields("Fantôme")).await.unwrap();

        users.add_favorite(&user.id, &keep.id).await.unwrap();
        users.add_favorite(&user.id, &gone.id).await.unwrap();
        store.beers().delete(&gone.id).await.unwrap();

        // The raw marker survives; the resolved view skips it
        assert_eq!(users.favorites(&user.id).await.unwrap().len(), 2);
        let resolved = users.favorite_beers(&user.id).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, keep.id);
    }
}
