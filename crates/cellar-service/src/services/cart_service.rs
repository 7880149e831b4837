//! # Cart Service
//!
//! Cart lines and favorite markers for one user.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart Service Operations                             │
//! │                                                                         │
//! │  Caller Action             Service Call            Store Change         │
//! │  ─────────────             ────────────            ────────────         │
//! │                                                                         │
//! │  View cart ──────────────► get_cart() ───────────► (read only)         │
//! │                                                                         │
//! │  Pick a beer ────────────► add_item() ───────────► line upserted       │
//! │                                                    (count replaced)     │
//! │                                                                         │
//! │  Drop a line ────────────► remove_item() ────────► line deleted        │
//! │                                                                         │
//! │  Mark favorite ──────────► add_favorite() ───────► marker added        │
//! │                                                    (re-add is a no-op)  │
//! │                                                                         │
//! │  NOTE: none of these touch Beer.stock. Stock is reserved only by        │
//! │        checkout, which re-checks every line under its own lock.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use cellar_core::types::CartItem;
use cellar_core::validation::validate_count;
use cellar_store::Store;

use crate::dto::{BeerSummary, CartLine, CartView};
use crate::error::ShopResult;

/// Cart and favorites operations.
#[derive(Debug, Clone)]
pub struct CartService {
    store: Store,
}

impl CartService {
    /// Creates a new cart service.
    pub fn new(store: Store) -> Self {
        CartService { store }
    }

    /// The user's cart with beer names resolved per line.
    ///
    /// The `order_sequence` in the view is the token to submit with the
    /// next checkout.
    pub async fn get_cart(&self, user_id: &str) -> ShopResult<CartView> {
        debug!(user_id = %user_id, "get_cart");

        let (cart, items) = self.store.carts().cart_for_user(user_id).await?;
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            lines.push(self.resolve_line(item).await?);
        }

        Ok(CartView {
            cart_id: cart.id,
            order_sequence: cart.order_sequence,
            lines,
        })
    }

    /// Puts a line for the beer into the user's cart. A repeat add for
    /// the same beer replaces the line's count.
    pub async fn add_item(&self, user_id: &str, beer_id: &str, count: u32) -> ShopResult<CartLine> {
        debug!(user_id = %user_id, beer_id = %beer_id, count, "add_item");
        validate_count(count, self.store.config().max_line_count)?;

        let item = self.store.carts().upsert_item(user_id, beer_id, count).await?;
        self.resolve_line(item).await
    }

    /// Removes a line from the user's cart. Returns the removed line.
    pub async fn remove_item(&self, user_id: &str, item_id: &str) -> ShopResult<CartLine> {
        debug!(user_id = %user_id, item_id = %item_id, "remove_item");

        let item = self.store.carts().remove_item(user_id, item_id).await?;
        self.resolve_line(item).await
    }

    /// Marks a beer as a favorite. Re-marking succeeds without change.
    pub async fn add_favorite(&self, user_id: &str, beer_id: &str) -> ShopResult<()> {
        debug!(user_id = %user_id, beer_id = %beer_id, "add_favorite");

        self.store.users().add_favorite(user_id, beer_id).await?;
        Ok(())
    }

    /// Unmarks a favorite. NotFound if the pair was never marked.
    pub async fn remove_favorite(&self, user_id: &str, beer_id: &str) -> ShopResult<()> {
        debug!(user_id = %user_id, beer_id = %beer_id, "remove_favorite");

        self.store.users().remove_favorite(user_id, beer_id).await?;
        Ok(())
    }

    /// The user's favorite beers that still exist, sorted by name.
    pub async fn favorite_beers(&self, user_id: &str) -> ShopResult<Vec<BeerSummary>> {
        debug!(user_id = %user_id, "favorite_beers");

        let beers = self.store.users().favorite_beers(user_id).await?;
        Ok(beers.into_iter().map(BeerSummary::from).collect())
    }

    async fn resolve_line(&self, item: CartItem) -> ShopResult<CartLine> {
        let beer_name = self
            .store
            .beers()
            .get_by_id(&item.beer_id)
            .await?
            .map(|beer| beer.name);

        Ok(CartLine {
            id: item.id,
            beer_id: item.beer_id,
            beer_name,
            count: item.count,
            added_at: item.added_at,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
