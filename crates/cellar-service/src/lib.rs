//! # Cellar Service
//!
//! Operation surface over the in-memory beer catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shop Services                                  │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │ CatalogService │  │  CartService   │  │  CheckoutService           ││
//! │  │                │  │                │  │                            ││
//! │  │ • list / get   │  │ • get_cart     │  │ • place_order              ││
//! │  │ • create       │  │ • add_item     │  │   (sequence-guarded,       ││
//! │  │ • replace      │  │ • remove_item  │  │    all-or-nothing)         ││
//! │  │ • patch        │  │ • favorites    │  │                            ││
//! │  │ • delete       │  │                │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │          │                   │                        │                 │
//! │          └───────────────────┼────────────────────────┘                 │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │                                                                   │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐│  │
//! │  │  │ cellar-store │  │ cellar-core  │  │  DTO layer               ││  │
//! │  │  │              │  │              │  │                          ││  │
//! │  │  │ Tables under │  │ Types and    │  │ camelCase projections    ││  │
//! │  │  │ one RwLock   │  │ validation   │  │ with resolved names      ││  │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────────────┘│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every fallible operation returns [`ShopResult`], so callers see one
//! error shape (`{ code, message }`) no matter which layer refused.

pub mod dto;
pub mod error;
pub mod services;

// Re-exports
pub use error::{ErrorCode, ShopError, ShopResult};
pub use services::cart_service::CartService;
pub use services::catalog_service::CatalogService;
pub use services::checkout_service::CheckoutService;

use cellar_store::Store;

/// Entry point bundling the three services over one shared store.
#[derive(Debug, Clone)]
pub struct Shop {
    store: Store,
}

impl Shop {
    /// Creates a shop over the given store.
    pub fn new(store: Store) -> Self {
        Shop { store }
    }

    /// Catalog reads and writes.
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.store.clone())
    }

    /// Cart lines and favorites.
    pub fn carts(&self) -> CartService {
        CartService::new(self.store.clone())
    }

    /// Order placement.
    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(self.store.clone())
    }

    /// The underlying store, for seeding and diagnostics.
    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl Default for Shop {
    fn default() -> Self {
        Shop::new(Store::default())
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cellar_core::types::{BeerFields, BreweryFields, StyleFields, UserFields};

    /// Walks one user through browse, cart, and checkout end to end.
    #[tokio::test]
    async fn test_browse_fill_cart_and_check_out() {
        let shop = Shop::default();
        let catalog = shop.catalog();

        let style = catalog
            .create_style(StyleFields {
                name: "Trappist".to_string(),
                optimal_temperature: 12,
            })
            .await
            .unwrap();
        let brewery = catalog
            .create_brewery(BreweryFields {
                name: "Brasserie de Rochefort".to_string(),
            })
            .await
            .unwrap();
        let beer = catalog
            .create_beer(BeerFields {
                name: "Rochefort 10".to_string(),
                style_id: Some(style.id.clone()),
                brewery_id: Some(brewery.id.clone()),
                picture: None,
                stock: 6,
            })
            .await
            .unwrap();
        let user = catalog
            .create_user(UserFields {
                name: "Nora".to_string(),
            })
            .await
            .unwrap();

        let detail = catalog.get_beer(&beer.id).await.unwrap();
        assert_eq!(detail.style.unwrap().name, "Trappist");
        assert_eq!(detail.brewery.unwrap().name, "Brasserie de Rochefort");

        let line = shop.carts().add_item(&user.id, &beer.id, 2).await.unwrap();
        assert_eq!(line.beer_name.as_deref(), Some("Rochefort 10"));

        let view = shop.carts().get_cart(&user.id).await.unwrap();
        shop.checkout()
            .place_order(&user.id, view.order_sequence)
            .await
            .unwrap();

        assert_eq!(catalog.get_beer(&beer.id).await.unwrap().stock, 4);
        let view = shop.carts().get_cart(&user.id).await.unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(view.order_sequence, 1);
    }

    /// Services constructed from the same shop share one set of tables.
    #[tokio::test]
    async fn test_services_share_the_store() {
        let shop = Shop::default();
        let user = shop
            .catalog()
            .create_user(UserFields {
                name: "Ines".to_string(),
            })
            .await
            .unwrap();

        // A second catalog handle sees the same user
        let listed = shop.catalog().list_users(None, None).await.unwrap();
        assert_eq!(listed.paging.total_items, 1);
        assert_eq!(listed.items[0].id, user.id);

        let sizes = shop.store().table_sizes().await;
        assert_eq!(sizes.users, 1);
        assert_eq!(sizes.carts, 1);
    }
}
