//! # Store Handle and Configuration
//!
//! The shared handle every repository hangs off.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Sharing Model                               │
//! │                                                                         │
//! │  Service startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new() ← Configure limits                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::new(config) ← One RwLock<Tables> behind an Arc                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │          Arc<RwLock<Tables>>            │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Cloned into each repository                                     │
//! │       ▼                                                                 │
//! │  Task 1 ──► store.beers().get_by_id(..)      (shared read guard)       │
//! │  Task 2 ──► store.beers().list(..)           (shared read guard)       │
//! │  Task 3 ──► store.orders().place_order(..)   (exclusive write guard)   │
//! │                                                                         │
//! │  Reads run in parallel; any write, and the whole checkout, is          │
//! │  exclusive against everything else.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::repository::beer::BeerRepository;
use crate::repository::brewery::BreweryRepository;
use crate::repository::cart::CartRepository;
use crate::repository::order::OrderRepository;
use crate::repository::style::StyleRepository;
use crate::repository::user::UserRepository;
use crate::tables::Tables;
use cellar_core::{DEFAULT_PAGE_SIZE, MAX_CART_LINES, MAX_LINE_COUNT, MAX_PAGE_SIZE};

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new()
///     .max_cart_lines(10)
///     .max_line_count(24);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum distinct lines per cart.
    /// Default: 100
    pub max_cart_lines: usize,

    /// Maximum count for a single cart line.
    /// Default: 999
    pub max_line_count: u32,

    /// Page size used when a listing does not ask for one.
    /// Default: 25
    pub default_page_size: u32,

    /// Largest page size a listing may ask for. Bigger requests are
    /// clamped, not rejected.
    /// Default: 100
    pub max_page_size: u32,
}

impl StoreConfig {
    /// Creates a configuration with the stock limits.
    pub fn new() -> Self {
        StoreConfig {
            max_cart_lines: MAX_CART_LINES,
            max_line_count: MAX_LINE_COUNT,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }

    /// Sets the maximum distinct lines per cart.
    pub fn max_cart_lines(mut self, max: usize) -> Self {
        self.max_cart_lines = max;
        self
    }

    /// Sets the maximum count for a single cart line.
    pub fn max_line_count(mut self, max: u32) -> Self {
        self.max_line_count = max;
        self
    }

    /// Sets the default page size.
    pub fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the page size ceiling.
    pub fn max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = size;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new()
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing repository access.
///
/// Cloning is cheap: clones share the same tables and configuration.
///
/// ## Usage
/// ```rust,ignore
/// let store = Store::new(StoreConfig::new());
///
/// let beer = store.beers().insert(fields).await?;
/// store.carts().upsert_item(&user.id, &beer.id, 2).await?;
/// store.orders().place_order(&user.id, 0).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    /// Every table, behind one lock.
    tables: Arc<RwLock<Tables>>,
    /// Shared limits.
    config: Arc<StoreConfig>,
}

impl Store {
    /// Creates an empty store.
    pub fn new(config: StoreConfig) -> Self {
        info!(
            max_cart_lines = config.max_cart_lines,
            max_line_count = config.max_line_count,
            "Initializing entity store"
        );

        Store {
            tables: Arc::new(RwLock::new(Tables::default())),
            config: Arc::new(config),
        }
    }

    /// The limits this store runs with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the beer repository.
    pub fn beers(&self) -> BeerRepository {
        BeerRepository::new(self.tables.clone())
    }

    /// Returns the brewery repository.
    pub fn breweries(&self) -> BreweryRepository {
        BreweryRepository::new(self.tables.clone())
    }

    /// Returns the style repository.
    pub fn styles(&self) -> StyleRepository {
        StyleRepository::new(self.tables.clone())
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.tables.clone())
    }

    /// Returns the cart repository.
    pub fn carts(&self) -> CartRepository {
        CartRepository::new(self.tables.clone(), self.config.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.tables.clone())
    }

    /// Snapshot of table sizes, for diagnostics and seeding output.
    pub async fn table_sizes(&self) -> TableSizes {
        let tables = self.tables.read().await;
        TableSizes {
            beers: tables.beers.len(),
            breweries: tables.breweries.len(),
            styles: tables.styles.len(),
            users: tables.users.len(),
            carts: tables.carts.len(),
            cart_items: tables.cart_items.len(),
            favorites: tables.favorites.len(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new(StoreConfig::new())
    }
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSizes {
    pub beers: usize,
    pub breweries: usize,
    pub styles: usize,
    pub users: usize,
    pub carts: usize,
    pub cart_items: usize,
    pub favorites: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = Store::default();
        let sizes = store.table_sizes().await;

        assert_eq!(sizes.beers, 0);
        assert_eq!(sizes.users, 0);
        assert_eq!(sizes.favorites, 0);
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new().max_cart_lines(10).max_line_count(24);

        assert_eq!(config.max_cart_lines, 10);
        assert_eq!(config.max_line_count, 24);
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_page_size, 100);
    }
}
