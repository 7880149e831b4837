//! # cellar-store: Entity Store for Cellar
//!
//! This crate provides the shared entity store for the Cellar system.
//! All tables live in memory behind a single `RwLock`; repositories expose
//! typed operations over them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cellar Data Flow                                │
//! │                                                                         │
//! │  Service call (add_cart_item)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    cellar-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │  Repositories │    │Version Guard │  │   │
//! │  │   │  (store.rs)   │    │  (beer.rs,    │    │ (version.rs) │  │   │
//! │  │   │               │    │   order.rs..) │    │              │  │   │
//! │  │   │ RwLock around │◄───│ BeerRepo      │───►│ check token  │  │   │
//! │  │   │ the tables    │    │ OrderRepo     │    │ mutate, bump │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Tables (tables.rs)                            │   │
//! │  │   beers │ breweries │ styles │ users │ carts │ items │ favs    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store handle and configuration
//! - [`tables`] - The entity tables and relational lookups
//! - [`version`] - The optimistic-concurrency commit primitive
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (beer, order, etc.)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cellar_store::{Store, StoreConfig};
//!
//! // Create a store with default limits
//! let store = Store::new(StoreConfig::new());
//!
//! // Use repositories
//! let beer = store.beers().insert(fields).await?;
//! store.orders().place_order(&user_id, 0).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod store;
pub mod tables;
pub mod version;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig, TableSizes};

// Repository re-exports for convenience
pub use repository::beer::BeerRepository;
pub use repository::brewery::BreweryRepository;
pub use repository::cart::CartRepository;
pub use repository::order::OrderRepository;
pub use repository::style::StyleRepository;
pub use repository::user::UserRepository;
