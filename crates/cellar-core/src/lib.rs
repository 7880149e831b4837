//! # cellar-core: Pure Catalog Domain for Cellar
//!
//! This crate is the **heart** of Cellar. It contains the catalog domain
//! as pure types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cellar Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  cellar-service (Surface)                       │   │
//! │  │    list_beers, add_cart_item, place_order, etc.                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  cellar-store (Entity Store)                    │   │
//! │  │    Versioned tables, checkout transaction, repositories        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cellar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   patch   │  │ validation│                  │   │
//! │  │   │   Beer    │  │ BeerPatch │  │   rules   │                  │   │
//! │  │   │   User    │  │ UserPatch │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Beer, Brewery, Style, User, Cart, etc.)
//! - [`patch`] - Partial-update payloads with explicit field presence
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Presence**: Partial updates use `Option<T>` per field, so
//!    "absent" and "set to empty" can never be confused
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use cellar_core::patch::BeerPatch;
//! use cellar_core::types::Beer;
//!
//! let mut beer = Beer {
//!     id: "7f2c1b9e-3a44-4b6f-9d0a-2f5d8c1e6a01".to_string(),
//!     name: "Hazy Pale".to_string(),
//!     style_id: None,
//!     brewery_id: None,
//!     picture: None,
//!     stock: 12,
//!     version: 0,
//! };
//!
//! // Only supplied fields change; absent fields stay untouched
//! let patch = BeerPatch {
//!     stock: Some(4),
//!     ..Default::default()
//! };
//! patch.apply_to(&mut beer);
//!
//! assert_eq!(beer.stock, 4);
//! assert_eq!(beer.name, "Hazy Pale");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod patch;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cellar_core::Beer` instead of
// `use cellar_core::types::Beer`

pub use error::ValidationError;
pub use patch::{BeerPatch, BreweryPatch, StylePatch, UserPatch};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any entity name.
///
/// ## Business Reason
/// Names appear in listings and labels; unbounded names break both.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable per deployment via the store config.
pub const MAX_CART_LINES: usize = 100;

/// Maximum count of a single beer in a cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per deployment via the store config.
pub const MAX_LINE_COUNT: u32 = 999;

/// Page size applied when a listing request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Upper bound on the page size a listing request may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;
