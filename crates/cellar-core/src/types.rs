//! # Domain Types
//!
//! Core domain types used throughout Cellar.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Beer       │   │     Brewery     │   │      Style      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  style_id       │   │  name           │   │  name           │       │
//! │  │  brewery_id     │   │  version        │   │  optimal_temp   │       │
//! │  │  stock, version │   └─────────────────┘   │  version        │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Cart       │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  cart_id        │   │  order_sequence │   │  cart_id        │       │
//! │  │  name, version  │   │  created_at     │   │  beer_id, count │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Beer ──style_id──► Style        Beer ──brewery_id──► Brewery          │
//! │  User ──cart_id───► Cart         CartItem ──cart_id──► Cart            │
//! │  CartItem ──beer_id──► Beer      Favorite = (user_id, beer_id)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reference Semantics
//! Beer→Style and Beer→Brewery are descriptive references, never ownership:
//! deleting the target leaves the reference dangling and reads resolve it
//! lazily to "absent". User→Cart is ownership: the cart lives and dies with
//! its user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Beer
// =============================================================================

/// A beer in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in listings and on labels.
    pub name: String,

    /// Style this beer belongs to. Descriptive reference; may dangle.
    pub style_id: Option<String>,

    /// Brewery that produces this beer. Descriptive reference; may dangle.
    pub brewery_id: Option<String>,

    /// Optional picture URL.
    pub picture: Option<String>,

    /// Units currently in stock. Unsigned: stock can never go negative.
    pub stock: u32,

    /// Concurrency token. Bumped by exactly 1 on every successful write.
    pub version: u64,
}

impl Beer {
    /// Checks whether `count` units could be reserved from current stock.
    pub fn can_reserve(&self, count: u32) -> bool {
        self.stock >= count
    }
}

// =============================================================================
// Brewery
// =============================================================================

/// A producer of beers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brewery {
    pub id: String,
    pub name: String,
    /// Concurrency token. Bumped by exactly 1 on every successful write.
    pub version: u64,
}

// =============================================================================
// Style
// =============================================================================

/// A beer style (lager, stout, saison, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub id: String,
    pub name: String,
    /// Recommended serving temperature in degrees Celsius.
    pub optimal_temperature: i32,
    /// Concurrency token. Bumped by exactly 1 on every successful write.
    pub version: u64,
}

// =============================================================================
// User
// =============================================================================

/// A shopper. Owns exactly one cart for its whole lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// The cart created together with this user. Ownership reference.
    pub cart_id: String,
    /// Concurrency token. Bumped by exactly 1 on every successful write.
    pub version: u64,
}

// =============================================================================
// Cart
// =============================================================================

/// A user's cart. Created with the user, deleted with the user.
///
/// The cart itself carries no lines; [`CartItem`] rows reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,

    /// Number of orders successfully placed from this cart.
    ///
    /// Doubles as the checkout idempotency token: a checkout request must
    /// quote the current value, and a successful checkout increments it,
    /// so resubmitting the same request can never commit twice.
    pub order_sequence: u64,

    /// When the cart (and its user) was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// One line in a cart: a beer and how many units of it.
///
/// At most one line exists per (cart, beer) pair. Adding a beer that is
/// already in the cart replaces the line's count instead of stacking a
/// second line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub cart_id: String,
    pub beer_id: String,
    /// Units requested. Always positive.
    pub count: u32,
    /// When the line first entered the cart. Survives count updates.
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Favorite
// =============================================================================

/// Marks a beer as a favorite of a user.
///
/// Plain association, no version token. Deleting the user removes its
/// favorites; deleting the beer leaves them dangling and reads skip them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: String,
    pub beer_id: String,
}

// =============================================================================
// Write Payloads
// =============================================================================
// Everything a caller supplies when creating or fully replacing an entity.
// The id and the version token are owned by the store and never part of
// the payload.

/// Caller-supplied fields of a [`Beer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeerFields {
    pub name: String,
    pub style_id: Option<String>,
    pub brewery_id: Option<String>,
    pub picture: Option<String>,
    pub stock: u32,
}

/// Caller-supplied fields of a [`Brewery`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreweryFields {
    pub name: String,
}

/// Caller-supplied fields of a [`Style`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleFields {
    pub name: String,
    pub optimal_temperature: i32,
}

/// Caller-supplied fields of a [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
}

// =============================================================================
// Versioned
// =============================================================================

/// Entities guarded by a concurrency token.
///
/// The store's version guard is generic over this trait: it compares the
/// caller's expected token against [`version`](Versioned::version) and, on
/// a match, applies the write and bumps the token in one indivisible step.
pub trait Versioned {
    /// Entity name used in store errors and logs.
    const KIND: &'static str;

    /// Current concurrency token.
    fn version(&self) -> u64;

    /// Overwrites the concurrency token. Only the store calls this.
    fn set_version(&mut self, version: u64);
}

impl Versioned for Beer {
    const KIND: &'static str = "Beer";

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl Versioned for Brewery {
    const KIND: &'static str = "Brewery";

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl Versioned for Style {
    const KIND: &'static str = "Style";

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl Versioned for User {
    const KIND: &'static str = "User";

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_beer(stock: u32) -> Beer {
        Beer {
            id: "5c3f1a2b-9d8e-4f00-b1c2-3d4e5f6a7b8c".to_string(),
            name: "Test Lager".to_string(),
            style_id: None,
            brewery_id: None,
            picture: None,
            stock,
            version: 0,
        }
    }

    #[test]
    fn test_can_reserve() {
        let beer = sample_beer(5);
        assert!(beer.can_reserve(5));
        assert!(beer.can_reserve(1));
        assert!(!beer.can_reserve(6));

        let empty = sample_beer(0);
        assert!(empty.can_reserve(0));
        assert!(!empty.can_reserve(1));
    }

    #[test]
    fn test_versioned_accessors() {
        let mut beer = sample_beer(1);
        assert_eq!(beer.version(), 0);
        beer.set_version(7);
        assert_eq!(beer.version, 7);
        assert_eq!(Beer::KIND, "Beer");
    }

    #[test]
    fn test_optional_fields_deserialize_when_absent() {
        // Callers may omit optional beer fields entirely
        let fields: BeerFields =
            serde_json::from_str(r#"{"name": "Saison d'Été", "stock": 3}"#).unwrap();
        assert_eq!(fields.name, "Saison d'Été");
        assert_eq!(fields.stock, 3);
        assert!(fields.style_id.is_none());
        assert!(fields.brewery_id.is_none());
        assert!(fields.picture.is_none());
    }
}
