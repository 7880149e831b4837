//! # Response DTOs
//!
//! Shapes handed to the transport layer.
//!
//! ## Why DTOs?
//! - Decouples the stored entities from the API contract
//! - Resolves weak references (style/brewery/beer ids) into names at
//!   read time, tolerating references whose target has been deleted
//! - Handles serde rename to camelCase for wire consumption

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cellar_core::types::{Beer, Brewery, Style, User};

// =============================================================================
// Catalog
// =============================================================================

/// A resolved weak reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

impl From<Style> for NamedRef {
    fn from(style: Style) -> Self {
        NamedRef {
            id: style.id,
            name: style.name,
        }
    }
}

impl From<Brewery> for NamedRef {
    fn from(brewery: Brewery) -> Self {
        NamedRef {
            id: brewery.id,
            name: brewery.name,
        }
    }
}

/// Beer as it appears in listings and delete snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerSummary {
    pub id: String,
    pub name: String,
    pub stock: u32,
    pub version: u64,
}

impl From<Beer> for BeerSummary {
    fn from(beer: Beer) -> Self {
        BeerSummary {
            id: beer.id,
            name: beer.name,
            stock: beer.stock,
            version: beer.version,
        }
    }
}

/// Beer with its references resolved.
///
/// `style`/`brewery` are `None` both when the beer carries no reference
/// and when the referenced entity no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerDetail {
    pub id: String,
    pub name: String,
    pub style: Option<NamedRef>,
    pub brewery: Option<NamedRef>,
    pub picture: Option<String>,
    pub stock: u32,
    pub version: u64,
}

/// Brewery as it appears in listings and delete snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewerySummary {
    pub id: String,
    pub name: String,
    pub version: u64,
}

impl From<Brewery> for BrewerySummary {
    fn from(brewery: Brewery) -> Self {
        BrewerySummary {
            id: brewery.id,
            name: brewery.name,
            version: brewery.version,
        }
    }
}

/// Brewery with the names of the beers it brews.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreweryDetail {
    pub id: String,
    pub name: String,
    pub beers: Vec<String>,
    pub version: u64,
}

/// Style as it appears in listings and delete snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSummary {
    pub id: String,
    pub name: String,
    /// Serving temperature in degrees Celsius.
    pub optimal_temperature: i32,
    pub version: u64,
}

impl From<Style> for StyleSummary {
    fn from(style: Style) -> Self {
        StyleSummary {
            id: style.id,
            name: style.name,
            optimal_temperature: style.optimal_temperature,
            version: style.version,
        }
    }
}

/// Style with the names of the beers brewed in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDetail {
    pub id: String,
    pub name: String,
    pub optimal_temperature: i32,
    pub beers: Vec<String>,
    pub version: u64,
}

/// User as it appears in listings and delete snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub version: u64,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name,
            version: user.version,
        }
    }
}

/// User with its cart reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: String,
    pub name: String,
    pub cart_id: String,
    pub version: u64,
}

impl From<User> for UserDetail {
    fn from(user: User) -> Self {
        UserDetail {
            id: user.id,
            name: user.name,
            cart_id: user.cart_id,
            version: user.version,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// One cart line.
///
/// `beer_name` is `None` when the referenced beer has been deleted
/// since the line was added; the line itself is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub beer_id: String,
    pub beer_name: Option<String>,
    pub count: u32,
    pub added_at: DateTime<Utc>,
}

/// A user's cart.
///
/// `order_sequence` is the token to submit with the next checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart_id: String,
    pub order_sequence: u64,
    pub lines: Vec<CartLine>,
}

// =============================================================================
// Paging
// =============================================================================

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub paging: PagingMetadata,
}

/// Position of a page within the full listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingMetadata {
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PagingMetadata {
    /// Builds metadata from the clamped paging inputs and the total row
    /// count the store reported.
    pub fn new(page: u32, page_size: u32, total_items: usize) -> Self {
        PagingMetadata {
            page,
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size as usize),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_metadata_rounds_up() {
        let paging = PagingMetadata::new(1, 25, 51);
        assert_eq!(paging.total_pages, 3);

        let paging = PagingMetadata::new(1, 25, 50);
        assert_eq!(paging.total_pages, 2);

        let paging = PagingMetadata::new(1, 25, 0);
        assert_eq!(paging.total_pages, 0);
    }

    #[test]
    fn test_dtos_serialize_camel_case() {
        let summary = StyleSummary {
            id: "s-1".to_string(),
            name: "Saison".to_string(),
            optimal_temperature: 7,
            version: 2,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["optimalTemperature"], 7);
        assert_eq!(json["version"], 2);

        let line = CartLine {
            id: "ci-1".to_string(),
            beer_id: "b-1".to_string(),
            beer_name: Some("Orval".to_string()),
            count: 2,
            added_at: Utc::now(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["beerId"], "b-1");
        assert_eq!(json["beerName"], "Orval");
        assert!(json.get("addedAt").is_some());
    }
}
