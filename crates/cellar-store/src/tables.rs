//! # Entity Tables
//!
//! The in-memory tables holding every entity, plus the relational lookups
//! repositories build on.
//!
//! ## Locking Discipline
//! `Tables` itself is plain data with no locking. The [`Store`] wraps one
//! instance in a `tokio::sync::RwLock`; every method here runs under a
//! guard the repository already holds. Multi-step operations (checkout,
//! user+cart creation, cascading deletes) stay atomic because they never
//! release the write guard between steps.
//!
//! [`Store`]: crate::store::Store

use std::collections::{HashMap, HashSet};

use cellar_core::types::{Beer, Brewery, Cart, CartItem, Favorite, Style, User};

/// All entity tables, keyed by entity id.
///
/// Favorites are keyed by the (user_id, beer_id) pair itself, which makes
/// the at-most-one-favorite-per-pair invariant structural.
#[derive(Debug, Default)]
pub struct Tables {
    pub beers: HashMap<String, Beer>,
    pub breweries: HashMap<String, Brewery>,
    pub styles: HashMap<String, Style>,
    pub users: HashMap<String, User>,
    pub carts: HashMap<String, Cart>,
    pub cart_items: HashMap<String, CartItem>,
    pub favorites: HashSet<(String, String)>,
}

impl Tables {
    /// Lines of one cart, oldest first (ties broken by id for
    /// deterministic ordering).
    pub fn items_in_cart(&self, cart_id: &str) -> Vec<&CartItem> {
        let mut items: Vec<&CartItem> = self
            .cart_items
            .values()
            .filter(|item| item.cart_id == cart_id)
            .collect();
        items.sort_by(|a, b| a.added_at.cmp(&b.added_at).then_with(|| a.id.cmp(&b.id)));
        items
    }

    /// The cart line for one beer, if the cart holds it.
    pub fn item_for_beer(&self, cart_id: &str, beer_id: &str) -> Option<&CartItem> {
        self.cart_items
            .values()
            .find(|item| item.cart_id == cart_id && item.beer_id == beer_id)
    }

    /// Beers produced by one brewery, by name.
    pub fn beers_of_brewery(&self, brewery_id: &str) -> Vec<&Beer> {
        let mut beers: Vec<&Beer> = self
            .beers
            .values()
            .filter(|beer| beer.brewery_id.as_deref() == Some(brewery_id))
            .collect();
        beers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        beers
    }

    /// Beers of one style, by name.
    pub fn beers_of_style(&self, style_id: &str) -> Vec<&Beer> {
        let mut beers: Vec<&Beer> = self
            .beers
            .values()
            .filter(|beer| beer.style_id.as_deref() == Some(style_id))
            .collect();
        beers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        beers
    }

    /// Favorite markers of one user, by beer id.
    pub fn favorites_of_user(&self, user_id: &str) -> Vec<Favorite> {
        let mut favorites: Vec<Favorite> = self
            .favorites
            .iter()
            .filter(|(uid, _)| uid.as_str() == user_id)
            .map(|(uid, bid)| Favorite {
                user_id: uid.clone(),
                beer_id: bid.clone(),
            })
            .collect();
        favorites.sort_by(|a, b| a.beer_id.cmp(&b.beer_id));
        favorites
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn beer(id: &str, name: &str, brewery_id: Option<&str>) -> Beer {
        Beer {
            id: id.to_string(),
            name: name.to_string(),
            style_id: None,
            brewery_id: brewery_id.map(str::to_string),
            picture: None,
            stock: 10,
            version: 0,
        }
    }

    #[test]
    fn test_items_in_cart_ordered_by_added_at() {
        let mut tables = Tables::default();
        let base = Utc::now();

        for (id, offset) in [("i-2", 20), ("i-1", 10), ("i-3", 30)] {
            tables.cart_items.insert(
                id.to_string(),
                CartItem {
                    id: id.to_string(),
                    cart_id: "c-1".to_string(),
                    beer_id: format!("b-{id}"),
                    count: 1,
                    added_at: base + Duration::seconds(offset),
                },
            );
        }
        tables.cart_items.insert(
            "other".to_string(),
            CartItem {
                id: "other".to_string(),
                cart_id: "c-2".to_string(),
                beer_id: "b-x".to_string(),
                count: 1,
                added_at: base,
            },
        );

        let ids: Vec<&str> = tables
            .items_in_cart("c-1")
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["i-1", "i-2", "i-3"]);
    }

    #[test]
    fn test_beers_of_brewery_filters_and_sorts() {
        let mut tables = Tables::default();
        for b in [
            beer("b-1", "Zundert", Some("br-1")),
            beer("b-2", "Amarillo", Some("br-1")),
            beer("b-3", "Celia", Some("br-2")),
            beer("b-4", "Orphan", None),
        ] {
            tables.beers.insert(b.id.clone(), b);
        }

        let names: Vec<&str> = tables
            .beers_of_brewery("br-1")
            .iter()
            .map(|beer| beer.name.as_str())
            .collect();
        assert_eq!(names, vec!["Amarillo", "Zundert"]);
    }

    #[test]
    fn test_favorites_of_user() {
        let mut tables = Tables::default();
        tables.favorites.insert(("u-1".to_string(), "b-2".to_string()));
        tables.favorites.insert(("u-1".to_string(), "b-1".to_string()));
        tables.favorites.insert(("u-2".to_string(), "b-1".to_string()));

        let favorites = tables.favorites_of_user("u-1");
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].beer_id, "b-1");
        assert_eq!(favorites[1].beer_id, "b-2");
    }
}
