//! # Repository Module
//!
//! Repository implementations over the shared tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Repositories are the only code that touches the tables. Each one      │
//! │  clones the store's Arc<RwLock<Tables>> and takes the guard itself,    │
//! │  so every public method is one atomic unit of work.                    │
//! │                                                                         │
//! │  Service call                                                          │
//! │       │                                                                 │
//! │       │  store.beers().replace(id, fields, expected)                   │
//! │       ▼                                                                 │
//! │  BeerRepository                                                        │
//! │  ├── acquires the write guard                                          │
//! │  ├── runs the version guard (check, mutate, bump)                      │
//! │  └── releases the guard on return                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Tables (HashMaps)                                                     │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Locking lives in one layer                                          │
//! │  • Multi-table transactions can't leak partial state                   │
//! │  • Callers never see a guard                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`beer::BeerRepository`] - Beer CRUD and foreign-key lookups
//! - [`brewery::BreweryRepository`] - Brewery CRUD
//! - [`style::StyleRepository`] - Style CRUD
//! - [`user::UserRepository`] - User CRUD, favorites, cascading delete
//! - [`cart::CartRepository`] - Cart reads and line upserts
//! - [`order::OrderRepository`] - The checkout transaction

use std::collections::HashMap;

pub mod beer;
pub mod brewery;
pub mod cart;
pub mod order;
pub mod style;
pub mod user;

/// One page of a table sorted by (name, id), plus the total row count.
///
/// `page` is 1-based; a page past the end comes back empty with the
/// total still correct.
pub(crate) fn page_by_name<T: Clone>(
    map: &HashMap<String, T>,
    key: fn(&T) -> (&str, &str),
    page: u32,
    page_size: u32,
) -> (Vec<T>, usize) {
    let mut all: Vec<&T> = map.values().collect();
    all.sort_by(|a, b| {
        let (a_name, a_id) = key(a);
        let (b_name, b_id) = key(b);
        a_name.cmp(b_name).then_with(|| a_id.cmp(b_id))
    });

    let total = all.len();
    let start = (page.max(1) as usize - 1).saturating_mul(page_size as usize);
    let items = all
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();

    (items, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellar_core::types::Brewery;

    fn table(names: &[&str]) -> HashMap<String, Brewery> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let id = format!("br-{i}");
                (
                    id.clone(),
                    Brewery {
                        id,
                        name: name.to_string(),
                        version: 0,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_page_by_name_sorts_and_slices() {
        let map = table(&["Orval", "Achel", "Westvleteren", "Chimay", "Rochefort"]);

        let (items, total) = page_by_name(&map, |b| (b.name.as_str(), b.id.as_str()), 1, 2);
        assert_eq!(total, 5);
        let names: Vec<&str> = items.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Achel", "Chimay"]);

        let (items, _) = page_by_name(&map, |b| (b.name.as_str(), b.id.as_str()), 3, 2);
        let names: Vec<&str> = items.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Westvleteren"]);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let map = table(&["Orval"]);

        let (items, total) = page_by_name(&map, |b| (b.name.as_str(), b.id.as_str()), 7, 10);
        assert!(items.is_empty());
        assert_eq!(total, 1);
    }
}
