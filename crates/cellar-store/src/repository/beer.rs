//! # Beer Repository
//!
//! Store operations for beers.
//!
//! ## Key Operations
//! - CRUD with version-guarded replace
//! - Paged listing sorted by name
//! - Foreign-key lookups for brewery and style detail reads
//!
//! ## Stock Writes
//! Replace and patch may set `stock` (restocking); the checkout
//! transaction is the only other writer. Both paths run under the tables'
//! exclusive write guard, so a checkout can never interleave with a
//! restock.
//!
//! Deleting a beer never cascades: cart lines and favorites that point at
//! it keep their ids and are resolved (or rejected) at use time.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use cellar_core::patch::BeerPatch;
use cellar_core::types::{Beer, BeerFields};

use crate::error::{StoreError, StoreResult};
use crate::repository::page_by_name;
use crate::tables::Tables;
use crate::version::check_and_bump;

/// Repository for beer store operations.
#[derive(Debug, Clone)]
pub struct BeerRepository {
    tables: Arc<RwLock<Tables>>,
}

impl BeerRepository {
    /// Creates a new BeerRepository.
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        BeerRepository { tables }
    }

    /// Gets a beer by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Beer))` - Beer found
    /// * `Ok(None)` - Beer not found
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Beer>> {
        let tables = self.tables.read().await;
        Ok(tables.beers.get(id).cloned())
    }

    /// Lists one page of beers sorted by name.
    ///
    /// ## Returns
    /// The page's beers and the total beer count.
    pub async fn list(&self, page: u32, page_size: u32) -> StoreResult<(Vec<Beer>, usize)> {
        debug!(page, page_size, "Listing beers");

        let tables = self.tables.read().await;
        Ok(page_by_name(
            &tables.beers,
            |beer| (beer.name.as_str(), beer.id.as_str()),
            page,
            page_size,
        ))
    }

    /// Beers referencing one brewery, sorted by name.
    pub async fn list_by_brewery(&self, brewery_id: &str) -> StoreResult<Vec<Beer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .beers_of_brewery(brewery_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Beers referencing one style, sorted by name.
    pub async fn list_by_style(&self, style_id: &str) -> StoreResult<Vec<Beer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .beers_of_style(style_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Inserts a new beer with a fresh id and token 0.
    ///
    /// Style and brewery references are stored as given: they are
    /// descriptive, and reads resolve them lazily.
    pub async fn insert(&self, fields: BeerFields) -> StoreResult<Beer> {
        let beer = Beer {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            style_id: fields.style_id,
            brewery_id: fields.brewery_id,
            picture: fields.picture,
            stock: fields.stock,
            version: 0,
        };

        debug!(id = %beer.id, name = %beer.name, stock = beer.stock, "Inserting beer");

        let mut tables = self.tables.write().await;
        tables.beers.insert(beer.id.clone(), beer.clone());

        Ok(beer)
    }

    /// Replaces every caller-supplied field, guarded by the version token.
    ///
    /// ## Returns
    /// * `Ok(new_token)` - Replaced; token advanced by 1
    /// * `Err(StoreError::NotFound)` - No such beer
    /// * `Err(StoreError::VersionConflict)` - Stale token; nothing changed
    pub async fn replace(&self, id: &str, fields: BeerFields, expected: u64) -> StoreResult<u64> {
        debug!(id = %id, expected, "Replacing beer");

        let mut tables = self.tables.write().await;
        let next = check_and_bump(&mut tables.beers, id, Some(expected), |beer| {
            beer.name = fields.name;
            beer.style_id = fields.style_id;
            beer.brewery_id = fields.brewery_id;
            beer.picture = fields.picture;
            beer.stock = fields.stock;
        })?;

        info!(id = %id, version = next, "Beer replaced");
        Ok(next)
    }

    /// Patches the supplied fields. No token check, but the token still
    /// advances: a patch is a write like any other.
    pub async fn patch(&self, id: &str, patch: &BeerPatch) -> StoreResult<u64> {
        debug!(id = %id, "Patching beer");

        let mut tables = self.tables.write().await;
        let next = check_and_bump(&mut tables.beers, id, None, |beer| {
            patch.apply_to(beer);
        })?;

        info!(id = %id, version = next, "Beer patched");
        Ok(next)
    }

    /// Deletes a beer and returns its last state.
    pub async fn delete(&self, id: &str) -> StoreResult<Beer> {
        let mut tables = self.tables.write().await;
        let beer = tables
            .beers
            .remove(id)
            .ok_or_else(|| StoreError::not_found("Beer", id))?;

        info!(id = %id, name = %beer.name, "Beer deleted");
        Ok(beer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
