//! # Brewery Repository
//!
//! Store operations for breweries. Deleting a brewery leaves referencing
//! beers in place; their `brewery_id` dangles and detail reads resolve it
//! to "absent".

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use cellar_core::patch::BreweryPatch;
use cellar_core::types::{Brewery, BreweryFields};

use crate::error::{StoreError, StoreResult};
use crate::repository::page_by_name;
use crate::tables::Tables;
use crate::version::check_and_bump;

/// Repository for brewery store operations.
#[derive(Debug, Clone)]
pub struct BreweryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl BreweryRepository {
    /// Creates a new BreweryRepository.
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        BreweryRepository { tables }
    }

    /// Gets a brewery by its ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Brewery>> {
        let tables = self.tables.read().await;
        Ok(tables.breweries.get(id).cloned())
    }

    /// Lists one page of breweries sorted by name.
    pub async fn list(&self, page: u32, page_size: u32) -> StoreResult<(Vec<Brewery>, usize)> {
        debug!(page, page_size, "Listing breweries");

        let tables = self.tables.read().await;
        Ok(page_by_name(
            &tables.breweries,
            |brewery| (brewery.name.as_str(), brewery.id.as_str()),
            page,
            page_size,
        ))
    }

    /// Inserts a new brewery with a fresh id and token 0.
    pub async fn insert(&self, fields: BreweryFields) -> StoreResult<Brewery> {
        let brewery = Brewery {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            version: 0,
        };

        debug!(id = %brewery.id, name = %brewery.name, "Inserting brewery");

        let mut tables = self.tables.write().await;
        tables.breweries.insert(brewery.id.clone(), brewery.clone());

        Ok(brewery)
    }

    /// Replaces every caller-supplied field, guarded by the version token.
    pub async fn replace(
        &self,
        id: &str,
        fields: BreweryFields,
        expected: u64,
    ) -> StoreResult<u64> {
        debug!(id = %id, expected, "Replacing brewery");

        let mut tables = self.tables.write().await;
        let next = check_and_bump(&mut tables.breweries, id, Some(expected), |brewery| {
            brewery.name = fields.name;
        })?;

        info!(id = %id, version = next, "Brewery replaced");
        Ok(next)
    }

    /// Patches the supplied fields without a token check.
    pub async fn patch(&self, id: &str, patch: &BreweryPatch) -> StoreResult<u64> {
        debug!(id = %id, "Patching brewery");

        let mut tables = self.tables.write().await;
        let next = check_and_bump(&mut tables.breweries, id, None, |brewery| {
            patch.apply_to(brewery);
        })?;

        info!(id = %id, version = next, "Brewery patched");
        Ok(next)
    }

    /// Deletes a brewery and returns its last state. No cascade.
    pub async fn delete(&self, id: &str) -> StoreResult<Brewery> {
        let mut tables = self.tables.write().await;
        let brewery = tables
            .breweries
            .remove(id)
            .ok_or_else(|| StoreError::not_found("Brewery", id))?;

        info!(id = %id, name = %brewery.name, "Brewery deleted");
        Ok(brewery)
    }
}
