//! # Style Repository
//!
//! Store operations for beer styles. Same shape as breweries: no cascade
//! on delete, references resolve lazily.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use cellar_core::patch::StylePatch;
use cellar_core::types::{Style, StyleFields};

use crate::error::{StoreError, StoreResult};
use crate::repository::page_by_name;
use crate::tables::Tables;
use crate::version::check_and_bump;

/// Repository for style store operations.
#[derive(Debug, Clone)]
pub struct StyleRepository {
    tables: Arc<RwLock<Tables>>,
}

impl StyleRepository {
    /// Creates a new StyleRepository.
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        StyleRepository { tables }
    }

    /// Gets a style by its ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Style>> {
        let tables = self.tables.read().await;
        Ok(tables.styles.get(id).cloned())
    }

    /// Lists one page of styles sorted by name.
    pub async fn list(&self, page: u32, page_size: u32) -> StoreResult<(Vec<Style>, usize)> {
        debug!(page, page_size, "Listing styles");

        let tables = self.tables.read().await;
        Ok(page_by_name(
            &tables.styles,
            |style| (style.name.as_str(), style.id.as_str()),
            page,
            page_size,
        ))
    }

    /// Inserts a new style with a fresh id and token 0.
    pub async fn insert(&self, fields: StyleFields) -> StoreResult<Style> {
        let style = Style {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            optimal_temperature: fields.optimal_temperature,
            version: 0,
        };

        debug!(
            id = %style.id,
            name = %style.name,
            optimal_temperature = style.optimal_temperature,
            "Inserting style"
        );

        let mut tables = self.tables.write().await;
        tables.styles.insert(style.id.clone(), style.clone());

        Ok(style)
    }

    /// Replaces every caller-supplied field, guarded by the version token.
    pub async fn replace(&self, id: &str, fields: StyleFields, expected: u64) -> StoreResult<u64> {
        debug!(id = %id, expected, "Replacing style");

        let mut tables = self.tables.write().await;
        let next = check_and_bump(&mut tables.styles, id, Some(expected), |style| {
            style.name = fields.name;
            style.optimal_temperature = fields.optimal_temperature;
        })?;

        info!(id = %id, version = next, "Style replaced");
        Ok(next)
    }

    /// Patches the supplied fields without a token check.
    pub async fn patch(&self, id: &str, patch: &StylePatch) -> StoreResult<u64> {
        debug!(id = %id, "Patching style");

        let mut tables = self.tables.write().await;
        let next = check_and_bump(&mut tables.styles, id, None, |style| {
            patch.apply_to(style);
        })?;

        info!(id = %id, version = next, "Style patched");
        Ok(next)
    }

    /// Deletes a style and returns its last state. No cascade.
    pub async fn delete(&self, id: &str) -> StoreResult<Style> {
        let mut tables = self.tables.write().await;
        let style = tables
            .styles
            .remove(id)
            .ok_or_else(|| StoreError::not_found("Style", id))?;

        info!(id = %id, name = %style.name, "Style deleted");
        Ok(style)
    }
}
