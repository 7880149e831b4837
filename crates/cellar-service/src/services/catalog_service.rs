//! # Catalog Service
//!
//! Reads and version-guarded writes for the four catalog kinds.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Operations per Kind                          │
//! │                                                                         │
//! │  list_*    ──► clamp paging ──► store list ──► Page<Summary>           │
//! │  get_*     ──► store get ──► resolve references ──► Detail             │
//! │  create_*  ──► validate fields ──► store insert ──► Detail             │
//! │  replace_* ──► validate fields ──► token-guarded commit ──► new token  │
//! │  patch_*   ──► validate supplied fields ──► unguarded commit           │
//! │  delete_*  ──► store delete ──► Summary snapshot                       │
//! │                                                                         │
//! │  Version rules: replace requires the caller's expected token and       │
//! │  conflicts on mismatch; patch never checks a token; both advance       │
//! │  the stored token by exactly 1.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reference Resolution
//! A beer's style/brewery ids and a brewery's beer list are resolved at
//! read time. A reference whose target was deleted resolves to nothing;
//! it is never an error and never repaired in the store.

use tracing::debug;

use cellar_core::patch::{BeerPatch, BreweryPatch, StylePatch, UserPatch};
use cellar_core::types::{Beer, BeerFields, BreweryFields, StyleFields, UserFields};
use cellar_core::validation::{
    validate_beer_fields, validate_beer_patch, validate_brewery_fields, validate_brewery_patch,
    validate_style_fields, validate_style_patch, validate_user_fields, validate_user_patch,
};
use cellar_store::Store;

use crate::dto::{
    BeerDetail, BeerSummary, BreweryDetail, BrewerySummary, NamedRef, Page, PagingMetadata,
    StyleDetail, StyleSummary, UserDetail, UserSummary,
};
use crate::error::{ShopError, ShopResult};

/// Catalog operations over beers, breweries, styles, and users.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Store,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(store: Store) -> Self {
        CatalogService { store }
    }

    /// Clamps caller paging to the configured bounds. Absent values
    /// fall back to defaults; out-of-range values are clamped, not
    /// rejected.
    fn paging(&self, page: Option<u32>, page_size: Option<u32>) -> (u32, u32) {
        let config = self.store.config();
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size);
        (page, page_size)
    }

    // =========================================================================
    // Beers
    // =========================================================================

    /// Lists one page of beers.
    pub async fn list_beers(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ShopResult<Page<BeerSummary>> {
        let (page, page_size) = self.paging(page, page_size);
        debug!(page, page_size, "list_beers");

        let (beers, total) = self.store.beers().list(page, page_size).await?;
        Ok(Page {
            items: beers.into_iter().map(BeerSummary::from).collect(),
            paging: PagingMetadata::new(page, page_size, total),
        })
    }

    /// Gets a beer with its style and brewery resolved.
    pub async fn get_beer(&self, id: &str) -> ShopResult<BeerDetail> {
        debug!(id = %id, "get_beer");

        let beer = self
            .store
            .beers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ShopError::not_found("Beer", id))?;
        self.resolve_beer(beer).await
    }

    /// Creates a beer. References are stored as supplied; they are
    /// resolved at read time, not verified here.
    pub async fn create_beer(&self, fields: BeerFields) -> ShopResult<BeerDetail> {
        validate_beer_fields(&fields)?;

        let beer = self.store.beers().insert(fields).await?;
        self.resolve_beer(beer).await
    }

    /// Replaces every field of a beer, guarded by the version token.
    /// Returns the new token for chaining further edits.
    pub async fn replace_beer(
        &self,
        id: &str,
        fields: BeerFields,
        expected_version: u64,
    ) -> ShopResult<u64> {
        validate_beer_fields(&fields)?;

        Ok(self.store.beers().replace(id, fields, expected_version).await?)
    }

    /// Patches the supplied fields of a beer. No token required.
    pub async fn patch_beer(&self, id: &str, patch: BeerPatch) -> ShopResult<()> {
        validate_beer_patch(&patch)?;

        self.store.beers().patch(id, &patch).await?;
        Ok(())
    }

    /// Deletes a beer. Cart lines and favorites pointing at it are left
    /// in place as dangling references.
    pub async fn delete_beer(&self, id: &str) -> ShopResult<BeerSummary> {
        let beer = self.store.beers().delete(id).await?;
        Ok(BeerSummary::from(beer))
    }

    async fn resolve_beer(&self, beer: Beer) -> ShopResult<BeerDetail> {
        let style = match beer.style_id.as_deref() {
            Some(style_id) => self
                .store
                .styles()
                .get_by_id(style_id)
                .await?
                .map(NamedRef::from),
            None => None,
        };
        let brewery = match beer.brewery_id.as_deref() {
            Some(brewery_id) => self
                .store
                .breweries()
                .get_by_id(brewery_id)
                .await?
                .map(NamedRef::from),
            None => None,
        };

        Ok(BeerDetail {
            id: beer.id,
            name: beer.name,
            style,
            brewery,
            picture: beer.picture,
            stock: beer.stock,
            version: beer.version,
        })
    }

    // =========================================================================
    // Breweries
    // =========================================================================

    /// Lists one page of breweries.
    pub async fn list_breweries(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ShopResult<Page<BrewerySummary>> {
        let (page, page_size) = self.paging(page, page_size);
        debug!(page, page_size, "list_breweries");

        let (breweries, total) = self.store.breweries().list(page, page_size).await?;
        Ok(Page {
            items: breweries.into_iter().map(BrewerySummary::from).collect(),
            paging: PagingMetadata::new(page, page_size, total),
        })
    }

    /// Gets a brewery with the names of the beers it brews.
    pub async fn get_brewery(&self, id: &str) -> ShopResult<BreweryDetail> {
        debug!(id = %id, "get_brewery");

        let brewery = self
            .store
            .breweries()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ShopError::not_found("Brewery", id))?;
        let beers = self.store.beers().list_by_brewery(&brewery.id).await?;

        Ok(BreweryDetail {
            id: brewery.id,
            name: brewery.name,
            beers: beers.into_iter().map(|beer| beer.name).collect(),
            version: brewery.version,
        })
    }

    /// Creates a brewery.
    pub async fn create_brewery(&self, fields: BreweryFields) -> ShopResult<BreweryDetail> {
        validate_brewery_fields(&fields)?;

        let brewery = self.store.breweries().insert(fields).await?;
        Ok(BreweryDetail {
            id: brewery.id,
            name: brewery.name,
            beers: Vec::new(),
            version: brewery.version,
        })
    }

    /// Replaces every field of a brewery, guarded by the version token.
    pub async fn replace_brewery(
        &self,
        id: &str,
        fields: BreweryFields,
        expected_version: u64,
    ) -> ShopResult<u64> {
        validate_brewery_fields(&fields)?;

        Ok(self
            .store
            .breweries()
            .replace(id, fields, expected_version)
            .await?)
    }

    /// Patches the supplied fields of a brewery. No token required.
    pub async fn patch_brewery(&self, id: &str, patch: BreweryPatch) -> ShopResult<()> {
        validate_brewery_patch(&patch)?;

        self.store.breweries().patch(id, &patch).await?;
        Ok(())
    }

    /// Deletes a brewery. Beers keep their brewery id as a dangling
    /// reference.
    pub async fn delete_brewery(&self, id: &str) -> ShopResult<BrewerySummary> {
        let brewery = self.store.breweries().delete(id).await?;
        Ok(BrewerySummary::from(brewery))
    }

    // =========================================================================
    // Styles
    // =========================================================================

    /// Lists one page of styles.
    pub async fn list_styles(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ShopResult<Page<StyleSummary>> {
        let (page, page_size) = self.paging(page, page_size);
        debug!(page, page_size, "list_styles");

        let (styles, total) = self.store.styles().list(page, page_size).await?;
        Ok(Page {
            items: styles.into_iter().map(StyleSummary::from).collect(),
            paging: PagingMetadata::new(page, page_size, total),
        })
    }

    /// Gets a style with the names of the beers brewed in it.
    pub async fn get_style(&self, id: &str) -> ShopResult<StyleDetail> {
        debug!(id = %id, "get_style");

        let style = self
            .store
            .styles()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ShopError::not_found("Style", id))?;
        let beers = self.store.beers().list_by_style(&style.id).await?;

        Ok(StyleDetail {
            id: style.id,
            name: style.name,
            optimal_temperature: style.optimal_temperature,
            beers: beers.into_iter().map(|beer| beer.name).collect(),
            version: style.version,
        })
    }

    /// Creates a style.
    pub async fn create_style(&self, fields: StyleFields) -> ShopResult<StyleDetail> {
        validate_style_fields(&fields)?;

        let style = self.store.styles().insert(fields).await?;
        Ok(StyleDetail {
            id: style.id,
            name: style.name,
            optimal_temperature: style.optimal_temperature,
            beers: Vec::new(),
            version: style.version,
        })
    }

    /// Replaces every field of a style, guarded by the version token.
    pub async fn replace_style(
        &self,
        id: &str,
        fields: StyleFields,
        expected_version: u64,
    ) -> ShopResult<u64> {
        validate_style_fields(&fields)?;

        Ok(self
            .store
            .styles()
            .replace(id, fields, expected_version)
            .await?)
    }

    /// Patches the supplied fields of a style. No token required.
    pub async fn patch_style(&self, id: &str, patch: StylePatch) -> ShopResult<()> {
        validate_style_patch(&patch)?;

        self.store.styles().patch(id, &patch).await?;
        Ok(())
    }

    /// Deletes a style. Beers keep their style id as a dangling
    /// reference.
    pub async fn delete_style(&self, id: &str) -> ShopResult<StyleSummary> {
        let style = self.store.styles().delete(id).await?;
        Ok(StyleSummary::from(style))
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Lists one page of users.
    pub async fn list_users(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ShopResult<Page<UserSummary>> {
        let (page, page_size) = self.paging(page, page_size);
        debug!(page, page_size, "list_users");

        let (users, total) = self.store.users().list(page, page_size).await?;
        Ok(Page {
            items: users.into_iter().map(UserSummary::from).collect(),
            paging: PagingMetadata::new(page, page_size, total),
        })
    }

    /// Gets a user.
    pub async fn get_user(&self, id: &str) -> ShopResult<UserDetail> {
        debug!(id = %id, "get_user");

        let user = self
            .store
            .users()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ShopError::not_found("User", id))?;
        Ok(UserDetail::from(user))
    }

    /// Creates a user together with its empty cart.
    pub async fn create_user(&self, fields: UserFields) -> ShopResult<UserDetail> {
        validate_user_fields(&fields)?;

        let user = self.store.users().insert(fields).await?;
        Ok(UserDetail::from(user))
    }

    /// Replaces every field of a user, guarded by the version token.
    pub async fn replace_user(
        &self,
        id: &str,
        fields: UserFields,
        expected_version: u64,
    ) -> ShopResult<u64> {
        validate_user_fields(&fields)?;

        Ok(self
            .store
            .users()
            .replace(id, fields, expected_version)
            .await?)
    }

    /// Patches the supplied fields of a user. No token required.
    pub async fn patch_user(&self, id: &str, patch: UserPatch) -> ShopResult<()> {
        validate_user_patch(&patch)?;

        self.store.users().patch(id, &patch).await?;
        Ok(())
    }

    /// Deletes a user together with its cart, the cart's lines, and its
    /// favorites.
    pub async fn delete_user(&self, id: &str) -> ShopResult<UserSummary> {
        let user = self.store.users().delete(id).await?;
        Ok(UserSummary::from(user))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use cellar_store::{Store, StoreConfig};

    fn service() -> CatalogService {
        CatalogService::new(Store::default())
    }

    fn beer_fields(name: &str, stock: u32) -> BeerFields {
        BeerFields {
            name: name.to_string(),
            style_id: None,
            brewery_id: None,
            picture: None,
            stock,
        }
    }

    #[tokio::test]
    async fn test_paging_is_clamped_not_rejected() {
        let catalog = CatalogService::new(Store::new(
            StoreConfig::new().default_page_size(2).max_page_size(3),
        ));
        for name in ["Orval", "Rochefort 8", "Rochefort 10", "Westmalle Dubbel"] {
            catalog.create_beer(beer_fields(name, 1)).await.unwrap();
        }

        // Absent paging uses defaults
        let page = catalog.list_beers(None, None).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.paging.page, 1);
        assert_eq!(page.paging.total_items, 4);
        assert_eq!(page.paging.total_pages, 2);

        // Oversized page_size clamps to the ceiling, page 0 to page 1
        let page = catalog.list_beers(Some(0), Some(10_000)).await.unwrap();
        assert_eq!(page.paging.page, 1);
        assert_eq!(page.paging.page_size, 3);
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn test_replace_chain_advances_token_by_one_each() {
        let catalog = service();
        let beer = catalog.create_beer(beer_fields("Orval", 9)).await.unwrap();
        assert_eq!(beer.version, 0);

        let mut token = beer.version;
        for stock in [8, 7, 6] {
            token = catalog
                .replace_beer(&beer.id, beer_fields("Orval", stock), token)
                .await
                .unwrap();
        }
        assert_eq!(token, 3);

        // A token from an old read conflicts and changes nothing
        let err = catalog
            .replace_beer(&beer.id, beer_fields("Orval", 99), 1)
            .await
            .unwrap_err();
        assert!(matches!(err.code, ErrorCode::Conflict));
        assert_eq!(catalog.get_beer(&beer.id).await.unwrap().stock, 6);
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_the_store() {
        let catalog = service();

        let err = catalog.create_beer(beer_fields("", 5)).await.unwrap_err();
        assert!(matches!(err.code, ErrorCode::InvalidInput));

        let mut fields = beer_fields("Orval", 5);
        fields.style_id = Some("not-a-uuid".to_string());
        let err = catalog.create_beer(fields).await.unwrap_err();
        assert!(matches!(err.code, ErrorCode::InvalidInput));

        let page = catalog.list_beers(None, None).await.unwrap();
        assert_eq!(page.paging.total_items, 0);
    }

    #[tokio::test]
    async fn test_patch_changes_only_supplied_fields() {
        let catalog = service();
        let style = catalog
            .create_style(StyleFields {
                name: "Saison".to_string(),
                optimal_temperature: 7,
            })
            .await
            .unwrap();

        catalog
            .patch_style(
                &style.id,
                StylePatch {
                    optimal_temperature: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let detail = catalog.get_style(&style.id).await.unwrap();
        assert_eq!(detail.name, "Saison");
        assert_eq!(detail.optimal_temperature, 9);
        assert_eq!(detail.version, 1);

        // A supplied empty name is invalid input, not "leave unchanged"
        let err = catalog
            .patch_style(
                &style.id,
                StylePatch {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err.code, ErrorCode::InvalidInput));
    }

    #[tokio::test]
    async fn test_detail_reads_resolve_references_lazily() {
        let catalog = service();
        let brewery = catalog
            .create_brewery(BreweryFields {
                name: "Brasserie d'Orval".to_string(),
            })
            .await
            .unwrap();
        let style = catalog
            .create_style(StyleFields {
                name: "Trappist".to_string(),
                optimal_temperature: 12,
            })
            .await
            .unwrap();

        let mut fields = beer_fields("Orval", 12);
        fields.brewery_id = Some(brewery.id.clone());
        fields.style_id = Some(style.id.clone());
        let beer = catalog.create_beer(fields).await.unwrap();

        assert_eq!(beer.brewery.as_ref().unwrap().name, "Brasserie d'Orval");
        assert_eq!(beer.style.as_ref().unwrap().name, "Trappist");

        let detail = catalog.get_brewery(&brewery.id).await.unwrap();
        assert_eq!(detail.beers, vec!["Orval".to_string()]);

        // Deleting the style leaves the beer's reference dangling;
        // reads resolve it to nothing instead of failing.
        catalog.delete_style(&style.id).await.unwrap();
        let beer = catalog.get_beer(&beer.id).await.unwrap();
        assert!(beer.style.is_none());
        assert_eq!(beer.brewery.as_ref().unwrap().name, "Brasserie d'Orval");
    }

    #[tokio::test]
    async fn test_delete_returns_snapshot_then_not_found() {
        let catalog = service();
        let beer = catalog.create_beer(beer_fields("Orval", 7)).await.unwrap();

        let snapshot = catalog.delete_beer(&beer.id).await.unwrap();
        assert_eq!(snapshot.name, "Orval");
        assert_eq!(snapshot.stock, 7);

        let err = catalog.get_beer(&beer.id).await.unwrap_err();
        assert!(matches!(err.code, ErrorCode::NotFound));
        let err = catalog.delete_beer(&beer.id).await.unwrap_err();
        assert!(matches!(err.code, ErrorCode::NotFound));
    }
}
