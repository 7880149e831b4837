//! # Partial-Update Payloads
//!
//! One patch struct per updatable entity. Every field is an `Option`:
//! `Some(value)` means "set this field to value", `None` means "leave it
//! alone". Presence is explicit, so an empty string is a value like any
//! other and can never be mistaken for "skip this field".
//!
//! A patch cannot clear an optional reference (there is no way to say
//! "set style_id to nothing"); a full replace can.

use serde::{Deserialize, Serialize};

use crate::types::{Beer, Brewery, Style, User};

/// Partial update for a [`Beer`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeerPatch {
    pub name: Option<String>,
    pub style_id: Option<String>,
    pub brewery_id: Option<String>,
    pub picture: Option<String>,
    pub stock: Option<u32>,
}

impl BeerPatch {
    /// Copies every supplied field onto `beer`. Absent fields are untouched.
    pub fn apply_to(&self, beer: &mut Beer) {
        if let Some(name) = &self.name {
            beer.name = name.clone();
        }
        if let Some(style_id) = &self.style_id {
            beer.style_id = Some(style_id.clone());
        }
        if let Some(brewery_id) = &self.brewery_id {
            beer.brewery_id = Some(brewery_id.clone());
        }
        if let Some(picture) = &self.picture {
            beer.picture = Some(picture.clone());
        }
        if let Some(stock) = self.stock {
            beer.stock = stock;
        }
    }
}

/// Partial update for a [`Brewery`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreweryPatch {
    pub name: Option<String>,
}

impl BreweryPatch {
    pub fn apply_to(&self, brewery: &mut Brewery) {
        if let Some(name) = &self.name {
            brewery.name = name.clone();
        }
    }
}

/// Partial update for a [`Style`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylePatch {
    pub name: Option<String>,
    pub optimal_temperature: Option<i32>,
}

impl StylePatch {
    pub fn apply_to(&self, style: &mut Style) {
        if let Some(name) = &self.name {
            style.name = name.clone();
        }
        if let Some(temperature) = self.optimal_temperature {
            style.optimal_temperature = temperature;
        }
    }
}

/// Partial update for a [`User`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
}

impl UserPatch {
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_beer() -> Beer {
        Beer {
            id: "8a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d".to_string(),
            name: "Old Bridge Porter".to_string(),
            style_id: Some("11111111-1111-4111-8111-111111111111".to_string()),
            brewery_id: None,
            picture: None,
            stock: 24,
            version: 3,
        }
    }

    #[test]
    fn test_absent_fields_leave_entity_untouched() {
        let mut beer = sample_beer();
        BeerPatch::default().apply_to(&mut beer);

        assert_eq!(beer.name, "Old Bridge Porter");
        assert_eq!(
            beer.style_id.as_deref(),
            Some("11111111-1111-4111-8111-111111111111")
        );
        assert_eq!(beer.stock, 24);
        // The version token is the store's job, never the patch's
        assert_eq!(beer.version, 3);
    }

    #[test]
    fn test_supplied_fields_overwrite() {
        let mut beer = sample_beer();
        let patch = BeerPatch {
            name: Some("New Bridge Porter".to_string()),
            stock: Some(0),
            ..Default::default()
        };
        patch.apply_to(&mut beer);

        assert_eq!(beer.name, "New Bridge Porter");
        assert_eq!(beer.stock, 0);
        assert!(beer.style_id.is_some());
    }

    #[test]
    fn test_patch_deserializes_missing_fields_as_absent() {
        let patch: BeerPatch = serde_json::from_str(r#"{"stock": 9}"#).unwrap();
        assert_eq!(patch.stock, Some(9));
        assert!(patch.name.is_none());
        assert!(patch.picture.is_none());
    }

    #[test]
    fn test_style_patch_updates_temperature() {
        let mut style = Style {
            id: "22222222-2222-4222-8222-222222222222".to_string(),
            name: "Doppelbock".to_string(),
            optimal_temperature: 9,
            version: 1,
        };
        let patch = StylePatch {
            optimal_temperature: Some(7),
            ..Default::default()
        };
        patch.apply_to(&mut style);

        assert_eq!(style.optimal_temperature, 7);
        assert_eq!(style.name, "Doppelbock");
    }
}
