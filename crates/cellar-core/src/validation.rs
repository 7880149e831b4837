//! # Validation Module
//!
//! Input validation rules for Cellar.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Surface (cellar-service)                                     │
//! │  ├── Shape validation (deserialization)                                │
//! │  └── THIS MODULE: field rules, run before any store call               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store (cellar-store)                                         │
//! │  ├── Existence checks (missing entity → NotFound)                      │
//! │  ├── Version guard (stale token → Conflict)                            │
//! │  └── Transaction preconditions (stock, sequence)                       │
//! │                                                                         │
//! │  Defense in depth: each layer rejects what the previous can't see      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cellar_core::validation::{validate_name, validate_count};
//!
//! // Validate a name before creating an entity
//! validate_name("Pilsner Urquell").unwrap();
//!
//! // Validate a line count before a cart operation
//! validate_count(5, 999).unwrap();
//! ```

use crate::error::ValidationError;
use crate::patch::{BeerPatch, BreweryPatch, StylePatch, UserPatch};
use crate::types::{BeerFields, BreweryFields, StyleFields, UserFields};
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an entity name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use cellar_core::validation::validate_name;
///
/// assert!(validate_name("Westmalle Tripel").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name(&"A".repeat(300)).is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a cart line count against the configured ceiling.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max`
pub fn validate_count(count: u32, max: u32) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::MustBePositive {
            field: "count".to_string(),
        });
    }

    if count > max {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 1,
            max: i64::from(max),
        });
    }

    Ok(())
}

/// Validates an identifier string format.
///
/// ## Rules
/// - Must not be empty
/// - Must be a valid UUID: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use cellar_core::validation::validate_id;
///
/// assert!(validate_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_id("not-an-id").is_err());
/// ```
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a full beer payload (create or replace).
pub fn validate_beer_fields(fields: &BeerFields) -> ValidationResult<()> {
    validate_name(&fields.name)?;

    if let Some(style_id) = &fields.style_id {
        validate_id(style_id)?;
    }
    if let Some(brewery_id) = &fields.brewery_id {
        validate_id(brewery_id)?;
    }

    Ok(())
}

/// Validates a full brewery payload (create or replace).
pub fn validate_brewery_fields(fields: &BreweryFields) -> ValidationResult<()> {
    validate_name(&fields.name)
}

/// Validates a full style payload (create or replace).
pub fn validate_style_fields(fields: &StyleFields) -> ValidationResult<()> {
    validate_name(&fields.name)
}

/// Validates a full user payload (create or replace).
pub fn validate_user_fields(fields: &UserFields) -> ValidationResult<()> {
    validate_name(&fields.name)
}

// =============================================================================
// Patch Validators
// =============================================================================
// Only supplied fields are checked. An absent field is always valid;
// a supplied field follows the same rules as in a full payload.

/// Validates the supplied fields of a beer patch.
pub fn validate_beer_patch(patch: &BeerPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(style_id) = &patch.style_id {
        validate_id(style_id)?;
    }
    if let Some(brewery_id) = &patch.brewery_id {
        validate_id(brewery_id)?;
    }

    Ok(())
}

/// Validates the supplied fields of a brewery patch.
pub fn validate_brewery_patch(patch: &BreweryPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }

    Ok(())
}

/// Validates the supplied fields of a style patch.
pub fn validate_style_patch(patch: &StylePatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }

    Ok(())
}

/// Validates the supplied fields of a user patch.
pub fn validate_user_patch(patch: &UserPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Rochefort 10").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(validate_count(1, 999).is_ok());
        assert!(validate_count(999, 999).is_ok());

        assert!(validate_count(0, 999).is_err());
        assert!(validate_count(1000, 999).is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("not-an-id").is_err());
        assert!(validate_id("123").is_err());
    }

    #[test]
    fn test_validate_beer_fields() {
        let mut fields = BeerFields {
            name: "Gueuze".to_string(),
            style_id: None,
            brewery_id: None,
            picture: None,
            stock: 0,
        };
        assert!(validate_beer_fields(&fields).is_ok());

        fields.style_id = Some("garbage".to_string());
        assert!(validate_beer_fields(&fields).is_err());

        fields.style_id = Some("550e8400-e29b-41d4-a716-446655440000".to_string());
        fields.name = String::new();
        assert!(validate_beer_fields(&fields).is_err());
    }

    #[test]
    fn test_patch_with_empty_name_is_rejected() {
        // A supplied empty string is an error, never "leave unchanged"
        let patch = BeerPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_beer_patch(&patch).is_err());

        let patch = BeerPatch::default();
        assert!(validate_beer_patch(&patch).is_ok());
    }
}
