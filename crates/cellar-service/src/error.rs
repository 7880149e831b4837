//! # Service Error Type
//!
//! Unified error type for service operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in Cellar                               │
//! │                                                                         │
//! │  Transport Layer             Service Layer                              │
//! │  ───────────────             ─────────────                              │
//! │                                                                         │
//! │  replace_beer(id, fields, 3)                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Function                                                │  │
//! │  │  ShopResult<T>                                                   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Input invalid? ─── ValidationError::Required ──────┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  Store rejection? ── StoreError::VersionConflict ─ ShopError ──► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  { "code": "CONFLICT",                                                  │
//! │    "message": "Version conflict on Beer b-1: expected 3, current 4" }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Errors serialize to JSON so a transport layer can hand them to
//! clients unchanged. Conflict messages carry the current version,
//! sequence, or stock figure the caller needs to refresh and retry.

use serde::Serialize;

use cellar_core::ValidationError;
use cellar_store::StoreError;

/// Error returned from service operations.
///
/// ## Serialization
/// What a transport layer forwards when an operation fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Beer not found: 3f2a..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for service responses.
///
/// The transport layer maps these onto its own status scheme, e.g.
/// NOT_FOUND to 404, CONFLICT to 409, INVALID_INPUT to 400.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced entity absent
    NotFound,

    /// Version mismatch, stale order sequence, or insufficient stock.
    /// The caller should refresh the conflicting state and retry.
    Conflict,

    /// The payload failed validation or the cart is at its line limit
    InvalidInput,

    /// Store failure, fatal to the in-flight request
    Internal,
}

impl ShopError {
    /// Creates a new service error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ShopError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ShopError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ShopError::new(ErrorCode::Conflict, message)
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ShopError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ShopError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to service errors.
impl From<StoreError> for ShopError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ShopError::not_found(&entity, &id),
            StoreError::VersionConflict {
                entity,
                id,
                expected,
                current,
            } => ShopError::conflict(format!(
                "Version conflict on {} {}: expected {}, current {}",
                entity, id, expected, current
            )),
            StoreError::StaleOrderSequence {
                cart_id,
                submitted,
                current,
            } => ShopError::conflict(format!(
                "Order sequence for cart {} has moved on: submitted {}, current {}",
                cart_id, submitted, current
            )),
            StoreError::InsufficientStock {
                beer_id,
                available,
                requested,
            } => ShopError::conflict(format!(
                "Insufficient stock for beer {}: available {}, requested {}",
                beer_id, available, requested
            )),
            StoreError::EmptyCart { cart_id } => ShopError::new(
                ErrorCode::NotFound,
                format!("Cart {} has no lines to order", cart_id),
            ),
            StoreError::CartTooLarge { max } => ShopError::invalid_input(format!(
                "Cart cannot have more than {} lines",
                max
            )),
            StoreError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Store operation failed: {}", e);
                ShopError::internal("Store operation failed")
            }
        }
    }
}

/// Converts validation errors to service errors.
impl From<ValidationError> for ShopError {
    fn from(err: ValidationError) -> Self {
        ShopError::invalid_input(err.to_string())
    }
}

impl std::fmt::Display for ShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ShopError {}

/// Result type for service operations.
pub type ShopResult<T> = Result<T, ShopError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_codes() {
        let err = ShopError::from(StoreError::not_found("Beer", "b-1"));
        assert!(matches!(err.code, ErrorCode::NotFound));

        let err = ShopError::from(StoreError::VersionConflict {
            entity: "Beer".to_string(),
            id: "b-1".to_string(),
            expected: 3,
            current: 4,
        });
        assert!(matches!(err.code, ErrorCode::Conflict));
        assert!(err.message.contains("expected 3"));
        assert!(err.message.contains("current 4"));

        let err = ShopError::from(StoreError::StaleOrderSequence {
            cart_id: "c-1".to_string(),
            submitted: 0,
            current: 1,
        });
        assert!(matches!(err.code, ErrorCode::Conflict));

        let err = ShopError::from(StoreError::InsufficientStock {
            beer_id: "b-1".to_string(),
            available: 1,
            requested: 5,
        });
        assert!(matches!(err.code, ErrorCode::Conflict));
        assert!(err.message.contains("available 1"));
    }

    #[test]
    fn test_empty_cart_reads_as_not_found() {
        let err = ShopError::from(StoreError::EmptyCart {
            cart_id: "c-1".to_string(),
        });
        assert!(matches!(err.code, ErrorCode::NotFound));
    }

    #[test]
    fn test_oversized_cart_reads_as_invalid_input() {
        let err = ShopError::from(StoreError::CartTooLarge { max: 100 });
        assert!(matches!(err.code, ErrorCode::InvalidInput));
    }

    #[test]
    fn test_validation_errors_read_as_invalid_input() {
        let err = ShopError::from(ValidationError::Required {
            field: "name".to_string(),
        });
        assert!(matches!(err.code, ErrorCode::InvalidInput));
    }

    #[test]
    fn test_serialized_shape() {
        let err = ShopError::not_found("Beer", "b-1");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Beer not found: b-1");
    }
}
