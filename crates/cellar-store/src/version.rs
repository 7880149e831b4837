//! # Version Guard
//!
//! The optimistic-concurrency commit primitive for versioned entities.
//!
//! ## How a Guarded Write Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     check_and_bump(table, id, expected)                 │
//! │                                                                         │
//! │  Caller already holds the tables' write guard                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Entity in table?  ──no──► NotFound                                    │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  expected token supplied and ≠ stored?  ──yes──► VersionConflict       │
//! │       │ no                                       (nothing mutated)      │
//! │       ▼                                                                 │
//! │  apply caller's changes                                                │
//! │  bump token by exactly 1                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  return the new token                                                  │
//! │                                                                         │
//! │  Check, mutation, and bump are one step: the write guard is held       │
//! │  across all three, so no other caller can observe or interleave        │
//! │  a half-applied write.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An absent expected token skips the check (for callers that do not carry
//! concurrency protection, such as partial updates) but still bumps: every
//! successful write advances the token by exactly 1.

use std::collections::HashMap;

use cellar_core::types::Versioned;

use crate::error::{StoreError, StoreResult};

/// Applies a write to one versioned entity under the caller's guard.
///
/// ## Arguments
/// * `table` - The entity table, borrowed from a held write guard
/// * `id` - Target entity id
/// * `expected` - The token the caller believes is current, or `None`
///   to write unconditionally
/// * `apply` - The caller's field changes
///
/// ## Returns
/// * `Ok(new_token)` - Changes applied, token advanced by 1
/// * `Err(StoreError::NotFound)` - No such entity
/// * `Err(StoreError::VersionConflict)` - Stale token; nothing mutated
pub fn check_and_bump<T, F>(
    table: &mut HashMap<String, T>,
    id: &str,
    expected: Option<u64>,
    apply: F,
) -> StoreResult<u64>
where
    T: Versioned,
    F: FnOnce(&mut T),
{
    let entity = table
        .get_mut(id)
        .ok_or_else(|| StoreError::not_found(T::KIND, id))?;

    let current = entity.version();
    if let Some(expected) = expected {
        if expected != current {
            return Err(StoreError::VersionConflict {
                entity: T::KIND.to_string(),
                id: id.to_string(),
                expected,
                current,
            });
        }
    }

    apply(entity);
    let next = current + 1;
    entity.set_version(next);
    Ok(next)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cellar_core::types::Brewery;

    fn table_with(name: &str, version: u64) -> HashMap<String, Brewery> {
        let mut table = HashMap::new();
        table.insert(
            "br-1".to_string(),
            Brewery {
                id: "br-1".to_string(),
                name: name.to_string(),
                version,
            },
        );
        table
    }

    #[test]
    fn test_matching_token_applies_and_bumps() {
        let mut table = table_with("Cantillon", 4);

        let next = check_and_bump(&mut table, "br-1", Some(4), |brewery| {
            brewery.name = "Drie Fonteinen".to_string();
        })
        .unwrap();

        assert_eq!(next, 5);
        let stored = &table["br-1"];
        assert_eq!(stored.name, "Drie Fonteinen");
        assert_eq!(stored.version, 5);
    }

    #[test]
    fn test_stale_token_rejected_without_mutation() {
        let mut table = table_with("Cantillon", 4);

        let err = check_and_bump(&mut table, "br-1", Some(3), |brewery| {
            brewery.name = "should never apply".to_string();
        })
        .unwrap_err();

        match err {
            StoreError::VersionConflict {
                expected, current, ..
            } => {
                assert_eq!(expected, 3);
                assert_eq!(current, 4);
            }
            other => panic!("expected VersionConflict, got {other:?}"),
        }

        let stored = &table["br-1"];
        assert_eq!(stored.name, "Cantillon");
        assert_eq!(stored.version, 4);
    }

    #[test]
    fn test_missing_entity_is_not_found() {
        let mut table = table_with("Cantillon", 0);

        let err = check_and_bump(&mut table, "br-9", Some(0), |_| {}).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_omitted_token_writes_unconditionally_and_still_bumps() {
        let mut table = table_with("Cantillon", 9);

        let next = check_and_bump(&mut table, "br-1", None, |brewery| {
            brewery.name = "Boon".to_string();
        })
        .unwrap();

        assert_eq!(next, 10);
        assert_eq!(table["br-1"].name, "Boon");
    }

    #[test]
    fn test_token_advances_by_one_per_write() {
        let mut table = table_with("Oud Beersel", 0);

        for expected in 0..5 {
            let next =
                check_and_bump(&mut table, "br-1", Some(expected), |_| {}).unwrap();
            assert_eq!(next, expected + 1);
        }
        assert_eq!(table["br-1"].version, 5);
    }
}
