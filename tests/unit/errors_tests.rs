/*!
 * Tests for error types
 */

use isoref::errors::{CatalogError, SeedError};

/// Test error messages name the entity and key
#[test]
fn test_catalog_error_display_shouldDescribeFailure() {
    let not_found = CatalogError::NotFound {
        entity: "country",
        key: "ZZZ".to_string(),
    };
    assert_eq!(not_found.to_string(), "country matching 'ZZZ' does not exist");
    assert!(not_found.is_not_found());

    let duplicate = CatalogError::Duplicate {
        entity: "country",
        field: "alpha3".to_string(),
        value: "FRA".to_string(),
    };
    assert_eq!(duplicate.to_string(), "country with alpha3 'FRA' already exists");
    assert!(!duplicate.is_not_found());

    let invalid = CatalogError::Validation {
        entity: "language",
        field: "terminology",
        reason: "expected 3 to 7 characters, got 2".to_string(),
    };
    assert_eq!(
        invalid.to_string(),
        "invalid language terminology: expected 3 to 7 characters, got 2"
    );
}

/// Test conversion of catalog errors into seed errors
#[test]
fn test_seed_error_from_catalog_error_shouldWrap() {
    let err: SeedError = CatalogError::Lock("poisoned".to_string()).into();

    assert!(matches!(err, SeedError::Catalog(CatalogError::Lock(_))));
    assert!(err.to_string().contains("poisoned"));
}
