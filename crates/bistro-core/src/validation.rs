//! # Validation Module
//!
//! Cross-field validation the core enforces on top of the HTTP
//! boundary's shape checks.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP boundary (out of scope)                                 │
//! │  ├── type/shape, string length, numeric-string format                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── required-ness that depends on other fields                        │
//! │  └── business ranges (base price >= 0.01, counts >= 0)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL, UNIQUE(store_id, name), CHECK(base_price_cents > 0)     │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_NAME_LEN, MIN_BASE_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (item, category, group or option).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a menu item base price.
///
/// ## Rules
/// - Must be at least 0.01 (one cent); free items are modeled as
///   zero-priced options, not zero-priced items
pub fn validate_base_price(price: Money) -> ValidationResult<()> {
    if price.cents() < MIN_BASE_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "basePrice".to_string(),
            min: MIN_BASE_PRICE_CENTS,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an option surcharge.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free option)
pub fn validate_additional_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "additionalPrice".to_string(),
        });
    }

    Ok(())
}

/// Validates the selectable-count pair on a customization group.
///
/// ## Rules
/// - `min_selectable` >= 0
/// - `max_selectable` >= 1
///
/// `min > max` is deliberately accepted; the pair is defaulted but
/// never cross-validated.
pub fn validate_selectable_counts(min: i64, max: i64) -> ValidationResult<()> {
    if min < 0 {
        return Err(ValidationError::OutOfRange {
            field: "minSelectable".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if max < 1 {
        return Err(ValidationError::OutOfRange {
            field: "maxSelectable".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
