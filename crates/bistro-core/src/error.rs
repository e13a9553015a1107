//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── MenuError        - The public taxonomy every operation returns    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bistro-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → MenuError ← DbError (mapped at the seam)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation Policy
//! Validation, NotFound and Forbidden are *domain* errors: they propagate
//! to the caller verbatim and abort the enclosing transaction. Everything
//! else is folded into `Internal` and rewritten to a generic message at
//! the service boundary so storage details never leak to the caller.

use thiserror::Error;

// =============================================================================
// Menu Error
// =============================================================================

/// The error taxonomy shared by every public menu operation.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Malformed or missing required field, caught before or during
    /// processing.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced identity does not exist, or does not exist within
    /// the expected scope (e.g. a category id owned by another store).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Permission check failed, or the entity exists but belongs to a
    /// different store than the one in scope.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Anything unanticipated. The detail string is for logs; the
    /// service boundary replaces it with a generic message before it
    /// reaches a caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MenuError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        MenuError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Forbidden error.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        MenuError::Forbidden(reason.into())
    }

    /// Creates an Internal error.
    pub fn internal(detail: impl Into<String>) -> Self {
        MenuError::Internal(detail.into())
    }

    /// Whether this error may cross the service boundary unchanged.
    ///
    /// Domain errors carry no storage internals and are safe to show;
    /// `Internal` is not.
    pub fn is_domain(&self) -> bool {
        !matches!(self, MenuError::Internal(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a request doesn't meet the cross-field rules the
/// core enforces on top of the HTTP boundary's shape checks.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a malformed decimal price string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the named field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with MenuError.
pub type MenuResult<T> = Result<T, MenuError>;

// =============================================================================
// Unit Tests
// =============================================================================
