//! # bistro-core: Pure Domain Logic for the Bistro Menu Backend
//!
//! This crate is the **heart** of the menu reconciliation engine. It contains
//! the domain types and the pure parts of the reconciliation algorithm with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                HTTP boundary (out of scope)                     │   │
//! │  │    routing, shape validation, JWT extraction, Swagger           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validated DTOs                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   sync    │  │ validation│  │   │
//! │  │   │ Category  │  │   Money   │  │  SyncKey  │  │   rules   │  │   │
//! │  │   │ MenuItem  │  │  parsing  │  │ SyncPlan  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bistro-db (Database Layer)                   │   │
//! │  │       SQLite queries, migrations, MenuService orchestration     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Category, MenuItem, CustomizationGroup, ...)
//! - [`dto`] - Client-submitted upsert shapes with default resolution
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`sync`] - Pure child-collection diff planning
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Cross-field input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod money;
pub mod sync;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bistro_core::Money` instead of
// `use bistro_core::money::Money`

pub use error::{MenuError, MenuResult, ValidationError};
pub use money::Money;
pub use sync::{plan_sync, SyncKey, SyncPlan};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length for category, item, group and option names.
///
/// ## Business Reason
/// Names render on customer-facing menus and receipts; anything longer
/// is almost certainly pasted garbage. The HTTP boundary enforces the
/// same limit, this is the defense-in-depth copy.
pub const MAX_NAME_LEN: usize = 200;

/// Minimum base price for a menu item, in cents.
///
/// ## Business Reason
/// Free menu items are modeled as zero-priced *options*, never as
/// zero-priced items; the item itself must cost at least one cent.
pub const MIN_BASE_PRICE_CENTS: i64 = 1;
