//! # Domain Types
//!
//! Core entities of the menu reconciliation engine.
//!
//! ## Entity Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Entity Graph                                    │
//! │                                                                         │
//! │   Category ◄──reference── MenuItem ──owns──► CustomizationGroup        │
//! │   (per store,             (per store,        (exclusively owned,       │
//! │    unique name,            sorted within      cascades on delete)      │
//! │    sorted)                 its category)           │                   │
//! │                                                    │ owns              │
//! │                                                    ▼                   │
//! │                                          CustomizationOption           │
//! │                                          (exclusively owned)           │
//! │                                                                         │
//! │  A menu item REFERENCES its category (deleting the item leaves the     │
//! │  category alone); it OWNS its groups and, transitively, their options. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business key where one exists: `(store_id, name)` for categories

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Store membership role, as reported by the authorization collaborator.
///
/// The core never reads role storage itself; it only names the roles a
/// given operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Store owner - full control.
    Owner,
    /// Store administrator - menu management allowed.
    Admin,
    /// Regular staff - read-only as far as this core is concerned.
    Staff,
}

/// The roles allowed to mutate a store's menu.
pub const MENU_WRITE_ROLES: &[Role] = &[Role::Owner, Role::Admin];

// =============================================================================
// Category
// =============================================================================

/// A display category menu items reference ("Curries", "Drinks").
///
/// Created on first reference by name within a store, or renamed by id.
/// Never implicitly deleted by the reconciliation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Store this category belongs to.
    pub store_id: String,

    /// Display name, unique per store.
    pub name: String,

    /// Dense per-store display position, assigned as max+1 on creation.
    pub sort_order: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A sellable menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Store this item belongs to.
    pub store_id: String,

    /// Category reference (not ownership).
    pub category_id: String,

    /// Display name shown on the menu.
    pub name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Base price in cents, before customizations. Always >= 1.
    pub base_price_cents: i64,

    /// Key of an image stored in object storage, if any.
    pub image_url: Option<String>,

    /// Temporarily hidden from customers (e.g. out of stock).
    pub is_hidden: bool,

    /// Display position within (store, category), assigned as max+1.
    pub sort_order: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }
}

// =============================================================================
// Customization Group
// =============================================================================

/// A customization group owned by a menu item ("Size", "Spice Level").
///
/// Deleting the item deletes its groups; deleting a group deletes its
/// options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CustomizationGroup {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning menu item.
    pub menu_item_id: String,

    /// Display name ("Size").
    pub name: String,

    /// Whether the customer must pick something from this group.
    pub required: bool,

    /// Minimum selectable options. Default-filled to 1 when required,
    /// 0 otherwise; never cross-checked against `max_selectable`.
    pub min_selectable: i64,

    /// Maximum selectable options (1 for size, >1 for toppings).
    pub max_selectable: i64,
}

// =============================================================================
// Customization Option
// =============================================================================

/// A single choice inside a customization group ("Large", "Extra Egg").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CustomizationOption {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning customization group.
    pub group_id: String,

    /// Display name ("Large").
    pub name: String,

    /// Surcharge in cents, >= 0. Defaults to 0 when omitted on input.
    pub additional_price_cents: i64,
}

impl CustomizationOption {
    /// Returns the surcharge as a Money type.
    #[inline]
    pub fn additional_price(&self) -> Money {
        Money::from_cents(self.additional_price_cents)
    }
}

// =============================================================================
// Nested Views
// =============================================================================

/// A customization group together with its options, ordered by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationGroupDetails {
    #[serde(flatten)]
    pub group: CustomizationGroup,

    /// Options ordered by name ascending.
    pub options: Vec<CustomizationOption>,
}

impl CustomizationGroupDetails {
    /// Ids of the options currently persisted for this group.
    pub fn option_ids(&self) -> Vec<String> {
        self.options.iter().map(|o| o.id.clone()).collect()
    }
}

/// The full persisted entity graph of one menu item: the item, its
/// resolved category, and its groups (ordered by name) with their
/// options (ordered by name).
///
/// Every create/update operation re-reads and returns this shape so
/// callers always see the post-reconciliation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDetails {
    #[serde(flatten)]
    pub item: MenuItem,

    pub category: Category,

    /// Customization groups ordered by name ascending.
    pub customization_groups: Vec<CustomizationGroupDetails>,
}

// =============================================================================
// Unit Tests
// =============================================================================
