//! # Upsert DTOs
//!
//! Client-submitted shapes for menu reconciliation. The HTTP boundary has
//! already checked types, string lengths and numeric-string formats; the
//! core enforces the cross-field and existence rules on top.
//!
//! ## Omitted vs Empty
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "customizationGroups" on update carries THREE distinct meanings:       │
//! │                                                                         │
//! │  field absent        → None            → leave customizations alone    │
//! │  field is []         → Some(vec![])    → delete every group            │
//! │  field has entries   → Some(vec![...]) → full replace-by-diff sync     │
//! │                                                                         │
//! │  Option<Vec<_>> + #[serde(default)] preserves the distinction.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category Reference
// =============================================================================

/// A category reference: by identity (rename) or by name (find-or-create).
///
/// With `id` set, `name` is mandatory and the category is renamed in
/// place; without `id`, `name` is looked up per store and a new category
/// is created on a miss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    /// Id of an existing category to update.
    #[serde(default)]
    pub id: Option<String>,

    /// Category name. Required in both modes.
    #[serde(default)]
    pub name: Option<String>,
}

impl CategoryRef {
    /// Shorthand for a by-name reference.
    pub fn by_name(name: impl Into<String>) -> Self {
        CategoryRef {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Shorthand for a by-id reference (rename).
    pub fn by_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        CategoryRef {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    /// The trimmed name, or None when absent/blank.
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

// =============================================================================
// Customization Inputs
// =============================================================================

/// Desired state of one customization option.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationOptionInput {
    /// Id of an existing option to update; omit to create.
    #[serde(default)]
    pub id: Option<String>,

    /// Display name ("Large").
    pub name: String,

    /// Surcharge, decimal-string on the wire ("1.50"). Defaults to 0.
    #[serde(default)]
    pub additional_price: Option<Money>,
}

impl CustomizationOptionInput {
    /// Surcharge in cents with the default applied.
    pub fn additional_price_cents(&self) -> i64 {
        self.additional_price.unwrap_or_default().cents()
    }
}

/// Desired state of one customization group and its options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationGroupInput {
    /// Id of an existing group to update; omit to create.
    #[serde(default)]
    pub id: Option<String>,

    /// Display name ("Size").
    pub name: String,

    /// Is selecting an option from this group mandatory?
    #[serde(default)]
    pub required: Option<bool>,

    /// Minimum number of options to select.
    #[serde(default)]
    pub min_selectable: Option<i64>,

    /// Maximum number of options to select.
    #[serde(default)]
    pub max_selectable: Option<i64>,

    /// The complete desired option set for this group.
    pub options: Vec<CustomizationOptionInput>,
}

/// Group scalars with all defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSettings {
    pub required: bool,
    pub min_selectable: i64,
    pub max_selectable: i64,
}

impl CustomizationGroupInput {
    /// Resolves the group-level defaults:
    /// `required` → false, `min_selectable` → 1 if required else 0,
    /// `max_selectable` → 1.
    ///
    /// `min_selectable > max_selectable` is accepted as-is; the pair is
    /// defaulted but never cross-validated.
    pub fn settings(&self) -> GroupSettings {
        let required = self.required.unwrap_or(false);
        GroupSettings {
            required,
            min_selectable: self.min_selectable.unwrap_or(i64::from(required)),
            max_selectable: self.max_selectable.unwrap_or(1),
        }
    }

    /// The trimmed name, or None when blank. Blank-named entries are
    /// skipped (logged, not fatal) by the synchronizer.
    pub fn trimmed_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

// =============================================================================
// Menu Item Inputs
// =============================================================================

/// Request body for creating a menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemInput {
    /// Display name.
    pub name: String,

    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,

    /// Base price, decimal-string on the wire ("9.50"). Must be >= 0.01.
    pub base_price: Money,

    /// Image key in object storage.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Category: id to link/rename existing, or just a name to
    /// find-or-create. The name is mandatory either way.
    pub category: CategoryRef,

    /// Optional customization groups. Ids are ignored here: everything
    /// is a creation on this path.
    #[serde(default)]
    pub customization_groups: Option<Vec<CustomizationGroupInput>>,
}

/// Request body for updating a menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemInput {
    /// New display name; absent keeps the current one.
    #[serde(default)]
    pub name: Option<String>,

    /// New description; absent keeps the current one.
    #[serde(default)]
    pub description: Option<String>,

    /// Base price. Always present, always overwritten.
    pub base_price: Money,

    /// New image key; absent keeps the current one.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Hide/show the item; absent keeps the current flag.
    #[serde(default)]
    pub is_hidden: Option<bool>,

    /// Optional category change (id to link/rename existing, name to
    /// find-or-create).
    #[serde(default)]
    pub category: Option<CategoryRef>,

    /// Full desired customization set. Absent = leave untouched,
    /// `[]` = delete all groups, entries = replace-by-diff.
    #[serde(default)]
    pub customization_groups: Option<Vec<CustomizationGroupInput>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
