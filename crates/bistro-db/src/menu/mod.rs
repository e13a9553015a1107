//! # Menu Service
//!
//! The transactional write surface of the menu: create, update and
//! delete a menu item together with its category reference and its
//! two-level customization graph, plus the read operations that return
//! the reconciled state.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  every write follows the same sequence:                                 │
//! │                                                                         │
//! │  1. authorize      user must hold Owner/Admin for the store             │
//! │  2. validate       cheap cross-field checks, before any connection      │
//! │  3. transaction    db.begin() - one per operation                       │
//! │  4. reconcile      resolver + synchronizer, all on &mut *tx             │
//! │  5. re-read        full graph from inside the transaction               │
//! │  6. commit         or roll back on the first error via `?`              │
//! │                                                                         │
//! │  errors at the boundary: domain errors (Validation/NotFound/            │
//! │  Forbidden) pass through verbatim; anything else is logged and          │
//! │  rewritten to a generic Internal so storage detail never leaks.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod resolver;
mod sync;

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::StoreAuthorizer;
use crate::error::DbError;
use crate::pool::Database;
use crate::repository::menu_item::{self, ItemScalars};
use bistro_core::dto::{CreateMenuItemInput, CustomizationGroupInput, UpdateMenuItemInput};
use bistro_core::validation::{
    validate_additional_price, validate_base_price, validate_name, validate_selectable_counts,
};
use bistro_core::{
    MenuError, MenuItem, MenuItemDetails, MenuResult, Money, ValidationError, MENU_WRITE_ROLES,
};

use sync::ExistingGroup;

// =============================================================================
// Service
// =============================================================================

/// Menu write/read operations for one database.
///
/// Holds a cloneable [`Database`] and an authorization capability; all
/// state lives in SQLite.
pub struct MenuService {
    db: Database,
    authorizer: Arc<dyn StoreAuthorizer>,
}

impl MenuService {
    /// Creates a menu service over `db`, gated by `authorizer`.
    pub fn new(db: Database, authorizer: Arc<dyn StoreAuthorizer>) -> Self {
        MenuService { db, authorizer }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Creates a menu item with its category and customizations, all in
    /// one transaction.
    ///
    /// The category reference is resolved first (rename by id, or
    /// find-or-create by name); the item lands at the end of its
    /// category's sort order; customization groups, if any, are created
    /// from scratch. Returns the full graph as persisted.
    pub async fn create_menu_item(
        &self,
        user_id: &str,
        store_id: &str,
        dto: &CreateMenuItemInput,
    ) -> MenuResult<MenuItemDetails> {
        self.create_inner(user_id, store_id, dto)
            .await
            .map_err(|e| seal("create menu item", e))
    }

    async fn create_inner(
        &self,
        user_id: &str,
        store_id: &str,
        dto: &CreateMenuItemInput,
    ) -> MenuResult<MenuItemDetails> {
        self.authorizer
            .check_store_permission(user_id, store_id, MENU_WRITE_ROLES)
            .await?;

        // Everything checkable without a connection fails before one is
        // taken.
        let name = validate_name("name", &dto.name)?;
        validate_base_price(dto.base_price)?;
        dto.category
            .trimmed_name()
            .ok_or_else(|| ValidationError::required("category.name"))?;
        if let Some(groups) = &dto.customization_groups {
            validate_groups(groups)?;
        }

        let mut tx = self.db.begin().await?;

        let category_id = resolver::resolve_category(&mut tx, &dto.category, store_id).await?;

        let sort_order = menu_item::max_sort_order(&mut tx, store_id, &category_id)
            .await?
            .unwrap_or(-1)
            + 1;

        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            store_id: store_id.to_string(),
            category_id,
            name,
            description: dto.description.clone(),
            base_price_cents: dto.base_price.cents(),
            image_url: dto.image_url.clone(),
            is_hidden: false,
            sort_order,
            created_at: now,
            updated_at: now,
        };
        menu_item::insert(&mut tx, &item).await?;

        if let Some(groups) = &dto.customization_groups {
            if !groups.is_empty() {
                sync::sync_groups(&mut tx, &item.id, &[], groups).await?;
            }
        }

        let details = menu_item::fetch_details(&mut tx, &item.id)
            .await?
            .ok_or_else(|| MenuError::internal("created item missing on re-read"))?;

        tx.commit().await.map_err(DbError::from)?;

        info!(item_id = %details.item.id, %store_id, "Created menu item");
        Ok(details)
    }

    /// Updates a menu item: scalar fields, optional category move, and
    /// (when the field is present) a full customization sync.
    ///
    /// `customization_groups` absent leaves the graph untouched; an
    /// empty list deletes every group; entries are replace-by-diff.
    pub async fn update_menu_item(
        &self,
        user_id: &str,
        store_id: &str,
        item_id: &str,
        dto: &UpdateMenuItemInput,
    ) -> MenuResult<MenuItemDetails> {
        self.update_inner(user_id, store_id, item_id, dto)
            .await
            .map_err(|e| seal("update menu item", e))
    }

    async fn update_inner(
        &self,
        user_id: &str,
        store_id: &str,
        item_id: &str,
        dto: &UpdateMenuItemInput,
    ) -> MenuResult<MenuItemDetails> {
        self.authorizer
            .check_store_permission(user_id, store_id, MENU_WRITE_ROLES)
            .await?;

        let name = match &dto.name {
            Some(n) => Some(validate_name("name", n)?),
            None => None,
        };
        validate_base_price(dto.base_price)?;
        if let Some(groups) = &dto.customization_groups {
            validate_groups(groups)?;
        }

        let mut tx = self.db.begin().await?;

        let existing = menu_item::fetch_details(&mut tx, item_id)
            .await?
            .ok_or_else(|| MenuError::not_found("MenuItem", item_id))?;
        if existing.item.store_id != store_id {
            return Err(MenuError::forbidden(format!(
                "menu item {item_id} does not belong to store {store_id}"
            )));
        }

        // Only a category that resolves to a DIFFERENT id is written;
        // resolving to the current one still applies the rename side
        // effect but leaves the link alone.
        let category_id = match &dto.category {
            Some(cat) => {
                let resolved = resolver::resolve_category(&mut tx, cat, store_id).await?;
                (resolved != existing.item.category_id).then_some(resolved)
            }
            None => None,
        };

        menu_item::update_scalars(
            &mut tx,
            item_id,
            ItemScalars {
                name: name.as_deref(),
                description: dto.description.as_deref(),
                base_price_cents: dto.base_price.cents(),
                image_url: dto.image_url.as_deref(),
                is_hidden: dto.is_hidden,
                category_id: category_id.as_deref(),
            },
        )
        .await?;

        if let Some(groups) = &dto.customization_groups {
            let existing_groups: Vec<ExistingGroup> = existing
                .customization_groups
                .iter()
                .map(ExistingGroup::from)
                .collect();
            sync::sync_groups(&mut tx, item_id, &existing_groups, groups).await?;
        }

        let details = menu_item::fetch_details(&mut tx, item_id)
            .await?
            .ok_or_else(|| MenuError::internal("updated item missing on re-read"))?;

        tx.commit().await.map_err(DbError::from)?;

        info!(%item_id, %store_id, "Updated menu item");
        Ok(details)
    }

    /// Deletes a menu item; its customization graph cascades away.
    ///
    /// Idempotent: deleting an id that no longer exists succeeds (with
    /// a warn) and returns the id, so retried deletes don't error.
    pub async fn delete_menu_item(
        &self,
        user_id: &str,
        store_id: &str,
        item_id: &str,
    ) -> MenuResult<String> {
        self.delete_inner(user_id, store_id, item_id)
            .await
            .map_err(|e| seal("delete menu item", e))
    }

    async fn delete_inner(
        &self,
        user_id: &str,
        store_id: &str,
        item_id: &str,
    ) -> MenuResult<String> {
        self.authorizer
            .check_store_permission(user_id, store_id, MENU_WRITE_ROLES)
            .await?;

        let mut tx = self.db.begin().await?;

        match menu_item::find_store_id(&mut tx, item_id).await? {
            None => {
                warn!(%item_id, "Menu item already gone, treating delete as done");
                return Ok(item_id.to_string());
            }
            Some(owner) if owner != store_id => {
                return Err(MenuError::forbidden(format!(
                    "menu item {item_id} does not belong to store {store_id}"
                )));
            }
            Some(_) => {}
        }

        menu_item::delete(&mut tx, item_id).await?;
        tx.commit().await.map_err(DbError::from)?;

        info!(%item_id, %store_id, "Deleted menu item");
        Ok(item_id.to_string())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches one menu item with its full customization graph.
    pub async fn menu_item(&self, item_id: &str) -> MenuResult<MenuItemDetails> {
        self.menu_item_inner(item_id)
            .await
            .map_err(|e| seal("fetch menu item", e))
    }

    async fn menu_item_inner(&self, item_id: &str) -> MenuResult<MenuItemDetails> {
        let mut conn = self.db.pool().acquire().await.map_err(DbError::from)?;
        menu_item::fetch_details(&mut conn, item_id)
            .await?
            .ok_or_else(|| MenuError::not_found("MenuItem", item_id))
    }

    /// Lists a store's full menu in display order (category position,
    /// then item position).
    pub async fn store_menu(&self, store_id: &str) -> MenuResult<Vec<MenuItemDetails>> {
        self.store_menu_inner(store_id)
            .await
            .map_err(|e| seal("list store menu", e))
    }

    async fn store_menu_inner(&self, store_id: &str) -> MenuResult<Vec<MenuItemDetails>> {
        let mut conn = self.db.pool().acquire().await.map_err(DbError::from)?;

        let ids = menu_item::list_ids_for_store(&mut conn, store_id).await?;
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(details) = menu_item::fetch_details(&mut conn, &id).await? {
                items.push(details);
            }
        }

        Ok(items)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Cross-field checks on a desired customization set, run before the
/// transaction opens. Blank names are NOT rejected here; the
/// synchronizer skips those entries with a warn.
fn validate_groups(groups: &[CustomizationGroupInput]) -> MenuResult<()> {
    for group in groups {
        let settings = group.settings();
        validate_selectable_counts(settings.min_selectable, settings.max_selectable)?;
        for option in &group.options {
            validate_additional_price(option.additional_price.unwrap_or(Money::zero()))?;
        }
    }
    Ok(())
}

/// Service-boundary error policy: domain errors pass through verbatim,
/// everything else is logged in full and replaced with a generic
/// message.
fn seal(op: &'static str, err: MenuError) -> MenuError {
    if err.is_domain() {
        warn!(%op, error = %err, "Menu operation rejected");
        err
    } else {
        error!(%op, error = %err, "Menu operation failed");
        MenuError::internal(format!("failed to {op}"))
    }
}
