//! # Menu Item Repository
//!
//! Database operations for menu items and the full-graph re-read every
//! reconciliation returns.
//!
//! ## Full Graph Read
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_details(item_id)                                                 │
//! │                                                                         │
//! │  menu_items ── WHERE id = ?                                            │
//! │       │                                                                 │
//! │       ├── categories         WHERE id = item.category_id               │
//! │       │                                                                 │
//! │       └── customization_groups  WHERE menu_item_id = ? ORDER BY name   │
//! │                 │                                                       │
//! │                 └── customization_options WHERE group_id = ?           │
//! │                                            ORDER BY name               │
//! │                                                                         │
//! │  Groups and options come back alphabetical so the caller always        │
//! │  sees a stable display order.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::category;
use bistro_core::{
    CustomizationGroup, CustomizationGroupDetails, CustomizationOption, MenuItem, MenuItemDetails,
};

/// Fetches a menu item row by id.
pub async fn get(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, store_id, category_id, name, description, base_price_cents, \
                image_url, is_hidden, sort_order, created_at, updated_at \
         FROM menu_items WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(item)
}

/// Returns only the owning store of an item, for the delete pre-check.
pub async fn find_store_id(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<String>> {
    let store_id: Option<String> =
        sqlx::query_scalar("SELECT store_id FROM menu_items WHERE id = ?1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

    Ok(store_id)
}

/// Returns the highest sort position among items in one (store,
/// category) scope, or `None` when the scope is empty.
pub async fn max_sort_order(
    conn: &mut SqliteConnection,
    store_id: &str,
    category_id: &str,
) -> DbResult<Option<i64>> {
    let max: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(sort_order) FROM menu_items WHERE store_id = ?1 AND category_id = ?2",
    )
    .bind(store_id)
    .bind(category_id)
    .fetch_one(conn)
    .await?;

    Ok(max)
}

/// Inserts a new menu item.
pub async fn insert(conn: &mut SqliteConnection, item: &MenuItem) -> DbResult<()> {
    debug!(id = %item.id, name = %item.name, "Inserting menu item");

    sqlx::query(
        "INSERT INTO menu_items (id, store_id, category_id, name, description, \
                base_price_cents, image_url, is_hidden, sort_order, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )
    .bind(&item.id)
    .bind(&item.store_id)
    .bind(&item.category_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.base_price_cents)
    .bind(&item.image_url)
    .bind(item.is_hidden)
    .bind(item.sort_order)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// Scalar fields of an item update.
///
/// `None` keeps the current value (COALESCE in SQL); the base price is
/// always overwritten. The category id is `Some` only when the
/// resolver produced a different category than the current one.
#[derive(Debug, Clone, Default)]
pub struct ItemScalars<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub base_price_cents: i64,
    pub image_url: Option<&'a str>,
    pub is_hidden: Option<bool>,
    pub category_id: Option<&'a str>,
}

/// Overwrites an item's scalar fields.
pub async fn update_scalars(
    conn: &mut SqliteConnection,
    id: &str,
    scalars: ItemScalars<'_>,
) -> DbResult<()> {
    debug!(%id, "Updating menu item scalars");

    let now = chrono::Utc::now();

    let result = sqlx::query(
        "UPDATE menu_items SET \
            name = COALESCE(?2, name), \
            description = COALESCE(?3, description), \
            base_price_cents = ?4, \
            image_url = COALESCE(?5, image_url), \
            is_hidden = COALESCE(?6, is_hidden), \
            category_id = COALESCE(?7, category_id), \
            updated_at = ?8 \
         WHERE id = ?1",
    )
    .bind(id)
    .bind(scalars.name)
    .bind(scalars.description)
    .bind(scalars.base_price_cents)
    .bind(scalars.image_url)
    .bind(scalars.is_hidden)
    .bind(scalars.category_id)
    .bind(now)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("MenuItem", id));
    }

    Ok(())
}

/// Deletes a menu item; groups and options go with it (FK cascade).
///
/// ## Returns
/// Rows affected (0 when the item was already gone).
pub async fn delete(conn: &mut SqliteConnection, id: &str) -> DbResult<u64> {
    debug!(%id, "Deleting menu item");

    let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Fetches the full nested graph of one menu item: the item, its
/// category, and its groups (by name) with their options (by name).
pub async fn fetch_details(
    conn: &mut SqliteConnection,
    item_id: &str,
) -> DbResult<Option<MenuItemDetails>> {
    let Some(item) = get(conn, item_id).await? else {
        return Ok(None);
    };

    let category = category::get(conn, &item.category_id)
        .await?
        .ok_or_else(|| DbError::not_found("Category", &item.category_id))?;

    let groups = sqlx::query_as::<_, CustomizationGroup>(
        "SELECT id, menu_item_id, name, required, min_selectable, max_selectable \
         FROM customization_groups WHERE menu_item_id = ?1 ORDER BY name ASC",
    )
    .bind(item_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut customization_groups = Vec::with_capacity(groups.len());
    for group in groups {
        let options = sqlx::query_as::<_, CustomizationOption>(
            "SELECT id, group_id, name, additional_price_cents \
             FROM customization_options WHERE group_id = ?1 ORDER BY name ASC",
        )
        .bind(&group.id)
        .fetch_all(&mut *conn)
        .await?;

        customization_groups.push(CustomizationGroupDetails { group, options });
    }

    Ok(Some(MenuItemDetails {
        item,
        category,
        customization_groups,
    }))
}

/// Lists a store's items in display order: category sort position
/// first, then item sort position within the category.
pub async fn list_ids_for_store(
    conn: &mut SqliteConnection,
    store_id: &str,
) -> DbResult<Vec<String>> {
    let ids: Vec<String> = sqlx::query_scalar(
        "SELECT m.id FROM menu_items m \
         JOIN categories c ON c.id = m.category_id \
         WHERE m.store_id = ?1 \
         ORDER BY c.sort_order ASC, m.sort_order ASC",
    )
    .bind(store_id)
    .fetch_all(conn)
    .await?;

    Ok(ids)
}
