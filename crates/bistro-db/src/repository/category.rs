//! # Category Repository
//!
//! Database operations for categories.
//!
//! The interesting operation here is [`rename_scoped`]: the identity
//! match and the store-ownership match happen in ONE conditional
//! UPDATE. Zero rows affected is the only ownership signal the
//! resolver gets - there is deliberately no separate existence check,
//! which would open a race where the owning store changes between
//! check and write.

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use bistro_core::Category;

/// Finds a category id by its per-store unique name.
pub async fn find_id_by_name(
    conn: &mut SqliteConnection,
    store_id: &str,
    name: &str,
) -> DbResult<Option<String>> {
    let id: Option<String> =
        sqlx::query_scalar("SELECT id FROM categories WHERE store_id = ?1 AND name = ?2")
            .bind(store_id)
            .bind(name)
            .fetch_optional(conn)
            .await?;

    Ok(id)
}

/// Fetches a category by id.
pub async fn get(conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, store_id, name, sort_order, created_at, updated_at \
         FROM categories WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(category)
}

/// Returns the highest sort position among a store's categories.
///
/// `None` when the store has no categories yet; the resolver treats
/// that as -1 so the first category lands at position 0.
pub async fn max_sort_order(conn: &mut SqliteConnection, store_id: &str) -> DbResult<Option<i64>> {
    let max: Option<i64> =
        sqlx::query_scalar("SELECT MAX(sort_order) FROM categories WHERE store_id = ?1")
            .bind(store_id)
            .fetch_one(conn)
            .await?;

    Ok(max)
}

/// Inserts a new category.
pub async fn insert(conn: &mut SqliteConnection, category: &Category) -> DbResult<()> {
    debug!(id = %category.id, name = %category.name, "Inserting category");

    sqlx::query(
        "INSERT INTO categories (id, store_id, name, sort_order, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&category.id)
    .bind(&category.store_id)
    .bind(&category.name)
    .bind(category.sort_order)
    .bind(category.created_at)
    .bind(category.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// Renames a category, conditioned on BOTH identity and store
/// ownership in a single statement.
///
/// ## Returns
/// The number of rows affected: 1 when the category exists in this
/// store, 0 when it doesn't exist or belongs to another store. The
/// caller turns 0 into NotFound.
pub async fn rename_scoped(
    conn: &mut SqliteConnection,
    id: &str,
    store_id: &str,
    name: &str,
) -> DbResult<u64> {
    debug!(%id, %store_id, %name, "Renaming category (scoped)");

    let now = Utc::now();

    let result = sqlx::query(
        "UPDATE categories SET name = ?3, updated_at = ?4 \
         WHERE id = ?1 AND store_id = ?2",
    )
    .bind(id)
    .bind(store_id)
    .bind(name)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}
