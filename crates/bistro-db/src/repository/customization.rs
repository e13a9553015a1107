//! # Customization Repository
//!
//! Database operations for customization groups and options.
//!
//! Bulk deletes and bulk inserts use `QueryBuilder`: the synchronizer
//! deletes an arbitrary id set in one statement and creates a new
//! group's options in one statement, mirroring the single-statement
//! semantics the diff plan assumes.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bistro_core::{CustomizationGroup, CustomizationOption};

// =============================================================================
// Groups
// =============================================================================

/// Inserts a new customization group.
pub async fn insert_group(conn: &mut SqliteConnection, group: &CustomizationGroup) -> DbResult<()> {
    debug!(id = %group.id, name = %group.name, "Inserting customization group");

    sqlx::query(
        "INSERT INTO customization_groups \
            (id, menu_item_id, name, required, min_selectable, max_selectable) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&group.id)
    .bind(&group.menu_item_id)
    .bind(&group.name)
    .bind(group.required)
    .bind(group.min_selectable)
    .bind(group.max_selectable)
    .execute(conn)
    .await?;

    Ok(())
}

/// Overwrites a group's scalar fields in place (identity untouched).
pub async fn update_group(
    conn: &mut SqliteConnection,
    id: &str,
    name: &str,
    required: bool,
    min_selectable: i64,
    max_selectable: i64,
) -> DbResult<()> {
    debug!(%id, %name, "Updating customization group");

    let result = sqlx::query(
        "UPDATE customization_groups SET \
            name = ?2, required = ?3, min_selectable = ?4, max_selectable = ?5 \
         WHERE id = ?1",
    )
    .bind(id)
    .bind(name)
    .bind(required)
    .bind(min_selectable)
    .bind(max_selectable)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("CustomizationGroup", id));
    }

    Ok(())
}

/// Deletes the given groups in one statement; their options cascade.
pub async fn delete_groups(conn: &mut SqliteConnection, ids: &[String]) -> DbResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    debug!(count = ids.len(), "Bulk-deleting customization groups");

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("DELETE FROM customization_groups WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    builder.build().execute(conn).await?;

    Ok(())
}

// =============================================================================
// Options
// =============================================================================

/// Inserts a single option.
pub async fn insert_option(
    conn: &mut SqliteConnection,
    option: &CustomizationOption,
) -> DbResult<()> {
    debug!(id = %option.id, name = %option.name, "Inserting customization option");

    sqlx::query(
        "INSERT INTO customization_options (id, group_id, name, additional_price_cents) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&option.id)
    .bind(&option.group_id)
    .bind(&option.name)
    .bind(option.additional_price_cents)
    .execute(conn)
    .await?;

    Ok(())
}

/// Bulk-creates options (used when a whole group is new).
pub async fn insert_options(
    conn: &mut SqliteConnection,
    options: &[CustomizationOption],
) -> DbResult<()> {
    if options.is_empty() {
        return Ok(());
    }

    debug!(count = options.len(), "Bulk-inserting customization options");

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "INSERT INTO customization_options (id, group_id, name, additional_price_cents) ",
    );
    builder.push_values(options, |mut row, option| {
        row.push_bind(&option.id)
            .push_bind(&option.group_id)
            .push_bind(&option.name)
            .push_bind(option.additional_price_cents);
    });

    builder.build().execute(conn).await?;

    Ok(())
}

/// Overwrites an option's name and surcharge in place.
pub async fn update_option(
    conn: &mut SqliteConnection,
    id: &str,
    name: &str,
    additional_price_cents: i64,
) -> DbResult<()> {
    debug!(%id, %name, "Updating customization option");

    let result = sqlx::query(
        "UPDATE customization_options SET name = ?2, additional_price_cents = ?3 WHERE id = ?1",
    )
    .bind(id)
    .bind(name)
    .bind(additional_price_cents)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("CustomizationOption", id));
    }

    Ok(())
}

/// Deletes the given options in one statement.
pub async fn delete_options(conn: &mut SqliteConnection, ids: &[String]) -> DbResult<()> {
    if ids.is_empty() {
        return Ok(());
    }

    debug!(count = ids.len(), "Bulk-deleting customization options");

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("DELETE FROM customization_options WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    builder.build().execute(conn).await?;

    Ok(())
}
