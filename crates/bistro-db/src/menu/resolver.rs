//! # Category Resolver
//!
//! Resolves a client-submitted category reference to a concrete
//! category id, creating one if necessary.
//!
//! ## Two Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  { id, name }   → rename by id, scoped to the store                     │
//! │                   one conditional UPDATE; 0 rows ⇒ NotFound             │
//! │                   (wrong store and missing id are indistinguishable     │
//! │                    on purpose - no existence probe, no TOCTOU race)     │
//! │                                                                         │
//! │  { name }       → find-or-create by (store, name)                       │
//! │                   hit  ⇒ return id, nothing written                     │
//! │                   miss ⇒ sort_order = (max per store, or -1) + 1,       │
//! │                          insert, return fresh id                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;
use uuid::Uuid;

use crate::repository::category;
use bistro_core::dto::CategoryRef;
use bistro_core::{Category, MenuError, MenuResult, ValidationError};

/// Resolves `cat` to a category id within `store_id`.
///
/// Runs inside the caller's transaction; any write it performs commits
/// or rolls back with the rest of the operation.
pub(crate) async fn resolve_category(
    conn: &mut SqliteConnection,
    cat: &CategoryRef,
    store_id: &str,
) -> MenuResult<String> {
    // Name is mandatory in both modes; blank counts as missing.
    let name = cat
        .trimmed_name()
        .ok_or_else(|| ValidationError::required("category.name"))?;

    if let Some(id) = &cat.id {
        debug!(%id, %store_id, "Resolving category by id");

        let affected = category::rename_scoped(conn, id, store_id, name).await?;
        if affected == 0 {
            // Missing id or foreign store - the single conditional
            // write is the only ownership check there is.
            return Err(MenuError::not_found("Category", id));
        }
        return Ok(id.clone());
    }

    debug!(%name, %store_id, "Resolving category by name");

    if let Some(id) = category::find_id_by_name(conn, store_id, name).await? {
        // Name match implies no-op: the category already reads as desired.
        return Ok(id);
    }

    let sort_order = category::max_sort_order(conn, store_id).await?.unwrap_or(-1) + 1;
    let now = Utc::now();
    let created = Category {
        id: Uuid::new_v4().to_string(),
        store_id: store_id.to_string(),
        name: name.to_string(),
        sort_order,
        created_at: now,
        updated_at: now,
    };
    category::insert(conn, &created).await?;

    debug!(id = %created.id, %name, sort_order, "Created category");
    Ok(created.id)
}
