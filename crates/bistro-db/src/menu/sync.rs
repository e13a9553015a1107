//! # Customization Synchronizer
//!
//! Applies a desired customization state to the stored graph, one menu
//! item at a time. The pure diff comes from [`bistro_core::plan_sync`];
//! this module executes the plan against SQLite.
//!
//! ## Replace-by-Diff
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  desired groups ──► plan_sync ──► { delete, update, create }            │
//! │                                                                         │
//! │  delete : one bulk DELETE, options cascade                              │
//! │  update : overwrite scalars, then recurse into the options of           │
//! │           that group with the same plan/apply split                     │
//! │  create : skipped when the name is blank or the group brings no         │
//! │           options; otherwise INSERT group + bulk INSERT options         │
//! │                                                                         │
//! │  Blank-named entries never apply, but their ids still count as          │
//! │  "mentioned" - the plan keeps those rows alive instead of deleting      │
//! │  them. Malformed input degrades to a warn, never an abort.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqliteConnection;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::repository::customization;
use bistro_core::dto::{CustomizationGroupInput, CustomizationOptionInput};
use bistro_core::{
    plan_sync, CustomizationGroup, CustomizationGroupDetails, CustomizationOption, MenuResult,
};

/// What the synchronizer needs to know about a stored group: its id and
/// the ids of its current options.
pub(crate) struct ExistingGroup {
    pub id: String,
    pub option_ids: Vec<String>,
}

impl From<&CustomizationGroupDetails> for ExistingGroup {
    fn from(details: &CustomizationGroupDetails) -> Self {
        Self {
            id: details.group.id.clone(),
            option_ids: details.option_ids(),
        }
    }
}

/// Reconciles the stored groups of `menu_item_id` with `desired`.
///
/// `existing` is the graph as read inside the current transaction; an
/// empty slice means every desired group is a creation.
pub(crate) async fn sync_groups(
    conn: &mut SqliteConnection,
    menu_item_id: &str,
    existing: &[ExistingGroup],
    desired: &[CustomizationGroupInput],
) -> MenuResult<()> {
    let existing_ids: Vec<String> = existing.iter().map(|g| g.id.clone()).collect();
    let plan = plan_sync(
        &existing_ids,
        desired.iter().map(|g| (g.id.clone(), g)).collect(),
    );

    customization::delete_groups(conn, &plan.delete).await?;

    for (id, dto) in &plan.update {
        let Some(name) = dto.trimmed_name() else {
            warn!(group_id = %id, "Skipping customization group with no name");
            continue;
        };

        let settings = dto.settings();
        customization::update_group(
            conn,
            id,
            name,
            settings.required,
            settings.min_selectable,
            settings.max_selectable,
        )
        .await?;

        let option_ids = existing
            .iter()
            .find(|g| &g.id == id)
            .map(|g| g.option_ids.as_slice())
            .unwrap_or(&[]);
        sync_options(conn, id, option_ids, &dto.options).await?;
    }

    for dto in &plan.create {
        create_group(conn, menu_item_id, dto).await?;
    }

    Ok(())
}

/// Reconciles the stored options of one surviving group.
async fn sync_options(
    conn: &mut SqliteConnection,
    group_id: &str,
    existing_ids: &[String],
    desired: &[CustomizationOptionInput],
) -> MenuResult<()> {
    let plan = plan_sync(
        existing_ids,
        desired.iter().map(|o| (o.id.clone(), o)).collect(),
    );

    customization::delete_options(conn, &plan.delete).await?;

    for (id, dto) in &plan.update {
        let Some(name) = trimmed(&dto.name) else {
            warn!(option_id = %id, "Skipping customization option with no name");
            continue;
        };

        customization::update_option(conn, id, name, dto.additional_price_cents()).await?;
    }

    for dto in &plan.create {
        let Some(name) = trimmed(&dto.name) else {
            warn!(%group_id, "Skipping new customization option with no name");
            continue;
        };

        let option = CustomizationOption {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            name: name.to_string(),
            additional_price_cents: dto.additional_price_cents(),
        };
        customization::insert_option(conn, &option).await?;
    }

    Ok(())
}

/// Creates a brand-new group with all of its options.
///
/// A group that arrives nameless or empty is dropped with a warn; the
/// rest of the reconciliation proceeds.
async fn create_group(
    conn: &mut SqliteConnection,
    menu_item_id: &str,
    dto: &CustomizationGroupInput,
) -> MenuResult<()> {
    let Some(name) = dto.trimmed_name() else {
        warn!(%menu_item_id, "Skipping new customization group with no name");
        return Ok(());
    };

    if dto.options.is_empty() {
        debug!(%menu_item_id, group_name = %name, "New customization group has no options, skipping");
        return Ok(());
    }

    let settings = dto.settings();
    let group = CustomizationGroup {
        id: Uuid::new_v4().to_string(),
        menu_item_id: menu_item_id.to_string(),
        name: name.to_string(),
        required: settings.required,
        min_selectable: settings.min_selectable,
        max_selectable: settings.max_selectable,
    };
    customization::insert_group(conn, &group).await?;

    let options: Vec<CustomizationOption> = dto
        .options
        .iter()
        .map(|o| CustomizationOption {
            id: Uuid::new_v4().to_string(),
            group_id: group.id.clone(),
            name: o.name.trim().to_string(),
            additional_price_cents: o.additional_price_cents(),
        })
        .collect();
    customization::insert_options(conn, &options).await?;

    Ok(())
}

fn trimmed(name: &str) -> Option<&str> {
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}
