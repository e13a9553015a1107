//! Integration tests for the menu service: end-to-end reconciliation
//! against an in-memory SQLite database with a static role table.
//!
//! Fixture layout:
//! - store-1: "owner" (Owner), "admin" (Admin), "staff" (Staff)
//! - store-2: "owner2" (Owner)

use std::sync::Arc;

use bistro_core::dto::{
    CategoryRef, CreateMenuItemInput, CustomizationGroupInput, CustomizationOptionInput,
    UpdateMenuItemInput,
};
use bistro_core::{CustomizationGroupDetails, MenuError, MenuItemDetails, Money, Role};
use bistro_db::{Database, DbConfig, MenuService, StaticRoleSet};

// =============================================================================
// Fixtures
// =============================================================================

async fn service() -> MenuService {
    // RUST_LOG=debug cargo test -- --nocapture to watch the reconciler
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let roles = StaticRoleSet::new()
        .with_role("owner", "store-1", Role::Owner)
        .with_role("admin", "store-1", Role::Admin)
        .with_role("staff", "store-1", Role::Staff)
        .with_role("owner2", "store-2", Role::Owner);
    MenuService::new(db, Arc::new(roles))
}

fn money(s: &str) -> Money {
    s.parse().unwrap()
}

fn create_input(name: &str, category: CategoryRef) -> CreateMenuItemInput {
    CreateMenuItemInput {
        name: name.to_string(),
        description: None,
        base_price: money("9.50"),
        image_url: None,
        category,
        customization_groups: None,
    }
}

fn update_input() -> UpdateMenuItemInput {
    UpdateMenuItemInput {
        name: None,
        description: None,
        base_price: money("9.50"),
        image_url: None,
        is_hidden: None,
        category: None,
        customization_groups: None,
    }
}

fn group(name: &str, option_names: &[&str]) -> CustomizationGroupInput {
    CustomizationGroupInput {
        id: None,
        name: name.to_string(),
        required: None,
        min_selectable: None,
        max_selectable: None,
        options: option_names.iter().map(|n| option(n)).collect(),
    }
}

fn option(name: &str) -> CustomizationOptionInput {
    CustomizationOptionInput {
        id: None,
        name: name.to_string(),
        additional_price: None,
    }
}

fn group_named<'a>(details: &'a MenuItemDetails, name: &str) -> &'a CustomizationGroupDetails {
    details
        .customization_groups
        .iter()
        .find(|g| g.group.name == name)
        .unwrap_or_else(|| panic!("no group named {name}"))
}

// =============================================================================
// Create: category resolution
// =============================================================================

#[tokio::test]
async fn test_create_with_new_category() {
    let svc = service().await;

    let details = svc
        .create_menu_item("owner", "store-1", &create_input("Pad Krapow", CategoryRef::by_name("Curry")))
        .await
        .unwrap();

    assert_eq!(details.item.name, "Pad Krapow");
    assert_eq!(details.item.base_price(), money("9.50"));
    assert!(!details.item.is_hidden);
    assert_eq!(details.item.sort_order, 0);
    assert_eq!(details.category.name, "Curry");
    // first category in the store lands at position 0
    assert_eq!(details.category.sort_order, 0);
    assert!(details.customization_groups.is_empty());
}

#[tokio::test]
async fn test_second_category_sorts_after_first() {
    let svc = service().await;

    svc.create_menu_item("owner", "store-1", &create_input("Green Curry", CategoryRef::by_name("Curry")))
        .await
        .unwrap();
    let details = svc
        .create_menu_item("owner", "store-1", &create_input("Coke", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();

    assert_eq!(details.category.sort_order, 1);
}

#[tokio::test]
async fn test_category_find_by_name_is_idempotent() {
    let svc = service().await;

    let first = svc
        .create_menu_item("owner", "store-1", &create_input("Green Curry", CategoryRef::by_name("Curry")))
        .await
        .unwrap();
    let second = svc
        .create_menu_item("owner", "store-1", &create_input("Red Curry", CategoryRef::by_name("Curry")))
        .await
        .unwrap();

    assert_eq!(first.category.id, second.category.id);
    // items order within the shared category
    assert_eq!(first.item.sort_order, 0);
    assert_eq!(second.item.sort_order, 1);
}

#[tokio::test]
async fn test_category_rename_by_id() {
    let svc = service().await;

    let created = svc
        .create_menu_item("owner", "store-1", &create_input("Green Curry", CategoryRef::by_name("Curry")))
        .await
        .unwrap();

    let mut dto = update_input();
    dto.category = Some(CategoryRef::by_id(&created.category.id, "Thai Curry"));
    let updated = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap();

    assert_eq!(updated.category.id, created.category.id);
    assert_eq!(updated.category.name, "Thai Curry");
}

#[tokio::test]
async fn test_category_rename_scoped_to_store() {
    let svc = service().await;

    // category lives in store-1
    let created = svc
        .create_menu_item("owner", "store-1", &create_input("Green Curry", CategoryRef::by_name("Curry")))
        .await
        .unwrap();

    // owner2 references it by id from store-2: indistinguishable from a
    // missing id, and nothing is persisted in store-2
    let err = svc
        .create_menu_item(
            "owner2",
            "store-2",
            &create_input("Hijack", CategoryRef::by_id(&created.category.id, "Stolen")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::NotFound { .. }));

    assert!(svc.store_menu("store-2").await.unwrap().is_empty());
    // the store-1 category kept its name
    let unchanged = svc.menu_item(&created.item.id).await.unwrap();
    assert_eq!(unchanged.category.name, "Curry");
}

#[tokio::test]
async fn test_category_name_is_required() {
    let svc = service().await;

    let err = svc
        .create_menu_item("owner", "store-1", &create_input("Nameless", CategoryRef::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::Validation(_)));

    let err = svc
        .create_menu_item("owner", "store-1", &create_input("Blank", CategoryRef::by_name("   ")))
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::Validation(_)));
}

// =============================================================================
// Create: customizations
// =============================================================================

#[tokio::test]
async fn test_create_with_customizations() {
    let svc = service().await;

    let mut dto = create_input("Latte", CategoryRef::by_name("Drinks"));
    let mut size = group("Size", &["Small", "Large"]);
    size.required = Some(true);
    size.options[1].additional_price = Some(money("1.50"));
    dto.customization_groups = Some(vec![size]);

    let details = svc.create_menu_item("owner", "store-1", &dto).await.unwrap();

    assert_eq!(details.customization_groups.len(), 1);
    let size = group_named(&details, "Size");
    assert!(size.group.required);
    // required defaults min to 1, max stays at its default of 1
    assert_eq!(size.group.min_selectable, 1);
    assert_eq!(size.group.max_selectable, 1);

    // options come back alphabetical
    let names: Vec<&str> = size.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["Large", "Small"]);
    assert_eq!(size.options[0].additional_price_cents, 150);
    assert_eq!(size.options[1].additional_price_cents, 0);
}

#[tokio::test]
async fn test_group_without_options_is_skipped() {
    let svc = service().await;

    let mut dto = create_input("Latte", CategoryRef::by_name("Drinks"));
    dto.customization_groups = Some(vec![group("Size", &[])]);

    let details = svc.create_menu_item("owner", "store-1", &dto).await.unwrap();
    // the group is dropped with a warn, the item itself is created
    assert!(details.customization_groups.is_empty());
}

#[tokio::test]
async fn test_blank_group_name_is_skipped_on_create() {
    let svc = service().await;

    let mut dto = create_input("Latte", CategoryRef::by_name("Drinks"));
    dto.customization_groups = Some(vec![group("  ", &["Small"]), group("Milk", &["Oat"])]);

    let details = svc.create_menu_item("owner", "store-1", &dto).await.unwrap();
    assert_eq!(details.customization_groups.len(), 1);
    assert_eq!(details.customization_groups[0].group.name, "Milk");
}

#[tokio::test]
async fn test_base_price_must_be_positive() {
    let svc = service().await;

    let mut dto = create_input("Freebie", CategoryRef::by_name("Curry"));
    dto.base_price = money("0");

    let err = svc.create_menu_item("owner", "store-1", &dto).await.unwrap_err();
    assert!(matches!(err, MenuError::Validation(_)));
}

// =============================================================================
// Update: scalars
// =============================================================================

#[tokio::test]
async fn test_update_coalesces_absent_scalars() {
    let svc = service().await;

    let mut create = create_input("Latte", CategoryRef::by_name("Drinks"));
    create.description = Some("Espresso and milk".to_string());
    let created = svc.create_menu_item("owner", "store-1", &create).await.unwrap();

    let mut dto = update_input();
    dto.base_price = money("4.00");
    let updated = svc
        .update_menu_item("admin", "store-1", &created.item.id, &dto)
        .await
        .unwrap();

    // base price always overwritten, everything else kept
    assert_eq!(updated.item.base_price_cents, 400);
    assert_eq!(updated.item.name, "Latte");
    assert_eq!(updated.item.description.as_deref(), Some("Espresso and milk"));
}

#[tokio::test]
async fn test_update_is_hidden_round_trip() {
    let svc = service().await;

    let created = svc
        .create_menu_item("owner", "store-1", &create_input("Latte", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();

    let mut dto = update_input();
    dto.is_hidden = Some(true);
    let hidden = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap();
    assert!(hidden.item.is_hidden);

    // absent flag keeps the stored value
    let unchanged = svc
        .update_menu_item("owner", "store-1", &created.item.id, &update_input())
        .await
        .unwrap();
    assert!(unchanged.item.is_hidden);
}

#[tokio::test]
async fn test_update_missing_item_is_not_found() {
    let svc = service().await;

    let err = svc
        .update_menu_item("owner", "store-1", "ghost", &update_input())
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_foreign_item_is_forbidden() {
    let svc = service().await;

    let created = svc
        .create_menu_item("owner", "store-1", &create_input("Latte", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();

    let err = svc
        .update_menu_item("owner2", "store-2", &created.item.id, &update_input())
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::Forbidden(_)));
}

#[tokio::test]
async fn test_failed_update_leaves_item_untouched() {
    let svc = service().await;

    let created = svc
        .create_menu_item("owner", "store-1", &create_input("Latte", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();

    // category resolution fails mid-transaction; the scalar changes in
    // the same request must not survive
    let mut dto = update_input();
    dto.name = Some("Flat White".to_string());
    dto.base_price = money("4.00");
    dto.category = Some(CategoryRef::by_id("ghost-category", "Coffee"));

    let err = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::NotFound { .. }));

    let unchanged = svc.menu_item(&created.item.id).await.unwrap();
    assert_eq!(unchanged.item.name, "Latte");
    assert_eq!(unchanged.item.base_price_cents, 950);
}

// =============================================================================
// Update: customization sync
// =============================================================================

#[tokio::test]
async fn test_sync_updates_deletes_and_keeps_identity() {
    let svc = service().await;

    let mut create = create_input("Latte", CategoryRef::by_name("Drinks"));
    create.customization_groups = Some(vec![group("Size", &["Smal", "Medium"])]);
    let created = svc.create_menu_item("owner", "store-1", &create).await.unwrap();

    let size = group_named(&created, "Size");
    let typo = size.options.iter().find(|o| o.name == "Smal").unwrap();
    let medium = size.options.iter().find(|o| o.name == "Medium").unwrap();

    // desired state: fix the typo, drop Medium
    let mut dto = update_input();
    dto.customization_groups = Some(vec![CustomizationGroupInput {
        id: Some(size.group.id.clone()),
        name: "Size".to_string(),
        required: None,
        min_selectable: None,
        max_selectable: None,
        options: vec![CustomizationOptionInput {
            id: Some(typo.id.clone()),
            name: "Small".to_string(),
            additional_price: None,
        }],
    }]);

    let updated = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap();

    let size_after = group_named(&updated, "Size");
    assert_eq!(size_after.group.id, size.group.id);
    assert_eq!(size_after.options.len(), 1);
    // the renamed option kept its identity, the omitted one is gone
    assert_eq!(size_after.options[0].id, typo.id);
    assert_eq!(size_after.options[0].name, "Small");
    assert!(!size_after.options.iter().any(|o| o.id == medium.id));
}

#[tokio::test]
async fn test_omitted_groups_field_leaves_graph_alone() {
    let svc = service().await;

    let mut create = create_input("Latte", CategoryRef::by_name("Drinks"));
    create.customization_groups = Some(vec![group("Size", &["Small"])]);
    let created = svc.create_menu_item("owner", "store-1", &create).await.unwrap();

    let updated = svc
        .update_menu_item("owner", "store-1", &created.item.id, &update_input())
        .await
        .unwrap();

    assert_eq!(updated.customization_groups.len(), 1);
    assert_eq!(
        updated.customization_groups[0].group.id,
        created.customization_groups[0].group.id
    );
}

#[tokio::test]
async fn test_empty_groups_field_deletes_everything() {
    let svc = service().await;

    let mut create = create_input("Latte", CategoryRef::by_name("Drinks"));
    create.customization_groups = Some(vec![group("Size", &["Small"]), group("Milk", &["Oat"])]);
    let created = svc.create_menu_item("owner", "store-1", &create).await.unwrap();
    assert_eq!(created.customization_groups.len(), 2);

    let mut dto = update_input();
    dto.customization_groups = Some(vec![]);
    let updated = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap();

    assert!(updated.customization_groups.is_empty());
}

#[tokio::test]
async fn test_sync_may_empty_a_surviving_group() {
    let svc = service().await;

    let mut create = create_input("Latte", CategoryRef::by_name("Drinks"));
    create.customization_groups = Some(vec![group("Size", &["Small"])]);
    let created = svc.create_menu_item("owner", "store-1", &create).await.unwrap();
    let group_id = created.customization_groups[0].group.id.clone();

    // a matched group with an empty option list keeps the group but
    // deletes every option (unlike creation, where it would be skipped)
    let mut dto = update_input();
    let mut size = group("Size", &[]);
    size.id = Some(group_id.clone());
    dto.customization_groups = Some(vec![size]);

    let updated = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap();

    assert_eq!(updated.customization_groups.len(), 1);
    assert_eq!(updated.customization_groups[0].group.id, group_id);
    assert!(updated.customization_groups[0].options.is_empty());
}

#[tokio::test]
async fn test_blank_named_entry_still_shields_its_row() {
    let svc = service().await;

    let mut create = create_input("Latte", CategoryRef::by_name("Drinks"));
    create.customization_groups = Some(vec![group("Size", &["Small"])]);
    let created = svc.create_menu_item("owner", "store-1", &create).await.unwrap();
    let group_id = created.customization_groups[0].group.id.clone();

    // the entry is malformed (blank name) so its update is skipped, but
    // mentioning the id protects the row from the delete sweep
    let mut dto = update_input();
    let mut blank = group("   ", &["Small"]);
    blank.id = Some(group_id.clone());
    dto.customization_groups = Some(vec![blank]);

    let updated = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap();

    assert_eq!(updated.customization_groups.len(), 1);
    assert_eq!(updated.customization_groups[0].group.id, group_id);
    assert_eq!(updated.customization_groups[0].group.name, "Size");
}

#[tokio::test]
async fn test_unknown_group_id_becomes_a_fresh_creation() {
    let svc = service().await;

    let mut create = create_input("Latte", CategoryRef::by_name("Drinks"));
    create.customization_groups = Some(vec![group("Size", &["Small"])]);
    let created = svc.create_menu_item("owner", "store-1", &create).await.unwrap();

    let mut dto = update_input();
    let mut extras = group("Extras", &["Cheese"]);
    extras.id = Some("ghost-group".to_string());
    dto.customization_groups = Some(vec![extras]);

    let updated = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap();

    // Size was not mentioned, so it is gone; Extras exists under an id
    // the reconciler assigned, not the supplied one
    assert_eq!(updated.customization_groups.len(), 1);
    let extras = group_named(&updated, "Extras");
    assert_ne!(extras.group.id, "ghost-group");
    assert_eq!(extras.options.len(), 1);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_is_idempotent() {
    let svc = service().await;

    let created = svc
        .create_menu_item("owner", "store-1", &create_input("Latte", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();

    let id = svc
        .delete_menu_item("owner", "store-1", &created.item.id)
        .await
        .unwrap();
    assert_eq!(id, created.item.id);

    let err = svc.menu_item(&created.item.id).await.unwrap_err();
    assert!(matches!(err, MenuError::NotFound { .. }));

    // a retried delete succeeds instead of erroring
    let id = svc
        .delete_menu_item("owner", "store-1", &created.item.id)
        .await
        .unwrap();
    assert_eq!(id, created.item.id);
}

#[tokio::test]
async fn test_delete_foreign_item_is_forbidden() {
    let svc = service().await;

    let created = svc
        .create_menu_item("owner", "store-1", &create_input("Latte", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();

    let err = svc
        .delete_menu_item("owner2", "store-2", &created.item.id)
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::Forbidden(_)));
    // still there
    assert!(svc.menu_item(&created.item.id).await.is_ok());
}

// =============================================================================
// Authorization
// =============================================================================

#[tokio::test]
async fn test_staff_and_strangers_cannot_write() {
    let svc = service().await;

    let dto = create_input("Latte", CategoryRef::by_name("Drinks"));

    let err = svc.create_menu_item("staff", "store-1", &dto).await.unwrap_err();
    assert!(matches!(err, MenuError::Forbidden(_)));

    let err = svc.create_menu_item("nobody", "store-1", &dto).await.unwrap_err();
    assert!(matches!(err, MenuError::Forbidden(_)));

    // denied before any write: not even the category was created
    assert!(svc.store_menu("store-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_can_write() {
    let svc = service().await;

    let details = svc
        .create_menu_item("admin", "store-1", &create_input("Latte", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();
    assert_eq!(details.item.name, "Latte");

    svc.delete_menu_item("admin", "store-1", &details.item.id)
        .await
        .unwrap();
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_wire_shaped_update_payload() {
    let svc = service().await;

    let mut create = create_input("Latte", CategoryRef::by_name("Drinks"));
    create.customization_groups = Some(vec![group("Size", &["Small"])]);
    let created = svc.create_menu_item("owner", "store-1", &create).await.unwrap();
    let size = &created.customization_groups[0];

    // exactly what the HTTP boundary hands over: camelCase keys,
    // decimal-string prices
    let json = format!(
        r#"{{
            "basePrice": "10.00",
            "isHidden": true,
            "customizationGroups": [{{
                "id": "{}",
                "name": "Size",
                "required": true,
                "options": [{{ "id": "{}", "name": "Small", "additionalPrice": "0.50" }}]
            }}]
        }}"#,
        size.group.id, size.options[0].id
    );
    let dto: UpdateMenuItemInput = serde_json::from_str(&json).unwrap();

    let updated = svc
        .update_menu_item("owner", "store-1", &created.item.id, &dto)
        .await
        .unwrap();

    assert_eq!(updated.item.base_price_cents, 1000);
    assert!(updated.item.is_hidden);
    let size = group_named(&updated, "Size");
    assert!(size.group.required);
    assert_eq!(size.group.min_selectable, 1);
    assert_eq!(size.options[0].additional_price_cents, 50);
}

#[tokio::test]
async fn test_store_menu_in_display_order() {
    let svc = service().await;

    // categories get positions in creation order: Curry 0, Drinks 1
    svc.create_menu_item("owner", "store-1", &create_input("Green Curry", CategoryRef::by_name("Curry")))
        .await
        .unwrap();
    svc.create_menu_item("owner", "store-1", &create_input("Coke", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();
    svc.create_menu_item("owner", "store-1", &create_input("Red Curry", CategoryRef::by_name("Curry")))
        .await
        .unwrap();

    let menu = svc.store_menu("store-1").await.unwrap();
    let names: Vec<&str> = menu.iter().map(|d| d.item.name.as_str()).collect();
    assert_eq!(names, ["Green Curry", "Red Curry", "Coke"]);
}

#[tokio::test]
async fn test_store_menu_is_per_store() {
    let svc = service().await;

    svc.create_menu_item("owner", "store-1", &create_input("Latte", CategoryRef::by_name("Drinks")))
        .await
        .unwrap();
    svc.create_menu_item("owner2", "store-2", &create_input("Espresso", CategoryRef::by_name("Coffee")))
        .await
        .unwrap();

    let menu = svc.store_menu("store-2").await.unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].item.name, "Espresso");
}
