use machex_catalog::CatalogError;
use machex_catalog::model::{NewItem, UpdateItem};
use machex_catalog::repository::CatalogRepository;
use machex_catalog::resolver::LegacyLookup;
use machex_database::Database;

async fn repository(db_name: &str) -> CatalogRepository {
    let db = Database::builder()
        .url("mem://")
        .session("catalog_test", db_name)
        .init()
        .await
        .expect("connect to mem://");
    CatalogRepository::new(db, '-')
}

fn new_item(display_name: &str) -> NewItem {
    NewItem { display_name: display_name.to_owned(), ..NewItem::default() }
}

#[tokio::test]
async fn create_derives_slug_and_key() {
    let repo = repository("create").await;

    let item = repo
        .create(NewItem {
            display_name: "Précision Lathe 200".to_owned(),
            category: Some("Metal Working".to_owned()),
            description: Some("A lathe".to_owned()),
            slug_override: None,
        })
        .await
        .expect("create item");

    assert_eq!(item.slug, "precision-lathe-200");
    assert_eq!(item.category_slug.as_deref(), Some("metal-working"));
    assert_eq!(item.id.len(), 12);

    let fetched = repo.get(&item.id).await.expect("fetch item");
    assert_eq!(fetched, item);
}

#[tokio::test]
async fn slug_override_is_still_normalized() {
    let repo = repository("override").await;

    let item = repo
        .create(NewItem {
            display_name: "Band Saw".to_owned(),
            slug_override: Some("  Custom SLUG!! ".to_owned()),
            ..NewItem::default()
        })
        .await
        .expect("create item");

    assert_eq!(item.slug, "custom-slug");
}

#[tokio::test]
async fn empty_display_name_is_rejected() {
    let repo = repository("validation").await;

    let err = repo.create(new_item("   ")).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation { .. }));
}

#[tokio::test]
async fn duplicate_slugs_conflict() {
    let repo = repository("conflict").await;

    repo.create(new_item("Drill Press")).await.expect("first create");
    let err = repo.create(new_item("Drill  Press!")).await.unwrap_err();
    assert!(matches!(err, CatalogError::Conflict { .. }), "got {err:?}");
}

#[tokio::test]
async fn rename_recomputes_slug_unless_overridden() {
    let repo = repository("rename").await;

    let item = repo.create(new_item("Old Name")).await.expect("create");
    assert_eq!(item.slug, "old-name");

    let renamed = repo
        .update(
            &item.id,
            UpdateItem { display_name: Some("New Name".to_owned()), ..UpdateItem::default() },
        )
        .await
        .expect("rename");
    assert_eq!(renamed.slug, "new-name");

    let pinned = repo
        .update(
            &renamed.id,
            UpdateItem {
                display_name: Some("Third Name".to_owned()),
                slug_override: Some("pinned".to_owned()),
                ..UpdateItem::default()
            },
        )
        .await
        .expect("pin slug");
    assert_eq!(pinned.slug, "pinned");
    assert_eq!(pinned.display_name, "Third Name");
}

#[tokio::test]
async fn update_of_unknown_entry_is_not_found() {
    let repo = repository("missing").await;

    let err = repo
        .update("2Qx7mKp9RtWz", UpdateItem { description: Some("x".to_owned()), ..UpdateItem::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[tokio::test]
async fn path_fields_projection_matches_stored_entry() {
    let repo = repository("projection").await;

    let item = repo
        .create(NewItem {
            display_name: "Surface Grinder".to_owned(),
            category: Some("Finishing".to_owned()),
            ..NewItem::default()
        })
        .await
        .expect("create");

    let fields = repo.find_path_fields(&item.id).await.expect("lookup").expect("present");
    assert_eq!(fields.slug.as_deref(), Some("surface-grinder"));
    assert_eq!(fields.category_slug.as_deref(), Some("finishing"));

    assert!(repo.find_path_fields("2Qx7mKp9RtWz").await.expect("lookup").is_none());
}

#[tokio::test]
async fn delete_removes_the_entry() {
    let repo = repository("delete").await;

    let item = repo.create(new_item("Shredder")).await.expect("create");
    let deleted = repo.delete(&item.id).await.expect("delete");
    assert_eq!(deleted.slug, "shredder");

    let err = repo.get(&item.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));

    // Freed slug can be reused.
    repo.create(new_item("Shredder")).await.expect("recreate");
}

#[tokio::test]
async fn listing_is_ordered_by_display_name() {
    let repo = repository("listing").await;

    repo.create(new_item("Zebra Striper")).await.expect("create");
    repo.create(new_item("Angle Grinder")).await.expect("create");

    let items = repo.list().await.expect("list");
    let names: Vec<_> = items.iter().map(|i| i.display_name.as_str()).collect();
    assert_eq!(names, ["Angle Grinder", "Zebra Striper"]);
}
