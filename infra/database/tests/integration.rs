use machex_database::*;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    // Health should be OK for mem://
    db.health().await.expect("health check");
    db.use_ns("test_ns").use_db("test_db").await.expect("session switch");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn migrations_create_catalog_schema() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "migrated")
        .init()
        .await
        .expect("connect to mem://");

    // The unique slug index must exist after startup migrations.
    let mut response = db
        .query("!(SELECT VALUE indexes FROM ONLY INFO FOR TABLE item).is_empty()")
        .await
        .expect("inspect item table");
    let has_indexes = response.take::<Option<bool>>(0).expect("parse").unwrap_or_default();
    assert!(has_indexes, "item table should carry the unique slug index");
}

#[tokio::test]
async fn migrations_are_idempotent_per_datastore() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "ledger")
        .init()
        .await
        .expect("connect to mem://");

    let mut response = db.query("count(SELECT * FROM migration)").await.expect("count ledger");
    let count = response.take::<Option<i64>>(0).expect("parse").unwrap_or_default();
    assert!(count >= 4, "every builtin revision should be recorded once");
}
