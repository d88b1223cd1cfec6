use machex_audit::record;
use machex_database::Database;
use machex_event_bus::EventBus;
use machex_kernel::domain::catalog::{ItemMutation, MutationKind};
use std::time::Duration;

async fn database(db_name: &str) -> Database {
    Database::builder()
        .url("mem://")
        .session("audit_test", db_name)
        .init()
        .await
        .expect("connect to mem://")
}

async fn audit_count(db: &Database) -> i64 {
    db.query("count(SELECT * FROM audit)")
        .await
        .expect("count audit rows")
        .take::<Option<i64>>(0)
        .expect("parse count")
        .unwrap_or_default()
}

fn mutation(kind: MutationKind) -> ItemMutation {
    ItemMutation {
        kind,
        item_id: "2Qx7mKp9RtWz".to_owned(),
        slug: Some("lathe-200".to_owned()),
        actor: Some("admin".to_owned()),
    }
}

#[tokio::test]
async fn record_writes_one_row_per_mutation() {
    let db = database("direct").await;

    record(&db, &mutation(MutationKind::Created)).await.expect("record created");
    record(&db, &mutation(MutationKind::Deleted)).await.expect("record deleted");

    assert_eq!(audit_count(&db).await, 2);
}

#[tokio::test]
async fn recorder_task_consumes_published_events() {
    let db = database("subscriber").await;
    let events = EventBus::new();

    machex_audit::init(db.clone(), &events).expect("init audit slice");

    events.publish(mutation(MutationKind::Updated)).expect("publish");

    // The recorder runs on a background task; give it a moment.
    for _ in 0..50 {
        if audit_count(&db).await == 1 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("audit row was never written");
}
