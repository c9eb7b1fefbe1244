use chrono::{Duration, Utc};
use portico::auth::session as store;
use portico::models::session;
use portico::testing::TestApp;
use sea_orm::{ActiveModelTrait, Set};

#[tokio::test]
async fn create_then_load_round_trip() {
    let app = TestApp::new().await;

    let record = store::create_session(&app.db, "bob").await.unwrap();
    assert_eq!(record.username, "bob");
    assert!(record.expires_at > Utc::now().naive_utc());

    let loaded = store::load_session(&app.db, &record.id).await.unwrap();
    assert_eq!(loaded, Some(record));
}

#[tokio::test]
async fn missing_session_loads_as_none() {
    let app = TestApp::new().await;

    let loaded = store::load_session(&app.db, "no-such-id").await.unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn expired_session_loads_as_none() {
    let app = TestApp::new().await;
    let now = Utc::now().naive_utc();

    let expired = session::ActiveModel {
        id: Set("expired-session".to_string()),
        username: Set("bob".to_string()),
        expires_at: Set(now - Duration::hours(1)),
        created_at: Set(now - Duration::hours(2)),
    };
    expired.insert(&app.db).await.unwrap();

    let loaded = store::load_session(&app.db, "expired-session")
        .await
        .unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn destroy_is_idempotent() {
    let app = TestApp::new().await;

    let record = store::create_session(&app.db, "bob").await.unwrap();
    store::destroy_session(&app.db, &record.id).await.unwrap();
    assert_eq!(store::load_session(&app.db, &record.id).await.unwrap(), None);

    // destroying again is not an error
    store::destroy_session(&app.db, &record.id).await.unwrap();
}

#[tokio::test]
async fn purge_removes_only_expired_records() {
    let app = TestApp::new().await;
    let now = Utc::now().naive_utc();

    let live = store::create_session(&app.db, "alive").await.unwrap();
    let expired = session::ActiveModel {
        id: Set("stale".to_string()),
        username: Set("gone".to_string()),
        expires_at: Set(now - Duration::minutes(5)),
        created_at: Set(now - Duration::hours(1)),
    };
    expired.insert(&app.db).await.unwrap();

    let removed = store::purge_expired(&app.db).await.unwrap();
    assert_eq!(removed, 1);

    assert!(store::load_session(&app.db, &live.id).await.unwrap().is_some());
    assert_eq!(store::load_session(&app.db, "stale").await.unwrap(), None);
}
