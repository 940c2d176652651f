use std::sync::Arc;

use lms_portal::models::UserProfile;
use lms_portal::policy::Role;
use lms_portal::session::{AUTH_TOKEN_KEY, SessionStore};
use lms_portal::storage::{SqliteStorage, Storage};

fn grace() -> UserProfile {
    UserProfile {
        id: "12".to_string(),
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        role: "instructor".to_string(),
    }
}

#[tokio::test]
async fn set_get_overwrite_remove() {
    let storage = SqliteStorage::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory storage");

    assert_eq!(storage.get_item("authToken").await.unwrap(), None);

    storage.set_item("authToken", "first").await.unwrap();
    storage.set_item("authToken", "second").await.unwrap();
    assert_eq!(
        storage.get_item("authToken").await.unwrap().as_deref(),
        Some("second")
    );

    storage.remove_item("authToken").await.unwrap();
    assert_eq!(storage.get_item("authToken").await.unwrap(), None);

    // removing a missing key is fine
    storage.remove_item("authToken").await.unwrap();
}

#[tokio::test]
async fn session_survives_reconnect() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("session.db").display());

    {
        let storage = SqliteStorage::connect(&url).await.unwrap();
        let store = SessionStore::new(Arc::new(storage));
        store.store_login("tok-7", &grace()).await.unwrap();
    }

    let storage = Arc::new(SqliteStorage::connect(&url).await.unwrap());
    let store = SessionStore::new(storage.clone());
    let ctx = store.load_context().await.unwrap();

    assert_eq!(ctx.token.as_deref(), Some("tok-7"));
    assert_eq!(ctx.role, Some(Role::Instructor));
    assert_eq!(ctx.user, Some(grace()));
    assert_eq!(ctx.home_path(), Some("/instructor"));

    store.clear_auth_data().await.unwrap();
    assert_eq!(storage.get_item(AUTH_TOKEN_KEY).await.unwrap(), None);
    assert!(!store.load_context().await.unwrap().is_authenticated());
}
