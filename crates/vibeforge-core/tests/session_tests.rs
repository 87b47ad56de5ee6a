//! Integration tests driving a whole project session: plan, approve,
//! merge, persist, preview.

use std::sync::Arc;
use std::time::Duration;
use vibeforge_core::{ProjectSession, SessionConfig, SessionError};
use vibeforge_llm::testing::ScriptedClient;
use vibeforge_project::ProjectPath;
use vibeforge_store::{MemoryStore, ProjectStore, StaticIdentity, StoreError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vibeforge_core=debug")
        .with_test_writer()
        .try_init();
}

fn test_config() -> SessionConfig {
    SessionConfig::new().with_refresh_delay(Duration::ZERO)
}

fn identity() -> Arc<StaticIdentity> {
    Arc::new(StaticIdentity::new("user_1", "Alex"))
}

const EXECUTION_JSON: &str = r#"Sure thing:
{"updated_files":{"src/App.tsx":"export default function App(){ return <div>Counter</div> }"},"execution_summary":"added a counter"}"#;

#[tokio::test]
async fn full_cycle_plans_executes_and_persists() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let client = Arc::new(
        ScriptedClient::new()
            .with_ok("### File: src/App.tsx\nReplace the body with a counter.")
            .with_ok(EXECUTION_JSON),
    );

    let mut session = ProjectSession::new(
        store.clone(),
        Some(identity()),
        client,
        test_config(),
        "counter-app",
        "a counting app",
    );

    let plan = session.plan("Add a counter").await.unwrap();
    assert_eq!(plan.files_to_modify, vec!["src/App.tsx"]);

    let id = session.save().await.unwrap();
    let outcome = session.approve().await.unwrap();
    assert_eq!(outcome.summary, "added a counter");

    // Merge landed in memory and in the persisted blob.
    assert!(session
        .files()
        .get(&ProjectPath::new("src/App.tsx"))
        .unwrap()
        .contains("Counter"));
    let stored = store.get_project(id).await.unwrap();
    let blob = stored.code.unwrap();
    assert!(blob["src/App.tsx"].as_str().unwrap().contains("Counter"));
}

#[tokio::test]
async fn approve_refreshes_live_preview() {
    init_tracing();
    let client = Arc::new(ScriptedClient::new().with_ok("plan").with_ok(EXECUTION_JSON));
    let mut session = ProjectSession::new(
        Arc::new(MemoryStore::new()),
        Some(identity()),
        client,
        test_config(),
        "demo",
        "",
    );

    session.start_preview().unwrap();
    let first_handle = session.preview().unwrap().handle;
    assert!(session.preview().unwrap().html.contains("Hello Vibeforge!"));

    session.plan("Add a counter").await.unwrap();
    session.approve().await.unwrap();

    let refreshed = session.preview().unwrap();
    assert_ne!(refreshed.handle, first_handle, "a fresh handle was installed");
    assert!(refreshed.html.contains("Counter"));
}

#[tokio::test]
async fn save_without_identity_is_blocked() {
    let client = Arc::new(ScriptedClient::new());
    let mut session = ProjectSession::new(
        Arc::new(MemoryStore::new()),
        None,
        client,
        test_config(),
        "demo",
        "",
    );

    let err = session.save().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Store(StoreError::IdentityRequired)
    ));
    assert!(session.record().is_none());
}

#[tokio::test]
async fn load_round_trips_saved_files() {
    let store = Arc::new(MemoryStore::new());
    let client = Arc::new(ScriptedClient::new());

    let mut session = ProjectSession::new(
        store.clone(),
        Some(identity()),
        client.clone(),
        test_config(),
        "demo",
        "desc",
    );
    let id = session.save().await.unwrap();

    let loaded = ProjectSession::load(store, identity(), client, test_config(), id)
        .await
        .unwrap();
    assert_eq!(loaded.files(), session.files());
    assert_eq!(loaded.name(), "demo");
}

#[tokio::test]
async fn load_enforces_ownership() {
    let store = Arc::new(MemoryStore::new());
    let client = Arc::new(ScriptedClient::new());

    let mut session = ProjectSession::new(
        store.clone(),
        Some(identity()),
        client.clone(),
        test_config(),
        "demo",
        "",
    );
    let id = session.save().await.unwrap();

    let stranger = Arc::new(StaticIdentity::new("user_2", "Sam"));
    let err = ProjectSession::load(store, stranger, client, test_config(), id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Store(StoreError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn unsaved_session_does_not_touch_the_store() {
    let store = Arc::new(MemoryStore::new());
    let client = Arc::new(ScriptedClient::new().with_ok("plan").with_ok(EXECUTION_JSON));

    let mut session = ProjectSession::new(
        store.clone(),
        None,
        client,
        test_config(),
        "demo",
        "",
    );
    session.plan("x").await.unwrap();
    session.approve().await.unwrap();

    assert!(store.is_empty(), "no record was ever created");
    assert!(session
        .files()
        .get(&ProjectPath::new("src/App.tsx"))
        .unwrap()
        .contains("Counter"));
}

#[tokio::test]
async fn new_project_resets_everything() {
    let client = Arc::new(ScriptedClient::new().with_ok("plan").with_ok(EXECUTION_JSON));
    let mut session = ProjectSession::new(
        Arc::new(MemoryStore::new()),
        Some(identity()),
        client,
        test_config(),
        "demo",
        "",
    );

    session.plan("x").await.unwrap();
    session.approve().await.unwrap();
    session.start_preview().unwrap();
    session.save().await.unwrap();

    session.new_project();
    assert_eq!(session.phase(), vibeforge_core::ProjectPhase::Planning);
    assert!(session.preview().is_none());
    assert!(session.record().is_none());
    assert!(session
        .files()
        .get(&ProjectPath::new("src/App.tsx"))
        .unwrap()
        .contains("Hello Vibeforge!"));
}

#[tokio::test]
async fn stop_preview_releases_the_handle() {
    let client = Arc::new(ScriptedClient::new());
    let mut session = ProjectSession::new(
        Arc::new(MemoryStore::new()),
        None,
        client,
        test_config(),
        "demo",
        "",
    );

    session.start_preview().unwrap();
    assert!(session.preview().is_some());
    session.stop_preview();
    assert!(session.preview().is_none());
}
