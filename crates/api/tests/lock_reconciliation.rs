//! Integration tests for lock reconciliation through `LockoutEngine`.
//!
//! Every breaker mutation must leave `locks.used` / `locks.assigned_to`
//! matching the breaker table.

use assert_matches::assert_matches;
use loto_api::engine::aggregate::drift_report;
use loto_api::engine::LockoutEngine;
use loto_api::error::AppError;
use loto_core::audit::UserMode;
use loto_core::breaker::BreakerState;
use loto_core::error::CoreError;
use loto_db::models::breaker::{Breaker, CreateBreaker, UpdateBreaker};
use loto_db::models::lock::{Lock, LockInput};
use loto_db::repositories::{HistoryRepo, LockRepo};
use sqlx::PgPool;

const EDITOR: UserMode = UserMode::Editor;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn breaker_input(name: &str, state: BreakerState, lock_key: Option<&str>) -> CreateBreaker {
    CreateBreaker {
        name: name.to_string(),
        zone: "Zone A".to_string(),
        location: "Building 1".to_string(),
        state,
        lock_key: lock_key.map(str::to_string),
        general_breaker: None,
    }
}

fn lock_input(key: &str) -> LockInput {
    LockInput {
        key_number: key.to_string(),
        zone: "Zone A".to_string(),
        used: false,
        assigned_to: None,
        remarks: None,
    }
}

async fn lock(pool: &PgPool, key: &str) -> Lock {
    LockRepo::find_by_key(pool, key)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("lock {key} missing"))
}

async fn history_len(pool: &PgPool) -> usize {
    HistoryRepo::list(pool, None).await.unwrap().len()
}

fn edit(breaker: &Breaker) -> UpdateBreaker {
    UpdateBreaker::from(breaker)
}

async fn setup(pool: &PgPool, keys: &[&str]) -> LockoutEngine {
    let engine = LockoutEngine::new(pool.clone());
    for key in keys {
        engine.create_lock(EDITOR, &lock_input(key)).await.unwrap();
    }
    engine
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_closed_breaker_claims_lock(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;

    engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();

    let k001 = lock(&pool, "K001").await;
    assert!(k001.used);
    assert_eq!(k001.assigned_to.as_deref(), Some("B1"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_off_breaker_leaves_lock_free(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;

    engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Off, Some("K001")))
        .await
        .unwrap();

    assert!(!lock(&pool, "K001").await.used);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unresolved_key_is_tolerated(pool: PgPool) {
    let engine = setup(&pool, &[]).await;

    let breaker = engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Closed, Some("K404")))
        .await
        .unwrap();

    assert_eq!(breaker.lock_key.as_deref(), Some("K404"));
    assert!(LockRepo::find_by_key(&pool, "K404").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_key_is_stored_as_absent(pool: PgPool) {
    let engine = setup(&pool, &[]).await;

    let breaker = engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Closed, Some("   ")))
        .await
        .unwrap();

    assert!(breaker.lock_key.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_name_is_rejected(pool: PgPool) {
    let engine = setup(&pool, &[]).await;

    let result = engine
        .create_breaker(EDITOR, &breaker_input("  ", BreakerState::Off, None))
        .await;

    assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_lock_resolves_pending_reference(pool: PgPool) {
    let engine = setup(&pool, &[]).await;
    engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Closed, Some("K007")))
        .await
        .unwrap();

    let created = engine.create_lock(EDITOR, &lock_input("K007")).await.unwrap();

    assert!(created.used);
    assert_eq!(created.assigned_to.as_deref(), Some("B1"));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_closed_to_off_releases_lock(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;
    let b = engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();

    engine
        .update_breaker(EDITOR, b.id, &edit(&b).with_state(BreakerState::Off))
        .await
        .unwrap();

    let k001 = lock(&pool, "K001").await;
    assert!(!k001.used);
    assert!(k001.assigned_to.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_key_change_releases_old_and_claims_new(pool: PgPool) {
    let engine = setup(&pool, &["K001", "K002"]).await;
    let b = engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();

    let mut input = edit(&b);
    input.lock_key = Some("K002".to_string());
    engine.update_breaker(EDITOR, b.id, &input).await.unwrap();

    let k001 = lock(&pool, "K001").await;
    let k002 = lock(&pool, "K002").await;
    assert!(!k001.used);
    assert!(k001.assigned_to.is_none());
    assert!(k002.used);
    assert_eq!(k002.assigned_to.as_deref(), Some("B1"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_relabels_lock_and_children(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;
    let parent = engine
        .create_breaker(EDITOR, &breaker_input("Main", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();
    let mut child = breaker_input("Child", BreakerState::On, None);
    child.general_breaker = Some("Main".to_string());
    let child = engine.create_breaker(EDITOR, &child).await.unwrap();

    let mut input = edit(&parent);
    input.name = "Main Panel".to_string();
    engine.update_breaker(EDITOR, parent.id, &input).await.unwrap();

    assert_eq!(lock(&pool, "K001").await.assigned_to.as_deref(), Some("Main Panel"));
    let child = loto_db::repositories::BreakerRepo::find_by_id(&pool, child.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(child.general_breaker.as_deref(), Some("Main Panel"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_key_change_on_off_breaker_releases_old_key(pool: PgPool) {
    let engine = setup(&pool, &["K2"]).await;
    LockRepo::create(
        &pool,
        &LockInput {
            used: true,
            assigned_to: Some("X".to_string()),
            ..lock_input("K1")
        },
    )
    .await
    .unwrap();
    let x = engine
        .create_breaker(EDITOR, &breaker_input("X", BreakerState::Off, Some("K1")))
        .await
        .unwrap();

    let mut input = edit(&x);
    input.lock_key = Some("K2".to_string());
    engine.update_breaker(EDITOR, x.id, &input).await.unwrap();

    let k1 = lock(&pool, "K1").await;
    assert!(!k1.used);
    assert!(k1.assigned_to.is_none());
    let k2 = lock(&pool, "K2").await;
    assert!(!k2.used, "an Off breaker does not claim its new key");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_shared_key_released_by_other_breaker_is_restored_by_resync(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;
    engine
        .create_breaker(EDITOR, &breaker_input("Holder", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();
    let other = engine
        .create_breaker(EDITOR, &breaker_input("Other", BreakerState::Off, Some("K001")))
        .await
        .unwrap();

    let mut input = edit(&other);
    input.lock_key = None;
    engine.update_breaker(EDITOR, other.id, &input).await.unwrap();

    assert!(!lock(&pool, "K001").await.used);
    let drift = drift_report(&pool).await.unwrap();
    assert_eq!(drift.len(), 1);
    assert_eq!(drift[0].expected_assigned_to.as_deref(), Some("Holder"));

    engine.resync_locks(EDITOR).await.unwrap();
    let k001 = lock(&pool, "K001").await;
    assert!(k001.used);
    assert_eq!(k001.assigned_to.as_deref(), Some("Holder"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_claim_overwrites_assignee(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;
    engine
        .create_breaker(EDITOR, &breaker_input("First", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();
    engine
        .create_breaker(EDITOR, &breaker_input("Second", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();

    assert_eq!(lock(&pool, "K001").await.assigned_to.as_deref(), Some("Second"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_breaker_is_not_found(pool: PgPool) {
    let engine = setup(&pool, &[]).await;
    let b = engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Off, None))
        .await
        .unwrap();

    let result = engine.update_breaker(EDITOR, b.id + 1000, &edit(&b)).await;

    assert_matches!(
        result,
        Err(AppError::Core(CoreError::NotFound { entity: "Breaker", .. }))
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_closed_breaker_releases_lock(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;
    let b = engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();

    engine.delete_breaker(EDITOR, b.id).await.unwrap();

    let k001 = lock(&pool, "K001").await;
    assert!(!k001.used);
    assert!(k001.assigned_to.is_none());
}

// ---------------------------------------------------------------------------
// Resync
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resync_repairs_corruption_and_is_idempotent(pool: PgPool) {
    let engine = setup(&pool, &["K001", "K002", "K005"]).await;
    engine
        .create_breaker(EDITOR, &breaker_input("A-1-01", BreakerState::Closed, Some("K001")))
        .await
        .unwrap();
    engine
        .create_breaker(EDITOR, &breaker_input("B-01", BreakerState::Closed, Some("K005")))
        .await
        .unwrap();

    // Corrupt the lock table by hand.
    sqlx::query("UPDATE locks SET used = TRUE, assigned_to = 'Ghost' WHERE key_number = 'K002'")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE locks SET used = FALSE, assigned_to = NULL WHERE key_number = 'K005'")
        .execute(&pool)
        .await
        .unwrap();

    let first = engine.resync_locks(EDITOR).await.unwrap();
    assert_eq!(first.updated_count, 2);
    let snapshot = LockRepo::list(&pool, &Default::default()).await.unwrap();

    let second = engine.resync_locks(EDITOR).await.unwrap();
    assert_eq!(second.updated_count, 2);
    let again = LockRepo::list(&pool, &Default::default()).await.unwrap();

    let state = |locks: &[Lock]| -> Vec<(String, bool, Option<String>)> {
        locks
            .iter()
            .map(|l| (l.key_number.clone(), l.used, l.assigned_to.clone()))
            .collect()
    };
    assert_eq!(state(&snapshot), state(&again));
    assert_eq!(
        state(&again),
        vec![
            ("K001".to_string(), true, Some("A-1-01".to_string())),
            ("K002".to_string(), false, None),
            ("K005".to_string(), true, Some("B-01".to_string())),
        ]
    );
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_every_mutation_appends_history(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;
    let before = history_len(&pool).await;

    let b = engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Off, Some("K001")))
        .await
        .unwrap();
    let after_create = history_len(&pool).await;
    assert_eq!(after_create, before + 1);

    engine
        .update_breaker(EDITOR, b.id, &edit(&b).with_state(BreakerState::Closed))
        .await
        .unwrap();
    let after_update = history_len(&pool).await;
    assert_eq!(after_update, after_create + 1);

    engine.delete_breaker(EDITOR, b.id).await.unwrap();
    assert_eq!(history_len(&pool).await, after_update + 1);

    let entries = HistoryRepo::list(&pool, Some(3)).await.unwrap();
    assert_eq!(entries[0].action, "Deleted breaker B1");
    assert_eq!(entries[1].action, "Breaker B1 locked");
    assert!(entries[1].breaker_id.is_none(), "deleting the breaker nulls its references");
    assert_eq!(entries[2].action, "Added breaker B1");
    assert!(entries.iter().all(|e| e.user_mode == UserMode::Editor));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_history_write_keeps_breaker_and_lock_changes(pool: PgPool) {
    let engine = setup(&pool, &["K001"]).await;
    sqlx::query("DROP TABLE history").execute(&pool).await.unwrap();

    let b = engine
        .create_breaker(EDITOR, &breaker_input("B1", BreakerState::Closed, Some("K001")))
        .await
        .expect("create must succeed without a history table");
    let stored = loto_db::repositories::BreakerRepo::find_by_id(&pool, b.id)
        .await
        .unwrap()
        .expect("breaker row committed");
    assert_eq!(stored.state, BreakerState::Closed);
    assert_eq!(lock(&pool, "K001").await.assigned_to.as_deref(), Some("B1"));

    let updated = engine
        .update_breaker(EDITOR, b.id, &edit(&b).with_state(BreakerState::Off))
        .await
        .expect("update must succeed without a history table");
    assert_eq!(updated.state, BreakerState::Off);
    assert!(!lock(&pool, "K001").await.used);
}
