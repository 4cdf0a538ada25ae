// tests/moderation_tests.rs
//
// Engine-level tests over the in-memory stores: authorization, thread
// integrity, and the delete/restore state machine.

use std::collections::HashSet;
use std::sync::Arc;

use gamestore::error::AppError;
use gamestore::moderation::{ModerationEngine, Principal, Role};
use gamestore::store::CommentStore;
use gamestore::store::memory::MemoryStore;

fn setup() -> (ModerationEngine, MemoryStore) {
    let store = MemoryStore::new();
    let engine = ModerationEngine::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    );
    (engine, store)
}

fn principal(user_id: i64, role: Role) -> Principal {
    let mut roles = HashSet::new();
    roles.insert(role);
    Principal::new(Some(user_id), roles)
}

#[tokio::test]
async fn create_sets_author_and_starts_active() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");

    let comment = engine
        .create(game, "Great game!".to_string(), None, &principal(author, Role::User))
        .await
        .expect("create should succeed");

    assert_eq!(comment.user_id, author);
    assert_eq!(comment.game_id, game);
    assert!(!comment.deleted);
    assert!(comment.parent_id.is_none());

    let listed = engine.list_for_game(game).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, comment.id);
}

#[tokio::test]
async fn create_fails_for_unknown_game() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");

    let err = engine
        .create(999, "hello".to_string(), None, &principal(author, Role::User))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn create_reply_to_missing_parent_fails() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");

    let err = engine
        .create(game, "reply".to_string(), Some(42), &principal(author, Role::User))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn create_reply_across_games_is_rejected_and_not_persisted() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game_a = store.seed_game("Hollow Depths");
    let game_b = store.seed_game("Starlane Tycoon");
    let p = principal(author, Role::User);

    let parent = engine
        .create(game_a, "on game A".to_string(), None, &p)
        .await
        .unwrap();

    let err = engine
        .create(game_b, "cross-game reply".to_string(), Some(parent.id), &p)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(engine.list_for_game(game_b).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_requires_an_existing_author_record() {
    let (engine, store) = setup();
    let game = store.seed_game("Hollow Depths");

    // Valid-looking principal whose user row does not exist.
    let err = engine
        .create(game, "hello".to_string(), None, &principal(999, Role::User))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccessDenied(_)));

    // Anonymous caller.
    let err = engine
        .create(game, "hello".to_string(), None, &Principal::anonymous())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccessDenied(_)));

    assert!(engine.list_for_game(game).await.unwrap().is_empty());
}

#[tokio::test]
async fn a_reply_never_references_itself() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");
    let p = principal(author, Role::User);

    let parent = engine
        .create(game, "parent".to_string(), None, &p)
        .await
        .unwrap();
    let reply = engine
        .create(game, "reply".to_string(), Some(parent.id), &p)
        .await
        .unwrap();

    // Ids are assigned by the store after validation, so a comment cannot
    // come into existence as its own parent.
    assert_ne!(reply.parent_id, Some(reply.id));
}

#[tokio::test]
async fn listing_never_exposes_deleted_comments() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");
    let p = principal(author, Role::User);

    let c1 = engine.create(game, "one".to_string(), None, &p).await.unwrap();
    let _c2 = engine.create(game, "two".to_string(), None, &p).await.unwrap();
    let c3 = engine.create(game, "three".to_string(), None, &p).await.unwrap();

    engine.delete(c1.id, &p).await.unwrap();
    engine.delete(c3.id, &p).await.unwrap();

    let listed = engine.list_for_game(game).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed.iter().all(|c| !c.deleted));
}

#[tokio::test]
async fn delete_then_restore_round_trips() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");
    let p = principal(author, Role::User);

    let comment = engine
        .create(game, "keep this body".to_string(), None, &p)
        .await
        .unwrap();

    engine.delete(comment.id, &p).await.unwrap();
    let restored = engine.restore(comment.id, &p).await.unwrap();

    assert!(!restored.deleted);
    assert_eq!(restored.body, "keep this body");
}

#[tokio::test]
async fn double_delete_conflicts_without_reverting() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");
    let p = principal(author, Role::User);

    let comment = engine.create(game, "bye".to_string(), None, &p).await.unwrap();

    engine.delete(comment.id, &p).await.unwrap();
    let err = engine.delete(comment.id, &p).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    // First delete still holds.
    let stored = store.get(comment.id).await.unwrap().unwrap();
    assert!(stored.deleted);
}

#[tokio::test]
async fn restore_of_an_active_comment_conflicts() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");
    let p = principal(author, Role::User);

    let comment = engine.create(game, "hi".to_string(), None, &p).await.unwrap();

    let err = engine.restore(comment.id, &p).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn edit_is_author_only_even_for_moderators() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let moderator = store.seed_user("mod", "moderator");
    let game = store.seed_game("Hollow Depths");

    let comment = engine
        .create(game, "original".to_string(), None, &principal(author, Role::User))
        .await
        .unwrap();

    let err = engine
        .edit(
            comment.id,
            "defaced".to_string(),
            &principal(moderator, Role::Moderator),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccessDenied(_)));

    let stored = store.get(comment.id).await.unwrap().unwrap();
    assert_eq!(stored.body, "original");
}

#[tokio::test]
async fn edit_updates_body_and_nothing_else() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");
    let p = principal(author, Role::User);

    let comment = engine
        .create(game, "first draft".to_string(), None, &p)
        .await
        .unwrap();

    let edited = engine
        .edit(comment.id, "second draft".to_string(), &p)
        .await
        .unwrap();

    assert_eq!(edited.body, "second draft");
    assert_eq!(edited.user_id, comment.user_id);
    assert_eq!(edited.created_at, comment.created_at);
    assert!(!edited.deleted);
}

#[tokio::test]
async fn editing_a_deleted_comment_reports_not_found() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let game = store.seed_game("Hollow Depths");
    let p = principal(author, Role::User);

    let comment = engine.create(game, "gone".to_string(), None, &p).await.unwrap();
    engine.delete(comment.id, &p).await.unwrap();

    // Deliberately NotFound, not Conflict: an edit attempt must not reveal
    // that a deleted comment exists.
    let err = engine
        .edit(comment.id, "resurrect".to_string(), &p)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_and_restore_require_author_or_moderator() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    let outsider = store.seed_user("bob", "user");
    let moderator = store.seed_user("mod", "moderator");
    let game = store.seed_game("Hollow Depths");

    let comment = engine
        .create(game, "contested".to_string(), None, &principal(author, Role::User))
        .await
        .unwrap();

    // A plain user who is not the author gets denied.
    let err = engine
        .delete(comment.id, &principal(outsider, Role::User))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccessDenied(_)));

    // A moderator who is not the author succeeds, both ways.
    let m = principal(moderator, Role::Moderator);
    engine.delete(comment.id, &m).await.unwrap();

    let err = engine
        .restore(comment.id, &principal(outsider, Role::User))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccessDenied(_)));

    engine.restore(comment.id, &m).await.unwrap();
}

#[tokio::test]
async fn operations_on_missing_comments_report_not_found() {
    let (engine, store) = setup();
    let author = store.seed_user("alice", "user");
    store.seed_game("Hollow Depths");
    let p = principal(author, Role::User);

    assert!(matches!(
        engine.edit(404, "x".to_string(), &p).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        engine.delete(404, &p).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        engine.restore(404, &p).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn listing_an_unknown_game_reports_not_found() {
    let (engine, _store) = setup();

    let err = engine.list_for_game(7).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn threaded_scenario_keeps_order_through_moderation() {
    let (engine, store) = setup();
    let alice = store.seed_user("alice", "user");
    let bob = store.seed_user("bob", "user");
    let moderator = store.seed_user("mod", "moderator");
    let game = store.seed_game("Hollow Depths");

    // Alice opens a thread, Bob replies.
    let c1 = engine
        .create(game, "first!".to_string(), None, &principal(alice, Role::User))
        .await
        .unwrap();
    let c2 = engine
        .create(
            game,
            "replying to alice".to_string(),
            Some(c1.id),
            &principal(bob, Role::User),
        )
        .await
        .unwrap();

    // Newest first.
    let listed = engine.list_for_game(game).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![c2.id, c1.id]);

    // A moderator (not the author) hides the root, then brings it back.
    let m = principal(moderator, Role::Moderator);
    engine.delete(c1.id, &m).await.unwrap();

    let listed = engine.list_for_game(game).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![c2.id]);

    engine.restore(c1.id, &m).await.unwrap();

    let listed = engine.list_for_game(game).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![c2.id, c1.id]);
}
