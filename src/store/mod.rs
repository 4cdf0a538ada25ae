// src/store/mod.rs

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        comment::{Comment, NewComment},
        game::Game,
        user::User,
    },
};

/// Read access to the games catalog. The catalog is owned by another
/// service; this one never writes it.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn exists(&self, game_id: i64) -> Result<bool, AppError>;
    async fn get(&self, game_id: i64) -> Result<Option<Game>, AppError>;
    async fn list(&self) -> Result<Vec<Game>, AppError>;
}

/// Author-record lookups.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, user_id: i64) -> Result<Option<User>, AppError>;
}

/// Comment persistence. Reads are served directly; writes go through a
/// [`CommentUnitOfWork`] so that everything staged since `begin` lands
/// atomically on commit.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Fetch by id. Soft-deleted comments ARE returned here; filtering is
    /// the engine's decision, not the store's.
    async fn get(&self, comment_id: i64) -> Result<Option<Comment>, AppError>;

    /// Non-deleted comments for a game, newest first
    /// (`created_at DESC, id DESC` to keep equal timestamps deterministic).
    async fn list_for_game(&self, game_id: i64) -> Result<Vec<Comment>, AppError>;

    async fn begin(&self) -> Result<Box<dyn CommentUnitOfWork>, AppError>;
}

/// A batch of pending comment writes committed as one transaction.
///
/// Dropping a unit of work without committing discards every staged write;
/// no partial state becomes visible.
#[async_trait]
pub trait CommentUnitOfWork: Send {
    /// Stages an insert and returns the stored row. The store assigns the
    /// id and creation timestamp; the row is invisible to readers until
    /// `commit`.
    async fn add(&mut self, comment: NewComment) -> Result<Comment, AppError>;

    /// Stages an update of the comment's mutable fields (`body`, `deleted`).
    fn mark_modified(&mut self, comment: &Comment);

    /// Atomically flushes everything staged since `begin`.
    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}
