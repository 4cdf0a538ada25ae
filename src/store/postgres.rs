// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    error::AppError,
    models::{
        comment::{Comment, NewComment},
        game::Game,
        user::User,
    },
    store::{CommentStore, CommentUnitOfWork, GameStore, UserStore},
};

/// Games catalog backed by Postgres. Read-only from this service.
#[derive(Clone)]
pub struct PgGameStore {
    pool: PgPool,
}

impl PgGameStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn exists(&self, game_id: i64) -> Result<bool, AppError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM games WHERE id = $1")
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn get(&self, game_id: i64) -> Result<Option<Game>, AppError> {
        let game = sqlx::query_as::<_, Game>(
            "SELECT id, title, description, cover_img, created_at FROM games WHERE id = $1",
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    async fn list(&self) -> Result<Vec<Game>, AppError> {
        let games = sqlx::query_as::<_, Game>(
            "SELECT id, title, description, cover_img, created_at FROM games ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, role, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COMMENT_COLUMNS: &str = "id, game_id, user_id, body, parent_id, deleted, created_at";

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn get(&self, comment_id: i64) -> Result<Option<Comment>, AppError> {
        // Intentionally no deleted filter: delete/restore need the row
        // either way.
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments WHERE id = $1",
            COMMENT_COLUMNS
        ))
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_for_game(&self, game_id: i64) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments \
             WHERE game_id = $1 AND deleted = FALSE \
             ORDER BY created_at DESC, id DESC",
            COMMENT_COLUMNS
        ))
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn begin(&self) -> Result<Box<dyn CommentUnitOfWork>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgCommentUnitOfWork {
            tx,
            dirty: Vec::new(),
        }))
    }
}

/// One open transaction plus the updates staged against it. Inserts run
/// immediately inside the transaction (the database assigns id and
/// created_at); updates are flushed on commit. Dropping without commit
/// rolls the transaction back.
pub struct PgCommentUnitOfWork {
    tx: Transaction<'static, Postgres>,
    dirty: Vec<Comment>,
}

#[async_trait]
impl CommentUnitOfWork for PgCommentUnitOfWork {
    async fn add(&mut self, comment: NewComment) -> Result<Comment, AppError> {
        let created = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (game_id, user_id, body, parent_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            COMMENT_COLUMNS
        ))
        .bind(comment.game_id)
        .bind(comment.user_id)
        .bind(comment.body)
        .bind(comment.parent_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(created)
    }

    fn mark_modified(&mut self, comment: &Comment) {
        self.dirty.push(comment.clone());
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let Self { mut tx, dirty } = *self;

        for comment in dirty {
            sqlx::query("UPDATE comments SET body = $2, deleted = $3 WHERE id = $1")
                .bind(comment.id)
                .bind(&comment.body)
                .bind(comment.deleted)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
