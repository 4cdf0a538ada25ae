// src/store/memory.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    error::AppError,
    models::{
        comment::{Comment, NewComment},
        game::Game,
        user::User,
    },
    store::{CommentStore, CommentUnitOfWork, GameStore, UserStore},
};

#[derive(Default)]
struct Inner {
    games: HashMap<i64, Game>,
    users: HashMap<i64, User>,
    comments: HashMap<i64, Comment>,
    next_game_id: i64,
    next_user_id: i64,
    next_comment_id: i64,
}

/// In-memory implementation of all three store contracts, with the same
/// observable behavior as the Postgres stores (ordering, soft-delete
/// visibility, commit barrier). Backs the test suites so they run without
/// an external database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user row directly; returns its id. Test seeding only.
    pub fn seed_user(&self, username: &str, role: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        inner.users.insert(
            id,
            User {
                id,
                username: username.to_string(),
                role: role.to_string(),
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Inserts a game row directly; returns its id. Test seeding only.
    pub fn seed_game(&self, title: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_game_id += 1;
        let id = inner.next_game_id;
        inner.games.insert(
            id,
            Game {
                id,
                title: title.to_string(),
                description: String::new(),
                cover_img: None,
                created_at: Utc::now(),
            },
        );
        id
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn exists(&self, game_id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().games.contains_key(&game_id))
    }

    async fn get(&self, game_id: i64) -> Result<Option<Game>, AppError> {
        Ok(self.inner.lock().unwrap().games.get(&game_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Game>, AppError> {
        let mut games: Vec<Game> = self.inner.lock().unwrap().games.values().cloned().collect();
        games.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(games)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get(&self, user_id: i64) -> Result<Option<User>, AppError> {
        Ok(self.inner.lock().unwrap().users.get(&user_id).cloned())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn get(&self, comment_id: i64) -> Result<Option<Comment>, AppError> {
        Ok(self.inner.lock().unwrap().comments.get(&comment_id).cloned())
    }

    async fn list_for_game(&self, game_id: i64) -> Result<Vec<Comment>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut comments: Vec<Comment> = inner
            .comments
            .values()
            .filter(|c| c.game_id == game_id && !c.deleted)
            .cloned()
            .collect();
        // Newest first, matching the Postgres ORDER BY.
        comments.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(comments)
    }

    async fn begin(&self) -> Result<Box<dyn CommentUnitOfWork>, AppError> {
        Ok(Box::new(MemoryUnitOfWork {
            inner: Arc::clone(&self.inner),
            staged_inserts: Vec::new(),
            staged_updates: Vec::new(),
        }))
    }
}

/// Staged writes against the shared map. Ids are taken from the counter at
/// `add` time (like a database sequence, they are not returned on rollback),
/// but rows only become visible on commit.
pub struct MemoryUnitOfWork {
    inner: Arc<Mutex<Inner>>,
    staged_inserts: Vec<Comment>,
    staged_updates: Vec<Comment>,
}

#[async_trait]
impl CommentUnitOfWork for MemoryUnitOfWork {
    async fn add(&mut self, comment: NewComment) -> Result<Comment, AppError> {
        let id = {
            let mut inner = self.inner.lock().unwrap();
            inner.next_comment_id += 1;
            inner.next_comment_id
        };

        let created = Comment {
            id,
            game_id: comment.game_id,
            user_id: comment.user_id,
            body: comment.body,
            parent_id: comment.parent_id,
            deleted: false,
            created_at: Utc::now(),
        };
        self.staged_inserts.push(created.clone());
        Ok(created)
    }

    fn mark_modified(&mut self, comment: &Comment) {
        self.staged_updates.push(comment.clone());
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let Self {
            inner,
            staged_inserts,
            staged_updates,
        } = *self;
        let mut inner = inner.lock().unwrap();

        for comment in staged_inserts {
            inner.comments.insert(comment.id, comment);
        }
        for update in staged_updates {
            if let Some(existing) = inner.comments.get_mut(&update.id) {
                existing.body = update.body;
                existing.deleted = update.deleted;
            }
        }
        Ok(())
    }
}
