// src/moderation/engine.rs

use std::sync::Arc;

use crate::{
    error::AppError,
    models::comment::{Comment, NewComment},
    moderation::principal::{Principal, Role},
    store::{CommentStore, GameStore, UserStore},
};

/// Owns the comment lifecycle: creation with thread-integrity validation,
/// soft-delete, restore and edit, with all authorization decisions made here
/// before anything is written.
///
/// Every operation follows the same shape: precondition reads first, then a
/// single staged write, then one unit-of-work commit. Validation failures
/// surface before any mutation is staged, so a failed call never leaves
/// partial state behind.
#[derive(Clone)]
pub struct ModerationEngine {
    comments: Arc<dyn CommentStore>,
    games: Arc<dyn GameStore>,
    users: Arc<dyn UserStore>,
}

impl ModerationEngine {
    pub fn new(
        comments: Arc<dyn CommentStore>,
        games: Arc<dyn GameStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            comments,
            games,
            users,
        }
    }

    /// Creates a comment on a game, optionally as a reply.
    ///
    /// Validation order (first failure wins):
    /// 1. the game must exist;
    /// 2. a supplied `parent_id` must reference an existing comment on the
    ///    SAME game;
    /// 3. the principal must map to a user row that still exists (a
    ///    well-formed token for a since-removed account gets 403, not 500).
    pub async fn create(
        &self,
        game_id: i64,
        body: String,
        parent_id: Option<i64>,
        principal: &Principal,
    ) -> Result<Comment, AppError> {
        if !self.games.exists(game_id).await? {
            return Err(AppError::not_found("game", game_id));
        }

        if let Some(pid) = parent_id {
            let parent = self
                .comments
                .get(pid)
                .await?
                .ok_or(AppError::not_found("comment", pid))?;

            if parent.game_id != game_id {
                return Err(AppError::InvalidState(
                    "parent comment belongs to a different game".to_string(),
                ));
            }
        }

        let user_id = self.resolve_author(principal).await?;

        let mut uow = self.comments.begin().await?;
        let created = uow
            .add(NewComment {
                game_id,
                user_id,
                body,
                parent_id,
            })
            .await?;
        uow.commit().await?;

        tracing::info!(comment_id = created.id, game_id, "comment created");
        Ok(created)
    }

    /// All non-deleted comments on a game, newest first. Soft-deleted
    /// comments are invisible on this path; there is no tombstone.
    pub async fn list_for_game(&self, game_id: i64) -> Result<Vec<Comment>, AppError> {
        if !self.games.exists(game_id).await? {
            return Err(AppError::not_found("game", game_id));
        }

        self.comments.list_for_game(game_id).await
    }

    /// Replaces the body of a comment. Author-only: the moderator role does
    /// NOT bypass this check.
    ///
    /// A soft-deleted comment is reported as not found rather than as a
    /// conflict, so an edit attempt does not reveal whether a comment ever
    /// existed.
    pub async fn edit(
        &self,
        comment_id: i64,
        new_body: String,
        principal: &Principal,
    ) -> Result<Comment, AppError> {
        let mut comment = self
            .comments
            .get(comment_id)
            .await?
            .filter(|c| !c.deleted)
            .ok_or(AppError::not_found("comment", comment_id))?;

        if principal.user_id != Some(comment.user_id) {
            return Err(AppError::AccessDenied(
                "only the author may edit a comment".to_string(),
            ));
        }

        comment.body = new_body;

        let mut uow = self.comments.begin().await?;
        uow.mark_modified(&comment);
        uow.commit().await?;

        Ok(comment)
    }

    /// Soft-deletes a comment. Allowed for the author or a moderator.
    /// Deleting an already-deleted comment is a conflict, not a silent no-op.
    pub async fn delete(&self, comment_id: i64, principal: &Principal) -> Result<(), AppError> {
        let mut comment = self
            .comments
            .get(comment_id)
            .await?
            .ok_or(AppError::not_found("comment", comment_id))?;

        if !Self::is_author_or_moderator(principal, &comment) {
            return Err(AppError::AccessDenied(
                "not authorized to delete this comment".to_string(),
            ));
        }

        if comment.deleted {
            return Err(AppError::Conflict(
                "comment is already deleted".to_string(),
            ));
        }

        comment.deleted = true;

        let mut uow = self.comments.begin().await?;
        uow.mark_modified(&comment);
        uow.commit().await?;

        tracing::info!(comment_id, "comment deleted");
        Ok(())
    }

    /// Brings a soft-deleted comment back. Mirror of `delete`.
    pub async fn restore(
        &self,
        comment_id: i64,
        principal: &Principal,
    ) -> Result<Comment, AppError> {
        let mut comment = self
            .comments
            .get(comment_id)
            .await?
            .ok_or(AppError::not_found("comment", comment_id))?;

        if !Self::is_author_or_moderator(principal, &comment) {
            return Err(AppError::AccessDenied(
                "not authorized to restore this comment".to_string(),
            ));
        }

        if !comment.deleted {
            return Err(AppError::Conflict("comment is not deleted".to_string()));
        }

        comment.deleted = false;

        let mut uow = self.comments.begin().await?;
        uow.mark_modified(&comment);
        uow.commit().await?;

        tracing::info!(comment_id, "comment restored");
        Ok(comment)
    }

    /// The only place the moderator bypass is encoded. `edit` deliberately
    /// never consults this.
    fn is_author_or_moderator(principal: &Principal, comment: &Comment) -> bool {
        principal.user_id == Some(comment.user_id) || principal.has_role(Role::Moderator)
    }

    /// Maps the principal to an existing author record, rejecting anonymous
    /// callers and tokens whose user row has since disappeared.
    async fn resolve_author(&self, principal: &Principal) -> Result<i64, AppError> {
        let user_id = principal
            .user_id
            .ok_or_else(|| AppError::AccessDenied("principal not authorized".to_string()))?;

        self.users
            .get(user_id)
            .await?
            .map(|u| u.id)
            .ok_or_else(|| AppError::AccessDenied("principal not authorized".to_string()))
    }
}
