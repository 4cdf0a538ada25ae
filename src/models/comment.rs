use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'comments' table in the database.
///
/// `id` and `created_at` are assigned by the store on insert; the engine
/// never generates either. `deleted` is the soft-delete flag flipped by the
/// delete/restore pair.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub game_id: i64,
    pub user_id: i64,
    pub body: String,
    /// Optional: the ID of the comment this one replies to.
    /// Must belong to the same game (checked by the engine on create).
    pub parent_id: Option<i64>,
    pub deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Parameters for an insert; everything the store does not assign itself.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub game_id: i64,
    pub user_id: i64,
    pub body: String,
    pub parent_id: Option<i64>,
}

/// DTO for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 600,
        message = "Comment must be between 1 and 600 characters"
    ))]
    pub body: String,

    /// Optional: the ID of the comment being replied to.
    pub parent_id: Option<i64>,
}

/// DTO for editing the body of an existing comment.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCommentRequest {
    #[validate(length(
        min = 1,
        max = 600,
        message = "Comment must be between 1 and 600 characters"
    ))]
    pub body: String,
}

/// DTO for displaying a comment.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub game_id: i64,
    pub user_id: i64,
    pub body: String,
    pub parent_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            game_id: c.game_id,
            user_id: c.user_id,
            body: c.body,
            parent_id: c.parent_id,
            created_at: c.created_at,
        }
    }
}
