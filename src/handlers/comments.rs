// src/handlers/comments.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::comment::{CommentResponse, CreateCommentRequest, EditCommentRequest},
    moderation::Principal,
    state::AppState,
    utils::html::clean_html,
};

/// Create a new comment on a game (optionally a reply).
pub async fn create_comment(
    State(state): State<AppState>,
    principal: Principal,
    Path(game_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // Sanitize before the engine sees the body; length was validated on the
    // raw input.
    let body = clean_html(&payload.body);

    let comment = state
        .engine
        .create(game_id, body, payload.parent_id, &principal)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse::from(comment)),
    ))
}

/// List all visible comments for a game, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let comments = state.engine.list_for_game(game_id).await?;

    let responses: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();
    Ok(Json(responses))
}

/// Edit the body of a comment. Author-only.
pub async fn edit_comment(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(payload): Json<EditCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let body = clean_html(&payload.body);

    let comment = state.engine.edit(id, body, &principal).await?;

    Ok(Json(CommentResponse::from(comment)))
}

/// Soft-delete a comment. Author or moderator.
pub async fn delete_comment(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.engine.delete(id, &principal).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Restore a soft-deleted comment. Author or moderator.
pub async fn restore_comment(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let comment = state.engine.restore(id, &principal).await?;

    Ok(Json(CommentResponse::from(comment)))
}
