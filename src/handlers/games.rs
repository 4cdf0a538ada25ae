// src/handlers/games.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, state::AppState};

/// Lists the games catalog for the storefront.
pub async fn list_games(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let games = state.catalog.list().await?;
    Ok(Json(games))
}

/// Retrieves a single game by ID.
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let game = state
        .catalog
        .get(id)
        .await?
        .ok_or(AppError::not_found("game", id))?;

    Ok(Json(game))
}
