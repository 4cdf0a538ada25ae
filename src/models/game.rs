// src/models/game.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'games' table in the database.
///
/// The catalog itself is managed elsewhere; this service only reads it
/// (storefront list/detail views and existence checks for comments).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// URL to the cover image, if one has been uploaded.
    pub cover_img: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
