// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'users' table in the database.
///
/// Account provisioning and credentials live in a separate service; this one
/// only needs to confirm that the author behind a token still exists.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// User role: 'user' or 'moderator'.
    pub role: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
}
