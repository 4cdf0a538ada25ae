// src/utils/jwt.rs

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::AppError,
    moderation::{Principal, Role},
};

/// JWT Claims structure.
///
/// Tokens are issued by the account service; this service only verifies
/// them and turns them into a [`Principal`].
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    /// User's role (e.g., 'user', 'moderator').
    pub role: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Signs a new JWT for the user. Kept for the test suites; there is no
/// issuance endpoint in this service.
pub fn sign_jwt(
    id: i64,
    role: Role,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    // Calculate expiration: current time + expiration_seconds
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: id.to_string(),
        role: role.as_str().to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a JWT string.
///
/// Returns the `Claims` if valid, otherwise returns an `AppError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        let mut roles = HashSet::new();
        // Unknown role names yield an empty role set rather than an error:
        // the caller stays authenticated but holds no privileges.
        if let Some(role) = Role::from_name(&claims.role) {
            roles.insert(role);
        }

        Principal::new(claims.sub.parse().ok(), roles)
    }
}

/// Axum extractor: resolves the caller's identity from the
/// 'Authorization: Bearer <token>' header.
///
/// Handlers that take a `Principal` argument require a valid token (401
/// otherwise) and pass the resolved identity explicitly into the engine --
/// identity is never read from ambient state.
impl<S> FromRequestParts<S> for Principal
where
    Config: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Config::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = match auth_header {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            _ => {
                return Err(AppError::AuthError(
                    "Missing or malformed Authorization header".to_string(),
                ));
            }
        };

        let claims = verify_jwt(token, &config.jwt_secret)?;
        Ok(Principal::from(claims))
    }
}
