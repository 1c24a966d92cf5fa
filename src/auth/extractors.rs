use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::repo::User;
use crate::{error::ApiError, state::AppState};

/// Session tokens arrive in a custom header rather than `Authorization`.
pub const AUTH_HEADER: &str = "X-Authorization";

/// Resolves the bearer token to a user id before the handler body runs;
/// protected routes observe 401 ahead of any of their own checks.
pub struct AuthUser(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthenticated)?;
        match User::find_id_by_token(&state.db, token).await? {
            Some(user_id) => Ok(AuthUser(user_id)),
            None => Err(ApiError::Unauthenticated),
        }
    }
}

/// Optional variant for routes that behave differently when a session is
/// present. Never rejects; an unresolvable token reads as anonymous.
pub struct MaybeAuthUser(pub Option<i64>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeAuthUser(None));
        };
        match User::find_id_by_token(&state.db, token).await {
            Ok(user_id) => Ok(MaybeAuthUser(user_id)),
            Err(e) => {
                warn!(error = %e, "session lookup failed, treating caller as anonymous");
                Ok(MaybeAuthUser(None))
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
