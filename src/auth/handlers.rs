use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{
    dto::{CreatedUser, LoginResponse},
    password::{hash_password, is_valid_password, verify_password},
    repo::User,
    session, AuthUser,
};
use crate::{
    error::ApiError,
    state::AppState,
    validation::{reject_blank_all, reject_extra_fields, require_all, string_value},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

const REGISTER_FIELDS: &[&str] = &["first_name", "last_name", "email", "password"];
const LOGIN_FIELDS: &[&str] = &["email", "password"];

#[instrument(skip(state, body))]
async fn register(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<CreatedUser>), ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    reject_extra_fields(&body, REGISTER_FIELDS)?;
    require_all(&body, REGISTER_FIELDS)?;
    reject_blank_all(&body, REGISTER_FIELDS)?;

    let password = string_value(&body["password"]);
    if !is_valid_password(&password) {
        return Err(ApiError::bad_request("invalid password"));
    }

    let email = string_value(&body["email"]);
    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "registration with duplicate email");
        return Err(ApiError::bad_request("duplicate email"));
    }

    let hash = hash_password(&password)?;
    let user_id = User::create(
        &state.db,
        &string_value(&body["first_name"]),
        &string_value(&body["last_name"]),
        &email,
        &hash,
    )
    .await?;

    info!(user_id, email = %email, "user registered");
    Ok((StatusCode::CREATED, Json(CreatedUser { user_id })))
}

#[instrument(skip(state, body))]
async fn login(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<LoginResponse>, ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    reject_extra_fields(&body, LOGIN_FIELDS)?;
    require_all(&body, LOGIN_FIELDS)?;
    reject_blank_all(&body, LOGIN_FIELDS)?;

    let email = string_value(&body["email"]);
    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login with unknown email");
        return Err(ApiError::bad_request("invalid credentials"));
    };

    if !verify_password(&string_value(&body["password"]), &user.password_hash)? {
        warn!(user_id = user.user_id, "login with wrong password");
        return Err(ApiError::bad_request("invalid credentials"));
    }

    // A second login while a token is active hands back the same token.
    if let Some(token) = user.session_token {
        return Ok(Json(LoginResponse {
            user_id: user.user_id,
            session_token: token,
        }));
    }

    let token = session::generate_token();
    User::set_token(&state.db, user.user_id, &token).await?;

    info!(user_id = user.user_id, "user logged in");
    Ok(Json(LoginResponse {
        user_id: user.user_id,
        session_token: token,
    }))
}

#[instrument(skip(state))]
async fn logout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<StatusCode, ApiError> {
    User::clear_token(&state.db, user_id).await?;
    info!(user_id, "user logged out");
    Ok(StatusCode::OK)
}
