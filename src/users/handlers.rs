use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{dto::ProfileResponse, repo};
use crate::{error::ApiError, state::AppState, util::now_ms, validation::parse_id};

pub fn routes() -> Router<AppState> {
    Router::new().route("/users/:id", get(get_user_details))
}

#[instrument(skip(state))]
async fn get_user_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = parse_id(&id)?;

    let Some(user) = repo::find_user(&state.db, user_id).await? else {
        return Err(ApiError::NotFound);
    };

    let now = now_ms();
    let selling = repo::selling(&state.db, user_id, now).await?;
    let bidding_on = repo::bidding_on(&state.db, user_id, now).await?;
    let auctions_ended = repo::auctions_ended(&state.db, user_id, now).await?;

    Ok(Json(ProfileResponse {
        user_id: user.user_id,
        first_name: user.first_name,
        last_name: user.last_name,
        selling,
        bidding_on,
        auctions_ended,
    }))
}
