use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{Bucket, SearchParams},
    repo::{self, SearchRow},
};
use crate::{
    auth::MaybeAuthUser,
    error::ApiError,
    state::AppState,
    util::now_ms,
    validation::int_or,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

#[instrument(skip(state))]
async fn search(
    State(state): State<AppState>,
    MaybeAuthUser(user_id): MaybeAuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchRow>>, ApiError> {
    let q = params.q.as_deref().unwrap_or("").trim().to_string();

    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let bucket = match status {
        None => None,
        Some(raw) => {
            let Some(bucket) = Bucket::parse(raw) else {
                return Err(ApiError::bad_request("invalid status"));
            };
            // Bucket filters are caller-relative, so they need a session.
            let Some(user_id) = user_id else {
                return Err(ApiError::bad_request("status requires authentication"));
            };
            Some((bucket, user_id))
        }
    };

    let limit = int_or(params.limit.as_deref(), 10);
    let offset = int_or(params.offset.as_deref(), 0);

    let rows = repo::run(&state.db, &q, bucket, now_ms(), limit, offset).await?;
    Ok(Json(rows))
}
