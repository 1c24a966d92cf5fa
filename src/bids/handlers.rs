use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::repo::{self, BidRecord};
use crate::{
    auth::AuthUser,
    error::ApiError,
    items,
    state::AppState,
    util::now_ms,
    validation::{numeric, parse_id, reject_blank, reject_extra_fields, require},
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/item/:id/bid", post(place_bid).get(get_bid_history))
}

const BID_FIELDS: &[&str] = &["amount"];

#[instrument(skip(state, body))]
async fn place_bid(
    State(state): State<AppState>,
    AuthUser(bidder_id): AuthUser,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<StatusCode, ApiError> {
    let item_id = parse_id(&id)?;
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    reject_extra_fields(&body, BID_FIELDS)?;
    require(&body, "amount")?;
    reject_blank(&body, "amount")?;

    let amount = numeric(&body["amount"])
        .filter(|n| *n > 0.0)
        .ok_or_else(|| ApiError::bad_request("invalid amount"))?;

    let Some(item) = items::repo::find_brief(&state.db, item_id).await? else {
        return Err(ApiError::NotFound);
    };

    // Sellers cannot bid their own auctions up.
    if item.creator_id == bidder_id {
        return Err(ApiError::Forbidden);
    }

    let highest = repo::highest_amount(&state.db, item_id).await?;
    if amount <= repo::threshold(highest, item.starting_bid) {
        return Err(ApiError::bad_request("amount too low"));
    }

    if !repo::insert(&state.db, item_id, bidder_id, amount, now_ms()).await? {
        // A concurrent bid moved the threshold between our read and the
        // guarded insert.
        warn!(item_id, bidder_id, amount, "bid lost a race to a higher bid");
        return Err(ApiError::bad_request("amount too low"));
    }

    info!(item_id, bidder_id, amount, "bid placed");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state))]
async fn get_bid_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<BidRecord>>, ApiError> {
    let item_id = parse_id(&id)?;

    if items::repo::find_brief(&state.db, item_id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let bids = repo::history(&state.db, item_id).await?;
    Ok(Json(bids))
}
