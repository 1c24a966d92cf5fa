use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::{
    dto::{BidHolder, CreatedItem, ItemDetails},
    repo,
};
use crate::{
    auth::AuthUser,
    error::ApiError,
    profanity::contains_bad_language,
    state::AppState,
    util::now_ms,
    validation::{numeric, parse_id, reject_blank, reject_extra_fields, require, string_value},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/item", post(create_item))
        .route("/item/:id", get(get_item_details))
}

const ITEM_FIELDS: &[&str] = &["name", "description", "starting_bid", "end_date"];

#[instrument(skip(state, body))]
async fn create_item(
    State(state): State<AppState>,
    AuthUser(creator_id): AuthUser,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<CreatedItem>), ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    reject_extra_fields(&body, ITEM_FIELDS)?;
    for field in ITEM_FIELDS {
        require(&body, field)?;
    }
    for field in ITEM_FIELDS {
        reject_blank(&body, field)?;
    }

    let name = string_value(&body["name"]);
    let description = string_value(&body["description"]);
    if contains_bad_language(&name) || contains_bad_language(&description) {
        return Err(ApiError::bad_request("item contains inappropriate language"));
    }

    let starting_bid = numeric(&body["starting_bid"])
        .filter(|n| *n >= 0.0)
        .ok_or_else(|| ApiError::bad_request("invalid starting_bid"))?;

    let end_date = numeric(&body["end_date"])
        .filter(|n| *n >= 0.0)
        .ok_or_else(|| ApiError::bad_request("invalid end_date"))? as i64;

    let now = now_ms();
    if end_date < now {
        return Err(ApiError::bad_request("end_date in past"));
    }

    let item_id = repo::create(
        &state.db,
        &name,
        &description,
        starting_bid,
        now,
        end_date,
        creator_id,
    )
    .await?;

    info!(item_id, creator_id, "item created");
    Ok((StatusCode::CREATED, Json(CreatedItem { item_id })))
}

#[instrument(skip(state))]
async fn get_item_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemDetails>, ApiError> {
    let item_id = parse_id(&id)?;

    let Some(item) = repo::find_by_id(&state.db, item_id).await? else {
        return Err(ApiError::NotFound);
    };

    let (current_bid, current_bid_holder) =
        match repo::highest_bid_with_user(&state.db, item_id).await? {
            Some(bid) => (
                bid.amount,
                Some(BidHolder {
                    user_id: bid.user_id,
                    first_name: bid.first_name,
                    last_name: bid.last_name,
                }),
            ),
            None => (item.starting_bid, None),
        };

    Ok(Json(ItemDetails {
        item_id: item.item_id,
        name: item.name,
        description: item.description,
        starting_bid: item.starting_bid,
        current_bid,
        start_date: item.start_date,
        end_date: item.end_date,
        creator_id: item.creator_id,
        first_name: item.creator_first_name,
        last_name: item.creator_last_name,
        current_bid_holder,
    }))
}
