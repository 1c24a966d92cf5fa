use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};

use super::{
    dto::CreatedQuestion,
    repo::{self, QuestionRecord},
};
use crate::{
    auth::AuthUser,
    error::ApiError,
    items,
    profanity::contains_bad_language,
    state::AppState,
    validation::{parse_id, reject_blank, reject_extra_fields, require, string_value},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/item/:id/question", post(ask_question).get(get_questions))
        .route("/question/:question_id", post(answer_question))
}

#[instrument(skip(state, body))]
async fn ask_question(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<CreatedQuestion>, ApiError> {
    let item_id = parse_id(&id)?;
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    reject_extra_fields(&body, &["question_text"])?;
    require(&body, "question_text")?;
    reject_blank(&body, "question_text")?;

    let question_text = string_value(&body["question_text"]);
    if contains_bad_language(&question_text) {
        return Err(ApiError::bad_request(
            "question contains inappropriate language",
        ));
    }

    let Some(item) = items::repo::find_brief(&state.db, item_id).await? else {
        return Err(ApiError::NotFound);
    };

    // Sellers field questions, they do not ask them.
    if item.creator_id == user_id {
        return Err(ApiError::Forbidden);
    }

    let question_id = repo::create(&state.db, item_id, user_id, question_text.trim()).await?;

    info!(question_id, item_id, user_id, "question asked");
    Ok(Json(CreatedQuestion { question_id }))
}

#[instrument(skip(state, body))]
async fn answer_question(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(question_id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<StatusCode, ApiError> {
    let question_id = parse_id(&question_id)?;
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    // Payload shape is validated before the existence lookup; a malformed
    // request reads the same whether or not the question exists.
    reject_extra_fields(&body, &["answer_text"])?;
    require(&body, "answer_text")?;
    reject_blank(&body, "answer_text")?;

    let Some(question) = repo::find_with_creator(&state.db, question_id).await? else {
        return Err(ApiError::NotFound);
    };

    if question.creator_id != user_id {
        return Err(ApiError::Forbidden);
    }

    let answer_text = string_value(&body["answer_text"]);
    repo::answer(&state.db, question_id, answer_text.trim()).await?;

    info!(question_id, user_id, "question answered");
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
async fn get_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<QuestionRecord>>, ApiError> {
    let item_id = parse_id(&id)?;

    if items::repo::find_brief(&state.db, item_id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let questions = repo::list_for_item(&state.db, item_id).await?;
    Ok(Json(questions))
}
