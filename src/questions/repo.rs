use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Public question listing row; `answer_text` stays null until the
/// seller answers.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuestionRecord {
    pub question_id: i64,
    pub question_text: String,
    pub answer_text: Option<String>,
}

/// The owning item's creator for a question, for the answer
/// authorization check.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionOwner {
    pub creator_id: i64,
}

pub async fn create(
    db: &PgPool,
    item_id: i64,
    asked_by: i64,
    question: &str,
) -> anyhow::Result<i64> {
    let question_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions (item_id, asked_by, question, answer)
        VALUES ($1, $2, $3, NULL)
        RETURNING question_id
        "#,
    )
    .bind(item_id)
    .bind(asked_by)
    .bind(question)
    .fetch_one(db)
    .await?;
    Ok(question_id)
}

pub async fn find_with_creator(
    db: &PgPool,
    question_id: i64,
) -> anyhow::Result<Option<QuestionOwner>> {
    let question = sqlx::query_as::<_, QuestionOwner>(
        r#"
        SELECT i.creator_id
        FROM questions q
        JOIN items i ON i.item_id = q.item_id
        WHERE q.question_id = $1
        "#,
    )
    .bind(question_id)
    .fetch_optional(db)
    .await?;
    Ok(question)
}

/// Overwrites any previous answer; re-answering is allowed.
pub async fn answer(db: &PgPool, question_id: i64, answer: &str) -> anyhow::Result<()> {
    sqlx::query(r#"UPDATE questions SET answer = $1 WHERE question_id = $2"#)
        .bind(answer)
        .bind(question_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn list_for_item(db: &PgPool, item_id: i64) -> anyhow::Result<Vec<QuestionRecord>> {
    let questions = sqlx::query_as::<_, QuestionRecord>(
        r#"
        SELECT question_id, question AS question_text, answer AS answer_text
        FROM questions
        WHERE item_id = $1
        ORDER BY question_id DESC
        "#,
    )
    .bind(item_id)
    .fetch_all(db)
    .await?;
    Ok(questions)
}
