use serde::Serialize;

/// Body returned after asking a question.
#[derive(Debug, Serialize)]
pub struct CreatedQuestion {
    pub question_id: i64,
}
