use serde::Serialize;
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub session_token: Option<String>,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, first_name, last_name, email, password_hash, session_token
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn create(
        db: &PgPool,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<i64> {
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, session_token)
            VALUES ($1, $2, $3, $4, NULL)
            RETURNING user_id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user_id)
    }

    pub async fn find_id_by_token(db: &PgPool, token: &str) -> anyhow::Result<Option<i64>> {
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"SELECT user_id FROM users WHERE session_token = $1"#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user_id)
    }

    pub async fn set_token(db: &PgPool, user_id: i64, token: &str) -> anyhow::Result<()> {
        sqlx::query(r#"UPDATE users SET session_token = $1 WHERE user_id = $2"#)
            .bind(token)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn clear_token(db: &PgPool, user_id: i64) -> anyhow::Result<()> {
        sqlx::query(r#"UPDATE users SET session_token = NULL WHERE user_id = $1"#)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
