use serde::Serialize;
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Item row as it appears in the profile lists, creator name included.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ItemSummary {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub end_date: i64,
    pub creator_id: i64,
    pub first_name: String,
    pub last_name: String,
}

pub async fn find_user(db: &PgPool, user_id: i64) -> anyhow::Result<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>(
        r#"SELECT user_id, first_name, last_name FROM users WHERE user_id = $1"#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

/// Auctions the user is selling that are still open.
pub async fn selling(db: &PgPool, user_id: i64, now: i64) -> anyhow::Result<Vec<ItemSummary>> {
    let items = sqlx::query_as::<_, ItemSummary>(
        r#"
        SELECT i.item_id, i.name, i.description, i.end_date,
               i.creator_id, u.first_name, u.last_name
        FROM items i
        JOIN users u ON u.user_id = i.creator_id
        WHERE i.creator_id = $1
          AND i.end_date > $2
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_all(db)
    .await?;
    Ok(items)
}

/// Auctions the user has bid on that are still open.
pub async fn bidding_on(db: &PgPool, user_id: i64, now: i64) -> anyhow::Result<Vec<ItemSummary>> {
    let items = sqlx::query_as::<_, ItemSummary>(
        r#"
        SELECT DISTINCT i.item_id, i.name, i.description, i.end_date,
                        i.creator_id, u.first_name, u.last_name
        FROM bids b
        JOIN items i ON i.item_id = b.item_id
        JOIN users u ON u.user_id = i.creator_id
        WHERE b.user_id = $1
          AND i.end_date > $2
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_all(db)
    .await?;
    Ok(items)
}

/// Auctions the user created that have ended.
pub async fn auctions_ended(
    db: &PgPool,
    user_id: i64,
    now: i64,
) -> anyhow::Result<Vec<ItemSummary>> {
    let items = sqlx::query_as::<_, ItemSummary>(
        r#"
        SELECT i.item_id, i.name, i.description, i.end_date,
               i.creator_id, u.first_name, u.last_name
        FROM items i
        JOIN users u ON u.user_id = i.creator_id
        WHERE i.creator_id = $1
          AND i.end_date <= $2
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_all(db)
    .await?;
    Ok(items)
}
