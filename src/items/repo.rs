use sqlx::{FromRow, PgPool};

/// Item joined with its creator's name, as served by the detail view.
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub starting_bid: f64,
    pub start_date: i64,
    pub end_date: i64,
    pub creator_id: i64,
    pub creator_first_name: String,
    pub creator_last_name: String,
}

/// The slice of an item that ownership and threshold checks need.
#[derive(Debug, Clone, FromRow)]
pub struct ItemBrief {
    pub creator_id: i64,
    pub starting_bid: f64,
}

/// Highest bid with the bidder's identity; ties resolve to the most
/// recent bid.
#[derive(Debug, Clone, FromRow)]
pub struct HighestBid {
    pub amount: f64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

pub async fn create(
    db: &PgPool,
    name: &str,
    description: &str,
    starting_bid: f64,
    start_date: i64,
    end_date: i64,
    creator_id: i64,
) -> anyhow::Result<i64> {
    let item_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO items (name, description, starting_bid, start_date, end_date, creator_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING item_id
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(starting_bid)
    .bind(start_date)
    .bind(end_date)
    .bind(creator_id)
    .fetch_one(db)
    .await?;
    Ok(item_id)
}

pub async fn find_by_id(db: &PgPool, item_id: i64) -> anyhow::Result<Option<ItemRow>> {
    let item = sqlx::query_as::<_, ItemRow>(
        r#"
        SELECT i.item_id, i.name, i.description, i.starting_bid, i.start_date, i.end_date,
               i.creator_id, u.first_name AS creator_first_name, u.last_name AS creator_last_name
        FROM items i
        JOIN users u ON u.user_id = i.creator_id
        WHERE i.item_id = $1
        "#,
    )
    .bind(item_id)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

pub async fn find_brief(db: &PgPool, item_id: i64) -> anyhow::Result<Option<ItemBrief>> {
    let item = sqlx::query_as::<_, ItemBrief>(
        r#"SELECT creator_id, starting_bid FROM items WHERE item_id = $1"#,
    )
    .bind(item_id)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

pub async fn highest_bid_with_user(
    db: &PgPool,
    item_id: i64,
) -> anyhow::Result<Option<HighestBid>> {
    let bid = sqlx::query_as::<_, HighestBid>(
        r#"
        SELECT b.amount, b.user_id, u.first_name, u.last_name
        FROM bids b
        JOIN users u ON u.user_id = b.user_id
        WHERE b.item_id = $1
        ORDER BY b.amount DESC, b.timestamp DESC
        LIMIT 1
        "#,
    )
    .bind(item_id)
    .fetch_optional(db)
    .await?;
    Ok(bid)
}
