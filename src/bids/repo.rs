use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// One row of the public bid history, bidder name included.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BidRecord {
    pub item_id: i64,
    pub amount: f64,
    pub timestamp: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// The amount a new bid has to beat: the highest committed bid, or the
/// starting bid while none exists.
pub fn threshold(highest: Option<f64>, starting_bid: f64) -> f64 {
    highest.unwrap_or(starting_bid)
}

pub async fn highest_amount(db: &PgPool, item_id: i64) -> anyhow::Result<Option<f64>> {
    let highest = sqlx::query_scalar::<_, Option<f64>>(
        r#"SELECT MAX(amount) FROM bids WHERE item_id = $1"#,
    )
    .bind(item_id)
    .fetch_one(db)
    .await?;
    Ok(highest)
}

/// Inserts the bid only while the amount still beats every committed bid
/// (or the starting bid). The guard re-checks the threshold inside the
/// statement, so a bid that lost a race with a concurrent higher bid is
/// reported too low instead of landing under the committed maximum.
pub async fn insert(
    db: &PgPool,
    item_id: i64,
    user_id: i64,
    amount: f64,
    timestamp: i64,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO bids (item_id, user_id, amount, timestamp)
        SELECT $1, $2, $3, $4
        WHERE $3 > COALESCE(
            (SELECT MAX(b.amount) FROM bids b WHERE b.item_id = $1),
            (SELECT i.starting_bid FROM items i WHERE i.item_id = $1)
        )
        "#,
    )
    .bind(item_id)
    .bind(user_id)
    .bind(amount)
    .bind(timestamp)
    .execute(db)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn history(db: &PgPool, item_id: i64) -> anyhow::Result<Vec<BidRecord>> {
    let bids = sqlx::query_as::<_, BidRecord>(
        r#"
        SELECT b.item_id, b.amount, b.timestamp, b.user_id, u.first_name, u.last_name
        FROM bids b
        JOIN users u ON u.user_id = b.user_id
        WHERE b.item_id = $1
        ORDER BY b.amount DESC, b.timestamp DESC
        "#,
    )
    .bind(item_id)
    .fetch_all(db)
    .await?;
    Ok(bids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_starting_bid_until_first_bid() {
        assert_eq!(threshold(None, 10.0), 10.0);
        assert_eq!(threshold(None, 0.0), 0.0);
    }

    #[test]
    fn threshold_tracks_highest_bid() {
        assert_eq!(threshold(Some(15.0), 10.0), 15.0);
        // a recorded bid wins even if it somehow undercuts the listing
        assert_eq!(threshold(Some(5.0), 10.0), 5.0);
    }

    #[test]
    fn strict_increase_rejects_ties() {
        let t = threshold(Some(15.0), 10.0);
        assert!(15.0 <= t, "a tie must not beat the threshold");
        assert!(15.01 > t);
    }
}
