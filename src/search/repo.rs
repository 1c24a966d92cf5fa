use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::dto::Bucket;

/// One search result; `current_bid` is derived in the query.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SearchRow {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub end_date: i64,
    pub creator_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub current_bid: f64,
}

/// Composes the listing query from the optional text match and bucket
/// filter. Grouping by the two primary keys lets the creator columns ride
/// along with the MAX aggregate.
pub fn build_query(
    q: &str,
    bucket: Option<(Bucket, i64)>,
    now: i64,
    limit: i64,
    offset: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT i.item_id, i.name, i.description, i.end_date, i.creator_id, \
         u.first_name, u.last_name, \
         COALESCE(MAX(b.amount), i.starting_bid) AS current_bid \
         FROM items i \
         JOIN users u ON u.user_id = i.creator_id \
         LEFT JOIN bids b ON b.item_id = i.item_id",
    );

    let mut sep = " WHERE ";

    if !q.is_empty() {
        let pattern = format!("%{}%", q.to_lowercase());
        builder.push(sep);
        sep = " AND ";
        builder.push("(LOWER(i.name) LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR LOWER(i.description) LIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    match bucket {
        Some((Bucket::Open, user_id)) => {
            builder.push(sep);
            builder.push("i.creator_id = ");
            builder.push_bind(user_id);
            builder.push(" AND i.end_date > ");
            builder.push_bind(now);
        }
        Some((Bucket::Bid, user_id)) => {
            builder.push(sep);
            builder.push("i.end_date > ");
            builder.push_bind(now);
            builder.push(
                " AND EXISTS (SELECT 1 FROM bids b2 WHERE b2.item_id = i.item_id AND b2.user_id = ",
            );
            builder.push_bind(user_id);
            builder.push(")");
        }
        Some((Bucket::Archive, user_id)) => {
            builder.push(sep);
            builder.push("i.end_date <= ");
            builder.push_bind(now);
            builder.push(" AND (i.creator_id = ");
            builder.push_bind(user_id);
            builder.push(
                " OR EXISTS (SELECT 1 FROM bids b2 WHERE b2.item_id = i.item_id AND b2.user_id = ",
            );
            builder.push_bind(user_id);
            builder.push("))");
        }
        None => {}
    }

    builder.push(" GROUP BY i.item_id, u.user_id ORDER BY i.item_id DESC LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);

    builder
}

pub async fn run(
    db: &PgPool,
    q: &str,
    bucket: Option<(Bucket, i64)>,
    now: i64,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<SearchRow>> {
    let mut query = build_query(q, bucket, now, limit, offset);
    let rows = query.build_query_as::<SearchRow>().fetch_all(db).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_query_has_no_where_clause() {
        let query = build_query("", None, 1_000, 10, 0);
        let sql = query.sql();
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("ORDER BY i.item_id DESC"));
        assert!(sql.contains("COALESCE(MAX(b.amount), i.starting_bid)"));
    }

    #[test]
    fn text_query_matches_name_or_description() {
        let query = build_query("desk", None, 1_000, 10, 0);
        let sql = query.sql();
        assert!(sql.contains("LOWER(i.name) LIKE"));
        assert!(sql.contains("OR LOWER(i.description) LIKE"));
    }

    #[test]
    fn open_bucket_filters_by_creator_and_end_date() {
        let query = build_query("", Some((Bucket::Open, 7)), 1_000, 10, 0);
        let sql = query.sql();
        assert!(sql.contains("i.creator_id ="));
        assert!(sql.contains("i.end_date >"));
        assert!(!sql.contains("EXISTS"));
    }

    #[test]
    fn bid_bucket_requires_an_existing_bid() {
        let query = build_query("", Some((Bucket::Bid, 7)), 1_000, 10, 0);
        let sql = query.sql();
        assert!(sql.contains("i.end_date >"));
        assert!(sql.contains("EXISTS (SELECT 1 FROM bids b2"));
    }

    #[test]
    fn archive_bucket_takes_ended_items_from_either_side() {
        let query = build_query("", Some((Bucket::Archive, 7)), 1_000, 10, 0);
        let sql = query.sql();
        assert!(sql.contains("i.end_date <="));
        assert!(sql.contains("OR EXISTS"));
    }

    #[test]
    fn text_and_bucket_compose_with_and() {
        let query = build_query("desk", Some((Bucket::Open, 7)), 1_000, 10, 0);
        let sql = query.sql();
        assert!(sql.contains(") AND i.creator_id ="));
    }
}
