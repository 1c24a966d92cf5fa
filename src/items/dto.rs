use serde::Serialize;

/// Body returned after listing an item.
#[derive(Debug, Serialize)]
pub struct CreatedItem {
    pub item_id: i64,
}

/// Identity of the highest bidder, when any bid exists.
#[derive(Debug, Serialize)]
pub struct BidHolder {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Detail view. `current_bid` and `current_bid_holder` are derived from
/// the bid table on every read, never stored.
#[derive(Debug, Serialize)]
pub struct ItemDetails {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub starting_bid: f64,
    pub current_bid: f64,
    pub start_date: i64,
    pub end_date: i64,
    pub creator_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub current_bid_holder: Option<BidHolder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbid_item_serializes_null_holder() {
        let details = ItemDetails {
            item_id: 1,
            name: "Writing desk".into(),
            description: "Walnut, one drawer".into(),
            starting_bid: 10.0,
            current_bid: 10.0,
            start_date: 1,
            end_date: 2,
            creator_id: 3,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            current_bid_holder: None,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["current_bid_holder"], serde_json::Value::Null);
        assert_eq!(json["current_bid"], serde_json::json!(10.0));
    }

    #[test]
    fn holder_carries_bidder_identity() {
        let holder = BidHolder {
            user_id: 9,
            first_name: "Alan".into(),
            last_name: "Turing".into(),
        };
        let json = serde_json::to_value(&holder).unwrap();
        assert_eq!(json["user_id"], 9);
        assert_eq!(json["first_name"], "Alan");
    }
}
