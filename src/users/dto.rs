use serde::Serialize;

use super::repo::ItemSummary;

/// Public profile: identity plus the caller-relative auction lists.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub selling: Vec<ItemSummary>,
    pub bidding_on: Vec<ItemSummary>,
    pub auctions_ended: Vec<ItemSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_serialize_as_arrays() {
        let profile = ProfileResponse {
            user_id: 4,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            selling: vec![],
            bidding_on: vec![],
            auctions_ended: vec![],
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["selling"], serde_json::json!([]));
        assert_eq!(json["bidding_on"], serde_json::json!([]));
        assert_eq!(json["auctions_ended"], serde_json::json!([]));
    }
}
