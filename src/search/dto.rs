use serde::Deserialize;

/// Raw query string; limit/offset stay strings so that invalid values can
/// fall back to defaults instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Caller-relative status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Items the caller listed that have not ended.
    Open,
    /// Items the caller has bid on that have not ended.
    Bid,
    /// Ended items the caller listed or bid on.
    Archive,
}

impl Bucket {
    pub fn parse(raw: &str) -> Option<Bucket> {
        match raw.trim().to_uppercase().as_str() {
            "OPEN" => Some(Bucket::Open),
            "BID" => Some(Bucket::Bid),
            "ARCHIVE" => Some(Bucket::Archive),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_parse_is_case_insensitive() {
        assert_eq!(Bucket::parse("open"), Some(Bucket::Open));
        assert_eq!(Bucket::parse(" Bid "), Some(Bucket::Bid));
        assert_eq!(Bucket::parse("ARCHIVE"), Some(Bucket::Archive));
    }

    #[test]
    fn unknown_buckets_do_not_parse() {
        assert_eq!(Bucket::parse("CLOSED"), None);
        assert_eq!(Bucket::parse(""), None);
    }
}
