use rustrict::CensorStr;

/// Listing text and questions are rejected when they trip the word filter.
pub fn contains_bad_language(text: &str) -> bool {
    text.is_inappropriate()
}
