use time::OffsetDateTime;

/// Epoch milliseconds; every timestamp in the store and on the wire uses
/// this format.
pub fn now_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_in_milliseconds() {
        let now = now_ms();
        // 2020-01-01 in ms; a seconds-resolution bug would be ~1000x smaller
        assert!(now > 1_577_836_800_000);
    }

    #[test]
    fn now_does_not_go_backwards() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
