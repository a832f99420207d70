use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width RFC 3339 text so `TEXT` comparisons and `ORDER BY` stay
/// chronological.
pub(crate) fn encode(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encode_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(500);

        assert_eq!(encode(whole), "2024-03-01T08:00:00.000000Z");
        assert_eq!(encode(fractional), "2024-03-01T08:00:00.500000Z");
        assert!(encode(whole) < encode(fractional));
    }
}
