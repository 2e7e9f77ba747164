use chrono::{DateTime, SecondsFormat, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as an RFC 3339 string in UTC.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_rfc3339_epoch() {
        // テスト項目: 0 ミリ秒は Unix epoch として整形される
        // when (操作):
        let formatted = timestamp_to_rfc3339(0);

        // then (期待する結果):
        assert_eq!(formatted, "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_timestamp_to_rfc3339_keeps_millis() {
        // テスト項目: ミリ秒まで保持される
        // when (操作):
        let formatted = timestamp_to_rfc3339(1_700_000_000_123);

        // then (期待する結果):
        assert_eq!(formatted, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_get_utc_timestamp_is_recent() {
        // テスト項目: 現在時刻が 2020 年以降のミリ秒で返る
        // when (操作):
        let now = get_utc_timestamp();

        // then (期待する結果):
        assert!(now > 1_577_836_800_000);
    }
}
