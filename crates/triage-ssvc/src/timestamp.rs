//! Timestamps embedded in SSVC vectors.
//!
//! SSVC records the decision time as an ISO 8601 UTC instant with whole
//! seconds only, e.g. `2024-05-06T07:08:09Z`.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::SsvcError;

/// Format an instant as an SSVC timestamp.
///
/// Sub-second precision is dropped, never rounded.
pub fn encode_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .trunc_subsecs(0)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current time as an SSVC timestamp.
pub fn now_timestamp() -> String {
    encode_timestamp(Utc::now())
}

/// Parse an SSVC timestamp (or any RFC 3339 instant) back into UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, SsvcError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SsvcError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn truncates_instead_of_rounding() {
        let t = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(encode_timestamp(t), "2024-05-06T07:08:09Z");
    }

    #[test]
    fn whole_second_unchanged() {
        let t = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(encode_timestamp(t), "1999-12-31T23:59:59Z");
    }

    #[test]
    fn now_has_second_precision() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 20, "unexpected timestamp {ts}");
        assert!(ts.ends_with('Z'));
        assert!(!ts.contains('.'));
    }

    #[test]
    fn round_trip_equals_truncated_instant() {
        let t = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 1).unwrap()
            + chrono::Duration::microseconds(123_456);
        let parsed = parse_timestamp(&encode_timestamp(t)).unwrap();
        assert_eq!(parsed, t.trunc_subsecs(0));
    }

    #[test]
    fn parse_accepts_offsets() {
        let parsed = parse_timestamp("2024-05-06T09:08:09+02:00").unwrap();
        assert_eq!(encode_timestamp(parsed), "2024-05-06T07:08:09Z");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("not a time"),
            Err(SsvcError::InvalidTimestamp { .. })
        ));
    }
}
