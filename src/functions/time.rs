use chrono::{DateTime, Utc};

/// Returns a Discord timestamp in relative time format (R)
pub fn describe_relative(target: DateTime<Utc>) -> String {
    let timestamp = target.timestamp();
    format!("<t:{timestamp}:R>")
}

/// Formats unix seconds as a Discord timestamp in short date/time format (f)
pub fn describe_unix(timestamp: i64) -> String {
    format!("<t:{timestamp}:f>")
}

/// Attempts to parse an RFC3339 timestamp and format it relatively for Discord embeds
pub fn describe_relative_from_str(value: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| describe_relative(dt.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_discord_timestamps() {
        assert_eq!(describe_unix(1_700_000_000), "<t:1700000000:f>");
        assert_eq!(
            describe_relative_from_str("2023-11-14T22:13:20+00:00").as_deref(),
            Some("<t:1700000000:R>")
        );
        assert_eq!(describe_relative_from_str("yesterday"), None);
    }
}
