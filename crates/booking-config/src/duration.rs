//! Token lifetime strings.

/// Parses a lifetime such as `900`, `15m`, `7d`, `2 days` or `1h30m` into
/// whole seconds.
///
/// A bare integer is taken as seconds. Anything else goes through
/// [`humantime::parse_duration`]. Returns `None` for empty or unparseable
/// input.
#[must_use]
pub fn parse_duration_secs(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }

    humantime::parse_duration(value)
        .map(|duration| duration.as_secs())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_seconds() {
        assert_eq!(parse_duration_secs("900"), Some(900));
        assert_eq!(parse_duration_secs(" 45s "), Some(45));
    }

    #[test]
    fn test_units() {
        assert_eq!(parse_duration_secs("15m"), Some(900));
        assert_eq!(parse_duration_secs("15min"), Some(900));
        assert_eq!(parse_duration_secs("12h"), Some(43_200));
        assert_eq!(parse_duration_secs("7d"), Some(604_800));
    }

    #[test]
    fn test_spelled_out_and_compound() {
        assert_eq!(parse_duration_secs("2 days"), Some(172_800));
        assert_eq!(parse_duration_secs("1h30m"), Some(5_400));
        assert_eq!(parse_duration_secs("1w"), Some(604_800));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_duration_secs(""), None);
        assert_eq!(parse_duration_secs("m"), None);
        assert_eq!(parse_duration_secs("soon"), None);
        assert_eq!(parse_duration_secs("-5"), None);
    }
}
