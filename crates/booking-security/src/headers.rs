//! Auth response headers.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

/// Header carrying the access token, on responses and on gated requests.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Header carrying the refresh token.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// Writes both tokens onto a response header map.
///
/// Returns `false` without touching the map when the sink is absent, a token
/// is empty, or a token is not a valid header value.
pub fn set_auth_headers(sink: Option<&mut HeaderMap>, access: &str, refresh: &str) -> bool {
    let Some(headers) = sink else {
        warn!("No response headers to write tokens onto");
        return false;
    };

    if access.is_empty() || refresh.is_empty() {
        warn!("Refusing to write an empty token header");
        return false;
    }

    let (Ok(access), Ok(refresh)) = (HeaderValue::from_str(access), HeaderValue::from_str(refresh))
    else {
        warn!("Token is not a valid header value");
        return false;
    };

    headers.insert(HeaderName::from_static(ACCESS_TOKEN_HEADER), access);
    headers.insert(HeaderName::from_static(REFRESH_TOKEN_HEADER), refresh);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_both_headers() {
        let mut headers = HeaderMap::new();
        assert!(set_auth_headers(Some(&mut headers), "aaa", "rrr"));
        assert_eq!(headers[ACCESS_TOKEN_HEADER], "aaa");
        assert_eq!(headers[REFRESH_TOKEN_HEADER], "rrr");
    }

    #[test]
    fn test_missing_sink_or_token() {
        assert!(!set_auth_headers(None, "aaa", "rrr"));

        let mut headers = HeaderMap::new();
        assert!(!set_auth_headers(Some(&mut headers), "", "rrr"));
        assert!(!set_auth_headers(Some(&mut headers), "aaa", ""));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_invalid_value_leaves_map_untouched() {
        let mut headers = HeaderMap::new();
        assert!(!set_auth_headers(Some(&mut headers), "bad\nvalue", "rrr"));
        assert!(headers.is_empty());
    }
}
