use axum::http::{header, HeaderMap};

/// Look up a cookie value in the request's Cookie header.
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then_some(value)
        })
}

/// Render a Set-Cookie value. `max_age: None` yields a session-scoped cookie.
pub(crate) fn format_cookie(name: &str, value: &str, max_age: Option<u64>) -> String {
    match max_age {
        Some(secs) => format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={secs}"),
        None => format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn finds_cookie_among_several() {
        let headers = headers_with_cookie("a=1; taskpad_session=tok.en; b=2");
        assert_eq!(cookie_value(&headers, "taskpad_session"), Some("tok.en"));
        assert_eq!(cookie_value(&headers, "a"), Some("1"));
        assert_eq!(cookie_value(&headers, "b"), Some("2"));
    }

    #[test]
    fn missing_cookie_is_none() {
        let headers = headers_with_cookie("a=1");
        assert_eq!(cookie_value(&headers, "taskpad_session"), None);
        assert_eq!(cookie_value(&HeaderMap::new(), "taskpad_session"), None);
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let headers = headers_with_cookie("junk; taskpad_session=ok");
        assert_eq!(cookie_value(&headers, "taskpad_session"), Some("ok"));
    }

    #[test]
    fn name_must_match_exactly() {
        let headers = headers_with_cookie("taskpad_session_old=stale");
        assert_eq!(cookie_value(&headers, "taskpad_session"), None);
    }

    #[test]
    fn format_cookie_attributes() {
        let cookie = format_cookie("name", "value", Some(60));
        assert_eq!(cookie, "name=value; Path=/; HttpOnly; SameSite=Lax; Max-Age=60");
        let session_scoped = format_cookie("name", "value", None);
        assert!(!session_scoped.contains("Max-Age"));
    }
}
