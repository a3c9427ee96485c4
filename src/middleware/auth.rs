use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::shared_state::AppState;

pub const ACCESS_KEY_HEADER: &str = "x-access-key";

/// Key presented by the client: `x-access-key` first, then a bearer token.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    if let Some(v) = headers.get(ACCESS_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(v.trim());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
}

/// Byte comparison whose running time does not depend on where the inputs differ.
fn keys_match(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Rejects requests that do not carry the configured access key. A pass-through
/// when no key is configured.
pub async fn require_access_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = state.access_key.as_deref() else {
        return next.run(req).await;
    };

    let presented = presented_key(req.headers());
    if presented.is_some_and(|key| keys_match(key, expected)) {
        return next.run(req).await;
    }

    tracing::warn!(
        path = %req.uri().path(),
        key_present = presented.is_some(),
        "rejected unauthenticated request"
    );
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": "Missing or invalid access key" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_presented_key_sources() {
        let mut headers = HeaderMap::new();
        assert_eq!(presented_key(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer fig-secret"));
        assert_eq!(presented_key(&headers), Some("fig-secret"));

        headers.insert(ACCESS_KEY_HEADER, HeaderValue::from_static("other"));
        assert_eq!(presented_key(&headers), Some("other"));

        let mut basic = HeaderMap::new();
        basic.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));
        assert_eq!(presented_key(&basic), None);

        for raw in ["bearer fig-secret", "BEARER fig-secret", "Bearer   fig-secret "] {
            let mut headers = HeaderMap::new();
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(raw).unwrap());
            assert_eq!(presented_key(&headers), Some("fig-secret"), "{}", raw);
        }
    }

    #[test]
    fn test_keys_match() {
        assert!(keys_match("fig-secret", "fig-secret"));
        assert!(!keys_match("fig-secreT", "fig-secret"));
        assert!(!keys_match("fig", "fig-secret"));
        assert!(!keys_match("", "fig-secret"));
    }
}
