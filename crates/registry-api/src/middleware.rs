use axum::{
    extract::{Query, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Uri, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::AppState;
use crate::error::ApiError;

/// Decide whether a request carries the admin credential.
///
/// A `Bearer` Authorization header takes precedence: if present it must match,
/// otherwise the request is `Forbidden`. Without one, the `token` query
/// parameter is consulted and anything but a match is `Unauthorized`.
/// With no configured secret every request is denied.
pub fn check_admin(
    headers: &HeaderMap,
    query_token: Option<&str>,
    expected: Option<&str>,
) -> Result<(), ApiError> {
    let expected = expected.filter(|e| !e.is_empty());

    // Bytes, not `to_str`: a bearer with non-ASCII bytes is still a bearer
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.as_bytes().strip_prefix(b"Bearer "));

    match bearer {
        Some(token) => match expected {
            Some(expected) if token.trim_ascii() == expected.as_bytes() => Ok(()),
            _ => Err(ApiError::Forbidden),
        },
        None => match (query_token, expected) {
            (Some(token), Some(expected)) if token == expected => Ok(()),
            _ => Err(ApiError::Unauthorized),
        },
    }
}

/// Gate for the `/admin/*` routes.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let query_token = query_token(req.uri());

    if let Err(e) = check_admin(
        req.headers(),
        query_token.as_deref(),
        state.admin_token.as_deref(),
    ) {
        debug!("Admin request to {} denied: {}", req.uri().path(), e);
        return Err(e);
    }

    Ok(next.run(req).await)
}

/// Last `token` query parameter, if any. Repeated keys do not fail the parse.
fn query_token(uri: &Uri) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs
        .into_iter()
        .rev()
        .find_map(|(key, value)| (key == "token").then_some(value))
}

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    (
        "permissions-policy",
        "accelerometer=(), camera=(), geolocation=(), gyroscope=(), microphone=()",
    ),
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains; preload",
    ),
    (
        "content-security-policy",
        "default-src 'self'; img-src 'self' data:; style-src 'self' 'unsafe-inline';",
    ),
];

/// Response hardening pass, enabled by `ENABLE_SECURE_HEADERS`.
pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for &(name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn no_credential_is_unauthorized() {
        let result = check_admin(&HeaderMap::new(), None, Some("s3cret"));
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn wrong_bearer_is_forbidden() {
        let result = check_admin(&bearer("nope"), None, Some("s3cret"));
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }

    #[test]
    fn wrong_bearer_is_forbidden_even_with_good_query() {
        let result = check_admin(&bearer("nope"), Some("s3cret"), Some("s3cret"));
        assert!(matches!(result, Err(ApiError::Forbidden)));
    }

    #[test]
    fn correct_bearer_allowed() {
        assert!(check_admin(&bearer("s3cret"), None, Some("s3cret")).is_ok());
        assert!(check_admin(&bearer("s3cret  "), None, Some("s3cret")).is_ok());
    }

    #[test]
    fn query_token_allowed() {
        assert!(check_admin(&HeaderMap::new(), Some("s3cret"), Some("s3cret")).is_ok());
    }

    #[test]
    fn wrong_query_token_is_unauthorized() {
        let result = check_admin(&HeaderMap::new(), Some("nope"), Some("s3cret"));
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[test]
    fn non_bearer_scheme_falls_back_to_query() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(check_admin(&headers, Some("s3cret"), Some("s3cret")).is_ok());
        assert!(matches!(
            check_admin(&headers, None, Some("s3cret")),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn non_utf8_bearer_is_forbidden() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xe9x").unwrap(),
        );
        assert!(matches!(
            check_admin(&headers, None, Some("s3cret")),
            Err(ApiError::Forbidden)
        ));
        assert!(matches!(
            check_admin(&headers, Some("s3cret"), Some("s3cret")),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn repeated_query_token_uses_last() {
        let uri: Uri = "/admin/count?token=wrong&token=s3cret".parse().unwrap();
        assert_eq!(query_token(&uri).as_deref(), Some("s3cret"));

        let uri: Uri = "/admin/count?other=1".parse().unwrap();
        assert_eq!(query_token(&uri), None);

        let uri: Uri = "/admin/count".parse().unwrap();
        assert_eq!(query_token(&uri), None);
    }

    #[test]
    fn unconfigured_secret_denies_everything() {
        assert!(matches!(
            check_admin(&HeaderMap::new(), Some(""), None),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            check_admin(&bearer(""), None, Some("")),
            Err(ApiError::Forbidden)
        ));
    }
}
