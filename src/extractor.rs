use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use http::{StatusCode, header};

use crate::config::SESSION_COOKIE_NAME;
use crate::session::{Identity, SharedIdentityProvider};

/// The authenticated caller, resolved by the injected identity provider.
pub struct CurrentUser(pub Identity);

/// Raw session token as presented by the caller.
pub fn session_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            value
                .strip_prefix("Bearer ")
                .or_else(|| value.strip_prefix("bearer "))
        })
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let provider = parts
            .extensions
            .get::<SharedIdentityProvider>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("Identity provider extension is missing from the router");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Session handling is not configured".to_string(),
                )
            })?;

        let token = session_token(parts).ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                "Missing session token".to_string(),
            )
        })?;

        let identity = provider
            .identify(&token)
            .map_err(<(StatusCode, String)>::from)?;

        Ok(CurrentUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let parts = parts(
            Request::builder()
                .header(header::COOKIE, format!("{SESSION_COOKIE_NAME}=from-cookie"))
                .header(header::AUTHORIZATION, "Bearer from-header"),
        );
        assert_eq!(session_token(&parts).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn bearer_is_used_without_cookie() {
        let parts = parts(Request::builder().header(header::AUTHORIZATION, "Bearer abc"));
        assert_eq!(session_token(&parts).as_deref(), Some("abc"));
    }

    #[test]
    fn missing_or_empty_tokens_yield_none() {
        assert_eq!(session_token(&parts(Request::builder())), None);
        let parts = parts(Request::builder().header(header::AUTHORIZATION, "Basic abc"));
        assert_eq!(session_token(&parts), None);
    }
}
