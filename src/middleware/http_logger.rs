use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_FIELDS: [&str; 8] = [
    "password",
    "token",
    "access_token",
    "authorization",
    "secret",
    "cpf",
    "credential",
    "credentials",
];

const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "cookie", "set-cookie", "x-auth-token"];

#[derive(Debug, Clone)]
pub struct HttpLoggerState {
    pub app_env: Arc<str>,
}

impl HttpLoggerState {
    pub fn new(app_env: impl Into<Arc<str>>) -> Self {
        Self {
            app_env: app_env.into(),
        }
    }
}

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/" | "/api/v1/health")
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false)
}

/// Replaces sensitive values at any depth of a JSON document.
fn redact(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| {
                    if SENSITIVE_FIELDS.contains(&key.to_ascii_lowercase().as_str()) {
                        (key, Value::String(REDACTED.to_string()))
                    } else {
                        (key, redact(v))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(redact).collect()),
        other => other,
    }
}

fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = headers.clone();
    for name in SENSITIVE_HEADERS {
        if let Ok(name) = name.parse::<http::HeaderName>() {
            if filtered.contains_key(&name) {
                filtered.insert(name, HeaderValue::from_static(REDACTED));
            }
        }
    }
    filtered
}

fn body_for_log(headers: &HeaderMap, bytes: &Bytes) -> Value {
    if !is_json(headers) || bytes.is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_slice::<Value>(bytes)
        .map(redact)
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

pub async fn http_logger(
    State(state): State<HttpLoggerState>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let start_time = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();

    if should_ignore_path(&path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let (parts, body) = req.into_parts();
    let bytes = buffer_body("request", body).await?;
    let req_body = body_for_log(&req_headers, &bytes);
    let req = Request::from_parts(parts, Body::from(bytes));

    let response = next.run(req).await;
    let latency = start_time.elapsed();
    let status = response.status();

    let (parts, body) = response.into_parts();
    let bytes = buffer_body("response", body).await?;
    let res_body = if matches!(method, Method::POST | Method::PUT | Method::PATCH) {
        body_for_log(&parts.headers, &bytes)
    } else {
        Value::Object(serde_json::Map::new())
    };
    let res_headers = redact_headers(&parts.headers);
    let response = Response::from_parts(parts, Body::from(bytes));

    tracing::info!(
        method = ?method,
        path = %path,
        query = uri.query().unwrap_or(""),
        x_request_id = %x_request_id,
        req_headers = ?redact_headers(&req_headers),
        req_body = %req_body,
        status = status.as_u16(),
        latency_ms = latency.as_millis(),
        res_headers = ?res_headers,
        res_body = %res_body,
        app_env = %state.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

pub async fn buffer_body<B>(direction: &str, body: B) -> Result<Bytes, (StatusCode, String)>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    match body.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) => Err((
            StatusCode::BAD_REQUEST,
            format!("failed to read {direction} body: {err}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_secrets_are_redacted() {
        let value = json!({
            "email": "ana@example.com",
            "password": "hunter2",
            "employee": { "name": "Ana", "cpf": "12345678900" },
            "items": [{ "token": "abc" }]
        });

        let redacted = redact(value);
        assert_eq!(redacted["email"], "ana@example.com");
        assert_eq!(redacted["password"], REDACTED);
        assert_eq!(redacted["employee"]["name"], "Ana");
        assert_eq!(redacted["employee"]["cpf"], REDACTED);
        assert_eq!(redacted["items"][0]["token"], REDACTED);
    }

    #[test]
    fn cookie_and_authorization_headers_are_hidden() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("app_session_id=abc"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/csv"));

        let filtered = redact_headers(&headers);
        assert_eq!(filtered[header::AUTHORIZATION], REDACTED);
        assert_eq!(filtered[header::COOKIE], REDACTED);
        assert_eq!(filtered[header::ACCEPT], "text/csv");
    }

    #[test]
    fn non_json_bodies_are_not_logged() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        let body = body_for_log(&headers, &Bytes::from_static(b"name,badge\n"));
        assert_eq!(body, json!({}));
    }
}
