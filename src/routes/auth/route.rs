use axum::{
    Extension, Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

use super::dto::{LoginRequest, LoginResponse, LogoutResponse};
use crate::config::SESSION_COOKIE_NAME;
use crate::errors::AppError;
use crate::extractor::CurrentUser;
use crate::repositories::{EmployeeRepository, UserRepository};
use crate::session::{Identity, SharedIdentityProvider};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/me", get(me))
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Login with email and password, sets the session cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Malformed request")
    ),
    tag = "Authentication"
)]
pub async fn login(
    Extension(provider): Extension<SharedIdentityProvider>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>), (StatusCode, String)> {
    let (email, password) = payload.validate()?;
    let user_repo = UserRepository::new();

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = user_repo.find_by_email(&email).await?.ok_or_else(invalid)?;

    let password_valid = bcrypt::verify(&password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!("Failed login for {}", email);
        return Err(invalid().into());
    }

    let employee = user_repo.linked_employee(user.user_id).await?;
    let identity = Identity {
        user_id: user.user_id,
        email: user.email.clone(),
        name: user
            .name
            .clone()
            .or_else(|| employee.as_ref().map(|e| e.name.clone()))
            .unwrap_or_else(|| user.email.clone()),
        role: user.role,
        employee_id: employee.as_ref().map(|e| e.employee_id),
    };

    let token = provider.issue(&identity)?;

    if let Err(e) = user_repo.touch_last_signed_in(user.user_id).await {
        tracing::warn!("Could not record sign-in for {}: {}", user.user_id, e);
    }
    if let Some(employee_id) = identity.employee_id {
        if let Err(e) = EmployeeRepository::new().touch_last_access(employee_id).await {
            tracing::warn!("Could not record access for employee {}: {}", employee_id, e);
        }
    }

    tracing::info!("User {} signed in as {}", user.user_id, user.role.as_str());

    let response = LoginResponse {
        access_token: token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: provider.session_ttl_seconds(),
        user: identity,
    };

    Ok((StatusCode::OK, jar.add(session_cookie(token)), Json(response)))
}

/// Clears the session cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse)
    ),
    tag = "Authentication"
)]
pub async fn logout(jar: CookieJar) -> (StatusCode, CookieJar, Json<LogoutResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    (
        StatusCode::OK,
        jar,
        Json(LogoutResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// Identity behind the current session
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current identity", body = Identity),
        (status = 401, description = "No valid session")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn me(
    CurrentUser(identity): CurrentUser,
) -> Result<(StatusCode, Json<Identity>), (StatusCode, String)> {
    Ok((StatusCode::OK, Json(identity)))
}
