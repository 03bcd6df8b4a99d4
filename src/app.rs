use std::collections::HashSet;
use std::sync::Arc;

use axum::{Extension, Router, middleware};
use http::header;
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt,
    cors::{AllowOrigin, Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_docs::ApiDoc;
use crate::config::APP_CONFIG;
use crate::middleware::http_logger::{HttpLoggerState, http_logger};
use crate::routes;
use crate::session::{JwtIdentityProvider, JwtManager, SharedIdentityProvider};

pub struct RouterOptions<'a> {
    pub cors_allowed_origins: &'a str,
    pub swagger_enabled: bool,
    pub app_env: &'a str,
}

pub fn create_app() -> Router {
    let jwt = JwtManager::new(&APP_CONFIG.jwt_secret, APP_CONFIG.session_ttl_seconds);
    let identity: SharedIdentityProvider = Arc::new(JwtIdentityProvider::new(jwt));

    build_router(
        identity,
        RouterOptions {
            cors_allowed_origins: &APP_CONFIG.cors_allowed_origins,
            swagger_enabled: APP_CONFIG.swagger_enabled,
            app_env: &APP_CONFIG.app_env,
        },
    )
}

fn cors_layer(allowed: &str) -> CorsLayer {
    let allowed_headers = [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ACCEPT_LANGUAGE,
    ];

    let allowed_methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];

    if allowed.trim() == "*" {
        // credentials cannot be combined with a wildcard origin
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(false);
    }

    let origins: HashSet<String> = allowed
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(allowed_methods)
        .allow_headers(allowed_headers)
        .allow_credentials(true)
}

/// Assembles every route with its middleware. Storage is looked up per request
/// so the same router serves with or without a database.
pub fn build_router(identity: SharedIdentityProvider, options: RouterOptions<'_>) -> Router {
    let mut router = Router::new()
        .merge(routes::health::create_route())
        .merge(routes::auth::create_route())
        .merge(routes::competencies::create_route())
        .merge(routes::positions::create_route())
        .merge(routes::cycles::create_route())
        .merge(routes::employees::create_route())
        .merge(routes::evaluations::create_route())
        .merge(routes::scoring::create_route())
        .merge(routes::nine_box::create_route())
        .merge(routes::pdis::create_route())
        .merge(routes::dashboard::create_route())
        .merge(routes::reports::create_route());

    if options.swagger_enabled {
        let swagger_ui =
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
        router = router.merge(swagger_ui);
    }

    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    let router = router
        .layer(middleware::from_fn_with_state(
            HttpLoggerState::new(options.app_env),
            http_logger,
        ))
        .layer(Extension(identity));

    let middleware = ServiceBuilder::new()
        .layer(cors_layer(options.cors_allowed_origins))
        .layer(PropagateHeaderLayer::new(header::HeaderName::from_static(
            "x-request-id",
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    router.layer(middleware)
}
