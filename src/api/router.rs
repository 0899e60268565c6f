//! API router.
//!
//! Returns a composable `Router` with all entity routes nested under
//! `/api/`. Middleware stack (outermost → innermost):
//! CORS → Extension → write guard → request logger → handler.

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the full API router.
///
/// Handlers use `State<ApiContext>`; middleware reads the same context
/// from `Extension` (injected as the outermost app layer). Mutating
/// methods pass through the write guard; reads are open.
pub fn api_router(ctx: ApiContext) -> Router {
    let cors = cors_layer(&ctx.allowed_origins);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/:uid",
            get(endpoints::patients::get)
                .put(endpoints::patients::update)
                .delete(endpoints::patients::delete),
        )
        .route(
            "/doctors",
            get(endpoints::doctors::list).post(endpoints::doctors::create),
        )
        .route(
            "/doctors/:id",
            get(endpoints::doctors::get)
                .put(endpoints::doctors::update)
                .delete(endpoints::doctors::delete),
        )
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::create),
        )
        .route(
            "/appointments/:id",
            get(endpoints::appointments::get)
                .put(endpoints::appointments::update)
                .delete(endpoints::appointments::delete),
        )
        .route(
            "/services",
            get(endpoints::services::list).post(endpoints::services::create),
        )
        .route(
            "/services/:id",
            get(endpoints::services::get)
                .put(endpoints::services::update)
                .delete(endpoints::services::delete),
        )
        .route(
            "/payments",
            get(endpoints::payments::list).post(endpoints::payments::create),
        )
        .route("/payments/:id", get(endpoints::payments::get))
        .route(
            "/products",
            get(endpoints::products::list).post(endpoints::products::create),
        )
        .route(
            "/products/:id",
            get(endpoints::products::get)
                .put(endpoints::products::update)
                .delete(endpoints::products::delete),
        )
        .with_state(ctx.clone())
        // Middleware (innermost first, outermost last):
        .layer(axum::middleware::from_fn(middleware::log::log_request))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_write_access,
        ))
        // Extension must be outermost of the fn layers so the write
        // guard can extract ApiContext.
        .layer(axum::Extension(ctx));

    Router::new().nest("/api", routes).layer(cors)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
