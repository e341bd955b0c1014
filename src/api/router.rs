//! Gateway HTTP router.
//!
//! Returns a composable `Router` with every endpoint nested under
//! `/api/v1/`. A CORS layer admits the configured web client origin.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the gateway router.
///
/// `cors_origin` is matched exactly; `"*"` admits any origin.
pub fn gateway_router(ctx: ApiContext, cors_origin: &str) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/symptoms", get(endpoints::symptoms::list))
        .route("/diagnosis", post(endpoints::diagnosis::diagnose))
        .route("/save", post(endpoints::results::save))
        .route("/results/:id", get(endpoints::results::detail))
        .with_state(ctx);

    Router::new()
        .nest("/api/v1", api)
        .layer(cors_layer(cors_origin))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin, "Invalid CORS origin, cross-origin requests disabled");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
