use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod services;

pub fn app() -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected API behind the JWT gate
        .merge(api_routes());

    let settings = config::config();
    if settings.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if settings.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn auth_public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/auth/login", post(auth::login_post))
        .route("/auth/forgot-password", post(auth::forgot_password_post))
}

fn api_routes() -> Router {
    use axum::routing::{post, put};
    use handlers::protected::{dashboard, properties};

    let authed = Router::new()
        .route("/dashboard", get(dashboard::dashboard_get))
        .route(
            "/properties",
            get(properties::list::list_get).post(properties::create::create_post),
        )
        .route(
            "/properties/:property_id",
            get(properties::detail::detail_get),
        );

    // Mutations on an existing property additionally pass the ownership gate.
    let owned = Router::new()
        .route(
            "/properties/:property_id",
            put(properties::update::update_put).delete(properties::delete::delete_delete),
        )
        .route(
            "/properties/:property_id/images",
            post(properties::images::image_post),
        )
        .route(
            "/properties/:property_id/images/:image_id",
            put(properties::images::image_put).delete(properties::images::image_delete),
        )
        .route(
            "/properties/:property_id/documents",
            post(properties::documents::document_post),
        )
        .route(
            "/properties/:property_id/documents/:document_id",
            put(properties::documents::document_put).delete(properties::documents::document_delete),
        )
        .route_layer(axum::middleware::from_fn(
            middleware::verify_property_ownership,
        ));

    authed
        .merge(owned)
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Estate API",
        "version": version,
        "description": "Property listing management API",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/auth/login, /auth/forgot-password (public - token acquisition)",
            "dashboard": "/dashboard (protected)",
            "properties": "/properties[/:property_id] (protected)",
            "images": "/properties/:property_id/images[/:image_id] (protected, owner)",
            "documents": "/properties/:property_id/documents[/:document_id] (protected, owner)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
