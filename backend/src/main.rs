use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
    middleware
};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use std::sync::Arc;
use anyhow::Context;

mod config;
mod error;
mod handlers {
    pub mod consultation_handlers;
    pub mod consultation_dtos;
    pub mod admin_handlers;
    pub mod auth_middleware;
}
mod models {
    pub mod consultation_models;
}
mod repositories {
    pub mod consultation_repository;
}
mod schema;

use config::AppConfig;
use repositories::consultation_repository::ConsultationRepository;
use handlers::consultation_handlers;
use handlers::admin_handlers;
use handlers::auth_middleware;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    consultation_repository: Arc<ConsultationRepository>,
    admin_api_token: Option<String>,
}

pub fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    let mut conn = pool.get().context("Failed to get DB connection")?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    Ok(())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin/consultations", get(admin_handlers::list_consultations))
        .route("/api/admin/consultations/{id}/status", post(admin_handlers::update_consultation_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware::require_admin));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/consultations", post(consultation_handlers::create_consultation))
        .merge(admin_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any) // the lead form is public; admin routes still need the bearer token
                .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION])
                .expose_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    // Set up database connection pool
    let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create pool")?;
    run_migrations(&pool)?;
    info!("Database ready at {}", config.database_url);

    if config.admin_api_token.is_none() {
        info!("ADMIN_API_TOKEN not set, admin routes are disabled");
    }

    let state = Arc::new(AppState {
        consultation_repository: Arc::new(ConsultationRepository::new(pool)),
        admin_api_token: config.admin_api_token.clone(),
    });

    let mut app = build_router(state);
    if let Some(dist) = &config.frontend_dist {
        // Unknown paths fall back to index.html so client-side routes load
        let index = dist.join("index.html");
        app = app.fallback_service(ServeDir::new(dist).not_found_service(ServeFile::new(index)));
        info!("Serving frontend from {}", dist.display());
    }

    use tokio::net::TcpListener;

    let listener = TcpListener::bind(config.bind_addr).await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    // One connection, so the in-memory database lives as long as the pool
    pub fn test_pool() -> DbPool {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(manager)
            .expect("in-memory pool");
        run_migrations(&pool).expect("migrations");
        pool
    }

    pub fn test_state(admin_api_token: Option<&str>) -> Arc<AppState> {
        Arc::new(AppState {
            consultation_repository: Arc::new(ConsultationRepository::new(test_pool())),
            admin_api_token: admin_api_token.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const TOKEN: &str = "s3cret";

    fn valid_body() -> Value {
        json!({
            "full_name": "  Jane Doe ",
            "email": "Jane@Example.com",
            "company_name": "Acme Inc",
            "service_selection": "ai-agents",
            "problems": "Our sales team loses hours every week copying leads between tools.",
            "additional_info": null
        })
    }

    fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_router(test_state(None));
        let response = app.oneshot(get("/api/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_stores_normalized_pending_record() {
        let app = build_router(test_state(None));
        let response = app
            .oneshot(post_json("/api/consultations", &valid_body(), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert_eq!(body["status"], "pending");
        assert_eq!(body["full_name"], "Jane Doe");
        assert_eq!(body["email"], "jane@example.com");
        assert!(body["id"].as_str().map_or(false, |id| !id.is_empty()));
        assert!(body["created_at"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn invalid_submission_is_a_validation_error() {
        let app = build_router(test_state(None));
        let mut body = valid_body();
        body["problems"] = json!("too short text");
        let response = app
            .oneshot(post_json("/api/consultations", &body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["category"], "validation");
        assert!(body["error"].as_str().unwrap().contains("Problems"));
    }

    #[tokio::test]
    async fn admin_routes_need_the_token() {
        let app = build_router(test_state(Some(TOKEN)));

        let response = app.clone().oneshot(get("/api/admin/consultations", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["category"], "unauthorized");

        let response = app
            .oneshot(get("/api/admin/consultations", Some("wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_routes_closed_without_configured_token() {
        let app = build_router(test_state(None));
        let response = app
            .oneshot(get("/api/admin/consultations", Some("anything")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_can_list_and_move_status() {
        let app = build_router(test_state(Some(TOKEN)));
        let created = json_body(
            app.clone()
                .oneshot(post_json("/api/consultations", &valid_body(), None))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/admin/consultations/{}/status", id),
                &json!({"status": "booked"}),
                Some(TOKEN),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "booked");

        let listed = json_body(
            app.clone()
                .oneshot(get("/api/admin/consultations?status=booked", Some(TOKEN)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let pending = json_body(
            app.oneshot(get("/api/admin/consultations?status=pending", Some(TOKEN)))
                .await
                .unwrap(),
        )
        .await;
        assert!(pending.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_update_for_unknown_id_is_not_found() {
        let app = build_router(test_state(Some(TOKEN)));
        let response = app
            .oneshot(post_json(
                "/api/admin/consultations/missing/status",
                &json!({"status": "closed"}),
                Some(TOKEN),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["category"], "not_found");
    }
}
