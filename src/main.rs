mod auth;
mod db;
mod discounts;
mod error;
mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use discounts::handlers::{get_all_discounts, get_discounts, get_vocabulary, save_discount};
use discounts::models::{Condition, DiscountRecord, SaveAck};
use discounts::vocabulary::{
    ConditionField, FieldGroup, FieldOption, OperatorGroup, OperatorSets, Vocabulary,
};
use discounts::DiscountRepository;
use store::{OptionStore, PgOptionStore};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        discounts::handlers::get_all_discounts,
        discounts::handlers::save_discount,
        discounts::handlers::get_discounts,
        discounts::handlers::get_vocabulary,
    ),
    components(
        schemas(
            DiscountRecord,
            Condition,
            SaveAck,
            Vocabulary,
            FieldGroup,
            FieldOption,
            ConditionField,
            OperatorGroup,
            OperatorSets,
        )
    ),
    tags(
        (name = "discounts", description = "Discount rule storage and retrieval endpoints")
    ),
    info(
        title = "Discount Rules API",
        version = "1.0.0",
        description = "RESTful API for storing and listing store discount rules"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub discounts: DiscountRepository,
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(store: Arc<dyn OptionStore>) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState {
        discounts: DiscountRepository::new(store),
    };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/api/get-all-discounts", get(get_all_discounts))
        .route("/api/save-data", post(save_discount))
        .route("/api/get-discounts", get(get_discounts))
        .route("/api/vocabulary", get(get_vocabulary))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Discount Rules API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router over the PostgreSQL-backed option store
    let store = Arc::new(PgOptionStore::new(db_pool));
    let app = create_router(store);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Discount Rules API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
