use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use order_system_api::config::AppConfig;
use order_system_api::database;
use order_system_api::handlers::{orders, products, users};
use order_system_api::middleware::require_auth;
use order_system_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting Order System API in {:?} mode", config.environment);

    let pool = database::connect(&config.database).await?;
    sqlx::migrate!().run(&pool).await?;

    let port = config.server.port;
    let state = AppState::new(config, pool);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Order System API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Token acquisition and open registration; no credential required.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/log-in", post(users::log_in))
        .route("/api/users/register-user", post(users::register_user))
}

/// Everything behind the authorization gate. Role checks happen per handler.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/register-moderator",
            post(users::register_moderator),
        )
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/orders", post(orders::create_order))
        .route("/api/orders/all-orders", get(orders::all_orders))
        .route("/api/orders/order-by-id", get(orders::order_by_id))
        .route(
            "/api/orders/orders-by-user-id",
            get(orders::orders_by_user_id),
        )
        .route("/api/orders/orders-by-token", get(orders::orders_by_token))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Order System API",
        "version": version,
        "endpoints": {
            "users": "/api/users/log-in, /api/users/register-user (public), /api/users/register-moderator (admin)",
            "products": "/api/products[/:id] (authenticated; writes require staff roles)",
            "orders": "/api/orders, /api/orders/orders-by-token (authenticated), /api/orders/all-orders, /api/orders/order-by-id, /api/orders/orders-by-user-id (staff)",
            "health": "/health (public)"
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
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
