//! Parfum - Self-hosted Perfume Shop Platform

use anyhow::Result;
use axum::routing::{get, post, put};
use axum::Router;
use parfum::{catalog, dashboard, orders, AppState};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&std::env::var("DATABASE_URL")?)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let nats = match std::env::var("NATS_URL") {
        Ok(url) => match async_nats::connect(&url).await {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "NATS unavailable, order events disabled");
                None
            }
        },
        Err(_) => None,
    };

    let state = AppState { db, nats };

    let app = Router::new()
        .route(
            "/health",
            get(|| async { axum::Json(serde_json::json!({"status": "healthy", "service": "parfum"})) }),
        )
        .route("/api/v1/products", get(catalog::list_products).post(catalog::create_product))
        .route(
            "/api/v1/products/:id",
            get(catalog::get_product)
                .put(catalog::update_product)
                .delete(catalog::deactivate_product),
        )
        .route("/api/v1/products/:id/variants", put(catalog::replace_variants))
        .route("/api/v1/orders", get(orders::list_orders).post(orders::checkout))
        .route("/api/v1/admin/orders", post(orders::admin_create))
        .route("/api/v1/orders/:id", get(orders::get_order).delete(orders::delete_order))
        .route("/api/v1/orders/:id/status", put(orders::update_status))
        .route("/api/v1/orders/user/:user_id", get(orders::my_orders))
        .route("/api/v1/dashboard/stats", get(dashboard::dashboard_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8083".to_string());
    tracing::info!("parfum listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}
