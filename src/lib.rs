//! Parfum — Self-hosted Perfume Shop Platform
//!
//! Storefront and back-office API over Postgres.
//!
//! ## Features
//! - Product catalog with per-size variants
//! - Guest and admin checkout with transactional stock reservation
//! - Order status lifecycle with compensating stock restoration
//! - Dashboard revenue and order rollups
//! - Fire-and-forget order events for the email notifier

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod notify;
pub mod orders;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub nats: Option<async_nats::Client>,
}
