//! Database-backed records.
//!
//! Currency values are whole-unit integers throughout (no minor units).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_source", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    Website,
    Facebook,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub cost_price: Option<i64>,
    pub discount_percent: Option<i32>,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sized sub-SKU of a product carrying its own price and stock.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub size: String,
    pub price: i64,
    pub cost_price: Option<i64>,
    pub stock: i32,
    pub position: i32,
}

/// `source` is `None` on rows imported from the legacy shop; reporting treats
/// those as website orders.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub status: OrderStatus,
    pub total: i64,
    pub source: Option<OrderSource>,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub shipping_address: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `price`, `product_name` and `variant` are snapshots taken at order time;
/// later product edits never alter them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: i32,
    pub price: i64,
    pub variant: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&OrderStatus::Cancelled).unwrap(), "\"cancelled\"");
        let s: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(s, OrderStatus::Delivered);
    }

    #[test]
    fn source_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&OrderSource::Facebook).unwrap(), "\"facebook\"");
        let s: OrderSource = serde_json::from_str("\"manual\"").unwrap();
        assert_eq!(s, OrderSource::Manual);
    }
}
