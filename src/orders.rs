//! Order engine and status lifecycle.
//!
//! Order placement validates the submitted cart against current stock,
//! snapshots line prices, and decrements inventory inside a single
//! transaction. Stock writes are conditional relative updates
//! (`stock = stock - $n ... AND stock >= $n`), so a concurrent order that
//! loses the race fails cleanly instead of overselling.
//!
//! Cancelling a not-yet-cancelled order restores the stock its lines
//! consumed; re-cancelling is a no-op for stock. Deleting an order removes
//! its items and the order row and nothing else.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::catalog;
use crate::error::{ApiError, ApiResult};
use crate::models::{Order, OrderItem, OrderSource, OrderStatus, Product, ProductVariant};
use crate::{notify, AppState};

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub variant: Option<String>,
}

/// Guest checkout payload. All contact fields are required.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    pub items: Vec<CartLine>,
    #[validate(length(min = 1))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    #[validate(length(min = 1))]
    pub customer_phone: String,
    #[validate(length(min = 1))]
    pub shipping_address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub postal_code: String,
    pub notes: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Back-office order creation: email and postal code optional, source
/// selectable (phone orders default to manual).
#[derive(Debug, Deserialize, Validate)]
pub struct AdminOrderRequest {
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    pub items: Vec<CartLine>,
    #[validate(length(min = 1))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(min = 1))]
    pub customer_phone: String,
    #[validate(length(min = 1))]
    pub shipping_address: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
    pub user_id: Option<Uuid>,
    #[serde(default = "default_admin_source")]
    pub source: OrderSource,
}

fn default_admin_source() -> OrderSource {
    OrderSource::Manual
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    #[serde(flatten)]
    pub order: Order,
    pub previous_status: OrderStatus,
    pub should_send_email: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_order_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
}

// =============================================================================
// Cart resolution (pure)
// =============================================================================

/// A cart line resolved against the catalog: snapshot price plus the stock
/// row the decrement targets.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: i64,
    /// Label as submitted, stored on the item row.
    pub requested_variant: Option<String>,
    /// `Some` when the label matched a variant row; the decrement then
    /// targets that row instead of base stock.
    pub matched_variant: Option<String>,
}

/// Resolves cart lines to snapshot prices and checks requested quantities
/// against the stock read from the catalog. Performs no writes.
pub(crate) fn resolve_lines(
    lines: &[CartLine],
    products: &[Product],
    variants: &[ProductVariant],
) -> ApiResult<Vec<ResolvedLine>> {
    let mut resolved = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity < 1 {
            return Err(ApiError::Validation("quantity must be a positive integer".into()));
        }
        let product = products
            .iter()
            .find(|p| p.id == line.product_id)
            .ok_or_else(|| ApiError::NotFound(format!("product {}", line.product_id)))?;

        let matched = line.variant.as_deref().and_then(|label| {
            variants
                .iter()
                .find(|v| v.product_id == product.id && v.size == label)
        });

        // A matching variant supplies price and stock; otherwise the base
        // product fields apply (including when the label matched nothing).
        let (price, available, matched_variant) = match matched {
            Some(v) => (v.price, v.stock, Some(v.size.clone())),
            None => (product.price, product.stock, None),
        };

        if line.quantity > available {
            return Err(ApiError::InsufficientStock {
                product: product.name.clone(),
                variant: matched_variant,
                available,
            });
        }

        resolved.push(ResolvedLine {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: line.quantity,
            price,
            requested_variant: line.variant.clone(),
            matched_variant,
        });
    }
    Ok(resolved)
}

pub(crate) fn order_total(lines: &[ResolvedLine]) -> i64 {
    lines.iter().map(|l| l.price * l.quantity as i64).sum()
}

/// Stock is restored exactly on the edge into `cancelled`.
pub(crate) fn restores_stock(current: OrderStatus, new: OrderStatus) -> bool {
    new == OrderStatus::Cancelled && current != OrderStatus::Cancelled
}

// =============================================================================
// Order engine
// =============================================================================

struct NewOrder {
    user_id: Option<Uuid>,
    source: OrderSource,
    customer_name: String,
    customer_email: Option<String>,
    customer_phone: String,
    shipping_address: String,
    city: String,
    postal_code: Option<String>,
    notes: Option<String>,
}

/// Validates the cart, then inserts the order, its items, and the stock
/// decrements in one transaction. Any failure rolls the whole order back.
async fn place_order(
    db: &PgPool,
    new: NewOrder,
    lines: &[CartLine],
) -> ApiResult<(Order, Vec<OrderItem>)> {
    let ids: Vec<Uuid> = lines.iter().map(|l| l.product_id).collect();
    let products = catalog::products_by_ids(db, &ids).await?;
    let variants = catalog::variants_by_product_ids(db, &ids).await?;

    let resolved = resolve_lines(lines, &products, &variants)?;
    let total = order_total(&resolved);

    let mut tx = db.begin().await?;

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (id, user_id, status, total, source, customer_name, customer_email, customer_phone, shipping_address, city, postal_code, notes, created_at, updated_at) \
         VALUES ($1, $2, 'pending', $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW()) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(new.user_id)
    .bind(total)
    .bind(new.source)
    .bind(&new.customer_name)
    .bind(&new.customer_email)
    .bind(&new.customer_phone)
    .bind(&new.shipping_address)
    .bind(&new.city)
    .bind(&new.postal_code)
    .bind(&new.notes)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::Internal("order insert returned no row".into()))?;

    let mut items = Vec::with_capacity(resolved.len());
    for line in &resolved {
        let item = sqlx::query_as::<_, OrderItem>(
            "INSERT INTO order_items (id, order_id, product_id, product_name, quantity, price, variant) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(order.id)
        .bind(line.product_id)
        .bind(&line.product_name)
        .bind(line.quantity)
        .bind(line.price)
        .bind(&line.requested_variant)
        .fetch_one(&mut *tx)
        .await?;

        let updated = match &line.matched_variant {
            Some(size) => {
                sqlx::query(
                    "UPDATE product_variants SET stock = stock - $1 \
                     WHERE product_id = $2 AND size = $3 AND stock >= $1",
                )
                .bind(line.quantity)
                .bind(line.product_id)
                .bind(size)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            }
            None => {
                sqlx::query(
                    "UPDATE products SET stock = stock - $1 WHERE id = $2 AND stock >= $1",
                )
                .bind(line.quantity)
                .bind(line.product_id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            }
        };

        // A concurrent order drained the stock between our read and this
        // write; dropping the transaction rolls everything back.
        if updated == 0 {
            let available = current_stock(&mut tx, line).await?;
            return Err(ApiError::InsufficientStock {
                product: line.product_name.clone(),
                variant: line.matched_variant.clone(),
                available,
            });
        }

        items.push(item);
    }

    tx.commit().await?;
    Ok((order, items))
}

async fn current_stock(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    line: &ResolvedLine,
) -> ApiResult<i32> {
    let stock: Option<i32> = match &line.matched_variant {
        Some(size) => {
            sqlx::query_scalar("SELECT stock FROM product_variants WHERE product_id = $1 AND size = $2")
                .bind(line.product_id)
                .bind(size)
                .fetch_optional(&mut **tx)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
                .bind(line.product_id)
                .fetch_optional(&mut **tx)
                .await?
        }
    };
    Ok(stock.unwrap_or(0))
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/orders - guest checkout, source fixed to website
pub async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<OrderWithItems>)> {
    req.validate()?;
    let new = NewOrder {
        user_id: req.user_id,
        source: OrderSource::Website,
        customer_name: req.customer_name,
        customer_email: Some(req.customer_email),
        customer_phone: req.customer_phone,
        shipping_address: req.shipping_address,
        city: req.city,
        postal_code: Some(req.postal_code),
        notes: req.notes,
    };
    let (order, items) = place_order(&state.db, new, &req.items).await?;
    tracing::info!(order_id = %order.id, total = order.total, "order placed");
    notify::order_created(&state.nats, &order, &items).await;
    Ok((StatusCode::CREATED, Json(OrderWithItems { order, items })))
}

/// POST /api/v1/admin/orders - back-office creation
pub async fn admin_create(
    State(state): State<AppState>,
    Json(req): Json<AdminOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderWithItems>)> {
    req.validate()?;
    let new = NewOrder {
        user_id: req.user_id,
        source: req.source,
        customer_name: req.customer_name,
        customer_email: req.customer_email,
        customer_phone: req.customer_phone,
        shipping_address: req.shipping_address,
        city: req.city,
        postal_code: req.postal_code,
        notes: req.notes,
    };
    let (order, items) = place_order(&state.db, new, &req.items).await?;
    tracing::info!(order_id = %order.id, source = ?order.source, "admin order placed");
    notify::order_created(&state.nats, &order, &items).await;
    Ok((StatusCode::CREATED, Json(OrderWithItems { order, items })))
}

/// PUT /api/v1/orders/:id/status - status transition with compensating
/// stock restoration on cancellation.
///
/// No transition guard is applied: the back office may set any status from
/// any status. Restoration runs only on the first transition into
/// cancelled.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<StatusChangeResponse>> {
    let mut tx = state.db.begin().await?;

    // Row lock so two concurrent cancellations cannot both restore stock.
    let current = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("order {id}")))?;

    if restores_stock(current.status, req.status) {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        for item in items.iter().filter(|i| i.product_id.is_some()) {
            restore_item_stock(&mut tx, item).await?;
        }
    }

    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(req.status)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    let should_send_email = order.customer_email.is_some();
    tracing::info!(order_id = %id, from = ?current.status, to = ?order.status, "order status changed");
    notify::status_changed(&state.nats, &order, current.status, should_send_email).await;

    Ok(Json(StatusChangeResponse {
        order,
        previous_status: current.status,
        should_send_email,
    }))
}

/// Returns one line's units to the stock row they came from. The item's
/// variant label is the key; if that variant row no longer exists the units
/// go back onto base stock so inventory is conserved.
async fn restore_item_stock(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    item: &OrderItem,
) -> ApiResult<()> {
    let Some(product_id) = item.product_id else {
        return Ok(());
    };
    if let Some(size) = &item.variant {
        let n = sqlx::query(
            "UPDATE product_variants SET stock = stock + $1 WHERE product_id = $2 AND size = $3",
        )
        .bind(item.quantity)
        .bind(product_id)
        .bind(size)
        .execute(&mut **tx)
        .await?
        .rows_affected();
        if n > 0 {
            return Ok(());
        }
    }
    sqlx::query("UPDATE products SET stock = stock + $1 WHERE id = $2")
        .bind(item.quantity)
        .bind(product_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// DELETE /api/v1/orders/:id - removes items then the order. Never restores
/// stock and never emits events.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    let mut tx = state.db.begin().await?;
    sqlx::query("DELETE FROM order_items WHERE order_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Err(ApiError::NotFound(format!("order {id}")));
    }
    tx.commit().await?;
    tracing::info!(order_id = %id, "order deleted");
    Ok(Json(DeleteResponse {
        success: true,
        deleted_order_id: id,
    }))
}

// =============================================================================
// Read accessors
// =============================================================================

/// GET /api/v1/orders - paginated, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    Query(p): Query<ListParams>,
) -> ApiResult<Json<PaginatedResponse<OrderWithItems>>> {
    let page = p.page.unwrap_or(1).max(1);
    let per_page = p.per_page.unwrap_or(20).min(100);
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(per_page as i64)
    .bind(((page - 1) * per_page) as i64)
    .fetch_all(&state.db)
    .await?;
    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&state.db)
        .await?;
    let data = attach_items(&state.db, orders).await?;
    Ok(Json(PaginatedResponse {
        data,
        total: total.0,
        page,
    }))
}

/// GET /api/v1/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderWithItems>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("order {id}")))?;
    let items = sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
        .bind(id)
        .fetch_all(&state.db)
        .await?;
    Ok(Json(OrderWithItems { order, items }))
}

/// GET /api/v1/orders/user/:user_id
pub async fn my_orders(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<OrderWithItems>>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(attach_items(&state.db, orders).await?))
}

async fn attach_items(db: &PgPool, orders: Vec<Order>) -> ApiResult<Vec<OrderWithItems>> {
    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ANY($1)",
    )
    .bind(&ids)
    .fetch_all(db)
    .await?;
    let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }
    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems { order, items }
        })
        .collect())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str, price: i64, stock: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            price,
            cost_price: None,
            discount_percent: None,
            stock,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn variant(product_id: Uuid, size: &str, price: i64, stock: i32) -> ProductVariant {
        ProductVariant {
            id: Uuid::new_v4(),
            product_id,
            size: size.into(),
            price,
            cost_price: None,
            stock,
            position: 0,
        }
    }

    fn line(product_id: Uuid, quantity: i32, variant: Option<&str>) -> CartLine {
        CartLine {
            product_id,
            quantity,
            variant: variant.map(Into::into),
        }
    }

    #[test]
    fn base_line_uses_base_price_and_stock() {
        let p = product("Oud Royal", 100, 10);
        let resolved = resolve_lines(&[line(p.id, 3, None)], &[p], &[]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].price, 100);
        assert_eq!(resolved[0].quantity, 3);
        assert!(resolved[0].matched_variant.is_none());
        assert_eq!(order_total(&resolved), 300);
    }

    #[test]
    fn variant_line_uses_variant_price() {
        let p = product("Rose Noire", 100, 0);
        let vs = vec![variant(p.id, "10ml", 40, 5), variant(p.id, "20ml", 70, 2)];
        let resolved = resolve_lines(&[line(p.id, 2, Some("20ml"))], &[p], &vs).unwrap();
        assert_eq!(resolved[0].price, 70);
        assert_eq!(resolved[0].matched_variant.as_deref(), Some("20ml"));
        assert_eq!(order_total(&resolved), 140);
    }

    #[test]
    fn variant_over_stock_is_rejected_with_availability() {
        let p = product("Rose Noire", 100, 50);
        let vs = vec![variant(p.id, "10ml", 40, 5), variant(p.id, "20ml", 70, 2)];
        let err = resolve_lines(&[line(p.id, 6, Some("10ml"))], &[p], &vs).unwrap_err();
        match err {
            ApiError::InsufficientStock {
                product,
                variant,
                available,
            } => {
                assert_eq!(product, "Rose Noire");
                assert_eq!(variant.as_deref(), Some("10ml"));
                assert_eq!(available, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn base_over_stock_is_rejected() {
        let p = product("Amber Mist", 80, 1);
        let err = resolve_lines(&[line(p.id, 2, None)], &[p], &[]).unwrap_err();
        assert!(matches!(
            err,
            ApiError::InsufficientStock {
                variant: None,
                available: 1,
                ..
            }
        ));
    }

    #[test]
    fn unknown_variant_label_falls_back_to_base() {
        let p = product("Rose Noire", 100, 10);
        let vs = vec![variant(p.id, "10ml", 40, 5)];
        let resolved = resolve_lines(&[line(p.id, 8, Some("50ml"))], &[p], &vs).unwrap();
        // Label kept on the line, but pricing and stock came from the base
        // product (8 > the 10ml variant's 5, yet within base stock 10).
        assert_eq!(resolved[0].requested_variant.as_deref(), Some("50ml"));
        assert!(resolved[0].matched_variant.is_none());
        assert_eq!(resolved[0].price, 100);
    }

    #[test]
    fn unknown_product_is_not_found() {
        let p = product("Oud Royal", 100, 10);
        let err = resolve_lines(&[line(Uuid::new_v4(), 1, None)], &[p], &[]).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let p = product("Oud Royal", 100, 10);
        let err = resolve_lines(&[line(p.id, 0, None)], std::slice::from_ref(&p), &[]).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let err = resolve_lines(&[line(p.id, -3, None)], &[p], &[]).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn multi_line_total_sums_snapshots() {
        let a = product("Oud Royal", 100, 10);
        let b = product("Amber Mist", 80, 10);
        let lines = vec![line(a.id, 3, None), line(b.id, 2, None)];
        let resolved = resolve_lines(&lines, &[a, b], &[]).unwrap();
        assert_eq!(order_total(&resolved), 460);
    }

    #[test]
    fn stock_restores_only_on_the_edge_into_cancelled() {
        use OrderStatus::*;
        assert!(restores_stock(Pending, Cancelled));
        assert!(restores_stock(Processing, Cancelled));
        assert!(restores_stock(Delivered, Cancelled));
        // Re-cancelling is a stock no-op.
        assert!(!restores_stock(Cancelled, Cancelled));
        // Leaving cancelled or moving between live states never restores.
        assert!(!restores_stock(Cancelled, Pending));
        assert!(!restores_stock(Pending, Delivered));
        assert!(!restores_stock(Processing, Shipped));
    }

    #[test]
    fn checkout_request_requires_contact_fields() {
        let req = CheckoutRequest {
            items: vec![line(Uuid::new_v4(), 1, None)],
            customer_name: "Ada".into(),
            customer_email: "not-an-email".into(),
            customer_phone: "123".into(),
            shipping_address: "1 Rue de la Paix".into(),
            city: "Paris".into(),
            postal_code: "75001".into(),
            notes: None,
            user_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_cart_fails_validation() {
        let req = AdminOrderRequest {
            items: vec![],
            customer_name: "Ada".into(),
            customer_email: None,
            customer_phone: "123".into(),
            shipping_address: "1 Rue de la Paix".into(),
            city: "Paris".into(),
            postal_code: None,
            notes: None,
            user_id: None,
            source: OrderSource::Manual,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn admin_source_defaults_to_manual() {
        let req: AdminOrderRequest = serde_json::from_value(serde_json::json!({
            "items": [{"product_id": Uuid::new_v4(), "quantity": 1}],
            "customer_name": "Ada",
            "customer_phone": "123",
            "shipping_address": "1 Rue de la Paix",
            "city": "Paris"
        }))
        .unwrap();
        assert_eq!(req.source, OrderSource::Manual);
    }
}
