//! Product catalog: CRUD, per-size variants, and the batch lookups the
//! order engine reads stock through.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{Product, ProductVariant};
use crate::AppState;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ProductWithVariants {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<ProductVariant>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VariantInput {
    #[validate(length(min = 1))]
    pub size: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub cost_price: Option<i64>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub cost_price: Option<i64>,
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: Option<i32>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    #[validate]
    #[serde(default)]
    pub variants: Vec<VariantInput>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub cost_price: Option<i64>,
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: Option<i32>,
    #[validate(range(min = 0))]
    pub stock: i32,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceVariantsRequest {
    #[validate]
    pub variants: Vec<VariantInput>,
}

// =============================================================================
// Batch lookups (order engine read path)
// =============================================================================

pub(crate) async fn products_by_ids(db: &PgPool, ids: &[Uuid]) -> ApiResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(db)
        .await?;
    Ok(products)
}

pub(crate) async fn variants_by_product_ids(
    db: &PgPool,
    ids: &[Uuid],
) -> ApiResult<Vec<ProductVariant>> {
    let variants = sqlx::query_as::<_, ProductVariant>(
        "SELECT * FROM product_variants WHERE product_id = ANY($1) ORDER BY position",
    )
    .bind(ids)
    .fetch_all(db)
    .await?;
    Ok(variants)
}

/// Groups variant rows under their products, preserving product order.
pub(crate) fn attach_variants(
    products: Vec<Product>,
    variants: Vec<ProductVariant>,
) -> Vec<ProductWithVariants> {
    let mut by_product: HashMap<Uuid, Vec<ProductVariant>> = HashMap::new();
    for v in variants {
        by_product.entry(v.product_id).or_default().push(v);
    }
    products
        .into_iter()
        .map(|product| {
            let variants = by_product.remove(&product.id).unwrap_or_default();
            ProductWithVariants { product, variants }
        })
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/products - active products, newest first
pub async fn list_products(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProductWithVariants>>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE is_active = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;
    let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    let variants = variants_by_product_ids(&state.db, &ids).await?;
    Ok(Json(attach_variants(products, variants)))
}

/// GET /api/v1/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProductWithVariants>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("product {id}")))?;
    let variants = sqlx::query_as::<_, ProductVariant>(
        "SELECT * FROM product_variants WHERE product_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(ProductWithVariants { product, variants }))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductWithVariants>)> {
    req.validate()?;
    let mut tx = state.db.begin().await?;

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (id, name, description, price, cost_price, discount_percent, stock, is_active, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, NOW(), NOW()) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(req.cost_price)
    .bind(req.discount_percent)
    .bind(req.stock)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::Internal("product insert returned no row".into()))?;

    let mut variants = Vec::with_capacity(req.variants.len());
    for (position, v) in req.variants.iter().enumerate() {
        let variant = sqlx::query_as::<_, ProductVariant>(
            "INSERT INTO product_variants (id, product_id, size, price, cost_price, stock, position) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(product.id)
        .bind(&v.size)
        .bind(v.price)
        .bind(v.cost_price)
        .bind(v.stock)
        .bind(position as i32)
        .fetch_one(&mut *tx)
        .await?;
        variants.push(variant);
    }

    tx.commit().await?;
    tracing::info!(product_id = %product.id, name = %product.name, "product created");
    Ok((StatusCode::CREATED, Json(ProductWithVariants { product, variants })))
}

/// PUT /api/v1/products/:id - full-field update; variants are managed
/// separately so a concurrent order's stock decrement is never clobbered
/// by a catalog edit.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> ApiResult<Json<Product>> {
    req.validate()?;
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET name = $2, description = $3, price = $4, cost_price = $5, \
         discount_percent = $6, stock = $7, is_active = COALESCE($8, is_active), updated_at = NOW() \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(req.cost_price)
    .bind(req.discount_percent)
    .bind(req.stock)
    .bind(req.is_active)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

/// DELETE /api/v1/products/:id - soft delete; historical order items keep
/// their product reference.
pub async fn deactivate_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let updated = sqlx::query("UPDATE products SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?
        .rows_affected();
    if updated == 0 {
        return Err(ApiError::NotFound(format!("product {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/products/:id/variants - replaces the variant list by
/// upserting rows keyed on (product_id, size) and deleting absent sizes.
/// Row-level writes, no whole-list overwrite.
pub async fn replace_variants(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReplaceVariantsRequest>,
) -> ApiResult<Json<Vec<ProductVariant>>> {
    req.validate()?;
    let mut tx = state.db.begin().await?;

    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(ApiError::NotFound(format!("product {id}")));
    }

    let keep: Vec<String> = req.variants.iter().map(|v| v.size.clone()).collect();
    sqlx::query("DELETE FROM product_variants WHERE product_id = $1 AND size <> ALL($2)")
        .bind(id)
        .bind(&keep)
        .execute(&mut *tx)
        .await?;

    for (position, v) in req.variants.iter().enumerate() {
        sqlx::query(
            "INSERT INTO product_variants (id, product_id, size, price, cost_price, stock, position) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (product_id, size) DO UPDATE SET \
             price = EXCLUDED.price, cost_price = EXCLUDED.cost_price, \
             stock = EXCLUDED.stock, position = EXCLUDED.position",
        )
        .bind(Uuid::now_v7())
        .bind(id)
        .bind(&v.size)
        .bind(v.price)
        .bind(v.cost_price)
        .bind(v.stock)
        .bind(position as i32)
        .execute(&mut *tx)
        .await?;
    }

    let variants = sqlx::query_as::<_, ProductVariant>(
        "SELECT * FROM product_variants WHERE product_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Json(variants))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            price: 100,
            cost_price: None,
            discount_percent: None,
            stock: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn attach_variants_groups_by_product() {
        let a = product("Oud Royal");
        let b = product("Amber Mist");
        let variants = vec![
            ProductVariant {
                id: Uuid::new_v4(),
                product_id: a.id,
                size: "10ml".into(),
                price: 40,
                cost_price: None,
                stock: 5,
                position: 0,
            },
            ProductVariant {
                id: Uuid::new_v4(),
                product_id: a.id,
                size: "20ml".into(),
                price: 70,
                cost_price: None,
                stock: 2,
                position: 1,
            },
        ];
        let grouped = attach_variants(vec![a, b], variants);
        assert_eq!(grouped[0].variants.len(), 2);
        assert!(grouped[1].variants.is_empty());
    }

    #[test]
    fn create_request_bounds_are_enforced() {
        let ok: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Oud Royal",
            "price": 100,
            "stock": 10,
            "variants": [{"size": "10ml", "price": 40, "stock": 5}]
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let bad: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "",
            "price": 100
        }))
        .unwrap();
        assert!(bad.validate().is_err());

        let bad: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Oud Royal",
            "price": 100,
            "discount_percent": 140
        }))
        .unwrap();
        assert!(bad.validate().is_err());

        let bad: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Oud Royal",
            "price": 100,
            "variants": [{"size": "", "price": 40}]
        }))
        .unwrap();
        assert!(bad.validate().is_err());
    }
}
