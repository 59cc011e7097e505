// src/handlers/admin.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{error, info, instrument};
use crate::dtos::product::{AdminDashboard, ProductForm, ProductResponse};
use crate::error::{map_unique_violation, AppError};
use crate::middleware::auth::AdminContext;
use crate::state::AppState;
use crate::store;

// GET /admin - signed-in admin and the full product list
#[instrument(skip(state, admin), fields(admin = %admin.username))]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
) -> Result<Json<AdminDashboard>, AppError> {
    let products = store::products::find_all(&state.db_pool).await?;
    Ok(Json(AdminDashboard {
        admin_id: admin.admin_id,
        admin: admin.username,
        session_expires_at: admin.expires_at.to_rfc3339(),
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

// GET /admin/products - List all products
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    match store::products::find_all(&state.db_pool).await {
        Ok(products) => Ok(Json(products.into_iter().map(ProductResponse::from).collect())),
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /admin/products/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = store::products::find_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /admin/products - Create new product
#[instrument(skip(state, admin, form), fields(admin = %admin.username))]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let data = form.validate()?;
    let product = store::products::create(&state.db_pool, &data)
        .await
        .map_err(|e| map_unique_violation(e, "Barcode already exists"))?;

    info!(id = product.id, barcode = %product.barcode, "Product created");
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /admin/products/{id} - Replace product fields
#[instrument(skip(state, admin, form), fields(admin = %admin.username))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    Json(form): Json<ProductForm>,
) -> Result<Json<ProductResponse>, AppError> {
    let data = form.validate()?;
    let product = store::products::update(&state.db_pool, id, &data)
        .await
        .map_err(|e| map_unique_violation(e, "Barcode already exists"))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    info!(id, "Product updated");
    Ok(Json(ProductResponse::from(product)))
}

// DELETE /admin/products/{id} - Delete product
#[instrument(skip(state, admin), fields(admin = %admin.username))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
) -> Result<StatusCode, AppError> {
    if !store::products::delete(&state.db_pool, id).await? {
        return Err(AppError::not_found("Product not found"));
    }

    info!(id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
