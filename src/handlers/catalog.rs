// src/handlers/catalog.rs
use axum::{extract::{Query, State}, Json};
use chrono::{Datelike, Utc};
use tracing::instrument;
use crate::catalog::query::{list_products, CatalogFilter};
use crate::dtos::product::{CatalogPage, CatalogQueryParams, ProductResponse};
use crate::error::AppError;
use crate::state::AppState;

// GET / - Public listing with optional search and on-sale filter
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<Json<CatalogPage>, AppError> {
    let filter = CatalogFilter::from_params(params.search.as_deref(), params.akcija.as_deref());
    let products = list_products(&state.db_pool, &filter).await?;

    Ok(Json(CatalogPage {
        search: params.search.unwrap_or_default().trim().to_string(),
        akcija: params.akcija.unwrap_or_default(),
        year: Utc::now().year(),
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}
