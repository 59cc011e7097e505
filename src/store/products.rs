//! Product Store
//!
//! CRUD over the `products` table. Functions take any SQLite executor so the
//! importer can call them inside its transaction.

use sqlx::SqliteExecutor;
use crate::models::product::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "id, barcode, name, price, discount_price";

pub async fn find_all<'e, E>(executor: E) -> Result<Vec<Product>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"))
        .fetch_all(executor)
        .await
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Product>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_barcode<'e, E>(executor: E, barcode: &str) -> Result<Option<Product>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = ? LIMIT 1"
    ))
    .bind(barcode)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(executor: E, data: &NewProduct) -> Result<Product, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (barcode, name, price, discount_price)
         VALUES (?, ?, ?, ?) RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&data.barcode)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.discount_price)
    .fetch_one(executor)
    .await
}

/// Replaces every editable field. `None` if the id does not exist.
pub async fn update<'e, E>(executor: E, id: i64, data: &NewProduct) -> Result<Option<Product>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET barcode = ?, name = ?, price = ?, discount_price = ?
         WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&data.barcode)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.discount_price)
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Returns whether a row was removed.
pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
