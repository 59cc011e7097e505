// src/dtos/product.rs
use serde::{Deserialize, Serialize};
use crate::catalog::query::is_on_sale;
use crate::models::product::{NewProduct, Product};
use crate::error::AppError;

const MAX_BARCODE_LEN: usize = 20;
const MAX_NAME_LEN: usize = 100;

/// Admin create/edit form. Editing replaces every field.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub barcode: String,
    pub name: String,
    pub price: f64,
    pub discount_price: Option<f64>,
}

impl ProductForm {
    pub fn validate(self) -> Result<NewProduct, AppError> {
        let barcode = self.barcode.trim().to_string();
        let name = self.name.trim().to_string();

        if barcode.is_empty() {
            return Err(AppError::validation("Barcode required"));
        }
        if barcode.chars().count() > MAX_BARCODE_LEN {
            return Err(AppError::validation(format!("Barcode longer than {MAX_BARCODE_LEN} characters")));
        }
        if name.is_empty() {
            return Err(AppError::validation("Name required"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::validation(format!("Name longer than {MAX_NAME_LEN} characters")));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(AppError::validation("Price must be greater than 0"));
        }
        if let Some(discount) = self.discount_price {
            if !discount.is_finite() || discount < 0.0 {
                return Err(AppError::validation("Discount price cannot be negative"));
            }
        }

        Ok(NewProduct {
            barcode,
            name,
            price: self.price,
            discount_price: self.discount_price,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub barcode: String,
    pub name: String,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub on_sale: bool,
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let on_sale = is_on_sale(&product);
        Self {
            id: product.id,
            barcode: product.barcode,
            name: product.name,
            price: product.price,
            discount_price: product.discount_price,
            on_sale,
        }
    }
}

/// Query parameters of the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQueryParams {
    pub search: Option<String>,
    pub akcija: Option<String>,
}

/// Context of the public listing page.
#[derive(Serialize)]
pub struct CatalogPage {
    pub search: String,
    pub akcija: String,
    pub year: i32,
    pub products: Vec<ProductResponse>,
}

#[derive(Serialize)]
pub struct AdminDashboard {
    pub admin_id: i64,
    pub admin: String,
    pub session_expires_at: String,
    pub products: Vec<ProductResponse>,
}
