use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub barcode: String,
    pub name: String,
    pub price: f64,
    pub discount_price: Option<f64>,
}

/// Fields accepted when creating or editing a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub barcode: String,
    pub name: String,
    pub price: f64,
    pub discount_price: Option<f64>,
}
