//! SQLite-backed stores for products and admin credentials.

pub mod admins;
pub mod products;
