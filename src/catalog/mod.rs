//! Catalog logic: spreadsheet import and the public listing query.

pub mod import;
pub mod query;
