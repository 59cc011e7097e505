//! Catalog Importer
//!
//! Reconciles the product spreadsheet into the Product Store. Rows are
//! inserted only when their barcode is not already stored; existing rows are
//! never updated. One run is one transaction.

use std::fmt;
use std::path::{Path, PathBuf};
use calamine::{open_workbook_auto, Data, Range, Reader};
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument, warn};
use crate::models::product::NewProduct;
use crate::store;

/// Header of the business-code column.
pub const CODE_COLUMN: &str = "Шифра";
/// Header of the display-name column.
pub const NAME_COLUMN: &str = "Име на артикал";
/// Header of the sale-price column.
pub const PRICE_COLUMN: &str = "Продажна цена";

/// One data row of the source sheet, with the required fields coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// 1-based row number in the sheet.
    pub line: usize,
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub inserted: usize,
    pub already_present: usize,
    pub skipped_incomplete: usize,
}

#[derive(Debug)]
pub enum ImportError {
    Read(calamine::Error),
    NoWorksheet,
    MissingColumn(&'static str),
    InvalidPrice { line: usize, value: String },
    Database(sqlx::Error),
    Task(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Read(e) => write!(f, "cannot read spreadsheet: {e}"),
            ImportError::NoWorksheet => write!(f, "spreadsheet has no worksheet"),
            ImportError::MissingColumn(col) => write!(f, "missing column '{col}'"),
            ImportError::InvalidPrice { line, value } => {
                write!(f, "row {line}: sale price '{value}' is not a positive number")
            }
            ImportError::Database(e) => write!(f, "database error: {e}"),
            ImportError::Task(e) => write!(f, "import task failed: {e}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::Read(err)
    }
}

impl From<sqlx::Error> for ImportError {
    fn from(err: sqlx::Error) -> Self {
        ImportError::Database(err)
    }
}

/// Result of a best-effort import run. Never fatal to the caller.
#[derive(Debug)]
pub enum ImportOutcome {
    /// Every row was inserted or already present.
    Completed(ImportSummary),
    /// Committed, but some rows lacked a required field.
    Partial(ImportSummary),
    /// Nothing was committed.
    Failed(String),
}

impl ImportOutcome {
    /// Classifies a finished run. Skipped incomplete rows make it partial;
    /// already-stored barcodes do not.
    pub fn from_result(result: Result<ImportSummary, ImportError>) -> Self {
        match result {
            Ok(summary) if summary.skipped_incomplete > 0 => ImportOutcome::Partial(summary),
            Ok(summary) => ImportOutcome::Completed(summary),
            Err(e) => ImportOutcome::Failed(e.to_string()),
        }
    }

    #[cfg(test)]
    pub fn summary(&self) -> Option<&ImportSummary> {
        match self {
            ImportOutcome::Completed(s) | ImportOutcome::Partial(s) => Some(s),
            ImportOutcome::Failed(_) => None,
        }
    }

    pub fn log(&self) {
        match self {
            ImportOutcome::Completed(s) => info!(
                rows = s.rows_read,
                inserted = s.inserted,
                already_present = s.already_present,
                "Product import completed"
            ),
            ImportOutcome::Partial(s) => warn!(
                rows = s.rows_read,
                inserted = s.inserted,
                already_present = s.already_present,
                skipped = s.skipped_incomplete,
                "Product import completed with incomplete rows skipped"
            ),
            ImportOutcome::Failed(reason) => error!(%reason, "Product import failed; continuing with existing catalog"),
        }
    }
}

/// Reads the first worksheet of `path`.
pub fn read_rows(path: &Path) -> Result<Vec<ImportRow>, ImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheet)??;
    rows_from_range(&range)
}

/// Parses a sheet whose first row holds the column headers.
pub fn rows_from_range(range: &Range<Data>) -> Result<Vec<ImportRow>, ImportError> {
    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows = range.rows();
    let header = rows.next().ok_or(ImportError::MissingColumn(CODE_COLUMN))?;

    let code_idx = column_index(header, CODE_COLUMN)?;
    let name_idx = column_index(header, NAME_COLUMN)?;
    let price_idx = column_index(header, PRICE_COLUMN)?;

    rows.enumerate()
        .map(|(i, row)| -> Result<ImportRow, ImportError> {
            let line = first_line + i + 1;
            Ok(ImportRow {
                line,
                code: row.get(code_idx).and_then(cell_text),
                name: row.get(name_idx).and_then(cell_name),
                price: match row.get(price_idx) {
                    Some(cell) => cell_price(cell, line)?,
                    None => None,
                },
            })
        })
        .collect()
}

fn column_index(header: &[Data], name: &'static str) -> Result<usize, ImportError> {
    header
        .iter()
        .position(|cell| cell_text(cell).as_deref() == Some(name))
        .ok_or(ImportError::MissingColumn(name))
}

/// Text value of a cell, `None` when the cell counts as missing.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Int(i) => Some(i.to_string()),
        // numeric codes come back as floats from most spreadsheets
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some((*f as i64).to_string()),
        other => Some(other.to_string()),
    }
}

/// Display name exactly as written; blank text counts as missing.
fn cell_name(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => cell_text(other),
    }
}

/// Sale price of a row. Present but non-numeric or non-positive prices
/// reject the whole source.
fn cell_price(cell: &Data, line: usize) -> Result<Option<f64>, ImportError> {
    let price = match cell {
        Data::Empty | Data::Error(_) => return Ok(None),
        Data::String(s) if s.trim().is_empty() => return Ok(None),
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match price {
        Some(p) if p.is_finite() && p > 0.0 => Ok(Some(p)),
        _ => Err(ImportError::InvalidPrice { line, value: cell.to_string() }),
    }
}

/// Inserts every complete row whose barcode is not stored yet, in one transaction.
pub async fn import_rows(pool: &SqlitePool, rows: &[ImportRow]) -> Result<ImportSummary, ImportError> {
    let mut summary = ImportSummary {
        rows_read: rows.len(),
        ..ImportSummary::default()
    };

    let mut tx = pool.begin().await?;

    for row in rows {
        let (Some(code), Some(name), Some(price)) = (&row.code, &row.name, row.price) else {
            debug!(line = row.line, "Skipping row with a missing code, name or price");
            summary.skipped_incomplete += 1;
            continue;
        };

        // earlier inserts of this run are visible here, so duplicate codes keep the first row
        if store::products::find_by_barcode(&mut *tx, code).await?.is_some() {
            summary.already_present += 1;
            continue;
        }

        store::products::create(
            &mut *tx,
            &NewProduct {
                barcode: code.clone(),
                name: name.clone(),
                price,
                discount_price: None,
            },
        )
        .await?;
        summary.inserted += 1;
    }

    tx.commit().await?;
    Ok(summary)
}

/// Best-effort import of the spreadsheet at `path`.
#[instrument(skip(pool))]
pub async fn run(pool: &SqlitePool, path: PathBuf) -> ImportOutcome {
    let rows = tokio::task::spawn_blocking(move || read_rows(&path))
        .await
        .unwrap_or_else(|e| Err(ImportError::Task(e.to_string())));

    let result = match rows {
        Ok(rows) => import_rows(pool, &rows).await,
        Err(e) => Err(e),
    };
    ImportOutcome::from_result(result)
}
