//! Spreadsheet parser for bulk catalog import (Excel workbooks and CSV exports).

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use tracing::{debug, warn};

use crate::error::{QuoteError, Result};
use crate::model::{compute_cbm, CatalogItem};

/// Catalog columns recognised in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Code,
    Description,
    Category,
    Size,
    Height,
    Depth,
    Width,
    Cbm,
    FobUsd,
    FobGbp,
    Warehouse1,
    Warehouse2,
}

impl Column {
    /// Match a header cell, ignoring case, spacing and punctuation.
    fn from_header(header: &str) -> Option<Self> {
        let key: String = header
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "code" | "productcode" | "itemcode" | "sku" => Some(Column::Code),
            "description" | "desc" => Some(Column::Description),
            "category" => Some(Column::Category),
            "size" => Some(Column::Size),
            "height" | "heightcm" | "h" => Some(Column::Height),
            "depth" | "depthcm" | "d" => Some(Column::Depth),
            "width" | "widthcm" | "w" => Some(Column::Width),
            "cbm" | "volume" => Some(Column::Cbm),
            "fob" | "fobusd" | "fobprice" | "fobpriceusd" | "price" | "priceusd" => {
                Some(Column::FobUsd)
            }
            "fobgbp" | "fobpricegbp" | "pricegbp" => Some(Column::FobGbp),
            "warehouse1" | "warehouseprice1" => Some(Column::Warehouse1),
            "warehouse2" | "warehouseprice2" => Some(Column::Warehouse2),
            _ => None,
        }
    }
}

/// Parsed spreadsheet rows plus rows that could not be used.
#[derive(Debug, Default)]
pub struct SpreadsheetRows {
    /// Items ready for upsert (ids are left empty).
    pub items: Vec<CatalogItem>,
    /// 1-based data row numbers skipped for a missing product code.
    pub skipped_rows: Vec<usize>,
}

/// Read a spreadsheet file, choosing the format by extension.
///
/// `.xlsx` and `.xls` workbooks use the first sheet; `.csv` exports are read
/// as text.
pub fn read_spreadsheet(path: &Path) -> Result<SpreadsheetRows> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xls" => parse_workbook(path),
        "csv" => parse_spreadsheet(std::fs::File::open(path)?),
        _ => Err(QuoteError::InvalidValue {
            field: "spreadsheet".to_string(),
            expected: ".xlsx, .xls or .csv".to_string(),
            value: path.display().to_string(),
        }),
    }
}

/// Parse the first sheet of an Excel workbook into catalog items.
pub fn parse_workbook(path: &Path) -> Result<SpreadsheetRows> {
    let mut workbook = open_workbook_auto(path)?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(SpreadsheetRows::default());
    };
    let range = workbook.worksheet_range(&sheet_name)?;
    debug!("Reading sheet '{}' from {}", sheet_name, path.display());

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()));

    let Some(headers) = rows.next() else {
        return Ok(SpreadsheetRows::default());
    };
    let headers: Vec<String> = headers.collect();

    Ok(map_rows(&headers, rows.map(|row| row.collect::<Vec<_>>())))
}

/// Parse a CSV spreadsheet export into catalog items.
///
/// Blank CBM cells are derived from the dimensions.
pub fn parse_spreadsheet<R: Read>(reader: R) -> Result<SpreadsheetRows> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
    let records = csv_reader
        .records()
        .map(|record| record.map(|r| r.iter().map(String::from).collect::<Vec<_>>()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(map_rows(&headers, records))
}

/// Map header-labelled rows onto catalog items.
fn map_rows<I>(headers: &[String], records: I) -> SpreadsheetRows
where
    I: IntoIterator<Item = Vec<String>>,
{
    let columns: Vec<Option<Column>> = headers.iter().map(|h| Column::from_header(h)).collect();

    debug!(
        "Recognised {} of {} spreadsheet columns",
        columns.iter().filter(|c| c.is_some()).count(),
        columns.len()
    );

    let mut rows = SpreadsheetRows::default();

    for (idx, record) in records.into_iter().enumerate() {
        let row_num = idx + 1;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let mut item = CatalogItem::default();
        let mut cbm_given = false;

        for (cell, column) in record.iter().zip(columns.iter()) {
            let Some(column) = column else { continue };
            if cell.is_empty() {
                continue;
            }
            match column {
                Column::Code => item.product_code = cell.to_string(),
                Column::Description => item.description = cell.to_string(),
                Column::Category => item.category = Some(cell.to_string()),
                Column::Size => item.size = Some(cell.to_string()),
                Column::Height => item.height_cm = parse_number(cell).unwrap_or(0.0),
                Column::Depth => item.depth_cm = parse_number(cell).unwrap_or(0.0),
                Column::Width => item.width_cm = parse_number(cell).unwrap_or(0.0),
                Column::Cbm => {
                    if let Some(cbm) = parse_number(cell) {
                        item.cbm = cbm;
                        cbm_given = true;
                    }
                }
                Column::FobUsd => item.fob_price_usd = parse_number(cell),
                Column::FobGbp => item.fob_price_gbp = parse_number(cell),
                Column::Warehouse1 => item.warehouse_price_1 = parse_number(cell),
                Column::Warehouse2 => item.warehouse_price_2 = parse_number(cell),
            }
        }

        if item.product_code.is_empty() {
            warn!("Row {}: no product code, skipped", row_num);
            rows.skipped_rows.push(row_num);
            continue;
        }

        if !cbm_given {
            if let Some(cbm) = compute_cbm(item.height_cm, item.depth_cm, item.width_cm) {
                item.cbm = cbm;
            }
        }

        rows.items.push(item);
    }

    rows
}

/// Parse a numeric cell, tolerating currency symbols and thousands separators.
///
/// Placeholders such as `-` or `N/A` are `None`.
fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E'))
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
}
