//! Input parsers: user-entered numbers and spreadsheet imports.

pub mod input;
mod spreadsheet;

pub use input::{coerce_price, coerce_quantity};
pub use spreadsheet::{parse_spreadsheet, parse_workbook, read_spreadsheet, SpreadsheetRows};
