//! Error types for catalog handling and quotation generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes, reported by the CLI as its exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Catalog or record file missing or unreadable (-1)
    NotFound = -1,
    /// Malformed JSON/CSV input (-3)
    ParseError = -3,
    /// A form gate rejected the input (E100)
    Validation = 100,
    /// Document requested with no line items (E200)
    EmptyQuotation = 200,
    /// Document requested while the selection dialog is open (E201)
    SelectionOpen = 201,
    /// The platform could not open the document for printing (E300)
    PrintFailed = 300,
}

impl ErrorCode {
    /// Process exit status: the code truncated to one byte, never zero.
    pub fn exit_status(self) -> u8 {
        match (self as i32).rem_euclid(256) {
            0 => 1,
            status => status as u8,
        }
    }
}

/// Main error type for the quotation core.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Add at least one product before generating a quotation")]
    EmptyQuotation,

    #[error("Finish or cancel the product selection before generating a quotation")]
    SelectionOpen,

    #[error("Failed to load catalog from {path}: {message}")]
    CatalogUnavailable { path: PathBuf, message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Product code \"{code}\" already exists")]
    DuplicateProductCode { code: String },

    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: String },

    #[error("Invalid value for '{field}': expected {expected}, got '{value}'")]
    InvalidValue {
        field: String,
        expected: String,
        value: String,
    },

    #[error("Failed to open {path} for printing: {message}")]
    PrintUnavailable { path: PathBuf, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuoteError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteError::EmptyQuotation => ErrorCode::EmptyQuotation,
            QuoteError::SelectionOpen => ErrorCode::SelectionOpen,
            QuoteError::CatalogUnavailable { .. } => ErrorCode::NotFound,
            QuoteError::Validation { .. } => ErrorCode::Validation,
            QuoteError::DuplicateProductCode { .. } => ErrorCode::Validation,
            QuoteError::RecordNotFound { .. } => ErrorCode::NotFound,
            QuoteError::InvalidValue { .. } => ErrorCode::ParseError,
            QuoteError::PrintUnavailable { .. } => ErrorCode::PrintFailed,
            QuoteError::Csv(_) => ErrorCode::ParseError,
            QuoteError::Workbook(_) => ErrorCode::ParseError,
            QuoteError::Json(_) => ErrorCode::ParseError,
            QuoteError::Io(_) => ErrorCode::NotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for quotation operations.
pub type Result<T> = std::result::Result<T, QuoteError>;
