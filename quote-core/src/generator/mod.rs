//! Quotation document generation and presentation.

mod html;
mod surface;

pub use html::{escape_html, format_money, generate_quotation_html};
pub use surface::{present, DocumentSurface, FileSurface, MemorySurface};
