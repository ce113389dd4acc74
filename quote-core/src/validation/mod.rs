//! Input validation gates.

mod validate;

pub use validate::{
    validate_factory, validate_order, validate_product, validate_quotation, ValidationResult,
};
