//! Quotation assembly: working set, totals and container estimates.

pub mod container;
mod session;
mod totals;

pub use container::{
    containers_required, fill_percentage, units_per_container, ContainerEstimate, ContainerType,
};
pub use session::{merge_selection, QuotationSession, SelectionState};
pub use totals::Totals;
