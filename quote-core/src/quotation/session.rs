//! Quotation working set and selection state machine.
//!
//! A session owns the loaded catalog, the line items and the header details
//! for one quotation. The selection dialog is modelled as [`SelectionState`]:
//! `Idle -> Selecting -> Idle`, either by cancel (candidates discarded) or
//! confirm (candidates merged).

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::IssuerConfig;
use crate::error::{QuoteError, Result};
use crate::generator::{self, DocumentSurface};
use crate::model::{CatalogItem, QuotationDetails, QuotationLineItem};
use crate::parser::{coerce_price, coerce_quantity};

use super::totals::Totals;

/// Selection dialog state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No dialog open.
    #[default]
    Idle,
    /// Dialog open; candidate ids in toggle order.
    Selecting { candidates: Vec<String> },
}

/// Merge selected catalog ids into an existing line list.
///
/// Existing lines keep their order and values. Ids already present, repeated
/// in `selected`, or missing from the catalog are skipped.
pub fn merge_selection(
    existing: &[QuotationLineItem],
    selected: &[String],
    catalog: &[CatalogItem],
) -> Vec<QuotationLineItem> {
    let mut merged = existing.to_vec();

    for id in selected {
        if merged.iter().any(|line| &line.id == id) {
            continue;
        }
        match catalog.iter().find(|item| &item.id == id) {
            Some(item) => merged.push(QuotationLineItem::from_catalog(item)),
            None => debug!("Selected id {} not in catalog, skipped", id),
        }
    }

    merged
}

/// One quotation being assembled.
#[derive(Debug, Clone, Default)]
pub struct QuotationSession {
    catalog: Vec<CatalogItem>,
    items: Vec<QuotationLineItem>,
    pub details: QuotationDetails,
    state: SelectionState,
    load_error: Option<String>,
}

impl QuotationSession {
    /// Start a session over an already loaded catalog.
    pub fn new(catalog: Vec<CatalogItem>) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    /// Start a session from a catalog load result.
    ///
    /// A failed load leaves the catalog empty; the session stays usable and the
    /// message is kept for display.
    pub fn from_load(result: Result<Vec<CatalogItem>>) -> Self {
        match result {
            Ok(catalog) => Self::new(catalog),
            Err(e) => {
                error!("Failed to load products: {}", e);
                Self {
                    load_error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        }
    }

    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    pub fn items(&self) -> &[QuotationLineItem] {
        &self.items
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Message from a failed catalog load, if any.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    /// Candidate ids while the dialog is open.
    pub fn candidates(&self) -> &[String] {
        match &self.state {
            SelectionState::Selecting { candidates } => candidates,
            SelectionState::Idle => &[],
        }
    }

    // === Selection dialog ===

    /// Open the selection dialog with an empty candidate set.
    ///
    /// Re-uses the loaded catalog; nothing is re-fetched.
    pub fn open_selection(&mut self) {
        self.state = SelectionState::Selecting {
            candidates: Vec::new(),
        };
    }

    /// Toggle a candidate id. Ignored when the dialog is closed.
    pub fn toggle_candidate(&mut self, id: &str) {
        let SelectionState::Selecting { candidates } = &mut self.state else {
            warn!("Toggle of {} ignored: selection dialog is not open", id);
            return;
        };
        if let Some(pos) = candidates.iter().position(|c| c == id) {
            candidates.remove(pos);
        } else {
            candidates.push(id.to_string());
        }
    }

    /// Close the dialog, discarding candidates.
    pub fn cancel_selection(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Merge candidates into the line items and close the dialog.
    ///
    /// Returns the number of lines added. Confirming with nothing selected is
    /// a no-op that still closes the dialog.
    pub fn confirm_selection(&mut self) -> usize {
        let candidates = match std::mem::take(&mut self.state) {
            SelectionState::Selecting { candidates } => candidates,
            SelectionState::Idle => Vec::new(),
        };

        let before = self.items.len();
        self.items = merge_selection(&self.items, &candidates, &self.catalog);
        let added = self.items.len() - before;

        info!("Added {} item(s) to quotation", added);
        added
    }

    // === Line edits ===

    /// Set a line's quantity from raw input. Returns whether a line matched.
    pub fn update_quantity(&mut self, id: &str, raw: &str) -> bool {
        match self.line_mut(id) {
            Some(line) => {
                line.set_quantity(coerce_quantity(raw));
                debug!("{}: quantity -> {}", id, line.quantity());
                true
            }
            None => false,
        }
    }

    /// Set a line's unit price from raw input. Returns whether a line matched.
    pub fn update_price(&mut self, id: &str, raw: &str) -> bool {
        match self.line_mut(id) {
            Some(line) => {
                line.set_unit_price(coerce_price(raw));
                debug!("{}: unit price -> {}", id, line.unit_price());
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns whether a line matched.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        before != self.items.len()
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut QuotationLineItem> {
        self.items.iter_mut().find(|line| line.id == id)
    }

    // === Output ===

    /// Totals over the current line items.
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.items)
    }

    /// Build the printable document.
    ///
    /// Fails when the selection dialog is open or there are no line items.
    pub fn render_document(&self, issuer: &IssuerConfig) -> Result<String> {
        if self.is_selecting() {
            return Err(QuoteError::SelectionOpen);
        }
        generator::generate_quotation_html(&self.details, &self.items, &self.totals(), issuer)
    }

    /// Render the document onto a surface without printing it.
    pub fn write_document<S: DocumentSurface>(
        &self,
        issuer: &IssuerConfig,
        surface: &mut S,
    ) -> Result<()> {
        let document = self.render_document(issuer)?;
        surface.open(&document)
    }

    /// Render the document, hand it to a surface, and request printing.
    pub fn print<S: DocumentSurface>(
        &self,
        issuer: &IssuerConfig,
        surface: &mut S,
        delay: Duration,
    ) -> Result<()> {
        let document = self.render_document(issuer)?;
        generator::present(&document, surface, delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MemorySurface;
    use crate::model::Currency;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem {
                id: "x".into(),
                product_code: "TBL-001".into(),
                description: "Dining table".into(),
                cbm: 0.5,
                fob_price_usd: Some(100.0),
                ..Default::default()
            },
            CatalogItem {
                id: "y".into(),
                product_code: "CHR-010".into(),
                description: "Dining chair".into(),
                cbm: 0.25,
                fob_price_usd: None,
                ..Default::default()
            },
        ]
    }

    fn select(session: &mut QuotationSession, ids: &[&str]) -> usize {
        session.open_selection();
        for id in ids {
            session.toggle_candidate(id);
        }
        session.confirm_selection()
    }

    // ==================== merge_selection tests ====================

    #[test]
    fn test_merge_skips_existing_and_repeats() {
        let catalog = catalog();
        let first = merge_selection(&[], &["x".into()], &catalog);
        let merged = merge_selection(
            &first,
            &["x".into(), "y".into(), "y".into(), "zz".into()],
            &catalog,
        );
        let ids: Vec<_> = merged.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_merge_preserves_existing_values() {
        let catalog = catalog();
        let mut existing = merge_selection(&[], &["x".into()], &catalog);
        existing[0].set_quantity(5);
        let merged = merge_selection(&existing, &["x".into(), "y".into()], &catalog);
        assert_eq!(merged[0].quantity(), 5);
        assert_eq!(merged[1].quantity(), 1);
        assert_eq!(merged[1].unit_price(), 0.0);
    }

    #[test]
    fn test_merge_never_duplicates_across_rounds() {
        let catalog = catalog();
        let rounds: [&[&str]; 4] = [&["x"], &["y", "x"], &["x", "x", "y"], &[]];
        let mut items = Vec::new();
        for round in rounds {
            let selected: Vec<String> = round.iter().map(|s| s.to_string()).collect();
            items = merge_selection(&items, &selected, &catalog);
            let mut ids: Vec<_> = items.iter().map(|l| l.id.clone()).collect();
            let len = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), len);
        }
        assert_eq!(items.len(), 2);
    }

    // ==================== state machine tests ====================

    #[test]
    fn test_open_toggle_confirm() {
        let mut session = QuotationSession::new(catalog());
        session.open_selection();
        assert!(session.is_selecting());
        session.toggle_candidate("x");
        session.toggle_candidate("y");
        session.toggle_candidate("y");
        assert_eq!(session.candidates(), &["x".to_string()]);

        assert_eq!(session.confirm_selection(), 1);
        assert_eq!(session.state(), &SelectionState::Idle);
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn test_cancel_discards_candidates() {
        let mut session = QuotationSession::new(catalog());
        session.open_selection();
        session.toggle_candidate("x");
        session.cancel_selection();
        assert!(!session.is_selecting());
        assert!(session.items().is_empty());

        session.open_selection();
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn test_confirm_empty_selection_closes_dialog() {
        let mut session = QuotationSession::new(catalog());
        assert_eq!(select(&mut session, &[]), 0);
        assert!(!session.is_selecting());
    }

    #[test]
    fn test_toggle_ignored_when_idle() {
        let mut session = QuotationSession::new(catalog());
        session.toggle_candidate("x");
        assert_eq!(session.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_failed_load_leaves_empty_usable_session() {
        let mut session = QuotationSession::from_load(Err(QuoteError::CatalogUnavailable {
            path: "products.json".into(),
            message: "connection refused".into(),
        }));
        assert!(session.load_error().unwrap().contains("connection refused"));
        assert_eq!(select(&mut session, &["x"]), 0);
        assert!(session.items().is_empty());
    }

    // ==================== line edit tests ====================

    #[test]
    fn test_update_quantity_coerces() {
        let mut session = QuotationSession::new(catalog());
        select(&mut session, &["x"]);

        assert!(session.update_quantity("x", "3"));
        assert_eq!(session.items()[0].total(), 300.0);

        for raw in ["abc", "0", "-2", ""] {
            session.update_quantity("x", raw);
            assert_eq!(session.items()[0].quantity(), 1);
            assert_eq!(session.items()[0].total(), 100.0);
        }
    }

    #[test]
    fn test_update_price_coerces() {
        let mut session = QuotationSession::new(catalog());
        select(&mut session, &["x"]);
        session.update_quantity("x", "4");

        assert!(session.update_price("x", "12.5"));
        assert_eq!(session.items()[0].total(), 50.0);

        for raw in ["n/a", "-10", ""] {
            session.update_price("x", raw);
            assert_eq!(session.items()[0].unit_price(), 0.0);
            assert_eq!(session.items()[0].total(), 0.0);
        }
    }

    #[test]
    fn test_edits_on_unknown_id_are_noops() {
        let mut session = QuotationSession::new(catalog());
        select(&mut session, &["x"]);
        let before = session.items().to_vec();
        assert!(!session.update_quantity("nope", "9"));
        assert!(!session.update_price("nope", "9"));
        assert!(!session.remove_item("nope"));
        assert_eq!(session.items(), before.as_slice());
    }

    #[test]
    fn test_remove_item() {
        let mut session = QuotationSession::new(catalog());
        select(&mut session, &["x", "y"]);
        assert!(session.remove_item("x"));
        assert_eq!(session.items().len(), 1);
        assert_eq!(session.items()[0].id, "y");
    }

    // ==================== document tests ====================

    #[test]
    fn test_render_refused_when_empty() {
        let session = QuotationSession::new(catalog());
        let err = session.render_document(&IssuerConfig::default()).unwrap_err();
        assert!(matches!(err, QuoteError::EmptyQuotation));
    }

    #[test]
    fn test_render_refused_while_selecting() {
        let mut session = QuotationSession::new(catalog());
        select(&mut session, &["x"]);
        session.open_selection();
        let err = session.render_document(&IssuerConfig::default()).unwrap_err();
        assert!(matches!(err, QuoteError::SelectionOpen));
    }

    #[test]
    fn test_print_empty_opens_no_surface() {
        let session = QuotationSession::new(catalog());
        let mut surface = MemorySurface::default();
        let result = session.print(&IssuerConfig::default(), &mut surface, Duration::ZERO);
        assert!(result.is_err());
        assert!(surface.document.is_none());
        assert!(!surface.printed);
    }

    #[test]
    fn test_write_document_does_not_print() {
        let mut session = QuotationSession::new(catalog());
        select(&mut session, &["x"]);
        let mut surface = MemorySurface::default();
        session
            .write_document(&IssuerConfig::default(), &mut surface)
            .unwrap();
        assert!(surface.document.is_some());
        assert!(!surface.printed);
    }

    #[test]
    fn test_print_uses_selected_currency() {
        let mut session = QuotationSession::new(catalog());
        select(&mut session, &["x"]);
        session.details.currency = Currency::Gbp;
        let mut surface = MemorySurface::default();
        session
            .print(&IssuerConfig::default(), &mut surface, Duration::ZERO)
            .unwrap();
        assert!(surface.printed);
        assert!(surface.document.unwrap().contains("£100.00"));
    }
}
