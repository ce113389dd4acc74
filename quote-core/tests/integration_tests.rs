//! Integration tests for the quotation pipeline.
//!
//! These tests drive the public API end to end: catalog files on disk, the
//! selection flow, line edits, and the rendered document. They check the
//! document by the figures and blocks it contains rather than its exact
//! markup.

use std::time::Duration;

use pretty_assertions::assert_eq;
use quote_core::parser::parse_spreadsheet;
use quote_core::validation::validate_quotation;
use quote_core::{
    assemble_quotation, build_quotation, CatalogItem, CatalogReader, Currency, FileSurface,
    IssuerConfig, JsonFileCatalog, MemoryCatalog, MemorySurface, ProductStore, QuotationRequest,
    QuotationSession, QuoteError,
};

// ==================== Fixtures ====================

fn product(id: &str, code: &str, cbm: f64, price: Option<f64>) -> CatalogItem {
    CatalogItem {
        id: id.into(),
        product_code: code.into(),
        description: format!("{} description", code),
        height_cm: 75.0,
        width_cm: 180.0,
        depth_cm: 90.0,
        cbm,
        fob_price_usd: price,
        ..Default::default()
    }
}

fn catalog() -> MemoryCatalog {
    MemoryCatalog::new(vec![
        product("x", "TBL-001", 0.5, Some(100.0)),
        product("y", "CHR-010", 0.25, Some(40.0)),
        product("z", "LMP-003", 0.0, None),
    ])
}

fn request(selected: &[&str]) -> QuotationRequest {
    QuotationRequest {
        selected: selected.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

// ==================== Quotation scenarios ====================

#[test]
fn test_single_line_totals() {
    let mut req = request(&["x"]);
    req.quantities.push(("x".into(), "3".into()));

    let session = assemble_quotation(&catalog(), &req);
    let totals = session.totals();
    assert_eq!(totals.total_items, 3);
    assert_eq!(totals.cbm_display(), "1.50");
    assert_eq!(totals.value_display(), "300.00");

    let html = session.render_document(&IssuerConfig::default()).unwrap();
    assert!(html.contains("3 pcs"));
    assert!(html.contains("1.50 m³"));
    assert!(html.contains("$300.00"));
}

#[test]
fn test_empty_quotation_never_reaches_surface() {
    let session = assemble_quotation(&catalog(), &request(&[]));
    let mut surface = MemorySurface::default();

    let err = session
        .print(&IssuerConfig::default(), &mut surface, Duration::ZERO)
        .unwrap_err();
    assert!(matches!(err, QuoteError::EmptyQuotation));
    assert!(surface.document.is_none());
    assert!(!surface.printed);
}

#[test]
fn test_zero_volume_omits_containers() {
    let html = build_quotation(&catalog(), &request(&["z"]), &IssuerConfig::default()).unwrap();
    assert!(!html.contains("Container Estimate"));
    assert!(html.contains("<td class=\"center\">-</td>"));
}

#[test]
fn test_containers_block_for_volume() {
    let mut req = request(&["x"]);
    req.quantities.push(("x".into(), "200".into()));

    let html = build_quotation(&catalog(), &req, &IssuerConfig::default()).unwrap();
    // 100 m³ needs two 68 m³ high cubes.
    assert!(html.contains("Container Estimate"));
    assert!(html.contains("required: <strong>2</strong>"));
    assert!(html.contains("<strong>131.6%</strong>"));
}

#[test]
fn test_currency_symbols() {
    for (code, symbol) in [("USD", "$"), ("GBP", "£"), ("EUR", "€"), ("JPY", "€")] {
        let mut req = request(&["x"]);
        req.details.currency = Currency::from_code(code);
        let html = build_quotation(&catalog(), &req, &IssuerConfig::default()).unwrap();
        assert!(
            html.contains(&format!("{}100.00", symbol)),
            "{} should render with {}",
            code,
            symbol
        );
    }
}

#[test]
fn test_edits_then_removal() {
    let mut req = request(&["x", "y", "z"]);
    req.quantities.push(("y".into(), "abc".into()));
    req.prices.push(("y".into(), "-5".into()));
    req.prices.push(("x".into(), "12.5kg".into()));
    req.removals.push("z".into());
    req.removals.push("missing".into());

    let session = assemble_quotation(&catalog(), &req);
    let lines = session.items();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].unit_price(), 12.5);
    assert_eq!(lines[1].quantity(), 1);
    assert_eq!(lines[1].unit_price(), 0.0);
}

#[test]
fn test_repeat_selection_keeps_edits() {
    let mut session = QuotationSession::from_load(catalog().list_products());
    session.open_selection();
    session.toggle_candidate("x");
    session.confirm_selection();
    session.update_quantity("x", "4");

    session.open_selection();
    session.toggle_candidate("x");
    session.toggle_candidate("y");
    assert_eq!(session.confirm_selection(), 1);

    assert_eq!(session.items().len(), 2);
    assert_eq!(session.items()[0].quantity(), 4);
}

#[test]
fn test_validation_warnings_before_print() {
    let session = assemble_quotation(&catalog(), &request(&["z"]));
    let result = validate_quotation(&session.details, session.items());
    assert!(result.passed);
    assert_eq!(result.warnings.len(), 3);
}

// ==================== File-backed flows ====================

#[test]
fn test_json_catalog_to_file_surface() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("products.json");
    std::fs::write(
        &catalog_path,
        r#"[
            {"id": "p1", "product_code": "TBL-001", "description": "Dining <table>",
             "height_cm": "75", "width_cm": 180, "depth_cm": 90, "cbm": "1.2",
             "fob_price_usd": "450", "fob_price_gbp": null}
        ]"#,
    )
    .unwrap();

    let mut req = request(&["p1"]);
    req.details.customer_name = "Harbour Interiors".into();
    req.details.reference = "Q-2024-017".into();

    let session = assemble_quotation(&JsonFileCatalog::new(&catalog_path), &req);
    assert!(session.load_error().is_none());

    let out = dir.path().join("quote.html");
    let mut surface = FileSurface::new(&out);
    session
        .write_document(&IssuerConfig::default(), &mut surface)
        .unwrap();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Harbour Interiors"));
    assert!(html.contains("Q-2024-017"));
    assert!(html.contains("Dining &lt;table&gt;"));
    assert!(html.contains("$450.00"));
    // floor(76 / 1.2)
    assert!(html.contains("<td class=\"center\">63</td>"));
}

#[test]
fn test_missing_catalog_leaves_usable_session() {
    let dir = tempfile::tempdir().unwrap();
    let reader = JsonFileCatalog::new(dir.path().join("absent.json"));

    let session = assemble_quotation(&reader, &request(&["x"]));
    assert!(session.load_error().is_some());
    assert!(session.catalog().is_empty());
    assert!(session.items().is_empty());
    assert!(!session.is_selecting());
}

#[test]
fn test_spreadsheet_import_feeds_quotation() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "\
Product Code,Description,Height,Width,Depth,CBM,FOB USD
TBL-001,Dining table,75,180,90,,\"$1,250.00\"
,Orphan row,1,1,1,,
CHR-010,Dining chair,100,50,50,0.3,85
";

    let rows = parse_spreadsheet(csv.as_bytes()).unwrap();
    let mut store = ProductStore::open(dir.path().join("products.json")).unwrap();
    let summary = store.import(rows);
    assert_eq!(summary.created, 2);
    assert_eq!(summary.skipped, 1);
    store.save().unwrap();

    let reopened = ProductStore::open(dir.path().join("products.json")).unwrap();
    let table = reopened.find_by_code("tbl-001").unwrap();
    assert_eq!(table.cbm, 1.215);
    assert_eq!(table.fob_price_usd, Some(1250.0));

    let html = build_quotation(
        &reopened,
        &request(&[table.id.as_str()]),
        &IssuerConfig::default(),
    )
    .unwrap();
    assert!(html.contains("$1250.00"));
}
