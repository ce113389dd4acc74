//! Subcommand handlers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};

use quote_core::catalog::{categories, paginate};
use quote_core::config::{round, PRINT_DELAY};
use quote_core::model::{OrderItem, OrderStatus};
use quote_core::validation::validate_quotation;
use quote_core::{
    assemble_quotation, CatalogFilter, CatalogItem, CatalogReader, ContainerEstimate,
    ContainerType, Currency, Factory, FactoryStore, FileSurface, IssuerConfig, JsonFileCatalog,
    OrderStore, ProductStore, QuotationDetails, QuotationRequest, QuoteError, SalesOrder, Totals,
};

use crate::{OrderArgs, ProductArgs, QuoteArgs};

/// Split an `ID=VALUE` argument. The value is kept raw for coercion later.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Expected ID=VALUE, got '{}'", raw)),
    }
}

/// Parse `CODE=QTY` or `CODE=QTY@PRICE` into an order line.
pub fn parse_order_item(raw: &str) -> Result<OrderItem, String> {
    let (code, rest) = parse_assignment(raw)?;
    let (qty, price) = match rest.split_once('@') {
        Some((qty, price)) => (qty, Some(price)),
        None => (rest.as_str(), None),
    };

    let quantity = qty
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid quantity '{}' for {}", qty, code))?;
    let unit_price = match price {
        Some(p) => p
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid price '{}' for {}", p, code))?,
        None => 0.0,
    };

    Ok(OrderItem {
        product_code: code,
        quantity,
        unit_price,
    })
}

// ==================== catalog ====================

pub fn catalog_list(
    catalog: &Path,
    search: Option<String>,
    category: Option<String>,
    page: usize,
    json: bool,
) -> Result<()> {
    let products = JsonFileCatalog::new(catalog)
        .list_products()
        .with_context(|| format!("Failed to load {}", catalog.display()))?;

    let filter = CatalogFilter::new(search, category);
    let filtered = filter.apply(&products);
    let page = paginate(&filtered, page, quote_core::config::PRODUCTS_PER_PAGE);

    if json {
        let json = serde_json::to_string_pretty(&page.items)?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "{:<10} {:<14} {:<32} {:>18} {:>8} {:>10} {:>4}",
        "ID", "CODE", "DESCRIPTION", "SIZE (H×W×D)", "CBM", "FOB USD", "IMG"
    );
    for item in &page.items {
        println!(
            "{:<10} {:<14} {:<32} {:>18} {:>8} {:>10} {:>4}",
            item.id,
            item.product_code,
            truncate(&item.description, 32),
            item.dimensions_label(),
            round::to_places(item.cbm, 3),
            optional_price(item.fob_price_usd),
            if item.has_images() { "yes" } else { "-" }
        );
    }
    println!(
        "Page {} of {} ({} product(s); categories: {})",
        page.page,
        page.total_pages,
        page.total_items,
        categories(&products).join(", ")
    );

    Ok(())
}

pub fn catalog_show(catalog: &Path, id: &str) -> Result<()> {
    let store = open_products(catalog)?;
    let item = store.get(id).ok_or_else(|| QuoteError::RecordNotFound {
        kind: "Product",
        id: id.to_string(),
    })?;

    println!("{} ({})", item.product_code, item.id);
    println!("  Description:  {}", item.description);
    println!("  Category:     {}", item.category.as_deref().unwrap_or("-"));
    println!("  Size:         {}", item.size.as_deref().unwrap_or("-"));
    println!("  H×W×D (cm):   {}", item.dimensions_label());
    println!("  CBM:          {}", round::to_places(item.cbm, 3));
    println!("  FOB USD:      {}", optional_price(item.fob_price_usd));
    println!("  FOB GBP:      {}", optional_price(item.fob_price_gbp));
    println!("  Warehouse 1:  {}", optional_price(item.warehouse_price_1));
    println!("  Warehouse 2:  {}", optional_price(item.warehouse_price_2));

    let images = item.all_images();
    if images.is_empty() {
        if item.has_images() {
            println!("  Images:       not included in this listing");
        } else {
            println!("  Images:       none");
        }
    } else {
        for (idx, image) in images.iter().enumerate() {
            println!("  Image {}/{}:    {}", idx + 1, images.len(), image);
        }
    }

    Ok(())
}

pub fn catalog_add(catalog: &Path, product: ProductArgs) -> Result<()> {
    let mut store = open_products(catalog)?;
    let mut item = CatalogItem::default();
    apply_product_args(&mut item, product);
    let id = store.create_product(item)?;
    store.save()?;
    info!("Added product {}", id);
    Ok(())
}

pub fn catalog_update(catalog: &Path, id: &str, product: ProductArgs) -> Result<()> {
    let mut store = open_products(catalog)?;
    let mut item = store
        .get(id)
        .cloned()
        .ok_or_else(|| QuoteError::RecordNotFound {
            kind: "Product",
            id: id.to_string(),
        })?;
    apply_product_args(&mut item, product);
    store.update_product(id, item)?;
    store.save()?;
    info!("Updated product {}", id);
    Ok(())
}

pub fn catalog_remove(catalog: &Path, id: &str) -> Result<()> {
    let mut store = open_products(catalog)?;
    let removed = store.remove(id)?;
    store.save()?;
    info!("Removed product {}", removed.product_code);
    Ok(())
}

pub fn catalog_import(catalog: &Path, file: &Path) -> Result<()> {
    let rows = quote_core::parser::read_spreadsheet(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    for row in &rows.skipped_rows {
        warn!("Row {} skipped: no product code", row);
    }

    let mut store = open_products(catalog)?;
    let summary = store.import(rows);
    store
        .save()
        .with_context(|| format!("Failed to write {}", catalog.display()))?;

    println!(
        "{} created, {} updated, {} skipped",
        summary.created, summary.updated, summary.skipped
    );
    Ok(())
}

fn open_products(catalog: &Path) -> Result<ProductStore> {
    ProductStore::open(catalog).with_context(|| format!("Failed to open {}", catalog.display()))
}

/// Copy the given form fields onto a product.
///
/// Changing a dimension without a CBM clears the CBM so it is derived again.
fn apply_product_args(item: &mut CatalogItem, args: ProductArgs) {
    if let Some(code) = args.code {
        item.product_code = code.trim().to_string();
    }
    if let Some(description) = args.description {
        item.description = description;
    }
    if args.category.is_some() {
        item.category = args.category;
    }
    if args.size.is_some() {
        item.size = args.size;
    }

    let dimensions_changed = args.height.is_some() || args.depth.is_some() || args.width.is_some();
    if let Some(height) = args.height {
        item.height_cm = height;
    }
    if let Some(depth) = args.depth {
        item.depth_cm = depth;
    }
    if let Some(width) = args.width {
        item.width_cm = width;
    }
    match args.cbm {
        Some(cbm) => item.cbm = cbm,
        None if dimensions_changed => item.cbm = 0.0,
        None => {}
    }

    if args.fob_usd.is_some() {
        item.fob_price_usd = args.fob_usd;
    }
    if args.fob_gbp.is_some() {
        item.fob_price_gbp = args.fob_gbp;
    }
    if args.warehouse_1.is_some() {
        item.warehouse_price_1 = args.warehouse_1;
    }
    if args.warehouse_2.is_some() {
        item.warehouse_price_2 = args.warehouse_2;
    }

    let mut images = args.images.into_iter();
    if let Some(primary) = images.next() {
        item.image = Some(primary);
        item.images = images.collect();
    }
}

fn optional_price(price: Option<f64>) -> String {
    price
        .map(round::fixed2)
        .unwrap_or_else(|| "-".to_string())
}

// ==================== factory ====================

fn open_factories(store: &Path) -> Result<FactoryStore> {
    FactoryStore::open(store).with_context(|| format!("Failed to open {}", store.display()))
}

pub fn factory_list(store: &Path) -> Result<()> {
    let factories = open_factories(store)?;
    println!("{:<10} {:<8} NAME", "ID", "CODE");
    for factory in factories.list() {
        println!("{:<10} {:<8} {}", factory.id, factory.code, factory.name);
    }
    Ok(())
}

pub fn factory_add(store: &Path, code: String, name: String) -> Result<()> {
    let mut factories = open_factories(store)?;
    let id = factories.create_factory(Factory::new(code, name))?;
    factories.save()?;
    info!("Added factory {}", id);
    Ok(())
}

pub fn factory_update(store: &Path, id: &str, code: String, name: String) -> Result<()> {
    let mut factories = open_factories(store)?;
    factories.update_factory(id, Factory::new(code, name))?;
    factories.save()?;
    info!("Updated factory {}", id);
    Ok(())
}

pub fn factory_remove(store: &Path, id: &str) -> Result<()> {
    let mut factories = open_factories(store)?;
    let removed = factories.remove(id)?;
    factories.save()?;
    info!("Removed factory {}", removed.label());
    Ok(())
}

// ==================== order ====================

fn open_orders(store: &Path) -> Result<OrderStore> {
    OrderStore::open(store).with_context(|| format!("Failed to open {}", store.display()))
}

pub fn order_create(args: OrderArgs) -> Result<()> {
    let status: OrderStatus = args.status.parse().map_err(anyhow::Error::msg)?;

    let factory = match (&args.factory, &args.factories) {
        (Some(code), Some(path)) => {
            let factories = open_factories(path)?;
            match factories.find_by_code(code) {
                Some(f) => f.label(),
                None => bail!("Unknown factory code {} in {}", code, path.display()),
            }
        }
        (Some(code), None) => code.clone(),
        (None, _) => String::new(),
    };

    let mut order = SalesOrder::new(args.sales_order_ref);
    order.buyer_po_ref = args.po;
    order.buyer_name = args.buyer;
    order.status = status;
    order.factory = factory;
    if let Some(date) = args.entry_date {
        order.entry_date = date;
    }
    order.factory_inform_date = args.inform_date.unwrap_or(order.entry_date);
    order.items = args.items;

    let mut orders = open_orders(&args.store)?;
    let id = orders.create_order(order)?;
    orders.save()?;
    info!("Created order {}", id);
    Ok(())
}

pub fn order_list(store: &Path) -> Result<()> {
    let orders = open_orders(store)?;
    println!(
        "{:<9} {:<14} {:<20} {:<14} {:<24} {:>12}",
        "ID", "SO REF", "BUYER", "STATUS", "FACTORY", "VALUE"
    );
    for order in orders.list() {
        println!(
            "{:<9} {:<14} {:<20} {:<14} {:<24} {:>12}",
            order.id,
            order.sales_order_ref,
            truncate(&order.buyer_name, 20),
            order.status,
            truncate(&order.factory, 24),
            round::fixed2(order.total_value())
        );
    }
    Ok(())
}

pub fn order_remove(store: &Path, id: &str) -> Result<()> {
    let mut orders = open_orders(store)?;
    let removed = orders.remove(id)?;
    orders.save()?;
    info!("Removed order {}", removed.sales_order_ref);
    Ok(())
}

// ==================== quote ====================

pub fn quote(args: QuoteArgs) -> Result<()> {
    let issuer = match &args.issuer {
        Some(path) => IssuerConfig::from_file(path)
            .with_context(|| format!("Failed to read issuer config {}", path.display()))?,
        None => IssuerConfig::default(),
    };

    let mut details = QuotationDetails {
        customer_name: args.customer,
        customer_email: args.email,
        reference: args.reference,
        notes: args.notes,
        currency: Currency::from_code(&args.currency),
        ..Default::default()
    };
    if let Some(date) = args.date {
        details.date = date;
    }

    let output = args
        .output
        .unwrap_or_else(|| default_output(&details.reference));

    let request = QuotationRequest {
        selected: args.selected,
        quantities: args.quantities,
        prices: args.prices,
        removals: args.removals,
        details,
    };

    info!("Processing: {}", args.catalog.display());
    let session = assemble_quotation(&JsonFileCatalog::new(&args.catalog), &request);
    if let Some(message) = session.load_error() {
        error!("{}", message);
    }

    // Validate
    let validation = validate_quotation(&session.details, session.items());

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if session.items().is_empty() {
        return Err(QuoteError::EmptyQuotation.into());
    }
    if !validation.passed {
        bail!("Validation failed");
    }

    let totals = session.totals();
    info!(
        "{} line(s), {} pcs, {} m³, {}",
        session.items().len(),
        totals.total_items,
        totals.cbm_display(),
        quote_core::generator::format_money(session.details.currency, totals.total_value)
    );
    for line in container_summary(&totals) {
        info!("{}", line);
    }

    let mut surface = FileSurface::new(&output);
    if args.print {
        session
            .print(&issuer, &mut surface, PRINT_DELAY)
            .with_context(|| format!("Failed to print {}", output.display()))?;
    } else {
        session
            .write_document(&issuer, &mut surface)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    info!("Generated: {}", output.display());

    Ok(())
}

/// Container estimate lines for every standard size. Empty without volume.
fn container_summary(totals: &Totals) -> Vec<String> {
    let Some(estimate) = ContainerEstimate::for_volume(totals.total_cbm) else {
        return Vec::new();
    };

    let mut lines: Vec<String> = ContainerType::all()
        .iter()
        .map(|kind| format!("{}: {}", kind, estimate.count(*kind)))
        .collect();
    lines.push(format!(
        "Load fill: {}% of a {} CBM container",
        round::fixed1(estimate.fill_percentage()),
        quote_core::config::DOCUMENT_LOAD_CBM
    ));
    lines
}

/// `<reference>.html`, or `quotation.html` without a reference.
fn default_output(reference: &str) -> PathBuf {
    let stem: String = reference
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        PathBuf::from("quotation.html")
    } else {
        PathBuf::from(format!("{}.html", stem))
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("PRD-0001=3").unwrap(),
            ("PRD-0001".to_string(), "3".to_string())
        );
        assert_eq!(
            parse_assignment("x= 12.5kg ").unwrap(),
            ("x".to_string(), "12.5kg".to_string())
        );
        assert!(parse_assignment("no-value").is_err());
        assert!(parse_assignment("=5").is_err());
    }

    #[test]
    fn test_parse_order_item() {
        let item = parse_order_item("TBL-001=4@450.5").unwrap();
        assert_eq!(item.product_code, "TBL-001");
        assert_eq!(item.quantity, 4);
        assert_eq!(item.unit_price, 450.5);

        let item = parse_order_item("CHR-010=12").unwrap();
        assert_eq!(item.unit_price, 0.0);

        assert!(parse_order_item("CHR-010=twelve").is_err());
    }

    #[test]
    fn test_default_output() {
        assert_eq!(default_output(""), PathBuf::from("quotation.html"));
        assert_eq!(
            default_output("QT 2024/001"),
            PathBuf::from("QT_2024_001.html")
        );
    }

    #[test]
    fn test_container_summary_lists_every_size() {
        let totals = Totals {
            total_items: 40,
            total_cbm: 60.0,
            total_value: 1000.0,
        };
        assert_eq!(
            container_summary(&totals),
            vec![
                "20' Container (~28 CBM): 3".to_string(),
                "40' Container (~58 CBM): 2".to_string(),
                "40' HQ (~68 CBM): 1".to_string(),
                "Load fill: 78.9% of a 76 CBM container".to_string(),
            ]
        );
        assert!(container_summary(&Totals::default()).is_empty());
    }

    #[test]
    fn test_apply_product_args_partial_update() {
        let mut item = CatalogItem {
            product_code: "TBL-001".into(),
            height_cm: 75.0,
            depth_cm: 90.0,
            width_cm: 180.0,
            cbm: 1.215,
            fob_price_usd: Some(350.0),
            ..Default::default()
        };
        apply_product_args(
            &mut item,
            ProductArgs {
                width: Some(200.0),
                fob_gbp: Some(280.0),
                images: vec!["front.jpg".into(), "side.jpg".into()],
                ..Default::default()
            },
        );
        assert_eq!(item.product_code, "TBL-001");
        assert_eq!(item.width_cm, 200.0);
        assert_eq!(item.cbm, 0.0);
        assert_eq!(item.fob_price_usd, Some(350.0));
        assert_eq!(item.fob_price_gbp, Some(280.0));
        assert_eq!(item.all_images(), vec!["front.jpg", "side.jpg"]);
    }

    #[test]
    fn test_catalog_add_update_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        catalog_add(
            &path,
            ProductArgs {
                code: Some("CHR-010".into()),
                height: Some(100.0),
                depth: Some(50.0),
                width: Some(50.0),
                fob_usd: Some(85.0),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(catalog_add(&path, ProductArgs::default()).is_err());

        catalog_update(
            &path,
            "PRD-0001",
            ProductArgs {
                fob_usd: Some(90.0),
                ..Default::default()
            },
        )
        .unwrap();
        let store = ProductStore::open(&path).unwrap();
        let chair = store.get("PRD-0001").unwrap();
        assert_eq!(chair.cbm, 0.25);
        assert_eq!(chair.fob_price_usd, Some(90.0));

        catalog_remove(&path, "PRD-0001").unwrap();
        assert!(ProductStore::open(&path).unwrap().is_empty());
        assert!(catalog_remove(&path, "PRD-0001").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Table", 10), "Table");
        assert_eq!(truncate("Extending dining table", 10), "Extending…");
    }
}
