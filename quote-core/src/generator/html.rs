//! Printable HTML quotation document.

use std::fmt::Write;

use crate::config::{round, IssuerConfig, DOCUMENT_LOAD_CBM};
use crate::error::{QuoteError, Result};
use crate::model::{Currency, QuotationDetails, QuotationLineItem};
use crate::quotation::{
    containers_required, fill_percentage, units_per_container, ContainerType, Totals,
};

/// Embedded stylesheet; the document loads no external resources.
const STYLE: &str = "\
* { box-sizing: border-box; }
body { font-family: Georgia, 'Times New Roman', serif; color: #2b2b2b; margin: 32px; font-size: 13px; }
.header { display: flex; justify-content: space-between; border-bottom: 3px solid #5c4033; padding-bottom: 16px; margin-bottom: 24px; }
.brand h1 { margin: 0; font-size: 26px; color: #5c4033; letter-spacing: 1px; }
.brand p { margin: 2px 0; color: #6b6b6b; }
.meta { text-align: right; }
.meta h2 { margin: 0 0 8px; font-size: 22px; letter-spacing: 3px; }
.meta p { margin: 2px 0; }
.customer { background: #f7f3ef; padding: 12px 16px; margin-bottom: 24px; border-left: 4px solid #5c4033; }
.customer h3, .containers h3, .notes h3 { margin: 0 0 6px; font-size: 14px; text-transform: uppercase; color: #5c4033; }
table.items { width: 100%; border-collapse: collapse; margin-bottom: 24px; }
table.items th { background: #5c4033; color: #fff; padding: 8px 6px; text-align: left; font-weight: normal; }
table.items td { padding: 7px 6px; border-bottom: 1px solid #e4ddd5; }
table.items td.num, table.items th.num { text-align: right; }
table.items td.center, table.items th.center { text-align: center; }
table.items td.code { font-family: 'Courier New', monospace; }
.totals { display: flex; justify-content: flex-end; gap: 40px; padding: 12px 16px; background: #f7f3ef; margin-bottom: 24px; }
.totals .label { color: #6b6b6b; font-size: 11px; text-transform: uppercase; }
.totals .value { font-size: 18px; font-weight: bold; }
.totals .grand { color: #5c4033; font-size: 22px; }
.containers, .notes { margin-bottom: 24px; padding: 12px 16px; border: 1px solid #e4ddd5; }
.notes p { white-space: pre-wrap; margin: 0; }
.footer { border-top: 1px solid #e4ddd5; padding-top: 12px; color: #8a8a8a; font-size: 11px; text-align: center; }
@media print { body { margin: 12mm; } .header, table.items th { -webkit-print-color-adjust: exact; print-color-adjust: exact; } }
";

/// Escape text for HTML element and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a monetary amount with the currency symbol and two decimals.
pub fn format_money(currency: Currency, amount: f64) -> String {
    format!("{}{}", currency.symbol(), round::fixed2(amount))
}

/// Generate a standalone printable quotation.
///
/// Refuses to build a document without line items.
pub fn generate_quotation_html(
    details: &QuotationDetails,
    items: &[QuotationLineItem],
    totals: &Totals,
    issuer: &IssuerConfig,
) -> Result<String> {
    if items.is_empty() {
        return Err(QuoteError::EmptyQuotation);
    }

    let mut output = String::new();

    writeln!(output, "<!DOCTYPE html>").unwrap();
    writeln!(output, "<html lang=\"en\">").unwrap();
    generate_head(&mut output, details);
    writeln!(output, "<body>").unwrap();

    generate_header(&mut output, details, issuer);
    if details.has_customer() {
        generate_customer(&mut output, details);
    }
    generate_items_table(&mut output, details.currency, items);
    generate_totals(&mut output, details.currency, totals);
    if totals.total_cbm > 0.0 {
        generate_containers(&mut output, totals);
    }
    if details.has_notes() {
        generate_notes(&mut output, details);
    }
    generate_footer(&mut output, issuer);

    writeln!(output, "</body>").unwrap();
    writeln!(output, "</html>").unwrap();

    tracing::info!(
        "Generated quotation document: {} line(s), {} {}",
        items.len(),
        details.currency,
        totals.value_display()
    );

    Ok(output)
}

fn generate_head(output: &mut String, details: &QuotationDetails) {
    writeln!(output, "<head>").unwrap();
    writeln!(output, "<meta charset=\"utf-8\">").unwrap();
    if details.reference.trim().is_empty() {
        writeln!(output, "<title>Quotation</title>").unwrap();
    } else {
        writeln!(
            output,
            "<title>Quotation {}</title>",
            escape_html(&details.reference)
        )
        .unwrap();
    }
    writeln!(output, "<style>\n{}</style>", STYLE).unwrap();
    writeln!(output, "</head>").unwrap();
}

fn generate_header(output: &mut String, details: &QuotationDetails, issuer: &IssuerConfig) {
    writeln!(output, "<div class=\"header\">").unwrap();

    writeln!(output, "<div class=\"brand\">").unwrap();
    writeln!(output, "<h1>{}</h1>", escape_html(&issuer.company_name)).unwrap();
    for line in [&issuer.tagline, &issuer.address, &issuer.email, &issuer.phone] {
        if !line.trim().is_empty() {
            writeln!(output, "<p>{}</p>", escape_html(line)).unwrap();
        }
    }
    writeln!(output, "</div>").unwrap();

    let reference = if details.reference.trim().is_empty() {
        "-".to_string()
    } else {
        escape_html(&details.reference)
    };

    writeln!(output, "<div class=\"meta\">").unwrap();
    writeln!(output, "<h2>QUOTATION</h2>").unwrap();
    writeln!(output, "<p><strong>Reference:</strong> {}</p>", reference).unwrap();
    writeln!(
        output,
        "<p><strong>Date:</strong> {}</p>",
        details.date.format("%Y-%m-%d")
    )
    .unwrap();
    writeln!(
        output,
        "<p><strong>Currency:</strong> {} ({})</p>",
        details.currency,
        details.currency.symbol()
    )
    .unwrap();
    writeln!(output, "</div>").unwrap();

    writeln!(output, "</div>").unwrap();
}

fn generate_customer(output: &mut String, details: &QuotationDetails) {
    writeln!(output, "<div class=\"customer\">").unwrap();
    writeln!(output, "<h3>Prepared for</h3>").unwrap();
    writeln!(
        output,
        "<p><strong>{}</strong></p>",
        escape_html(&details.customer_name)
    )
    .unwrap();
    if !details.customer_email.trim().is_empty() {
        writeln!(output, "<p>{}</p>", escape_html(&details.customer_email)).unwrap();
    }
    writeln!(output, "</div>").unwrap();
}

fn generate_items_table(output: &mut String, currency: Currency, items: &[QuotationLineItem]) {
    writeln!(output, "<table class=\"items\">").unwrap();
    writeln!(output, "<thead><tr>").unwrap();
    writeln!(output, "<th>Item Code</th>").unwrap();
    writeln!(output, "<th>Description</th>").unwrap();
    writeln!(output, "<th class=\"center\">Size H×W×D (cm)</th>").unwrap();
    writeln!(output, "<th class=\"center\">CBM</th>").unwrap();
    writeln!(
        output,
        "<th class=\"center\">Pcs / {} CBM</th>",
        DOCUMENT_LOAD_CBM
    )
    .unwrap();
    writeln!(output, "<th class=\"center\">Qty</th>").unwrap();
    writeln!(output, "<th class=\"num\">FOB {}</th>", currency).unwrap();
    writeln!(output, "<th class=\"num\">Total</th>").unwrap();
    writeln!(output, "</tr></thead>").unwrap();

    writeln!(output, "<tbody>").unwrap();
    for item in items {
        let load = units_per_container(item.cbm)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());

        writeln!(output, "<tr>").unwrap();
        writeln!(
            output,
            "<td class=\"code\">{}</td>",
            escape_html(&item.product_code)
        )
        .unwrap();
        writeln!(output, "<td>{}</td>", escape_html(&item.description)).unwrap();
        writeln!(
            output,
            "<td class=\"center\">{}</td>",
            escape_html(&item.dimensions_label())
        )
        .unwrap();
        writeln!(
            output,
            "<td class=\"center\">{}</td>",
            round::to_places(item.cbm, 3)
        )
        .unwrap();
        writeln!(output, "<td class=\"center\">{}</td>", load).unwrap();
        writeln!(output, "<td class=\"center\">{}</td>", item.quantity()).unwrap();
        writeln!(
            output,
            "<td class=\"num\">{}</td>",
            format_money(currency, item.unit_price())
        )
        .unwrap();
        writeln!(
            output,
            "<td class=\"num\">{}</td>",
            format_money(currency, item.total())
        )
        .unwrap();
        writeln!(output, "</tr>").unwrap();
    }
    writeln!(output, "</tbody>").unwrap();
    writeln!(output, "</table>").unwrap();
}

fn generate_totals(output: &mut String, currency: Currency, totals: &Totals) {
    writeln!(output, "<div class=\"totals\">").unwrap();
    writeln!(
        output,
        "<div><div class=\"label\">Total Items</div><div class=\"value\">{} pcs</div></div>",
        totals.total_items
    )
    .unwrap();
    writeln!(
        output,
        "<div><div class=\"label\">Total CBM</div><div class=\"value\">{} m³</div></div>",
        totals.cbm_display()
    )
    .unwrap();
    writeln!(
        output,
        "<div><div class=\"label\">Grand Total</div><div class=\"value grand\">{}</div></div>",
        format_money(currency, totals.total_value)
    )
    .unwrap();
    writeln!(output, "</div>").unwrap();
}

fn generate_containers(output: &mut String, totals: &Totals) {
    let hq = ContainerType::FortyHighCube;
    let Some(required) = containers_required(totals.total_cbm, hq.capacity_cbm()) else {
        return;
    };

    writeln!(output, "<div class=\"containers\">").unwrap();
    writeln!(output, "<h3>Container Estimate</h3>").unwrap();
    writeln!(
        output,
        "<p>{} required: <strong>{}</strong></p>",
        hq, required
    )
    .unwrap();
    writeln!(
        output,
        "<p>Load fill: <strong>{}%</strong> of a {} CBM container</p>",
        round::fixed1(fill_percentage(totals.total_cbm)),
        DOCUMENT_LOAD_CBM
    )
    .unwrap();
    writeln!(output, "</div>").unwrap();
}

fn generate_notes(output: &mut String, details: &QuotationDetails) {
    writeln!(output, "<div class=\"notes\">").unwrap();
    writeln!(output, "<h3>Notes</h3>").unwrap();
    writeln!(output, "<p>{}</p>", escape_html(details.notes.trim())).unwrap();
    writeln!(output, "</div>").unwrap();
}

fn generate_footer(output: &mut String, issuer: &IssuerConfig) {
    writeln!(output, "<div class=\"footer\">").unwrap();
    writeln!(output, "<p>{}</p>", escape_html(&issuer.disclaimer)).unwrap();
    writeln!(output, "</div>").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogItem;

    fn line(id: &str, cbm: f64, price: f64, qty: u32) -> QuotationLineItem {
        let item = CatalogItem {
            id: id.into(),
            product_code: id.to_uppercase(),
            description: format!("{} description", id),
            height_cm: 75.0,
            width_cm: 180.0,
            depth_cm: 90.0,
            cbm,
            fob_price_usd: Some(price),
            ..Default::default()
        };
        let mut line = QuotationLineItem::from_catalog(&item);
        line.set_quantity(qty);
        line
    }

    fn render(details: &QuotationDetails, items: &[QuotationLineItem]) -> String {
        generate_quotation_html(
            details,
            items,
            &Totals::compute(items),
            &IssuerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>Tom & \"Jerry's\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Currency::Usd, 300.0), "$300.00");
        assert_eq!(format_money(Currency::Eur, 0.5), "€0.50");
    }

    #[test]
    fn test_empty_items_refused() {
        let result = generate_quotation_html(
            &QuotationDetails::default(),
            &[],
            &Totals::default(),
            &IssuerConfig::default(),
        );
        assert!(matches!(result, Err(QuoteError::EmptyQuotation)));
    }

    #[test]
    fn test_document_is_self_contained() {
        let html = render(&QuotationDetails::default(), &[line("tbl", 0.5, 100.0, 3)]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("src="));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_line_row_contents() {
        let html = render(&QuotationDetails::default(), &[line("tbl", 0.5, 100.0, 3)]);
        assert!(html.contains("<td class=\"code\">TBL</td>"));
        assert!(html.contains("75×180×90"));
        assert!(html.contains("<td class=\"center\">152</td>"));
        assert!(html.contains("$100.00"));
        assert!(html.contains("$300.00"));
        assert!(html.contains("3 pcs"));
        assert!(html.contains("1.50 m³"));
    }

    #[test]
    fn test_line_cbm_without_float_noise() {
        let html = render(&QuotationDetails::default(), &[line("a", 0.1 + 0.2, 10.0, 1)]);
        assert!(html.contains("<td class=\"center\">0.3</td>"));
        assert!(!html.contains("0.30000000000000004"));
    }

    #[test]
    fn test_totals_ties_round_up_in_document() {
        let html = render(&QuotationDetails::default(), &[line("a", 0.125, 0.125, 1)]);
        assert!(html.contains("0.13 m³"));
        assert!(html.contains("$0.13"));
        assert!(!html.contains("0.12 m³"));
        assert!(!html.contains("$0.12<"));
    }

    #[test]
    fn test_optional_blocks_omitted() {
        let html = render(&QuotationDetails::default(), &[line("a", 0.5, 1.0, 1)]);
        assert!(!html.contains("class=\"customer\""));
        assert!(!html.contains("class=\"notes\""));
        assert!(html.contains("class=\"footer\""));
    }

    #[test]
    fn test_optional_blocks_present_and_escaped() {
        let details = QuotationDetails {
            customer_name: "Smith & Sons".into(),
            customer_email: "buyer@smith.example".into(),
            notes: "Delivery <before> March".into(),
            reference: "QT-2024-001".into(),
            ..Default::default()
        };
        let html = render(&details, &[line("a", 0.5, 1.0, 1)]);
        assert!(html.contains("Smith &amp; Sons"));
        assert!(html.contains("buyer@smith.example"));
        assert!(html.contains("Delivery &lt;before&gt; March"));
        assert!(html.contains("<title>Quotation QT-2024-001</title>"));
    }

    #[test]
    fn test_container_block_hidden_for_zero_volume() {
        let html = render(&QuotationDetails::default(), &[line("a", 0.0, 10.0, 2)]);
        assert!(!html.contains("class=\"containers\""));
        assert!(html.contains("<td class=\"center\">-</td>"));
    }

    #[test]
    fn test_container_block_figures() {
        let html = render(&QuotationDetails::default(), &[line("a", 0.95, 10.0, 40)]);
        assert!(html.contains("class=\"containers\""));
        assert!(html.contains("40' HQ (~68 CBM) required: <strong>1</strong>"));
        assert!(html.contains("<strong>50.0%</strong>"));
    }

    #[test]
    fn test_currency_symbols_in_document() {
        let items = [line("a", 0.5, 20.0, 2)];
        let mut details = QuotationDetails {
            currency: Currency::Gbp,
            ..Default::default()
        };
        let html = render(&details, &items);
        assert!(html.contains("£20.00"));
        assert!(html.contains("£40.00"));
        assert!(!html.contains("$"));

        details.currency = Currency::from_code("CHF");
        let html = render(&details, &items);
        assert!(html.contains("€40.00"));
    }
}
