//! fob-quote - CLI tool to build and print furniture export quotations.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use quote_core::QuoteError;

mod commands;

/// Build FOB quotations from a furniture catalog and print them as HTML.
#[derive(Parser, Debug)]
#[command(name = "fob-quote")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse or import the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
    /// Manage supplying factories
    Factory {
        #[command(subcommand)]
        action: FactoryCommand,
    },
    /// Manage sales orders
    Order {
        #[command(subcommand)]
        action: OrderCommand,
    },
    /// Assemble a quotation and write the printable document
    Quote(QuoteArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List products, one page at a time
    List {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Match product code or description
        #[arg(short, long)]
        search: Option<String>,

        /// Only this category ("all" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one product with its images
    Show {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        id: String,
    },
    /// Add a product
    Add {
        #[arg(long)]
        catalog: PathBuf,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Change the given fields of a product
    Update {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        id: String,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Remove a product
    Remove {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        id: String,
    },
    /// Upsert products from an Excel workbook or CSV export
    Import {
        /// Catalog JSON file to update
        #[arg(long)]
        catalog: PathBuf,

        /// Spreadsheet with a header row (.xlsx, .xls or .csv)
        #[arg(long)]
        file: PathBuf,
    },
}

/// Product form fields. Omitted fields are left unchanged on update.
#[derive(Args, Debug, Default)]
struct ProductArgs {
    /// Product code, unique ignoring case
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Free-text size label
    #[arg(long)]
    size: Option<String>,
    /// Height in cm
    #[arg(long)]
    height: Option<f64>,
    /// Depth in cm
    #[arg(long)]
    depth: Option<f64>,
    /// Width in cm
    #[arg(long)]
    width: Option<f64>,
    /// Packed volume in m³, derived from the dimensions when omitted
    #[arg(long)]
    cbm: Option<f64>,
    #[arg(long)]
    fob_usd: Option<f64>,
    #[arg(long)]
    fob_gbp: Option<f64>,
    #[arg(long)]
    warehouse_1: Option<f64>,
    #[arg(long)]
    warehouse_2: Option<f64>,
    /// Image URL; the first is the primary image
    #[arg(long = "image")]
    images: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum FactoryCommand {
    /// List factories
    List {
        #[arg(long)]
        store: PathBuf,
    },
    /// Add a factory
    Add {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
    },
    /// Replace a factory's code and name
    Update {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
    },
    /// Remove a factory
    Remove {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum OrderCommand {
    /// Create a sales order
    Create(OrderArgs),
    /// List sales orders
    List {
        #[arg(long)]
        store: PathBuf,
    },
    /// Remove a sales order
    Remove {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        id: String,
    },
}

#[derive(Args, Debug)]
struct OrderArgs {
    /// Order store JSON file
    #[arg(long)]
    store: PathBuf,

    /// Sales order reference, e.g. SO-2024-001
    #[arg(long = "ref")]
    sales_order_ref: String,

    /// Buyer's purchase order reference
    #[arg(long, default_value = "")]
    po: String,

    #[arg(long, default_value = "")]
    buyer: String,

    /// Factory code
    #[arg(long)]
    factory: Option<String>,

    /// Factory store used to resolve --factory
    #[arg(long)]
    factories: Option<PathBuf>,

    /// Order status (draft, confirmed, in-production, shipped, completed, cancelled)
    #[arg(long, default_value = "draft")]
    status: String,

    /// Entry date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    entry_date: Option<NaiveDate>,

    /// Factory inform date (YYYY-MM-DD), defaults to the entry date
    #[arg(long)]
    inform_date: Option<NaiveDate>,

    /// Order line as CODE=QTY or CODE=QTY@PRICE
    #[arg(long = "item", value_parser = commands::parse_order_item)]
    items: Vec<quote_core::model::OrderItem>,
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Catalog JSON file
    #[arg(long)]
    catalog: PathBuf,

    /// Catalog id to add to the quotation
    #[arg(long = "select", num_args = 1..)]
    selected: Vec<String>,

    /// Quantity edit as ID=N
    #[arg(long = "qty", value_parser = commands::parse_assignment)]
    quantities: Vec<(String, String)>,

    /// Unit price edit as ID=PRICE
    #[arg(long = "price", value_parser = commands::parse_assignment)]
    prices: Vec<(String, String)>,

    /// Catalog id to drop after edits
    #[arg(long = "remove")]
    removals: Vec<String>,

    #[arg(long, default_value = "")]
    customer: String,

    /// Customer contact
    #[arg(long, default_value = "")]
    email: String,

    /// Quotation reference
    #[arg(long, default_value = "")]
    reference: String,

    /// Issue date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, default_value = "")]
    notes: String,

    /// Currency code (USD, GBP; anything else prints as EUR)
    #[arg(long, default_value = quote_core::config::DEFAULT_CURRENCY)]
    currency: String,

    /// Output HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Issuer branding JSON file
    #[arg(long)]
    issuer: Option<PathBuf>,

    /// Request printing once the document is written
    #[arg(long)]
    print: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Exit status for a failed command: the core error code when there is one.
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<QuoteError>()
        .map(|e| e.code().exit_status())
        .unwrap_or(1)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Catalog { action } => match action {
            CatalogCommand::List {
                catalog,
                search,
                category,
                page,
                json,
            } => commands::catalog_list(&catalog, search, category, page, json),
            CatalogCommand::Show { catalog, id } => commands::catalog_show(&catalog, &id),
            CatalogCommand::Add { catalog, product } => commands::catalog_add(&catalog, product),
            CatalogCommand::Update {
                catalog,
                id,
                product,
            } => commands::catalog_update(&catalog, &id, product),
            CatalogCommand::Remove { catalog, id } => commands::catalog_remove(&catalog, &id),
            CatalogCommand::Import { catalog, file } => commands::catalog_import(&catalog, &file),
        },
        Command::Factory { action } => match action {
            FactoryCommand::List { store } => commands::factory_list(&store),
            FactoryCommand::Add { store, code, name } => commands::factory_add(&store, code, name),
            FactoryCommand::Update {
                store,
                id,
                code,
                name,
            } => commands::factory_update(&store, &id, code, name),
            FactoryCommand::Remove { store, id } => commands::factory_remove(&store, &id),
        },
        Command::Order { action } => match action {
            OrderCommand::Create(args) => commands::order_create(args),
            OrderCommand::List { store } => commands::order_list(&store),
            OrderCommand::Remove { store, id } => commands::order_remove(&store, &id),
        },
        Command::Quote(args) => commands::quote(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_uses_core_code() {
        let err = anyhow::Error::from(QuoteError::EmptyQuotation);
        assert_eq!(exit_status(&err), 200);

        let err = anyhow::Error::from(QuoteError::EmptyQuotation).context("Failed to write out.html");
        assert_eq!(exit_status(&err), 200);

        assert_eq!(exit_status(&anyhow::anyhow!("Validation failed")), 1);
    }

    #[test]
    fn test_cli_parses_product_update() {
        let cli = Cli::try_parse_from([
            "fob-quote",
            "catalog",
            "update",
            "--catalog",
            "products.json",
            "--id",
            "PRD-0001",
            "--fob-usd",
            "275",
            "--image",
            "a.jpg",
            "--image",
            "b.jpg",
        ])
        .unwrap();
        let Command::Catalog {
            action: CatalogCommand::Update { id, product, .. },
        } = cli.command
        else {
            panic!("expected catalog update");
        };
        assert_eq!(id, "PRD-0001");
        assert_eq!(product.fob_usd, Some(275.0));
        assert_eq!(product.images, vec!["a.jpg", "b.jpg"]);
        assert!(product.code.is_none());
    }
}
