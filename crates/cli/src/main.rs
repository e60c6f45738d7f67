//! Vitrina CLI - catalog inspection and export tools.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog with the same filters as the catalog page
//! vitrina catalog list --category 1 --min 50000 --sort price-desc
//!
//! # Export the built-in catalog as a starting point for a JSON catalog
//! vitrina catalog export --output catalog.json
//!
//! # Show an order
//! vitrina order show 123456
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_CATALOG_PATH` - JSON catalog used when `--catalog` is not given

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

mod commands;

use commands::CommandError;
use commands::catalog::ListOptions;

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(author, version, about = "Vitrina CLI tools")]
struct Cli {
    /// JSON catalog file (defaults to the built-in mock catalog)
    #[arg(long, global = true, env = "STOREFRONT_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or export the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products with catalog filters applied
    List(ListArgs),
    /// Write the catalog as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Category id (0 for all)
    #[arg(long)]
    category: Option<String>,

    /// Minimum price in roubles
    #[arg(long)]
    min: Option<String>,

    /// Maximum price in roubles
    #[arg(long)]
    max: Option<String>,

    /// Sort order (`popular`, `price-asc`, `price-desc`, `new`)
    #[arg(long)]
    sort: Option<String>,

    /// Case-insensitive name filter
    #[arg(long)]
    search: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl From<ListArgs> for ListOptions {
    fn from(args: ListArgs) -> Self {
        Self {
            category: args.category,
            min: args.min,
            max: args.max,
            sort: args.sort,
            search: args.search,
            json: args.json,
        }
    }
}

#[derive(Subcommand)]
enum OrderAction {
    /// Show an order by number
    Show {
        /// Order number
        id: String,
    },
}

fn main() -> ExitCode {
    // Load .env before clap reads env-backed arguments
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrina_cli=info,vitrina_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let catalog = commands::load_catalog(cli.catalog.as_ref())?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List(args) => {
                commands::catalog::list(&catalog, &ListOptions::from(args), &mut stdout)?;
            }
            CatalogAction::Export { output } => {
                commands::catalog::export(&catalog, output.as_deref(), &mut stdout)?;
            }
        },
        Commands::Order { action } => match action {
            OrderAction::Show { id } => commands::order::show(&catalog, &id, &mut stdout)?,
        },
    }
    Ok(())
}
