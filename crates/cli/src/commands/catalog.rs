//! Catalog inspection commands.
//!
//! # Usage
//!
//! ```bash
//! # List products, cheapest first
//! vitrina catalog list --sort price-asc
//!
//! # Smartphones under 80 000 as JSON
//! vitrina catalog list --category 1 --max 80000 --json
//!
//! # Dump the catalog to a file
//! vitrina catalog export --output catalog.json
//! ```

use std::io::Write;
use std::path::Path;

use vitrina_storefront::catalog::{Catalog, CatalogQuery, QueryParams};
use vitrina_storefront::models::Product;

use super::CommandError;

/// Filters accepted by `catalog list`.
///
/// Values are passed through the storefront's lenient parser, so a malformed
/// bound falls back to its default exactly like the catalog page.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub category: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub json: bool,
}

impl ListOptions {
    fn query(&self) -> CatalogQuery {
        CatalogQuery::from_params(&QueryParams {
            category: self.category.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
            sort: self.sort.clone(),
            q: self.search.clone(),
        })
    }
}

/// Print the filtered, sorted product list.
///
/// # Errors
///
/// Returns `CommandError` if output cannot be written.
pub fn list(catalog: &Catalog, options: &ListOptions, out: &mut impl Write) -> Result<(), CommandError> {
    let query = options.query();
    let products = query.apply(&catalog.products, &catalog.categories);
    tracing::debug!(?query, results = products.len(), "catalog list");

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &products)?;
        writeln!(out).map_err(CommandError::stdout)?;
        return Ok(());
    }

    for product in &products {
        writeln!(out, "{}", format_row(product)).map_err(CommandError::stdout)?;
    }
    writeln!(out, "{} product(s)", products.len()).map_err(CommandError::stdout)?;
    Ok(())
}

fn format_row(product: &Product) -> String {
    let rating = product
        .rating
        .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
    let mut flags = Vec::new();
    if product.is_new {
        flags.push("new".to_string());
    }
    if let Some(discount) = product.discount {
        flags.push(format!("-{discount}%"));
    }
    format!(
        "{:>4}  {:<24}  {:<16}  {:>14}  {:>4}  {}",
        product.id,
        product.name,
        product.category,
        product.price.to_string(),
        rating,
        flags.join(" ")
    )
    .trim_end()
    .to_string()
}

/// Write the whole catalog as pretty JSON to `output`, or to `out` when no
/// path is given.
///
/// # Errors
///
/// Returns `CommandError` if serialization or writing fails.
pub fn export(catalog: &Catalog, output: Option<&Path>, out: &mut impl Write) -> Result<(), CommandError> {
    let json = catalog.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n")).map_err(|e| CommandError::file(path, e))?;
            tracing::info!(
                products = catalog.products.len(),
                parts = catalog.parts.len(),
                orders = catalog.orders.len(),
                "Catalog exported to {}",
                path.display()
            );
        }
        None => writeln!(out, "{json}").map_err(CommandError::stdout)?,
    }
    Ok(())
}
