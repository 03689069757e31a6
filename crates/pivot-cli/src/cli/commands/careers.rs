//! Careers command handler.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use pivot_core::api::CareerApi;
use pivot_core::config::Config;

/// Fetches the career catalog and prints it as a table.
pub async fn run(config: &Config) -> Result<()> {
    let api = CareerApi::from_config(config);
    let catalog = api
        .fetch_careers()
        .await
        .with_context(|| format!("fetch careers from {}", api.base_url()))?;

    if catalog.is_empty() {
        println!("No careers available.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["Category", "Roles"]);

    for (category, roles) in catalog.entries() {
        table.add_row([category.clone(), roles.join(", ")]);
    }

    println!("{table}");
    Ok(())
}
