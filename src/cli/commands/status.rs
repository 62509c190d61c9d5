//! Status command implementation
//!
//! Lists catalog items grouped by their group leader.

use crate::adapters::{Collection, JsonCatalog};
use crate::cli::load_settings;
use crate::domain::item::Item;
use clap::Args;
use std::collections::BTreeMap;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show items carrying this tag
    #[arg(long)]
    pub tag: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking catalog status");

        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let catalog = match JsonCatalog::open(&config.catalog.path).await {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to open catalog {}", config.catalog.path);
                println!("   Error: {}", e);
                return Ok(5);
            }
        };

        let items: Vec<Item> = catalog
            .list()
            .await?
            .into_iter()
            .filter(|item| match &self.tag {
                Some(tag) => item.tags.iter().any(|t| t.as_str() == tag),
                None => true,
            })
            .collect();

        println!("Catalog: {}", config.catalog.path);
        println!();

        if items.is_empty() {
            println!("No items found.");
            println!("Run 'retouch import <PATH>' to add files.");
            return Ok(0);
        }

        for (leader, members) in group_items(&items) {
            println!("Group {leader}");
            for item in members {
                let tags: Vec<&str> = item.tags.iter().map(|t| t.as_str()).collect();
                println!("  {} {}", item.id, item.origin.display());
                println!(
                    "    Imported: {}",
                    item.imported_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                if !tags.is_empty() {
                    println!("    Tags: {}", tags.join(", "));
                }
            }
            println!();
        }

        println!("Total items: {}", items.len());
        Ok(0)
    }
}

/// Items keyed by group leader, each group in import order
fn group_items(items: &[Item]) -> BTreeMap<String, Vec<&Item>> {
    let mut groups: BTreeMap<String, Vec<&Item>> = BTreeMap::new();
    for item in items {
        groups
            .entry(item.group_id.to_string())
            .or_default()
            .push(item);
    }
    groups
}
