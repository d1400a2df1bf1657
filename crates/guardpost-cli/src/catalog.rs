//! # Catalog Subcommand
//!
//! Read-only listings of the managed-rule and automation-document
//! catalogs, in human-readable text or JSON.

use anyhow::{Context, Result};
use clap::Args;

use guardpost_manifest::{automation_documents, managed_rules};

/// Arguments for the `guardpost catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// List managed rules only.
    #[arg(long)]
    pub rules: bool,

    /// List automation documents only.
    #[arg(long)]
    pub documents: bool,

    /// Emit the catalog as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the catalog subcommand.
///
/// With no selection flags, lists both catalogs. Always exits 0.
pub fn run_catalog(args: &CatalogArgs) -> Result<u8> {
    let both = !args.rules && !args.documents;

    if args.json {
        let mut doc = serde_json::Map::new();
        if args.rules || both {
            doc.insert(
                "rules".to_string(),
                serde_json::to_value(managed_rules()).context("failed to render rules")?,
            );
        }
        if args.documents || both {
            doc.insert(
                "documents".to_string(),
                serde_json::to_value(automation_documents())
                    .context("failed to render documents")?,
            );
        }
        let rendered = serde_json::to_string_pretty(&serde_json::Value::Object(doc))
            .context("failed to render catalog")?;
        println!("{rendered}");
        return Ok(0);
    }

    if args.rules || both {
        println!("Managed rules:");
        for rule in managed_rules() {
            println!("  {} — {}", rule.source_identifier, rule.name);
            println!("      {}", rule.description);
            if !rule.evaluated_resource_types.is_empty() {
                println!("      evaluates: {}", rule.evaluated_resource_types.join(", "));
            }
        }
    }

    if both {
        println!();
    }

    if args.documents || both {
        println!("Automation documents:");
        for doc in automation_documents() {
            println!("  {}", doc.target_id);
            println!("      {}", doc.description);
            if !doc.required_parameters.is_empty() {
                println!("      required: {}", doc.required_parameters.join(", "));
            }
            if !doc.optional_parameters.is_empty() {
                println!("      optional: {}", doc.optional_parameters.join(", "));
            }
        }
    }

    Ok(0)
}
