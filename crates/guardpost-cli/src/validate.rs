//! # Validate Subcommand
//!
//! Manifest validation plus schema contract checks.
//!
//! Without a path, validates the built-in stack end to end: manifest
//! rules first (binding names, required automation parameters), then the
//! synthesized template against the JSON Schema contracts. With a path,
//! validates an on-disk template file against the contracts only —
//! useful for templates produced by `synth --out` or by other tooling.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use guardpost_manifest::ComplianceStack;
use guardpost_schema::{SchemaValidationError, SchemaValidator, TemplateReport};

/// Arguments for the `guardpost validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Validate a template file instead of the built-in stack.
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure, 2 on
/// operational error.
pub fn run_validate(args: &ValidateArgs, repo_root: &Path, schema_dir: &Path) -> Result<u8> {
    let validator = SchemaValidator::new(schema_dir).context("failed to load JSON schemas")?;

    tracing::info!(
        schema_count = validator.schema_count(),
        "loaded schema registry"
    );

    if let Some(ref path) = args.template {
        let resolved = crate::resolve_path(path, repo_root);
        return report_outcome(validator.validate_template_file(&resolved));
    }

    // Built-in stack: manifest rules first, then the synthesized template.
    let stack = ComplianceStack::standard();
    let violations = stack.validate();
    if !violations.is_empty() {
        for v in &violations {
            println!("  FAIL: manifest: {v}");
        }
        println!("\n{} manifest violation(s).", violations.len());
        return Ok(1);
    }
    println!("Manifest: {} binding(s) valid", stack.bindings.len());

    let template = stack
        .synthesize()
        .context("failed to synthesize the built-in stack")?;
    let value = template.to_value().context("failed to render template")?;
    report_outcome(validator.validate_template(&value))
}

/// Print the outcome of a template validation and map it to an exit code.
fn report_outcome(outcome: Result<TemplateReport, SchemaValidationError>) -> Result<u8> {
    match outcome {
        Ok(report) => {
            println!(
                "Template: {} resource(s) passed contract checks",
                report.resources_checked
            );
            for entry in &report.unrecognized {
                println!("  WARN: no contract for {entry}");
            }
            Ok(0)
        }
        Err(SchemaValidationError::ValidationFailed { violations, .. }) => {
            for v in violations.violations() {
                println!("  FAIL:{v}");
            }
            println!("\n{} contract violation(s).", violations.len());
            Ok(1)
        }
        Err(other) => Err(other.into()),
    }
}
