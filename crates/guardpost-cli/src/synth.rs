//! # Synth Subcommand
//!
//! Deterministic template synthesis for the built-in compliance stack.
//!
//! The canonical JSON form (RFC 8785 via `CanonicalBytes`) is the
//! authoritative output: synthesizing the same stack twice yields
//! byte-identical files, which makes `--check` a pure byte comparison.
//! YAML output is a convenience rendering of the same value tree.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use guardpost_cfn::Template;
use guardpost_manifest::ComplianceStack;

/// Arguments for the `guardpost synth` subcommand.
#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Output path; prints to stdout when omitted.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Output format (json or yaml).
    #[arg(long, default_value = "json")]
    pub format: String,

    /// Verify the existing output file matches instead of writing.
    #[arg(long)]
    pub check: bool,
}

/// Execute the synth subcommand.
///
/// Returns exit code: 0 on success, 1 if --check detects drift, 2 on
/// operational error.
pub fn run_synth(args: &SynthArgs, repo_root: &Path) -> Result<u8> {
    let template = ComplianceStack::standard()
        .synthesize()
        .context("failed to synthesize the built-in stack")?;
    let rendered = render_template(&template, &args.format)?;

    tracing::debug!(
        format = %args.format,
        bytes = rendered.len(),
        "synthesized built-in stack"
    );

    if args.check {
        let out = args
            .out
            .as_ref()
            .context("--check requires --out to name the file to verify")?;
        let out_path = crate::resolve_path(out, repo_root);

        if !out_path.exists() {
            println!("FAIL: template does not exist: {}", out_path.display());
            return Ok(1);
        }

        let existing = std::fs::read(&out_path)
            .with_context(|| format!("failed to read template: {}", out_path.display()))?;

        // Allow trailing-newline variance.
        let trimmed = rendered.strip_suffix(b"\n").unwrap_or(&rendered);
        let matches = existing == rendered || existing.as_slice() == trimmed;

        if matches {
            println!("OK: template is up to date");
            Ok(0)
        } else {
            println!("FAIL: template drifted from the synthesized stack");
            Ok(1)
        }
    } else if let Some(ref out) = args.out {
        let out_path = crate::resolve_path(out, repo_root);
        std::fs::write(&out_path, &rendered)
            .with_context(|| format!("failed to write template: {}", out_path.display()))?;
        println!("OK: wrote template to {}", out_path.display());
        Ok(0)
    } else {
        print!("{}", String::from_utf8_lossy(&rendered));
        Ok(0)
    }
}

/// Render a synthesized template in the requested format, newline-terminated.
fn render_template(template: &Template, format: &str) -> Result<Vec<u8>> {
    match format {
        "json" => {
            let canonical = template
                .to_canonical_bytes()
                .context("failed to canonicalize template")?;
            Ok([canonical.as_bytes(), b"\n"].concat())
        }
        "yaml" => {
            let value = template.to_value().context("failed to render template")?;
            let yaml = serde_yaml::to_string(&value).context("failed to render YAML")?;
            Ok(yaml.into_bytes())
        }
        other => bail!("unsupported format '{other}' (expected json or yaml)"),
    }
}
