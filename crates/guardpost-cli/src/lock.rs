//! # Lock Subcommand
//!
//! Lockfile generation and deterministic byte-level verification.
//!
//! The lockfile (`guardpost.lock.json`) pins the synthesized stack:
//! the digest of the whole canonical template plus one digest per
//! resource declaration. Committing it alongside the template makes
//! drift reviewable resource by resource, and `--check` in CI catches
//! any divergence between the committed lockfile and what the current
//! tool synthesizes.
//!
//! The lockfile itself is serialized via `CanonicalBytes`, so generation
//! is reproducible whenever `generated_at` is pinned.

use std::path::Path;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use sha2::{Digest, Sha256};

use guardpost_core::{sha256_digest, CanonicalBytes};
use guardpost_manifest::ComplianceStack;

/// Default lockfile name at the repository root.
pub const LOCKFILE_NAME: &str = "guardpost.lock.json";

/// Arguments for the `guardpost lock` subcommand.
#[derive(Args, Debug)]
pub struct LockArgs {
    /// Output path for the lockfile (defaults to <repo root>/guardpost.lock.json).
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Verify the existing lockfile matches instead of generating.
    #[arg(long)]
    pub check: bool,

    /// Override the generated_at timestamp for deterministic output.
    #[arg(long)]
    pub generated_at: Option<String>,

    /// Enforce strict determinism (requires a pinned generated_at).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the lock subcommand.
///
/// Returns exit code: 0 on success, 1 if --check fails, 2 on operational
/// error.
pub fn run_lock(args: &LockArgs, repo_root: &Path) -> Result<u8> {
    let out_path = if let Some(ref out) = args.out {
        crate::resolve_path(out, repo_root)
    } else {
        repo_root.join(LOCKFILE_NAME)
    };

    let generated_at = resolve_generated_at(args, &out_path)?;

    let template = ComplianceStack::standard()
        .synthesize()
        .context("failed to synthesize the built-in stack")?;
    let template_canonical = template
        .to_canonical_bytes()
        .context("failed to canonicalize template")?;
    let template_digest = sha256_digest(&template_canonical);

    let mut resources = serde_json::Map::new();
    for (id, resource) in &template.resources {
        let canonical =
            CanonicalBytes::new(resource).context("failed to canonicalize resource")?;
        resources.insert(
            id.to_string(),
            serde_json::Value::String(sha256_digest(&canonical).to_string()),
        );
    }

    let lock = serde_json::json!({
        "tool_version": crate::TOOL_VERSION,
        "generated_at": generated_at,
        "template": {
            "digest": template_digest.to_string(),
            "resource_count": template.resource_count(),
        },
        "resources": serde_json::Value::Object(resources),
    });

    let canonical = CanonicalBytes::new(&lock).context("failed to canonicalize lockfile")?;
    let canonical_bytes = canonical.as_bytes();

    if args.check {
        if !out_path.exists() {
            println!("FAIL: lockfile does not exist: {}", out_path.display());
            return Ok(1);
        }

        let existing = std::fs::read(&out_path)
            .with_context(|| format!("failed to read lockfile: {}", out_path.display()))?;

        // Allow trailing newline.
        let matches =
            existing == canonical_bytes || existing == [canonical_bytes, b"\n".as_slice()].concat();

        if matches {
            println!("OK: lockfile is up to date");
            Ok(0)
        } else {
            println!("FAIL: lockfile is outdated or differs from computed lockfile");
            println!("  Expected digest: {}", sha256_of_bytes(canonical_bytes));
            println!("  Existing digest: {}", sha256_of_bytes(&existing));
            Ok(1)
        }
    } else {
        let output = [canonical_bytes, b"\n"].concat();
        std::fs::write(&out_path, &output)
            .with_context(|| format!("failed to write lockfile: {}", out_path.display()))?;
        println!("OK: wrote lockfile to {}", out_path.display());
        Ok(0)
    }
}

/// Resolve the generated_at timestamp.
///
/// Priority:
/// 1. Explicit --generated-at flag
/// 2. Existing lockfile's generated_at (for --check stability)
/// 3. SOURCE_DATE_EPOCH environment variable
/// 4. Current UTC time
fn resolve_generated_at(args: &LockArgs, out_path: &Path) -> Result<String> {
    if let Some(ref ts) = args.generated_at {
        return Ok(ts.clone());
    }

    // Reuse the existing lockfile's timestamp for stability.
    if out_path.exists() {
        if let Ok(content) = std::fs::read_to_string(out_path) {
            if let Ok(existing) = serde_json::from_str::<serde_json::Value>(&content) {
                if let Some(ts) = existing.get("generated_at").and_then(|v| v.as_str()) {
                    if !ts.is_empty() {
                        return Ok(ts.to_string());
                    }
                }
            }
        }
    }

    if let Ok(epoch_str) = std::env::var("SOURCE_DATE_EPOCH") {
        if let Ok(epoch) = epoch_str.parse::<i64>() {
            if let Some(dt) = chrono::DateTime::from_timestamp(epoch, 0) {
                return Ok(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string());
            }
        }
    }

    if args.strict || args.check {
        bail!(
            "--strict/--check requires a deterministic generated_at \
             (use --generated-at or SOURCE_DATE_EPOCH)"
        );
    }

    let now = chrono::Utc::now();
    Ok(now.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Compute SHA-256 hex digest of raw bytes.
fn sha256_of_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    result.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINNED_TS: &str = "2024-01-01T00:00:00Z";

    fn args(out: Option<PathBuf>, check: bool, generated_at: Option<&str>) -> LockArgs {
        LockArgs {
            out,
            check,
            generated_at: generated_at.map(str::to_string),
            strict: false,
        }
    }

    #[test]
    fn sha256_of_bytes_known_vector() {
        let digest = sha256_of_bytes(b"");
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn lockfile_generation_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.lock.json");
        let b = dir.path().join("b.lock.json");

        run_lock(&args(Some(a.clone()), false, Some(PINNED_TS)), dir.path()).unwrap();
        run_lock(&args(Some(b.clone()), false, Some(PINNED_TS)), dir.path()).unwrap();

        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn lockfile_records_every_resource() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);
        run_lock(&args(Some(path.clone()), false, Some(PINNED_TS)), dir.path()).unwrap();

        let lock: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(lock["generated_at"], PINNED_TS);
        assert_eq!(lock["template"]["resource_count"], 9);

        let resources = lock["resources"].as_object().unwrap();
        assert_eq!(resources.len(), 9);
        for id in ["RemediationRole", "AuditSink", "SshRule", "TrailRemediation"] {
            let digest = resources[id].as_str().unwrap();
            assert!(digest.starts_with("sha256:"), "{id}: {digest}");
        }
        assert!(lock["template"]["digest"]
            .as_str()
            .unwrap()
            .starts_with("sha256:"));
    }

    #[test]
    fn generate_then_check_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);

        run_lock(&args(Some(path.clone()), false, Some(PINNED_TS)), dir.path()).unwrap();
        // Check reuses the timestamp recorded in the lockfile.
        let code = run_lock(&args(Some(path), true, None), dir.path()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn check_detects_stale_lockfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCKFILE_NAME);

        run_lock(&args(Some(path.clone()), false, Some(PINNED_TS)), dir.path()).unwrap();

        let mut lock: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        lock["resources"]["AuditSink"] = serde_json::Value::String("sha256:0000".to_string());
        std::fs::write(&path, serde_json::to_string(&lock).unwrap()).unwrap();

        let code = run_lock(&args(Some(path), true, None), dir.path()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn check_reports_missing_lockfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.lock.json");
        let code = run_lock(&args(Some(path), true, Some(PINNED_TS)), dir.path()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn strict_without_pinned_timestamp_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.lock.json");
        let mut a = args(Some(path), false, None);
        a.strict = true;
        // No lockfile, no flag; fails unless SOURCE_DATE_EPOCH is set.
        if std::env::var("SOURCE_DATE_EPOCH").is_err() {
            assert!(run_lock(&a, dir.path()).is_err());
        }
    }
}
