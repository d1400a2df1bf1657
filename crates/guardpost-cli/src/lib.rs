//! # guardpost-cli — CLI Tool for guardpost
//!
//! Provides the `guardpost` command-line interface over the synthesis,
//! validation, and lockfile layers.
//!
//! ## Subcommands
//!
//! - `guardpost synth` — Deterministic template synthesis (canonical
//!   JSON or YAML), with `--check` drift detection.
//! - `guardpost validate` — Manifest validation plus schema contract
//!   checks, on the built-in stack or an on-disk template.
//! - `guardpost lock` — Lockfile generation and byte-level verification.
//! - `guardpost catalog` — Managed-rule and automation-document listings.
//!
//! ## Exit Codes
//!
//! Every subcommand distinguishes three outcomes:
//!
//! ```bash
//! guardpost synth --out template.json --check   # 0 up to date, 1 drifted
//! guardpost validate                            # 0 valid, 1 violations
//! guardpost lock --check                        # 0 matches, 1 stale
//! ```
//!
//! Operational failures (unreadable files, broken schemas) exit 2.

pub mod catalog;
pub mod lock;
pub mod synth;
pub mod validate;

use std::path::{Path, PathBuf};

/// Tool version recorded in lockfiles.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve a path that may be relative to the repository root.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `repo_root`, uses that. Otherwise returns the path
/// relative to the current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}
