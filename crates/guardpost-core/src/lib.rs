//! # guardpost-core — Foundational Types
//!
//! The bedrock of guardpost. Defines the primitives that make template
//! synthesis deterministic and checkable: canonical bytes, content digests,
//! and validated logical identifiers. Every other crate in the workspace
//! depends on `guardpost-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All digest computation and idempotence
//!    comparison flows through `CanonicalBytes::new()`. No raw
//!    `serde_json::to_vec()` for digests, so two synthesis runs of the same
//!    manifest compare as raw bytes.
//!
//! 2. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every digest path flows through canonicalization.
//!
//! 3. **`LogicalId` is validated at construction.** Resource references are
//!    typed; a template cannot name a resource the provider would reject.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `guardpost-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod logical_id;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, LogicalIdError};
pub use logical_id::LogicalId;
