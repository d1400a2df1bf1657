//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across guardpost crates. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Canonicalization errors carry the offending value so the caller can
//!   report exactly which field broke determinism.
//! - Identifier errors name the rejected input and the rule it violated.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical template output.
    /// Numeric properties must be integers or strings.
    #[error("float values are not permitted in canonical template output; use integer or string: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error constructing a CloudFormation logical identifier.
#[derive(Error, Debug)]
pub enum LogicalIdError {
    /// Logical ids must be non-empty.
    #[error("logical id must not be empty")]
    Empty,

    /// Logical ids are capped at 255 characters by the provider.
    #[error("logical id exceeds 255 characters: {length}")]
    TooLong {
        /// Length of the rejected identifier.
        length: usize,
    },

    /// Logical ids are strictly alphanumeric (A-Za-z0-9).
    #[error("logical id {id:?} contains non-alphanumeric character {ch:?}")]
    InvalidCharacter {
        /// The rejected identifier.
        id: String,
        /// The first offending character.
        ch: char,
    },
}
