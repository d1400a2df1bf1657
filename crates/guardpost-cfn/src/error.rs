//! # Synthesis Errors
//!
//! Error type for template assembly. Synthesis is a pure lowering from the
//! typed model to template JSON, so the error surface is small: structural
//! conflicts in the template under construction, and canonicalization
//! failures when producing byte output.

use thiserror::Error;

use guardpost_core::CanonicalizationError;

/// Error during template synthesis.
#[derive(Error, Debug)]
pub enum SynthError {
    /// Two resources were declared under the same logical id.
    #[error("duplicate logical id in template: {id}")]
    DuplicateLogicalId {
        /// The conflicting identifier.
        id: String,
    },

    /// Two outputs were declared under the same logical id.
    #[error("duplicate output id in template: {id}")]
    DuplicateOutputId {
        /// The conflicting identifier.
        id: String,
    },

    /// Canonical byte production failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Result alias for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
