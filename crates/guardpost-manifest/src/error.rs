//! Manifest-specific error types.
//!
//! Structured errors for manifest validation and synthesis. Validation
//! mirrors the provisioning API's deploy-time rejections (unknown catalog
//! identifiers, missing required parameters) so a bad manifest fails here
//! instead of in a rejected deploy.

use thiserror::Error;

use guardpost_cfn::SynthError;
use guardpost_core::LogicalIdError;

/// Errors that can occur during manifest validation and synthesis.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Rule identifier not in the managed catalog.
    #[error("unknown managed rule: {source_identifier:?}")]
    UnknownRule { source_identifier: String },

    /// Automation document identifier not in the catalog.
    #[error("unknown automation document: {target_id:?}")]
    UnknownDocument { target_id: String },

    /// An automatic binding is missing a parameter its target requires.
    #[error("binding {binding:?} is automatic but missing required parameter {parameter:?} for {target_id}")]
    MissingParameter {
        binding: String,
        parameter: String,
        target_id: String,
    },

    /// Two bindings share a name, which would collide in the template.
    #[error("duplicate binding name: {name:?}")]
    DuplicateBinding { name: String },

    /// Binding name unusable as logical-id material.
    #[error("invalid binding name {name:?}: {reason}")]
    InvalidBindingName { name: String, reason: String },

    /// Logical id construction failed.
    #[error("logical id error: {0}")]
    LogicalId(#[from] LogicalIdError),

    /// Template assembly failed.
    #[error("synthesis error: {0}")]
    Synth(#[from] SynthError),
}

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;
