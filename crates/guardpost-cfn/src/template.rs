//! # Template Envelope
//!
//! Implements [`Template`] — the top-level document submitted to the
//! provisioning API — and [`Resource`], one declared resource within it.
//!
//! ```text
//! Template
//! ├── AWSTemplateFormatVersion ("2010-09-09")
//! ├── Description
//! ├── Resources (logical id -> Resource)
//! │     ├── Type ("AWS::Config::ConfigRule", ...)
//! │     ├── Properties
//! │     ├── DeletionPolicy / UpdateReplacePolicy
//! │     └── DependsOn
//! └── Outputs (logical id -> Output)
//! ```
//!
//! Resources and outputs live in `BTreeMap`s keyed by [`LogicalId`], so
//! iteration and serialization order are deterministic. Byte output for
//! digests and idempotence checks goes through
//! [`Template::to_canonical_bytes`].

use std::collections::BTreeMap;

use serde::Serialize;

use guardpost_core::{CanonicalBytes, LogicalId};

use crate::error::{SynthError, SynthResult};
use crate::value::CfnValue;

/// The template format version every emitted document declares.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// Resource retention behavior on stack deletion or replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemovalPolicy {
    /// Delete the resource with the stack.
    Delete,
    /// Keep the resource when the stack is deleted or the resource replaced.
    Retain,
}

impl RemovalPolicy {
    /// Returns the provider's string for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Retain => "Retain",
        }
    }
}

/// One declared resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    /// Provider resource type, e.g. `AWS::Config::RemediationConfiguration`.
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Resource properties in the provider's schema for the type.
    #[serde(rename = "Properties")]
    pub properties: CfnValue,
    /// Explicit creation-order dependencies.
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<LogicalId>,
    /// Behavior on stack deletion.
    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<RemovalPolicy>,
    /// Behavior when an update requires replacement.
    #[serde(rename = "UpdateReplacePolicy", skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<RemovalPolicy>,
}

impl Resource {
    /// Create a resource with the given type and properties, no dependencies,
    /// default removal behavior.
    pub fn new(resource_type: impl Into<String>, properties: CfnValue) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties,
            depends_on: Vec::new(),
            deletion_policy: None,
            update_replace_policy: None,
        }
    }

    /// Retain the resource on deletion and replacement.
    pub fn retained(mut self) -> Self {
        self.deletion_policy = Some(RemovalPolicy::Retain);
        self.update_replace_policy = Some(RemovalPolicy::Retain);
        self
    }

    /// Add an explicit creation-order dependency.
    pub fn with_dependency(mut self, id: LogicalId) -> Self {
        self.depends_on.push(id);
        self
    }
}

/// One template output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    /// Human-readable description.
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The output value, usually an intrinsic.
    #[serde(rename = "Value")]
    pub value: CfnValue,
}

/// The top-level template document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    /// Always [`TEMPLATE_FORMAT_VERSION`].
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    /// Stack description.
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared resources, keyed by logical id.
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<LogicalId, Resource>,
    /// Declared outputs, keyed by logical id.
    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<LogicalId, Output>,
}

impl Template {
    /// Create an empty template with an optional description.
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            description,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Add a resource under a logical id.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::DuplicateLogicalId`] if the id is already taken.
    pub fn add_resource(&mut self, id: LogicalId, resource: Resource) -> SynthResult<()> {
        if self.resources.contains_key(&id) {
            return Err(SynthError::DuplicateLogicalId {
                id: id.as_str().to_string(),
            });
        }
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Add an output under a logical id.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::DuplicateOutputId`] if the id is already taken.
    pub fn add_output(&mut self, id: LogicalId, output: Output) -> SynthResult<()> {
        if self.outputs.contains_key(&id) {
            return Err(SynthError::DuplicateOutputId {
                id: id.as_str().to_string(),
            });
        }
        self.outputs.insert(id, output);
        Ok(())
    }

    /// Number of declared resources.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Look up a resource by logical id string.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        LogicalId::new(id).ok().and_then(|id| self.resources.get(&id))
    }

    /// Render to a JSON value tree.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Canonicalization`] if serialization fails.
    pub fn to_value(&self) -> SynthResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            SynthError::Canonicalization(guardpost_core::CanonicalizationError::from(e))
        })
    }

    /// Render to canonical bytes — the form digests and idempotence checks
    /// operate on.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Canonicalization`] on serialization failure or
    /// float leakage.
    pub fn to_canonical_bytes(&self) -> SynthResult<CanonicalBytes> {
        Ok(CanonicalBytes::new(self)?)
    }
}
