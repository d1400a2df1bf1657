//! # Managed Rule Catalog
//!
//! The provider-supplied compliance rules this stack binds remediations to.
//! Each rule is a named, continuously evaluated check the provider runs
//! against live resources; guardpost only declares which ones to enable.
//!
//! | Rule | Flags |
//! |------|-------|
//! | `INCOMING_SSH_DISABLED` | security groups allowing unrestricted inbound SSH |
//! | `CLOUD_TRAIL_ENABLED` | accounts without an enabled CloudTrail trail |
//! | `S3_BUCKET_VERSIONING_ENABLED` | buckets without versioning |
//!
//! [`ManagedRule`] is the closed set of rules the built-in stack uses;
//! string identifiers from outside enter through
//! [`ManagedRule::from_source_identifier`], which rejects anything not in
//! the catalog the way the provisioning API would at deploy time.

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// A managed compliance rule from the provider's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManagedRule {
    /// Security groups must not allow unrestricted incoming SSH.
    #[serde(rename = "INCOMING_SSH_DISABLED")]
    IncomingSshDisabled,
    /// An enabled CloudTrail trail must exist.
    #[serde(rename = "CLOUD_TRAIL_ENABLED")]
    CloudTrailEnabled,
    /// S3 buckets must have versioning enabled.
    #[serde(rename = "S3_BUCKET_VERSIONING_ENABLED")]
    S3BucketVersioningEnabled,
}

impl ManagedRule {
    /// The provider's source identifier for this rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncomingSshDisabled => "INCOMING_SSH_DISABLED",
            Self::CloudTrailEnabled => "CLOUD_TRAIL_ENABLED",
            Self::S3BucketVersioningEnabled => "S3_BUCKET_VERSIONING_ENABLED",
        }
    }

    /// Look up a rule by source identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::UnknownRule`] for identifiers outside the
    /// catalog.
    pub fn from_source_identifier(id: &str) -> Result<Self, ManifestError> {
        match id {
            "INCOMING_SSH_DISABLED" => Ok(Self::IncomingSshDisabled),
            "CLOUD_TRAIL_ENABLED" => Ok(Self::CloudTrailEnabled),
            "S3_BUCKET_VERSIONING_ENABLED" => Ok(Self::S3BucketVersioningEnabled),
            other => Err(ManifestError::UnknownRule {
                source_identifier: other.to_string(),
            }),
        }
    }

    /// All rules in the catalog.
    pub fn all() -> [Self; 3] {
        [
            Self::IncomingSshDisabled,
            Self::CloudTrailEnabled,
            Self::S3BucketVersioningEnabled,
        ]
    }

    /// The catalog definition for this rule.
    pub fn definition(&self) -> ManagedRuleDefinition {
        match self {
            Self::IncomingSshDisabled => ManagedRuleDefinition {
                source_identifier: self.as_str().to_string(),
                name: "Incoming SSH disabled".to_string(),
                description:
                    "Checks that security groups disallow unrestricted incoming SSH traffic"
                        .to_string(),
                evaluated_resource_types: vec!["AWS::EC2::SecurityGroup".to_string()],
            },
            Self::CloudTrailEnabled => ManagedRuleDefinition {
                source_identifier: self.as_str().to_string(),
                name: "CloudTrail enabled".to_string(),
                description: "Checks that an enabled CloudTrail trail exists in the account"
                    .to_string(),
                evaluated_resource_types: vec!["AWS::::Account".to_string()],
            },
            Self::S3BucketVersioningEnabled => ManagedRuleDefinition {
                source_identifier: self.as_str().to_string(),
                name: "S3 bucket versioning enabled".to_string(),
                description: "Checks that versioning is enabled for S3 buckets".to_string(),
                evaluated_resource_types: vec!["AWS::S3::Bucket".to_string()],
            },
        }
    }
}

impl std::fmt::Display for ManagedRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for one managed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedRuleDefinition {
    /// The provider's source identifier.
    pub source_identifier: String,
    /// Human-readable name.
    pub name: String,
    /// What the rule checks.
    pub description: String,
    /// Resource types the provider evaluates this rule against.
    pub evaluated_resource_types: Vec<String>,
}

/// The full managed-rule catalog.
pub fn managed_rules() -> Vec<ManagedRuleDefinition> {
    ManagedRule::all().iter().map(ManagedRule::definition).collect()
}
