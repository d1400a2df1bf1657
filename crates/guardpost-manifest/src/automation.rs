//! # Automation Document Catalog
//!
//! The provider-defined runbooks remediations invoke. Each document is a
//! parameterized automation executed by the Systems Manager service; the
//! catalog records which parameters a document requires so an
//! `automatic = true` binding can be checked before it ever reaches the
//! provisioning API.
//!
//! Parameter lists mirror the provider's published document interfaces.
//! Documents accept more optional parameters than the stack uses; only the
//! ones relevant here are listed, and validation treats names outside the
//! known set as a warning rather than an error so a newer document
//! revision does not break synthesis.

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// A Systems Manager automation document from the provider's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomationDocument {
    /// Revokes inbound SSH/RDP access on a security group.
    #[serde(rename = "AWS-DisablePublicAccessForSecurityGroup")]
    DisablePublicAccessForSecurityGroup,
    /// Creates or updates a CloudTrail trail and starts logging.
    #[serde(rename = "AWS-EnableCloudTrail")]
    EnableCloudTrail,
    /// Sets a bucket's versioning configuration.
    #[serde(rename = "AWS-ConfigureS3BucketVersioning")]
    ConfigureS3BucketVersioning,
}

impl AutomationDocument {
    /// The provider's document identifier (remediation `TargetId`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisablePublicAccessForSecurityGroup => {
                "AWS-DisablePublicAccessForSecurityGroup"
            }
            Self::EnableCloudTrail => "AWS-EnableCloudTrail",
            Self::ConfigureS3BucketVersioning => "AWS-ConfigureS3BucketVersioning",
        }
    }

    /// Look up a document by target identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::UnknownDocument`] for identifiers outside
    /// the catalog.
    pub fn from_target_id(id: &str) -> Result<Self, ManifestError> {
        match id {
            "AWS-DisablePublicAccessForSecurityGroup" => {
                Ok(Self::DisablePublicAccessForSecurityGroup)
            }
            "AWS-EnableCloudTrail" => Ok(Self::EnableCloudTrail),
            "AWS-ConfigureS3BucketVersioning" => Ok(Self::ConfigureS3BucketVersioning),
            other => Err(ManifestError::UnknownDocument {
                target_id: other.to_string(),
            }),
        }
    }

    /// All documents in the catalog.
    pub fn all() -> [Self; 3] {
        [
            Self::DisablePublicAccessForSecurityGroup,
            Self::EnableCloudTrail,
            Self::ConfigureS3BucketVersioning,
        ]
    }

    /// Parameters the document cannot run without.
    pub fn required_parameters(&self) -> &'static [&'static str] {
        match self {
            Self::DisablePublicAccessForSecurityGroup => &["GroupId"],
            Self::EnableCloudTrail => &["TrailName", "S3BucketName"],
            Self::ConfigureS3BucketVersioning => &["BucketName"],
        }
    }

    /// Optional parameters the stack may supply.
    pub fn optional_parameters(&self) -> &'static [&'static str] {
        match self {
            Self::DisablePublicAccessForSecurityGroup => &["AutomationAssumeRole"],
            Self::EnableCloudTrail => &[
                "AutomationAssumeRole",
                "IsMultiRegionTrail",
                "IsLogging",
                "IncludeGlobalServiceEvents",
                "S3KeyPrefix",
            ],
            Self::ConfigureS3BucketVersioning => {
                &["AutomationAssumeRole", "VersioningConfiguration"]
            }
        }
    }

    /// True if the parameter name is in the document's known interface.
    pub fn knows_parameter(&self, name: &str) -> bool {
        self.required_parameters().contains(&name) || self.optional_parameters().contains(&name)
    }

    /// The catalog definition for this document.
    pub fn definition(&self) -> AutomationDocumentDefinition {
        let description = match self {
            Self::DisablePublicAccessForSecurityGroup => {
                "Revokes unrestricted inbound SSH and RDP rules on the given security group"
            }
            Self::EnableCloudTrail => {
                "Creates or updates a trail delivering audit records to the given bucket and starts logging"
            }
            Self::ConfigureS3BucketVersioning => {
                "Applies the given versioning configuration to the bucket"
            }
        };
        AutomationDocumentDefinition {
            target_id: self.as_str().to_string(),
            description: description.to_string(),
            required_parameters: self
                .required_parameters()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            optional_parameters: self
                .optional_parameters()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl std::fmt::Display for AutomationDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for one automation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationDocumentDefinition {
    /// The provider's document identifier.
    pub target_id: String,
    /// What the automation does.
    pub description: String,
    /// Parameters that must be supplied.
    pub required_parameters: Vec<String>,
    /// Parameters the stack may supply.
    pub optional_parameters: Vec<String>,
}

/// The full automation-document catalog.
pub fn automation_documents() -> Vec<AutomationDocumentDefinition> {
    AutomationDocument::all()
        .iter()
        .map(AutomationDocument::definition)
        .collect()
}
