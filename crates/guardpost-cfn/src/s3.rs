//! # S3 Resource Specifications
//!
//! [`BucketSpec`] models the audit-sink side of the stack: a versioned,
//! encrypted bucket, optionally paired with a resource policy that refuses
//! unencrypted transport. Lowers to `AWS::S3::Bucket` and, when TLS
//! enforcement is on, a companion `AWS::S3::BucketPolicy`.

use guardpost_core::LogicalId;

use crate::iam::{PolicyDocument, PolicyStatement, Principal};
use crate::template::{RemovalPolicy, Resource};
use crate::value::CfnValue;

/// Server-side encryption algorithm applied by default to new objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseAlgorithm {
    /// Provider-managed keys (SSE-S3).
    Aes256,
    /// KMS-managed keys (SSE-KMS).
    AwsKms,
}

impl SseAlgorithm {
    /// Returns the provider's string for this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256 => "AES256",
            Self::AwsKms => "aws:kms",
        }
    }
}

/// Specification of a storage bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSpec {
    /// Keep prior object versions on overwrite and delete.
    pub versioned: bool,
    /// Default encryption-at-rest algorithm.
    pub sse_algorithm: SseAlgorithm,
    /// Attach a resource policy denying non-TLS access.
    pub enforce_tls: bool,
    /// Behavior on stack deletion and replacement.
    pub removal: RemovalPolicy,
}

impl BucketSpec {
    /// An unversioned SSE-S3 bucket, retained on deletion, no TLS policy.
    pub fn new() -> Self {
        Self {
            versioned: false,
            sse_algorithm: SseAlgorithm::Aes256,
            enforce_tls: false,
            removal: RemovalPolicy::Retain,
        }
    }

    /// Enable versioning.
    pub fn versioned(mut self) -> Self {
        self.versioned = true;
        self
    }

    /// Set the default encryption algorithm.
    pub fn with_sse(mut self, algorithm: SseAlgorithm) -> Self {
        self.sse_algorithm = algorithm;
        self
    }

    /// Deny unencrypted transport via a companion bucket policy.
    pub fn enforce_tls(mut self) -> Self {
        self.enforce_tls = true;
        self
    }

    /// Set removal behavior.
    pub fn with_removal(mut self, removal: RemovalPolicy) -> Self {
        self.removal = removal;
        self
    }

    /// Lower to an `AWS::S3::Bucket` resource.
    pub fn synthesize(&self) -> Resource {
        let mut properties: Vec<(String, CfnValue)> = Vec::new();

        let by_default: CfnValue = [(
            "ServerSideEncryptionByDefault".to_string(),
            [(
                "SSEAlgorithm".to_string(),
                CfnValue::string(self.sse_algorithm.as_str()),
            )]
            .into_iter()
            .collect(),
        )]
        .into_iter()
        .collect();
        properties.push((
            "BucketEncryption".to_string(),
            [(
                "ServerSideEncryptionConfiguration".to_string(),
                CfnValue::Array(vec![by_default]),
            )]
            .into_iter()
            .collect(),
        ));

        if self.versioned {
            properties.push((
                "VersioningConfiguration".to_string(),
                [("Status".to_string(), CfnValue::string("Enabled"))]
                    .into_iter()
                    .collect(),
            ));
        }

        let resource = Resource::new("AWS::S3::Bucket", properties.into_iter().collect());
        match self.removal {
            RemovalPolicy::Retain => resource.retained(),
            RemovalPolicy::Delete => resource,
        }
    }

    /// Lower the TLS-enforcement policy to an `AWS::S3::BucketPolicy`
    /// resource against the bucket declared under `bucket_id`.
    ///
    /// Returns `None` when TLS enforcement is off.
    pub fn synthesize_policy(&self, bucket_id: &LogicalId) -> Option<Resource> {
        if !self.enforce_tls {
            return None;
        }

        let bucket_arn = CfnValue::get_att(bucket_id, "Arn");
        let objects_arn = CfnValue::concat(vec![bucket_arn.clone(), "/*".into()]);
        let condition: CfnValue = [(
            "Bool".to_string(),
            [(
                "aws:SecureTransport".to_string(),
                CfnValue::string("false"),
            )]
            .into_iter()
            .collect::<CfnValue>(),
        )]
        .into_iter()
        .collect();

        let statement = PolicyStatement::deny(
            vec!["s3:*".to_string()],
            vec![bucket_arn, objects_arn],
        )
        .with_principal(Principal::Any)
        .with_condition(condition);

        let properties: CfnValue = [
            ("Bucket".to_string(), CfnValue::reference(bucket_id)),
            (
                "PolicyDocument".to_string(),
                PolicyDocument::new(vec![statement]).to_value(),
            ),
        ]
        .into_iter()
        .collect();

        Some(Resource::new("AWS::S3::BucketPolicy", properties))
    }
}

impl Default for BucketSpec {
    fn default() -> Self {
        Self::new()
    }
}
