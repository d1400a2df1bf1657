//! # guardpost-cfn — CloudFormation Resource Model
//!
//! Typed model of the provider resources guardpost declares, and the
//! template envelope they are declared in. Each `*Spec` type captures the
//! intent (a versioned encrypted bucket, a role assumable by the automation
//! service, a rule-to-automation binding) and lowers to the provider's
//! exact JSON via `synthesize()`.
//!
//! The wire contract is the provider's resource schema: field names,
//! intrinsic shapes, and the static-vs-resource-reference parameter
//! dichotomy serialize exactly as the provisioning API accepts them, and
//! `guardpost-schema` re-checks every synthesized template against the
//! repo's schema files.

pub mod config;
pub mod error;
pub mod iam;
pub mod s3;
pub mod template;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use config::{
    ConfigRuleSpec, RemediationParameter, RemediationSpec, RemediationTargetType, RESOURCE_ID,
};
pub use error::{SynthError, SynthResult};
pub use iam::{
    InlinePolicy, ManagedPolicy, PolicyDocument, PolicyEffect, PolicyStatement, Principal,
    RoleSpec, POLICY_VERSION,
};
pub use s3::{BucketSpec, SseAlgorithm};
pub use template::{Output, RemovalPolicy, Resource, Template, TEMPLATE_FORMAT_VERSION};
pub use value::{CfnValue, PseudoParameter};
