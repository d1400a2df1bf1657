//! # Rule Bindings
//!
//! A [`RuleBinding`] pairs one managed rule with one automation target:
//! which document to fire on violation, against which resource type, with
//! which parameters, under which retry policy. Three of these make up the
//! built-in stack; the types are general over any catalog rule/document
//! pair.
//!
//! ## Parameter Values
//!
//! [`ParameterValue`] keeps the provider's static vs resource-reference
//! dichotomy at the manifest level, with two symbolic static forms
//! (`IdentityArn`, `SinkName`) that synthesis resolves to intrinsics
//! against the stack's identity and sink. Resolution happens at deploy
//! time, so both remain static-kind: the value is the same on every
//! remediation invocation, unlike [`ParameterValue::ResourceId`], which
//! the provider rebinds to the violating resource each time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::automation::AutomationDocument;
use crate::rules::ManagedRule;

/// Retry behavior the provider applies to automatic remediation attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts before the provider reports exhaustion.
    pub max_automatic_attempts: u32,
    /// Seconds between attempts.
    pub retry_interval_secs: u32,
}

impl RetryPolicy {
    /// The fixed policy every built-in binding uses: up to 5 automatic
    /// attempts, 60 seconds apart.
    pub const STANDARD: RetryPolicy = RetryPolicy {
        max_automatic_attempts: 5,
        retry_interval_secs: 60,
    };
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Which of the provider's two parameter kinds a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Fixed at declaration; identical every invocation.
    Static,
    /// Rebound per violation to the offending resource's id.
    ResourceReference,
}

/// One remediation parameter value at the manifest level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterValue {
    /// Fixed literal list.
    Static(Vec<String>),
    /// The remediation identity's ARN (static; resolved at deploy time).
    IdentityArn,
    /// The audit sink's generated bucket name (static; resolved at deploy
    /// time).
    SinkName,
    /// The violating resource's identifier (rebound per violation).
    ResourceId,
}

impl ParameterValue {
    /// A static parameter with a single literal value.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Static(vec![value.into()])
    }

    /// The provider kind this value serializes as.
    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::Static(_) | Self::IdentityArn | Self::SinkName => ParameterKind::Static,
            Self::ResourceId => ParameterKind::ResourceReference,
        }
    }
}

/// One rule-to-remediation binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBinding {
    /// Binding name; prefixes the logical ids of the rule and remediation
    /// resources, so it must be non-empty, alphanumeric, and short enough
    /// that the derived ids stay within the 255-character cap.
    pub name: String,
    /// The managed rule to enable.
    pub rule: ManagedRule,
    /// The automation document to fire on violation.
    pub document: AutomationDocument,
    /// Explicit document version; `None` means latest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,
    /// Resource type the remediation applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Fire without human approval.
    pub automatic: bool,
    /// Retry behavior for automatic attempts.
    pub retry: RetryPolicy,
    /// Parameter map passed to the document.
    pub parameters: BTreeMap<String, ParameterValue>,
}

impl RuleBinding {
    /// A binding with the standard retry policy, automatic triggering, and
    /// no parameters yet.
    pub fn new(name: impl Into<String>, rule: ManagedRule, document: AutomationDocument) -> Self {
        Self {
            name: name.into(),
            rule,
            document,
            target_version: None,
            resource_type: None,
            automatic: true,
            retry: RetryPolicy::STANDARD,
            parameters: BTreeMap::new(),
        }
    }

    /// Set the document version.
    pub fn with_target_version(mut self, version: impl Into<String>) -> Self {
        self.target_version = Some(version.into());
        self
    }

    /// Set the remediated resource type.
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, value: ParameterValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Required document parameters not present in this binding.
    pub fn missing_required_parameters(&self) -> Vec<&'static str> {
        self.document
            .required_parameters()
            .iter()
            .filter(|p| !self.parameters.contains_key(**p))
            .copied()
            .collect()
    }
}
