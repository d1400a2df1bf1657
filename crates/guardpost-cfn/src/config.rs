//! # Config Resource Specifications
//!
//! Models the compliance side of the stack: [`ConfigRuleSpec`] lowers to
//! `AWS::Config::ConfigRule`, and [`RemediationSpec`] lowers to
//! `AWS::Config::RemediationConfiguration` — the binding that tells the
//! provider which automation to fire when a rule finds a violation.
//!
//! ## Parameter Kinds
//!
//! Remediation parameters come in exactly two provider-defined kinds, and
//! the distinction is load-bearing: static values bind at declaration time,
//! resource references bind per-violation to the offending resource's id.
//!
//! ```text
//! Static   -> {"StaticValue": {"Values": [...]}}
//! Resource -> {"ResourceValue": {"Value": "RESOURCE_ID"}}
//! ```
//!
//! [`RemediationParameter`] keeps the two as distinct variants so the kind
//! survives every transformation down to the serialized template.

use std::collections::BTreeMap;

use crate::template::Resource;
use crate::value::CfnValue;

/// The provider's marker for a per-violation resource reference.
pub const RESOURCE_ID: &str = "RESOURCE_ID";

/// Specification of a managed compliance rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRuleSpec {
    /// Explicit rule name; `None` lets the provider generate one.
    pub rule_name: Option<String>,
    /// Managed-catalog source identifier, e.g. `INCOMING_SSH_DISABLED`.
    pub source_identifier: String,
    /// Rule description.
    pub description: Option<String>,
    /// Resource types the rule is scoped to; empty means unscoped.
    pub scoped_resource_types: Vec<String>,
}

impl ConfigRuleSpec {
    /// A managed rule by catalog source identifier, unscoped and unnamed.
    pub fn managed(source_identifier: impl Into<String>) -> Self {
        Self {
            rule_name: None,
            source_identifier: source_identifier.into(),
            description: None,
            scoped_resource_types: Vec::new(),
        }
    }

    /// Set an explicit rule name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.rule_name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Scope evaluation to the given resource types.
    pub fn scoped_to(mut self, resource_types: Vec<String>) -> Self {
        self.scoped_resource_types = resource_types;
        self
    }

    /// Lower to an `AWS::Config::ConfigRule` resource.
    pub fn synthesize(&self) -> Resource {
        let mut properties: Vec<(String, CfnValue)> = Vec::new();
        if let Some(name) = &self.rule_name {
            properties.push(("ConfigRuleName".to_string(), CfnValue::string(name.clone())));
        }
        if let Some(description) = &self.description {
            properties.push((
                "Description".to_string(),
                CfnValue::string(description.clone()),
            ));
        }
        if !self.scoped_resource_types.is_empty() {
            let types: Vec<CfnValue> = self
                .scoped_resource_types
                .iter()
                .map(|t| CfnValue::string(t.clone()))
                .collect();
            properties.push((
                "Scope".to_string(),
                [("ComplianceResourceTypes".to_string(), CfnValue::Array(types))]
                    .into_iter()
                    .collect(),
            ));
        }
        properties.push((
            "Source".to_string(),
            [
                ("Owner".to_string(), CfnValue::string("AWS")),
                (
                    "SourceIdentifier".to_string(),
                    CfnValue::string(self.source_identifier.clone()),
                ),
            ]
            .into_iter()
            .collect(),
        ));
        Resource::new("AWS::Config::ConfigRule", properties.into_iter().collect())
    }
}

/// The kind of target a remediation invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationTargetType {
    /// A Systems Manager automation document.
    SsmDocument,
}

impl RemediationTargetType {
    /// Returns the provider's string for this target type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SsmDocument => "SSM_DOCUMENT",
        }
    }
}

/// One remediation parameter, static or resource-reference.
///
/// The kind distinction must survive serialization exactly: static values
/// are fixed at declaration, resource references resolve per-violation.
#[derive(Debug, Clone, PartialEq)]
pub enum RemediationParameter {
    /// Fixed value list, identical on every invocation. Values may be
    /// intrinsics (`Ref`, `Fn::GetAtt`) that the provider resolves once at
    /// deploy time — still static from the remediation's point of view.
    Static(Vec<CfnValue>),
    /// Resolved at invocation time to the non-compliant resource's id.
    Resource,
}

impl RemediationParameter {
    /// A static parameter with a single value.
    pub fn static_value(value: impl Into<CfnValue>) -> Self {
        Self::Static(vec![value.into()])
    }

    /// A static parameter with multiple values.
    pub fn static_values(values: Vec<CfnValue>) -> Self {
        Self::Static(values)
    }

    /// A resource-reference parameter.
    pub fn resource_id() -> Self {
        Self::Resource
    }

    /// True for the static kind.
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    /// True for the resource-reference kind.
    pub fn is_resource_reference(&self) -> bool {
        matches!(self, Self::Resource)
    }

    /// Render to the provider's parameter-value object.
    fn to_value(&self) -> CfnValue {
        match self {
            Self::Static(values) => [(
                "StaticValue".to_string(),
                [("Values".to_string(), CfnValue::Array(values.clone()))]
                    .into_iter()
                    .collect::<CfnValue>(),
            )]
            .into_iter()
            .collect(),
            Self::Resource => [(
                "ResourceValue".to_string(),
                [("Value".to_string(), CfnValue::string(RESOURCE_ID))]
                    .into_iter()
                    .collect::<CfnValue>(),
            )]
            .into_iter()
            .collect(),
        }
    }
}

/// Specification of a remediation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RemediationSpec {
    /// The rule this remediation is bound to, usually a `Ref` to the rule
    /// resource (the provider resolves it to the generated rule name).
    pub config_rule_name: CfnValue,
    /// Target kind.
    pub target_type: RemediationTargetType,
    /// Target identifier, e.g. `AWS-EnableCloudTrail`.
    pub target_id: String,
    /// Explicit target version; `None` means latest.
    pub target_version: Option<String>,
    /// Fire without human approval.
    pub automatic: bool,
    /// Attempts before the provider reports exhaustion.
    pub maximum_automatic_attempts: u32,
    /// Seconds between attempts.
    pub retry_attempt_seconds: u32,
    /// Resource type the remediation applies to.
    pub resource_type: Option<String>,
    /// Parameter map passed to the target.
    pub parameters: BTreeMap<String, RemediationParameter>,
}

impl RemediationSpec {
    /// Lower to an `AWS::Config::RemediationConfiguration` resource.
    pub fn synthesize(&self) -> Resource {
        let mut properties: Vec<(String, CfnValue)> = Vec::new();
        properties.push(("Automatic".to_string(), CfnValue::Bool(self.automatic)));
        properties.push(("ConfigRuleName".to_string(), self.config_rule_name.clone()));
        properties.push((
            "MaximumAutomaticAttempts".to_string(),
            CfnValue::from(self.maximum_automatic_attempts),
        ));
        if !self.parameters.is_empty() {
            let rendered: CfnValue = self
                .parameters
                .iter()
                .map(|(name, p)| (name.clone(), p.to_value()))
                .collect();
            properties.push(("Parameters".to_string(), rendered));
        }
        if let Some(resource_type) = &self.resource_type {
            properties.push((
                "ResourceType".to_string(),
                CfnValue::string(resource_type.clone()),
            ));
        }
        properties.push((
            "RetryAttemptSeconds".to_string(),
            CfnValue::from(self.retry_attempt_seconds),
        ));
        properties.push(("TargetId".to_string(), CfnValue::string(self.target_id.clone())));
        properties.push((
            "TargetType".to_string(),
            CfnValue::string(self.target_type.as_str()),
        ));
        if let Some(version) = &self.target_version {
            properties.push((
                "TargetVersion".to_string(),
                CfnValue::string(version.clone()),
            ));
        }
        Resource::new(
            "AWS::Config::RemediationConfiguration",
            properties.into_iter().collect(),
        )
    }
}
