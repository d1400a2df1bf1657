//! # IAM Resource Specifications
//!
//! Typed model for the identity side of the stack: policy statements,
//! policy documents, and [`RoleSpec`], which lowers to an `AWS::IAM::Role`
//! resource.
//!
//! ## Wire Shapes
//!
//! Policy documents follow the provider's 2012-10-17 schema. Where the
//! provider accepts scalar-or-list (`Action`, `Resource`), a single element
//! serializes as a scalar, matching what the provisioning API echoes back;
//! this keeps synthesized output stable against round-trips through the
//! provider's own renderer.
//!
//! Managed policy attachments serialize as partition-aware ARNs
//! (`arn:<partition>:iam::aws:policy/<name>`) so the same template deploys
//! in commercial, China, and GovCloud partitions.

use serde::Serialize;

use crate::template::Resource;
use crate::value::{CfnValue, PseudoParameter};

/// Policy document schema version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Whether a statement grants or refuses the listed actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolicyEffect {
    /// Grant the actions.
    Allow,
    /// Refuse the actions, overriding any allow.
    Deny,
}

impl PolicyEffect {
    /// Returns the provider's string for this effect.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

/// The principal a statement applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// A service principal, e.g. `ssm.amazonaws.com`.
    Service(String),
    /// Every principal (`{"AWS": "*"}`).
    Any,
}

impl Principal {
    /// A service principal.
    pub fn service(name: impl Into<String>) -> Self {
        Self::Service(name.into())
    }

    fn to_value(&self) -> CfnValue {
        match self {
            Self::Service(name) => [("Service".to_string(), CfnValue::string(name.clone()))]
                .into_iter()
                .collect(),
            Self::Any => [("AWS".to_string(), CfnValue::string("*"))]
                .into_iter()
                .collect(),
        }
    }
}

/// One policy statement.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyStatement {
    /// Optional statement identifier.
    pub sid: Option<String>,
    /// Allow or deny.
    pub effect: PolicyEffect,
    /// Actions the statement covers.
    pub actions: Vec<String>,
    /// Principal, present only in resource-based policies and trust policies.
    pub principal: Option<Principal>,
    /// Resources the statement covers; empty in trust policies.
    pub resources: Vec<CfnValue>,
    /// Optional condition block.
    pub condition: Option<CfnValue>,
}

impl PolicyStatement {
    /// An allow statement over the given actions and resources.
    pub fn allow(actions: Vec<String>, resources: Vec<CfnValue>) -> Self {
        Self {
            sid: None,
            effect: PolicyEffect::Allow,
            actions,
            principal: None,
            resources,
            condition: None,
        }
    }

    /// A deny statement over the given actions and resources.
    pub fn deny(actions: Vec<String>, resources: Vec<CfnValue>) -> Self {
        Self {
            sid: None,
            effect: PolicyEffect::Deny,
            actions,
            principal: None,
            resources,
            condition: None,
        }
    }

    /// Set the statement id.
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// Set the principal.
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Set the condition block.
    pub fn with_condition(mut self, condition: CfnValue) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Render to the provider's statement object.
    fn to_value(&self) -> CfnValue {
        let mut fields: Vec<(String, CfnValue)> = Vec::new();
        fields.push(("Action".to_string(), one_or_many_strings(&self.actions)));
        if let Some(condition) = &self.condition {
            fields.push(("Condition".to_string(), condition.clone()));
        }
        fields.push((
            "Effect".to_string(),
            CfnValue::string(self.effect.as_str()),
        ));
        if let Some(principal) = &self.principal {
            fields.push(("Principal".to_string(), principal.to_value()));
        }
        if !self.resources.is_empty() {
            fields.push(("Resource".to_string(), one_or_many(&self.resources)));
        }
        if let Some(sid) = &self.sid {
            fields.push(("Sid".to_string(), CfnValue::string(sid.clone())));
        }
        fields.into_iter().collect()
    }
}

/// A policy document: version header plus statement list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyDocument {
    /// The statements, in declaration order.
    pub statements: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// A document from a statement list.
    pub fn new(statements: Vec<PolicyStatement>) -> Self {
        Self { statements }
    }

    /// The trust policy for a role assumable by the given principal.
    pub fn assume_role(principal: Principal) -> Self {
        Self::new(vec![PolicyStatement::allow(
            vec!["sts:AssumeRole".to_string()],
            Vec::new(),
        )
        .with_principal(principal)])
    }

    /// Render to the provider's document object.
    pub fn to_value(&self) -> CfnValue {
        let statements: Vec<CfnValue> =
            self.statements.iter().map(PolicyStatement::to_value).collect();
        [
            ("Statement".to_string(), CfnValue::Array(statements)),
            ("Version".to_string(), CfnValue::string(POLICY_VERSION)),
        ]
        .into_iter()
        .collect()
    }
}

/// An inline policy attached to a role.
#[derive(Debug, Clone, PartialEq)]
pub struct InlinePolicy {
    /// Policy name, unique within the role.
    pub name: String,
    /// The policy document.
    pub document: PolicyDocument,
}

impl InlinePolicy {
    /// An inline policy from a name and document.
    pub fn new(name: impl Into<String>, document: PolicyDocument) -> Self {
        Self {
            name: name.into(),
            document,
        }
    }
}

/// A provider-managed policy, identified by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedPolicy(String);

impl ManagedPolicy {
    /// A managed policy by its catalog name, e.g.
    /// `AmazonSSMManagedInstanceCore`.
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The policy name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The partition-aware attachment ARN.
    pub fn arn(&self) -> CfnValue {
        CfnValue::concat(vec![
            "arn:".into(),
            CfnValue::pseudo(PseudoParameter::Partition),
            format!(":iam::aws:policy/{}", self.0).into(),
        ])
    }
}

/// Specification of an IAM role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSpec {
    /// Service principal allowed to assume the role.
    pub assumed_by: Principal,
    /// Provider-managed policy attachments.
    pub managed_policies: Vec<ManagedPolicy>,
    /// Inline policies scoped to this role.
    pub inline_policies: Vec<InlinePolicy>,
    /// Role description.
    pub description: Option<String>,
}

impl RoleSpec {
    /// A role assumable by the given service, with no permissions yet.
    pub fn assumed_by_service(service: impl Into<String>) -> Self {
        Self {
            assumed_by: Principal::service(service),
            managed_policies: Vec::new(),
            inline_policies: Vec::new(),
            description: None,
        }
    }

    /// Attach a provider-managed policy by name.
    pub fn with_managed_policy(mut self, name: impl Into<String>) -> Self {
        self.managed_policies.push(ManagedPolicy::named(name));
        self
    }

    /// Attach an inline policy.
    pub fn with_inline_policy(mut self, policy: InlinePolicy) -> Self {
        self.inline_policies.push(policy);
        self
    }

    /// Set the role description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lower to an `AWS::IAM::Role` resource.
    pub fn synthesize(&self) -> Resource {
        let mut properties: Vec<(String, CfnValue)> = Vec::new();
        properties.push((
            "AssumeRolePolicyDocument".to_string(),
            PolicyDocument::assume_role(self.assumed_by.clone()).to_value(),
        ));
        if let Some(description) = &self.description {
            properties.push(("Description".to_string(), CfnValue::string(description.clone())));
        }
        if !self.managed_policies.is_empty() {
            let arns: Vec<CfnValue> =
                self.managed_policies.iter().map(ManagedPolicy::arn).collect();
            properties.push(("ManagedPolicyArns".to_string(), CfnValue::Array(arns)));
        }
        if !self.inline_policies.is_empty() {
            let policies: Vec<CfnValue> = self
                .inline_policies
                .iter()
                .map(|p| {
                    [
                        ("PolicyDocument".to_string(), p.document.to_value()),
                        ("PolicyName".to_string(), CfnValue::string(p.name.clone())),
                    ]
                    .into_iter()
                    .collect()
                })
                .collect();
            properties.push(("Policies".to_string(), CfnValue::Array(policies)));
        }
        Resource::new("AWS::IAM::Role", properties.into_iter().collect())
    }
}

/// Scalar when single, list otherwise.
fn one_or_many(values: &[CfnValue]) -> CfnValue {
    if values.len() == 1 {
        values[0].clone()
    } else {
        CfnValue::Array(values.to_vec())
    }
}

fn one_or_many_strings(values: &[String]) -> CfnValue {
    if values.len() == 1 {
        CfnValue::string(values[0].clone())
    } else {
        CfnValue::Array(values.iter().map(|s| CfnValue::string(s.clone())).collect())
    }
}
