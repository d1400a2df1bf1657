//! # Compliance Stack Assembly
//!
//! Implements [`ComplianceStack`] — the complete remediation manifest —
//! and its lowering to a template.
//!
//! ```text
//! ComplianceStack
//! ├── identity (RoleSpec)        -> RemediationRole
//! ├── sink (BucketSpec)          -> AuditSink (+ AuditSinkPolicy)
//! └── bindings (RuleBinding ×N)  -> {name}Rule + {name}Remediation
//! ```
//!
//! Every binding's remediation references the single identity (for the
//! automation's assume-role) and, where a parameter asks for it, the sink
//! (by generated bucket name). `validate()` mirrors the provisioning API's
//! deploy-time rejections; `synthesize()` refuses invalid manifests and
//! otherwise lowers deterministically, so re-running it on the same
//! manifest yields byte-identical canonical output.

use std::collections::{BTreeMap, BTreeSet};

use guardpost_cfn::{
    BucketSpec, CfnValue, ConfigRuleSpec, InlinePolicy, PolicyDocument, PolicyStatement,
    PseudoParameter, RemediationParameter, RemediationSpec, RemediationTargetType, RoleSpec,
    Template,
};
use guardpost_core::LogicalId;

use crate::automation::AutomationDocument;
use crate::binding::{ParameterValue, RuleBinding};
use crate::error::{ManifestError, ManifestResult};
use crate::rules::ManagedRule;

/// Logical id of the remediation identity.
pub const IDENTITY_LOGICAL_ID: &str = "RemediationRole";
/// Logical id of the audit log sink.
pub const SINK_LOGICAL_ID: &str = "AuditSink";
/// Logical id of the sink's transport-security policy.
pub const SINK_POLICY_LOGICAL_ID: &str = "AuditSinkPolicy";
/// Name of the trail the built-in stack creates on remediation.
pub const DEFAULT_TRAIL_NAME: &str = "DefaultTrail";

/// The service principal that executes remediation automations.
pub const AUTOMATION_SERVICE_PRINCIPAL: &str = "ssm.amazonaws.com";

/// The complete compliance remediation manifest.
#[derive(Debug, Clone)]
pub struct ComplianceStack {
    /// Template description.
    pub description: Option<String>,
    /// The single identity every remediation executes as.
    pub identity: RoleSpec,
    /// The audit log destination.
    pub sink: BucketSpec,
    /// Rule-to-remediation bindings.
    pub bindings: Vec<RuleBinding>,
}

impl ComplianceStack {
    /// A stack from an identity and sink, with no bindings yet.
    pub fn new(identity: RoleSpec, sink: BucketSpec) -> Self {
        Self {
            description: None,
            identity,
            sink,
            bindings: Vec::new(),
        }
    }

    /// Set the template description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a binding.
    pub fn with_binding(mut self, binding: RuleBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// The built-in stack: one least-privilege remediation identity, one
    /// versioned encrypted TLS-only audit sink, and three bindings —
    /// unrestricted-ingress, missing-trail, and missing-versioning.
    pub fn standard() -> Self {
        let sink_arn = CfnValue::GetAtt {
            logical_id: SINK_LOGICAL_ID.to_string(),
            attribute: "Arn".to_string(),
        };
        let sink_objects_arn = CfnValue::concat(vec![sink_arn.clone(), "/*".into()]);
        let trail_arn = CfnValue::concat(vec![
            "arn:".into(),
            CfnValue::pseudo(PseudoParameter::Partition),
            ":cloudtrail:".into(),
            CfnValue::pseudo(PseudoParameter::Region),
            ":".into(),
            CfnValue::pseudo(PseudoParameter::AccountId),
            format!(":trail/{DEFAULT_TRAIL_NAME}").into(),
        ]);

        // Inline policies scoped to the three remediation actions. The
        // violating security group or bucket is unknowable at declaration
        // time, so those statements narrow the actions and leave the
        // resource open; the trail statement pins the one trail this stack
        // ever manages.
        let identity = RoleSpec::assumed_by_service(AUTOMATION_SERVICE_PRINCIPAL)
            .with_description("Execution role for automatic compliance remediations")
            .with_inline_policy(InlinePolicy::new(
                "RevokeSecurityGroupIngress",
                PolicyDocument::new(vec![PolicyStatement::allow(
                    vec![
                        "ec2:DescribeSecurityGroups".to_string(),
                        "ec2:RevokeSecurityGroupIngress".to_string(),
                    ],
                    vec!["*".into()],
                )]),
            ))
            .with_inline_policy(InlinePolicy::new(
                "ManageDefaultTrail",
                PolicyDocument::new(vec![
                    PolicyStatement::allow(
                        vec![
                            "cloudtrail:CreateTrail".to_string(),
                            "cloudtrail:UpdateTrail".to_string(),
                            "cloudtrail:StartLogging".to_string(),
                            "cloudtrail:GetTrailStatus".to_string(),
                        ],
                        vec![trail_arn],
                    ),
                    PolicyStatement::allow(
                        vec!["s3:GetBucketAcl".to_string(), "s3:PutObject".to_string()],
                        vec![sink_arn, sink_objects_arn],
                    ),
                ]),
            ))
            .with_inline_policy(InlinePolicy::new(
                "ConfigureBucketVersioning",
                PolicyDocument::new(vec![PolicyStatement::allow(
                    vec![
                        "s3:GetBucketVersioning".to_string(),
                        "s3:PutBucketVersioning".to_string(),
                    ],
                    vec!["*".into()],
                )]),
            ));

        let sink = BucketSpec::new().versioned().enforce_tls();

        let ssh = RuleBinding::new(
            "Ssh",
            ManagedRule::IncomingSshDisabled,
            AutomationDocument::DisablePublicAccessForSecurityGroup,
        )
        .with_resource_type("AWS::EC2::SecurityGroup")
        .with_parameter("AutomationAssumeRole", ParameterValue::IdentityArn)
        .with_parameter("GroupId", ParameterValue::ResourceId);

        let trail = RuleBinding::new(
            "Trail",
            ManagedRule::CloudTrailEnabled,
            AutomationDocument::EnableCloudTrail,
        )
        .with_parameter("AutomationAssumeRole", ParameterValue::IdentityArn)
        .with_parameter("TrailName", ParameterValue::literal(DEFAULT_TRAIL_NAME))
        .with_parameter("S3BucketName", ParameterValue::SinkName)
        .with_parameter("IsMultiRegionTrail", ParameterValue::literal("true"))
        .with_parameter("IsLogging", ParameterValue::literal("true"))
        .with_parameter("IncludeGlobalServiceEvents", ParameterValue::literal("true"));

        let versioning = RuleBinding::new(
            "BucketVersioning",
            ManagedRule::S3BucketVersioningEnabled,
            AutomationDocument::ConfigureS3BucketVersioning,
        )
        .with_target_version("1")
        .with_resource_type("AWS::S3::Bucket")
        .with_parameter("AutomationAssumeRole", ParameterValue::IdentityArn)
        .with_parameter("BucketName", ParameterValue::ResourceId)
        .with_parameter("VersioningConfiguration", ParameterValue::literal("Enabled"));

        Self::new(identity, sink)
            .with_description(
                "Auto-remediation compliance stack: managed rules for security group ingress, \
                 CloudTrail coverage, and S3 bucket versioning, with SSM-backed remediation",
            )
            .with_binding(ssh)
            .with_binding(trail)
            .with_binding(versioning)
    }

    /// Check the manifest the way the provisioning API would at deploy
    /// time. Returns every violation found, empty when valid.
    pub fn validate(&self) -> Vec<ManifestError> {
        let mut violations = Vec::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for binding in &self.bindings {
            if binding.name.is_empty()
                || !binding.name.chars().all(|c| c.is_ascii_alphanumeric())
            {
                violations.push(ManifestError::InvalidBindingName {
                    name: binding.name.clone(),
                    reason: "must be non-empty and alphanumeric".to_string(),
                });
                continue;
            }
            // {name}Remediation is the longest id synthesize() derives.
            if let Err(err) = LogicalId::new(format!("{}Remediation", binding.name)) {
                violations.push(ManifestError::InvalidBindingName {
                    name: binding.name.clone(),
                    reason: format!("derived logical id rejected: {err}"),
                });
                continue;
            }
            if !seen.insert(binding.name.as_str()) {
                violations.push(ManifestError::DuplicateBinding {
                    name: binding.name.clone(),
                });
            }
            if binding.automatic {
                for parameter in binding.missing_required_parameters() {
                    violations.push(ManifestError::MissingParameter {
                        binding: binding.name.clone(),
                        parameter: parameter.to_string(),
                        target_id: binding.document.as_str().to_string(),
                    });
                }
            }
            for name in binding.parameters.keys() {
                if !binding.document.knows_parameter(name) {
                    tracing::warn!(
                        binding = %binding.name,
                        parameter = %name,
                        document = %binding.document,
                        "parameter not in the document's known interface"
                    );
                }
            }
        }
        violations
    }

    /// Lower the manifest to a template.
    ///
    /// # Errors
    ///
    /// Returns the first validation violation if the manifest is invalid,
    /// or a synthesis error on logical-id collisions.
    pub fn synthesize(&self) -> ManifestResult<Template> {
        if let Some(violation) = self.validate().into_iter().next() {
            return Err(violation);
        }

        let mut template = Template::new(self.description.clone());
        let identity_id = LogicalId::new(IDENTITY_LOGICAL_ID)?;
        let sink_id = LogicalId::new(SINK_LOGICAL_ID)?;

        template.add_resource(identity_id.clone(), self.identity.synthesize())?;
        template.add_resource(sink_id.clone(), self.sink.synthesize())?;
        if let Some(policy) = self.sink.synthesize_policy(&sink_id) {
            template.add_resource(LogicalId::new(SINK_POLICY_LOGICAL_ID)?, policy)?;
        }

        for binding in &self.bindings {
            let rule_id = LogicalId::new(format!("{}Rule", binding.name))?;
            let remediation_id = LogicalId::new(format!("{}Remediation", binding.name))?;

            let rule = ConfigRuleSpec::managed(binding.rule.as_str());
            template.add_resource(rule_id.clone(), rule.synthesize())?;

            let parameters: BTreeMap<String, RemediationParameter> = binding
                .parameters
                .iter()
                .map(|(name, value)| {
                    (
                        name.clone(),
                        resolve_parameter(value, &identity_id, &sink_id),
                    )
                })
                .collect();
            let remediation = RemediationSpec {
                config_rule_name: CfnValue::reference(&rule_id),
                target_type: RemediationTargetType::SsmDocument,
                target_id: binding.document.as_str().to_string(),
                target_version: binding.target_version.clone(),
                automatic: binding.automatic,
                maximum_automatic_attempts: binding.retry.max_automatic_attempts,
                retry_attempt_seconds: binding.retry.retry_interval_secs,
                resource_type: binding.resource_type.clone(),
                parameters,
            };
            template.add_resource(remediation_id, remediation.synthesize())?;
            tracing::debug!(binding = %binding.name, rule = %binding.rule, "synthesized rule binding");
        }

        Ok(template)
    }
}

/// Resolve a manifest-level parameter to its provider form.
///
/// `IdentityArn` and `SinkName` stay static-kind: the intrinsic resolves
/// once at deploy time, so the automation sees the same value on every
/// invocation.
fn resolve_parameter(
    value: &ParameterValue,
    identity_id: &LogicalId,
    sink_id: &LogicalId,
) -> RemediationParameter {
    match value {
        ParameterValue::Static(values) => RemediationParameter::static_values(
            values.iter().map(|s| CfnValue::string(s.clone())).collect(),
        ),
        ParameterValue::IdentityArn => {
            RemediationParameter::static_value(CfnValue::get_att(identity_id, "Arn"))
        }
        ParameterValue::SinkName => {
            RemediationParameter::static_value(CfnValue::reference(sink_id))
        }
        ParameterValue::ResourceId => RemediationParameter::resource_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn synthesized() -> Value {
        let template = ComplianceStack::standard().synthesize().unwrap();
        template.to_value().unwrap()
    }

    fn remediation_ids() -> [&'static str; 3] {
        ["SshRemediation", "TrailRemediation", "BucketVersioningRemediation"]
    }

    #[test]
    fn standard_stack_validates_cleanly() {
        assert!(ComplianceStack::standard().validate().is_empty());
    }

    #[test]
    fn standard_stack_declares_nine_resources() {
        let v = synthesized();
        let resources = v["Resources"].as_object().unwrap();
        // role + sink + sink policy + 3 rules + 3 remediations
        assert_eq!(resources.len(), 9);
    }

    #[test]
    fn every_remediation_is_automatic_with_standard_retry() {
        let v = synthesized();
        for id in remediation_ids() {
            let props = &v["Resources"][id]["Properties"];
            assert_eq!(props["Automatic"], json!(true), "{id}");
            assert_eq!(props["MaximumAutomaticAttempts"], json!(5), "{id}");
            assert_eq!(props["RetryAttemptSeconds"], json!(60), "{id}");
        }
    }

    #[test]
    fn identity_trusted_by_automation_service() {
        let v = synthesized();
        let trust =
            &v["Resources"][IDENTITY_LOGICAL_ID]["Properties"]["AssumeRolePolicyDocument"];
        assert_eq!(
            trust["Statement"][0]["Principal"]["Service"],
            json!("ssm.amazonaws.com")
        );
        assert_eq!(trust["Statement"][0]["Action"], json!("sts:AssumeRole"));
    }

    #[test]
    fn every_remediation_assumes_the_identity() {
        let v = synthesized();
        let expected = json!({
            "StaticValue": {"Values": [{"Fn::GetAtt": ["RemediationRole", "Arn"]}]}
        });
        for id in remediation_ids() {
            assert_eq!(
                v["Resources"][id]["Properties"]["Parameters"]["AutomationAssumeRole"],
                expected,
                "{id}"
            );
        }
    }

    #[test]
    fn trail_bucket_parameter_references_sink() {
        let v = synthesized();
        assert_eq!(
            v["Resources"]["TrailRemediation"]["Properties"]["Parameters"]["S3BucketName"],
            json!({"StaticValue": {"Values": [{"Ref": "AuditSink"}]}})
        );
    }

    #[test]
    fn sink_declares_versioning_encryption_and_tls_policy() {
        let v = synthesized();
        let sink = &v["Resources"][SINK_LOGICAL_ID];
        assert_eq!(
            sink["Properties"]["VersioningConfiguration"],
            json!({"Status": "Enabled"})
        );
        assert_eq!(
            sink["Properties"]["BucketEncryption"]["ServerSideEncryptionConfiguration"][0]
                ["ServerSideEncryptionByDefault"]["SSEAlgorithm"],
            json!("AES256")
        );
        assert_eq!(sink["DeletionPolicy"], json!("Retain"));

        let stmt = &v["Resources"][SINK_POLICY_LOGICAL_ID]["Properties"]["PolicyDocument"]
            ["Statement"][0];
        assert_eq!(stmt["Effect"], json!("Deny"));
        assert_eq!(
            stmt["Condition"],
            json!({"Bool": {"aws:SecureTransport": "false"}})
        );
    }

    #[test]
    fn resource_reference_parameters_keep_their_kind() {
        let v = synthesized();
        let resource_ref = json!({"ResourceValue": {"Value": "RESOURCE_ID"}});
        assert_eq!(
            v["Resources"]["SshRemediation"]["Properties"]["Parameters"]["GroupId"],
            resource_ref
        );
        assert_eq!(
            v["Resources"]["BucketVersioningRemediation"]["Properties"]["Parameters"]
                ["BucketName"],
            resource_ref
        );
    }

    #[test]
    fn static_parameters_keep_their_kind() {
        let v = synthesized();
        let trail = &v["Resources"]["TrailRemediation"]["Properties"]["Parameters"];
        for name in [
            "TrailName",
            "IsMultiRegionTrail",
            "IsLogging",
            "IncludeGlobalServiceEvents",
        ] {
            assert!(trail[name].get("StaticValue").is_some(), "{name}");
            assert!(trail[name].get("ResourceValue").is_none(), "{name}");
        }
        assert_eq!(
            trail["TrailName"],
            json!({"StaticValue": {"Values": ["DefaultTrail"]}})
        );
        assert_eq!(
            v["Resources"]["BucketVersioningRemediation"]["Properties"]["Parameters"]
                ["VersioningConfiguration"],
            json!({"StaticValue": {"Values": ["Enabled"]}})
        );
    }

    #[test]
    fn remediations_bind_their_rules_by_reference() {
        let v = synthesized();
        for (remediation, rule) in [
            ("SshRemediation", "SshRule"),
            ("TrailRemediation", "TrailRule"),
            ("BucketVersioningRemediation", "BucketVersioningRule"),
        ] {
            assert_eq!(
                v["Resources"][remediation]["Properties"]["ConfigRuleName"],
                json!({"Ref": rule})
            );
        }
    }

    #[test]
    fn rule_source_identifiers_match_catalog() {
        let v = synthesized();
        for (rule_id, source) in [
            ("SshRule", "INCOMING_SSH_DISABLED"),
            ("TrailRule", "CLOUD_TRAIL_ENABLED"),
            ("BucketVersioningRule", "S3_BUCKET_VERSIONING_ENABLED"),
        ] {
            let props = &v["Resources"][rule_id]["Properties"];
            assert_eq!(props["Source"]["Owner"], json!("AWS"));
            assert_eq!(props["Source"]["SourceIdentifier"], json!(source));
        }
    }

    #[test]
    fn resource_types_where_the_original_declares_them() {
        let v = synthesized();
        assert_eq!(
            v["Resources"]["SshRemediation"]["Properties"]["ResourceType"],
            json!("AWS::EC2::SecurityGroup")
        );
        assert_eq!(
            v["Resources"]["BucketVersioningRemediation"]["Properties"]["ResourceType"],
            json!("AWS::S3::Bucket")
        );
        assert!(v["Resources"]["TrailRemediation"]["Properties"]
            .get("ResourceType")
            .is_none());
    }

    #[test]
    fn only_bucket_versioning_pins_a_target_version() {
        let v = synthesized();
        assert_eq!(
            v["Resources"]["BucketVersioningRemediation"]["Properties"]["TargetVersion"],
            json!("1")
        );
        for id in ["SshRemediation", "TrailRemediation"] {
            assert!(v["Resources"][id]["Properties"].get("TargetVersion").is_none());
        }
    }

    #[test]
    fn synthesis_is_byte_identical_across_runs() {
        let a = ComplianceStack::standard()
            .synthesize()
            .unwrap()
            .to_canonical_bytes()
            .unwrap();
        let b = ComplianceStack::standard()
            .synthesize()
            .unwrap()
            .to_canonical_bytes()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn identity_carries_no_managed_policies() {
        let stack = ComplianceStack::standard();
        assert!(stack.identity.managed_policies.is_empty());
        let v = synthesized();
        assert!(v["Resources"][IDENTITY_LOGICAL_ID]["Properties"]
            .get("ManagedPolicyArns")
            .is_none());
    }

    #[test]
    fn inline_policies_cover_exactly_the_remediation_actions() {
        let v = synthesized();
        let policies = v["Resources"][IDENTITY_LOGICAL_ID]["Properties"]["Policies"]
            .as_array()
            .unwrap();
        assert_eq!(policies.len(), 3);
        let names: Vec<&str> = policies
            .iter()
            .map(|p| p["PolicyName"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "RevokeSecurityGroupIngress",
                "ManageDefaultTrail",
                "ConfigureBucketVersioning"
            ]
        );
        // The trail statement is pinned to the one trail this stack manages.
        let trail_stmt = &policies[1]["PolicyDocument"]["Statement"][0];
        let joined = serde_json::to_string(&trail_stmt["Resource"]).unwrap();
        assert!(joined.contains("trail/DefaultTrail"));
        assert!(joined.contains("AWS::Partition"));
    }

    #[test]
    fn automatic_binding_missing_required_parameter_rejected() {
        let stack = ComplianceStack::new(
            RoleSpec::assumed_by_service(AUTOMATION_SERVICE_PRINCIPAL),
            BucketSpec::new(),
        )
        .with_binding(RuleBinding::new(
            "Trail",
            ManagedRule::CloudTrailEnabled,
            AutomationDocument::EnableCloudTrail,
        ));
        let violations = stack.validate();
        assert!(violations
            .iter()
            .any(|v| matches!(v, ManifestError::MissingParameter { parameter, .. } if parameter == "TrailName")));
        assert!(stack.synthesize().is_err());
    }

    #[test]
    fn non_automatic_binding_may_omit_parameters() {
        let mut binding = RuleBinding::new(
            "Trail",
            ManagedRule::CloudTrailEnabled,
            AutomationDocument::EnableCloudTrail,
        );
        binding.automatic = false;
        let stack = ComplianceStack::new(
            RoleSpec::assumed_by_service(AUTOMATION_SERVICE_PRINCIPAL),
            BucketSpec::new(),
        )
        .with_binding(binding);
        assert!(stack.validate().is_empty());
    }

    #[test]
    fn duplicate_binding_names_rejected() {
        let make = || {
            RuleBinding::new(
                "Ssh",
                ManagedRule::IncomingSshDisabled,
                AutomationDocument::DisablePublicAccessForSecurityGroup,
            )
            .with_parameter("GroupId", ParameterValue::ResourceId)
        };
        let stack = ComplianceStack::new(
            RoleSpec::assumed_by_service(AUTOMATION_SERVICE_PRINCIPAL),
            BucketSpec::new(),
        )
        .with_binding(make())
        .with_binding(make());
        let violations = stack.validate();
        assert!(violations
            .iter()
            .any(|v| matches!(v, ManifestError::DuplicateBinding { name } if name == "Ssh")));
    }

    #[test]
    fn invalid_binding_name_rejected() {
        let binding = RuleBinding::new(
            "bad name",
            ManagedRule::IncomingSshDisabled,
            AutomationDocument::DisablePublicAccessForSecurityGroup,
        )
        .with_parameter("GroupId", ParameterValue::ResourceId);
        let stack = ComplianceStack::new(
            RoleSpec::assumed_by_service(AUTOMATION_SERVICE_PRINCIPAL),
            BucketSpec::new(),
        )
        .with_binding(binding);
        let violations = stack.validate();
        assert!(violations
            .iter()
            .any(|v| matches!(v, ManifestError::InvalidBindingName { .. })));
    }

    #[test]
    fn overlong_binding_name_rejected_by_validate() {
        // 250 + "Remediation" breaches the 255-character id cap; the
        // violation must surface in validate(), not only in synthesize().
        let binding = RuleBinding::new(
            "A".repeat(250),
            ManagedRule::IncomingSshDisabled,
            AutomationDocument::DisablePublicAccessForSecurityGroup,
        )
        .with_parameter("GroupId", ParameterValue::ResourceId);
        let stack = ComplianceStack::new(
            RoleSpec::assumed_by_service(AUTOMATION_SERVICE_PRINCIPAL),
            BucketSpec::new(),
        )
        .with_binding(binding);
        let violations = stack.validate();
        assert!(violations
            .iter()
            .any(|v| matches!(v, ManifestError::InvalidBindingName { .. })));
        assert!(matches!(
            stack.synthesize(),
            Err(ManifestError::InvalidBindingName { .. })
        ));
    }

    #[test]
    fn binding_name_at_derived_id_cap_accepted() {
        // 244 + "Remediation" is exactly 255 characters.
        let binding = RuleBinding::new(
            "A".repeat(244),
            ManagedRule::IncomingSshDisabled,
            AutomationDocument::DisablePublicAccessForSecurityGroup,
        )
        .with_parameter("GroupId", ParameterValue::ResourceId);
        let stack = ComplianceStack::new(
            RoleSpec::assumed_by_service(AUTOMATION_SERVICE_PRINCIPAL),
            BucketSpec::new(),
        )
        .with_binding(binding);
        assert!(stack.validate().is_empty());
        assert!(stack.synthesize().is_ok());
    }

    #[test]
    fn template_format_version_declared() {
        let v = synthesized();
        assert_eq!(v["AWSTemplateFormatVersion"], json!("2010-09-09"));
    }
}
