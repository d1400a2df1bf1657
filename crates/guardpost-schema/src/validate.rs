//! # Template Schema Validation
//!
//! Runtime validation of synthesized templates against the JSON Schema
//! contracts (Draft 2020-12) in the repository's `schemas/` directory.
//!
//! ## What Gets Checked
//!
//! [`SchemaValidator::validate_template`] runs two layers:
//!
//! 1. The envelope — format version, resource map, logical-id grammar —
//!    against `template.schema.json`.
//! 2. Each resource against the contract for its `Type`, where one
//!    exists ([`schema_for_resource_type`]). Resources of types guardpost
//!    has no contract for are reported, not failed.
//!
//! ## Schema Resolution
//!
//! All schemas use `$id` URIs of the form
//! `https://schemas.guardpost.dev/<filename>`, and cross-schema `$ref`
//! URIs use the same pattern (the resource-type contracts all reference
//! `template.schema.json` and `intrinsic.schema.json`). A local
//! retriever resolves these against the loaded registry so validation
//! never touches the network.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

/// URI prefix shared by every schema `$id` in this repository.
const SCHEMA_URI_PREFIX: &str = "https://schemas.guardpost.dev/";

/// Filename of the envelope schema.
pub const TEMPLATE_SCHEMA: &str = "template.schema.json";

/// The contract schema for a resource type, if guardpost defines one.
pub fn schema_for_resource_type(resource_type: &str) -> Option<&'static str> {
    match resource_type {
        "AWS::Config::ConfigRule" => Some("config-rule.schema.json"),
        "AWS::Config::RemediationConfiguration" => Some("remediation-configuration.schema.json"),
        "AWS::IAM::Role" => Some("iam-role.schema.json"),
        "AWS::S3::Bucket" => Some("s3-bucket.schema.json"),
        "AWS::S3::BucketPolicy" => Some("s3-bucket-policy.schema.json"),
        _ => None,
    }
}

/// Local retriever that resolves `$ref` URIs to schemas loaded in memory.
///
/// All references resolve locally from the loaded registry; nothing is
/// fetched over the network.
struct LocalSchemaRetriever {
    /// Map from URI string to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Fall back to the filename under the canonical prefix, then the
        // bare filename.
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        let prefixed = format!("{SCHEMA_URI_PREFIX}{filename}");
        if let Some(value) = self.schemas_by_uri.get(&prefixed) {
            return Ok(value.clone());
        }
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        // Unresolved URIs (draft metaschemas and the like) get a
        // permissive schema so validation proceeds without the network.
        Ok(serde_json::json!({}))
    }
}

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error reading schema or document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Vec<Violation>> for ValidationViolations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Summary of a successful template validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReport {
    /// Resources checked against a type contract.
    pub resources_checked: usize,
    /// Resources whose type has no contract, as `LogicalId (Type)`.
    pub unrecognized: Vec<String>,
}

/// A schema validator backed by the `jsonschema` crate.
///
/// Loads every `*.schema.json` file from the given directory at
/// construction, registers the set for `$ref` resolution, and validates
/// documents against named schemas. Compiled validators are `Send + Sync`;
/// loading happens once.
#[derive(Debug)]
pub struct SchemaValidator {
    /// Root directory containing JSON schema files.
    schema_dir: PathBuf,
    /// Map from schema filename to parsed JSON value.
    schemas: HashMap<String, Value>,
}

impl SchemaValidator {
    /// Create a validator by loading all schemas from the given directory.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the directory
    /// cannot be read or any schema file is not valid JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_dir.display().to_string(),
                reason: format!("cannot read schema directory: {e}"),
            }
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.ends_with(".schema.json") {
                    let content = std::fs::read_to_string(&path)?;
                    let value: Value = serde_json::from_str(&content).map_err(|e| {
                        SchemaValidationError::SchemaLoadError {
                            schema_name: name.to_string(),
                            reason: format!("invalid JSON: {e}"),
                        }
                    })?;
                    schemas.insert(name.to_string(), value);
                }
            }
        }

        Ok(Self { schema_dir, schemas })
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Build `ValidationOptions` with every loaded schema registered, so
    /// cross-schema `$ref` URIs resolve from the registry.
    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &self.schemas {
            schemas_by_uri.insert(format!("{SCHEMA_URI_PREFIX}{filename}"), value.clone());
            if let Some(id_str) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id_str.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }

        let retriever = LocalSchemaRetriever { schemas_by_uri };
        opts.with_retriever(retriever);

        opts
    }

    /// Build a compiled `Validator` for a schema by filename.
    ///
    /// # Errors
    ///
    /// Returns `SchemaLoadError` if the schema is not loaded, or
    /// `ValidatorBuildError` if it does not compile.
    pub fn build_validator(&self, schema_name: &str) -> Result<Validator, SchemaValidationError> {
        let schema_value = self.schemas.get(schema_name).ok_or_else(|| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.to_string(),
                reason: format!("schema not found in {}", self.schema_dir.display()),
            }
        })?;

        let opts = self.build_options();
        opts.build(schema_value)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Validate a parsed JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` with structured violation details if the
    /// document is invalid.
    pub fn validate_document(
        &self,
        instance: &Value,
        schema_name: &str,
    ) -> Result<(), SchemaValidationError> {
        let validator = self.build_validator(schema_name)?;

        let errors: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: schema_name.to_string(),
                violations: errors.into(),
            })
        }
    }

    /// Validate a full template: envelope first, then each resource
    /// against the contract for its `Type`.
    ///
    /// Violations from all layers are aggregated into one error, with
    /// resource-level instance paths rebased to `/Resources/<id>`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` carrying every violation found, or a
    /// load/build error if a contract schema is missing or broken.
    pub fn validate_template(
        &self,
        template: &Value,
    ) -> Result<TemplateReport, SchemaValidationError> {
        let mut all: Vec<Violation> = Vec::new();

        let envelope = self.build_validator(TEMPLATE_SCHEMA)?;
        all.extend(envelope.iter_errors(template).map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        }));

        let mut resources_checked = 0usize;
        let mut unrecognized = Vec::new();
        if let Some(resources) = template.get("Resources").and_then(|r| r.as_object()) {
            for (id, resource) in resources {
                // Resources without a Type string are already flagged by
                // the envelope pass.
                let Some(type_str) = resource.get("Type").and_then(|t| t.as_str()) else {
                    continue;
                };
                match schema_for_resource_type(type_str) {
                    Some(schema_name) => {
                        let validator = self.build_validator(schema_name)?;
                        all.extend(validator.iter_errors(resource).map(|e| Violation {
                            instance_path: format!("/Resources/{id}{}", e.instance_path),
                            schema_path: e.schema_path.to_string(),
                            message: e.to_string(),
                        }));
                        resources_checked += 1;
                    }
                    None => unrecognized.push(format!("{id} ({type_str})")),
                }
            }
        }

        if all.is_empty() {
            Ok(TemplateReport {
                resources_checked,
                unrecognized,
            })
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: TEMPLATE_SCHEMA.to_string(),
                violations: all.into(),
            })
        }
    }

    /// Validate a template loaded from a JSON or YAML file.
    ///
    /// The format is determined by extension: `.yaml`/`.yml` parse as
    /// YAML and are converted to JSON; everything else parses as JSON.
    pub fn validate_template_file(
        &self,
        document_path: &Path,
    ) -> Result<TemplateReport, SchemaValidationError> {
        let content = std::fs::read_to_string(document_path).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: document_path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;

        let ext = document_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let json_value = match ext {
            "yaml" | "yml" => {
                let yaml_value: serde_yaml::Value =
                    serde_yaml::from_str(&content).map_err(|e| {
                        SchemaValidationError::DocumentLoadError {
                            path: document_path.display().to_string(),
                            reason: format!("invalid YAML: {e}"),
                        }
                    })?;
                yaml_to_json_value(&yaml_value).map_err(|e| {
                    SchemaValidationError::DocumentLoadError {
                        path: document_path.display().to_string(),
                        reason: format!("YAML-to-JSON conversion failed: {e}"),
                    }
                })?
            }
            _ => serde_json::from_str(&content).map_err(|e| {
                SchemaValidationError::DocumentLoadError {
                    path: document_path.display().to_string(),
                    reason: format!("invalid JSON: {e}"),
                }
            })?,
        };

        self.validate_template(&json_value)
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Templates use only the JSON-compatible subset of YAML, so tags are
/// ignored and non-string map keys are stringified where possible.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardpost_manifest::ComplianceStack;
    use serde_json::json;

    fn schema_dir() -> PathBuf {
        // crates/guardpost-schema -> repo root -> schemas/
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop();
        dir.pop();
        dir.join("schemas")
    }

    fn validator() -> SchemaValidator {
        SchemaValidator::new(schema_dir()).unwrap()
    }

    fn minimal_remediation() -> Value {
        json!({
            "Type": "AWS::Config::RemediationConfiguration",
            "Properties": {
                "Automatic": true,
                "ConfigRuleName": {"Ref": "SshRule"},
                "MaximumAutomaticAttempts": 5,
                "RetryAttemptSeconds": 60,
                "TargetId": "AWS-DisablePublicAccessForSecurityGroup",
                "TargetType": "SSM_DOCUMENT",
                "Parameters": {
                    "GroupId": {"ResourceValue": {"Value": "RESOURCE_ID"}}
                }
            }
        })
    }

    #[test]
    fn loads_all_contract_schemas() {
        let v = validator();
        assert_eq!(v.schema_count(), 7);
        let names = v.schema_names();
        assert!(names.contains(&"template.schema.json"));
        assert!(names.contains(&"intrinsic.schema.json"));
        assert!(names.contains(&"remediation-configuration.schema.json"));
    }

    #[test]
    fn all_schemas_compile_to_validators() {
        let v = validator();
        let mut failures = Vec::new();
        for name in v.schema_names() {
            if let Err(e) = v.build_validator(name) {
                failures.push(format!("{name}: {e}"));
            }
        }
        assert!(
            failures.is_empty(),
            "failed to compile validators:\n{}",
            failures.join("\n")
        );
    }

    #[test]
    fn cross_schema_refs_resolve() {
        // s3-bucket-policy references the policy-document grammar defined
        // in iam-role.schema.json, which in turn references intrinsic.
        let v = validator();
        assert!(v.build_validator("s3-bucket-policy.schema.json").is_ok());
    }

    #[test]
    fn standard_stack_template_passes() {
        let template = ComplianceStack::standard().synthesize().unwrap();
        let value = template.to_value().unwrap();
        let report = validator().validate_template(&value).unwrap();
        assert_eq!(report.resources_checked, 9);
        assert!(report.unrecognized.is_empty());
    }

    #[test]
    fn envelope_requires_format_version() {
        let doc = json!({
            "Resources": {"Sink": {"Type": "AWS::S3::Bucket", "Properties": {
                "BucketEncryption": {"ServerSideEncryptionConfiguration": [
                    {"ServerSideEncryptionByDefault": {"SSEAlgorithm": "AES256"}}
                ]}
            }}}
        });
        let err = validator().validate_template(&doc).unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed { violations, .. } => {
                assert!(violations
                    .violations()
                    .iter()
                    .any(|v| v.message.contains("AWSTemplateFormatVersion")));
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn envelope_rejects_non_alphanumeric_logical_ids() {
        let doc = json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Resources": {
                "bad-id": {"Type": "AWS::S3::Bucket", "Properties": {
                    "BucketEncryption": {"ServerSideEncryptionConfiguration": [
                        {"ServerSideEncryptionByDefault": {"SSEAlgorithm": "AES256"}}
                    ]}
                }}
            }
        });
        assert!(validator().validate_template(&doc).is_err());
    }

    #[test]
    fn remediation_contract_accepts_minimal_resource() {
        validator()
            .validate_document(&minimal_remediation(), "remediation-configuration.schema.json")
            .unwrap();
    }

    #[test]
    fn parameter_cannot_be_both_kinds() {
        let mut doc = minimal_remediation();
        doc["Properties"]["Parameters"]["GroupId"] = json!({
            "StaticValue": {"Values": ["sg-123"]},
            "ResourceValue": {"Value": "RESOURCE_ID"}
        });
        let err = validator()
            .validate_document(&doc, "remediation-configuration.schema.json")
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaValidationError::ValidationFailed { .. }
        ));
    }

    #[test]
    fn retry_bounds_enforced() {
        for (attempts, seconds) in [(0, 60), (26, 60), (5, 0), (5, 2678401)] {
            let mut doc = minimal_remediation();
            doc["Properties"]["MaximumAutomaticAttempts"] = json!(attempts);
            doc["Properties"]["RetryAttemptSeconds"] = json!(seconds);
            assert!(
                validator()
                    .validate_document(&doc, "remediation-configuration.schema.json")
                    .is_err(),
                "attempts={attempts} seconds={seconds} should be out of bounds"
            );
        }
    }

    #[test]
    fn automatic_remediation_requires_retry_policy() {
        let mut doc = minimal_remediation();
        let props = doc["Properties"].as_object_mut().unwrap();
        props.remove("MaximumAutomaticAttempts");
        props.remove("RetryAttemptSeconds");
        assert!(validator()
            .validate_document(&doc, "remediation-configuration.schema.json")
            .is_err());
    }

    #[test]
    fn resource_reference_value_is_pinned() {
        let mut doc = minimal_remediation();
        doc["Properties"]["Parameters"]["GroupId"] =
            json!({"ResourceValue": {"Value": "SOMETHING_ELSE"}});
        assert!(validator()
            .validate_document(&doc, "remediation-configuration.schema.json")
            .is_err());
    }

    #[test]
    fn unknown_resource_types_reported_not_failed() {
        let doc = json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Resources": {
                "Queue": {"Type": "AWS::SQS::Queue", "Properties": {}}
            }
        });
        let report = validator().validate_template(&doc).unwrap();
        assert_eq!(report.resources_checked, 0);
        assert_eq!(report.unrecognized, vec!["Queue (AWS::SQS::Queue)".to_string()]);
    }

    #[test]
    fn resource_violations_rebased_under_resources() {
        let mut resource = minimal_remediation();
        resource["Properties"]["TargetType"] = json!("LAMBDA");
        let doc = json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Resources": {"SshRemediation": resource}
        });
        let err = validator().validate_template(&doc).unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed { violations, .. } => {
                assert!(violations
                    .violations()
                    .iter()
                    .any(|v| v.instance_path.starts_with("/Resources/SshRemediation")));
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn missing_schema_reports_load_error() {
        let err = validator()
            .validate_document(&json!({}), "nonexistent.schema.json")
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaValidationError::SchemaLoadError { .. }
        ));
    }

    #[test]
    fn yaml_to_json_conversion() {
        let yaml_str = r#"
AWSTemplateFormatVersion: "2010-09-09"
Resources:
  Sink:
    Type: AWS::S3::Bucket
    Properties:
      BucketEncryption:
        ServerSideEncryptionConfiguration:
          - ServerSideEncryptionByDefault:
              SSEAlgorithm: AES256
"#;
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let json_value = yaml_to_json_value(&yaml_value).unwrap();
        assert_eq!(json_value["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(json_value["Resources"]["Sink"]["Type"], "AWS::S3::Bucket");
        validator().validate_template(&json_value).unwrap();
    }

    #[test]
    fn violation_display_includes_path() {
        let v = Violation {
            instance_path: "/Resources/SshRemediation/Properties/TargetType".to_string(),
            schema_path: "/properties/Properties/properties/TargetType/const".to_string(),
            message: r#""LAMBDA" is not equal to the constant "SSM_DOCUMENT""#.to_string(),
        };
        assert!(v.to_string().contains("/Resources/SshRemediation"));

        let root = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""Resources" is a required property"#.to_string(),
        };
        assert!(root.to_string().contains("(root)"));
    }
}
