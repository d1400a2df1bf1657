//! # guardpost-schema — Template Contract Validation
//!
//! Runtime JSON Schema validation for synthesized templates against the
//! contracts in the repository's `schemas/` directory.
//!
//! ## Responsibilities
//!
//! - **Envelope validation:** Format version, logical-id grammar, and
//!   resource/output shape via `template.schema.json` (Draft 2020-12).
//!
//! - **Resource contracts:** Each resource is checked against the schema
//!   for its `Type` — rules, remediation configurations, roles, buckets,
//!   and bucket policies. The remediation contract pins the parameter-kind
//!   shapes (`StaticValue` vs `ResourceValue`) and the retry bounds.
//!
//! ## Design
//!
//! [`SchemaValidator`] loads all `*.schema.json` files at construction,
//! builds a URI → schema map for `$ref` resolution via the `jsonschema`
//! crate's `Retrieve` trait, and aggregates violations across the
//! envelope and every resource into one structured error. Validation is
//! fully offline.

pub mod validate;

// Re-export primary types.
pub use validate::{
    schema_for_resource_type, SchemaValidationError, SchemaValidator, TemplateReport,
    ValidationViolations, Violation, TEMPLATE_SCHEMA,
};
