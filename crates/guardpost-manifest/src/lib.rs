//! # guardpost-manifest — Compliance Rule Catalogs and Stack Assembly
//!
//! The domain layer of guardpost. It knows which managed rules and
//! automation documents exist, how a rule binds to its remediation, and
//! how a complete stack lowers to a `guardpost-cfn` template:
//!
//! - **Rules** ([`rules`]): The managed-rule catalog — detectors for
//!   open SSH ingress, missing trails, and unversioned buckets.
//!
//! - **Automation** ([`automation`]): The automation-document catalog,
//!   including each document's required and optional parameter interface.
//!
//! - **Bindings** ([`binding`]): [`RuleBinding`] ties one rule to one
//!   document with a retry policy and a typed parameter map.
//!
//! - **Stack** ([`stack`]): [`ComplianceStack`] assembles identity, sink,
//!   and bindings; `standard()` is the built-in three-rule stack and
//!   `synthesize()` lowers any valid stack deterministically.
//!
//! ## Validation
//!
//! [`ComplianceStack::validate`] rejects, before synthesis, the manifests
//! the provisioning API would reject at deploy time: duplicate or
//! malformed binding names, and automatic bindings missing a parameter
//! their document requires.

pub mod automation;
pub mod binding;
pub mod error;
pub mod rules;
pub mod stack;

// Re-export primary types.
pub use automation::{automation_documents, AutomationDocument, AutomationDocumentDefinition};
pub use binding::{ParameterKind, ParameterValue, RetryPolicy, RuleBinding};
pub use error::{ManifestError, ManifestResult};
pub use rules::{managed_rules, ManagedRule, ManagedRuleDefinition};
pub use stack::{
    ComplianceStack, AUTOMATION_SERVICE_PRINCIPAL, DEFAULT_TRAIL_NAME, IDENTITY_LOGICAL_ID,
    SINK_LOGICAL_ID, SINK_POLICY_LOGICAL_ID,
};
