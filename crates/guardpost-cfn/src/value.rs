//! # Template Values — Literals and Intrinsics
//!
//! Defines [`CfnValue`], the value type for resource properties. A property
//! is either a literal (string, integer, bool, array, object) or a
//! late-bound intrinsic the provider resolves at deploy time: `Ref`,
//! `Fn::GetAtt`, or `Fn::Join`. Pseudo-parameters (`AWS::Partition`,
//! `AWS::Region`, `AWS::AccountId`) are `Ref`s to provider-defined names.
//!
//! ## Wire Shapes
//!
//! Serialization produces exactly the JSON forms the provisioning API
//! accepts:
//!
//! ```text
//! Ref     -> {"Ref": "LogicalName"}
//! GetAtt  -> {"Fn::GetAtt": ["LogicalName", "Attribute"]}
//! Join    -> {"Fn::Join": ["<delim>", [part, part, ...]]}
//! ```
//!
//! Objects use `BTreeMap` so property output is deterministic before
//! canonicalization ever runs.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use guardpost_core::LogicalId;

/// Provider-defined pseudo-parameters, referenced like logical ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoParameter {
    /// `AWS::Partition` — `aws`, `aws-cn`, or `aws-us-gov`.
    Partition,
    /// `AWS::Region` — the deployment region.
    Region,
    /// `AWS::AccountId` — the deployment account.
    AccountId,
}

impl PseudoParameter {
    /// Returns the provider's reference name for this pseudo-parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Partition => "AWS::Partition",
            Self::Region => "AWS::Region",
            Self::AccountId => "AWS::AccountId",
        }
    }
}

impl std::fmt::Display for PseudoParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource property value: literal or late-bound intrinsic.
#[derive(Debug, Clone, PartialEq)]
pub enum CfnValue {
    /// Literal string.
    String(String),
    /// Literal integer. Floats never appear in this model.
    Integer(i64),
    /// Literal boolean.
    Bool(bool),
    /// Ordered list of values.
    Array(Vec<CfnValue>),
    /// Object with deterministic key order.
    Object(BTreeMap<String, CfnValue>),
    /// `{"Ref": name}` — reference to a logical id or pseudo-parameter.
    Ref(String),
    /// `{"Fn::GetAtt": [id, attribute]}` — deploy-time resource attribute.
    GetAtt {
        /// Logical id of the referenced resource.
        logical_id: String,
        /// Attribute name, e.g. `Arn`.
        attribute: String,
    },
    /// `{"Fn::Join": [delimiter, parts]}` — deploy-time concatenation.
    Join {
        /// Separator inserted between parts.
        delimiter: String,
        /// Parts to concatenate; may themselves be intrinsics.
        parts: Vec<CfnValue>,
    },
}

impl CfnValue {
    /// Literal string value.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// `Ref` to a resource by logical id.
    pub fn reference(id: &LogicalId) -> Self {
        Self::Ref(id.as_str().to_string())
    }

    /// `Ref` to a pseudo-parameter.
    pub fn pseudo(p: PseudoParameter) -> Self {
        Self::Ref(p.as_str().to_string())
    }

    /// `Fn::GetAtt` on a resource attribute.
    pub fn get_att(id: &LogicalId, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            logical_id: id.as_str().to_string(),
            attribute: attribute.into(),
        }
    }

    /// `Fn::Join` with an explicit delimiter.
    pub fn join(delimiter: impl Into<String>, parts: Vec<CfnValue>) -> Self {
        Self::Join {
            delimiter: delimiter.into(),
            parts,
        }
    }

    /// `Fn::Join` with the empty delimiter — plain concatenation.
    pub fn concat(parts: Vec<CfnValue>) -> Self {
        Self::join("", parts)
    }

    /// Render to the provider's JSON form.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(i) => json!(i),
            Self::Bool(b) => Value::Bool(*b),
            Self::Array(items) => Value::Array(items.iter().map(CfnValue::to_json).collect()),
            Self::Object(map) => {
                let obj: serde_json::Map<String, Value> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect();
                Value::Object(obj)
            }
            Self::Ref(name) => json!({ "Ref": name }),
            Self::GetAtt {
                logical_id,
                attribute,
            } => json!({ "Fn::GetAtt": [logical_id, attribute] }),
            Self::Join { delimiter, parts } => {
                let rendered: Vec<Value> = parts.iter().map(CfnValue::to_json).collect();
                json!({ "Fn::Join": [delimiter, rendered] })
            }
        }
    }
}

impl Serialize for CfnValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for CfnValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for CfnValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for CfnValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u32> for CfnValue {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<bool> for CfnValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<CfnValue>> for CfnValue {
    fn from(items: Vec<CfnValue>) -> Self {
        Self::Array(items)
    }
}

impl FromIterator<(String, CfnValue)> for CfnValue {
    fn from_iter<I: IntoIterator<Item = (String, CfnValue)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> LogicalId {
        LogicalId::new(s).unwrap()
    }

    #[test]
    fn ref_wire_shape() {
        let v = CfnValue::reference(&id("AuditSink"));
        assert_eq!(v.to_json(), json!({"Ref": "AuditSink"}));
    }

    #[test]
    fn pseudo_wire_shape() {
        let v = CfnValue::pseudo(PseudoParameter::Partition);
        assert_eq!(v.to_json(), json!({"Ref": "AWS::Partition"}));
    }

    #[test]
    fn get_att_wire_shape() {
        let v = CfnValue::get_att(&id("RemediationRole"), "Arn");
        assert_eq!(v.to_json(), json!({"Fn::GetAtt": ["RemediationRole", "Arn"]}));
    }

    #[test]
    fn join_wire_shape() {
        let v = CfnValue::concat(vec![
            "arn:".into(),
            CfnValue::pseudo(PseudoParameter::Partition),
            ":iam::aws:policy/AmazonSSMManagedInstanceCore".into(),
        ]);
        assert_eq!(
            v.to_json(),
            json!({"Fn::Join": ["", [
                "arn:",
                {"Ref": "AWS::Partition"},
                ":iam::aws:policy/AmazonSSMManagedInstanceCore"
            ]]})
        );
    }

    #[test]
    fn nested_join_in_get_att() {
        let v = CfnValue::concat(vec![
            CfnValue::get_att(&id("AuditSink"), "Arn"),
            "/*".into(),
        ]);
        assert_eq!(
            v.to_json(),
            json!({"Fn::Join": ["", [{"Fn::GetAtt": ["AuditSink", "Arn"]}, "/*"]]})
        );
    }

    #[test]
    fn object_keys_deterministic() {
        let v: CfnValue = [
            ("Zebra".to_string(), CfnValue::from(1i64)),
            ("Alpha".to_string(), CfnValue::from(2i64)),
        ]
        .into_iter()
        .collect();
        let rendered = serde_json::to_string(&v).unwrap();
        assert_eq!(rendered, r#"{"Alpha":2,"Zebra":1}"#);
    }

    #[test]
    fn integer_stays_integer() {
        let v = CfnValue::from(60u32);
        assert_eq!(serde_json::to_string(&v).unwrap(), "60");
    }

    #[test]
    fn serialize_matches_to_json() {
        let v = CfnValue::join(
            ":",
            vec!["a".into(), CfnValue::pseudo(PseudoParameter::Region)],
        );
        let direct = serde_json::to_value(&v).unwrap();
        assert_eq!(direct, v.to_json());
    }
}
