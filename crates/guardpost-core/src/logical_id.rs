//! # Logical Resource Identifiers
//!
//! Newtype for CloudFormation logical IDs — the template-local names
//! resources are declared under and referenced by (`Ref` / `Fn::GetAtt`).
//!
//! ## Validation
//!
//! A [`LogicalId`] is validated at construction: non-empty, at most 255
//! characters, strictly ASCII alphanumeric. That is the provider's rule,
//! and enforcing it here means a synthesized template can never carry a
//! name the provisioning API would reject.

use serde::{Deserialize, Serialize};

use crate::error::LogicalIdError;

// -- Validating Deserialize for LogicalId -------------------------------------

impl<'de> Deserialize<'de> for LogicalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A CloudFormation logical resource identifier.
///
/// # Validation
///
/// Non-empty, ASCII alphanumeric, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LogicalId(String);

impl LogicalId {
    /// Create a logical id from a string, validating the provider's rules.
    ///
    /// # Errors
    ///
    /// Returns [`LogicalIdError::Empty`], [`LogicalIdError::TooLong`], or
    /// [`LogicalIdError::InvalidCharacter`] on rule violations.
    pub fn new(value: impl Into<String>) -> Result<Self, LogicalIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(LogicalIdError::Empty);
        }
        if value.len() > 255 {
            return Err(LogicalIdError::TooLong {
                length: value.len(),
            });
        }
        if let Some(ch) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(LogicalIdError::InvalidCharacter { id: value, ch });
        }
        Ok(Self(value))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogicalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
