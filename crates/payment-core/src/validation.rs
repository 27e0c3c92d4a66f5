//! Field-level violation collection.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::DomainError;

/// Every field that failed a check, keyed by field name.
///
/// Checks never stop at the first failure. When the same field is reported
/// twice, the first message wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldViolations(BTreeMap<String, String>);

impl FieldViolations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.0.entry(field.into()).or_insert_with(|| message.into());
        self
    }

    /// Record a violation for `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.add(field, message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    /// `Ok(())` when nothing was recorded, a validation failure otherwise.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for FieldViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for FieldViolations
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut violations = Self::new();
        for (field, message) in iter {
            violations.add(field, message);
        }
        violations
    }
}
