//! Equality query filters.
//!
//! A [`QueryFilter`] is a set of `field = value` constraints handed to the
//! document store. Tenant and branch scoping work by merging constraints into
//! a caller-supplied filter, so the representation is a sorted map: merging
//! the same field twice keeps one entry and the result does not depend on
//! merge order across different fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field that binds a document to an organization.
pub const ORGANIZATION_ID: &str = "organization_id";
/// Field that binds a document to a branch.
pub const BRANCH_ID: &str = "branch_id";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryFilter(BTreeMap<String, Value>);

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the constraint on `field`.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Constraints from `other` win on conflicting fields.
    #[must_use]
    pub fn merge(mut self, other: QueryFilter) -> Self {
        self.0.extend(other.0);
        self
    }

    /// True when every constraint equals the matching top-level field of `doc`.
    /// A `null` constraint needs the field present and null, the same as
    /// jsonb containment; a missing field never matches.
    pub fn matches(&self, doc: &Value) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone().into_iter().collect())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryFilter
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
