//! `SET` clause builder for partial updates.
//!
//! A partial update only touches the fields the caller supplied. The builder
//! turns an ordered [`FieldUpdates`] map into `"col_a"=$1, "col_b"=$2` plus the
//! matching values, ready for `UPDATE <table> SET <fragment> WHERE ...`.

use super::builder::Sql;
use super::fragment::SqlFragment;
use crate::columns::ColumnMap;
use crate::error::{JoblyError, JoblyResult};
use crate::types::SqlValue;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

/// An ordered field → value map.
///
/// Iteration follows insertion order. Setting a field that is already present
/// replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdates {
    entries: Vec<(String, SqlValue)>,
}

impl FieldUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((field, value)),
        }
        self
    }

    /// Consuming counterpart of [`FieldUpdates::set`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for FieldUpdates
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut updates = Self::new();
        for (field, value) in iter {
            updates.set(field, value);
        }
        updates
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for FieldUpdates {
    type Error = JoblyError;

    /// Field order follows the map's iteration order.
    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> JoblyResult<Self> {
        let mut updates = Self::new();
        for (field, value) in map {
            let value = SqlValue::try_from(value)
                .map_err(|e| JoblyError::invalid_input(format!("field '{field}': {e}")))?;
            updates.set(field, value);
        }
        Ok(updates)
    }
}

// Deserializing straight from the document keeps the payload's key order.
impl<'de> Deserialize<'de> for FieldUpdates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UpdatesVisitor;

        impl<'de> Visitor<'de> for UpdatesVisitor {
            type Value = FieldUpdates;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldUpdates, A::Error> {
                let mut updates = FieldUpdates::new();
                while let Some((field, value)) = access.next_entry::<String, SqlValue>()? {
                    updates.set(field, value);
                }
                Ok(updates)
            }
        }

        deserializer.deserialize_map(UpdatesVisitor)
    }
}

/// Build the `SET` fragment for a partial update.
///
/// Entry *i* (1-based, insertion order) renders as `"<column>"=$i`, where the
/// column comes from `columns` (or the field name itself when unmapped).
///
/// Returns [`JoblyError::InvalidInput`] when `updates` is empty.
pub fn build_set_clause(updates: &FieldUpdates, columns: &ColumnMap) -> JoblyResult<SqlFragment> {
    if updates.is_empty() {
        return Err(JoblyError::invalid_input("No data"));
    }

    let mut sql = Sql::empty();
    for (i, (field, value)) in updates.iter().enumerate() {
        if i > 0 {
            sql.push(", ");
        }
        sql.push_column(columns.resolve(field))
            .push("=")
            .push_bind(value.clone());
    }

    let set = sql.into_fragment();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "jobly.sql",
        fragment = %set.fragment,
        param_count = set.values.len(),
        "built SET clause"
    );

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COMPANY: ColumnMap = ColumnMap::new(&[
        ("numEmployees", "num_employees"),
        ("logoUrl", "logo_url"),
    ]);

    #[test]
    fn maps_fields_in_insertion_order() {
        let updates = FieldUpdates::new()
            .with("name", "Aliya Co")
            .with("numEmployees", 32);

        let set = build_set_clause(&updates, &COMPANY).unwrap();
        assert_eq!(set.fragment, r#""name"=$1, "num_employees"=$2"#);
        assert_eq!(set.values, vec![SqlValue::from("Aliya Co"), SqlValue::Int(32)]);
    }

    #[test]
    fn single_field() {
        let updates = FieldUpdates::new().with("logoUrl", "http://c1.img");
        let set = build_set_clause(&updates, &COMPANY).unwrap();
        assert_eq!(set.fragment, r#""logo_url"=$1"#);
        assert_eq!(set.values.len(), 1);
        assert_eq!(set.next_placeholder(), 2);
    }

    #[test]
    fn n_fields_give_n_placeholders() {
        let updates: FieldUpdates = (0..5).map(|i| (format!("f{i}"), i)).collect();
        let set = build_set_clause(&updates, &ColumnMap::EMPTY).unwrap();

        assert_eq!(set.fragment.split(", ").count(), 5);
        assert_eq!(set.values.len(), 5);
        for i in 1..=5 {
            assert!(set.fragment.contains(&format!("\"f{}\"=${}", i - 1, i)));
        }
    }

    #[test]
    fn empty_updates_is_invalid_input() {
        let err = build_set_clause(&FieldUpdates::new(), &COMPANY).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.is_bad_request());
    }

    #[test]
    fn null_and_bool_values_are_bound() {
        let updates = FieldUpdates::new()
            .with("description", SqlValue::Null)
            .with("active", false);
        let set = build_set_clause(&updates, &COMPANY).unwrap();
        assert_eq!(set.fragment, r#""description"=$1, "active"=$2"#);
        assert_eq!(set.values, vec![SqlValue::Null, SqlValue::Bool(false)]);
    }

    #[test]
    fn unmapped_field_is_used_verbatim() {
        let updates = FieldUpdates::new().with("someField", 1);
        let set = build_set_clause(&updates, &COMPANY).unwrap();
        assert_eq!(set.fragment, r#""someField"=$1"#);
    }

    #[test]
    fn repeated_set_replaces_in_place() {
        let mut updates = FieldUpdates::new();
        updates.set("name", "a").set("description", "d").set("name", "b");

        let set = build_set_clause(&updates, &COMPANY).unwrap();
        assert_eq!(set.fragment, r#""name"=$1, "description"=$2"#);
        assert_eq!(set.values[0], SqlValue::from("b"));
    }

    #[test]
    fn is_idempotent() {
        let updates = FieldUpdates::new().with("name", "x").with("numEmployees", 3);
        let a = build_set_clause(&updates, &COMPANY).unwrap();
        let b = build_set_clause(&updates, &COMPANY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn deserialize_keeps_document_order() {
        let updates: FieldUpdates =
            serde_json::from_str(r#"{"numEmployees": 10, "name": "New", "logoUrl": null}"#)
                .unwrap();
        let set = build_set_clause(&updates, &COMPANY).unwrap();
        assert_eq!(set.fragment, r#""num_employees"=$1, "name"=$2, "logo_url"=$3"#);
        assert_eq!(
            set.values,
            vec![SqlValue::Int(10), SqlValue::from("New"), SqlValue::Null]
        );
    }

    #[test]
    fn deserialize_rejects_nested_values() {
        let res: Result<FieldUpdates, _> = serde_json::from_str(r#"{"name": {"first": "x"}}"#);
        assert!(res.is_err());
    }

    #[test]
    fn try_from_json_map() {
        let serde_json::Value::Object(map) = json!({ "name": "x", "numEmployees": 4 }) else {
            unreachable!()
        };
        let updates = FieldUpdates::try_from(map).unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates.get("numEmployees"), Some(&SqlValue::Int(4)));
    }
}
