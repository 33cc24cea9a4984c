//! Field-name to column-name mapping.
//!
//! API payloads use camelCase field names (`numEmployees`) while the schema uses
//! snake_case columns (`num_employees`). A [`ColumnMap`] is a static table of the
//! names that differ; anything not listed maps to itself.
//!
//! # Example
//!
//! ```ignore
//! use jobly::ColumnMap;
//!
//! const COMPANY: ColumnMap = ColumnMap::new(&[
//!     ("numEmployees", "num_employees"),
//!     ("logoUrl", "logo_url"),
//! ]);
//!
//! assert_eq!(COMPANY.resolve("numEmployees"), "num_employees");
//! assert_eq!(COMPANY.resolve("name"), "name");
//! ```

/// A static mapping from external field identifiers to physical column names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: &'static [(&'static str, &'static str)],
}

impl ColumnMap {
    /// A map with no entries: every field resolves to itself.
    pub const EMPTY: ColumnMap = ColumnMap { entries: &[] };

    /// Create a map from `(field, column)` pairs.
    ///
    /// If a field appears more than once, the first pair wins.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Column name for `field`, or `field` itself when unmapped.
    pub fn resolve<'a>(&self, field: &'a str) -> &'a str {
        self.get(field).unwrap_or(field)
    }

    /// Column name for `field`, only if it is mapped.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, column)| *column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve `field` through `columns`, falling back to `field` verbatim.
pub fn resolve<'a>(field: &'a str, columns: &ColumnMap) -> &'a str {
    columns.resolve(field)
}
