//! Columnar attribute storage for the active population
//!
//! The attribute table is the authoritative per-member state within one
//! replicate. Each attribute is a typed column, index-aligned to member
//! identity, with one entry per currently active member.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{PartnetError, Result};

/// System fields holding identity and lifecycle state. These are never
/// stored as tracked columns in the attribute table.
pub const RESERVED_FIELDS: [&str; 4] = ["uid", "active", "entry_time", "exit_time"];

/// Fields present in the table but maintained by dedicated modules
/// (disease progression, group assignment). Excluded from distribution
/// profiling and entrant sampling.
pub const SPECIAL_FIELDS: [&str; 2] = ["status", "group"];

/// Whether `name` is a system field that may never become a tracked column
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// Whether `name` is maintained by a dedicated module and skipped by
/// distribution profiling
#[must_use]
pub fn is_special(name: &str) -> bool {
    SPECIAL_FIELDS.contains(&name)
}

/// A single attribute value, typed at attribute registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Categorical, label-valued
    Label(String),
    /// Numeric-coded level
    Code(f64),
}

/// A typed attribute column, one entry per active member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeColumn {
    /// Categorical column over label values
    Label(Vec<String>),
    /// Numeric-coded column
    Code(Vec<f64>),
}

impl AttributeColumn {
    /// Number of values in the column
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Label(values) => values.len(),
            Self::Code(values) => values.len(),
        }
    }

    /// Whether the column holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at position `index`, if in range
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<AttrValue> {
        match self {
            Self::Label(values) => values.get(index).cloned().map(AttrValue::Label),
            Self::Code(values) => values.get(index).copied().map(AttrValue::Code),
        }
    }

    /// Append a value of the matching kind
    ///
    /// Returns the value back unchanged when its kind does not match the
    /// column type, so callers can attach the attribute name to the error.
    pub fn push(&mut self, value: AttrValue) -> std::result::Result<(), AttrValue> {
        match (self, value) {
            (Self::Label(values), AttrValue::Label(label)) => {
                values.push(label);
                Ok(())
            }
            (Self::Code(values), AttrValue::Code(code)) => {
                values.push(code);
                Ok(())
            }
            (_, value) => Err(value),
        }
    }
}

/// Authoritative mapping from attribute name to a typed column of values,
/// one per currently active member
///
/// Invariant: after any update completes, every tracked column's length
/// equals the current active-member count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeTable {
    n_active: usize,
    columns: FxHashMap<String, AttributeColumn>,
}

impl AttributeTable {
    /// Create an empty table for a population of `n_active` members
    #[must_use]
    pub fn new(n_active: usize) -> Self {
        Self {
            n_active,
            columns: FxHashMap::default(),
        }
    }

    /// Current active-member count
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.n_active
    }

    /// Update the active-member count (copy-in does this before refreshing
    /// columns; entrant assignment restores the length invariant afterwards)
    pub fn set_active_count(&mut self, n_active: usize) {
        self.n_active = n_active;
    }

    /// Register a column under `name`, rejecting reserved system fields
    ///
    /// The column must already match the active-member count; registration
    /// is how attributes enter the schema, not how entrants are appended.
    pub fn register(&mut self, name: &str, column: AttributeColumn) -> Result<()> {
        if is_reserved(name) {
            return Err(PartnetError::ReservedAttribute(name.to_string()));
        }
        if column.len() != self.n_active {
            return Err(PartnetError::ColumnLengthMismatch {
                attribute: name.to_string(),
                expected: self.n_active,
                found: column.len(),
            });
        }
        self.columns.insert(name.to_string(), column);
        Ok(())
    }

    /// Replace or insert a column without the length check. Used by
    /// copy-in, which refreshes columns before entrants are appended.
    pub fn replace(&mut self, name: &str, column: AttributeColumn) -> Result<()> {
        if is_reserved(name) {
            return Err(PartnetError::ReservedAttribute(name.to_string()));
        }
        self.columns.insert(name.to_string(), column);
        Ok(())
    }

    /// Shared access to a column
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&AttributeColumn> {
        self.columns.get(name)
    }

    /// Exclusive access to a column
    pub fn column_mut(&mut self, name: &str) -> Option<&mut AttributeColumn> {
        self.columns.get_mut(name)
    }

    /// Names of all stored columns, sorted for deterministic iteration
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.columns.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Names of tracked columns (everything outside the special fields),
    /// sorted for deterministic iteration
    #[must_use]
    pub fn tracked_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .columns
            .keys()
            .filter(|name| !is_special(name))
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    /// Verify that every tracked column matches the active-member count
    pub fn validate(&self) -> Result<()> {
        for name in self.tracked_names() {
            let column = &self.columns[&name];
            if column.len() != self.n_active {
                return Err(PartnetError::ColumnLengthMismatch {
                    attribute: name,
                    expected: self.n_active,
                    found: column.len(),
                });
            }
        }
        Ok(())
    }
}
