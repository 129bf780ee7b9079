//! Attribute distribution profiling
//!
//! Computes proportional frequency tables over the tracked attribute
//! columns. Pure read-only pass over the table; the resulting snapshots
//! drive entrant sampling and by-group reporting.

use rustc_hash::FxHashMap;

use crate::model::attributes::{AttrValue, AttributeColumn, AttributeTable};

/// Value -> proportion table for one attribute
///
/// Support order is deterministic: first-observed order for label columns,
/// ascending for numeric-coded columns, so replicate runs reproduce the
/// same sampling stream from the same seed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDistribution {
    support: Vec<AttrValue>,
    proportions: Vec<f64>,
}

impl ValueDistribution {
    /// Tally a column into a proportion table
    #[must_use]
    pub fn from_column(column: &AttributeColumn) -> Self {
        match column {
            AttributeColumn::Label(values) => {
                let mut order: Vec<String> = Vec::new();
                let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
                for value in values {
                    if !counts.contains_key(value.as_str()) {
                        order.push(value.clone());
                    }
                    *counts.entry(value.as_str()).or_insert(0) += 1;
                }
                let total = values.len() as f64;
                let proportions = order
                    .iter()
                    .map(|label| counts[label.as_str()] as f64 / total)
                    .collect();
                let support = order.into_iter().map(AttrValue::Label).collect();
                Self { support, proportions }
            }
            AttributeColumn::Code(values) => {
                let mut sorted = values.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let total = values.len() as f64;
                let mut support = Vec::new();
                let mut proportions = Vec::new();
                let mut i = 0;
                while i < sorted.len() {
                    let level = sorted[i];
                    let mut count = 0;
                    while i < sorted.len() && sorted[i] == level {
                        count += 1;
                        i += 1;
                    }
                    support.push(AttrValue::Code(level));
                    proportions.push(count as f64 / total);
                }
                Self { support, proportions }
            }
        }
    }

    /// Distinct values observed in the column
    #[must_use]
    pub fn support(&self) -> &[AttrValue] {
        &self.support
    }

    /// Proportion of each support value, aligned with [`Self::support`]
    #[must_use]
    pub fn proportions(&self) -> &[f64] {
        &self.proportions
    }

    /// Whether the distribution has no observed values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    /// Proportion of one value, zero when never observed
    #[must_use]
    pub fn proportion_of(&self, value: &AttrValue) -> f64 {
        self.support
            .iter()
            .position(|v| v == value)
            .map_or(0.0, |i| self.proportions[i])
    }
}

/// Snapshot of distributions across attributes
pub type DistributionSet = FxHashMap<String, ValueDistribution>;

/// Profile every tracked attribute of the table
///
/// Reserved system fields are never table columns and the specially
/// handled fields (disease status, group) are excluded by
/// [`AttributeTable::tracked_names`].
#[must_use]
pub fn attribute_distributions(table: &AttributeTable) -> DistributionSet {
    let mut set = DistributionSet::default();
    for name in table.tracked_names() {
        if let Some(column) = table.column(&name) {
            set.insert(name, ValueDistribution::from_column(column));
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_proportions_sum_to_one() {
        let column = AttributeColumn::Label(vec![
            "low".into(),
            "high".into(),
            "low".into(),
            "low".into(),
        ]);
        let dist = ValueDistribution::from_column(&column);
        assert_eq!(dist.support().len(), 2);
        assert!((dist.proportion_of(&AttrValue::Label("low".into())) - 0.75).abs() < 1e-12);
        assert!((dist.proportions().iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn code_support_is_ascending() {
        let column = AttributeColumn::Code(vec![2.0, 0.0, 1.0, 0.0]);
        let dist = ValueDistribution::from_column(&column);
        assert_eq!(
            dist.support(),
            &[AttrValue::Code(0.0), AttrValue::Code(1.0), AttrValue::Code(2.0)]
        );
        assert!((dist.proportion_of(&AttrValue::Code(0.0)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn profiling_skips_special_fields() {
        let mut table = AttributeTable::new(2);
        table
            .register("status", AttributeColumn::Label(vec!["s".into(), "i".into()]))
            .unwrap();
        table
            .register("risk", AttributeColumn::Code(vec![0.0, 1.0]))
            .unwrap();
        let set = attribute_distributions(&table);
        assert!(set.contains_key("risk"));
        assert!(!set.contains_key("status"));
    }
}
