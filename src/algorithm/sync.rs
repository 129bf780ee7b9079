//! Attribute synchronization between the table and the structural network
//!
//! Copy-in refreshes the authoritative table from the network's native
//! per-member store at the start of a step; copy-out pushes the required
//! field set back so the formation/dissolution engine sees the attribute
//! state the simulation modules produced.

use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::error::{PartnetError, Result};
use crate::model::attributes::{AttrValue, AttributeColumn, is_reserved};
use crate::model::context::SimContext;
use crate::model::network::StructuralNetwork;

/// Refresh the attribute table from the network's native store
///
/// Reads every non-reserved attribute, updates the active-member count,
/// and caches the model term names. When a by-group stratifier is
/// configured, the distinct values observed at this call are recorded for
/// later by-group reporting.
pub fn copy_attributes_in<N: StructuralNetwork>(ctx: &mut SimContext, net: &N) -> Result<()> {
    ctx.attrs.set_active_count(net.active_count());

    let mut copied = 0usize;
    for name in net.attribute_names() {
        if is_reserved(&name) {
            continue;
        }
        let column = net
            .get_attribute(&name)
            .ok_or_else(|| PartnetError::UnknownAttribute(name.clone()))?;
        ctx.attrs.replace(&name, column)?;
        copied += 1;
    }

    ctx.scratch.model_terms = Some(net.model_term_attributes());

    if let Some(stratifier) = ctx.config.stratifier.clone() {
        match ctx.attrs.column(&stratifier) {
            Some(column) => {
                ctx.scratch.stratifier_values = distinct_values(column);
            }
            None => {
                warn!("stratifier attribute `{stratifier}` not present at copy-in");
                ctx.scratch.stratifier_values.clear();
            }
        }
    }

    debug!("copied {copied} attribute(s) in for {} member(s)", ctx.attrs.active_count());
    Ok(())
}

/// Push the required field set back into the network's native store
///
/// Required = attributes referenced by the network's structural model
/// terms, plus disease status, plus group membership for two-group
/// populations. Nothing outside this set is written, even when present in
/// the table.
pub fn copy_attributes_out<N: StructuralNetwork>(ctx: &SimContext, net: &mut N) -> Result<()> {
    let mut required: FxHashSet<String> = match &ctx.scratch.model_terms {
        Some(terms) => terms.iter().cloned().collect(),
        None => net.model_term_attributes().into_iter().collect(),
    };
    required.insert("status".to_string());
    if ctx.params.group_count == 2 {
        required.insert("group".to_string());
    }

    let mut names: Vec<String> = required.into_iter().collect();
    names.sort_unstable();

    for name in &names {
        let column = ctx
            .attrs
            .column(name)
            .ok_or_else(|| PartnetError::UnknownAttribute(name.clone()))?;
        net.set_attribute(name, column.clone())?;
    }

    debug!("copied {} attribute(s) out", names.len());
    Ok(())
}

/// Distinct values of a column, in deterministic order
fn distinct_values(column: &AttributeColumn) -> Vec<AttrValue> {
    match column {
        AttributeColumn::Label(values) => {
            let mut seen = FxHashSet::default();
            let mut distinct: Vec<String> = Vec::new();
            for value in values {
                if seen.insert(value.as_str()) {
                    distinct.push(value.clone());
                }
            }
            distinct.sort_unstable();
            distinct.into_iter().map(AttrValue::Label).collect()
        }
        AttributeColumn::Code(values) => {
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            sorted.dedup();
            sorted.into_iter().map(AttrValue::Code).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RunConfig, RunParams};
    use crate::model::network::MemoryNetwork;

    fn seeded_network() -> MemoryNetwork {
        let mut net = MemoryNetwork::new(3);
        net.set_attribute(
            "risk",
            AttributeColumn::Label(vec!["low".into(), "high".into(), "low".into()]),
        )
        .unwrap();
        net.set_attribute("status", AttributeColumn::Label(vec!["s".into(); 3]))
            .unwrap();
        net.set_attribute("group", AttributeColumn::Code(vec![1.0, 2.0, 1.0]))
            .unwrap();
        net.set_model_terms(vec!["risk".to_string()]);
        net
    }

    #[test]
    fn copy_in_refreshes_table_and_caches_terms() {
        let net = seeded_network();
        let mut ctx = SimContext::new(RunParams::default(), RunConfig::default());
        copy_attributes_in(&mut ctx, &net).unwrap();
        assert_eq!(ctx.attrs.active_count(), 3);
        assert_eq!(ctx.attrs.column("risk").unwrap().len(), 3);
        assert_eq!(
            ctx.scratch.model_terms.as_deref(),
            Some(&["risk".to_string()][..])
        );
    }

    #[test]
    fn copy_in_records_stratifier_values() {
        let net = seeded_network();
        let mut ctx = SimContext::new(
            RunParams::default(),
            RunConfig::default().with_stratifier("risk"),
        );
        copy_attributes_in(&mut ctx, &net).unwrap();
        assert_eq!(
            ctx.scratch.stratifier_values,
            vec![
                AttrValue::Label("high".into()),
                AttrValue::Label("low".into())
            ]
        );
    }

    #[test]
    fn copy_out_pushes_exactly_the_required_set() {
        let net = seeded_network();
        let mut ctx = SimContext::new(
            RunParams {
                group_count: 2,
                ..RunParams::default()
            },
            RunConfig::default(),
        );
        copy_attributes_in(&mut ctx, &net).unwrap();
        // A field outside the required set must not be pushed back.
        ctx.attrs
            .register("scratchpad", AttributeColumn::Code(vec![0.0; 3]))
            .unwrap();

        let mut sink = MemoryNetwork::new(3);
        sink.set_model_terms(vec!["risk".to_string()]);
        copy_attributes_out(&ctx, &mut sink).unwrap();

        assert!(sink.get_attribute("risk").is_some());
        assert!(sink.get_attribute("status").is_some());
        assert!(sink.get_attribute("group").is_some());
        assert!(sink.get_attribute("scratchpad").is_none());
    }

    #[test]
    fn copy_out_skips_group_for_one_group_populations() {
        let net = seeded_network();
        let mut ctx = SimContext::new(RunParams::default(), RunConfig::default());
        copy_attributes_in(&mut ctx, &net).unwrap();

        let mut sink = MemoryNetwork::new(3);
        sink.set_model_terms(vec!["risk".to_string()]);
        copy_attributes_out(&ctx, &mut sink).unwrap();
        assert!(sink.get_attribute("group").is_none());
    }

    #[test]
    fn copy_out_fails_on_missing_required_field() {
        let mut ctx = SimContext::new(RunParams::default(), RunConfig::default());
        ctx.attrs.set_active_count(0);
        let mut sink = MemoryNetwork::new(0);
        sink.set_model_terms(vec!["risk".to_string()]);
        let result = copy_attributes_out(&ctx, &mut sink);
        assert!(matches!(result, Err(PartnetError::UnknownAttribute(_))));
    }
}
