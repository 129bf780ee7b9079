//! Entrant attribute assignment
//!
//! Newly active members arrive with empty rows in the attribute table.
//! This module fills them in, one weighted draw per entrant per lagging
//! attribute, restoring the length invariant before the next structural
//! step.

use log::debug;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use smallvec::SmallVec;

use crate::config::EntrantRule;
use crate::error::{PartnetError, Result};
use crate::model::attributes::AttrValue;
use crate::model::context::SimContext;

use super::distribution::{ValueDistribution, attribute_distributions};

/// Fill in attribute values for newly active members
///
/// `entrant_ids` is the ascending list of member identities that became
/// active this step. Every tracked attribute whose column is shorter than
/// the active-member count is brought up to length by resolving its
/// entrant rule: sampling with replacement from the applicable
/// distribution snapshot, or replicating a literal. At most one entrant
/// batch may be processed per step; a column lagging by more than the
/// batch size fails rather than silently misaligning rows.
pub fn assign_entrant_attributes(ctx: &mut SimContext, entrant_ids: &[usize]) -> Result<()> {
    if entrant_ids.is_empty() {
        return Ok(());
    }
    debug_assert!(
        entrant_ids.windows(2).all(|pair| pair[0] < pair[1]),
        "entrant identities must be strictly ascending"
    );

    // Snapshot before any append so every attribute samples from the
    // pre-entrant state.
    let current = attribute_distributions(&ctx.attrs);
    let n_active = ctx.attrs.active_count();
    let batch = entrant_ids.len();
    let mut updated = 0usize;

    for name in ctx.attrs.tracked_names() {
        let len = ctx.attrs.column(&name).map_or(0, |c| c.len());
        if len >= n_active {
            continue;
        }
        if n_active - len != batch {
            return Err(PartnetError::ColumnLengthMismatch {
                attribute: name,
                expected: n_active,
                found: len + batch,
            });
        }

        let rule = ctx
            .config
            .entrant_rules
            .get(&name)
            .cloned()
            .unwrap_or(EntrantRule::CurrentDistribution);

        let values: SmallVec<[AttrValue; 8]> = match rule {
            EntrantRule::CurrentDistribution => {
                let dist = current
                    .get(&name)
                    .ok_or_else(|| PartnetError::DistributionUnavailable {
                        attribute: name.clone(),
                    })?;
                sample_batch(ctx, dist, &name, batch)?
            }
            EntrantRule::InitialDistribution => {
                let dist = ctx
                    .scratch
                    .init_distributions
                    .as_ref()
                    .and_then(|set| set.get(&name))
                    .cloned()
                    .ok_or_else(|| PartnetError::DistributionUnavailable {
                        attribute: name.clone(),
                    })?;
                sample_batch(ctx, &dist, &name, batch)?
            }
            EntrantRule::Literal(value) => (0..batch).map(|_| value.clone()).collect(),
        };

        let column = ctx
            .attrs
            .column_mut(&name)
            .ok_or_else(|| PartnetError::UnknownAttribute(name.clone()))?;
        for value in values {
            column
                .push(value)
                .map_err(|_| PartnetError::ValueTypeMismatch(name.clone()))?;
        }
        updated += 1;
    }

    ctx.attrs.validate()?;
    debug!("assigned {updated} attribute(s) for {batch} entrant(s)");
    Ok(())
}

/// Draw `batch` independent weighted samples with replacement
fn sample_batch(
    ctx: &mut SimContext,
    dist: &ValueDistribution,
    attribute: &str,
    batch: usize,
) -> Result<SmallVec<[AttrValue; 8]>> {
    if dist.is_empty() {
        return Err(PartnetError::DistributionUnavailable {
            attribute: attribute.to_string(),
        });
    }
    let index =
        WeightedIndex::new(dist.proportions()).map_err(|_| PartnetError::DistributionUnavailable {
            attribute: attribute.to_string(),
        })?;
    Ok((0..batch)
        .map(|_| dist.support()[index.sample(&mut ctx.rng)].clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RunConfig, RunParams};
    use crate::model::attributes::AttributeColumn;

    fn context_with_column(column: AttributeColumn, n_active: usize) -> SimContext {
        let mut ctx = SimContext::new(RunParams::default(), RunConfig::default().with_seed(11));
        ctx.attrs.set_active_count(column.len());
        ctx.attrs.register("risk", column).unwrap();
        ctx.attrs.set_active_count(n_active);
        ctx
    }

    #[test]
    fn sampling_restores_the_length_invariant() {
        let column = AttributeColumn::Label(vec!["low".into(), "high".into(), "low".into()]);
        let mut ctx = context_with_column(column, 5);
        assign_entrant_attributes(&mut ctx, &[3, 4]).unwrap();
        let column = ctx.attrs.column("risk").unwrap();
        assert_eq!(column.len(), 5);
        // Only observed labels may appear.
        if let AttributeColumn::Label(values) = column {
            assert!(values.iter().all(|v| v == "low" || v == "high"));
        } else {
            panic!("expected label column");
        }
    }

    #[test]
    fn literal_rule_replicates_the_value() {
        let column = AttributeColumn::Code(vec![1.0, 2.0]);
        let mut ctx = context_with_column(column, 4);
        ctx.config = ctx
            .config
            .with_rule("risk", EntrantRule::Literal(AttrValue::Code(9.0)));
        assign_entrant_attributes(&mut ctx, &[2, 3]).unwrap();
        assert_eq!(
            ctx.attrs.column("risk").unwrap(),
            &AttributeColumn::Code(vec![1.0, 2.0, 9.0, 9.0])
        );
    }

    #[test]
    fn initial_distribution_rule_needs_a_snapshot() {
        let column = AttributeColumn::Label(vec!["a".into()]);
        let mut ctx = context_with_column(column, 2);
        ctx.config = ctx.config.with_rule("risk", EntrantRule::InitialDistribution);
        let result = assign_entrant_attributes(&mut ctx, &[1]);
        assert!(matches!(
            result,
            Err(PartnetError::DistributionUnavailable { .. })
        ));
    }

    #[test]
    fn initial_distribution_rule_uses_the_snapshot() {
        let column = AttributeColumn::Label(vec!["a".into(), "b".into()]);
        let mut ctx = context_with_column(column, 2);
        ctx.snapshot_init_distributions();
        ctx.config = ctx.config.with_rule("risk", EntrantRule::InitialDistribution);
        ctx.attrs.set_active_count(4);
        assign_entrant_attributes(&mut ctx, &[2, 3]).unwrap();
        assert_eq!(ctx.attrs.column("risk").unwrap().len(), 4);
    }

    #[test]
    fn empty_support_is_rejected() {
        let column = AttributeColumn::Label(vec![]);
        let mut ctx = context_with_column(column, 1);
        let result = assign_entrant_attributes(&mut ctx, &[0]);
        assert!(matches!(
            result,
            Err(PartnetError::DistributionUnavailable { .. })
        ));
    }

    #[test]
    fn multiple_batches_per_step_are_rejected() {
        // Column lags by 3 but only 1 entrant is declared.
        let column = AttributeColumn::Code(vec![1.0]);
        let mut ctx = context_with_column(column, 4);
        let result = assign_entrant_attributes(&mut ctx, &[3]);
        assert!(matches!(
            result,
            Err(PartnetError::ColumnLengthMismatch { .. })
        ));
    }

    #[test]
    fn fixed_seed_reproduces_the_draw() {
        let make = || {
            let column =
                AttributeColumn::Label(vec!["x".into(), "y".into(), "y".into(), "x".into()]);
            let mut ctx = context_with_column(column, 8);
            assign_entrant_attributes(&mut ctx, &[4, 5, 6, 7]).unwrap();
            ctx.attrs.column("risk").unwrap().clone()
        };
        assert_eq!(make(), make());
    }
}
