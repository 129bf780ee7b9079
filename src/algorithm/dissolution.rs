//! Dissolution model calibration
//!
//! Converts target mean partnership durations into dissolution model
//! coefficients on the logit scale, with background population departure
//! treated as a competing risk. Runs once at model-setup time; the
//! resulting coefficients are consumed by the external
//! formation/dissolution engine and are read-only thereafter.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{PartnetError, Result};

/// Baseline term name of a well-formed dissolution spec
pub const BASELINE_TERM: &str = "edges";

/// Supported stratifying term kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StratifierKind {
    /// Shared-attribute match: baseline stratum plus one within-group
    /// stratum
    Match,
    /// Full mixing over attribute levels: one stratum per unordered level
    /// pair
    Mix,
    /// One stratum per attribute level
    Factor,
}

/// Stratifying criterion over one categorical attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stratifier {
    /// Term kind
    pub kind: StratifierKind,
    /// Stratifying attribute name
    pub attribute: String,
    /// Number of attribute levels
    pub levels: usize,
}

impl Stratifier {
    /// Parse a term kind by name, as spec-building layers supply it
    pub fn parse(kind: &str, attribute: &str, levels: usize) -> Result<Self> {
        let kind = match kind {
            "match" => StratifierKind::Match,
            "mix" => StratifierKind::Mix,
            "factor" => StratifierKind::Factor,
            other => return Err(PartnetError::UnsupportedTerm(other.to_string())),
        };
        Ok(Self {
            kind,
            attribute: attribute.to_string(),
            levels,
        })
    }

    /// Number of strata the term implies
    #[must_use]
    pub fn stratum_count(&self) -> usize {
        match self.kind {
            StratifierKind::Match => 2,
            StratifierKind::Factor => self.levels,
            StratifierKind::Mix => self.levels * (self.levels + 1) / 2,
        }
    }
}

/// User-facing dissolution model specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissolutionSpec {
    /// Baseline term name; must be the unconditional edges term
    pub baseline: String,
    /// Optional stratifying criterion
    pub stratifier: Option<Stratifier>,
    /// Target mean partnership duration per stratum, in time units
    pub durations: Vec<f64>,
    /// Per-step background departure rate
    pub departure_rate: f64,
}

impl DissolutionSpec {
    /// Homogeneous spec: one duration, no stratification
    #[must_use]
    pub fn homogeneous(duration: f64, departure_rate: f64) -> Self {
        Self {
            baseline: BASELINE_TERM.to_string(),
            stratifier: None,
            durations: vec![duration],
            departure_rate,
        }
    }

    /// Stratified spec with one duration per stratum
    #[must_use]
    pub fn stratified(stratifier: Stratifier, durations: Vec<f64>, departure_rate: f64) -> Self {
        Self {
            baseline: BASELINE_TERM.to_string(),
            stratifier: Some(stratifier),
            durations,
            departure_rate,
        }
    }

    /// Number of strata the spec implies
    #[must_use]
    pub fn stratum_count(&self) -> usize {
        self.stratifier
            .as_ref()
            .map_or(1, Stratifier::stratum_count)
    }
}

/// Classification of a dissolution spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelForm {
    /// Single stratum, a single dissolution probability for all edges
    Homogeneous,
    /// Multiple strata with offset coefficients against the first
    Heterogeneous,
    /// Malformed spec; calibration refuses such input, so a returned
    /// coefficient set never carries this form
    Invalid,
}

/// Classify a spec by its shape without validating the numbers
#[must_use]
pub fn classify(spec: &DissolutionSpec) -> ModelForm {
    if spec.baseline != BASELINE_TERM {
        return ModelForm::Invalid;
    }
    if spec.stratum_count() > 1 {
        ModelForm::Heterogeneous
    } else {
        ModelForm::Homogeneous
    }
}

/// Calibrated dissolution coefficients, immutable once computed
///
/// For heterogeneous specs the first entry of each series is the baseline
/// coefficient and the remaining entries are offsets against it (contrast
/// coding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissolutionCoefficients {
    /// Coefficients ignoring departure
    pub crude: Vec<f64>,
    /// Departure-adjusted coefficients
    pub adjusted: Vec<f64>,
    /// The originating spec
    pub spec: DissolutionSpec,
    /// Model classification
    pub form: ModelForm,
}

impl fmt::Display for DissolutionCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dissolution Coefficients:")?;
        writeln!(f, "  Form: {:?}", self.form)?;
        writeln!(f, "  Departure Rate: {}", self.spec.departure_rate)?;
        writeln!(
            f,
            "  {:<8} {:>10} {:>12} {:>12}",
            "Stratum", "Duration", "Crude", "Adjusted"
        )?;
        for (i, duration) in self.spec.durations.iter().enumerate() {
            let role = if i == 0 { "" } else { " (offset)" };
            writeln!(
                f,
                "  {:<8} {:>10} {:>12.4} {:>12.4}{role}",
                i + 1,
                duration,
                self.crude[i],
                self.adjusted[i]
            )?;
        }
        Ok(())
    }
}

/// Derive dissolution coefficients from target durations
///
/// Pure function. Validation is fail-fast: no partial coefficient set is
/// ever returned.
pub fn calibrate(spec: &DissolutionSpec) -> Result<DissolutionCoefficients> {
    if spec.baseline != BASELINE_TERM {
        return Err(PartnetError::MalformedSpec(format!(
            "baseline term must be `{BASELINE_TERM}`, got `{}`",
            spec.baseline
        )));
    }

    let rate = spec.departure_rate;
    if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
        return Err(PartnetError::InvalidRate { value: rate });
    }

    let expected = spec.stratum_count();
    if spec.durations.len() != expected {
        return Err(PartnetError::ArityMismatch {
            expected,
            found: spec.durations.len(),
        });
    }

    for (stratum, &duration) in spec.durations.iter().enumerate() {
        if !duration.is_finite() || duration < 1.0 {
            return Err(PartnetError::InvalidDuration {
                stratum,
                value: duration,
            });
        }
    }

    // Discrete-time persistence probability per stratum, ignoring exits.
    let persistence: Vec<f64> = spec.durations.iter().map(|d| (d - 1.0) / d).collect();

    let mut crude: Vec<f64> = persistence.iter().map(|&pg| logit(pg)).collect();

    let mut adjusted = if rate > 0.0 {
        // Both partners must survive the step for the edge to persist on
        // its own terms, so departure competes with dissolution through
        // the squared single-step survival probability.
        let surv2 = (1.0 - rate).powi(2);
        let mut adjusted = Vec::with_capacity(persistence.len());
        for (stratum, &pg) in persistence.iter().enumerate() {
            if surv2 <= pg {
                return Err(PartnetError::Infeasible {
                    stratum,
                    duration: spec.durations[stratum],
                    rate,
                    max_rate: 1.0 - pg.sqrt(),
                });
            }
            adjusted.push((pg / (surv2 - pg)).ln());
        }
        adjusted
    } else {
        crude.clone()
    };

    // Contrast coding: strata beyond the first are stored as offsets
    // against the baseline stratum, in both series.
    if crude.len() > 1 {
        let crude_base = crude[0];
        let adjusted_base = adjusted[0];
        for coef in crude.iter_mut().skip(1) {
            *coef -= crude_base;
        }
        for coef in adjusted.iter_mut().skip(1) {
            *coef -= adjusted_base;
        }
    }

    let form = classify(spec);
    info!(
        "Calibrated {} dissolution coefficient(s) ({form:?}, departure rate {rate})",
        crude.len()
    );

    Ok(DissolutionCoefficients {
        crude,
        adjusted,
        spec: spec.clone(),
        form,
    })
}

/// Log-odds of a probability
fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Inverse logit, the probability a coefficient encodes
#[must_use]
pub fn inverse_logit(coef: f64) -> f64 {
    1.0 / (1.0 + (-coef).exp())
}
