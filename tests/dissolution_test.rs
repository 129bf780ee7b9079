//! Tests for dissolution-model calibration

use partnet::{DissolutionSpec, ModelForm, PartnetError, Stratifier, calibrate};

#[test]
fn homogeneous_coefficient_from_target_duration() {
    let spec = DissolutionSpec::homogeneous(25.0, 0.0);
    let coefs = calibrate(&spec).unwrap();

    assert_eq!(coefs.form, ModelForm::Homogeneous);
    assert_eq!(coefs.crude.len(), 1);
    assert!((coefs.crude[0] - 3.178_054).abs() < 1e-5);
    // With no departure the adjustment is the identity.
    assert_eq!(coefs.crude, coefs.adjusted);
}

#[test]
fn departure_as_competing_risk_inflates_the_coefficient() {
    let baseline = calibrate(&DissolutionSpec::homogeneous(25.0, 0.0)).unwrap();
    let adjusted = calibrate(&DissolutionSpec::homogeneous(25.0, 0.005)).unwrap();

    // The crude series ignores departure entirely.
    assert!((baseline.crude[0] - adjusted.crude[0]).abs() < 1e-12);
    // The adjusted coefficient compensates for edges lost to exits.
    assert!(adjusted.adjusted[0] > adjusted.crude[0]);
}

#[test]
fn infeasible_departure_rate_reports_bound() {
    let spec = DissolutionSpec::homogeneous(2.0, 0.5);
    let err = calibrate(&spec).unwrap_err();
    match err {
        PartnetError::Infeasible {
            stratum,
            duration,
            rate,
            max_rate,
        } => {
            assert_eq!(stratum, 0);
            assert!((duration - 2.0).abs() < f64::EPSILON);
            assert!((rate - 0.5).abs() < f64::EPSILON);
            assert!((max_rate - 0.292_893).abs() < 1e-5);
        }
        other => panic!("expected Infeasible, got {other:?}"),
    }
}

#[test]
fn heterogeneous_offsets_against_first_stratum() {
    let strat = Stratifier::parse("match", "race", 2).unwrap();
    let spec = DissolutionSpec::stratified(strat, vec![20.0, 50.0], 0.01);
    let coefs = calibrate(&spec).unwrap();

    assert_eq!(coefs.form, ModelForm::Heterogeneous);
    assert_eq!(coefs.crude.len(), 2);

    // Recompute the raw per-stratum coefficients and check the contrast.
    let raw = |d: f64| {
        let pg = (d - 1.0) / d;
        (pg / (1.0 - pg)).ln()
    };
    assert!((coefs.crude[0] - raw(20.0)).abs() < 1e-12);
    assert!((coefs.crude[1] - (raw(50.0) - raw(20.0))).abs() < 1e-12);

    let surv2 = (1.0f64 - 0.01).powi(2);
    let raw_adj = |d: f64| {
        let pg = (d - 1.0) / d;
        (pg / (surv2 - pg)).ln()
    };
    assert!((coefs.adjusted[0] - raw_adj(20.0)).abs() < 1e-12);
    assert!((coefs.adjusted[1] - (raw_adj(50.0) - raw_adj(20.0))).abs() < 1e-12);
}

#[test]
fn duration_count_must_match_strata() {
    let strat = Stratifier::parse("factor", "risk", 3).unwrap();
    let spec = DissolutionSpec::stratified(strat, vec![10.0, 20.0], 0.0);
    assert!(matches!(
        calibrate(&spec),
        Err(PartnetError::ArityMismatch {
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn no_partial_coefficients_on_mixed_validity() {
    // Second stratum is infeasible; the whole calibration must fail.
    let strat = Stratifier::parse("match", "group", 2).unwrap();
    let spec = DissolutionSpec::stratified(strat, vec![3.0, 200.0], 0.02);
    assert!(calibrate(&spec).is_err());
}

#[test]
fn spec_round_trips_through_json() {
    let strat = Stratifier::parse("mix", "group", 2).unwrap();
    let spec = DissolutionSpec::stratified(strat, vec![15.0, 25.0, 40.0], 0.003);
    let encoded = serde_json::to_string(&spec).unwrap();
    let decoded: DissolutionSpec = serde_json::from_str(&encoded).unwrap();
    assert_eq!(spec, decoded);
    assert_eq!(
        calibrate(&spec).unwrap().adjusted,
        calibrate(&decoded).unwrap().adjusted
    );
}

#[test]
fn display_summarizes_all_strata() {
    let strat = Stratifier::parse("factor", "risk", 2).unwrap();
    let spec = DissolutionSpec::stratified(strat, vec![10.0, 30.0], 0.0);
    let coefs = calibrate(&spec).unwrap();
    let rendered = coefs.to_string();
    assert!(rendered.contains("Heterogeneous"));
    assert!(rendered.contains("offset"));
}
