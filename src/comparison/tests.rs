// Scenario tests for the comparative statistics engine
//
// Datasets are built from explicit total sizes so every expected value can
// be checked by hand.

use super::*;
use crate::error::AnalysisError;
use crate::record::{LayerOverheads, MessageRecord, Protocol};

/// Dataset whose records have exactly the given total sizes
///
/// Payload is the total minus a fixed 43-byte LwM2M-style overhead, so every
/// size must be at least 43.
fn dataset_with_totals(name: &str, protocol: Protocol, totals: &[u64]) -> Dataset {
    let records = totals
        .iter()
        .enumerate()
        .map(|(i, &total)| {
            MessageRecord::new(
                protocol,
                i as u64 + 1,
                "TELEMETRY",
                total - 43,
                LayerOverheads::new(8, 12, 15, 8),
            )
            .unwrap()
        })
        .collect();
    Dataset::new(name, protocol, records).unwrap()
}

/// Constant sizes on both sides: the mean difference is well defined but the
/// standardized effect is not.
#[test]
fn test_constant_sizes_fail_with_domain_error() {
    let a = dataset_with_totals("LwM2M", Protocol::LwM2M, &[100, 100]);
    let b = dataset_with_totals("Matter", Protocol::Matter, &[150, 150]);

    let sizes = size_difference(&a.total_sizes(), &b.total_sizes()).unwrap();
    assert_eq!(sizes.difference, 50.0);
    assert_eq!(sizes.percent_difference, 50.0);

    let result = compare(&a, &b, &ComparisonConfig::default());
    assert!(matches!(result, Err(AnalysisError::Domain(_))));
}

/// Clear separation between protocols: large effect, significant test
#[test]
fn test_clear_separation_is_large_effect() {
    let a = dataset_with_totals("LwM2M", Protocol::LwM2M, &[100, 110, 90, 105]);
    let b = dataset_with_totals("Matter", Protocol::Matter, &[150, 160, 140, 155]);

    let result = compare(&a, &b, &ComparisonConfig::default()).unwrap();

    assert_eq!(result.size_difference, 50.0);
    assert!((result.percent_difference - 50.0 / 101.25 * 100.0).abs() < 1e-9);
    assert!(result.effect_size >= 0.8);
    assert_eq!(result.effect_band, EffectSizeBand::Large);
    assert!(result.significant);
    assert_eq!(result.significance_level, 0.05);
    assert_eq!(result.baseline_count, 4);
    assert_eq!(result.candidate_name, "Matter");
}

/// Statistics reported together agree with a hand-computed Welch reference
#[test]
fn test_reported_statistics_match_reference() {
    let a = dataset_with_totals("LwM2M", Protocol::LwM2M, &[100, 110, 90, 105]);
    let b = dataset_with_totals("Matter", Protocol::Matter, &[150, 160, 140, 155]);

    let result = compare(&a, &b, &ComparisonConfig::default()).unwrap();

    assert!((result.t_statistic - (-8.280_787)).abs() < 1e-5);
    assert!((result.degrees_of_freedom - 6.0).abs() < 1e-9);
    assert!((result.p_value - 1.679_37e-4).abs() < 2e-5);
    assert!((result.baseline_variance - 72.916_667).abs() < 1e-5);
    assert!((result.pooled_std - 72.916_667f64.sqrt()).abs() < 1e-5);
}

/// Multi-megabyte messages with a few bytes of spread still compare
#[test]
fn test_large_sizes_keep_their_spread() {
    let base = 1u64 << 25;
    let a = dataset_with_totals("A", Protocol::LwM2M, &[base, base + 1, base + 2, base + 1]);
    let b = dataset_with_totals(
        "B",
        Protocol::LwM2M,
        &[base + 8, base + 9, base + 10, base + 9],
    );

    let result = compare(&a, &b, &ComparisonConfig::default()).unwrap();
    assert_eq!(result.size_difference, 8.0);
    assert!(result.t_statistic < -10.0);
    assert!(result.significant);

    // Same shape at ordinary sizes gives the same t
    let small_a = dataset_with_totals("A", Protocol::LwM2M, &[100, 101, 102, 101]);
    let small_b = dataset_with_totals("B", Protocol::LwM2M, &[108, 109, 110, 109]);
    let small = compare(&small_a, &small_b, &ComparisonConfig::default()).unwrap();
    assert!((result.t_statistic - small.t_statistic).abs() < 1e-9);
    assert!((result.degrees_of_freedom - small.degrees_of_freedom).abs() < 1e-9);
}

/// Swapping the inputs flips the sign of directional quantities only
#[test]
fn test_swap_negates_directional_fields() {
    let a = dataset_with_totals("A", Protocol::LwM2M, &[100, 110, 90, 105, 97]);
    let b = dataset_with_totals("B", Protocol::LwM2M, &[120, 135, 118, 150]);

    let config = ComparisonConfig::default();
    let ab = compare(&a, &b, &config).unwrap();
    let ba = compare(&b, &a, &config).unwrap();

    assert!((ab.size_difference + ba.size_difference).abs() < 1e-9);
    assert!((ab.t_statistic + ba.t_statistic).abs() < 1e-12);
    assert!((ab.p_value - ba.p_value).abs() < 1e-6);
    assert!((ab.effect_size.abs() - ba.effect_size.abs()).abs() < 1e-9);
    assert_eq!(ab.effect_band, ba.effect_band);
    assert!((ab.efficiency_gap + ba.efficiency_gap).abs() < 1e-9);
}

#[test]
fn test_single_record_is_insufficient() {
    let a = dataset_with_totals("A", Protocol::LwM2M, &[100]);
    let b = dataset_with_totals("B", Protocol::Matter, &[150, 160]);

    for (x, y) in [(&a, &b), (&b, &a)] {
        match compare(x, y, &ComparisonConfig::default()) {
            Err(AnalysisError::InsufficientData {
                required, actual, ..
            }) => {
                assert_eq!(required, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }
}

#[test]
fn test_empty_dataset_is_insufficient() {
    let a = Dataset::new("A", Protocol::LwM2M, Vec::new()).unwrap();
    let b = dataset_with_totals("B", Protocol::Matter, &[150, 160]);
    assert!(matches!(
        compare(&a, &b, &ComparisonConfig::default()),
        Err(AnalysisError::InsufficientData { .. })
    ));
}

/// Only one side constant: pooled variance is non-zero, comparison succeeds
#[test]
fn test_one_constant_side_is_fine() {
    let a = dataset_with_totals("A", Protocol::LwM2M, &[100, 100, 100]);
    let b = dataset_with_totals("B", Protocol::Matter, &[140, 150, 160]);
    let result = compare(&a, &b, &ComparisonConfig::default()).unwrap();
    assert_eq!(result.baseline_variance, 0.0);
    assert!(result.pooled_std > 0.0);
}

/// Overlapping distributions: not significant, small or medium effect
#[test]
fn test_overlapping_sizes_not_significant() {
    let a = dataset_with_totals("A", Protocol::LwM2M, &[100, 105, 98, 102, 101]);
    let b = dataset_with_totals("B", Protocol::Matter, &[102, 106, 99, 103, 100]);

    let result = compare(&a, &b, &ComparisonConfig::default()).unwrap();
    assert!(!result.significant);
    assert_ne!(result.effect_band, EffectSizeBand::Large);
}

/// The significance level only changes the reported decision
#[test]
fn test_alpha_only_affects_decision() {
    let a = dataset_with_totals("A", Protocol::LwM2M, &[100, 102, 101, 103, 100]);
    let b = dataset_with_totals("B", Protocol::Matter, &[104, 106, 103, 107, 104]);

    let loose = compare(&a, &b, &ComparisonConfig::permissive()).unwrap();
    let strict = compare(&a, &b, &ComparisonConfig::strict()).unwrap();

    assert_eq!(loose.t_statistic, strict.t_statistic);
    assert_eq!(loose.p_value, strict.p_value);
    assert_eq!(loose.effect_size, strict.effect_size);
    assert_eq!(loose.significant, loose.p_value < 0.10);
    assert_eq!(strict.significant, strict.p_value < 0.01);
    // Strict can never be significant when permissive is not
    assert!(!(strict.significant && !loose.significant));
}

#[test]
fn test_invalid_config_rejected() {
    let a = dataset_with_totals("A", Protocol::LwM2M, &[100, 110]);
    let b = dataset_with_totals("B", Protocol::Matter, &[150, 160]);
    let config = ComparisonConfig::default().with_significance_level(2.0);
    assert!(matches!(
        compare(&a, &b, &config),
        Err(AnalysisError::Config(_))
    ));
}

/// Smaller messages with the same overhead carry proportionally less payload
#[test]
fn test_efficiency_gap_sign() {
    let a = dataset_with_totals("A", Protocol::LwM2M, &[200, 210]);
    let b = dataset_with_totals("B", Protocol::Matter, &[60, 70]);
    let result = compare(&a, &b, &ComparisonConfig::default()).unwrap();
    assert!(result.efficiency_gap > 0.0);
}
