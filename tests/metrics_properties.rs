use approx::assert_abs_diff_eq;
use ndarray::Array1;
use primitive_ml::{
    compute_metrics, compute_metrics_with, cross_validate, load_titanic, ConfusionCounts,
    EvaluationConfig, Metrics, MetricsOptions, NearestCentroid, PredictiveValues,
    StratifiedKFold,
};
use proptest::prelude::*;

fn label_pairs() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (1usize..64).prop_flat_map(|n| {
        (
            prop::collection::vec(0u8..=1, n),
            prop::collection::vec(0u8..=1, n),
        )
    })
}

fn bits(m: &Metrics) -> Vec<u64> {
    m.values().iter().map(|v| v.to_bits()).collect()
}

proptest! {
    #[test]
    fn confusion_categories_partition_the_batch((observed, predicted) in label_pairs()) {
        let counts = ConfusionCounts::from_labels(&observed, &predicted).unwrap();
        prop_assert_eq!(counts.total(), observed.len());
        let fn_manual = observed
            .iter()
            .zip(&predicted)
            .filter(|&(&o, &p)| o == 1 && p != 1)
            .count();
        prop_assert_eq!(counts.false_negative, fn_manual);
    }

    #[test]
    fn aliases_and_complements_hold((observed, predicted) in label_pairs()) {
        let m = compute_metrics(&observed, &predicted).unwrap();
        prop_assert_eq!(m.recall.to_bits(), m.sensitivity.to_bits());
        prop_assert_eq!(m.recall.to_bits(), m.true_positive_rate.to_bits());
        prop_assert_eq!(m.specificity.to_bits(), m.true_negative_rate.to_bits());
        if m.specificity.is_finite() {
            prop_assert!((m.false_positive_rate + m.specificity - 1.0).abs() < 1e-9);
        }
        if m.sensitivity.is_finite() {
            prop_assert!((m.false_negative_rate + m.sensitivity - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn accuracy_is_a_proportion((observed, predicted) in label_pairs()) {
        let m = compute_metrics(&observed, &predicted).unwrap();
        prop_assert!((0.0..=1.0).contains(&m.accuracy));
        prop_assert!((0.0..=1.0).contains(&m.observed_positive_rate));
        prop_assert!((m.observed_positive_rate + m.observed_negative_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_calls_are_bitwise_identical((observed, predicted) in label_pairs()) {
        let a = compute_metrics(&observed, &predicted).unwrap();
        let b = compute_metrics(&observed, &predicted).unwrap();
        prop_assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn vectors_and_arrays_agree((observed, predicted) in label_pairs()) {
        let from_vec = compute_metrics(&observed, &predicted).unwrap();
        let obs: Array1<f64> = observed.iter().map(|&v| f64::from(v)).collect();
        let pred: Array1<f64> = predicted.iter().map(|&v| f64::from(v)).collect();
        let from_array = compute_metrics(&obs, &pred).unwrap();
        prop_assert_eq!(bits(&from_vec), bits(&from_array));
    }

    #[test]
    fn standard_ppv_is_precision((observed, predicted) in label_pairs()) {
        let options = MetricsOptions {
            predictive_values: PredictiveValues::Standard,
            ..Default::default()
        };
        let m = compute_metrics_with(&observed, &predicted, &options).unwrap();
        prop_assert_eq!(m.positive_predictive_value.to_bits(), m.precision.to_bits());
    }

    #[test]
    fn stratified_folds_cover_every_sample(
        labels in prop::collection::vec(0u8..=1, 10..80),
        k in 2usize..6,
        seed in any::<u64>(),
    ) {
        let folds = StratifiedKFold::new(k).with_seed(seed).split(&labels).unwrap();
        let mut seen: Vec<usize> = folds.iter().flat_map(|f| f.test_indices.iter().copied()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..labels.len()).collect::<Vec<_>>());

        let positives = labels.iter().filter(|&&l| l == 1).count();
        for fold in &folds {
            let fold_pos = fold.test_indices.iter().filter(|&&i| labels[i] == 1).count();
            prop_assert!(fold_pos.abs_diff(positives / k) <= 1);
        }
    }
}

#[test]
fn sample_titanic_file_runs_end_to_end() {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/ml_examples/data/titanic_sample.csv"
    );
    let dataset = load_titanic(path).unwrap();
    assert_eq!(dataset.len(), 20);
    assert_eq!(
        dataset.feature_names,
        vec!["Pclass", "Sex", "Age", "SibSp", "Parch", "Fare"]
    );

    let report = cross_validate(&dataset, &EvaluationConfig::default(), NearestCentroid::new)
        .unwrap();
    assert_eq!(report.folds.len(), 5);
    for fold in &report.folds {
        assert_eq!(fold.test_size, 4);
        assert!((0.0..=1.0).contains(&fold.test.accuracy));
        assert_abs_diff_eq!(fold.test.observed_positive_rate, 0.5, epsilon = 1e-12);
    }
}
