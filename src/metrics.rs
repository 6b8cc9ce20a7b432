//! Confusion-matrix metrics for binary classification.
//!
//! Labels are normalised to boolean masks (`1` = positive, `0` = negative)
//! before anything is counted. Every rate is a single division over integer
//! counts, so results are bit-for-bit reproducible.
use crate::error::{LabelSide, MetricsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Number of metrics produced per evaluation.
pub const METRIC_COUNT: usize = 18;

/// Metric keys, in the order [`Metrics::iter`] yields them.
pub const METRIC_NAMES: [&str; METRIC_COUNT] = [
    "observed_positive_rate",
    "observed_negative_rate",
    "predicted_positive_rate",
    "predicted_negative_rate",
    "accuracy",
    "precision",
    "recall",
    "sensitivity",
    "f1",
    "specificity",
    "positive_likelihood",
    "negative_likelihood",
    "false_positive_rate",
    "false_negative_rate",
    "true_positive_rate",
    "true_negative_rate",
    "positive_predictive_value",
    "negative_predictive_value",
];

/// A value usable as a binary class label.
///
/// Implemented for the primitive numeric types, `bool`, and references to
/// any of them, so plain vectors, slices and `ndarray` arrays all feed
/// [`compute_metrics`] the same way.
pub trait BinaryLabel {
    fn label_value(&self) -> f64;
}

macro_rules! impl_binary_label {
    ($($t:ty),*) => {
        $(impl BinaryLabel for $t {
            fn label_value(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

impl_binary_label!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl BinaryLabel for bool {
    fn label_value(&self) -> f64 {
        if *self {
            1.0
        } else {
            0.0
        }
    }
}

impl<T: BinaryLabel + ?Sized> BinaryLabel for &T {
    fn label_value(&self) -> f64 {
        (**self).label_value()
    }
}

/// How the positive/negative predictive values are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictiveValues {
    /// Both values divide by the observed-positive count (`Tp/Op`, `Tn/Op`),
    /// matching the historical notebook output.
    #[default]
    Reference,
    /// Textbook definitions: `Tp/(Tp+Fp)` and `Tn/(Tn+Fn)`.
    Standard,
}

/// What to do when a denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Keep the IEEE result (NaN or infinity) in the output.
    #[default]
    Propagate,
    /// Fail on the first non-finite metric.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsOptions {
    pub predictive_values: PredictiveValues,
    pub degenerate: DegeneratePolicy,
}

/// Partition of a batch into the four confusion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionCounts {
    /// Validate and count a pair of label sequences.
    pub fn from_labels<O, P>(observed: O, predicted: P) -> Result<Self>
    where
        O: IntoIterator,
        O::Item: BinaryLabel,
        P: IntoIterator,
        P::Item: BinaryLabel,
    {
        let observed = positive_mask(observed, LabelSide::Observed)?;
        let predicted = positive_mask(predicted, LabelSide::Predicted)?;
        if observed.len() != predicted.len() {
            return Err(MetricsError::ShapeMismatch {
                observed: observed.len(),
                predicted: predicted.len(),
            });
        }
        if observed.is_empty() {
            return Err(MetricsError::EmptyInput);
        }
        Ok(Self::from_masks(&observed, &predicted))
    }

    fn from_masks(observed: &[bool], predicted: &[bool]) -> Self {
        let mut counts = Self::default();
        for (&obs, &pred) in observed.iter().zip(predicted) {
            match (obs, pred) {
                (true, true) => counts.true_positive += 1,
                (false, true) => counts.false_positive += 1,
                (false, false) => counts.true_negative += 1,
                (true, false) => counts.false_negative += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    pub fn observed_positive(&self) -> usize {
        self.true_positive + self.false_negative
    }

    pub fn observed_negative(&self) -> usize {
        self.true_negative + self.false_positive
    }

    pub fn predicted_positive(&self) -> usize {
        self.true_positive + self.false_positive
    }

    pub fn predicted_negative(&self) -> usize {
        self.true_negative + self.false_negative
    }
}

fn positive_mask<I>(labels: I, side: LabelSide) -> Result<Vec<bool>>
where
    I: IntoIterator,
    I::Item: BinaryLabel,
{
    labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| {
            let value = label.label_value();
            if value == 1.0 {
                Ok(true)
            } else if value == 0.0 {
                Ok(false)
            } else {
                Err(MetricsError::InvalidLabel { side, index, value })
            }
        })
        .collect()
}

/// Classification-quality statistics for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub observed_positive_rate: f64,
    pub observed_negative_rate: f64,
    pub predicted_positive_rate: f64,
    pub predicted_negative_rate: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub sensitivity: f64,
    pub f1: f64,
    pub specificity: f64,
    pub positive_likelihood: f64,
    pub negative_likelihood: f64,
    pub false_positive_rate: f64,
    pub false_negative_rate: f64,
    pub true_positive_rate: f64,
    pub true_negative_rate: f64,
    pub positive_predictive_value: f64,
    pub negative_predictive_value: f64,
}

impl Metrics {
    /// Derive every metric from confusion counts.
    ///
    /// Zero denominators follow IEEE division unless `options.degenerate`
    /// is [`DegeneratePolicy::Reject`].
    pub fn from_counts(counts: &ConfusionCounts, options: &MetricsOptions) -> Result<Self> {
        if counts.total() == 0 {
            return Err(MetricsError::EmptyInput);
        }
        let n = counts.total() as f64;
        let tp = counts.true_positive as f64;
        let fp = counts.false_positive as f64;
        let tn = counts.true_negative as f64;
        let fn_ = counts.false_negative as f64;
        let observed_positive = counts.observed_positive() as f64;
        let observed_negative = counts.observed_negative() as f64;

        let precision = tp / (tp + fp);
        let recall = tp / observed_positive;
        let specificity = tn / observed_negative;
        let (ppv, npv) = match options.predictive_values {
            PredictiveValues::Reference => (tp / observed_positive, tn / observed_positive),
            PredictiveValues::Standard => (tp / (tp + fp), tn / (tn + fn_)),
        };

        let metrics = Self {
            observed_positive_rate: observed_positive / n,
            observed_negative_rate: observed_negative / n,
            predicted_positive_rate: counts.predicted_positive() as f64 / n,
            predicted_negative_rate: counts.predicted_negative() as f64 / n,
            accuracy: (tp + tn) / n,
            precision,
            recall,
            sensitivity: recall,
            f1: 2.0 * (precision * recall) / (precision + recall),
            specificity,
            positive_likelihood: recall / (1.0 - specificity),
            negative_likelihood: (1.0 - recall) / specificity,
            false_positive_rate: 1.0 - specificity,
            false_negative_rate: 1.0 - recall,
            true_positive_rate: recall,
            true_negative_rate: specificity,
            positive_predictive_value: ppv,
            negative_predictive_value: npv,
        };

        if options.degenerate == DegeneratePolicy::Reject {
            if let Some((metric, _)) = metrics.iter().find(|(_, v)| !v.is_finite()) {
                return Err(MetricsError::DegenerateMetric { metric });
            }
        }
        Ok(metrics)
    }

    pub fn names() -> &'static [&'static str; METRIC_COUNT] {
        &METRIC_NAMES
    }

    /// Values in [`METRIC_NAMES`] order.
    pub fn values(&self) -> [f64; METRIC_COUNT] {
        [
            self.observed_positive_rate,
            self.observed_negative_rate,
            self.predicted_positive_rate,
            self.predicted_negative_rate,
            self.accuracy,
            self.precision,
            self.recall,
            self.sensitivity,
            self.f1,
            self.specificity,
            self.positive_likelihood,
            self.negative_likelihood,
            self.false_positive_rate,
            self.false_negative_rate,
            self.true_positive_rate,
            self.true_negative_rate,
            self.positive_predictive_value,
            self.negative_predictive_value,
        ]
    }

    fn from_values(v: [f64; METRIC_COUNT]) -> Self {
        Self {
            observed_positive_rate: v[0],
            observed_negative_rate: v[1],
            predicted_positive_rate: v[2],
            predicted_negative_rate: v[3],
            accuracy: v[4],
            precision: v[5],
            recall: v[6],
            sensitivity: v[7],
            f1: v[8],
            specificity: v[9],
            positive_likelihood: v[10],
            negative_likelihood: v[11],
            false_positive_rate: v[12],
            false_negative_rate: v[13],
            true_positive_rate: v[14],
            true_negative_rate: v[15],
            positive_predictive_value: v[16],
            negative_predictive_value: v[17],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        METRIC_NAMES.into_iter().zip(self.values())
    }

    /// Look a metric up by key.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.iter().find(|(key, _)| *key == name).map(|(_, v)| v)
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().collect()
    }

    /// Element-wise mean over a set of results. NaN in any input makes
    /// that metric's mean NaN.
    pub fn mean(all: &[Metrics]) -> Option<Metrics> {
        if all.is_empty() {
            return None;
        }
        let mut sums = [0.0; METRIC_COUNT];
        for m in all {
            for (sum, v) in sums.iter_mut().zip(m.values()) {
                *sum += v;
            }
        }
        let n = all.len() as f64;
        Some(Self::from_values(sums.map(|s| s / n)))
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{:<27} {:>10.6}", name, value)?;
        }
        Ok(())
    }
}

/// Compute metrics with the default options (reference predictive values,
/// NaN/infinity propagated).
pub fn compute_metrics<O, P>(observed: O, predicted: P) -> Result<Metrics>
where
    O: IntoIterator,
    O::Item: BinaryLabel,
    P: IntoIterator,
    P::Item: BinaryLabel,
{
    compute_metrics_with(observed, predicted, &MetricsOptions::default())
}

pub fn compute_metrics_with<O, P>(
    observed: O,
    predicted: P,
    options: &MetricsOptions,
) -> Result<Metrics>
where
    O: IntoIterator,
    O::Item: BinaryLabel,
    P: IntoIterator,
    P::Item: BinaryLabel,
{
    let counts = ConfusionCounts::from_labels(observed, predicted)?;
    debug!(
        n = counts.total(),
        tp = counts.true_positive,
        fp = counts.false_positive,
        tn = counts.true_negative,
        fn_ = counts.false_negative,
        "computing binary metrics"
    );
    Metrics::from_counts(&counts, options)
}
