//! Predictor interface and a distance-based baseline.
//!
//! Neural networks and other trained predictors live outside this crate;
//! anything that can fit on a feature matrix and emit 0/1 labels plugs into
//! the cross-validation harness through [`Classifier`].
//!
//! [`argmax_labels`] and [`threshold_labels`] are adapter helpers for
//! `Classifier::predict` implementations that wrap such a predictor: they
//! turn per-class scores or a positive-class probability into 0/1 labels.
use crate::error::{MetricsError, Result};

/// A binary classifier trained on row-major features.
pub trait Classifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<()>;

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<u8>>;
}

/// Predicts the class whose mean training vector is closest (Euclidean).
/// Ties go to class 0.
#[derive(Debug, Clone, Default)]
pub struct NearestCentroid {
    centroids: Option<[Vec<f64>; 2]>,
}

impl NearestCentroid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn centroids(&self) -> Option<&[Vec<f64>; 2]> {
        self.centroids.as_ref()
    }
}

impl Classifier for NearestCentroid {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<()> {
        if features.len() != labels.len() {
            return Err(MetricsError::RowCountMismatch {
                rows: features.len(),
                labels: labels.len(),
            });
        }
        let width = features.first().ok_or(MetricsError::EmptyInput)?.len();
        let mut sums = [vec![0.0; width], vec![0.0; width]];
        let mut counts = [0usize; 2];
        for (row, &label) in features.iter().zip(labels) {
            if row.len() != width {
                return Err(MetricsError::Dimension {
                    expected: width,
                    actual: row.len(),
                });
            }
            let class = usize::from(label);
            if class > 1 {
                return Err(MetricsError::invalid_parameter(
                    "labels",
                    format!("expected 0 or 1, got {}", label),
                ));
            }
            counts[class] += 1;
            for (s, &x) in sums[class].iter_mut().zip(row) {
                *s += x;
            }
        }
        if counts.contains(&0) {
            return Err(MetricsError::invalid_parameter(
                "labels",
                "training rows must include both classes",
            ));
        }
        let [mut neg, mut pos] = sums;
        neg.iter_mut().for_each(|s| *s /= counts[0] as f64);
        pos.iter_mut().for_each(|s| *s /= counts[1] as f64);
        self.centroids = Some([neg, pos]);
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<u8>> {
        let [neg, pos] = self
            .centroids
            .as_ref()
            .ok_or(MetricsError::NotFitted("NearestCentroid"))?;
        features
            .iter()
            .map(|row| {
                if row.len() != neg.len() {
                    return Err(MetricsError::Dimension {
                        expected: neg.len(),
                        actual: row.len(),
                    });
                }
                let d_neg = squared_distance(row, neg);
                let d_pos = squared_distance(row, pos);
                Ok(u8::from(d_pos < d_neg))
            })
            .collect()
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| (x - y).powi(2)).sum()
}

/// Index of the highest score in each row, as a network's per-class output
/// would be read. Ties resolve to the lower class.
pub fn argmax_labels(scores: &[Vec<f64>]) -> Vec<u8> {
    scores
        .iter()
        .map(|row| {
            let best = row
                .iter()
                .enumerate()
                .fold(0usize, |max_i, (i, &v)| if v > row[max_i] { i } else { max_i });
            u8::from(best > 0)
        })
        .collect()
}

/// `1` where the positive-class probability reaches `threshold`.
pub fn threshold_labels(probabilities: &[f64], threshold: f64) -> Vec<u8> {
    probabilities
        .iter()
        .map(|&p| u8::from(p >= threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_centroid_separates_clusters() {
        let x = vec![
            vec![0.0, 0.1],
            vec![0.1, 0.0],
            vec![0.9, 1.0],
            vec![1.0, 0.9],
        ];
        let y = vec![0, 0, 1, 1];
        let mut model = NearestCentroid::new();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict(&x).unwrap(), y);
        assert_eq!(
            model.predict(&[vec![0.2, 0.2], vec![0.8, 0.7]]).unwrap(),
            vec![0, 1]
        );
        let [neg, _] = model.centroids().unwrap();
        assert!((neg[0] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn nearest_centroid_errors() {
        let model = NearestCentroid::new();
        assert_eq!(
            model.predict(&[vec![1.0]]).unwrap_err(),
            MetricsError::NotFitted("NearestCentroid")
        );

        let mut model = NearestCentroid::new();
        assert!(model.fit(&[vec![1.0], vec![2.0]], &[1, 1]).is_err());
        assert_eq!(
            model.fit(&[vec![1.0]], &[0, 1]).unwrap_err(),
            MetricsError::RowCountMismatch { rows: 1, labels: 2 }
        );
        assert!(model.fit(&[vec![1.0], vec![2.0]], &[0, 3]).is_err());
    }

    #[test]
    fn score_conversions() {
        let scores = vec![vec![0.2, 0.8], vec![0.7, 0.3], vec![0.5, 0.5]];
        assert_eq!(argmax_labels(&scores), vec![1, 0, 0]);
        assert_eq!(threshold_labels(&[0.49, 0.5, 0.9], 0.5), vec![0, 1, 1]);
    }
}
