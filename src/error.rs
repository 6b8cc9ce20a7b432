//! Error types for metric computation and the evaluation pipeline.
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Which label sequence an invalid value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Observed,
    Predicted,
}

impl std::fmt::Display for LabelSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelSide::Observed => write!(f, "observed"),
            LabelSide::Predicted => write!(f, "predicted"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("shape mismatch: {observed} observed labels vs {predicted} predicted labels")]
    ShapeMismatch { observed: usize, predicted: usize },

    #[error("invalid {side} label {value} at index {index}: expected 0 or 1")]
    InvalidLabel {
        side: LabelSide,
        index: usize,
        value: f64,
    },

    #[error("cannot compute metrics on empty label sequences")]
    EmptyInput,

    #[error("metric `{metric}` is undefined for this class distribution")]
    DegenerateMetric { metric: &'static str },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("{rows} feature rows but {labels} labels")]
    RowCountMismatch { rows: usize, labels: usize },

    #[error("dimension mismatch: expected {expected} columns, got {actual}")]
    Dimension { expected: usize, actual: usize },

    #[error("{0} used before fit")]
    NotFitted(&'static str),
}

impl MetricsError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        MetricsError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = MetricsError::InvalidLabel {
            side: LabelSide::Predicted,
            index: 3,
            value: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid predicted label 2 at index 3: expected 0 or 1"
        );

        let err = MetricsError::DegenerateMetric { metric: "precision" };
        assert!(err.to_string().contains("`precision`"));
    }
}
