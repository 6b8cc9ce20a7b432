//! A small binary-classification toolkit for educational use: confusion-matrix
//! metrics, min-max scaling, stratified k-fold splits and a cross-validation
//! loop around any [`Classifier`].
//!
//! - Metrics engine over 0/1 label sequences (vectors, slices, `ndarray`)
//! - Titanic-style CSV loader (plain or gzip)
//! - `MinMaxScaler`, `StratifiedKFold`
//! - `cross_validate` with per-fold train/test metrics and JSON reports

pub mod error;
pub mod metrics;
pub mod datasets;
pub mod preprocessing;
pub mod cross_validation;
pub mod model;
pub mod evaluation;
pub mod utils;

pub use error::{LabelSide, MetricsError, Result};
pub use metrics::{
    compute_metrics, compute_metrics_with, BinaryLabel, ConfusionCounts, DegeneratePolicy,
    Metrics, MetricsOptions, PredictiveValues, METRIC_NAMES,
};
pub use datasets::{load_tabular, load_titanic, Dataset, TabularSpec};
pub use preprocessing::MinMaxScaler;
pub use cross_validation::{Fold, StratifiedKFold};
pub use model::{argmax_labels, threshold_labels, Classifier, NearestCentroid};
pub use evaluation::{cross_validate, CrossValidationReport, EvaluationConfig, FoldReport};
pub use utils::{print_cv_summary, print_metrics_table, undefined_metrics};
