//! K-fold train/evaluate loop.
//!
//! Each fold: fit a [`MinMaxScaler`] on the training rows, scale both
//! partitions, train a fresh classifier, then score both partitions.
use crate::cross_validation::StratifiedKFold;
use crate::datasets::Dataset;
use crate::error::{MetricsError, Result};
use crate::metrics::{compute_metrics_with, Metrics, MetricsOptions};
use crate::model::Classifier;
use crate::preprocessing::MinMaxScaler;
use anyhow::Context;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Settings for a cross-validation run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub folds: StratifiedKFold,
    pub metrics: MetricsOptions,
}

impl EvaluationConfig {
    /// Read a JSON config; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        serde_json::from_reader(file).with_context(|| format!("Invalid config {}", path.display()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FoldReport {
    pub fold: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub train: Metrics,
    pub test: Metrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrossValidationReport {
    pub folds: Vec<FoldReport>,
    pub mean_train: Metrics,
    pub mean_test: Metrics,
}

impl CrossValidationReport {
    /// Write pretty JSON, gzip-compressed when the path ends in `.gz`.
    /// Non-finite metrics are written as `null`.
    pub fn save_json(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        if path.extension().is_some_and(|ext| ext == "gz") {
            let mut enc = GzEncoder::new(file, Compression::default());
            enc.write_all(&json)?;
            enc.finish()?;
        } else {
            let mut out = BufWriter::new(file);
            out.write_all(&json)?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Run stratified k-fold cross-validation, building a fresh model per fold
/// with `make_model`.
pub fn cross_validate<C, F>(
    dataset: &Dataset,
    config: &EvaluationConfig,
    mut make_model: F,
) -> Result<CrossValidationReport>
where
    C: Classifier,
    F: FnMut() -> C,
{
    let folds = config.folds.split(&dataset.labels)?;
    let mut reports = Vec::with_capacity(folds.len());
    for fold in &folds {
        let (train_x, train_y) = dataset.select(&fold.train_indices);
        let (test_x, test_y) = dataset.select(&fold.test_indices);

        let mut scaler = MinMaxScaler::new();
        let train_x = scaler.fit_transform(&train_x)?;
        let test_x = scaler.transform(&test_x)?;

        let mut model = make_model();
        model.fit(&train_x, &train_y)?;
        let train = compute_metrics_with(&train_y, &model.predict(&train_x)?, &config.metrics)?;
        let test = compute_metrics_with(&test_y, &model.predict(&test_x)?, &config.metrics)?;
        info!(
            fold = fold.index + 1,
            train_accuracy = train.accuracy,
            test_accuracy = test.accuracy,
            test_f1 = test.f1,
            "fold complete"
        );
        reports.push(FoldReport {
            fold: fold.index,
            train_size: train_y.len(),
            test_size: test_y.len(),
            train,
            test,
        });
    }

    let train_all: Vec<Metrics> = reports.iter().map(|r| r.train).collect();
    let test_all: Vec<Metrics> = reports.iter().map(|r| r.test).collect();
    // split() guarantees at least two folds
    let (mean_train, mean_test) = match (Metrics::mean(&train_all), Metrics::mean(&test_all)) {
        (Some(train), Some(test)) => (train, test),
        _ => return Err(MetricsError::EmptyInput),
    };
    Ok(CrossValidationReport {
        folds: reports,
        mean_train,
        mean_test,
    })
}
