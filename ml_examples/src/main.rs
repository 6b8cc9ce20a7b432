// ml_examples/src/main.rs
use anyhow::Result;
use clap::Parser;
use primitive_ml::{
    cross_validate, load_titanic, print_cv_summary, print_metrics_table, undefined_metrics,
    DegeneratePolicy, EvaluationConfig, NearestCentroid, PredictiveValues,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Stratified k-fold evaluation of a survival classifier on Titanic-style data.
#[derive(Debug, Parser)]
#[command(name = "ml_examples", version)]
struct Args {
    /// CSV (or .csv.gz) with PassengerId, Survived and numeric feature columns.
    #[arg(long)]
    data: Option<PathBuf>,

    /// JSON file deserialised into the evaluation config.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    folds: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    no_shuffle: bool,

    /// Use Tp/(Tp+Fp) and Tn/(Tn+Fn) for the predictive values.
    #[arg(long)]
    standard_predictive_values: bool,

    /// Fail instead of reporting NaN/infinite metrics.
    #[arg(long)]
    reject_degenerate: bool,

    /// Write the full report as JSON (gzip if the name ends in .gz).
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn evaluation_config(&self) -> Result<EvaluationConfig> {
        let mut config = match &self.config {
            Some(path) => EvaluationConfig::from_json_file(path)?,
            None => EvaluationConfig::default(),
        };
        if let Some(folds) = self.folds {
            config.folds.n_splits = folds;
        }
        if let Some(seed) = self.seed {
            config.folds.seed = seed;
        }
        if self.no_shuffle {
            config.folds.shuffle = false;
        }
        if self.standard_predictive_values {
            config.metrics.predictive_values = PredictiveValues::Standard;
        }
        if self.reject_degenerate {
            config.metrics.degenerate = DegeneratePolicy::Reject;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.evaluation_config()?;
    let data = args.data.clone().unwrap_or_else(|| {
        PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/data/titanic_sample.csv"
        ))
    });

    println!("=== Titanic Survival ===");
    let dataset = load_titanic(&data)?;
    println!(
        "{} passengers, features: {}",
        dataset.len(),
        dataset.feature_names.join(", ")
    );
    tracing::debug!(config = %serde_json::to_string(&config)?, "evaluation config");

    let report = cross_validate(&dataset, &config, NearestCentroid::new)?;
    print_cv_summary(&report);
    print_metrics_table(&report.mean_test, "Mean held-out metrics");

    let undefined = undefined_metrics(&report.mean_test);
    if !undefined.is_empty() {
        tracing::warn!(metrics = ?undefined, "some metrics are undefined for this data");
    }

    if let Some(path) = &args.report {
        report.save_json(path)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}
