//! Console summaries for evaluation results.
use crate::evaluation::CrossValidationReport;
use crate::metrics::{Metrics, METRIC_NAMES};

/// Print one metrics result as a two-column table.
pub fn print_metrics_table(metrics: &Metrics, title: &str) {
    println!("\n{}:", title);
    println!("+-----------------------------+------------+");
    println!("| Metric                      | Value      |");
    println!("+-----------------------------+------------+");
    for (name, value) in metrics.iter() {
        println!("| {:<27} | {:>10.6} |", name, value);
    }
    println!("+-----------------------------+------------+");
}

/// Print per-fold test accuracy/F1 followed by fold means.
pub fn print_cv_summary(report: &CrossValidationReport) {
    println!("\nCross-validation Summary Table:");
    println!("+------+----------+----------+----------+");
    println!("| Fold | Train Acc| Test Acc | Test F1  |");
    println!("+------+----------+----------+----------+");
    for fold in &report.folds {
        println!(
            "| {:>4} | {:>8.4} | {:>8.4} | {:>8.4} |",
            fold.fold + 1,
            fold.train.accuracy,
            fold.test.accuracy,
            fold.test.f1
        );
    }
    println!("+------+----------+----------+----------+");
    println!(
        "| Mean | {:>8.4} | {:>8.4} | {:>8.4} |",
        report.mean_train.accuracy, report.mean_test.accuracy, report.mean_test.f1
    );
    println!("+------+----------+----------+----------+");
}

/// Metric names that came out NaN or infinite.
pub fn undefined_metrics(metrics: &Metrics) -> Vec<&'static str> {
    METRIC_NAMES
        .iter()
        .zip(metrics.values())
        .filter(|(_, v)| !v.is_finite())
        .map(|(name, _)| *name)
        .collect()
}
