//! Per-column min-max scaling.
use crate::error::{MetricsError, Result};
use serde::{Deserialize, Serialize};

/// Scales each column to `[0, 1]` using bounds learned from training rows.
///
/// Held-out rows are transformed with the training bounds and may land
/// outside `[0, 1]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    range: Vec<f64>,
    fitted: bool,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn per-column min and max. Constant columns get a range of 1.
    pub fn fit(&mut self, rows: &[Vec<f64>]) -> Result<&mut Self> {
        let first = rows.first().ok_or(MetricsError::EmptyInput)?;
        let n_cols = first.len();
        let mut min = vec![f64::INFINITY; n_cols];
        let mut max = vec![f64::NEG_INFINITY; n_cols];
        for row in rows {
            check_width(n_cols, row)?;
            for (j, &x) in row.iter().enumerate() {
                min[j] = min[j].min(x);
                max[j] = max[j].max(x);
            }
        }
        self.range = min
            .iter()
            .zip(&max)
            .map(|(&lo, &hi)| if hi - lo == 0.0 { 1.0 } else { hi - lo })
            .collect();
        self.min = min;
        self.fitted = true;
        Ok(self)
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if !self.fitted {
            return Err(MetricsError::NotFitted("MinMaxScaler"));
        }
        rows.iter()
            .map(|row| {
                check_width(self.min.len(), row)?;
                Ok(row
                    .iter()
                    .zip(self.min.iter().zip(&self.range))
                    .map(|(&x, (&lo, &range))| (x - lo) / range)
                    .collect())
            })
            .collect()
    }

    pub fn fit_transform(&mut self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(rows)?;
        self.transform(rows)
    }
}

fn check_width(expected: usize, row: &[f64]) -> Result<()> {
    if row.len() != expected {
        return Err(MetricsError::Dimension {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}
