//! Tabular dataset loading (Titanic passenger list and similar CSVs).
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Row-major feature matrix.
pub type Matrix = Vec<Vec<f64>>;

/// Features and binary labels loaded from a delimited file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub features: Matrix,
    pub labels: Vec<u8>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Gather the given rows into a new feature matrix and label vector.
    pub fn select(&self, indices: &[usize]) -> (Matrix, Vec<u8>) {
        let features = indices.iter().map(|&i| self.features[i].clone()).collect();
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        (features, labels)
    }
}

/// Which columns carry the row identifier and the label.
#[derive(Debug, Clone)]
pub struct TabularSpec<'a> {
    /// Dropped if present.
    pub id_column: Option<&'a str>,
    pub label_column: &'a str,
    pub delimiter: u8,
}

impl TabularSpec<'static> {
    pub fn titanic() -> Self {
        Self {
            id_column: Some("PassengerId"),
            label_column: "Survived",
            delimiter: b',',
        }
    }
}

/// Load the Titanic training file: drops `PassengerId`, uses `Survived` as
/// the label and every remaining column as a numeric feature.
pub fn load_titanic(path: impl AsRef<Path>) -> Result<Dataset> {
    load_tabular(path, &TabularSpec::titanic())
}

/// Load a delimited file, decompressing it first if the name ends in `.gz`.
pub fn load_tabular(path: impl AsRef<Path>, spec: &TabularSpec<'_>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let dataset = read_tabular(reader, spec)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        features = dataset.n_features(),
        "loaded tabular dataset"
    );
    Ok(dataset)
}

/// Parse a delimited stream with a header row.
pub fn read_tabular<R: Read>(reader: R, spec: &TabularSpec<'_>) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(spec.delimiter)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| anyhow!("CSV header error: {}", e))?
        .clone();

    let label_idx = headers
        .iter()
        .position(|h| h.trim() == spec.label_column)
        .ok_or_else(|| anyhow!("Missing label column {}", spec.label_column))?;
    let id_idx = spec
        .id_column
        .and_then(|id| headers.iter().position(|h| h.trim() == id));
    let feature_cols: Vec<usize> = (0..headers.len())
        .filter(|&i| i != label_idx && Some(i) != id_idx)
        .collect();
    let feature_names = feature_cols
        .iter()
        .map(|&i| headers[i].trim().to_string())
        .collect();

    let mut features = Vec::new();
    let mut labels = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| anyhow!("CSV parse error: {}", e))?;
        // Header is line 1.
        let line = row + 2;
        let label = parse_cell(&record[label_idx], line, spec.label_column)?;
        let label = match label {
            l if l == 0.0 => 0,
            l if l == 1.0 => 1,
            other => {
                return Err(anyhow!(
                    "Line {}: label {} must be 0 or 1, got {}",
                    line,
                    spec.label_column,
                    other
                ))
            }
        };
        let row_features = feature_cols
            .iter()
            .map(|&i| parse_cell(&record[i], line, headers[i].trim()))
            .collect::<Result<Vec<f64>>>()?;
        features.push(row_features);
        labels.push(label);
    }
    if labels.is_empty() {
        return Err(anyhow!("No rows loaded"));
    }
    Ok(Dataset {
        feature_names,
        features,
        labels,
    })
}

fn parse_cell(cell: &str, line: usize, column: &str) -> Result<f64> {
    let cell = cell.trim().trim_matches('"');
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(anyhow!(
            "Line {}: column {} is not numeric: {:?}",
            line,
            column,
            cell
        )),
    }
}
