//! Stratified k-fold splitting.
use crate::error::{MetricsError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub index: usize,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// K-fold splitter that keeps each fold's class ratio close to the whole set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StratifiedKFold {
    pub n_splits: usize,
    pub shuffle: bool,
    pub seed: u64,
}

impl Default for StratifiedKFold {
    fn default() -> Self {
        Self {
            n_splits: 5,
            shuffle: true,
            seed: 42,
        }
    }
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            ..Self::default()
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Partition `0..labels.len()` into `n_splits` folds.
    ///
    /// Classes are dealt round-robin in ascending label order and the fold
    /// cursor carries over between classes, so fold sizes differ by at most
    /// one.
    pub fn split<L: Copy + Ord>(&self, labels: &[L]) -> Result<Vec<Fold>> {
        if self.n_splits < 2 {
            return Err(MetricsError::invalid_parameter(
                "n_splits",
                format!("must be at least 2, got {}", self.n_splits),
            ));
        }
        if labels.len() < self.n_splits {
            return Err(MetricsError::invalid_parameter(
                "n_splits",
                format!(
                    "{} folds requested for only {} samples",
                    self.n_splits,
                    labels.len()
                ),
            ));
        }

        let mut by_class: BTreeMap<L, Vec<usize>> = BTreeMap::new();
        for (idx, &label) in labels.iter().enumerate() {
            by_class.entry(label).or_default().push(idx);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut test_sets: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];
        let mut cursor = 0;
        for indices in by_class.values_mut() {
            if self.shuffle {
                indices.shuffle(&mut rng);
            }
            for &idx in indices.iter() {
                test_sets[cursor % self.n_splits].push(idx);
                cursor += 1;
            }
        }

        let folds = (0..self.n_splits)
            .map(|index| {
                let mut test_indices = test_sets[index].clone();
                test_indices.sort_unstable();
                let mut train_indices: Vec<usize> = test_sets
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .flat_map(|(_, set)| set.iter().copied())
                    .collect();
                train_indices.sort_unstable();
                Fold {
                    index,
                    train_indices,
                    test_indices,
                }
            })
            .collect();
        Ok(folds)
    }
}
