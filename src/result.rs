//! Final label assembly.
//!
//! Converts the per-point [`Label`] array into the boundary representation:
//! dense cluster ids `0..K-1` (ordered by internal id), [`NOISE`] for noise,
//! plus member lists and core samples.

use crate::types::{Label, NOISE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a clustering run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbscanResult {
    /// One entry per input point: cluster id in `0..n_clusters`, or `-1`.
    pub labels: Vec<i32>,
    pub n_clusters: usize,
    /// Member indices of each cluster, ascending.
    pub clusters: Vec<Vec<usize>>,
    /// Indices of core points, ascending.
    pub core_sample_indices: Vec<usize>,
}

impl DbscanResult {
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE).count()
    }

    pub fn noise_indices(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(i, &l)| (l == NOISE).then_some(i))
            .collect()
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }

    /// Labels with noise as `0` and clusters numbered from `1`.
    pub fn one_based_labels(&self) -> Vec<usize> {
        self.labels
            .iter()
            .map(|&l| if l == NOISE { 0 } else { l as usize + 1 })
            .collect()
    }
}

/// Builds a [`DbscanResult`] from the expansion state.
///
/// Internal ids may be sparse; they are compacted in ascending order. Points
/// still `Unvisited` (which a complete expansion never leaves behind) are
/// reported as noise.
pub fn assemble(labels: &[Label], core: &[bool]) -> DbscanResult {
    let dense: BTreeMap<u32, usize> = labels
        .iter()
        .filter_map(|l| l.cluster())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(dense, internal)| (internal, dense))
        .collect();

    let mut clusters = vec![Vec::new(); dense.len()];
    let out_labels: Vec<i32> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| match l.cluster() {
            Some(id) => {
                let k = dense[&id];
                clusters[k].push(i);
                k as i32
            }
            None => NOISE,
        })
        .collect();

    let core_sample_indices: Vec<usize> = core
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| c.then_some(i))
        .collect();

    DbscanResult {
        labels: out_labels,
        n_clusters: dense.len(),
        clusters,
        core_sample_indices,
    }
}
