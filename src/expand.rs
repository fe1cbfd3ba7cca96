//! Cluster expansion: the DBSCAN state machine.
//!
//! Seeds are visited in index order. A seed whose neighborhood holds fewer
//! than `min_samples` points is marked `Noise` (tentatively); otherwise it
//! opens a new cluster and its neighborhood is expanded breadth-first through
//! a FIFO frontier:
//!
//! - `Unvisited` neighbor: claimed for the cluster and queued. When dequeued,
//!   its own neighborhood is fetched and, if it is a core point, its
//!   neighbors are claimed in turn.
//! - `Noise` neighbor: absorbed as a border point, never expanded.
//! - Neighbor already in a cluster: left alone (first expansion wins).
//!
//! Every point is queried exactly once, either as a seed or when dequeued, so
//! the core/non-core decision is known for all points at the end.

use crate::neighbors::NeighborQuery;
use crate::types::Label;
use log::debug;
use std::collections::VecDeque;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Frontier levels smaller than this are evaluated on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_LEVEL_MIN: usize = 64;

/// Raw outcome of an expansion run, before relabeling.
#[derive(Clone, Debug)]
pub struct Expansion {
    pub labels: Vec<Label>,
    pub core: Vec<bool>,
    pub n_clusters: u32,
    pub stats: ExpansionStats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Neighborhood queries issued.
    pub queries: usize,
    /// Largest number of points waiting in one frontier.
    pub max_frontier: usize,
}

/// Runs DBSCAN over every point reachable through `neighbors`.
///
/// With `parallel` (and the `parallel` feature) each frontier level has its
/// neighborhoods computed concurrently and merged in frontier order, which
/// yields exactly the labels of the sequential FIFO expansion.
pub fn expand_clusters(
    neighbors: &NeighborQuery<'_>,
    min_samples: usize,
    parallel: bool,
) -> Expansion {
    let n = neighbors.len();
    let mut state = State {
        labels: vec![Label::Unvisited; n],
        core: vec![false; n],
        stats: ExpansionStats::default(),
    };
    let mut hood = Vec::new();
    let mut next_id = 0u32;

    for seed in 0..n {
        if !state.labels[seed].is_unvisited() {
            continue;
        }
        neighbors.neighborhood_into(seed, &mut hood);
        state.stats.queries += 1;
        if hood.len() < min_samples {
            state.labels[seed] = Label::Noise;
            continue;
        }

        let id = next_id;
        next_id += 1;
        state.labels[seed] = Label::Cluster(id);
        state.core[seed] = true;

        if use_levels(parallel) {
            state.grow_leveled(neighbors, &hood, id, min_samples);
        } else {
            state.grow_fifo(neighbors, &hood, id, min_samples);
        }
    }

    debug!(
        "expand_clusters n={} clusters={} queries={} max_frontier={}",
        n, next_id, state.stats.queries, state.stats.max_frontier
    );

    Expansion {
        labels: state.labels,
        core: state.core,
        n_clusters: next_id,
        stats: state.stats,
    }
}

struct State {
    labels: Vec<Label>,
    core: Vec<bool>,
    stats: ExpansionStats,
}

impl State {
    /// Claims the members of a core point's neighborhood for cluster `id`,
    /// pushing newly visited points onto the frontier.
    fn claim(&mut self, hood: &[usize], id: u32, mut push: impl FnMut(usize)) {
        for &j in hood {
            match self.labels[j] {
                Label::Unvisited => {
                    self.labels[j] = Label::Cluster(id);
                    push(j);
                }
                Label::Noise => self.labels[j] = Label::Cluster(id),
                Label::Cluster(_) => {}
            }
        }
    }

    fn grow_fifo(
        &mut self,
        neighbors: &NeighborQuery<'_>,
        seed_hood: &[usize],
        id: u32,
        min_samples: usize,
    ) {
        let mut frontier = VecDeque::new();
        self.claim(seed_hood, id, |j| frontier.push_back(j));
        let mut hood = Vec::new();
        while let Some(q) = frontier.pop_front() {
            self.stats.max_frontier = self.stats.max_frontier.max(frontier.len() + 1);
            neighbors.neighborhood_into(q, &mut hood);
            self.stats.queries += 1;
            if hood.len() >= min_samples {
                self.core[q] = true;
                self.claim(&hood, id, |j| frontier.push_back(j));
            }
        }
    }

    fn grow_leveled(
        &mut self,
        neighbors: &NeighborQuery<'_>,
        seed_hood: &[usize],
        id: u32,
        min_samples: usize,
    ) {
        let mut level = Vec::new();
        self.claim(seed_hood, id, |j| level.push(j));
        while !level.is_empty() {
            self.stats.max_frontier = self.stats.max_frontier.max(level.len());
            self.stats.queries += level.len();
            let hoods = level_neighborhoods(neighbors, &level);
            let mut next = Vec::new();
            for (&q, hood) in level.iter().zip(&hoods) {
                if hood.len() >= min_samples {
                    self.core[q] = true;
                    self.claim(hood, id, |j| next.push(j));
                }
            }
            level = next;
        }
    }
}

#[cfg(feature = "parallel")]
fn use_levels(parallel: bool) -> bool {
    parallel
}

#[cfg(not(feature = "parallel"))]
fn use_levels(_parallel: bool) -> bool {
    false
}

#[cfg(feature = "parallel")]
fn level_neighborhoods(neighbors: &NeighborQuery<'_>, level: &[usize]) -> Vec<Vec<usize>> {
    if level.len() >= PARALLEL_LEVEL_MIN {
        level.par_iter().map(|&q| neighbors.neighborhood(q)).collect()
    } else {
        level.iter().map(|&q| neighbors.neighborhood(q)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn level_neighborhoods(neighbors: &NeighborQuery<'_>, level: &[usize]) -> Vec<Vec<usize>> {
    level.iter().map(|&q| neighbors.neighborhood(q)).collect()
}
