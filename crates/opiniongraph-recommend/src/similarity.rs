use ndarray::{Array2, Axis};
use opiniongraph_core::{GraphView, NodeId};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::time::Instant;
use tracing::{debug, info};

/// Pairwise shared-neighbor counts for every unordered node pair.
///
/// Only the upper triangle (`u < v`) is ever written; all reads go through
/// [`SimilarityMatrix::similarity_of`], which canonicalizes the index order.
/// The stored invariant is `M[u][v] == |N(u) ∩ N(v)|` with
/// `N(x) = Pred(x) ∪ Succ(x)`.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    counts: Array2<u32>,
}

/// `|a ∩ b|`, iterating the smaller set and probing the larger one.
fn shared_neighbor_count(a: &FxHashSet<NodeId>, b: &FxHashSet<NodeId>) -> u32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|w| large.contains(w)).count() as u32
}

impl SimilarityMatrix {
    /// Full O(n²) build over every unordered pair. Neighbor sets are fetched
    /// once per node, then rows are filled in parallel.
    pub fn build(graph: &dyn GraphView) -> Self {
        let start = Instant::now();
        let n = graph.node_count();
        let neighbor_sets: Vec<FxHashSet<NodeId>> = (0..n).map(|u| graph.neighbors(u)).collect();

        let mut counts = Array2::<u32>::zeros((n, n));
        counts
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(u, mut row)| {
                for v in (u + 1)..n {
                    row[v] = shared_neighbor_count(&neighbor_sets[u], &neighbor_sets[v]);
                }
            });

        info!(
            nodes = n,
            pairs = n.saturating_sub(1) * n / 2,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built structural similarity matrix"
        );
        Self { counts }
    }

    /// Recompute entries for pairs where **both** endpoints are in
    /// `changed`. Pairs with exactly one changed endpoint keep their old
    /// value (narrow invalidation; an open question tracked in DESIGN.md).
    pub fn update(&mut self, graph: &dyn GraphView, changed: &[NodeId]) {
        let n = self.node_count();
        let mut ids: Vec<NodeId> = changed.to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert!(
            ids.last().map_or(true, |&id| id < n),
            "changed node id outside range 0..{n}"
        );

        let sets: Vec<FxHashSet<NodeId>> = ids.iter().map(|&u| graph.neighbors(u)).collect();
        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(ids.len() * ids.len() / 2);
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                pairs.push((i, j));
            }
        }

        // Writes target disjoint cells, so the counts are computed in
        // parallel and committed in one sequential pass.
        let fresh: Vec<u32> = pairs
            .par_iter()
            .map(|&(i, j)| shared_neighbor_count(&sets[i], &sets[j]))
            .collect();
        for (&(i, j), count) in pairs.iter().zip(fresh) {
            self.counts[[ids[i], ids[j]]] = count;
        }
        debug!(
            changed = ids.len(),
            pairs = pairs.len(),
            "refreshed similarity entries"
        );
    }

    /// Shared-neighbor count for the pair `{a, b}`, read from the canonical
    /// `(min, max)` cell. Panics if `a == b` or either id is out of range.
    pub fn similarity_of(&self, a: NodeId, b: NodeId) -> u32 {
        assert!(a != b, "similarity of a node with itself is undefined");
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        self.counts[[lo, hi]]
    }

    pub fn node_count(&self) -> usize {
        self.counts.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.nrows() == 0
    }
}
