//! Minimal directed weighted graph over a fixed node set, stored as an
//! edge triplet list with conversions to and from a CSR adjacency.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::{CooMatrix, CsrMatrix};

/// Velocity transition strengths at or below this value are treated as
/// absent when building a graph from a raw transition matrix.
pub const DEFAULT_STRENGTH_CUTOFF: f64 = 0.1;

/// A directed weighted graph with a declared number of nodes. Nodes
/// beyond the largest edge endpoint are legal and simply isolated.
#[derive(Debug, Clone)]
pub struct DiGraph {
    nodes: usize,
    edges: Vec<(usize, usize, f64)>,
}

impl DiGraph {
    /// An edgeless graph of `nodes` isolated nodes.
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    /// Builds a graph from parallel triplet slices. Zero edges is a valid
    /// empty graph, indices beyond `nodes` are an error, and a declared
    /// dimension larger than any used index only logs a warning.
    pub fn from_triplets(
        nodes: usize,
        rows: &[usize],
        cols: &[usize],
        weights: &[f64],
    ) -> Result<Self> {
        if rows.len() != cols.len() {
            return Err(Error::DimensionMismatch {
                expected: rows.len(),
                found: cols.len(),
            });
        }
        if rows.len() != weights.len() {
            return Err(Error::DimensionMismatch {
                expected: rows.len(),
                found: weights.len(),
            });
        }

        let mut edges = Vec::with_capacity(rows.len());
        let mut max_index = None;
        for ((&u, &v), &w) in rows.iter().zip(cols.iter()).zip(weights.iter()) {
            for index in [u, v] {
                if index >= nodes {
                    return Err(Error::IndexOutOfBounds { index, nodes });
                }
            }
            if !w.is_finite() {
                return Err(Error::NonFiniteWeight { row: u, col: v });
            }
            max_index = Some(max_index.map_or(u.max(v), |m: usize| m.max(u).max(v)));
            edges.push((u, v, w));
        }

        if let Some(max_index) = max_index {
            if max_index + 1 < nodes {
                warn!(
                    "adjacency uses only {} of {} declared nodes, the rest are isolated",
                    max_index + 1,
                    nodes
                );
            }
        }

        Ok(Self { nodes, edges })
    }

    /// Builds a graph from every stored nonzero of a CSR adjacency.
    pub fn from_adjacency(adj: &CsrMatrix) -> Self {
        let mut edges = Vec::with_capacity(adj.nnz());
        for (u, row) in adj.outer_iterator().enumerate() {
            for (v, w) in row.iter() {
                if *w != 0.0 {
                    edges.push((u, v, *w));
                }
            }
        }
        Self {
            nodes: adj.rows(),
            edges,
        }
    }

    /// Like [`DiGraph::from_adjacency`] but drops entries at or below the
    /// strength cutoff, keeping the surviving weights as-is.
    pub fn from_adjacency_thresholded(adj: &CsrMatrix, cutoff: f64) -> Self {
        let mut edges = Vec::new();
        for (u, row) in adj.outer_iterator().enumerate() {
            for (v, w) in row.iter() {
                if *w > cutoff {
                    edges.push((u, v, *w));
                }
            }
        }
        Self {
            nodes: adj.rows(),
            edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over `(source, target, weight)` triplets.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.edges.iter().copied()
    }

    /// Converts back to a CSR adjacency; duplicate triplets accumulate.
    pub fn to_adjacency(&self) -> CsrMatrix {
        let mut coo = CooMatrix::new((self.nodes, self.nodes));
        for &(u, v, w) in &self.edges {
            coo.add_triplet(u, v, w);
        }
        coo.to_csr::<usize>()
    }

    /// Symmetrizes the graph: an edge pair present in both directions
    /// carries the summed weight on both orientations, a one-directional
    /// edge gains a reverse edge of the same weight. Self-loops are kept
    /// unchanged.
    pub fn to_undirected(&self) -> DiGraph {
        let mut directed: HashMap<(usize, usize), f64> = HashMap::new();
        for &(u, v, w) in &self.edges {
            *directed.entry((u, v)).or_insert(0.0) += w;
        }

        let mut edges = Vec::with_capacity(directed.len() * 2);
        for (&(u, v), &w) in &directed {
            if u == v {
                edges.push((u, v, w));
            } else if u < v || !directed.contains_key(&(v, u)) {
                let total = w + directed.get(&(v, u)).copied().unwrap_or(0.0);
                edges.push((u, v, total));
                edges.push((v, u, total));
            }
        }
        DiGraph {
            nodes: self.nodes,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_graph_is_valid() {
        let graph = DiGraph::from_triplets(4, &[], &[], &[]).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 0);
        let adj = graph.to_adjacency();
        assert_eq!(adj.rows(), 4);
        assert_eq!(adj.nnz(), 0);
    }

    #[test]
    fn excess_nodes_are_isolated_not_an_error() {
        let graph = DiGraph::from_triplets(5, &[0], &[1], &[1.0]).unwrap();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let err = DiGraph::from_triplets(2, &[0], &[2], &[1.0]).unwrap_err();
        assert_eq!(err, Error::IndexOutOfBounds { index: 2, nodes: 2 });
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let err = DiGraph::from_triplets(2, &[0], &[1], &[f64::NAN]).unwrap_err();
        assert_eq!(err, Error::NonFiniteWeight { row: 0, col: 1 });
    }

    #[test]
    fn undirected_sums_reciprocal_edges_and_mirrors_single_ones() {
        let graph =
            DiGraph::from_triplets(3, &[0, 1, 1], &[1, 0, 2], &[2.0, 3.0, 1.0]).unwrap();
        let sym = graph.to_undirected().to_adjacency().to_dense();
        assert_abs_diff_eq!(sym[[0, 1]], 5.0);
        assert_abs_diff_eq!(sym[[1, 0]], 5.0);
        assert_abs_diff_eq!(sym[[1, 2]], 1.0);
        assert_abs_diff_eq!(sym[[2, 1]], 1.0);
        assert_abs_diff_eq!(sym[[0, 2]], 0.0);
    }

    #[test]
    fn strength_cutoff_drops_weak_entries() {
        let mut coo = CooMatrix::new((2, 2));
        coo.add_triplet(0, 1, 0.05);
        coo.add_triplet(1, 0, 0.4);
        let adj = coo.to_csr::<usize>();

        let graph = DiGraph::from_adjacency_thresholded(&adj, DEFAULT_STRENGTH_CUTOFF);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(1, 0, 0.4)]);
    }
}
