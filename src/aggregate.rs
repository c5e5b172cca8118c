//! Coarsens a fine-grained cell graph onto a partition of its nodes by
//! summing the edge weights that cross each ordered group pair.

use crate::error::{Error, Result};
use crate::graph::DiGraph;
use crate::{CooMatrix, CsrMatrix};

/// A fixed assignment of every node to exactly one group. Label order
/// defines the group indices used by every downstream matrix.
#[derive(Debug, Clone)]
pub struct Partition {
    labels: Vec<String>,
    membership: Vec<usize>,
}

impl Partition {
    /// Validates that every membership index refers to one of `labels`.
    /// Groups with zero members are accepted here; they only become an
    /// error if the confidence stage needs their null-model expectation.
    pub fn new(labels: Vec<String>, membership: Vec<usize>) -> Result<Self> {
        let groups = labels.len();
        for &index in &membership {
            if index >= groups {
                return Err(Error::GroupIndexOutOfBounds { index, groups });
            }
        }
        Ok(Self { labels, membership })
    }

    /// Number of fine-grained nodes.
    pub fn len(&self) -> usize {
        self.membership.len()
    }

    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn group_of(&self, node: usize) -> usize {
        self.membership[node]
    }

    /// Index of a group label, for resolving an externally chosen root.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Member count per group.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.labels.len()];
        for &group in &self.membership {
            sizes[group] += 1;
        }
        sizes
    }
}

/// Optional node-level masks: edges out of sink members and edges into
/// root members are suppressed before aggregation. Both vectors, when
/// present, must have one entry per fine-grained node.
#[derive(Debug, Clone, Default)]
pub struct NodeMasks {
    pub roots: Option<Vec<bool>>,
    pub sinks: Option<Vec<bool>>,
}

impl NodeMasks {
    fn validate(&self, nodes: usize) -> Result<()> {
        for mask in [&self.roots, &self.sinks].into_iter().flatten() {
            if mask.len() != nodes {
                return Err(Error::DimensionMismatch {
                    expected: nodes,
                    found: mask.len(),
                });
            }
        }
        Ok(())
    }

    fn keeps(&self, source: usize, target: usize) -> bool {
        if let Some(sinks) = &self.sinks {
            if sinks[source] {
                return false;
            }
        }
        if let Some(roots) = &self.roots {
            if roots[target] {
                return false;
            }
        }
        true
    }
}

/// Sums fine-grained edge weights over the partition. The coarse entry
/// `(a, b)` is the total weight of surviving edges from any node of group
/// `a` to any node of group `b`; intra-group edges accumulate on the
/// diagonal. Returns the coarse adjacency together with the group sizes
/// the confidence stage needs.
pub fn aggregate(
    graph: &DiGraph,
    partition: &Partition,
    masks: &NodeMasks,
) -> Result<(CsrMatrix, Vec<usize>)> {
    if graph.node_count() != partition.len() {
        return Err(Error::DimensionMismatch {
            expected: graph.node_count(),
            found: partition.len(),
        });
    }
    masks.validate(graph.node_count())?;

    let groups = partition.group_count();
    let mut coarse = CooMatrix::new((groups, groups));
    let mut kept = 0usize;
    for (u, v, w) in graph.edges() {
        if !masks.keeps(u, v) {
            continue;
        }
        coarse.add_triplet(partition.group_of(u), partition.group_of(v), w);
        kept += 1;
    }
    trace!(
        "aggregated {} of {} fine edges onto {} groups",
        kept,
        graph.edge_count(),
        groups
    );

    Ok((coarse.to_csr::<usize>(), partition.sizes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn two_group_partition() -> Partition {
        // nodes 0,1 in group a; nodes 2,3 in group b
        Partition::new(
            vec!["a".into(), "b".into()],
            vec![0, 0, 1, 1],
        )
        .unwrap()
    }

    #[test]
    fn aggregation_conserves_total_weight() {
        let rows = [0, 0, 1, 2, 3, 3];
        let cols = [1, 2, 3, 3, 0, 2];
        let weights = [0.5, 1.5, 2.0, 0.25, 1.0, 0.75];
        let graph = DiGraph::from_triplets(4, &rows, &cols, &weights).unwrap();

        let (coarse, sizes) =
            aggregate(&graph, &two_group_partition(), &NodeMasks::default()).unwrap();
        let total: f64 = coarse.data().iter().sum();
        assert_abs_diff_eq!(total, weights.iter().sum::<f64>());
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn intra_group_edges_land_on_the_diagonal() {
        let graph = DiGraph::from_triplets(4, &[0, 2], &[1, 3], &[0.5, 0.7]).unwrap();
        let (coarse, _) =
            aggregate(&graph, &two_group_partition(), &NodeMasks::default()).unwrap();
        let dense = coarse.to_dense();
        assert_abs_diff_eq!(dense[[0, 0]], 0.5);
        assert_abs_diff_eq!(dense[[1, 1]], 0.7);
        assert_abs_diff_eq!(dense[[0, 1]], 0.0);
    }

    #[test]
    fn sink_member_loses_every_outgoing_edge() {
        let graph = DiGraph::from_triplets(4, &[0], &[2], &[1.0]).unwrap();
        let masks = NodeMasks {
            roots: None,
            sinks: Some(vec![true, false, false, false]),
        };
        let (coarse, _) = aggregate(&graph, &two_group_partition(), &masks).unwrap();
        assert_abs_diff_eq!(coarse.data().iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn root_member_loses_every_incoming_edge() {
        let graph = DiGraph::from_triplets(4, &[2], &[0], &[1.0]).unwrap();
        let masks = NodeMasks {
            roots: Some(vec![true, false, false, false]),
            sinks: None,
        };
        let (coarse, _) = aggregate(&graph, &two_group_partition(), &masks).unwrap();
        assert_abs_diff_eq!(coarse.data().iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn masking_is_node_level_not_pairwise() {
        // root node 0 blocks edges from both groups, but node 1 in the
        // same group still receives
        let graph = DiGraph::from_triplets(4, &[2, 3], &[0, 1], &[1.0, 2.0]).unwrap();
        let masks = NodeMasks {
            roots: Some(vec![true, false, false, false]),
            sinks: None,
        };
        let (coarse, _) = aggregate(&graph, &two_group_partition(), &masks).unwrap();
        let dense = coarse.to_dense();
        assert_abs_diff_eq!(dense[[1, 0]], 2.0);
        assert_abs_diff_eq!(dense.sum(), 2.0);
    }

    #[test]
    fn partition_length_must_match_graph() {
        let graph = DiGraph::new(3);
        let err = aggregate(&graph, &two_group_partition(), &NodeMasks::default()).unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { expected: 3, found: 4 });
    }

    #[test]
    fn membership_indices_must_refer_to_labels() {
        let err = Partition::new(vec!["a".into()], vec![0, 1]).unwrap_err();
        assert_eq!(err, Error::GroupIndexOutOfBounds { index: 1, groups: 1 });
    }
}
