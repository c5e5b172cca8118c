//! Drives the full abstraction: aggregation, null-model normalization,
//! domination pruning, and spanning-threshold selection, strictly in
//! sequence. Each stage consumes the previous stage's output immutably
//! and produces a fresh matrix; nothing here keeps cross-call state.

use crate::aggregate::{aggregate, NodeMasks, Partition};
use crate::confidence::confidence;
use crate::error::Result;
use crate::graph::DiGraph;
use crate::prune::prune_dominated;
use crate::threshold::spanning_threshold;
use crate::CsrMatrix;

/// Parameters carried over from the fine graph's construction.
#[derive(Debug, Clone)]
pub struct TransitionParams {
    /// Average out-degree the fine neighbor graph was built with; scales
    /// the null-model expectation, never recomputed here.
    pub neighbor_count: usize,
    /// Group designated as root, if any. Its column is exempt from the
    /// spanning-threshold reachability requirement.
    pub root_group: Option<usize>,
}

/// Everything the abstraction hands back to the caller. The caller owns
/// persistence, annotation storage, and any default-parameter resolution.
#[derive(Debug, Clone)]
pub struct CoarseTransitions {
    /// Symmetrized aggregate adjacency over the groups, for consumers
    /// that want an undirected connectivity view.
    pub connectivities: CsrMatrix,
    /// Member count per group, in label order.
    pub group_sizes: Vec<usize>,
    /// Pruned confidence scores, transposed so rows are targets.
    pub transitions_confidence: CsrMatrix,
    /// Cutoff preserving an incoming edge for every non-root group.
    pub threshold: f64,
}

/// Runs the whole pipeline over a fine-grained transition graph and a
/// partition of its nodes.
pub fn coarse_transitions(
    graph: &DiGraph,
    partition: &Partition,
    masks: &NodeMasks,
    params: &TransitionParams,
) -> Result<CoarseTransitions> {
    info!(
        "abstracting {} nodes and {} edges onto {} groups",
        graph.node_count(),
        graph.edge_count(),
        partition.group_count()
    );

    let (coarse, group_sizes) = aggregate(graph, partition, masks)?;
    let connectivities = DiGraph::from_adjacency(&coarse)
        .to_undirected()
        .to_adjacency();

    let conf = confidence(&coarse, &group_sizes, params.neighbor_count)?;
    trace!("{} group pairs carry positive net flow", conf.nnz());

    let outcome = prune_dominated(&conf);
    let threshold = spanning_threshold(&outcome.pruned, params.root_group)?;
    info!(
        "kept {} transitions, spanning threshold {:.3e}",
        outcome.transitions.nnz(),
        threshold
    );

    Ok(CoarseTransitions {
        connectivities,
        group_sizes,
        transitions_confidence: outcome.transitions,
        threshold,
    })
}
