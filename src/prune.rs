//! One-hop transitive reduction of the confidence matrix: a direct group
//! edge is deleted when some intermediate group offers a stronger two-hop
//! path. Deliberately a single pass over two-hop paths, not an iterated
//! closure over longer ones; one pass is already a fixed point.

use crate::{CooMatrix, CsrMatrix, Matrix};

/// Result of domination pruning.
///
/// `pruned` is the dense working copy after in-place deletion; the
/// spanning threshold must be computed from this exact matrix.
/// `transitions` is its sparse transpose, the orientation downstream
/// consumers read (target rows, source columns).
#[derive(Debug, Clone)]
pub struct PruneOutcome {
    pub pruned: Matrix,
    pub transitions: CsrMatrix,
}

/// Deletes every direct edge `(i, k)` whose confidence is below the best
/// two-hop alternative `max_j min(conf[j, k], conf[i, j])` over i's direct
/// out-neighbors `j`. The inner `min` caps an indirect path at the
/// strength of reaching the intermediate group, so an indirect route is
/// never credited above its weakest hop.
pub fn prune_dominated(conf: &CsrMatrix) -> PruneOutcome {
    let groups = conf.rows();
    let mut working = conf.to_dense();
    let mut deleted = 0usize;

    for i in 0..groups {
        let hops: Vec<usize> = (0..groups).filter(|&j| working[[i, j]] > 0.0).collect();
        if hops.is_empty() {
            continue;
        }

        // strongest two-hop path to each target, capped by the first hop
        let mut indirect = vec![0.0_f64; groups];
        for &j in &hops {
            let first_hop = working[[i, j]];
            for k in 0..groups {
                let bound = working[[j, k]].min(first_hop);
                if bound > indirect[k] {
                    indirect[k] = bound;
                }
            }
        }

        for k in 0..groups {
            if working[[i, k]] < indirect[k] {
                if working[[i, k]] > 0.0 {
                    deleted += 1;
                }
                working[[i, k]] = 0.0;
            }
        }
    }
    trace!("pruned {} dominated direct edges", deleted);

    let mut transpose = CooMatrix::new((groups, groups));
    for ((i, k), &v) in working.indexed_iter() {
        if v != 0.0 {
            transpose.add_triplet(k, i, v);
        }
    }

    PruneOutcome {
        pruned: working,
        transitions: transpose.to_csr::<usize>(),
    }
}
