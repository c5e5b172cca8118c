//! Normalizes aggregated transitions against a null model of random,
//! size-proportional connections between groups.

use crate::error::{Error, Result};
use crate::{CooMatrix, CsrMatrix};

/// Net directional imbalance between every ordered group pair,
/// `flow = coarse - coarse^T`. Exactly skew-symmetric by construction: a
/// forward/backward edge pair collapses into one signed value stored at
/// both orientations with opposite signs.
pub fn net_flow(coarse: &CsrMatrix) -> CsrMatrix {
    let groups = coarse.rows();
    let mut flow = CooMatrix::new((groups, groups));
    for (i, row) in coarse.outer_iterator().enumerate() {
        for (j, w) in row.iter() {
            flow.add_triplet(i, j, *w);
            flow.add_triplet(j, i, -*w);
        }
    }
    flow.to_csr::<usize>()
}

/// Scores each positive net flow against the null-model expectation.
///
/// The expected total connectivity of group `i` is
/// `neighbor_count * sizes[i] * 2`, where `neighbor_count` is the average
/// out-degree the fine graph was built with. A flow entry keeps a score
/// only in its positive direction, `flow[i,j] / sqrt(expected[i] *
/// expected[j])`; the reverse orientation is dropped from the sparse
/// result. The score is a ratio against an overestimated expectation, not
/// a probability, so no upper bound holds.
///
/// An empty group touched by nonzero flow has expectation zero and is
/// reported as [`Error::EmptyGroup`] rather than letting a NaN or
/// infinity through.
pub fn confidence(
    coarse: &CsrMatrix,
    sizes: &[usize],
    neighbor_count: usize,
) -> Result<CsrMatrix> {
    let groups = coarse.rows();
    if sizes.len() != groups {
        return Err(Error::DimensionMismatch {
            expected: groups,
            found: sizes.len(),
        });
    }
    let expected: Vec<f64> = sizes
        .iter()
        .map(|&size| (neighbor_count * size * 2) as f64)
        .collect();

    let flow = net_flow(coarse);
    let mut scores = CooMatrix::new((groups, groups));
    for (i, row) in flow.outer_iterator().enumerate() {
        for (j, v) in row.iter() {
            if *v <= 0.0 {
                continue;
            }
            for group in [i, j] {
                if sizes[group] == 0 {
                    return Err(Error::EmptyGroup { group });
                }
            }
            let score = v / (expected[i] * expected[j]).sqrt();
            if !score.is_finite() {
                return Err(Error::NonFiniteEntry {
                    stage: "confidence",
                    row: i,
                    col: j,
                });
            }
            scores.add_triplet(i, j, score);
        }
    }
    Ok(scores.to_csr::<usize>())
}
