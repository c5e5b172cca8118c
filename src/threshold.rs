//! Selects the confidence cutoff below which edges may be discarded while
//! every non-root group still keeps at least one incoming edge.

use crate::error::{Error, Result};
use crate::Matrix;

/// Subtracted from the minimum so the entries achieving it survive a
/// `>= threshold` filter under floating-point rounding.
pub const THRESHOLD_EPSILON: f64 = 1e-6;

/// Minimum over columns of each column's maximal positive entry.
///
/// Reads the matrix with sources on rows and targets on columns, i.e. the
/// dense matrix the pruning loop mutated, not its transposed sparse
/// output. Columns without any positive entry are excluded, as is the
/// root group's column when one is designated (the root needs no incoming
/// edge). Filtering at the returned value keeps the maximal incoming edge
/// of every remaining group, which is exactly what a maximum-weight
/// incoming-edge selection needs to stay fully connected.
///
/// If no column has a positive entry there is no tree to form and
/// [`Error::NoPositiveEdges`] is returned instead of a numeric default.
pub fn spanning_threshold(conf: &Matrix, root: Option<usize>) -> Result<f64> {
    let mut min_of_maxima: Option<f64> = None;
    for (k, column) in conf.columns().into_iter().enumerate() {
        if root == Some(k) {
            continue;
        }
        let column_max = column
            .iter()
            .copied()
            .filter(|&v| v > 0.0)
            .fold(None, |acc: Option<f64>, v| {
                Some(acc.map_or(v, |m| m.max(v)))
            });
        if let Some(m) = column_max {
            min_of_maxima = Some(min_of_maxima.map_or(m, |t| t.min(m)));
        }
    }
    min_of_maxima
        .map(|m| m - THRESHOLD_EPSILON)
        .ok_or(Error::NoPositiveEdges)
}
