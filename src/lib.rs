//! Partition-based abstraction of directed cell-level transition graphs.
//!
//! Single-cell velocity estimation produces a large directed graph whose
//! edge weights measure how strongly one cell is predicted to transition
//! into another. On its own that graph is too fine-grained to interpret.
//! Given a partition of the cells into groups (clusters, cell types), this
//! crate coarsens the cell graph into a small directed graph over the
//! groups and scores each group-to-group edge against a null model of
//! random, size-proportional connections.
//!
//! The pipeline runs four stages in sequence:
//!
//! 1. [`aggregate`] sums fine-grained edge weights across the partition,
//!    optionally suppressing edges out of terminal ("sink") cells and into
//!    root cells.
//! 2. [`confidence`] skew-symmetrizes the aggregate into net flows and
//!    normalizes each positive flow by the null-model expectation.
//! 3. [`prune`] deletes direct group edges that are dominated by a
//!    stronger two-hop alternative.
//! 4. [`threshold`] finds the largest cutoff at which every non-root
//!    group still keeps an incoming edge, for spanning-tree style
//!    rendering downstream.
//!
//! The confidence scores are ratios of observed to expected connectivity,
//! not probabilities: the null model overestimates the expectation, so no
//! p-value is attached and values are only meaningful relative to each
//! other.

use ndarray::Array2;
use sprs::{CsMatBase, TriMatBase};

#[macro_use]
extern crate log;
extern crate approx;

pub mod aggregate;
pub mod confidence;
pub mod error;
pub mod graph;
pub mod io;
pub mod pipeline;
pub mod prune;
pub mod threshold;

pub type CsrMatrix = CsMatBase<f64, usize, Vec<usize>, Vec<usize>, Vec<f64>, usize>;
pub type CooMatrix = TriMatBase<Vec<usize>, Vec<f64>>;
pub type Matrix = Array2<f64>;
