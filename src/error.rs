use core::fmt;

/// Result alias for `paga`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by graph construction and the abstraction pipeline.
///
/// Precondition failures (shape and label mismatches) are detected before
/// any stage runs; degeneracies (empty groups, non-finite entries) fail at
/// the stage that would otherwise propagate a meaningless value. Nothing
/// here is retryable: the pipeline is deterministic and rerunning with the
/// same inputs reproduces the same error.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Two lengths or dimensions that must agree did not.
    DimensionMismatch {
        expected: usize,
        found: usize,
    },

    /// An edge endpoint lies outside the declared node count.
    IndexOutOfBounds {
        index: usize,
        nodes: usize,
    },

    /// A node's group index is not below the number of group labels.
    GroupIndexOutOfBounds {
        index: usize,
        groups: usize,
    },

    /// A fine-grained edge weight was NaN or infinite.
    NonFiniteWeight {
        row: usize,
        col: usize,
    },

    /// A group with zero members carries net flow, so its null-model
    /// expectation is zero and no confidence can be assigned.
    EmptyGroup {
        group: usize,
    },

    /// A stage computed a NaN or infinite matrix entry.
    NonFiniteEntry {
        stage: &'static str,
        row: usize,
        col: usize,
    },

    /// The confidence matrix has no positive entry in any considered
    /// column, so no spanning threshold exists.
    NoPositiveEdges,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::IndexOutOfBounds { index, nodes } => {
                write!(f, "node index {index} out of bounds for graph with {nodes} nodes")
            }
            Error::GroupIndexOutOfBounds { index, groups } => {
                write!(f, "group index {index} out of bounds for {groups} group labels")
            }
            Error::NonFiniteWeight { row, col } => {
                write!(f, "non-finite edge weight at ({row}, {col})")
            }
            Error::EmptyGroup { group } => {
                write!(f, "group {group} has no members but carries net flow")
            }
            Error::NonFiniteEntry { stage, row, col } => {
                write!(f, "{stage} produced a non-finite entry at ({row}, {col})")
            }
            Error::NoPositiveEdges => {
                write!(f, "no positive confidence entries, no spanning threshold exists")
            }
        }
    }
}

impl std::error::Error for Error {}
