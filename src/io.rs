//! Serializable hand-off form for the pipeline's sparse outputs. The
//! caller owns actual persistence; this only fixes the exchange shape.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{CooMatrix, CsrMatrix};

/// Raw CSR parts of a sparse matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrData {
    num_rows: usize,
    num_cols: usize,
    row_offsets: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f64>,
}

impl From<&CsrMatrix> for CsrData {
    fn from(value: &CsrMatrix) -> Self {
        CsrData {
            num_rows: value.rows(),
            num_cols: value.cols(),
            row_offsets: value.indptr().to_proper().to_vec(),
            col_indices: value.indices().to_vec(),
            values: value.data().to_vec(),
        }
    }
}

impl CsrData {
    /// Rebuilds the sparse matrix, validating the stored structure
    /// instead of trusting deserialized input.
    pub fn matrix(&self) -> Result<CsrMatrix> {
        if self.row_offsets.len() != self.num_rows + 1 {
            return Err(Error::DimensionMismatch {
                expected: self.num_rows + 1,
                found: self.row_offsets.len(),
            });
        }
        if self.col_indices.len() != self.values.len() {
            return Err(Error::DimensionMismatch {
                expected: self.col_indices.len(),
                found: self.values.len(),
            });
        }

        let mut coo = CooMatrix::new((self.num_rows, self.num_cols));
        for row in 0..self.num_rows {
            let start = self.row_offsets[row];
            let end = self.row_offsets[row + 1];
            if start > end || end > self.values.len() {
                return Err(Error::DimensionMismatch {
                    expected: self.values.len(),
                    found: end,
                });
            }
            for idx in start..end {
                let col = self.col_indices[idx];
                if col >= self.num_cols {
                    return Err(Error::IndexOutOfBounds {
                        index: col,
                        nodes: self.num_cols,
                    });
                }
                coo.add_triplet(row, col, self.values[idx]);
            }
        }
        Ok(coo.to_csr::<usize>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_preserves_the_matrix() {
        let mut coo = CooMatrix::new((3, 3));
        coo.add_triplet(0, 1, 0.25);
        coo.add_triplet(2, 0, 1.5);
        let mat = coo.to_csr::<usize>();

        let json = serde_json::to_string(&CsrData::from(&mat)).unwrap();
        let back: CsrData = serde_json::from_str(&json).unwrap();
        let rebuilt = back.matrix().unwrap();

        assert_eq!(rebuilt.to_dense(), mat.to_dense());
    }

    #[test]
    fn malformed_offsets_are_rejected() {
        let data = CsrData {
            num_rows: 2,
            num_cols: 2,
            row_offsets: vec![0, 1],
            col_indices: vec![0],
            values: vec![1.0],
        };
        assert!(data.matrix().is_err());
    }
}
