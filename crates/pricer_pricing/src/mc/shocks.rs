//! Shock matrix storage.
//!
//! # Memory Layout
//!
//! Shocks are stored in row-major order: `data[path_idx * n_steps + step_idx]`.
//! One row is the shock vector of one path, so workers can take contiguous
//! chunks of rows with `par_chunks`.

use pricer_core::types::ShapeError;

/// `n_paths x n_steps` matrix of standard-normal shocks.
///
/// Every row has exactly `n_steps` entries; ragged input is rejected at
/// construction.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::ShockMatrix;
///
/// let matrix = ShockMatrix::from_rows(vec![vec![0.1, -0.2], vec![1.0, 0.5]]).unwrap();
/// assert_eq!(matrix.n_paths(), 2);
/// assert_eq!(matrix.n_steps(), 2);
/// assert_eq!(matrix.row(1), &[1.0, 0.5]);
///
/// assert!(ShockMatrix::from_rows(vec![vec![0.1, -0.2], vec![1.0]]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ShockMatrix {
    data: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl ShockMatrix {
    /// Creates a zero-filled matrix.
    pub fn zeros(n_paths: usize, n_steps: usize) -> Self {
        Self {
            data: vec![0.0; n_paths * n_steps],
            n_paths,
            n_steps,
        }
    }

    /// Builds a matrix from one vector per path.
    ///
    /// An empty `rows` yields a matrix with no paths and no steps.
    ///
    /// # Errors
    /// `ShapeError::RaggedRows` if any row length differs from row 0.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        let n_paths = rows.len();
        let n_steps = rows.first().map_or(0, Vec::len);

        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != n_steps)
        {
            return Err(ShapeError::RaggedRows {
                row,
                expected: n_steps,
                actual,
            });
        }

        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            n_paths,
            n_steps,
        })
    }

    /// Wraps a row-major buffer.
    ///
    /// # Errors
    /// `ShapeError::LengthMismatch` if `data.len() != n_paths * n_steps`.
    pub fn from_vec(data: Vec<f64>, n_paths: usize, n_steps: usize) -> Result<Self, ShapeError> {
        let expected = n_paths * n_steps;
        if data.len() != expected {
            return Err(ShapeError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            n_paths,
            n_steps,
        })
    }

    /// Number of paths (rows).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of steps per path (row length).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns `true` if the matrix holds no paths.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_paths == 0
    }

    /// Shock vector of one path.
    ///
    /// # Panics
    /// Panics if `path_idx >= n_paths`.
    #[inline]
    pub fn row(&self, path_idx: usize) -> &[f64] {
        let start = path_idx * self.n_steps;
        &self.data[start..start + self.n_steps]
    }

    /// Iterates over rows in path order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        (0..self.n_paths).map(move |i| self.row(i))
    }

    /// Row-major view of all shocks.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major view of all shocks.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consumes the matrix, returning the row-major buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}
