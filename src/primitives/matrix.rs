//! Matrix type for 2D numeric data.

use super::Vector;
use crate::error::{PredecirError, Result};
use serde::{Deserialize, Serialize};

/// A 2D matrix of floating-point values (row-major storage).
///
/// # Examples
///
/// ```
/// use predecir::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(PredecirError::DimensionMismatch {
                expected: format!("{rows}x{cols} = {} elements", rows * cols),
                actual: format!("{} elements", data.len()),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a Vector.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> Vector<T> {
        let start = row_idx * self.cols;
        let end = start + self.cols;
        Vector::from_slice(&self.data[start..end])
    }

    /// Returns a column as a Vector.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vector<T> {
        let data: Vec<T> = (0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect();
        Vector::from_vec(data)
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Matrix<f64> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix-matrix multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(PredecirError::DimensionMismatch {
                expected: format!("{}xK", self.cols),
                actual: format!("{}x{}", other.rows, other.cols),
            });
        }

        let mut result = vec![0.0; self.rows * other.cols];
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.get(i, k) * other.get(k, j);
                }
                result[i * other.cols + j] = sum;
            }
        }

        Ok(Self {
            data: result,
            rows: self.rows,
            cols: other.cols,
        })
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matvec(&self, vec: &Vector<f64>) -> Result<Vector<f64>> {
        if self.cols != vec.len() {
            return Err(PredecirError::dimension_mismatch(
                "columns",
                self.cols,
                vec.len(),
            ));
        }

        let result: Vec<f64> = (0..self.rows)
            .map(|i| {
                let row = self.row(i);
                row.dot(vec)
            })
            .collect();

        Ok(Vector::from_vec(result))
    }

    /// Computes the lower-triangular Cholesky factor L with A = L * L^T.
    ///
    /// A pivot at or below `tol * max_diag` means the matrix is rank-deficient
    /// (or not positive definite) to working precision and the factorization
    /// is rejected instead of producing a meaningless factor.
    fn cholesky_factor(&self) -> Result<Vec<f64>> {
        let n = self.rows;
        let max_diag = (0..n).map(|i| self.get(i, i).abs()).fold(1.0, f64::max);
        let tol = f64::EPSILON.sqrt() * max_diag;

        let mut l = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;

                if i == j {
                    for k in 0..j {
                        sum += l[j * n + k] * l[j * n + k];
                    }
                    let diag = self.get(j, j) - sum;
                    if diag <= tol {
                        return Err(PredecirError::SingularMatrix {
                            context: format!("pivot {j} of {n}x{n} system is not positive"),
                        });
                    }
                    l[j * n + j] = diag.sqrt();
                } else {
                    for k in 0..j {
                        sum += l[i * n + k] * l[j * n + k];
                    }
                    l[i * n + j] = (self.get(i, j) - sum) / l[j * n + j];
                }
            }
        }

        Ok(l)
    }

    /// Solves the linear system Ax = b using Cholesky decomposition.
    ///
    /// The matrix must be symmetric positive definite.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square, dimensions don't match,
    /// or the matrix is singular to working precision.
    pub fn cholesky_solve(&self, b: &Vector<f64>) -> Result<Vector<f64>> {
        if self.rows != self.cols {
            return Err(PredecirError::DimensionMismatch {
                expected: "square matrix".to_string(),
                actual: format!("{}x{}", self.rows, self.cols),
            });
        }
        if self.rows != b.len() {
            return Err(PredecirError::dimension_mismatch("rows", self.rows, b.len()));
        }

        let l = self.cholesky_factor()?;
        Ok(Vector::from_vec(solve_with_factor(
            &l,
            self.rows,
            b.as_slice(),
        )))
    }

    /// Solves A * X = B column by column, factoring A once.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square, row counts don't match,
    /// or the matrix is singular to working precision.
    pub fn cholesky_solve_matrix(&self, b: &Matrix<f64>) -> Result<Matrix<f64>> {
        if self.rows != self.cols {
            return Err(PredecirError::DimensionMismatch {
                expected: "square matrix".to_string(),
                actual: format!("{}x{}", self.rows, self.cols),
            });
        }
        if self.rows != b.n_rows() {
            return Err(PredecirError::dimension_mismatch(
                "rows",
                self.rows,
                b.n_rows(),
            ));
        }

        let n = self.rows;
        let l = self.cholesky_factor()?;

        let mut result = Matrix::zeros(n, b.n_cols());
        for j in 0..b.n_cols() {
            let rhs: Vec<f64> = (0..n).map(|i| b.get(i, j)).collect();
            let x = solve_with_factor(&l, n, &rhs);
            for (i, value) in x.into_iter().enumerate() {
                result.set(i, j, value);
            }
        }

        Ok(result)
    }
}

/// Forward substitution L * y = b, then backward substitution L^T * x = y.
fn solve_with_factor(l: &[f64], n: usize, b: &[f64]) -> Vec<f64> {
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[i * n + j] * y[j];
        }
        y[i] = (b[i] - sum) / l[i * n + i];
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[j * n + i] * x[j];
        }
        x[i] = (y[i] - sum) / l[i * n + i];
    }

    x
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
