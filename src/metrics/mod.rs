//! Evaluation metrics.
//!
//! Mean squared error over vectors and matrices. Empty input is a typed
//! error rather than a silent division by zero: the merge pipeline can
//! legitimately produce zero records, and evaluation must refuse them.

use crate::error::{PredecirError, Result};
use crate::primitives::{Matrix, Vector};

/// Computes the Mean Squared Error (MSE) between two vectors.
///
/// MSE = (1/n) * Σ(y_true - y_pred)²
///
/// # Examples
///
/// ```
/// use predecir::metrics::mse;
/// use predecir::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let error = mse(&y_pred, &y_true).unwrap();
/// assert!(error < 1.0);
/// ```
///
/// # Errors
///
/// Returns an error if the vectors have different lengths or are empty.
pub fn mse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> Result<f64> {
    if y_pred.len() != y_true.len() {
        return Err(PredecirError::dimension_mismatch(
            "length",
            y_true.len(),
            y_pred.len(),
        ));
    }
    if y_true.is_empty() {
        return Err(PredecirError::empty_dataset("mean squared error"));
    }

    let n = y_true.len() as f64;
    let sum_sq_error: f64 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    Ok(sum_sq_error / n)
}

/// Computes the MSE between two matrices as the mean of squared per-cell
/// errors over all rows × columns (a single scalar, not per-column).
///
/// # Errors
///
/// Returns an error if the shapes differ or the matrices are empty.
pub fn mse_matrix(y_pred: &Matrix<f64>, y_true: &Matrix<f64>) -> Result<f64> {
    if y_pred.shape() != y_true.shape() {
        return Err(PredecirError::DimensionMismatch {
            expected: format!("{}x{}", y_true.n_rows(), y_true.n_cols()),
            actual: format!("{}x{}", y_pred.n_rows(), y_pred.n_cols()),
        });
    }
    if y_true.as_slice().is_empty() {
        return Err(PredecirError::empty_dataset("mean squared error"));
    }

    let n = y_true.as_slice().len() as f64;
    let sum_sq_error: f64 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    Ok(sum_sq_error / n)
}
