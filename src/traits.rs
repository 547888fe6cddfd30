//! Core traits for estimators.
//!
//! These traits define the API contract for models whose response is a
//! matrix: one row per sample, one column per predicted quantity.

use crate::error::Result;
use crate::primitives::Matrix;

/// Trait for supervised estimators with matrix-valued responses.
///
/// # Examples
///
/// ```
/// use predecir::prelude::*;
///
/// // y = 1 + 2*x1 + 3*x2 over three non-collinear samples
/// let x = Matrix::from_vec(3, 2, vec![1.0, 1.0, 2.0, 4.0, 3.0, 2.0]).unwrap();
/// let y = Matrix::from_vec(3, 1, vec![6.0, 17.0, 13.0]).unwrap();
///
/// let mut model = MultiOutputRegression::new();
/// model.fit(&x, &y).unwrap();
///
/// let predictions = model.predict(&x).unwrap();
/// assert!((predictions.get(0, 0) - 6.0).abs() < 1e-8);
/// ```
pub trait MultiOutputEstimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, empty input,
    /// singular system, etc.).
    fn fit(&mut self, x: &Matrix<f64>, y: &Matrix<f64>) -> Result<()>;

    /// Predicts response values for input data.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or dimensions don't match.
    fn predict(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;
}
