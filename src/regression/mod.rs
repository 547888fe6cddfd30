//! Multi-output linear regression.
//!
//! Includes the general Ordinary Least Squares estimator for matrix-valued
//! responses and the kernel-domain model fitted over a [`RecordStore`].

use crate::error::{PredecirError, Result};
use crate::metrics::mse_matrix;
use crate::primitives::Matrix;
use crate::record::RecordStore;
use crate::traits::MultiOutputEstimator;

/// Ordinary Least Squares regression with a matrix-valued response.
///
/// Fits one linear model per response column by minimizing the residual sum
/// of squares. The model equation is:
///
/// ```text
/// Y = X C + E
/// ```
///
/// where `C` is the coefficient matrix (one column per output) and `E` is
/// random error.
///
/// # Solver
///
/// Uses normal equations: `C = (X^T X)^-1 X^T Y` via Cholesky decomposition,
/// factoring `X^T X` once and solving all response columns against it. The
/// normal equations are accumulated commutatively, so the fit depends only
/// on the multiset of sample rows, not on their order.
///
/// # Examples
///
/// ```
/// use predecir::prelude::*;
///
/// // y = 1 + 2*x1 + 3*x2
/// let x = Matrix::from_vec(3, 2, vec![1.0, 1.0, 2.0, 4.0, 3.0, 2.0]).unwrap();
/// let y = Matrix::from_vec(3, 1, vec![6.0, 17.0, 13.0]).unwrap();
///
/// let mut model = MultiOutputRegression::new();
/// model.fit(&x, &y).unwrap();
///
/// let c = model.coefficients();
/// assert!((c.get(0, 0) - 1.0).abs() < 1e-8); // intercept row
/// assert!((c.get(1, 0) - 2.0).abs() < 1e-8);
/// assert!((c.get(2, 0) - 3.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct MultiOutputRegression {
    /// Coefficient matrix, (features+1) x outputs when fitting an intercept.
    coefficients: Option<Matrix<f64>>,
    /// Whether to fit an intercept row.
    fit_intercept: bool,
}

impl Default for MultiOutputRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputRegression {
    /// Creates a new `MultiOutputRegression` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            fit_intercept: true,
        }
    }

    /// Sets whether to fit an intercept term.
    #[must_use]
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Returns the coefficient matrix. Row 0 is the intercept row when an
    /// intercept is fitted; each column corresponds to one output.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn coefficients(&self) -> &Matrix<f64> {
        self.coefficients
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    /// Adds an intercept column of ones to the design matrix.
    fn add_intercept_column(x: &Matrix<f64>) -> Matrix<f64> {
        let (n_rows, n_cols) = x.shape();
        let mut data = Vec::with_capacity(n_rows * (n_cols + 1));

        for i in 0..n_rows {
            data.push(1.0); // Intercept column
            for j in 0..n_cols {
                data.push(x.get(i, j));
            }
        }

        Matrix::from_vec(n_rows, n_cols + 1, data)
            .expect("Internal error: failed to create design matrix")
    }
}

impl MultiOutputEstimator for MultiOutputRegression {
    /// Fits the model using normal equations.
    ///
    /// Solves: `C = (X^T X)^-1 X^T Y`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Input row counts don't match
    /// - The input is empty
    /// - There are fewer samples than free parameters, or the predictors are
    ///   degenerate, making `X^T X` singular. No partial coefficients are
    ///   stored in that case.
    fn fit(&mut self, x: &Matrix<f64>, y: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.n_rows() {
            return Err(PredecirError::dimension_mismatch(
                "samples",
                n_samples,
                y.n_rows(),
            ));
        }

        if n_samples == 0 {
            return Err(PredecirError::empty_dataset("regression fit"));
        }

        let n_parameters = if self.fit_intercept {
            n_features + 1
        } else {
            n_features
        };

        if n_samples < n_parameters {
            return Err(PredecirError::SingularMatrix {
                context: format!(
                    "{n_samples} samples cannot determine {n_parameters} parameters"
                ),
            });
        }

        let x_design = if self.fit_intercept {
            Self::add_intercept_column(x)
        } else {
            x.clone()
        };

        let xt = x_design.transpose();
        let xtx = xt.matmul(&x_design)?;
        let xty = xt.matmul(y)?;

        let coefficients = xtx.cholesky_solve_matrix(&xty)?;
        self.coefficients = Some(coefficients);

        Ok(())
    }

    /// Predicts response values for input data.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature count
    /// doesn't match the fitted coefficients.
    fn predict(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or_else(|| PredecirError::Other("Model not fitted. Call fit() first.".to_string()))?;

        let x_design = if self.fit_intercept {
            Self::add_intercept_column(x)
        } else {
            x.clone()
        };

        x_design.matmul(coefficients)
    }
}

/// The three predicted outputs for one kernel configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelPrediction {
    /// Predicted power draw.
    pub power: f64,
    /// Predicted energy consumption.
    pub energy: f64,
    /// Predicted latency.
    pub latency: f64,
}

/// A linear performance model over kernel records.
///
/// Predicts power, energy, and latency from the two structural predictors
/// `CIN` and `HW`. Fitting consumes the whole record store; the resulting
/// coefficient matrix is `3 x 3`: rows are intercept, `CIN`, `HW`; columns
/// are power, energy, latency.
///
/// # Examples
///
/// ```
/// use predecir::prelude::*;
///
/// let mut store = RecordStore::new();
/// store.merge_config("k1", &[(ConfigField::Cin, 4), (ConfigField::Hw, 8)]);
/// store.merge_config("k2", &[(ConfigField::Cin, 8), (ConfigField::Hw, 16)]);
/// store.merge_config("k3", &[(ConfigField::Cin, 12), (ConfigField::Hw, 20)]);
/// for (id, power) in [("k1", 1.3), ("k2", 2.1), ("k3", 2.7)] {
///     store.merge_measurement(id, Measurement::Power, power).unwrap();
/// }
///
/// let model = KernelModel::fit(&store).unwrap();
/// let prediction = model.predict(4.0, 8.0);
/// assert!((prediction.power - 1.3).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct KernelModel {
    regression: MultiOutputRegression,
}

/// Number of structural predictors (`CIN`, `HW`).
const KERNEL_INPUTS: usize = 2;
/// Number of predicted quantities (power, energy, latency).
const KERNEL_OUTPUTS: usize = 3;

impl KernelModel {
    /// Fits the model across every record currently in the store.
    ///
    /// # Errors
    ///
    /// Returns [`PredecirError::EmptyDataset`] for an empty store and
    /// [`PredecirError::SingularMatrix`] when the records cannot determine
    /// the three parameters per output (fewer than three linearly
    /// independent records, or degenerate predictors).
    pub fn fit(store: &RecordStore) -> Result<Self> {
        if store.is_empty() {
            return Err(PredecirError::empty_dataset("kernel model fit"));
        }

        let (x, y) = design_matrices(store)?;
        let mut regression = MultiOutputRegression::new();
        regression.fit(&x, &y)?;

        Ok(Self { regression })
    }

    /// Returns the fitted coefficient matrix.
    ///
    /// Row 0 is the intercept row, rows 1 and 2 the `CIN` and `HW`
    /// coefficients; columns are power, energy, latency.
    #[must_use]
    pub fn coefficients(&self) -> &Matrix<f64> {
        self.regression.coefficients()
    }

    /// Predicts the three outputs for one `(CIN, HW)` input.
    ///
    /// Computes `[1, cin, hw] · C`. Pure function; defined for any real
    /// inputs, including values outside the training range (extrapolation
    /// is the caller's responsibility).
    #[must_use]
    pub fn predict(&self, cin: f64, hw: f64) -> KernelPrediction {
        let c = self.regression.coefficients();
        let input = [1.0, cin, hw];

        let mut outputs = [0.0; KERNEL_OUTPUTS];
        for (j, out) in outputs.iter_mut().enumerate() {
            *out = input
                .iter()
                .enumerate()
                .map(|(i, value)| value * c.get(i, j))
                .sum();
        }

        KernelPrediction {
            power: outputs[0],
            energy: outputs[1],
            latency: outputs[2],
        }
    }

    /// Evaluates the model against the measured values of every record.
    ///
    /// Each record is predicted from its own `(CIN, HW)` and compared with
    /// its stored power, energy, and latency; the result is the mean of
    /// squared per-cell errors over all records × outputs.
    ///
    /// # Errors
    ///
    /// Returns [`PredecirError::EmptyDataset`] for an empty store.
    pub fn training_mse(&self, store: &RecordStore) -> Result<f64> {
        if store.is_empty() {
            return Err(PredecirError::empty_dataset("kernel model evaluation"));
        }

        let n = store.len();
        let mut actual = Vec::with_capacity(n * KERNEL_OUTPUTS);
        let mut predicted = Vec::with_capacity(n * KERNEL_OUTPUTS);

        for (_, record) in store.iter() {
            let p = self.predict(f64::from(record.cin), f64::from(record.hw));
            actual.extend_from_slice(&[record.power, record.energy, record.latency]);
            predicted.extend_from_slice(&[p.power, p.energy, p.latency]);
        }

        let y_actual = Matrix::from_vec(n, KERNEL_OUTPUTS, actual)?;
        let y_predicted = Matrix::from_vec(n, KERNEL_OUTPUTS, predicted)?;

        mse_matrix(&y_predicted, &y_actual)
    }
}

/// Builds the predictor and response matrices from a record store.
///
/// X has one row per record with columns `CIN`, `HW` (the intercept column
/// is added by the estimator); Y has columns power, energy, latency in that
/// fixed order.
fn design_matrices(store: &RecordStore) -> Result<(Matrix<f64>, Matrix<f64>)> {
    let n = store.len();
    let mut x_data = Vec::with_capacity(n * KERNEL_INPUTS);
    let mut y_data = Vec::with_capacity(n * KERNEL_OUTPUTS);

    for (_, record) in store.iter() {
        x_data.push(f64::from(record.cin));
        x_data.push(f64::from(record.hw));

        y_data.push(record.power);
        y_data.push(record.energy);
        y_data.push(record.latency);
    }

    Ok((
        Matrix::from_vec(n, KERNEL_INPUTS, x_data)?,
        Matrix::from_vec(n, KERNEL_OUTPUTS, y_data)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ConfigField, Measurement};

    /// Three non-collinear kernels with outputs that are exact affine
    /// functions of (CIN, HW):
    ///   power   = 0.5 + 0.1*CIN + 0.05*HW
    ///   energy  = 0.02*CIN + 0.01*HW
    ///   latency = 1 + CIN + HW
    fn affine_store() -> RecordStore {
        let mut store = RecordStore::new();
        let kernels = [("k1", 4, 8), ("k2", 8, 16), ("k3", 12, 20)];
        for (id, cin, hw) in kernels {
            store.merge_config(id, &[(ConfigField::Cin, cin), (ConfigField::Hw, hw)]);
            let (cin, hw) = (f64::from(cin), f64::from(hw));
            store
                .merge_measurement(id, Measurement::Power, 0.5 + 0.1 * cin + 0.05 * hw)
                .expect("record exists");
            store
                .merge_measurement(id, Measurement::Energy, 0.02 * cin + 0.01 * hw)
                .expect("record exists");
            store
                .merge_measurement(id, Measurement::Latency, 1.0 + cin + hw)
                .expect("record exists");
        }
        store
    }

    #[test]
    fn test_new_not_fitted() {
        let model = MultiOutputRegression::new();
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_single_output_regression() {
        // y = 1 + 2*x1 + 3*x2
        let x = Matrix::from_vec(3, 2, vec![1.0, 1.0, 2.0, 4.0, 3.0, 2.0]).expect("3x2 data");
        let y = Matrix::from_vec(3, 1, vec![6.0, 17.0, 13.0]).expect("3x1 data");

        let mut model = MultiOutputRegression::new();
        model.fit(&x, &y).expect("system is well determined");

        let c = model.coefficients();
        assert_eq!(c.shape(), (3, 1));
        assert!((c.get(0, 0) - 1.0).abs() < 1e-8);
        assert!((c.get(1, 0) - 2.0).abs() < 1e-8);
        assert!((c.get(2, 0) - 3.0).abs() < 1e-8);
    }

    #[test]
    fn test_multi_output_regression() {
        // Column 0: y = 1 + 2*x1 + 3*x2; column 1: y = -1 + 0.5*x1 - x2
        let x = Matrix::from_vec(4, 2, vec![1.0, 1.0, 2.0, 4.0, 3.0, 2.0, 5.0, 5.0])
            .expect("4x2 data");
        let y = Matrix::from_vec(
            4,
            2,
            vec![6.0, -1.5, 17.0, -4.0, 13.0, -1.5, 26.0, -3.5],
        )
        .expect("4x2 data");

        let mut model = MultiOutputRegression::new();
        model.fit(&x, &y).expect("system is well determined");

        let c = model.coefficients();
        assert_eq!(c.shape(), (3, 2));
        assert!((c.get(0, 0) - 1.0).abs() < 1e-8);
        assert!((c.get(1, 0) - 2.0).abs() < 1e-8);
        assert!((c.get(2, 0) - 3.0).abs() < 1e-8);
        assert!((c.get(0, 1) + 1.0).abs() < 1e-8);
        assert!((c.get(1, 1) - 0.5).abs() < 1e-8);
        assert!((c.get(2, 1) + 1.0).abs() < 1e-8);
    }

    #[test]
    fn test_predict_reproduces_training_data() {
        let x = Matrix::from_vec(3, 2, vec![1.0, 1.0, 2.0, 4.0, 3.0, 2.0]).expect("3x2 data");
        let y = Matrix::from_vec(3, 1, vec![6.0, 17.0, 13.0]).expect("3x1 data");

        let mut model = MultiOutputRegression::new();
        model.fit(&x, &y).expect("system is well determined");

        let predictions = model.predict(&x).expect("model is fitted");
        for i in 0..3 {
            assert!((predictions.get(i, 0) - y.get(i, 0)).abs() < 1e-8);
        }
    }

    #[test]
    fn test_predict_unfitted_is_error() {
        let model = MultiOutputRegression::new();
        let x = Matrix::from_vec(1, 2, vec![1.0, 2.0]).expect("1x2 data");
        assert!(model.predict(&x).is_err());
    }

    #[test]
    fn test_fit_row_count_mismatch() {
        let x = Matrix::from_vec(3, 2, vec![1.0; 6]).expect("3x2 data");
        let y = Matrix::from_vec(2, 1, vec![1.0; 2]).expect("2x1 data");

        let mut model = MultiOutputRegression::new();
        assert!(model.fit(&x, &y).is_err());
    }

    #[test]
    fn test_fit_empty_input() {
        let x = Matrix::from_vec(0, 2, vec![]).expect("0x2 data");
        let y = Matrix::from_vec(0, 3, vec![]).expect("0x3 data");

        let mut model = MultiOutputRegression::new();
        let result = model.fit(&x, &y);
        assert!(matches!(result, Err(PredecirError::EmptyDataset { .. })));
    }

    #[test]
    fn test_fit_underdetermined_system() {
        // 2 samples cannot determine 3 parameters (intercept + 2 features).
        let x = Matrix::from_vec(2, 2, vec![4.0, 8.0, 8.0, 16.0]).expect("2x2 data");
        let y = Matrix::from_vec(2, 3, vec![1.0, 0.1, 0.5, 2.0, 0.2, 1.0]).expect("2x3 data");

        let mut model = MultiOutputRegression::new();
        let result = model.fit(&x, &y);
        assert!(matches!(result, Err(PredecirError::SingularMatrix { .. })));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_fit_collinear_predictors() {
        // HW is exactly 2*CIN for every sample: rank-deficient normal
        // equations even with enough rows.
        let x = Matrix::from_vec(4, 2, vec![1.0, 2.0, 2.0, 4.0, 3.0, 6.0, 4.0, 8.0])
            .expect("4x2 data");
        let y = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("4x1 data");

        let mut model = MultiOutputRegression::new();
        let result = model.fit(&x, &y);
        assert!(matches!(result, Err(PredecirError::SingularMatrix { .. })));
    }

    #[test]
    fn test_no_intercept() {
        // y = 2*x, no intercept: a single feature and a single sample pair
        // is already determined.
        let x = Matrix::from_vec(2, 1, vec![1.0, 2.0]).expect("2x1 data");
        let y = Matrix::from_vec(2, 1, vec![2.0, 4.0]).expect("2x1 data");

        let mut model = MultiOutputRegression::new().with_intercept(false);
        model.fit(&x, &y).expect("system is well determined");

        let c = model.coefficients();
        assert_eq!(c.shape(), (1, 1));
        assert!((c.get(0, 0) - 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_kernel_model_recovers_affine_coefficients() {
        let store = affine_store();
        let model = KernelModel::fit(&store).expect("three non-collinear records");

        let c = model.coefficients();
        assert_eq!(c.shape(), (3, 3));
        // Power column: 0.5 + 0.1*CIN + 0.05*HW
        assert!((c.get(0, 0) - 0.5).abs() < 1e-6);
        assert!((c.get(1, 0) - 0.1).abs() < 1e-6);
        assert!((c.get(2, 0) - 0.05).abs() < 1e-6);
        // Latency column: 1 + CIN + HW
        assert!((c.get(0, 2) - 1.0).abs() < 1e-6);
        assert!((c.get(1, 2) - 1.0).abs() < 1e-6);
        assert!((c.get(2, 2) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_kernel_model_training_mse_near_zero_on_exact_data() {
        let store = affine_store();
        let model = KernelModel::fit(&store).expect("three non-collinear records");

        let mse = model.training_mse(&store).expect("store is non-empty");
        assert!(mse >= 0.0);
        assert!(mse < 1e-10, "exact affine data should fit perfectly: {mse}");
    }

    #[test]
    fn test_kernel_model_predict_extrapolates() {
        let store = affine_store();
        let model = KernelModel::fit(&store).expect("three non-collinear records");

        // Far outside the training range, still the same affine function.
        let p = model.predict(100.0, 200.0);
        assert!((p.power - (0.5 + 0.1 * 100.0 + 0.05 * 200.0)).abs() < 1e-4);
        assert!((p.latency - (1.0 + 100.0 + 200.0)).abs() < 1e-4);
    }

    #[test]
    fn test_kernel_model_empty_store() {
        let store = RecordStore::new();
        let result = KernelModel::fit(&store);
        assert!(matches!(result, Err(PredecirError::EmptyDataset { .. })));
    }

    #[test]
    fn test_kernel_model_two_records_is_singular() {
        // Two records, three unknowns per output: must fail, not produce
        // garbage coefficients.
        let mut store = RecordStore::new();
        store.merge_config("k1", &[(ConfigField::Cin, 4), (ConfigField::Hw, 8)]);
        store.merge_config("k2", &[(ConfigField::Cin, 8), (ConfigField::Hw, 16)]);
        for (id, value) in [("k1", 1.0), ("k2", 2.0)] {
            store
                .merge_measurement(id, Measurement::Power, value)
                .expect("record exists");
        }

        let result = KernelModel::fit(&store);
        assert!(matches!(result, Err(PredecirError::SingularMatrix { .. })));
    }

    #[test]
    fn test_kernel_model_fit_is_order_invariant() {
        let store = affine_store();

        // Insert the same records in a different order.
        let mut reversed = RecordStore::new();
        let kernels = [("k3", 12, 20), ("k1", 4, 8), ("k2", 8, 16)];
        for (id, cin, hw) in kernels {
            reversed.merge_config(id, &[(ConfigField::Cin, cin), (ConfigField::Hw, hw)]);
            let source = store.get(id).expect("same identifiers");
            for m in Measurement::ALL {
                reversed
                    .merge_measurement(id, m, m.value(source))
                    .expect("record exists");
            }
        }

        let a = KernelModel::fit(&store).expect("solvable");
        let b = KernelModel::fit(&reversed).expect("solvable");

        for i in 0..3 {
            for j in 0..3 {
                assert!((a.coefficients().get(i, j) - b.coefficients().get(i, j)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_design_matrices_layout() {
        let store = affine_store();
        let (x, y) = design_matrices(&store).expect("store is consistent");

        assert_eq!(x.shape(), (3, 2));
        assert_eq!(y.shape(), (3, 3));

        // Store iterates in identifier order: k1, k2, k3.
        assert!((x.get(0, 0) - 4.0).abs() < 1e-12);
        assert!((x.get(0, 1) - 8.0).abs() < 1e-12);
        assert!((x.get(2, 0) - 12.0).abs() < 1e-12);

        let k1 = store.get("k1").expect("k1 exists");
        assert!((y.get(0, 0) - k1.power).abs() < 1e-12);
        assert!((y.get(0, 1) - k1.energy).abs() < 1e-12);
        assert!((y.get(0, 2) - k1.latency).abs() < 1e-12);
    }
}
