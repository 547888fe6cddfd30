//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use predecir::prelude::*;
//! ```

pub use crate::error::{PredecirError, Result};
pub use crate::metrics::{mse, mse_matrix};
pub use crate::pipeline::{run, RunSummary, SourcePaths};
pub use crate::primitives::{Matrix, Vector};
pub use crate::record::{ConfigField, KernelRecord, Measurement, RecordStore};
pub use crate::regression::{KernelModel, KernelPrediction, MultiOutputRegression};
pub use crate::traits::MultiOutputEstimator;
