//! Predecir: kernel performance modeling from profiling data.
//!
//! Predecir merges four independently-keyed JSON profiling sources (kernel
//! configs plus power, latency, and energy measurements) into one record
//! set, fits a multi-output linear model by ordinary least squares, and
//! evaluates it with an aggregate mean squared error.
//!
//! # Quick Start
//!
//! ```
//! use predecir::prelude::*;
//!
//! // Merge three kernels: config creates records, measurements fill them.
//! let mut store = RecordStore::new();
//! for (id, cin, hw) in [("k1", 4, 8), ("k2", 8, 16), ("k3", 12, 20)] {
//!     store.merge_config(id, &[(ConfigField::Cin, cin), (ConfigField::Hw, hw)]);
//! }
//! for (id, latency) in [("k1", 13.0), ("k2", 25.0), ("k3", 33.0)] {
//!     store.merge_measurement(id, Measurement::Latency, latency).unwrap();
//! }
//!
//! // Fit power/energy/latency against (CIN, HW) and evaluate.
//! let model = KernelModel::fit(&store).unwrap();
//! let mse = model.training_mse(&store).unwrap();
//! assert!(mse < 1e-10);
//!
//! let prediction = model.predict(4.0, 8.0);
//! assert!((prediction.latency - 13.0).abs() < 1e-6);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`record`]: Kernel records and the merged record store
//! - [`source`]: JSON source document readers
//! - [`regression`]: Multi-output OLS and the kernel model
//! - [`metrics`]: Evaluation metrics
//! - [`report`]: Console report formatting
//! - [`pipeline`]: Batch run driver

pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod prelude;
pub mod primitives;
pub mod record;
pub mod regression;
pub mod report;
pub mod source;
pub mod traits;

pub use error::{PredecirError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::MultiOutputEstimator;
