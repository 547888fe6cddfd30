//! Batch pipeline driver.
//!
//! One run reads all four sources, builds one record store, performs one
//! fit and one evaluation, and returns the results. The store is passed by
//! value through each loading stage, so ownership and data flow are
//! explicit; nothing is shared or mutated behind the pipeline's back.
//!
//! Merge-time problems were already recovered (and reported) inside the
//! readers; only the structural errors of the fit and evaluation steps
//! propagate out of [`run`].

use crate::error::Result;
use crate::record::{Measurement, RecordStore};
use crate::regression::KernelModel;
use crate::source;
use std::path::PathBuf;
use tracing::debug;

/// Locations of the four source inputs for one run.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    /// Directory tree of config documents (searched recursively).
    pub config_dir: PathBuf,
    /// Latency measurement document.
    pub latency: PathBuf,
    /// Power measurement document.
    pub power: PathBuf,
    /// Energy measurement document.
    pub energy: PathBuf,
}

/// The outcome of one batch run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The merged record store the model was fitted on.
    pub store: RecordStore,
    /// The fitted model.
    pub model: KernelModel,
    /// Aggregate mean squared error over the training records.
    pub mse: f64,
}

/// Executes one batch run: merge all sources, fit, evaluate.
///
/// Sources merge in config → latency → power → energy order; since the
/// four sources touch disjoint fields, the final store content does not
/// depend on this order.
///
/// # Errors
///
/// Returns [`crate::error::PredecirError::SingularMatrix`] when the merged
/// records cannot determine the model and
/// [`crate::error::PredecirError::EmptyDataset`] when no records were
/// merged at all; in both cases no partial results are produced.
pub fn run(paths: &SourcePaths) -> Result<RunSummary> {
    let store = RecordStore::new();
    let store = source::load_config_dir(store, &paths.config_dir);
    let store = source::load_measurement(store, &paths.latency, Measurement::Latency);
    let store = source::load_measurement(store, &paths.power, Measurement::Power);
    let store = source::load_measurement(store, &paths.energy, Measurement::Energy);
    debug!("merged {} kernel records", store.len());

    let model = KernelModel::fit(&store)?;
    let mse = model.training_mse(&store)?;

    Ok(RunSummary { store, model, mse })
}
