//! Readers for the four JSON source document kinds.
//!
//! Each document is namespaced: the top-level object is keyed by model name,
//! derived from the file's base name (the substring before the first `_`).
//! The config source creates records; the power, latency, and energy sources
//! populate one measured field each.
//!
//! Readers never fail the pipeline. A source that cannot be opened or parsed
//! is reported and skipped whole, and per-entry problems (unrecognized config
//! keys, identifiers with no config record, malformed values) are reported
//! and skipped while the rest of the document is processed. The store passes
//! through each reader by value, so data flow and ownership stay explicit.

use crate::error::{PredecirError, Result};
use crate::record::{ConfigField, Measurement, RecordStore};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Derives the model-namespace key from a source file name.
///
/// The file's stem is split at the first `_`; the part before it names the
/// model. A stem without `_` is used whole. The same convention applies to
/// all four source kinds so their entries merge under one namespace.
///
/// # Examples
///
/// ```
/// use predecir::source::model_namespace;
/// use std::path::Path;
///
/// let ns = model_namespace(Path::new("kernel_power/addrelu_power.json"));
/// assert_eq!(ns.as_deref(), Some("addrelu"));
/// ```
#[must_use]
pub fn model_namespace(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = match stem.find('_') {
        Some(pos) => &stem[..pos],
        None => stem,
    };
    Some(name.to_string())
}

/// Reads a source document and selects its model sub-object.
fn read_model_object(path: &Path) -> Result<serde_json::Map<String, Value>> {
    let text = fs::read_to_string(path).map_err(|e| PredecirError::source_unavailable(path, e))?;
    let doc: Value =
        serde_json::from_str(&text).map_err(|e| PredecirError::source_unavailable(path, e))?;

    let namespace = model_namespace(path)
        .ok_or_else(|| PredecirError::source_unavailable(path, "file name has no stem"))?;

    match doc.get(&namespace).and_then(Value::as_object) {
        Some(model) => Ok(model.clone()),
        None => Err(PredecirError::source_unavailable(
            path,
            format!("no \"{namespace}\" model object"),
        )),
    }
}

/// Merges one config document into the store.
///
/// Every kernel entry's `config` object is scanned key by key: recognized
/// fields are applied, unrecognized keys are reported and skipped without
/// affecting the remaining fields or kernels. An unavailable or malformed
/// document leaves the store unchanged.
#[must_use]
pub fn load_config(mut store: RecordStore, path: &Path) -> RecordStore {
    let model = match read_model_object(path) {
        Ok(model) => model,
        Err(e) => {
            warn!("{e}");
            return store;
        }
    };

    for (id, entry) in &model {
        let config = match entry.get("config").and_then(Value::as_object) {
            Some(config) => config,
            None => {
                warn!("kernel {id} in {} has no config object", path.display());
                continue;
            }
        };

        let mut updates = Vec::with_capacity(config.len());
        for (key, value) in config {
            match ConfigField::parse(key) {
                Some(field) => match value.as_i64() {
                    Some(v) => updates.push((field, v as i32)),
                    None => warn!("config field {key} of kernel {id} is not an integer"),
                },
                None => warn!("{}", PredecirError::UnknownField { key: key.clone() }),
            }
        }
        store.merge_config(id, &updates);
    }

    store
}

/// Merges one measurement document into the store.
///
/// Each kernel entry carries one string-encoded floating-point field named
/// after the measurement. Entries whose identifier has no config-created
/// record, or whose value fails to parse, are reported and skipped; the
/// store never grows here.
#[must_use]
pub fn load_measurement(
    mut store: RecordStore,
    path: &Path,
    measurement: Measurement,
) -> RecordStore {
    let model = match read_model_object(path) {
        Ok(model) => model,
        Err(e) => {
            warn!("{e}");
            return store;
        }
    };

    for (id, entry) in &model {
        let raw = match entry.get(measurement.key()).and_then(Value::as_str) {
            Some(raw) => raw,
            None => {
                warn!(
                    "kernel {id} in {} has no string-encoded {} field",
                    path.display(),
                    measurement.key()
                );
                continue;
            }
        };

        let value = match raw.parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                warn!("kernel {id}: cannot parse {} value {raw:?}", measurement.key());
                continue;
            }
        };

        if let Err(e) = store.merge_measurement(id, measurement, value) {
            warn!("{e}");
        }
    }

    store
}

/// Feeds every regular file under a directory (recursively) through
/// [`load_config`].
///
/// Files are visited in sorted path order. An unreadable directory is
/// reported and leaves the store unchanged.
#[must_use]
pub fn load_config_dir(mut store: RecordStore, dir: &Path) -> RecordStore {
    let mut files = Vec::new();
    if let Err(e) = collect_regular_files(dir, &mut files) {
        warn!("{}", PredecirError::source_unavailable(dir, e));
        return store;
    }
    files.sort();

    for file in files {
        store = load_config(store, &file);
    }
    store
}

fn collect_regular_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_regular_files(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}
