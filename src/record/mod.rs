//! Kernel records and the merged record store.
//!
//! A [`KernelRecord`] holds the structural configuration of one hardware
//! kernel instance plus its measured power, energy, and latency. The
//! [`RecordStore`] is populated by merging four independently-keyed sources:
//! the config source creates records, the three measurement sources only
//! populate fields of records that already exist.

use crate::error::{PredecirError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One kernel configuration instance with its measurements.
///
/// Config fields default to 0 ("unset"); measured fields default to 0.0
/// ("not yet observed").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelRecord {
    /// Input channel count (first regression predictor).
    pub cin: i32,
    /// Spatial size (second regression predictor).
    pub hw: i32,
    /// Per-branch input channel counts.
    pub cin1: i32,
    pub cin2: i32,
    pub cin3: i32,
    pub cin4: i32,
    /// Output channel count.
    pub cout: i32,
    /// Convolution kernel size.
    pub kernel_size: i32,
    /// Convolution strides.
    pub strides: i32,
    /// Pooling strides.
    pub pool_strides: i32,

    /// Measured power draw.
    pub power: f64,
    /// Measured energy consumption.
    pub energy: f64,
    /// Measured latency.
    pub latency: f64,
}

/// The closed set of recognized config keys.
///
/// Replaces a string-keyed setter table with an exhaustively matched enum:
/// recognized keys are a compile-time-checked closed set, and anything else
/// falls into the open "unrecognized" branch where [`ConfigField::parse`]
/// returns `None`.
///
/// # Examples
///
/// ```
/// use predecir::record::ConfigField;
///
/// assert_eq!(ConfigField::parse("CIN"), Some(ConfigField::Cin));
/// assert_eq!(ConfigField::parse("DILATION"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Cin,
    Cin1,
    Cin2,
    Cin3,
    Cin4,
    Cout,
    KernelSize,
    Strides,
    PoolStrides,
    Hw,
}

impl ConfigField {
    /// Every recognized config field, in record-layout order.
    pub const ALL: [ConfigField; 10] = [
        ConfigField::Cin,
        ConfigField::Cin1,
        ConfigField::Cin2,
        ConfigField::Cin3,
        ConfigField::Cin4,
        ConfigField::Cout,
        ConfigField::KernelSize,
        ConfigField::Strides,
        ConfigField::PoolStrides,
        ConfigField::Hw,
    ];

    /// Maps a document key to a recognized field, or `None` for anything
    /// outside the recognized set.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "CIN" => Some(ConfigField::Cin),
            "CIN1" => Some(ConfigField::Cin1),
            "CIN2" => Some(ConfigField::Cin2),
            "CIN3" => Some(ConfigField::Cin3),
            "CIN4" => Some(ConfigField::Cin4),
            "COUT" => Some(ConfigField::Cout),
            "KERNEL_SIZE" => Some(ConfigField::KernelSize),
            "STRIDES" => Some(ConfigField::Strides),
            "POOL_STRIDES" => Some(ConfigField::PoolStrides),
            "HW" => Some(ConfigField::Hw),
            _ => None,
        }
    }

    /// The key under which this field appears in config documents.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::Cin => "CIN",
            ConfigField::Cin1 => "CIN1",
            ConfigField::Cin2 => "CIN2",
            ConfigField::Cin3 => "CIN3",
            ConfigField::Cin4 => "CIN4",
            ConfigField::Cout => "COUT",
            ConfigField::KernelSize => "KERNEL_SIZE",
            ConfigField::Strides => "STRIDES",
            ConfigField::PoolStrides => "POOL_STRIDES",
            ConfigField::Hw => "HW",
        }
    }

    /// Writes the field value into a record.
    pub fn apply(self, record: &mut KernelRecord, value: i32) {
        match self {
            ConfigField::Cin => record.cin = value,
            ConfigField::Cin1 => record.cin1 = value,
            ConfigField::Cin2 => record.cin2 = value,
            ConfigField::Cin3 => record.cin3 = value,
            ConfigField::Cin4 => record.cin4 = value,
            ConfigField::Cout => record.cout = value,
            ConfigField::KernelSize => record.kernel_size = value,
            ConfigField::Strides => record.strides = value,
            ConfigField::PoolStrides => record.pool_strides = value,
            ConfigField::Hw => record.hw = value,
        }
    }
}

/// The three measured quantities, one per measurement source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Power,
    Energy,
    Latency,
}

impl Measurement {
    /// All measurements in response-column order.
    pub const ALL: [Measurement; 3] = [
        Measurement::Power,
        Measurement::Energy,
        Measurement::Latency,
    ];

    /// The field name under which this measurement appears in its document.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Measurement::Power => "power",
            Measurement::Energy => "energy",
            Measurement::Latency => "latency",
        }
    }

    /// Writes the measured value into a record.
    pub fn apply(self, record: &mut KernelRecord, value: f64) {
        match self {
            Measurement::Power => record.power = value,
            Measurement::Energy => record.energy = value,
            Measurement::Latency => record.latency = value,
        }
    }

    /// Reads the measured value back out of a record.
    #[must_use]
    pub fn value(self, record: &KernelRecord) -> f64 {
        match self {
            Measurement::Power => record.power,
            Measurement::Energy => record.energy,
            Measurement::Latency => record.latency,
        }
    }
}

/// Mapping from kernel identifier to its merged record.
///
/// Identifiers are case-sensitive, opaque strings. Iteration order is the
/// identifiers' lexicographic order, which keeps reports deterministic; the
/// regression result itself is invariant to iteration order.
///
/// # Examples
///
/// ```
/// use predecir::record::{ConfigField, Measurement, RecordStore};
///
/// let mut store = RecordStore::new();
/// store.merge_config("k1", &[(ConfigField::Cin, 4), (ConfigField::Hw, 8)]);
/// store.merge_measurement("k1", Measurement::Power, 1.5).unwrap();
///
/// let record = store.get("k1").unwrap();
/// assert_eq!(record.cin, 4);
/// assert!((record.power - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    records: BTreeMap<String, KernelRecord>,
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&KernelRecord> {
        self.records.get(id)
    }

    /// Iterates records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KernelRecord)> {
        self.records.iter().map(|(id, rec)| (id.as_str(), rec))
    }

    /// Merges config fields for one kernel.
    ///
    /// This is the sole record-creating operation: a missing identifier gets
    /// a fresh default record, an existing one has the given config fields
    /// overwritten. Measured fields are never touched.
    pub fn merge_config(&mut self, id: &str, updates: &[(ConfigField, i32)]) {
        let record = self.records.entry(id.to_string()).or_default();
        for &(field, value) in updates {
            field.apply(record, value);
        }
    }

    /// Merges one measured value for one kernel.
    ///
    /// The identifier must already have been created by the config source.
    ///
    /// # Errors
    ///
    /// Returns [`PredecirError::UnmatchedKey`] without mutating anything if
    /// no record exists for `id`; the config source is authoritative for
    /// record existence.
    pub fn merge_measurement(&mut self, id: &str, measurement: Measurement, value: f64) -> Result<()> {
        match self.records.get_mut(id) {
            Some(record) => {
                measurement.apply(record, value);
                Ok(())
            }
            None => Err(PredecirError::UnmatchedKey { id: id.to_string() }),
        }
    }
}
