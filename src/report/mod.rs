//! Console report formatting.
//!
//! Pure string builders for the tab-separated record dump, the fitted
//! coefficient matrix, and per-measurement views. Printing is left to the
//! caller; the exact layout is a convenience, not a compatibility surface.

use crate::pipeline::RunSummary;
use crate::primitives::Matrix;
use crate::record::{Measurement, RecordStore};
use std::fmt::Write;

/// Formats every merged record as one tab-separated row.
#[must_use]
pub fn record_table(store: &RecordStore) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "kernel\tHW\tCIN\tCIN1\tCIN2\tCIN3\tCIN4\tCOUT\tKERNEL_SIZE\tSTRIDES\tPOOL_STRIDES\tpower\tlatency\tenergy"
    );
    for (id, r) in store.iter() {
        let _ = writeln!(
            out,
            "{id}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.hw,
            r.cin,
            r.cin1,
            r.cin2,
            r.cin3,
            r.cin4,
            r.cout,
            r.kernel_size,
            r.strides,
            r.pool_strides,
            r.power,
            r.latency,
            r.energy
        );
    }
    out
}

/// Formats a coefficient matrix, one tab-separated line per row.
#[must_use]
pub fn coefficient_table(coefficients: &Matrix<f64>) -> String {
    let mut out = String::new();
    for i in 0..coefficients.n_rows() {
        for j in 0..coefficients.n_cols() {
            if j > 0 {
                out.push('\t');
            }
            let _ = write!(out, "{}", coefficients.get(i, j));
        }
        out.push('\n');
    }
    out
}

/// Formats one measurement across all records as `HW CIN value` rows.
#[must_use]
pub fn measurement_table(store: &RecordStore, measurement: Measurement) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "HW\tCIN\t{}", measurement.key());
    for (_, r) in store.iter() {
        let _ = writeln!(out, "{}\t{}\t{}", r.hw, r.cin, measurement.value(r));
    }
    out
}

/// Formats the final run summary: coefficients, aggregate MSE, sample count.
#[must_use]
pub fn run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Coefficients of model:");
    out.push_str(&coefficient_table(summary.model.coefficients()));
    let _ = writeln!(out, "Current MSE: {}", summary.mse);
    let _ = writeln!(out, "Sample size: {}", summary.store.len());
    out
}
