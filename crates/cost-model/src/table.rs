// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sample tables: measured cost series keyed by category.
//!
//! # File format
//!
//! ```text
//! category,1,2,4,8,...          ← header: label cell, then sampled sizes
//! L0_0_PING_1,0.21,0.21,0.22,...
//! L1_2_DUPLEX_4,1.90,1.91,...
//! ```
//!
//! Sizes must be strictly increasing powers of two. Every row carries
//! one value per sampled size. Blank lines are ignored, and cells may be
//! quoted with `"`.

use crate::fit::{fit_exponential, ExpCurve, FitParams};
use crate::CostError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Relative RMS error above which an extrapolation fit is reported as poor.
const POOR_FIT_THRESHOLD: f64 = 0.25;

#[derive(Debug)]
struct Series {
    values: Vec<f64>,
    /// Fitted lazily on first off-grid lookup.
    curve: OnceLock<Result<ExpCurve, String>>,
}

/// An immutable table of cost samples.
#[derive(Debug)]
pub struct SampleTable {
    sizes: Vec<u64>,
    /// `log2` of each sampled size.
    exponents: Vec<f64>,
    rows: HashMap<String, Series>,
    /// Categories in file order.
    order: Vec<String>,
    fit_params: FitParams,
}

impl SampleTable {
    /// Parses a table from CSV text.
    pub fn from_csv_str(text: &str) -> Result<Self, CostError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut records = reader
            .records()
            .map(|record| {
                record.map_err(|e| {
                    let line = e.position().map_or(0, |p| p.line() as usize);
                    CostError::malformed(line, e.to_string())
                })
            })
            .filter(|record| !matches!(record, Ok(r) if r.iter().all(str::is_empty)));

        let header = records
            .next()
            .ok_or_else(|| CostError::malformed(1, "table is empty"))??;
        let sizes = parse_header(line_of(&header), &header)?;

        let mut rows = HashMap::new();
        let mut order = Vec::new();
        for record in records {
            let record = record?;
            let line_no = line_of(&record);
            let category = record.get(0).unwrap_or_default();
            if category.is_empty() {
                return Err(CostError::malformed(line_no, "missing category name"));
            }
            let values = record
                .iter()
                .skip(1)
                .map(|c| {
                    c.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| CostError::malformed(line_no, format!("'{c}' is not a number")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != sizes.len() {
                return Err(CostError::malformed(
                    line_no,
                    format!(
                        "category '{category}' has {} values, header has {} sizes",
                        values.len(),
                        sizes.len()
                    ),
                ));
            }
            let series = Series {
                values,
                curve: OnceLock::new(),
            };
            if rows.insert(category.to_string(), series).is_some() {
                return Err(CostError::malformed(
                    line_no,
                    format!("duplicate category '{category}'"),
                ));
            }
            order.push(category.to_string());
        }

        let exponents = sizes.iter().map(|&s| (s as f64).log2()).collect();
        tracing::debug!(
            "parsed cost table: {} categories × {} sizes",
            order.len(),
            sizes.len()
        );
        Ok(Self {
            sizes,
            exponents,
            rows,
            order,
            fit_params: FitParams::default(),
        })
    }

    /// Reads and parses a table file.
    pub fn from_file(path: &Path) -> Result<Self, CostError> {
        let text = std::fs::read_to_string(path).map_err(|source| CostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_csv_str(&text)?;
        tracing::info!(
            "loaded cost table '{}' ({} categories)",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    /// Overrides the solver parameters used for extrapolation.
    pub fn with_fit_params(mut self, params: FitParams) -> Self {
        self.fit_params = params;
        self
    }

    /// Sampled message sizes, ascending.
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    /// Categories in file order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn has_category(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Raw samples for `key`.
    pub fn samples(&self, key: &str) -> Result<&[f64], CostError> {
        Ok(&self.series(key)?.values)
    }

    fn series(&self, key: &str) -> Result<&Series, CostError> {
        self.rows.get(key).ok_or_else(|| CostError::MissingCategory {
            key: key.to_string(),
        })
    }

    /// Cost for `size` bytes in category `key`.
    ///
    /// Sampled powers of two return the stored value; any other size is
    /// evaluated on the category's fitted curve at `log2(size)`.
    pub fn lookup(&self, size: u64, key: &str) -> Result<f64, CostError> {
        if size == 0 {
            return Err(CostError::InvalidMessageSize { size });
        }
        let series = self.series(key)?;
        if size.is_power_of_two() {
            if let Ok(idx) = self.sizes.binary_search(&size) {
                return Ok(series.values[idx]);
            }
        }

        let curve = self.curve(key, series)?;
        let value = curve.eval((size as f64).log2());
        if !value.is_finite() {
            return Err(CostError::FitConvergence {
                key: key.to_string(),
                detail: format!("extrapolated value at {size} bytes is not finite"),
            });
        }
        tracing::trace!("{} @ {} bytes extrapolated to {:.6}", key, size, value);
        Ok(value)
    }

    /// The fitted curve for `key`, fitting it on first use.
    pub fn fit_for(&self, key: &str) -> Result<ExpCurve, CostError> {
        self.curve(key, self.series(key)?)
    }

    fn curve(&self, key: &str, series: &Series) -> Result<ExpCurve, CostError> {
        series
            .curve
            .get_or_init(|| {
                let curve = fit_exponential(&self.exponents, &series.values, &self.fit_params)
                    .map_err(|e| e.to_string())?;
                let rel = relative_rms(&curve, &self.exponents, &series.values);
                if rel > POOR_FIT_THRESHOLD {
                    tracing::warn!(
                        "exponential fit for '{}' is poor (relative RMS error {:.2})",
                        key,
                        rel
                    );
                }
                Ok(curve)
            })
            .clone()
            .map_err(|detail| CostError::FitConvergence {
                key: key.to_string(),
                detail,
            })
    }
}

fn line_of(record: &csv::StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

fn parse_header(line_no: usize, header: &csv::StringRecord) -> Result<Vec<u64>, CostError> {
    let sizes = header
        .iter()
        .skip(1)
        .map(|c| {
            c.parse::<u64>()
                .ok()
                .filter(|s| s.is_power_of_two())
                .ok_or_else(|| {
                    CostError::malformed(line_no, format!("size '{c}' is not a positive power of two"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if sizes.is_empty() {
        return Err(CostError::malformed(line_no, "header lists no message sizes"));
    }
    if sizes.windows(2).any(|w| w[0] >= w[1]) {
        return Err(CostError::malformed(line_no, "sizes must be strictly increasing"));
    }
    Ok(sizes)
}

fn relative_rms(curve: &ExpCurve, xs: &[f64], ys: &[f64]) -> f64 {
    let n = ys.len().max(1) as f64;
    let mean_abs = ys.iter().map(|y| y.abs()).sum::<f64>() / n;
    if mean_abs == 0.0 {
        return 0.0;
    }
    (curve.sse(xs, ys) / n).sqrt() / mean_abs
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
category,1,2,4,8,16,32
L0_0_PING_1,1,2,4,8,16,32
L1_0_PING_1,0.5,0.5,0.5,0.5,0.5,0.5
";

    #[test]
    fn test_parse_table() {
        let t = SampleTable::from_csv_str(TABLE).unwrap();
        assert_eq!(t.sizes(), &[1, 2, 4, 8, 16, 32]);
        assert_eq!(t.len(), 2);
        assert!(t.has_category("L1_0_PING_1"));
        assert_eq!(
            t.categories().collect::<Vec<_>>(),
            vec!["L0_0_PING_1", "L1_0_PING_1"]
        );
    }

    #[test]
    fn test_exact_power_of_two() {
        let t = SampleTable::from_csv_str(TABLE).unwrap();
        assert_eq!(t.lookup(8, "L0_0_PING_1").unwrap(), 8.0);
        assert_eq!(t.lookup(1, "L0_0_PING_1").unwrap(), 1.0);
    }

    #[test]
    fn test_off_grid_extrapolates() {
        let t = SampleTable::from_csv_str(TABLE).unwrap();
        let v = t.lookup(24, "L0_0_PING_1").unwrap();
        assert!((v - 24.0).abs() < 1e-4, "got {v}");
        let beyond = t.lookup(64, "L0_0_PING_1").unwrap();
        assert!((beyond - 64.0).abs() < 1e-3, "got {beyond}");
        let flat = t.lookup(1000, "L1_0_PING_1").unwrap();
        assert!((flat - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_category() {
        let t = SampleTable::from_csv_str(TABLE).unwrap();
        assert!(matches!(
            t.lookup(4, "L9_9_PING_1"),
            Err(CostError::MissingCategory { .. })
        ));
    }

    #[test]
    fn test_zero_size() {
        let t = SampleTable::from_csv_str(TABLE).unwrap();
        assert!(matches!(
            t.lookup(0, "L0_0_PING_1"),
            Err(CostError::InvalidMessageSize { size: 0 })
        ));
    }

    #[test]
    fn test_fit_needs_three_samples() {
        let t = SampleTable::from_csv_str("c,1,2\nA,1,2\n").unwrap();
        assert_eq!(t.lookup(2, "A").unwrap(), 2.0);
        assert!(matches!(
            t.lookup(3, "A"),
            Err(CostError::FitConvergence { .. })
        ));
    }

    #[test]
    fn test_malformed_header() {
        let err = SampleTable::from_csv_str("c,1,3,4\n").unwrap_err();
        assert!(matches!(err, CostError::MalformedTable { line: 1, .. }));
        assert!(SampleTable::from_csv_str("c,4,2\n").is_err());
        assert!(SampleTable::from_csv_str("c\n").is_err());
        assert!(SampleTable::from_csv_str("\n\n").is_err());
    }

    #[test]
    fn test_malformed_rows() {
        let err = SampleTable::from_csv_str("c,1,2\n\nA,1\n").unwrap_err();
        assert!(matches!(err, CostError::MalformedTable { line: 3, .. }));
        assert!(SampleTable::from_csv_str("c,1,2\nA,1,x\n").is_err());
        assert!(SampleTable::from_csv_str("c,1,2\nA,1,2\nA,3,4\n").is_err());
        assert!(SampleTable::from_csv_str("c,1,2\n,1,2\n").is_err());
    }

    #[test]
    fn test_quoted_cells() {
        let t = SampleTable::from_csv_str(
            "\"category\",\"1\",2,4\n\"L0_0_PING_1\", 1.5 ,\"2.5\",3.5\n\"L1_0,odd\",1,2,3\n",
        )
        .unwrap();
        assert_eq!(t.sizes(), &[1, 2, 4]);
        assert_eq!(t.lookup(2, "L0_0_PING_1").unwrap(), 2.5);
        assert_eq!(t.lookup(1, "L0_0_PING_1").unwrap(), 1.5);
        assert!(t.has_category("L1_0,odd"));
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        let t = SampleTable::from_csv_str("c,1,2\n   \nA,1,2\n").unwrap();
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_from_file_missing() {
        let err = SampleTable::from_file(Path::new("/nonexistent/table.csv")).unwrap_err();
        assert!(matches!(err, CostError::Io { .. }));
    }
}
