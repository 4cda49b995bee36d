//! Base annuity rates per land type

use crate::error::{AnnuityError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Yearly annuity per acre, keyed by land-type code
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRateTable {
    rates: BTreeMap<i64, f64>,
}

impl BaseRateTable {
    /// Dry land 30,000; wet and garden land 50,000
    pub fn standard() -> Self {
        Self {
            rates: BTreeMap::from([
                (1, 30_000.0), // Dry
                (2, 50_000.0), // Wet
                (3, 50_000.0), // Garden
            ]),
        }
    }

    pub fn from_pairs<I: IntoIterator<Item = (i64, f64)>>(pairs: I) -> Self {
        Self {
            rates: pairs.into_iter().collect(),
        }
    }

    /// Load a `LandType,Rate` CSV
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv_reader(reader)
    }

    pub fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut rates = BTreeMap::new();

        for result in reader.records() {
            let record = result?;
            let code: i64 = record[0]
                .trim()
                .parse()
                .map_err(|_| AnnuityError::Config(format!("bad land type code {:?}", &record[0])))?;
            let rate: f64 = record[1]
                .trim()
                .parse()
                .map_err(|_| AnnuityError::Config(format!("bad rate {:?} for land type {code}", &record[1])))?;
            if !rate.is_finite() || rate < 0.0 {
                return Err(AnnuityError::Config(format!("negative rate for land type {code}")));
            }
            rates.insert(code, rate);
        }

        if rates.is_empty() {
            return Err(AnnuityError::Config("rate table is empty".to_string()));
        }
        Ok(Self { rates })
    }

    /// Rate for a land type, `None` when the code is not configured
    pub fn rate_for(&self, land_type_code: i64) -> Option<f64> {
        self.rates.get(&land_type_code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for BaseRateTable {
    fn default() -> Self {
        Self::standard()
    }
}
