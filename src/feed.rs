//! Source feeds supplying raw beneficiary rows

use crate::error::Result;
use crate::record::{load_raw_records, RawRecord};
use std::path::{Path, PathBuf};

/// Anything that can hand over the full set of source rows
pub trait SourceFeed {
    fn fetch(&self) -> Result<Vec<RawRecord>>;
}

/// Source rows exported to a CSV file
#[derive(Debug, Clone)]
pub struct CsvSourceFeed {
    path: PathBuf,
}

impl CsvSourceFeed {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceFeed for CsvSourceFeed {
    fn fetch(&self) -> Result<Vec<RawRecord>> {
        log::info!("reading source rows from {}", self.path.display());
        load_raw_records(&self.path)
    }
}

impl SourceFeed for Vec<RawRecord> {
    fn fetch(&self) -> Result<Vec<RawRecord>> {
        Ok(self.clone())
    }
}
