//! CSV-file summary table

use super::SummarySink;
use crate::error::{AnnuityError, Result};
use crate::summary::{SummaryRow, SUMMARY_COLUMNS};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Summary table stored as a CSV file; batches are appended
#[derive(Debug, Clone)]
pub struct CsvSummarySink {
    path: PathBuf,
    ready: bool,
}

impl CsvSummarySink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ready: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn existing_header(&self) -> Result<Option<String>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut line = String::new();
        BufReader::new(file).read_line(&mut line)?;
        let line = line.trim_end();
        Ok(if line.is_empty() { None } else { Some(line.to_string()) })
    }
}

impl SummarySink for CsvSummarySink {
    fn ensure_table(&mut self) -> Result<()> {
        let expected = SUMMARY_COLUMNS.join(",");

        match self.existing_header()? {
            Some(header) if header == expected => {
                log::debug!("summary table {} already exists", self.path.display());
            }
            Some(header) => {
                return Err(AnnuityError::Config(format!(
                    "{} has an unexpected header: {}",
                    self.path.display(),
                    header
                )));
            }
            None => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let mut writer = csv::Writer::from_path(&self.path)?;
                writer.write_record(SUMMARY_COLUMNS)?;
                writer.flush()?;
                log::info!("created summary table {}", self.path.display());
            }
        }

        self.ready = true;
        Ok(())
    }

    fn write_batch(&mut self, rows: &[SummaryRow]) -> Result<()> {
        if !self.ready {
            return Err(AnnuityError::Config(format!(
                "summary table {} not created",
                self.path.display()
            )));
        }

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
