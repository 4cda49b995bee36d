//! Destinations for summary rows

mod file;

pub use file::CsvSummarySink;

use crate::error::{AnnuityError, Result};
use crate::summary::SummaryRow;

/// Rows per write when none is configured
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Persistence target for the summary table
pub trait SummarySink {
    /// Create the target table if it does not exist yet; safe to call repeatedly
    fn ensure_table(&mut self) -> Result<()>;

    /// Persist one batch of rows
    fn write_batch(&mut self, rows: &[SummaryRow]) -> Result<()>;
}

/// Sink that keeps everything in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    table_created: bool,
    rows: Vec<SummaryRow>,
    batch_sizes: Vec<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_created(&self) -> bool {
        self.table_created
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Size of each batch in the order it arrived
    pub fn batch_sizes(&self) -> &[usize] {
        &self.batch_sizes
    }
}

impl SummarySink for MemorySink {
    fn ensure_table(&mut self) -> Result<()> {
        self.table_created = true;
        Ok(())
    }

    fn write_batch(&mut self, rows: &[SummaryRow]) -> Result<()> {
        if !self.table_created {
            return Err(AnnuityError::Config("summary table not created".to_string()));
        }
        self.rows.extend_from_slice(rows);
        self.batch_sizes.push(rows.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_requires_table() {
        let mut sink = MemorySink::new();
        assert!(sink.write_batch(&[]).is_err());

        sink.ensure_table().unwrap();
        sink.ensure_table().unwrap();
        sink.write_batch(&[]).unwrap();
        assert!(sink.table_created());
        assert_eq!(sink.batch_sizes(), &[0]);
    }
}
