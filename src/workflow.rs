//! Workflow runner: fetch, compute and persist the annuity summary
//!
//! One run reads every source row, validates it once, computes the annuity
//! schedule for each record in parallel, and writes the summary rows in
//! fixed-size batches. Any fetch, validation or write failure aborts the run.

use crate::error::{AnnuityError, Result};
use crate::feed::SourceFeed;
use crate::projection::ProjectionEngine;
use crate::record::validate_records;
use crate::rules::{AnnuityRules, RuleWarning};
use crate::sink::{SummarySink, DEFAULT_BATCH_SIZE};
use crate::summary::SummaryRow;
use serde::Serialize;
use std::collections::BTreeMap;

/// Acknowledgment returned to the trigger caller
pub const SUCCESS_MESSAGE: &str =
    "LPS_New_Annuity_Summary table created and populated successfully with updated annuity calculations";

/// Aggregate outcome of a run; carries no per-record detail
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub records_processed: usize,
    pub rows_written: usize,
    pub batches_written: usize,
    pub ineligible_records: usize,
    /// Land type codes with no configured rate, and how many records used each.
    /// Ineligible records are counted too.
    pub unknown_land_types: BTreeMap<i64, usize>,
}

impl RunReport {
    /// Operator-facing warnings for the run
    pub fn warnings(&self) -> Vec<String> {
        self.unknown_land_types
            .iter()
            .map(|(code, count)| {
                format!("land type {code} has no base rate; {count} record(s) computed with zero annuity")
            })
            .collect()
    }
}

/// Pre-configured runner for annuity workflow runs
#[derive(Debug, Clone)]
pub struct AnnuityWorkflow {
    engine: ProjectionEngine,
    batch_size: usize,
}

impl AnnuityWorkflow {
    pub fn new(rules: AnnuityRules) -> Self {
        Self {
            engine: ProjectionEngine::new(rules),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(AnnuityError::Config("batch size must be positive".to_string()));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Compute summary rows for everything the source supplies
    pub fn compute<F: SourceFeed + ?Sized>(&self, source: &F) -> Result<(Vec<SummaryRow>, RunReport)> {
        let raw = source.fetch()?;
        let records = validate_records(&raw, self.engine.rules().input_policy)?;
        let results = self.engine.compute_batch(&records);

        let mut report = RunReport {
            records_processed: records.len(),
            ..Default::default()
        };

        let rows: Vec<SummaryRow> = records
            .iter()
            .zip(&results)
            .map(|(record, result)| {
                if !result.is_eligible() {
                    report.ineligible_records += 1;
                }
                if let Some(RuleWarning::UnknownLandType { code }) = result.warning {
                    *report.unknown_land_types.entry(code).or_insert(0) += 1;
                }
                SummaryRow::from_result(record, result)
            })
            .collect();

        Ok((rows, report))
    }

    /// Run the whole workflow against a source and a sink
    pub fn run<F, S>(&self, source: &F, sink: &mut S) -> Result<RunReport>
    where
        F: SourceFeed + ?Sized,
        S: SummarySink + ?Sized,
    {
        let (rows, mut report) = self.compute(source)?;
        log::info!(
            "computed annuities for {} records ({} ineligible)",
            report.records_processed,
            report.ineligible_records
        );
        for warning in report.warnings() {
            log::warn!("{warning}");
        }

        sink.ensure_table()?;
        for chunk in rows.chunks(self.batch_size) {
            sink.write_batch(chunk)?;
            report.rows_written += chunk.len();
            report.batches_written += 1;
            log::debug!("wrote batch of {} rows", chunk.len());
        }

        log::info!(
            "wrote {} rows in {} batches",
            report.rows_written,
            report.batches_written
        );
        Ok(report)
    }
}

impl Default for AnnuityWorkflow {
    fn default() -> Self {
        Self::new(AnnuityRules::standard())
    }
}
