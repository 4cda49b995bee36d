//! Run configuration read from the environment
//!
//! Variables:
//!   ANNUITY_SOURCE_PATH     source CSV export (default: data/lps_final.csv)
//!   ANNUITY_SINK_PATH       summary table CSV (default: output/lps_new_annuity_summary.csv)
//!   ANNUITY_RATE_TABLE      optional `LandType,Rate` CSV overriding the standard rates
//!   ANNUITY_STRICT_INPUT    1/true to reject missing extent or land type
//!   ANNUITY_JOINT_PREDICATE consistent | both-present
//!   ANNUITY_BATCH_SIZE      rows per sink write (default: 500)

use crate::error::{AnnuityError, Result};
use crate::feed::CsvSourceFeed;
use crate::record::InputPolicy;
use crate::rules::{AnnuityRules, BaseRateTable, JointFilingPredicate};
use crate::sink::{CsvSummarySink, DEFAULT_BATCH_SIZE};
use crate::workflow::{AnnuityWorkflow, RunReport};
use std::path::PathBuf;

pub const DEFAULT_SOURCE_PATH: &str = "data/lps_final.csv";
pub const DEFAULT_SINK_PATH: &str = "output/lps_new_annuity_summary.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    pub source_path: PathBuf,
    pub sink_path: PathBuf,
    pub rate_table: Option<PathBuf>,
    pub input_policy: InputPolicy,
    pub joint_filing: JointFilingPredicate,
    pub batch_size: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            sink_path: PathBuf::from(DEFAULT_SINK_PATH),
            rate_table: None,
            input_policy: InputPolicy::Lenient,
            joint_filing: JointFilingPredicate::Consistent,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl WorkflowConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<L: Fn(&str) -> Option<String>>(lookup: L) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup("ANNUITY_SOURCE_PATH") {
            config.source_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("ANNUITY_SINK_PATH") {
            config.sink_path = PathBuf::from(path);
        }
        config.rate_table = lookup("ANNUITY_RATE_TABLE").map(PathBuf::from);

        if let Some(flag) = lookup("ANNUITY_STRICT_INPUT") {
            config.input_policy = if parse_flag(&flag)? {
                InputPolicy::Strict
            } else {
                InputPolicy::Lenient
            };
        }
        if let Some(name) = lookup("ANNUITY_JOINT_PREDICATE") {
            config.joint_filing = name.parse().map_err(AnnuityError::Config)?;
        }
        if let Some(size) = lookup("ANNUITY_BATCH_SIZE") {
            config.batch_size = size
                .trim()
                .parse()
                .map_err(|_| AnnuityError::Config(format!("invalid ANNUITY_BATCH_SIZE: {size}")))?;
        }

        Ok(config)
    }

    /// Rules for this run, loading the rate table override if configured
    pub fn rules(&self) -> Result<AnnuityRules> {
        let rates = match &self.rate_table {
            Some(path) => BaseRateTable::from_csv_path(path)?,
            None => BaseRateTable::standard(),
        };
        Ok(AnnuityRules::standard()
            .with_rates(rates)
            .with_joint_filing(self.joint_filing)
            .with_input_policy(self.input_policy))
    }

    pub fn workflow(&self) -> Result<AnnuityWorkflow> {
        AnnuityWorkflow::new(self.rules()?).with_batch_size(self.batch_size)
    }

    /// Run CSV source to CSV summary table
    pub fn execute(&self) -> Result<RunReport> {
        let workflow = self.workflow()?;
        let source = CsvSourceFeed::new(&self.source_path);
        let mut sink = CsvSummarySink::new(&self.sink_path);
        workflow.run(&source, &mut sink)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AnnuityError::Config(format!("invalid boolean flag: {other}"))),
    }
}
