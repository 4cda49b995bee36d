//! Land Annuity CLI
//!
//! Command-line interface for running the annuity workflow against CSV exports

use anyhow::Context;
use clap::{Parser, Subcommand};
use land_annuity::{
    record::{load_raw_records, validate_records},
    InputPolicy, JointFilingPredicate, ProjectionEngine, WorkflowConfig,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "land-annuity", version, about = "Land-pooling annuity schedule calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct RuleArgs {
    /// `LandType,Rate` CSV overriding the standard base rates
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Reject rows with a missing or unparseable extent or land type
    #[arg(long)]
    strict: bool,

    /// Joint-ownership mutation rule: consistent | both-present
    #[arg(long, default_value = "consistent")]
    joint_predicate: JointFilingPredicate,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute every source row and append the results to the summary table
    Run {
        /// Source CSV export
        #[arg(long)]
        source: PathBuf,

        /// Summary table CSV (created if missing)
        #[arg(long)]
        sink: PathBuf,

        /// Rows per write
        #[arg(long, default_value_t = land_annuity::sink::DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Print the projected schedule for the first rows of a source export
    Inspect {
        #[arg(long)]
        source: PathBuf,

        /// Number of rows to print
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[command(flatten)]
        rules: RuleArgs,
    },
}

impl RuleArgs {
    fn apply(&self, config: &mut WorkflowConfig) {
        config.rate_table = self.rates.clone();
        config.input_policy = if self.strict {
            InputPolicy::Strict
        } else {
            InputPolicy::Lenient
        };
        config.joint_filing = self.joint_predicate;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Run {
            source,
            sink,
            batch_size,
            rules,
        } => {
            let mut config = WorkflowConfig {
                source_path: source,
                sink_path: sink,
                batch_size,
                ..WorkflowConfig::default()
            };
            rules.apply(&mut config);

            let report = config
                .execute()
                .with_context(|| format!("annuity run from {} failed", config.source_path.display()))?;

            println!("Records processed: {}", report.records_processed);
            println!("Rows written:      {} ({} batches)", report.rows_written, report.batches_written);
            println!("Ineligible:        {}", report.ineligible_records);
            for warning in report.warnings() {
                println!("Warning: {warning}");
            }
            println!("\nSummary written to: {}", config.sink_path.display());
        }
        Command::Inspect {
            source,
            limit,
            rules,
        } => {
            let mut config = WorkflowConfig::default();
            rules.apply(&mut config);
            let engine = ProjectionEngine::new(config.rules()?);

            let raw = load_raw_records(&source)
                .with_context(|| format!("failed to read {}", source.display()))?;
            let take = limit.min(raw.len());
            let records = validate_records(&raw[..take], config.input_policy)?;

            println!("{:>5} {:>5} {:>4} {:>8} {:>12} {:>12} {:>12} {:>14} {:>14} {:>14}",
                "Row", "Owner", "Land", "Extent", "Base", "Year1", "Year10", "Total", "Received", "Difference");
            println!("{}", "-".repeat(110));

            for record in &records {
                let result = engine.compute_annuity_for_row(record);
                println!("{:>5} {:>5} {:>4} {:>8.4} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2} {:>14.2}",
                    record.row_index + 1,
                    record.owner_type.as_code(),
                    record.land_type_code,
                    record.extent,
                    result.base_annuity,
                    result.schedule.year(1).unwrap_or(0.0),
                    result.schedule.year(10).unwrap_or(0.0),
                    result.total_projected,
                    result.total_received,
                    result.difference,
                );
            }

            if raw.len() > take {
                println!("... ({} more rows)", raw.len() - take);
            }
        }
    }

    Ok(())
}
