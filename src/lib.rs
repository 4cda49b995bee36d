//! Land Annuity - annuity schedule engine for land-pooling beneficiaries
//!
//! This library provides:
//! - Validation of raw beneficiary rows into fixed-shape records
//! - Eligibility and base-rate resolution per ownership and land type
//! - 15-year annuity schedule projection with step-up and plateau
//! - Reconciliation against payments already disbursed
//! - Batched persistence of the annuity summary table

pub mod config;
pub mod error;
pub mod feed;
pub mod projection;
pub mod record;
pub mod rules;
pub mod sink;
pub mod summary;
pub mod workflow;

// Re-export commonly used types
pub use config::WorkflowConfig;
pub use error::{AnnuityError, Result};
pub use feed::{CsvSourceFeed, SourceFeed};
pub use projection::{AnnuityResult, ProjectionEngine, YearlySchedule};
pub use record::{InputPolicy, LandRecord, OwnerType, RawRecord};
pub use rules::{AnnuityRules, BaseRateTable, JointFilingPredicate};
pub use sink::{CsvSummarySink, MemorySink, SummarySink};
pub use summary::SummaryRow;
pub use workflow::{AnnuityWorkflow, RunReport};
