//! Annuity rules: base rates, eligibility and schedule parameters

mod eligibility;
mod rates;

pub use eligibility::{
    check_eligibility, resolve_base_annuity, BaseResolution, Eligibility, JointFilingPredicate,
};
pub use rates::BaseRateTable;

use crate::record::InputPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recoverable problem found while resolving a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleWarning {
    /// Land type with no configured rate; the record's annuity is zero
    UnknownLandType { code: i64 },
}

/// Container for all rule parameters
#[derive(Debug, Clone)]
pub struct AnnuityRules {
    pub rates: BaseRateTable,

    pub joint_filing: JointFilingPredicate,

    /// Agreements strictly before this date get the one-acre minimum
    pub cutoff_date: NaiveDate,

    /// Yearly step-up as a fraction of the base annuity
    pub step_up_rate: f64,

    /// Last year of the step-up; later years repeat its amount
    pub plateau_year: u32,

    /// One-time year-1 payment per acre of garden extent
    pub garden_rate: f64,

    pub input_policy: InputPolicy,
}

impl AnnuityRules {
    /// Rules currently applied to the land-pooling scheme
    pub fn standard() -> Self {
        Self {
            rates: BaseRateTable::standard(),
            joint_filing: JointFilingPredicate::Consistent,
            cutoff_date: NaiveDate::from_ymd_opt(2015, 2, 1).expect("valid cutoff date"),
            step_up_rate: 0.10,
            plateau_year: 10,
            garden_rate: 100_000.0,
            input_policy: InputPolicy::Lenient,
        }
    }

    pub fn with_rates(mut self, rates: BaseRateTable) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_joint_filing(mut self, predicate: JointFilingPredicate) -> Self {
        self.joint_filing = predicate;
        self
    }

    pub fn with_input_policy(mut self, policy: InputPolicy) -> Self {
        self.input_policy = policy;
        self
    }
}

impl Default for AnnuityRules {
    fn default() -> Self {
        Self::standard()
    }
}
