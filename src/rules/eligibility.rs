//! Eligibility checks and base annuity resolution

use super::{AnnuityRules, RuleWarning};
use crate::record::{LandRecord, MutationRef, OwnerType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rule deciding whether a jointly owned unit's mutation filings line up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointFilingPredicate {
    /// Both numbers present, or both the NULL sentinel
    #[default]
    Consistent,
    /// Both numbers present
    BothPresent,
}

impl JointFilingPredicate {
    pub fn admits(&self, primary: &MutationRef, joint: &MutationRef) -> bool {
        match self {
            JointFilingPredicate::Consistent => primary.is_present() == joint.is_present(),
            JointFilingPredicate::BothPresent => primary.is_present() && joint.is_present(),
        }
    }
}

impl FromStr for JointFilingPredicate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consistent" => Ok(JointFilingPredicate::Consistent),
            "both-present" | "both_present" => Ok(JointFilingPredicate::BothPresent),
            other => Err(format!("unknown joint filing predicate: {other}")),
        }
    }
}

/// Outcome of the eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    Eligible,
    /// Joint ownership whose mutation numbers fail the predicate
    MismatchedMutations,
    /// Owner type other than 'S' or 'M'
    UnknownOwnerType,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Base annuity for one record plus how it was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseResolution {
    pub base_annuity: f64,
    pub eligibility: Eligibility,
    pub warning: Option<RuleWarning>,
}

pub fn check_eligibility(record: &LandRecord, rules: &AnnuityRules) -> Eligibility {
    match record.owner_type {
        OwnerType::Single => Eligibility::Eligible,
        OwnerType::Multiple => {
            if rules
                .joint_filing
                .admits(&record.mutation_app_no, &record.mutation_joint_app_no)
            {
                Eligibility::Eligible
            } else {
                Eligibility::MismatchedMutations
            }
        }
        OwnerType::Other(_) => Eligibility::UnknownOwnerType,
    }
}

/// Undiscounted base annuity for a record
///
/// Agreements signed before the cutoff pay at least one full acre's rate;
/// later or undated agreements pay strictly pro rata.
pub fn resolve_base_annuity(record: &LandRecord, rules: &AnnuityRules) -> BaseResolution {
    let rate = rules.rates.rate_for(record.land_type_code);
    let warning = match rate {
        Some(_) => None,
        None => Some(RuleWarning::UnknownLandType {
            code: record.land_type_code,
        }),
    };
    let rate = rate.unwrap_or(0.0);

    let eligibility = check_eligibility(record, rules);
    let base_annuity = if !eligibility.is_eligible() {
        0.0
    } else {
        let before_cutoff = record
            .agreement_date
            .is_some_and(|date| date < rules.cutoff_date);
        if before_cutoff && record.extent < 1.0 {
            rate
        } else {
            record.extent * rate
        }
    };

    BaseResolution {
        base_annuity,
        eligibility,
        warning,
    }
}
