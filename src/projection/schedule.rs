//! Annuity schedule output structures

use crate::record::ANNUITY_YEARS;
use crate::rules::{Eligibility, RuleWarning};
use serde::{Deserialize, Serialize};

/// Projected payments for years 1 through 15
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlySchedule {
    amounts: [f64; ANNUITY_YEARS],
}

impl YearlySchedule {
    pub fn from_amounts(amounts: [f64; ANNUITY_YEARS]) -> Self {
        Self { amounts }
    }

    /// Amount for a 1-indexed year; `None` outside 1..=15
    pub fn year(&self, year: usize) -> Option<f64> {
        year.checked_sub(1).and_then(|idx| self.amounts.get(idx).copied())
    }

    pub fn amounts(&self) -> &[f64; ANNUITY_YEARS] {
        &self.amounts
    }

    /// Sum in year order
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }
}

/// Complete computation for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnuityResult {
    /// Yearly annuity before step-ups and garden payment
    pub base_annuity: f64,

    pub schedule: YearlySchedule,

    /// Sum of the schedule
    pub total_projected: f64,

    /// Sum of the payments already disbursed
    pub total_received: f64,

    /// `total_projected - total_received`
    pub difference: f64,

    pub eligibility: Eligibility,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<RuleWarning>,
}

impl AnnuityResult {
    pub fn is_eligible(&self) -> bool {
        self.eligibility.is_eligible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_lookup_is_one_indexed() {
        let mut amounts = [0.0; ANNUITY_YEARS];
        amounts[0] = 1.0;
        amounts[14] = 15.0;
        let schedule = YearlySchedule::from_amounts(amounts);

        assert_eq!(schedule.year(1), Some(1.0));
        assert_eq!(schedule.year(15), Some(15.0));
        assert_eq!(schedule.year(0), None);
        assert_eq!(schedule.year(16), None);
        assert_eq!(schedule.total(), 16.0);
    }
}
