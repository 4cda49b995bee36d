//! Annuity projection engine: base resolution, 15-year schedule and reconciliation

use super::schedule::{AnnuityResult, YearlySchedule};
use crate::record::{LandRecord, ANNUITY_YEARS};
use crate::rules::{resolve_base_annuity, AnnuityRules};
use rayon::prelude::*;

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    rules: AnnuityRules,
}

impl ProjectionEngine {
    pub fn new(rules: AnnuityRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AnnuityRules {
        &self.rules
    }

    /// Compute base, schedule and variance for a single record
    pub fn compute_annuity_for_row(&self, record: &LandRecord) -> AnnuityResult {
        let resolution = resolve_base_annuity(record, &self.rules);
        let schedule = self.project_schedule(resolution.base_annuity, record.garden_extent);

        let total_projected = schedule.total();
        let total_received = record.total_received();

        AnnuityResult {
            base_annuity: resolution.base_annuity,
            schedule,
            total_projected,
            total_received,
            difference: total_projected - total_received,
            eligibility: resolution.eligibility,
            warning: resolution.warning,
        }
    }

    /// Run every record; output order matches input order
    pub fn compute_batch(&self, records: &[LandRecord]) -> Vec<AnnuityResult> {
        records
            .par_iter()
            .map(|record| self.compute_annuity_for_row(record))
            .collect()
    }

    /// Year y pays `base + base * step * (y - 1)` up to the plateau year, then
    /// repeats the plateau amount. Each year derives from the base alone, so the
    /// stored per-year columns can be reproduced exactly.
    pub fn project_schedule(&self, base_annuity: f64, garden_extent: f64) -> YearlySchedule {
        let mut amounts = [0.0; ANNUITY_YEARS];

        for (idx, amount) in amounts.iter_mut().enumerate() {
            let year = idx as u32 + 1;
            let steps = year.min(self.rules.plateau_year).saturating_sub(1);
            *amount = base_annuity + base_annuity * self.rules.step_up_rate * steps as f64;
        }

        // Garden compensation is paid once, with the first instalment
        amounts[0] += garden_extent * self.rules.garden_rate;

        YearlySchedule::from_amounts(amounts)
    }
}
