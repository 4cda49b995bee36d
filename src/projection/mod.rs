//! Projection engine for the yearly annuity schedule

mod engine;
mod schedule;

pub use engine::ProjectionEngine;
pub use schedule::{AnnuityResult, YearlySchedule};
