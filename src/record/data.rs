//! Beneficiary land record structures matching the land-pooling source table

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of yearly annuity slots tracked per record
pub const ANNUITY_YEARS: usize = 15;

/// Literal the source table stores in place of a missing mutation number
pub const NULL_SENTINEL: &str = "NULL";

/// Ownership type of the land unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerType {
    /// Sole owner ('S')
    Single,
    /// Joint owners ('M')
    Multiple,
    /// Any other code; never eligible
    Other(String),
}

impl OwnerType {
    /// Parse the source code; absent values map to `Other("")`
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("S") => OwnerType::Single,
            Some("M") => OwnerType::Multiple,
            Some(other) => OwnerType::Other(other.to_string()),
            None => OwnerType::Other(String::new()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            OwnerType::Single => "S",
            OwnerType::Multiple => "M",
            OwnerType::Other(code) => code,
        }
    }
}

/// A mutation application number as stored in the source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationRef {
    /// Any value other than the sentinel, including an absent cell
    Present(Option<String>),
    /// The `"NULL"` sentinel string
    Sentinel,
}

impl MutationRef {
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim() == NULL_SENTINEL => MutationRef::Sentinel,
            Some(v) => MutationRef::Present(Some(v.trim().to_string())),
            None => MutationRef::Present(None),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, MutationRef::Present(_))
    }
}

/// Agreement date as it arrives from a feed, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementDateInput {
    /// Already a calendar date
    Date(NaiveDate),
    /// Null / NaT marker
    Missing,
    /// ISO-formatted text, possibly with a time component
    Text(String),
}

impl AgreementDateInput {
    /// Normalize to a calendar date; unparseable text is treated as absent
    pub fn normalize(&self) -> Option<NaiveDate> {
        match self {
            AgreementDateInput::Date(date) => Some(*date),
            AgreementDateInput::Missing => None,
            AgreementDateInput::Text(text) => parse_date_text(text),
        }
    }
}

impl From<Option<&str>> for AgreementDateInput {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(text) => AgreementDateInput::Text(text.to_string()),
            None => AgreementDateInput::Missing,
        }
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nat") || text == NULL_SENTINEL {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    // Timestamps exported by the database carry a time component
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

/// How required numeric fields are validated at ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPolicy {
    /// Missing or unparseable extent/land type becomes 0
    #[default]
    Lenient,
    /// Missing or unparseable extent/land type aborts the run
    Strict,
}

/// Identity columns carried through to the summary table untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityFields {
    pub aadhaar_number: Option<String>,
    pub application_number: Option<String>,
    pub farmer_name: Option<String>,
    /// Land type exactly as the source stored it
    pub land_type: Option<String>,
}

/// One validated beneficiary-land unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandRecord {
    /// Position in the source feed (0-based)
    pub row_index: usize,

    pub identity: IdentityFields,

    pub owner_type: OwnerType,

    /// Form 914 agreement date
    pub agreement_date: Option<NaiveDate>,

    /// Row-wise extent in acres
    pub extent: f64,

    pub land_type_code: i64,

    /// Garden extent, paid once in year 1
    pub garden_extent: f64,

    pub mutation_app_no: MutationRef,

    pub mutation_joint_app_no: MutationRef,

    /// Annuity amounts already disbursed, year 1 first
    pub historical_payments: [Option<f64>; ANNUITY_YEARS],

    /// Total annuity the source table already recorded, if any
    pub stored_total_annuity: Option<f64>,
}

impl LandRecord {
    /// Create a record with the fields the rule engine reads; everything else empty
    pub fn new(
        owner_type: OwnerType,
        agreement_date: Option<NaiveDate>,
        extent: f64,
        land_type_code: i64,
        garden_extent: f64,
    ) -> Self {
        Self {
            row_index: 0,
            identity: IdentityFields::default(),
            owner_type,
            agreement_date,
            extent,
            land_type_code,
            garden_extent,
            mutation_app_no: MutationRef::Sentinel,
            mutation_joint_app_no: MutationRef::Sentinel,
            historical_payments: [None; ANNUITY_YEARS],
            stored_total_annuity: None,
        }
    }

    pub fn with_mutations(mut self, primary: MutationRef, joint: MutationRef) -> Self {
        self.mutation_app_no = primary;
        self.mutation_joint_app_no = joint;
        self
    }

    pub fn with_payments(mut self, payments: [Option<f64>; ANNUITY_YEARS]) -> Self {
        self.historical_payments = payments;
        self
    }

    /// Sum of the recorded payments, nulls counting as zero
    pub fn total_received(&self) -> f64 {
        self.historical_payments.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_type_codes() {
        assert_eq!(OwnerType::from_code(Some("S")), OwnerType::Single);
        assert_eq!(OwnerType::from_code(Some(" M ")), OwnerType::Multiple);
        assert_eq!(OwnerType::from_code(Some("J")), OwnerType::Other("J".into()));
        assert_eq!(OwnerType::from_code(None).as_code(), "");
    }

    #[test]
    fn test_mutation_sentinel() {
        assert_eq!(MutationRef::from_field(Some("NULL")), MutationRef::Sentinel);
        assert!(MutationRef::from_field(Some("12345")).is_present());
        // An empty cell is not the sentinel
        assert!(MutationRef::from_field(None).is_present());
    }

    #[test]
    fn test_date_normalization() {
        let expected = NaiveDate::from_ymd_opt(2015, 1, 31);
        assert_eq!(AgreementDateInput::Text("2015-01-31".into()).normalize(), expected);
        assert_eq!(
            AgreementDateInput::Text("2015-01-31 00:00:00".into()).normalize(),
            expected
        );
        assert_eq!(
            AgreementDateInput::Text("2015-01-31T10:15:00.000".into()).normalize(),
            expected
        );
        assert_eq!(AgreementDateInput::Date(expected.unwrap()).normalize(), expected);
        assert_eq!(AgreementDateInput::Missing.normalize(), None);
        assert_eq!(AgreementDateInput::Text("NaT".into()).normalize(), None);
        assert_eq!(AgreementDateInput::Text("31/01/2015".into()).normalize(), None);
    }

    #[test]
    fn test_total_received_skips_nulls() {
        let mut payments = [None; ANNUITY_YEARS];
        payments[0] = Some(30_000.0);
        payments[3] = Some(12_500.5);
        let record = LandRecord::new(OwnerType::Single, None, 1.0, 1, 0.0).with_payments(payments);
        assert_eq!(record.total_received(), 42_500.5);

        let empty = LandRecord::new(OwnerType::Single, None, 1.0, 1, 0.0);
        assert_eq!(empty.total_received(), 0.0);
    }
}
