//! Load beneficiary records from a CSV export of the land-pooling table

use super::data::{
    AgreementDateInput, IdentityFields, InputPolicy, LandRecord, MutationRef, OwnerType,
    ANNUITY_YEARS,
};
use crate::error::{AnnuityError, Result};
use csv::{ByteRecord, Reader, StringRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source column names of the historical payment slots, year 1 first
pub const HISTORICAL_PAYMENT_COLUMNS: [&str; ANNUITY_YEARS] = [
    "FIRST_ANNUITY",
    "SECOND_ANNUITY",
    "THIRD_ANNUITY",
    "FOURTH_ANNUITY",
    "FIFTH_ANNUITY",
    "SIXTH_ANNUITY",
    "SEVENTH_ANNUITY",
    "EIGTH_ANNUITY",
    "NINTH_ANNUITY",
    "TENTH_ANNUITY",
    "ELEVENTH_ANNUITY",
    "TWELFTH_ANNUITY",
    "THIRTEENTH_ANNUITY",
    "FOURTEENTH_ANNUITY",
    "FIFTEENTH_ANNUITY",
];

/// Raw source row; every cell optional and untyped until validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(rename = "AadhaarNumber")]
    pub aadhaar_number: Option<String>,
    #[serde(rename = "ApplicationNumber")]
    pub application_number: Option<String>,
    #[serde(rename = "FarmerName")]
    pub farmer_name: Option<String>,
    #[serde(rename = "OWNERTYPE")]
    pub owner_type: Option<String>,
    #[serde(rename = "Form_914_Agreement_Date")]
    pub agreement_date: Option<String>,
    #[serde(rename = "ROWWISEEXTENT")]
    pub rowwise_extent: Option<String>,
    #[serde(rename = "LandType")]
    pub land_type: Option<String>,
    #[serde(rename = "gardenextent")]
    pub garden_extent: Option<String>,
    #[serde(rename = "MutationAppNo")]
    pub mutation_app_no: Option<String>,
    #[serde(rename = "MUTATIONJOINTAPPNO")]
    pub mutation_joint_app_no: Option<String>,
    #[serde(rename = "TOTALANNUITY")]
    pub total_annuity: Option<String>,

    #[serde(rename = "FIRST_ANNUITY")]
    pub first_annuity: Option<String>,
    #[serde(rename = "SECOND_ANNUITY")]
    pub second_annuity: Option<String>,
    #[serde(rename = "THIRD_ANNUITY")]
    pub third_annuity: Option<String>,
    #[serde(rename = "FOURTH_ANNUITY")]
    pub fourth_annuity: Option<String>,
    #[serde(rename = "FIFTH_ANNUITY")]
    pub fifth_annuity: Option<String>,
    #[serde(rename = "SIXTH_ANNUITY")]
    pub sixth_annuity: Option<String>,
    #[serde(rename = "SEVENTH_ANNUITY")]
    pub seventh_annuity: Option<String>,
    #[serde(rename = "EIGTH_ANNUITY", alias = "EIGHTH_ANNUITY")]
    pub eighth_annuity: Option<String>,
    #[serde(rename = "NINTH_ANNUITY")]
    pub ninth_annuity: Option<String>,
    #[serde(rename = "TENTH_ANNUITY")]
    pub tenth_annuity: Option<String>,
    #[serde(rename = "ELEVENTH_ANNUITY")]
    pub eleventh_annuity: Option<String>,
    #[serde(rename = "TWELFTH_ANNUITY")]
    pub twelfth_annuity: Option<String>,
    #[serde(rename = "THIRTEENTH_ANNUITY")]
    pub thirteenth_annuity: Option<String>,
    #[serde(rename = "FOURTEENTH_ANNUITY")]
    pub fourteenth_annuity: Option<String>,
    #[serde(rename = "FIFTEENTH_ANNUITY")]
    pub fifteenth_annuity: Option<String>,
}

impl RawRecord {
    fn payment_cells(&self) -> [Option<&str>; ANNUITY_YEARS] {
        [
            self.first_annuity.as_deref(),
            self.second_annuity.as_deref(),
            self.third_annuity.as_deref(),
            self.fourth_annuity.as_deref(),
            self.fifth_annuity.as_deref(),
            self.sixth_annuity.as_deref(),
            self.seventh_annuity.as_deref(),
            self.eighth_annuity.as_deref(),
            self.ninth_annuity.as_deref(),
            self.tenth_annuity.as_deref(),
            self.eleventh_annuity.as_deref(),
            self.twelfth_annuity.as_deref(),
            self.thirteenth_annuity.as_deref(),
            self.fourteenth_annuity.as_deref(),
            self.fifteenth_annuity.as_deref(),
        ]
    }

    /// Validate into a fixed-shape record
    pub fn to_record(&self, policy: InputPolicy, row: usize) -> Result<LandRecord> {
        let extent = required_f64(self.rowwise_extent.as_deref(), "ROWWISEEXTENT", policy, row)?;
        let land_type_code = required_code(self.land_type.as_deref(), "LandType", policy, row)?;

        let mut historical_payments = [None; ANNUITY_YEARS];
        for (slot, cell) in historical_payments.iter_mut().zip(self.payment_cells()) {
            *slot = lenient_f64(cell);
        }

        Ok(LandRecord {
            row_index: row,
            identity: IdentityFields {
                aadhaar_number: self.aadhaar_number.clone(),
                application_number: self.application_number.clone(),
                farmer_name: self.farmer_name.clone(),
                land_type: self.land_type.clone(),
            },
            owner_type: OwnerType::from_code(self.owner_type.as_deref()),
            agreement_date: AgreementDateInput::from(self.agreement_date.as_deref()).normalize(),
            extent,
            land_type_code,
            garden_extent: lenient_f64(self.garden_extent.as_deref())
                .filter(|v| *v >= 0.0)
                .unwrap_or(0.0),
            mutation_app_no: MutationRef::from_field(self.mutation_app_no.as_deref()),
            mutation_joint_app_no: MutationRef::from_field(self.mutation_joint_app_no.as_deref()),
            historical_payments,
            stored_total_annuity: lenient_f64(self.total_annuity.as_deref()),
        })
    }
}

/// Parse a numeric cell; blanks, `NULL`, NaN and garbage are absent
fn lenient_f64(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn required_f64(
    cell: Option<&str>,
    field: &'static str,
    policy: InputPolicy,
    row: usize,
) -> Result<f64> {
    match (lenient_f64(cell), policy) {
        (Some(v), _) if v >= 0.0 => Ok(v),
        (_, InputPolicy::Lenient) => Ok(0.0),
        (None, InputPolicy::Strict) if is_blank(cell) => Err(AnnuityError::MissingField { row, field }),
        (_, InputPolicy::Strict) => Err(invalid(cell, field, row)),
    }
}

/// Land type codes arrive either as integers or as integral floats ("1.0")
fn required_code(
    cell: Option<&str>,
    field: &'static str,
    policy: InputPolicy,
    row: usize,
) -> Result<i64> {
    let parsed = cell.map(str::trim).and_then(|v| {
        v.parse::<i64>().ok().or_else(|| {
            v.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })
    });

    match (parsed, policy) {
        (Some(code), _) => Ok(code),
        (None, InputPolicy::Lenient) => Ok(0),
        (None, InputPolicy::Strict) if is_blank(cell) => Err(AnnuityError::MissingField { row, field }),
        (None, InputPolicy::Strict) => Err(invalid(cell, field, row)),
    }
}

fn is_blank(cell: Option<&str>) -> bool {
    cell.map_or(true, |v| v.trim().is_empty())
}

fn invalid(cell: Option<&str>, field: &'static str, row: usize) -> AnnuityError {
    AnnuityError::InvalidField {
        row,
        field,
        value: cell.unwrap_or_default().to_string(),
    }
}

/// Load raw rows from a CSV file
pub fn load_raw_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load raw rows from any reader (e.g., string buffer, network stream)
pub fn load_raw_records_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<RawRecord>> {
    collect_rows(Reader::from_reader(reader))
}

/// Cells are decoded lossily; invalid UTF-8 becomes U+FFFD
fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<RawRecord>> {
    let headers = lossy_record(reader.byte_headers()?);
    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = lossy_record(&result?);
        let row: RawRecord = record.deserialize(Some(&headers))?;
        rows.push(row);
    }
    Ok(rows)
}

fn lossy_record(record: &ByteRecord) -> StringRecord {
    record.iter().map(String::from_utf8_lossy).collect()
}

/// Validate a batch of raw rows; the first strict-mode failure aborts
pub fn validate_records(raw: &[RawRecord], policy: InputPolicy) -> Result<Vec<LandRecord>> {
    raw.iter()
        .enumerate()
        .map(|(row, r)| r.to_record(policy, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
AadhaarNumber,ApplicationNumber,FarmerName,OWNERTYPE,Form_914_Agreement_Date,ROWWISEEXTENT,LandType,gardenextent,MutationAppNo,MUTATIONJOINTAPPNO,FIRST_ANNUITY,SECOND_ANNUITY,EIGTH_ANNUITY
111122223333,APP-1,Ravi,S,2014-06-01,0.5,1,0,NULL,NULL,30000,33000,
444455556666,APP-2,Lakshmi,M,,abc,,0.02,M-9,NULL,bad,,1000
";

    #[test]
    fn test_load_from_reader() {
        let rows = load_raw_records_from_reader(SAMPLE.as_bytes()).expect("Failed to load rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].farmer_name.as_deref(), Some("Ravi"));
        assert_eq!(rows[1].agreement_date, None);
        assert_eq!(rows[1].eighth_annuity.as_deref(), Some("1000"));
        // Columns absent from the header default to None
        assert_eq!(rows[0].fifteenth_annuity, None);
    }

    #[test]
    fn test_lenient_validation_defaults_to_zero() {
        let rows = load_raw_records_from_reader(SAMPLE.as_bytes()).unwrap();
        let records = validate_records(&rows, InputPolicy::Lenient).unwrap();

        let first = &records[0];
        assert_eq!(first.owner_type, OwnerType::Single);
        assert_eq!(first.agreement_date, NaiveDate::from_ymd_opt(2014, 6, 1));
        assert_eq!(first.extent, 0.5);
        assert_eq!(first.land_type_code, 1);
        assert_eq!(first.total_received(), 63_000.0);

        let second = &records[1];
        assert_eq!(second.row_index, 1);
        assert_eq!(second.extent, 0.0);
        assert_eq!(second.land_type_code, 0);
        assert_eq!(second.garden_extent, 0.02);
        assert_eq!(second.mutation_app_no, MutationRef::Present(Some("M-9".into())));
        assert_eq!(second.mutation_joint_app_no, MutationRef::Sentinel);
        // "bad" is ignored, the eighth slot still counts
        assert_eq!(second.total_received(), 1000.0);
    }

    #[test]
    fn test_negative_garden_extent_is_ignored() {
        let raw = RawRecord {
            owner_type: Some("S".into()),
            rowwise_extent: Some("1".into()),
            land_type: Some("1".into()),
            garden_extent: Some("-1".into()),
            ..Default::default()
        };
        let record = raw.to_record(InputPolicy::Lenient, 0).unwrap();
        assert_eq!(record.garden_extent, 0.0);
    }

    #[test]
    fn test_invalid_utf8_cell_is_decoded_lossily() {
        let data: &[u8] = b"FarmerName,OWNERTYPE,ROWWISEEXTENT,LandType\nR\xe9vi,S,1,1\nOk,S,1,1\n";
        let rows = load_raw_records_from_reader(data).expect("Failed to load rows");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].farmer_name.as_deref(), Some("R\u{FFFD}vi"));
        assert_eq!(rows[0].rowwise_extent.as_deref(), Some("1"));
        assert_eq!(rows[1].farmer_name.as_deref(), Some("Ok"));

        let records = validate_records(&rows, InputPolicy::Strict).unwrap();
        assert_eq!(records[0].land_type_code, 1);
    }

    #[test]
    fn test_strict_validation_rejects_bad_extent() {
        let rows = load_raw_records_from_reader(SAMPLE.as_bytes()).unwrap();
        let err = validate_records(&rows, InputPolicy::Strict).unwrap_err();
        match err {
            AnnuityError::InvalidField { row, field, value } => {
                assert_eq!(row, 1);
                assert_eq!(field, "ROWWISEEXTENT");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_validation_reports_missing_land_type() {
        let raw = RawRecord {
            owner_type: Some("S".into()),
            rowwise_extent: Some("2".into()),
            ..Default::default()
        };
        let err = raw.to_record(InputPolicy::Strict, 7).unwrap_err();
        assert!(matches!(err, AnnuityError::MissingField { row: 7, field: "LandType" }));
    }

    #[test]
    fn test_integral_float_land_type() {
        let raw = RawRecord {
            land_type: Some("2.0".into()),
            rowwise_extent: Some("1.25".into()),
            ..Default::default()
        };
        let record = raw.to_record(InputPolicy::Strict, 0).unwrap();
        assert_eq!(record.land_type_code, 2);
        assert_eq!(record.identity.land_type.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_column_names_match_fields() {
        assert_eq!(HISTORICAL_PAYMENT_COLUMNS.len(), ANNUITY_YEARS);
        assert_eq!(HISTORICAL_PAYMENT_COLUMNS[7], "EIGTH_ANNUITY");
    }
}
