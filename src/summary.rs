//! Summary table rows written by the annuity workflow

use crate::projection::AnnuityResult;
use crate::record::{LandRecord, ANNUITY_YEARS};
use serde::{Deserialize, Serialize};

/// Column order of the summary table
pub const SUMMARY_COLUMNS: [&str; 26] = [
    "AadhaarNumber",
    "ApplicationNumber",
    "FarmerName",
    "LandType",
    "RowwiseExtent",
    "gardenextent",
    "Base_Annuity",
    "Total_Annuity_Amount",
    "Total_Annuity_From_Table",
    "Amount_Received",
    "Difference_Amount",
    "Year1_Annuity",
    "Year2_Annuity",
    "Year3_Annuity",
    "Year4_Annuity",
    "Year5_Annuity",
    "Year6_Annuity",
    "Year7_Annuity",
    "Year8_Annuity",
    "Year9_Annuity",
    "Year10_Annuity",
    "Year11_Annuity",
    "Year12_Annuity",
    "Year13_Annuity",
    "Year14_Annuity",
    "Year15_Annuity",
];

/// One row of the annuity summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "AadhaarNumber")]
    pub aadhaar_number: Option<String>,
    #[serde(rename = "ApplicationNumber")]
    pub application_number: Option<String>,
    #[serde(rename = "FarmerName")]
    pub farmer_name: Option<String>,
    #[serde(rename = "LandType")]
    pub land_type: Option<String>,
    #[serde(rename = "RowwiseExtent")]
    pub rowwise_extent: f64,
    #[serde(rename = "gardenextent")]
    pub garden_extent: f64,
    #[serde(rename = "Base_Annuity")]
    pub base_annuity: f64,
    #[serde(rename = "Total_Annuity_Amount")]
    pub total_annuity_amount: f64,
    #[serde(rename = "Total_Annuity_From_Table")]
    pub total_annuity_from_table: Option<f64>,
    #[serde(rename = "Amount_Received")]
    pub amount_received: f64,
    #[serde(rename = "Difference_Amount")]
    pub difference_amount: f64,
    #[serde(rename = "Year1_Annuity")]
    pub year1: f64,
    #[serde(rename = "Year2_Annuity")]
    pub year2: f64,
    #[serde(rename = "Year3_Annuity")]
    pub year3: f64,
    #[serde(rename = "Year4_Annuity")]
    pub year4: f64,
    #[serde(rename = "Year5_Annuity")]
    pub year5: f64,
    #[serde(rename = "Year6_Annuity")]
    pub year6: f64,
    #[serde(rename = "Year7_Annuity")]
    pub year7: f64,
    #[serde(rename = "Year8_Annuity")]
    pub year8: f64,
    #[serde(rename = "Year9_Annuity")]
    pub year9: f64,
    #[serde(rename = "Year10_Annuity")]
    pub year10: f64,
    #[serde(rename = "Year11_Annuity")]
    pub year11: f64,
    #[serde(rename = "Year12_Annuity")]
    pub year12: f64,
    #[serde(rename = "Year13_Annuity")]
    pub year13: f64,
    #[serde(rename = "Year14_Annuity")]
    pub year14: f64,
    #[serde(rename = "Year15_Annuity")]
    pub year15: f64,
}

impl SummaryRow {
    /// Merge a record's identity columns with its computed annuity into a new row
    pub fn from_result(record: &LandRecord, result: &AnnuityResult) -> Self {
        let [year1, year2, year3, year4, year5, year6, year7, year8, year9, year10, year11, year12, year13, year14, year15] =
            *result.schedule.amounts();

        Self {
            aadhaar_number: record.identity.aadhaar_number.clone(),
            application_number: record.identity.application_number.clone(),
            farmer_name: record.identity.farmer_name.clone(),
            land_type: record.identity.land_type.clone(),
            rowwise_extent: record.extent,
            garden_extent: record.garden_extent,
            base_annuity: result.base_annuity,
            total_annuity_amount: result.total_projected,
            total_annuity_from_table: record.stored_total_annuity,
            amount_received: result.total_received,
            difference_amount: result.difference,
            year1,
            year2,
            year3,
            year4,
            year5,
            year6,
            year7,
            year8,
            year9,
            year10,
            year11,
            year12,
            year13,
            year14,
            year15,
        }
    }

    pub fn yearly_amounts(&self) -> [f64; ANNUITY_YEARS] {
        [
            self.year1, self.year2, self.year3, self.year4, self.year5, self.year6, self.year7,
            self.year8, self.year9, self.year10, self.year11, self.year12, self.year13,
            self.year14, self.year15,
        ]
    }
}
