//! End-to-end run: CSV export in, summary table out

use approx::assert_relative_eq;
use land_annuity::{SummaryRow, WorkflowConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SOURCE: &str = "\
AadhaarNumber,ApplicationNumber,FarmerName,OWNERTYPE,Form_914_Agreement_Date,ROWWISEEXTENT,LandType,gardenextent,MutationAppNo,MUTATIONJOINTAPPNO,TOTALANNUITY,FIRST_ANNUITY,SECOND_ANNUITY,THIRD_ANNUITY
100000000001,APP-1,Ravi,S,2014-06-01,0.5,1,0,NULL,NULL,684000,30000,33000,
100000000002,APP-2,Lakshmi,M,2015-03-10 00:00:00,2,2,0.02,M-1,J-1,,50000,,
100000000003,APP-3,Venkat,M,2014-01-01,1,3,0,NULL,12345,,,,
100000000004,APP-4,Padma,X,,1,2,0.1,NULL,NULL,,,,
100000000005,APP-5,Rao,S,,3,8,0,NULL,NULL,,oops,,
";

fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn read_summary(path: &Path) -> Vec<SummaryRow> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.deserialize().collect::<Result<_, _>>().unwrap()
}

#[test]
fn test_full_run_from_csv() {
    let dir = scratch_dir();
    let source_path = dir.path().join("lps_final.csv");
    fs::write(&source_path, SOURCE).unwrap();

    let config = WorkflowConfig {
        source_path,
        sink_path: dir.path().join("summary").join("lps_new_annuity_summary.csv"),
        batch_size: 2,
        ..WorkflowConfig::default()
    };
    let report = config.execute().unwrap();

    assert_eq!(report.records_processed, 5);
    assert_eq!(report.rows_written, 5);
    assert_eq!(report.batches_written, 3);
    assert_eq!(report.ineligible_records, 2);
    assert_eq!(report.unknown_land_types.get(&8), Some(&1));

    let rows = read_summary(&config.sink_path);
    assert_eq!(rows.len(), 5);

    // Sub-acre dry land before the cutoff gets the full-acre rate
    let ravi = &rows[0];
    assert_eq!(ravi.farmer_name.as_deref(), Some("Ravi"));
    assert_eq!(ravi.base_annuity, 30_000.0);
    assert_relative_eq!(ravi.year2, 33_000.0);
    assert_relative_eq!(ravi.year10, 57_000.0);
    assert_relative_eq!(ravi.year15, 57_000.0);
    assert_relative_eq!(ravi.total_annuity_amount, 720_000.0);
    assert_eq!(ravi.total_annuity_from_table, Some(684_000.0));
    assert_eq!(ravi.amount_received, 63_000.0);
    assert_relative_eq!(ravi.difference_amount, 657_000.0);

    // Joint owners with both mutation numbers, after the cutoff, plus garden
    let lakshmi = &rows[1];
    assert_eq!(lakshmi.base_annuity, 100_000.0);
    assert_relative_eq!(lakshmi.year1, 102_000.0);
    assert_relative_eq!(lakshmi.year2, 110_000.0);

    // Mismatched mutation pair
    assert_eq!(rows[2].base_annuity, 0.0);
    assert_eq!(rows[2].total_annuity_amount, 0.0);

    // Unknown owner type keeps the garden payment only
    let padma = &rows[3];
    assert_eq!(padma.base_annuity, 0.0);
    assert_relative_eq!(padma.year1, 10_000.0);
    assert_eq!(padma.year2, 0.0);

    // Unknown land type: zero annuity, garbage payment ignored
    let rao = &rows[4];
    assert_eq!(rao.base_annuity, 0.0);
    assert_eq!(rao.amount_received, 0.0);
    assert_eq!(rao.difference_amount, 0.0);
}

#[test]
fn test_strict_run_rejects_bad_rows() {
    let dir = scratch_dir();
    let source_path = dir.path().join("lps_final.csv");
    fs::write(
        &source_path,
        "OWNERTYPE,ROWWISEEXTENT,LandType\nS,1,1\nS,,2\n",
    )
    .unwrap();

    let config = WorkflowConfig {
        source_path,
        sink_path: dir.path().join("summary.csv"),
        input_policy: land_annuity::InputPolicy::Strict,
        ..WorkflowConfig::default()
    };
    assert!(config.execute().is_err());
    assert!(!config.sink_path.exists());
}

#[test]
fn test_rate_table_override() {
    let dir = scratch_dir();
    let source_path = dir.path().join("lps_final.csv");
    fs::write(&source_path, "OWNERTYPE,ROWWISEEXTENT,LandType\nS,2,4\n").unwrap();
    let rates = dir.path().join("rates.csv");
    fs::write(&rates, "LandType,Rate\n4,40000\n").unwrap();

    let config = WorkflowConfig {
        source_path,
        sink_path: dir.path().join("summary.csv"),
        rate_table: Some(rates),
        ..WorkflowConfig::default()
    };
    let report = config.execute().unwrap();
    assert!(report.unknown_land_types.is_empty());

    let rows = read_summary(&config.sink_path);
    assert_eq!(rows[0].base_annuity, 80_000.0);
}

#[test]
fn test_mis_encoded_name_does_not_abort_run() {
    let dir = scratch_dir();
    let source_path = dir.path().join("lps_final.csv");
    fs::write(
        &source_path,
        b"FarmerName,OWNERTYPE,ROWWISEEXTENT,LandType,gardenextent\nR\xe9vi,S,1,1,-0.5\nOk,S,1,1,0\n",
    )
    .unwrap();

    let config = WorkflowConfig {
        source_path,
        sink_path: dir.path().join("summary.csv"),
        ..WorkflowConfig::default()
    };
    let report = config.execute().unwrap();
    assert_eq!(report.rows_written, 2);

    let rows = read_summary(&config.sink_path);
    assert_eq!(rows[0].farmer_name.as_deref(), Some("R\u{FFFD}vi"));
    // Negative garden extent never reduces year 1
    assert_eq!(rows[0].garden_extent, 0.0);
    assert_relative_eq!(rows[0].year1, 30_000.0);
}
