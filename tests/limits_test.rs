//! Load Limit Tests for mineralmap
//!
//! Verifies that oversized inputs are rejected before parsing and that the
//! rejection surfaces as a distinct, non-user-correctable error.

use rust_xlsxwriter::*;
use std::io::Cursor;

use mineralmap::{LoadLimits, MapSession, MineralMapError, SpecimenTable};

fn small_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Coords").expect("write");
    worksheet.write_string(0, 1, "Name").expect("write");
    worksheet.write_string(1, 0, "1.0,2.0").expect("write");
    worksheet.write_string(1, 1, "Quartz").expect("write");
    workbook.save_to_buffer().expect("fixture")
}

#[test]
fn test_default_limits_accept_normal_files() {
    let table =
        SpecimenTable::from_reader(Cursor::new(small_workbook()), &LoadLimits::default())
            .expect("load");
    assert_eq!(table.row_count(), 1);
}

#[test]
fn test_file_size_limit_rejected_before_parsing() {
    let limits = LoadLimits {
        max_input_file_size: 8,
        ..LoadLimits::default()
    };

    let result = SpecimenTable::from_reader(Cursor::new(small_workbook()), &limits);
    match result {
        Err(MineralMapError::Limit(msg)) => {
            assert!(msg.contains("Input file size exceeds maximum"));
            assert!(msg.contains("8 bytes"));
        }
        other => panic!("Expected Limit error, got {:?}", other),
    }
}

#[test]
fn test_row_limit_rejected() {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Coords").expect("write");
    for row in 1..=10u32 {
        worksheet
            .write_string(row, 0, &format!("{}.0,{}.0", row, row))
            .expect("write");
    }
    let data = workbook.save_to_buffer().expect("fixture");

    let limits = LoadLimits {
        max_rows: 5,
        ..LoadLimits::default()
    };

    let result = SpecimenTable::from_reader(Cursor::new(data), &limits);
    match result {
        Err(MineralMapError::Limit(msg)) => {
            assert!(msg.contains("Row count exceeds maximum"));
        }
        other => panic!("Expected Limit error, got {:?}", other),
    }
}

#[test]
fn test_limit_violation_is_not_user_correctable() {
    let limits = LoadLimits {
        max_input_file_size: 8,
        ..LoadLimits::default()
    };

    let error = SpecimenTable::from_reader(Cursor::new(small_workbook()), &limits).unwrap_err();
    assert!(!error.is_user_correctable());
}

#[test]
fn test_session_honors_custom_limits() {
    let mut session = MapSession::with_limits(LoadLimits {
        max_input_file_size: 8,
        ..LoadLimits::default()
    });

    let result = session.load_reader(Cursor::new(small_workbook()));
    assert!(matches!(result, Err(MineralMapError::Limit(_))));
    assert!(session.table().is_none());
}
