//! FILENAME: persistence/tests/test_load.rs
//! Integration tests for the Record Store: workbook fixtures are written to
//! a temp directory with rust_xlsxwriter, then loaded back through calamine.

use chrono::NaiveDate;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use engine::{Attribute, FieldValue, Source};
use persistence::{load_source, PersistenceError, SourceLoader, XlsxLoader};

// ============================================================================
// FIXTURE HELPERS
// ============================================================================

const MACHINES_HEADERS: [&str; 8] = [
    "M/C No",
    "Type",
    "Diameter",
    "Gauge",
    "Status",
    "Location Group",
    "Brand",
    "Service Date",
];

const ADVANTIS_HEADERS: [&str; 7] = [
    "M/C No",
    "Type",
    "Diameter",
    "Gauge",
    "Current Location",
    "Brand",
    "Remarks",
];

const OUT_HEADERS: [&str; 6] = ["M/C No", "Type", "Diameter", "Gauge", "Brand", "Out Date"];

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes the full three-sheet dashboard workbook fixture.
///
/// The Machines sheet contains 6 data rows, one embedded header artifact row
/// (Status cell literally "Status"), one fully blank row, and an extra
/// column I beyond the declared A:H range.
fn write_workbook() -> Fixture {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("Knitting Machine Dashboard.xlsx");

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");

    let machines = workbook.add_worksheet();
    machines.set_name("Machines").unwrap();
    for (col, header) in MACHINES_HEADERS.iter().enumerate() {
        machines.write_string(0, col as u16, *header).unwrap();
    }
    // Column beyond the declared A:H range, must be ignored by the loader
    machines.write_string(0, 8, "Notes").unwrap();
    machines.write_string(1, 8, "ignore me").unwrap();

    let rows: [(&str, &str, f64, f64, &str, &str, &str); 6] = [
        ("M-001", "Single Jersey", 30.0, 24.0, "Active", "Pathway Parking", "Mayer"),
        ("M-002", "Single Jersey", 34.0, 28.0, "Idle", "Batch Parking", "Terrot"),
        ("M-003", "Circular", 30.0, 24.0, "Idle", "Pathway Parking", "Mayer"),
        ("M-004", "Circular", 26.0, 20.0, "Active", "Pathway Parking", "Fukuhara"),
        ("M-005", "Rib", 34.0, 18.0, "Idle", "Training (M/C)", "Terrot"),
        ("M-006", "Interlock", 30.0, 24.0, "Active", "Batch Parking", "Mayer"),
    ];
    for (i, (no, ty, dia, gauge, status, location, brand)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        machines.write_string(row, 0, *no).unwrap();
        machines.write_string(row, 1, *ty).unwrap();
        machines.write_number(row, 2, *dia).unwrap();
        machines.write_number(row, 3, *gauge).unwrap();
        machines.write_string(row, 4, *status).unwrap();
        machines.write_string(row, 5, *location).unwrap();
        machines.write_string(row, 6, *brand).unwrap();
    }
    // Service date with a time-of-day component on the first data row
    let serviced = ExcelDateTime::from_ymd(2024, 3, 15)
        .unwrap()
        .and_hms(13, 45, 0.0)
        .unwrap();
    machines
        .write_datetime_with_format(1, 7, &serviced, &date_format)
        .unwrap();

    // Row 7: embedded header artifact (every cell repeats its header)
    for (col, header) in MACHINES_HEADERS.iter().enumerate() {
        machines.write_string(7, col as u16, *header).unwrap();
    }
    // Row 8 left fully blank; row 9 holds one more real record
    machines.write_string(9, 0, "M-007").unwrap();
    machines.write_string(9, 1, "Rib").unwrap();
    machines.write_number(9, 2, 30.0).unwrap();
    machines.write_number(9, 3, 18.0).unwrap();
    machines.write_string(9, 4, "Active").unwrap();
    machines.write_string(9, 5, "Pathway Parking").unwrap();
    machines.write_string(9, 6, "Fukuhara").unwrap();

    let advantis = workbook.add_worksheet();
    advantis.set_name("Advantis Machines").unwrap();
    for (col, header) in ADVANTIS_HEADERS.iter().enumerate() {
        advantis.write_string(0, col as u16, *header).unwrap();
    }
    let advantis_rows: [(&str, &str, f64, f64, &str, &str); 3] = [
        ("A-101", "Single Jersey", 30.0, 24.0, "Floor 2", "Mayer"),
        ("A-102", "Interlock", 34.0, 28.0, "Floor 1", "Terrot"),
        ("A-103", "Single Jersey", 26.0, 20.0, "Floor 2", "Mayer"),
    ];
    for (i, (no, ty, dia, gauge, location, brand)) in advantis_rows.iter().enumerate() {
        let row = (i + 1) as u32;
        advantis.write_string(row, 0, *no).unwrap();
        advantis.write_string(row, 1, *ty).unwrap();
        advantis.write_number(row, 2, *dia).unwrap();
        advantis.write_number(row, 3, *gauge).unwrap();
        advantis.write_string(row, 4, *location).unwrap();
        advantis.write_string(row, 5, *brand).unwrap();
    }

    let out = workbook.add_worksheet();
    out.set_name("OUT").unwrap();
    for (col, header) in OUT_HEADERS.iter().enumerate() {
        out.write_string(0, col as u16, *header).unwrap();
    }
    out.write_string(1, 0, "M-090").unwrap();
    out.write_string(1, 1, "Circular").unwrap();
    out.write_number(1, 2, 26.0).unwrap();
    out.write_number(1, 3, 20.0).unwrap();
    out.write_string(1, 4, "Mayer").unwrap();
    out.write_string(1, 5, "2023-11-02").unwrap();

    workbook.save(&path).unwrap();
    Fixture { _dir: dir, path }
}

// ============================================================================
// MACHINES SHEET
// ============================================================================

#[test]
fn test_load_machines_drops_artifact_and_blank_rows() {
    let fixture = write_workbook();
    let collection = load_source(fixture.path(), Source::Machines).unwrap();

    // 8 raw data rows on the sheet: 6 + artifact + 1 more -> 7 records loaded
    assert_eq!(collection.len(), 7);
    assert!(collection
        .records
        .iter()
        .all(|r| r.status.as_deref() != Some("Status")));
}

#[test]
fn test_machines_columns_restricted_to_declared_range() {
    let fixture = write_workbook();
    let collection = load_source(fixture.path(), Source::Machines).unwrap();

    assert_eq!(collection.columns.len(), 8);
    assert_eq!(collection.columns, MACHINES_HEADERS.to_vec());
    assert!(!collection.columns.iter().any(|c| c == "Notes"));
    for record in &collection.records {
        assert_eq!(record.field("Notes"), FieldValue::Empty);
    }
}

#[test]
fn test_service_date_normalized_to_calendar_date() {
    let fixture = write_workbook();
    let collection = load_source(fixture.path(), Source::Machines).unwrap();

    let first = &collection.records[0];
    assert_eq!(
        first.service_date,
        Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    );
    assert_eq!(
        first.get(Attribute::ServiceDate).to_string(),
        "2024-03-15"
    );
    // Rows without a service date stay None rather than erroring
    assert_eq!(collection.records[1].service_date, None);
}

#[test]
fn test_machines_typed_and_passthrough_fields() {
    let fixture = write_workbook();
    let collection = load_source(fixture.path(), Source::Machines).unwrap();

    let first = &collection.records[0];
    assert_eq!(first.machine_type, "Single Jersey");
    assert_eq!(first.diameter, FieldValue::number(30.0));
    assert_eq!(first.status.as_deref(), Some("Active"));
    assert_eq!(first.location_group.as_deref(), Some("Pathway Parking"));
    assert_eq!(first.field("Brand"), FieldValue::text("Mayer"));
    assert_eq!(first.field("M/C No"), FieldValue::text("M-001"));
}

// ============================================================================
// ADVANTIS AND OUT SHEETS
// ============================================================================

#[test]
fn test_load_advantis_current_location() {
    let fixture = write_workbook();
    let collection = load_source(fixture.path(), Source::AdvantisMachines).unwrap();

    assert_eq!(collection.len(), 3);
    assert_eq!(collection.columns.len(), 7);
    assert_eq!(
        collection.records[0].current_location.as_deref(),
        Some("Floor 2")
    );
    // No status column on this source
    assert!(collection.records.iter().all(|r| r.status.is_none()));
}

#[test]
fn test_load_out_sheet() {
    let fixture = write_workbook();
    let collection = load_source(fixture.path(), Source::Out).unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.columns.len(), 6);
    assert_eq!(collection.records[0].machine_type, "Circular");
    assert_eq!(collection.records[0].field("Brand"), FieldValue::text("Mayer"));
}

// ============================================================================
// FAILURE SEMANTICS
// ============================================================================

#[test]
fn test_missing_workbook_is_source_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.xlsx");
    let err = load_source(&path, Source::Machines).unwrap_err();
    assert!(matches!(err, PersistenceError::SourceNotFound(_)));
}

#[test]
fn test_missing_sheet_is_sheet_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.xlsx");

    let mut workbook = Workbook::new();
    let machines = workbook.add_worksheet();
    machines.set_name("Machines").unwrap();
    for (col, header) in MACHINES_HEADERS.iter().enumerate() {
        machines.write_string(0, col as u16, *header).unwrap();
    }
    workbook.save(&path).unwrap();

    let err = load_source(&path, Source::Out).unwrap_err();
    match err {
        PersistenceError::SheetNotFound(sheet) => assert_eq!(sheet, "OUT"),
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_required_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");

    let mut workbook = Workbook::new();
    let machines = workbook.add_worksheet();
    machines.set_name("Machines").unwrap();
    // No Status column
    for (col, header) in ["M/C No", "Type", "Diameter", "Gauge"].iter().enumerate() {
        machines.write_string(0, col as u16, *header).unwrap();
    }
    workbook.save(&path).unwrap();

    let err = load_source(&path, Source::Machines).unwrap_err();
    match err {
        PersistenceError::MissingColumn { sheet, column } => {
            assert_eq!(sheet, "Machines");
            assert_eq!(column, "Status");
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

// ============================================================================
// SNAPSHOT SEMANTICS
// ============================================================================

#[test]
fn test_loader_rereads_workbook_each_call() {
    let fixture = write_workbook();
    let loader = XlsxLoader::new(fixture.path());

    let before = loader.load(Source::Out).unwrap();
    assert_eq!(before.len(), 1);

    // Rewrite the workbook with one more OUT row; the next load must see it
    let mut workbook = Workbook::new();
    let machines = workbook.add_worksheet();
    machines.set_name("Machines").unwrap();
    for (col, header) in MACHINES_HEADERS.iter().enumerate() {
        machines.write_string(0, col as u16, *header).unwrap();
    }
    let out = workbook.add_worksheet();
    out.set_name("OUT").unwrap();
    for (col, header) in OUT_HEADERS.iter().enumerate() {
        out.write_string(0, col as u16, *header).unwrap();
    }
    for row in 1..=2u32 {
        out.write_string(row, 0, format!("M-09{row}").as_str()).unwrap();
        out.write_string(row, 1, "Circular").unwrap();
        out.write_number(row, 2, 26.0).unwrap();
    }
    workbook.save(fixture.path()).unwrap();

    let after = loader.load(Source::Out).unwrap();
    assert_eq!(after.len(), 2);
}
