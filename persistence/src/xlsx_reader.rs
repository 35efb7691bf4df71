//! FILENAME: persistence/src/xlsx_reader.rs
//! Loads one source sheet from the dashboard workbook into a normalized
//! RecordCollection. The workbook is opened fresh on every call so each
//! render cycle sees the current snapshot; nothing is memoized here.

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

use crate::PersistenceError;
use engine::{FieldValue, MachineRecord, RecordCollection, Source};

/// Loads and normalizes one source sheet.
///
/// Only the declared column range for the source is read; columns beyond it
/// are ignored. Service dates are reduced to calendar dates. Machines rows
/// whose Status cell equals the literal string "Status" are embedded header
/// artifacts and are dropped before any counting.
pub fn load_source(path: &Path, source: Source) -> Result<RecordCollection, PersistenceError> {
    if !path.exists() {
        return Err(PersistenceError::SourceNotFound(path.to_path_buf()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet = source.sheet_name();
    let range = workbook.worksheet_range(sheet).map_err(|e| match e {
        calamine::XlsxError::WorksheetNotFound(_) => {
            PersistenceError::SheetNotFound(sheet.to_string())
        }
        other => PersistenceError::XlsxRead(other),
    })?;

    let width = source.column_count();
    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .take(width)
            .map(header_text)
            .collect(),
        None => Vec::new(),
    };

    for required in source.required_columns() {
        if !columns.iter().any(|name| name == required) {
            return Err(PersistenceError::MissingColumn {
                sheet: sheet.to_string(),
                column: required.to_string(),
            });
        }
    }

    let find = |name: &str| columns.iter().position(|c| c == name);
    // Required columns are validated above, so these two lookups always succeed
    let type_idx = find("Type").unwrap_or_default();
    let diameter_idx = find("Diameter").unwrap_or_default();
    // Status is only meaningful on the primary fleet sheet
    let status_idx = match source {
        Source::Machines => find("Status"),
        _ => None,
    };
    let location_group_idx = find("Location Group");
    let current_location_idx = find("Current Location");
    let service_date_idx = find("Service Date");

    let typed: Vec<usize> = [
        Some(type_idx),
        Some(diameter_idx),
        status_idx,
        location_group_idx,
        current_location_idx,
        service_date_idx,
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut records = Vec::new();
    let mut dropped_artifacts = 0usize;

    for row in rows {
        let values: Vec<FieldValue> = (0..width)
            .map(|i| row.get(i).map(convert_cell).unwrap_or(FieldValue::Empty))
            .collect();

        if values.iter().all(FieldValue::is_empty) {
            continue;
        }

        let status = status_idx.map(|i| values[i].clone()).and_then(|value| {
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        });

        // Embedded header artifact rows repeat the column header as data
        if status.as_deref() == Some("Status") {
            dropped_artifacts += 1;
            continue;
        }

        let service_date = service_date_idx.and_then(|i| match &values[i] {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        });

        let extras: Vec<(String, FieldValue)> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| !typed.contains(i))
            .map(|(i, name)| (name.clone(), values[i].clone()))
            .collect();

        records.push(MachineRecord {
            machine_type: values[type_idx].to_string(),
            diameter: values[diameter_idx].clone(),
            status,
            location_group: optional_text(location_group_idx, &values),
            current_location: optional_text(current_location_idx, &values),
            service_date,
            extras,
        });
    }

    if dropped_artifacts > 0 {
        log::warn!(
            "dropped {} header artifact row(s) from sheet '{}'",
            dropped_artifacts,
            sheet
        );
    }
    log::debug!("loaded {} record(s) from sheet '{}'", records.len(), sheet);

    Ok(RecordCollection::new(source, columns, records))
}

/// Normalizes a raw cell into a FieldValue.
/// Date-formatted cells keep only the calendar date.
fn convert_cell(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty => FieldValue::Empty,
        Data::String(s) => {
            if s.is_empty() {
                FieldValue::Empty
            } else {
                FieldValue::Text(s.clone())
            }
        }
        Data::Float(f) => FieldValue::number(*f),
        Data::Int(i) => FieldValue::number(*i as f64),
        Data::Bool(b) => FieldValue::Boolean(*b),
        Data::Error(_) => FieldValue::Empty,
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ndt| FieldValue::Date(ndt.date()))
            .unwrap_or_else(|| FieldValue::number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_date(s)
            .map(FieldValue::Date)
            .unwrap_or_else(|| FieldValue::Text(s.clone())),
        Data::DurationIso(s) => FieldValue::Text(s.clone()),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.date())
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

fn optional_text(index: Option<usize>, values: &[FieldValue]) -> Option<String> {
    index.and_then(|i| {
        if values[i].is_empty() {
            None
        } else {
            Some(values[i].to_string())
        }
    })
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        other => convert_cell(other).to_string(),
    }
}
