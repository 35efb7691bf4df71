//! FILENAME: engine/src/record.rs
//! Record model - normalized machine rows and the collections that hold them.
//!
//! Every sheet row is normalized into a MachineRecord with typed attributes
//! plus passthrough columns kept for tabular display. Collections are
//! immutable snapshots within one render cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use rustc_hash::FxHashSet;

// ============================================================================
// ORDERED FLOAT
// ============================================================================

/// Wrapper around f64 that implements Eq and Hash for use as category keys.
/// NaN values are treated as equal to each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.0.is_nan() && other.0.is_nan() {
            true
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            // All NaN values hash to the same thing
            u64::MAX.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}

impl OrderedFloat {
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A normalized, hashable representation of a sheet cell value.
/// Used both as record attribute storage and as category keys in counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Number(OrderedFloat),
    Text(String),
    Boolean(bool),
    /// Calendar date with the time-of-day component already discarded.
    Date(NaiveDate),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn number(n: f64) -> Self {
        FieldValue::Number(OrderedFloat(n))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(n.0),
            _ => None,
        }
    }

    /// Total ordering used for every deterministic sort in the system:
    /// category axes, dropdown option lists, cross-tab series.
    /// Empty sorts first, then numbers ascending, then text, booleans, dates.
    pub fn compare(a: &FieldValue, b: &FieldValue) -> Ordering {
        match (a, b) {
            (FieldValue::Empty, FieldValue::Empty) => Ordering::Equal,
            (FieldValue::Empty, _) => Ordering::Less,
            (_, FieldValue::Empty) => Ordering::Greater,

            (FieldValue::Number(na), FieldValue::Number(nb)) => {
                na.0.partial_cmp(&nb.0).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Number(_), _) => Ordering::Less,
            (_, FieldValue::Number(_)) => Ordering::Greater,

            (FieldValue::Text(ta), FieldValue::Text(tb)) => ta.cmp(tb),
            (FieldValue::Text(_), _) => Ordering::Less,
            (_, FieldValue::Text(_)) => Ordering::Greater,

            (FieldValue::Boolean(ba), FieldValue::Boolean(bb)) => ba.cmp(bb),
            (FieldValue::Boolean(_), _) => Ordering::Less,
            (_, FieldValue::Boolean(_)) => Ordering::Greater,

            (FieldValue::Date(da), FieldValue::Date(db)) => da.cmp(db),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Number(n) => {
                // Integral diameters display without a trailing ".0"
                if n.0.fract() == 0.0 && n.0.abs() < 1e15 {
                    write!(f, "{}", n.0 as i64)
                } else {
                    write!(f, "{}", n.0)
                }
            }
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d),
        }
    }
}

// ============================================================================
// SOURCE
// ============================================================================

/// The three backing sheets of the dashboard workbook.
/// Each collection is loaded independently; schemas differ in which
/// optional attributes are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Source {
    /// Primary fleet sheet ("Machines", columns A:H).
    Machines,
    /// Secondary fleet tracked by a different system ("Advantis Machines", A:G).
    AdvantisMachines,
    /// Machines removed from the active fleet ("OUT", A:F).
    Out,
}

impl Source {
    /// Worksheet name inside the backing workbook.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Source::Machines => "Machines",
            Source::AdvantisMachines => "Advantis Machines",
            Source::Out => "OUT",
        }
    }

    /// Width of the declared column range (A:H = 8, A:G = 7, A:F = 6).
    /// Columns beyond this range are ignored, not errors.
    pub fn column_count(&self) -> usize {
        match self {
            Source::Machines => 8,
            Source::AdvantisMachines => 7,
            Source::Out => 6,
        }
    }

    /// Header names that must be present in the declared range.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Source::Machines => &["Type", "Diameter", "Status"],
            Source::AdvantisMachines => &["Type", "Diameter"],
            Source::Out => &["Type", "Diameter"],
        }
    }
}

// ============================================================================
// ATTRIBUTE
// ============================================================================

/// The filterable and groupable axes of a machine record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Type,
    Diameter,
    Status,
    LocationGroup,
    CurrentLocation,
    ServiceDate,
}

impl Attribute {
    /// The header name this attribute is read from.
    pub fn header(&self) -> &'static str {
        match self {
            Attribute::Type => "Type",
            Attribute::Diameter => "Diameter",
            Attribute::Status => "Status",
            Attribute::LocationGroup => "Location Group",
            Attribute::CurrentLocation => "Current Location",
            Attribute::ServiceDate => "Service Date",
        }
    }
}

// ============================================================================
// MACHINE RECORD
// ============================================================================

/// One normalized row from a source sheet.
///
/// Typed attributes cover everything the filter and aggregation engines
/// touch; `extras` preserves the remaining declared-range columns for
/// tabular display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRecord {
    pub machine_type: String,
    /// Nominal diameter, treated as a discrete category rather than a
    /// continuous measure.
    pub diameter: FieldValue,
    /// Only populated on the Machines source.
    pub status: Option<String>,
    /// Only populated on the Machines source.
    pub location_group: Option<String>,
    /// Only populated on the Advantis source.
    pub current_location: Option<String>,
    /// Only populated on the Machines source; time-of-day stripped at load.
    pub service_date: Option<NaiveDate>,
    /// Passthrough columns inside the declared range, in sheet order.
    pub extras: Vec<(String, FieldValue)>,
}

impl MachineRecord {
    /// Reads a typed attribute as a normalized value.
    /// Absent optional attributes read as Empty.
    pub fn get(&self, attribute: Attribute) -> FieldValue {
        match attribute {
            Attribute::Type => FieldValue::Text(self.machine_type.clone()),
            Attribute::Diameter => self.diameter.clone(),
            Attribute::Status => self
                .status
                .clone()
                .map_or(FieldValue::Empty, FieldValue::Text),
            Attribute::LocationGroup => self
                .location_group
                .clone()
                .map_or(FieldValue::Empty, FieldValue::Text),
            Attribute::CurrentLocation => self
                .current_location
                .clone()
                .map_or(FieldValue::Empty, FieldValue::Text),
            Attribute::ServiceDate => self
                .service_date
                .map_or(FieldValue::Empty, FieldValue::Date),
        }
    }

    /// Resolves any declared-range column by header name, typed or
    /// passthrough. Used when rendering full table rows.
    pub fn field(&self, header: &str) -> FieldValue {
        match header {
            "Type" => return FieldValue::Text(self.machine_type.clone()),
            "Diameter" => return self.diameter.clone(),
            "Status" => return self.get(Attribute::Status),
            "Location Group" => return self.get(Attribute::LocationGroup),
            "Current Location" => return self.get(Attribute::CurrentLocation),
            "Service Date" => return self.get(Attribute::ServiceDate),
            _ => {}
        }
        self.extras
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.clone())
            .unwrap_or(FieldValue::Empty)
    }
}

// ============================================================================
// RECORD COLLECTION
// ============================================================================

/// Named, ordered sequence of records sharing one schema variant.
/// Immutable snapshot within a render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCollection {
    pub source: Source,
    /// Headers of the declared column range, in sheet order.
    pub columns: Vec<String>,
    pub records: Vec<MachineRecord>,
}

impl RecordCollection {
    pub fn new(source: Source, columns: Vec<String>, records: Vec<MachineRecord>) -> Self {
        RecordCollection {
            source,
            columns,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-empty values of an attribute, sorted ascending.
    /// This is the option set offered to dropdown filters, always computed
    /// from the collection before the user's sub-filters are applied.
    pub fn distinct(&self, attribute: Attribute) -> Vec<FieldValue> {
        let mut seen = FxHashSet::default();
        let mut values = Vec::new();
        for record in &self.records {
            let value = record.get(attribute);
            if value.is_empty() {
                continue;
            }
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
        values.sort_by(FieldValue::compare);
        values
    }

    /// Distinct machine types as display strings, sorted ascending.
    pub fn distinct_types(&self) -> Vec<String> {
        self.distinct(Attribute::Type)
            .into_iter()
            .map(|v| v.to_string())
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
