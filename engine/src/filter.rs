//! FILENAME: engine/src/filter.rs
//! Filter Engine - cascading equality/membership predicates over a collection.
//!
//! Criteria compose as logical AND across attributes; there is no OR support
//! and no negation. An empty result is a valid outcome, never an error.

use serde::{Deserialize, Serialize};

use crate::record::{Attribute, FieldValue, MachineRecord, RecordCollection};

// ============================================================================
// SELECTION
// ============================================================================

/// The user's choice for one filter attribute.
///
/// "All" is a tagged variant rather than a magic string, so a category
/// legitimately named "All" can never collide with the sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    /// No constraint on this attribute (the "All" dropdown entry).
    Unconstrained,
    /// Single-select equality (exact match, case-sensitive).
    Is(FieldValue),
    /// Multi-select membership. An empty list admits nothing; callers treat
    /// that as an empty selection and skip aggregation entirely.
    AnyOf(Vec<FieldValue>),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Unconstrained
    }
}

impl Selection {
    pub fn is_text(s: impl Into<String>) -> Self {
        Selection::Is(FieldValue::text(s))
    }

    pub fn any_of_texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::AnyOf(values.into_iter().map(FieldValue::text).collect())
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Selection::Unconstrained)
    }

    /// Whether a record attribute value passes this selection.
    pub fn admits(&self, value: &FieldValue) -> bool {
        match self {
            Selection::Unconstrained => true,
            Selection::Is(wanted) => value == wanted,
            Selection::AnyOf(wanted) => wanted.contains(value),
        }
    }
}

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// One selection per filterable attribute, default all unconstrained.
/// Applied conjunctively and order-independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub machine_type: Selection,
    pub diameter: Selection,
    pub status: Selection,
    pub location_group: Selection,
    pub current_location: Selection,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, selection: Selection) -> Self {
        self.machine_type = selection;
        self
    }

    pub fn with_diameter(mut self, selection: Selection) -> Self {
        self.diameter = selection;
        self
    }

    pub fn with_status(mut self, selection: Selection) -> Self {
        self.status = selection;
        self
    }

    pub fn with_location_group(mut self, selection: Selection) -> Self {
        self.location_group = selection;
        self
    }

    pub fn with_current_location(mut self, selection: Selection) -> Self {
        self.current_location = selection;
        self
    }

    fn selections(&self) -> [(Attribute, &Selection); 5] {
        [
            (Attribute::Type, &self.machine_type),
            (Attribute::Diameter, &self.diameter),
            (Attribute::Status, &self.status),
            (Attribute::LocationGroup, &self.location_group),
            (Attribute::CurrentLocation, &self.current_location),
        ]
    }

    pub fn is_unconstrained(&self) -> bool {
        self.selections()
            .iter()
            .all(|(_, selection)| selection.is_unconstrained())
    }

    /// Whether a record passes every constrained attribute (logical AND).
    pub fn matches(&self, record: &MachineRecord) -> bool {
        self.selections()
            .iter()
            .all(|(attribute, selection)| selection.admits(&record.get(*attribute)))
    }

    /// Produces the order-preserving filtered subset of a collection.
    pub fn apply(&self, collection: &RecordCollection) -> RecordCollection {
        let records = collection
            .records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        RecordCollection::new(collection.source, collection.columns.clone(), records)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Source;

    fn fixture() -> RecordCollection {
        let rows = [
            ("Single Jersey", 30.0, "Active", Some("Pathway Parking")),
            ("Single Jersey", 34.0, "Idle", Some("Batch Parking")),
            ("Circular", 30.0, "Idle", Some("Pathway Parking")),
            ("Circular", 26.0, "Active", None),
            ("Rib", 34.0, "Idle", Some("Training (M/C)")),
        ];
        let records = rows
            .iter()
            .map(|(ty, dia, status, location)| MachineRecord {
                machine_type: ty.to_string(),
                diameter: FieldValue::number(*dia),
                status: Some(status.to_string()),
                location_group: location.map(|l| l.to_string()),
                current_location: None,
                service_date: None,
                extras: Vec::new(),
            })
            .collect();
        RecordCollection::new(
            Source::Machines,
            vec!["Type".to_string(), "Diameter".to_string(), "Status".to_string()],
            records,
        )
    }

    #[test]
    fn test_unconstrained_criteria_is_identity() {
        let collection = fixture();
        let filtered = FilterCriteria::new().apply(&collection);
        assert_eq!(filtered, collection);
    }

    #[test]
    fn test_single_attribute_exact_match() {
        let collection = fixture();
        let filtered = FilterCriteria::new()
            .with_type(Selection::is_text("Circular"))
            .apply(&collection);
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .records
            .iter()
            .all(|r| r.machine_type == "Circular"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let collection = fixture();
        let filtered = FilterCriteria::new()
            .with_type(Selection::is_text("circular"))
            .apply(&collection);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_criteria_compose_as_and() {
        let collection = fixture();
        let filtered = FilterCriteria::new()
            .with_status(Selection::is_text("Idle"))
            .with_location_group(Selection::is_text("Pathway Parking"))
            .apply(&collection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records[0].machine_type, "Circular");
    }

    #[test]
    fn test_filter_order_independence() {
        let collection = fixture();
        let by_status = FilterCriteria::new().with_status(Selection::is_text("Idle"));
        let by_type = FilterCriteria::new().with_type(Selection::is_text("Circular"));

        let status_first = by_type.apply(&by_status.apply(&collection));
        let type_first = by_status.apply(&by_type.apply(&collection));
        assert_eq!(status_first, type_first);
    }

    #[test]
    fn test_empty_result_is_valid_not_error() {
        let collection = fixture();
        let filtered = FilterCriteria::new()
            .with_type(Selection::is_text("Warp"))
            .apply(&collection);
        assert!(filtered.is_empty());
        assert_eq!(filtered.source, Source::Machines);
        assert_eq!(filtered.columns, collection.columns);
    }

    #[test]
    fn test_any_of_membership() {
        let collection = fixture();
        let filtered = FilterCriteria::new()
            .with_type(Selection::any_of_texts(["Circular", "Rib"]))
            .apply(&collection);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_empty_any_of_admits_nothing() {
        let collection = fixture();
        let filtered = FilterCriteria::new()
            .with_type(Selection::AnyOf(Vec::new()))
            .apply(&collection);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let collection = fixture();
        let filtered = FilterCriteria::new()
            .with_status(Selection::is_text("Idle"))
            .apply(&collection);
        let types: Vec<&str> = filtered
            .records
            .iter()
            .map(|r| r.machine_type.as_str())
            .collect();
        assert_eq!(types, vec!["Single Jersey", "Circular", "Rib"]);
    }
}
