//! FILENAME: engine/src/aggregate.rs
//! Aggregation Engine - count-by-category and cross-tab summaries.
//!
//! Counts accumulate in hash maps but are always flushed through an explicit
//! sort pass, so output order never depends on hash iteration. Only values
//! actually present in the collection produce entries; there is no zero fill.
//! Nothing is cached across calls - every summary is re-derived from the
//! collection passed in.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::record::{Attribute, FieldValue, RecordCollection};

// ============================================================================
// CATEGORY COUNT
// ============================================================================

/// Count of records per distinct value of one attribute.
/// Entries are sorted ascending by category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    entries: Vec<(FieldValue, u64)>,
}

impl CategoryCount {
    pub fn entries(&self) -> &[(FieldValue, u64)] {
        &self.entries
    }

    pub fn get(&self, category: &FieldValue) -> u64 {
        self.entries
            .iter()
            .find(|(value, _)| value == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts. Equals the input collection's record count.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// One cell of a two-attribute cross-tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCount {
    pub primary: FieldValue,
    pub secondary: FieldValue,
    pub count: u64,
}

// ============================================================================
// SINGLE-KEY COUNTS
// ============================================================================

/// Counts records per distinct value of `attribute`, ascending by category.
pub fn count_by(collection: &RecordCollection, attribute: Attribute) -> CategoryCount {
    let mut counts: FxHashMap<FieldValue, u64> = FxHashMap::default();
    for record in &collection.records {
        *counts.entry(record.get(attribute)).or_insert(0) += 1;
    }

    let mut entries: Vec<(FieldValue, u64)> = counts.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| FieldValue::compare(a, b));
    CategoryCount { entries }
}

/// Machine-type counts ordered for the summary cards: most common first,
/// ties broken by name ascending.
pub fn count_by_type_ranked(collection: &RecordCollection) -> Vec<(String, u64)> {
    let mut counts: FxHashMap<String, u64> = FxHashMap::default();
    for record in &collection.records {
        *counts.entry(record.machine_type.clone()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by(|(name_a, count_a), (name_b, count_b)| {
        count_b.cmp(count_a).then_with(|| name_a.cmp(name_b))
    });
    ranked
}

// ============================================================================
// CROSS-TAB
// ============================================================================

/// Counts records per observed `(primary, secondary)` combination, sorted
/// ascending by primary then secondary. Used for the diameter-by-type chart
/// series, where the primary axis must come out strictly ascending.
pub fn count_by_pair(
    collection: &RecordCollection,
    primary: Attribute,
    secondary: Attribute,
) -> Vec<PairCount> {
    let mut counts: FxHashMap<(FieldValue, FieldValue), u64> = FxHashMap::default();
    for record in &collection.records {
        let key = (record.get(primary), record.get(secondary));
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut pairs: Vec<PairCount> = counts
        .into_iter()
        .map(|((primary, secondary), count)| PairCount {
            primary,
            secondary,
            count,
        })
        .collect();
    pairs.sort_by(|a, b| {
        FieldValue::compare(&a.primary, &b.primary)
            .then_with(|| FieldValue::compare(&a.secondary, &b.secondary))
    });
    pairs
}

// ============================================================================
// TESTS
// ============================================================================
