//! FILENAME: report-engine/src/view.rs
//! Report views - renderable output for the external rendering collaborator.
//!
//! Everything here is a derived value: recomputed per render cycle, never
//! mutated in place. Empty selections and empty results are modeled states,
//! not errors, so the renderer can show an explicit prompt instead of a
//! blank chart.

use serde::{Deserialize, Serialize};

use engine::{FieldValue, PairCount};

// ============================================================================
// CARDS AND CHARTS
// ============================================================================

/// One machine-type summary card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCard {
    pub machine_type: String,
    pub count: u64,
}

/// Grouped bar-chart data: machine counts by diameter and type.
/// `diameters` is the category axis, strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiameterChart {
    pub diameters: Vec<FieldValue>,
    pub series: Vec<PairCount>,
}

/// Outcome of preparing a chart for the current filter selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartOutcome {
    Chart(DiameterChart),
    /// The user cleared the multi-select; show a "select at least one
    /// machine type" prompt and skip aggregation entirely.
    SelectionRequired,
    /// The filter combination matched no records; show a "no data for this
    /// selection" message.
    NoData,
}

// ============================================================================
// FLEET REPORTS (Overview / Running)
// ============================================================================

/// Card-and-chart view shared by the Overview and Running reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetView {
    pub title: String,
    /// Scalar total for the headline card.
    pub total: usize,
    /// Per-type cards, most common type first.
    pub cards: Vec<TypeCard>,
    /// Multi-select options: every type in the unfiltered collection.
    pub type_options: Vec<String>,
    /// The types the chart is currently restricted to.
    pub selected_types: Vec<String>,
    pub chart: ChartOutcome,
}

// ============================================================================
// PARKING / ADVANTIS REPORTS
// ============================================================================

/// Idle-fleet view with type and location-group dropdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingView {
    pub total: usize,
    pub cards: Vec<TypeCard>,
    pub type_options: Vec<String>,
    pub location_group_options: Vec<String>,
    pub chart: ChartOutcome,
}

/// Advantis fleet view with type and current-location dropdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvantisView {
    pub total: usize,
    pub cards: Vec<TypeCard>,
    pub type_options: Vec<String>,
    pub current_location_options: Vec<String>,
    pub chart: ChartOutcome,
}

// ============================================================================
// DATA TABLE REPORT
// ============================================================================

/// One Data Table tab: the filtered rows plus a "showing N of M" pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub title: String,
    pub columns: Vec<String>,
    /// Filtered rows, one display value per column, in collection order.
    pub rows: Vec<Vec<FieldValue>>,
    /// Number of rows after filtering.
    pub showing: usize,
    /// Number of rows before filtering.
    pub of: usize,
    /// Status dropdown options; only present on the Machines tab.
    pub status_options: Option<Vec<String>>,
    pub type_options: Vec<String>,
    pub diameter_options: Vec<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTableView {
    pub machines: TableView,
    pub advantis: TableView,
    pub out: TableView,
}

// ============================================================================
// REPORT VIEW
// ============================================================================

/// The rendered output of one report pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportView {
    Overview(FleetView),
    Running(FleetView),
    Parking(ParkingView),
    Advantis(AdvantisView),
    DataTable(DataTableView),
}
