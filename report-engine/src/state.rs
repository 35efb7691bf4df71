//! FILENAME: report-engine/src/state.rs
//! View State - the selected report and each report's filter selections.
//!
//! Modeled as one explicit, serializable state object passed into the
//! pipeline each render cycle. Each report's selections persist
//! independently: switching reports never resets the others.

use serde::{Deserialize, Serialize};

use engine::Selection;

// ============================================================================
// REPORT
// ============================================================================

/// The five dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Report {
    Overview,
    Running,
    Parking,
    Advantis,
    DataTable,
}

impl Report {
    /// Menu order, as presented by the rendering collaborator.
    pub const ALL: [Report; 5] = [
        Report::Overview,
        Report::Running,
        Report::Parking,
        Report::Advantis,
        Report::DataTable,
    ];
}

// ============================================================================
// PER-REPORT FILTER STATE
// ============================================================================

/// Multi-select type filter for the Overview and Running reports.
///
/// `selected_types: None` means the user has not touched the control yet;
/// the pipeline then defaults to the first three distinct types. An explicit
/// empty list is an empty selection: the report prompts instead of charting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetFilters {
    pub selected_types: Option<Vec<String>>,
}

/// Single-select dropdowns for the Parking report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingFilters {
    pub machine_type: Selection,
    pub location_group: Selection,
}

/// Single-select dropdowns for the Advantis report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvantisFilters {
    pub machine_type: Selection,
    pub current_location: Selection,
}

/// Dropdowns for one Data Table tab. Status applies to the Machines tab
/// only; it stays unconstrained on the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFilters {
    pub status: Selection,
    pub machine_type: Selection,
    pub diameter: Selection,
}

/// Filter state for the three Data Table tabs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTableFilters {
    pub machines: TableFilters,
    pub advantis: TableFilters,
    pub out: TableFilters,
}

// ============================================================================
// DASHBOARD STATE
// ============================================================================

/// Complete view state. Initial state: Overview selected, every filter
/// unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub selected_report: Report,
    pub overview: FleetFilters,
    pub running: FleetFilters,
    pub parking: ParkingFilters,
    pub advantis: AdvantisFilters,
    pub data_table: DataTableFilters,
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState {
            selected_report: Report::Overview,
            overview: FleetFilters::default(),
            running: FleetFilters::default(),
            parking: ParkingFilters::default(),
            advantis: AdvantisFilters::default(),
            data_table: DataTableFilters::default(),
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the active report, leaving every report's stored filter
    /// selections untouched.
    pub fn select_report(&mut self, report: Report) {
        self.selected_report = report;
    }
}

// ============================================================================
// TESTS
// ============================================================================
