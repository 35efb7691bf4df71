//! FILENAME: report-engine/src/pipeline.rs
//! Report pipeline - selects a report, loads its sources, filters and
//! aggregates them, and assembles the renderable view.
//!
//! Each call runs exactly one pipeline for the selected report and loads
//! only the sources that report needs, fresh from the loader. Nothing is
//! cached across renders; repeated renders of the same snapshot produce
//! identical views.

use engine::{
    count_by_pair, count_by_type_ranked, Attribute, FilterCriteria, RecordCollection, Selection,
    Source,
};
use persistence::{PersistenceError, SourceLoader};

use crate::state::{DashboardState, FleetFilters, Report, TableFilters};
use crate::view::{
    AdvantisView, ChartOutcome, DataTableView, DiameterChart, FleetView, ParkingView, ReportView,
    TableView, TypeCard,
};

/// Fixed location-group dropdown entries for the Parking report.
pub const LOCATION_GROUP_OPTIONS: [&str; 3] =
    ["Pathway Parking", "Batch Parking", "Training (M/C)"];

/// How many types the multi-select pre-selects before the user touches it.
const DEFAULT_TYPE_SELECTION: usize = 3;

// ============================================================================
// PIPELINE ENTRY POINT
// ============================================================================

/// Renders the report currently selected in `state`.
///
/// Fatal load failures (missing workbook, missing sheet, missing column)
/// propagate as errors; empty selections and empty filter results come back
/// as modeled view states.
pub fn render(
    state: &DashboardState,
    loader: &dyn SourceLoader,
) -> Result<ReportView, PersistenceError> {
    log::debug!("rendering {:?} report", state.selected_report);

    match state.selected_report {
        Report::Overview => {
            let machines = loader.load(Source::Machines)?;
            Ok(ReportView::Overview(render_fleet(
                "Total Machines",
                &machines,
                &state.overview,
            )))
        }
        Report::Running => {
            let machines = loader.load(Source::Machines)?;
            let active = FilterCriteria::new()
                .with_status(Selection::is_text("Active"))
                .apply(&machines);
            Ok(ReportView::Running(render_fleet(
                "Total Running Machines",
                &active,
                &state.running,
            )))
        }
        Report::Parking => {
            let machines = loader.load(Source::Machines)?;
            Ok(ReportView::Parking(render_parking(&machines, state)))
        }
        Report::Advantis => {
            let advantis = loader.load(Source::AdvantisMachines)?;
            Ok(ReportView::Advantis(render_advantis(&advantis, state)))
        }
        Report::DataTable => {
            let machines = loader.load(Source::Machines)?;
            let advantis = loader.load(Source::AdvantisMachines)?;
            let out = loader.load(Source::Out)?;
            Ok(ReportView::DataTable(DataTableView {
                machines: render_table(
                    "MFI Existing Machines Data",
                    &machines,
                    &state.data_table.machines,
                    true,
                ),
                advantis: render_table(
                    "Advantis Existing Machines Data",
                    &advantis,
                    &state.data_table.advantis,
                    false,
                ),
                out: render_table(
                    "Machines out from MFI Data",
                    &out,
                    &state.data_table.out,
                    false,
                ),
            }))
        }
    }
}

// ============================================================================
// FLEET REPORTS (Overview / Running)
// ============================================================================

fn render_fleet(title: &str, collection: &RecordCollection, filters: &FleetFilters) -> FleetView {
    let type_options = collection.distinct_types();

    let selected_types = match &filters.selected_types {
        Some(types) => types.clone(),
        // Untouched multi-select defaults to the first few types
        None => type_options
            .iter()
            .take(DEFAULT_TYPE_SELECTION)
            .cloned()
            .collect(),
    };

    let chart = if selected_types.is_empty() {
        ChartOutcome::SelectionRequired
    } else {
        let filtered = FilterCriteria::new()
            .with_type(Selection::any_of_texts(selected_types.iter().cloned()))
            .apply(collection);
        chart_outcome(&filtered)
    };

    FleetView {
        title: title.to_string(),
        total: collection.len(),
        cards: type_cards(collection),
        type_options,
        selected_types,
        chart,
    }
}

// ============================================================================
// PARKING / ADVANTIS REPORTS
// ============================================================================

fn render_parking(machines: &RecordCollection, state: &DashboardState) -> ParkingView {
    let idle = FilterCriteria::new()
        .with_status(Selection::is_text("Idle"))
        .apply(machines);

    let filtered = FilterCriteria::new()
        .with_type(state.parking.machine_type.clone())
        .with_location_group(state.parking.location_group.clone())
        .apply(&idle);

    ParkingView {
        total: idle.len(),
        cards: type_cards(&idle),
        type_options: idle.distinct_types(),
        location_group_options: LOCATION_GROUP_OPTIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        chart: chart_outcome(&filtered),
    }
}

fn render_advantis(advantis: &RecordCollection, state: &DashboardState) -> AdvantisView {
    let filtered = FilterCriteria::new()
        .with_type(state.advantis.machine_type.clone())
        .with_current_location(state.advantis.current_location.clone())
        .apply(advantis);

    AdvantisView {
        total: advantis.len(),
        cards: type_cards(advantis),
        type_options: advantis.distinct_types(),
        current_location_options: advantis
            .distinct(Attribute::CurrentLocation)
            .iter()
            .map(|v| v.to_string())
            .collect(),
        chart: chart_outcome(&filtered),
    }
}

// ============================================================================
// DATA TABLE REPORT
// ============================================================================

fn render_table(
    title: &str,
    collection: &RecordCollection,
    filters: &TableFilters,
    has_status: bool,
) -> TableView {
    let status = if has_status {
        filters.status.clone()
    } else {
        Selection::Unconstrained
    };
    let filtered = FilterCriteria::new()
        .with_status(status)
        .with_type(filters.machine_type.clone())
        .with_diameter(filters.diameter.clone())
        .apply(collection);

    let rows = filtered
        .records
        .iter()
        .map(|record| {
            collection
                .columns
                .iter()
                .map(|column| record.field(column))
                .collect()
        })
        .collect();

    TableView {
        title: title.to_string(),
        columns: collection.columns.clone(),
        rows,
        showing: filtered.len(),
        of: collection.len(),
        status_options: has_status.then(|| {
            collection
                .distinct(Attribute::Status)
                .iter()
                .map(|v| v.to_string())
                .collect()
        }),
        type_options: collection.distinct_types(),
        diameter_options: collection.distinct(Attribute::Diameter),
    }
}

// ============================================================================
// SHARED PIECES
// ============================================================================

fn type_cards(collection: &RecordCollection) -> Vec<TypeCard> {
    count_by_type_ranked(collection)
        .into_iter()
        .map(|(machine_type, count)| TypeCard {
            machine_type,
            count,
        })
        .collect()
}

fn chart_outcome(filtered: &RecordCollection) -> ChartOutcome {
    if filtered.is_empty() {
        return ChartOutcome::NoData;
    }
    ChartOutcome::Chart(DiameterChart {
        diameters: filtered.distinct(Attribute::Diameter),
        series: count_by_pair(filtered, Attribute::Diameter, Attribute::Type),
    })
}
