//! FILENAME: report-engine/src/lib.rs
//! Knitting Machine Dashboard report engine.
//!
//! Owns the view state and runs the per-render pipeline: select report,
//! load sources, filter, aggregate, assemble the renderable view. Chart
//! drawing and page layout belong to an external rendering collaborator
//! that consumes the serializable views produced here.

mod pipeline;
pub mod state;
pub mod view;

pub use pipeline::{render, LOCATION_GROUP_OPTIONS};
pub use state::{
    AdvantisFilters, DashboardState, DataTableFilters, FleetFilters, ParkingFilters, Report,
    TableFilters,
};
pub use view::{
    AdvantisView, ChartOutcome, DataTableView, DiameterChart, FleetView, ParkingView, ReportView,
    TableView, TypeCard,
};
