//! Shared application service layer for well-test analysis.
//!
//! Centralizes the operations a front end needs: reading the source data
//! table, building curves from column selections, editing and deleting them,
//! exporting curve data, and loading/saving the project that holds them.

pub mod curve_service;
pub mod data_grid;
pub mod error;
pub mod export;
pub mod project_service;

// Re-export key types for convenience
pub use curve_service::{
    AxisLabels, ColumnPair, CurveEdit, DerivativeCurveRequest, SecondaryEdit, SimpleCurveRequest,
    StackedCurveRequest, axis_labels, create_derivative_curve, create_simple_curve,
    create_stacked_curve, delete_curve, derivative_curve_record, edit_curve, production_series,
    production_step_series, simple_curve_record, stacked_curve_record,
};
pub use data_grid::{DataGrid, ImportSettings, SPLIT_COLUMN_HEADER, SortOrder};
pub use error::{AppError, AppResult};
pub use export::{ExportRange, Separator, export_curve, export_to_path, production_value};
pub use project_service::{ProjectContext, load_project, save_project, validate_project};
