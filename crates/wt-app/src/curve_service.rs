//! Curve creation, editing and deletion from data-grid column selections.

use wt_core::{Real, Sample, samples_from_columns};
use wt_derivative::{DerivativeParams, analyze};
use wt_project::{
    Color, CurveCollection, CurveKind, CurveRecord, DerivativeCurve, ProductionGraphType, Series,
    SeriesStyle, StackedCurve,
};

use crate::data_grid::DataGrid;
use crate::error::{AppError, AppResult};

/// Simple curves keep only rows where both values exceed this.
const MIN_POSITIVE: Real = 1e-9;

/// An x/y column selection in the data grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    pub x: usize,
    pub y: usize,
}

impl ColumnPair {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone)]
pub struct SimpleCurveRequest {
    pub name: String,
    pub legend_name: String,
    pub columns: ColumnPair,
    pub style: SeriesStyle,
}

#[derive(Debug, Clone)]
pub struct StackedCurveRequest {
    pub name: String,
    pub pressure_legend: String,
    pub pressure: ColumnPair,
    pub pressure_style: SeriesStyle,
    /// x holds durations, y holds rates.
    pub production: ColumnPair,
    pub production_legend: String,
    pub production_graph_type: ProductionGraphType,
    pub production_color: Color,
}

#[derive(Debug, Clone)]
pub struct DerivativeCurveRequest {
    pub name: String,
    pub legend_name: String,
    /// x is the time column, y the pressure column.
    pub columns: ColumnPair,
    pub params: DerivativeParams,
    pub style: SeriesStyle,
    pub derivative_legend_name: String,
    pub derivative_style: SeriesStyle,
}

/// Replacement presentation for an existing curve.
#[derive(Debug, Clone)]
pub struct CurveEdit {
    pub legend_name: String,
    pub columns: ColumnPair,
    pub style: SeriesStyle,
    /// Ignored for simple curves.
    pub secondary: Option<SecondaryEdit>,
}

#[derive(Debug, Clone)]
pub struct SecondaryEdit {
    pub legend_name: String,
    /// Stacked curves only take the point color, as the production color.
    pub style: SeriesStyle,
}

/// Axis titles for drawing a curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    /// Title of the lower (production) axis of a stacked chart.
    pub y2: Option<String>,
}

fn require_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput("curve name must not be empty".to_string()));
    }
    Ok(())
}

fn positive_samples(grid: &DataGrid, columns: ColumnPair) -> AppResult<Vec<Sample>> {
    let xs = grid.column_values(columns.x)?;
    let ys = grid.column_values(columns.y)?;
    Ok(samples_from_columns(&xs, &ys)
        .into_iter()
        .filter(|s| s.time > MIN_POSITIVE && s.value > MIN_POSITIVE)
        .collect())
}

fn all_samples(grid: &DataGrid, columns: ColumnPair) -> AppResult<Vec<Sample>> {
    let xs = grid.column_values(columns.x)?;
    let ys = grid.column_values(columns.y)?;
    Ok(samples_from_columns(&xs, &ys))
}

pub fn simple_curve_record(grid: &DataGrid, request: &SimpleCurveRequest) -> AppResult<CurveRecord> {
    require_name(&request.name)?;
    let samples = positive_samples(grid, request.columns)?;
    tracing::debug!(
        rows = grid.row_count(),
        kept = samples.len(),
        "simple curve samples selected"
    );
    Ok(CurveRecord {
        name: request.name.clone(),
        legend_name: request.legend_name.clone(),
        x_col: Some(request.columns.x),
        y_col: Some(request.columns.y),
        primary_series: Series(samples),
        primary_style: request.style,
        kind: CurveKind::Simple,
    })
}

pub fn stacked_curve_record(grid: &DataGrid, request: &StackedCurveRequest) -> AppResult<CurveRecord> {
    require_name(&request.name)?;
    Ok(CurveRecord {
        name: request.name.clone(),
        legend_name: request.pressure_legend.clone(),
        x_col: Some(request.pressure.x),
        y_col: Some(request.pressure.y),
        primary_series: Series(all_samples(grid, request.pressure)?),
        primary_style: request.pressure_style,
        kind: CurveKind::Stacked(StackedCurve {
            x2_col: Some(request.production.x),
            y2_col: Some(request.production.y),
            secondary_series: Series(all_samples(grid, request.production)?),
            secondary_legend_name: request.production_legend.clone(),
            production_graph_type: request.production_graph_type,
            production_color: request.production_color,
        }),
    })
}

pub fn derivative_curve_record(
    grid: &DataGrid,
    request: &DerivativeCurveRequest,
) -> AppResult<CurveRecord> {
    require_name(&request.name)?;
    let samples = all_samples(grid, request.columns)?;
    let analysis = analyze(&samples, &request.params)?;

    Ok(CurveRecord {
        name: request.name.clone(),
        legend_name: request.legend_name.clone(),
        x_col: Some(request.columns.x),
        y_col: Some(request.columns.y),
        primary_series: Series(analysis.points),
        primary_style: request.style,
        kind: CurveKind::Derivative(DerivativeCurve {
            test_type: request.params.test_type,
            reference_pressure: request.params.reference_pressure,
            l_spacing: request.params.l_spacing,
            smoothing_enabled: request.params.smoothing.is_some(),
            smoothing_window: request.params.smoothing_window().max(1),
            derivative_series: analysis.derivative,
            derivative_legend_name: request.derivative_legend_name.clone(),
            derivative_style: request.derivative_style,
        }),
    })
}

fn store(curves: &mut CurveCollection, record: CurveRecord) {
    let name = record.name.clone();
    let kind = record.kind.label();
    let points = record.primary_series.len();
    if curves.insert(record).is_some() {
        tracing::warn!(curve = %name, kind, "existing curve replaced");
    } else {
        tracing::info!(curve = %name, kind, points, "curve created");
    }
}

/// Build a simple x-y curve and add it to `curves`.
///
/// Only rows where both values are positive are kept.
pub fn create_simple_curve(
    curves: &mut CurveCollection,
    grid: &DataGrid,
    request: &SimpleCurveRequest,
) -> AppResult<()> {
    let record = simple_curve_record(grid, request)?;
    store(curves, record);
    Ok(())
}

/// Build a pressure/production curve and add it to `curves`. All rows are kept.
pub fn create_stacked_curve(
    curves: &mut CurveCollection,
    grid: &DataGrid,
    request: &StackedCurveRequest,
) -> AppResult<()> {
    let record = stacked_curve_record(grid, request)?;
    store(curves, record);
    Ok(())
}

/// Run the derivative analysis and add the result to `curves`.
///
/// When the analysis fails `curves` is left untouched.
pub fn create_derivative_curve(
    curves: &mut CurveCollection,
    grid: &DataGrid,
    request: &DerivativeCurveRequest,
) -> AppResult<()> {
    let record = derivative_curve_record(grid, request).inspect_err(|err| {
        tracing::warn!(curve = %request.name, %err, "derivative curve rejected");
    })?;
    store(curves, record);
    Ok(())
}

/// Apply new presentation settings to an existing curve.
///
/// Simple curves are re-read from the grid with the new columns. Stacked and
/// derivative curves keep their data; only the recorded columns change.
pub fn edit_curve(
    curves: &mut CurveCollection,
    grid: &DataGrid,
    name: &str,
    edit: &CurveEdit,
) -> AppResult<()> {
    let record = curves
        .get(name)
        .ok_or_else(|| AppError::CurveNotFound(name.to_string()))?;
    let samples = match record.kind {
        CurveKind::Simple => Some(positive_samples(grid, edit.columns)?),
        _ => None,
    };

    curves.modify(name, |record| {
        if let Some(samples) = samples {
            record.primary_series = Series(samples);
        }
        record.legend_name = edit.legend_name.clone();
        record.x_col = Some(edit.columns.x);
        record.y_col = Some(edit.columns.y);
        record.primary_style = edit.style;

        if let Some(secondary) = &edit.secondary {
            match &mut record.kind {
                CurveKind::Simple => {}
                CurveKind::Stacked(stacked) => {
                    stacked.secondary_legend_name = secondary.legend_name.clone();
                    stacked.production_color = secondary.style.point_color;
                }
                CurveKind::Derivative(derivative) => {
                    derivative.derivative_legend_name = secondary.legend_name.clone();
                    derivative.derivative_style = secondary.style;
                }
            }
        }
    });

    tracing::info!(curve = name, "curve edited");
    Ok(())
}

pub fn delete_curve(curves: &mut CurveCollection, name: &str) -> AppResult<CurveRecord> {
    let removed = curves
        .remove(name)
        .ok_or_else(|| AppError::CurveNotFound(name.to_string()))?;
    tracing::info!(curve = name, "curve deleted");
    Ok(removed)
}

/// Step series for drawing production: durations are accumulated into times.
///
/// Starts at `(0, q[0])`; after the i-th duration the rate switches to
/// `q[i + 1]`, and the last point repeats the final rate.
pub fn production_step_series(durations: &[Real], rates: &[Real]) -> Vec<Sample> {
    if durations.is_empty() || rates.is_empty() {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(durations.len() + 1);
    points.push(Sample::new(0.0, rates[0]));
    let mut elapsed = 0.0;
    for (i, duration) in durations.iter().enumerate() {
        elapsed += duration;
        let rate = rates.get(i + 1).or_else(|| rates.get(i)).copied();
        if let Some(rate) = rate {
            points.push(Sample::new(elapsed, rate));
        }
    }
    points
}

/// Production series as drawn: the step series for step charts, the raw
/// samples for scatter charts.
pub fn production_series(stacked: &StackedCurve) -> Vec<Sample> {
    match stacked.production_graph_type {
        ProductionGraphType::Step => {
            let (durations, rates) = wt_core::split_columns(stacked.secondary_series.samples());
            production_step_series(&durations, &rates)
        }
        ProductionGraphType::Scatter => stacked.secondary_series.samples().to_vec(),
    }
}

pub fn axis_labels(record: &CurveRecord, grid: &DataGrid) -> AxisLabels {
    match &record.kind {
        CurveKind::Stacked(_) => AxisLabels {
            x: "Time".to_string(),
            y: "Pressure".to_string(),
            y2: Some("Production".to_string()),
        },
        CurveKind::Derivative(_) => AxisLabels {
            x: "Time".to_string(),
            y: "Pressure & Derivative".to_string(),
            y2: None,
        },
        CurveKind::Simple => {
            let header = |col: Option<usize>| {
                col.and_then(|c| grid.header(c))
                    .unwrap_or_default()
                    .to_string()
            };
            AxisLabels {
                x: header(record.x_col),
                y: header(record.y_col),
                y2: None,
            }
        }
    }
}
