//! Curve record and project file definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wt_core::{Real, Sample, WtError};
use wt_derivative::{DerivativeParams, TestType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub curves: Vec<CurveRecord>,
}

/// One analysis result: a named curve, its data and how to draw it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurveRecord {
    pub name: String,
    #[serde(default)]
    pub legend_name: String,
    /// Source column of the x values in the data grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_col: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_col: Option<usize>,
    pub primary_series: Series,
    #[serde(default)]
    pub primary_style: SeriesStyle,
    #[serde(flatten)]
    pub kind: CurveKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CurveKind {
    /// A single x-y series taken straight from two grid columns.
    Simple,
    /// Pressure (top) and production rate (bottom) against a shared time axis.
    Stacked(StackedCurve),
    /// Pressure drop and its log-time derivative on one log-log chart.
    Derivative(DerivativeCurve),
}

impl CurveKind {
    pub fn label(&self) -> &'static str {
        match self {
            CurveKind::Simple => "simple",
            CurveKind::Stacked(_) => "stacked",
            CurveKind::Derivative(_) => "derivative",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StackedCurve {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2_col: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2_col: Option<usize>,
    /// Production series; its time base is independent of the pressure series.
    pub secondary_series: Series,
    #[serde(default)]
    pub secondary_legend_name: String,
    #[serde(default)]
    pub production_graph_type: ProductionGraphType,
    #[serde(default)]
    pub production_color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivativeCurve {
    #[serde(default)]
    pub test_type: TestType,
    #[serde(default)]
    pub reference_pressure: Real,
    #[serde(rename = "LSpacing")]
    pub l_spacing: Real,
    #[serde(default)]
    pub smoothing_enabled: bool,
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
    /// One value per primary sample.
    pub derivative_series: Vec<Real>,
    #[serde(default)]
    pub derivative_legend_name: String,
    #[serde(default)]
    pub derivative_style: SeriesStyle,
}

fn default_smoothing_window() -> usize {
    1
}

impl DerivativeCurve {
    pub fn params(&self) -> DerivativeParams {
        DerivativeParams {
            test_type: self.test_type,
            reference_pressure: self.reference_pressure,
            l_spacing: self.l_spacing,
            smoothing: self.smoothing_enabled.then_some(self.smoothing_window),
        }
    }
}

/// How the production series of a stacked chart is drawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProductionGraphType {
    /// Rates held constant over consecutive durations.
    #[default]
    Step,
    Scatter,
}

/// Presentation of one drawn series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesStyle {
    pub point_shape: MarkerShape,
    pub point_color: Color,
    pub line_style: LineStyle,
    pub line_color: Color,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            point_shape: MarkerShape::Circle,
            point_color: Color::BLACK,
            line_style: LineStyle::None,
            line_color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MarkerShape {
    None,
    Dot,
    Cross,
    Plus,
    #[default]
    Circle,
    Disc,
    Square,
    Diamond,
    Star,
    Triangle,
    TriangleInverted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Points only.
    #[default]
    None,
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

/// RGB color, persisted as `#rrggbb`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color '{value}', expected #rrggbb"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Ordered samples, persisted as two parallel arrays `{ "x": [...], "y": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(try_from = "SeriesColumns", into = "SeriesColumns")]
pub struct Series(pub Vec<Sample>);

#[derive(Serialize, Deserialize)]
struct SeriesColumns {
    #[serde(default)]
    x: Vec<Real>,
    #[serde(default)]
    y: Vec<Real>,
}

impl TryFrom<SeriesColumns> for Series {
    type Error = WtError;

    fn try_from(columns: SeriesColumns) -> Result<Self, Self::Error> {
        if columns.x.len() != columns.y.len() {
            return Err(WtError::ColumnMismatch {
                what: "series x/y",
                left: columns.x.len(),
                right: columns.y.len(),
            });
        }
        Ok(Series(wt_core::samples_from_columns(&columns.x, &columns.y)))
    }
}

impl From<Series> for SeriesColumns {
    fn from(series: Series) -> Self {
        let (x, y) = wt_core::split_columns(&series.0);
        SeriesColumns { x, y }
    }
}

impl Series {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.0
    }

    pub fn times(&self) -> Vec<Real> {
        self.0.iter().map(|s| s.time).collect()
    }

    pub fn values(&self) -> Vec<Real> {
        self.0.iter().map(|s| s.value).collect()
    }
}

impl From<Vec<Sample>> for Series {
    fn from(samples: Vec<Sample>) -> Self {
        Series(samples)
    }
}

impl CurveRecord {
    pub fn simple(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        let name = name.into();
        Self {
            legend_name: name.clone(),
            name,
            x_col: None,
            y_col: None,
            primary_series: Series(samples),
            primary_style: SeriesStyle::default(),
            kind: CurveKind::Simple,
        }
    }

    /// Style of the second drawn series, if the curve has one.
    ///
    /// Stacked curves expose their production drawing as a style: scatter
    /// production is drawn with circles, step production as a bare line.
    pub fn secondary_style(&self) -> Option<SeriesStyle> {
        match &self.kind {
            CurveKind::Simple => None,
            CurveKind::Stacked(stacked) => Some(SeriesStyle {
                point_shape: match stacked.production_graph_type {
                    ProductionGraphType::Scatter => MarkerShape::Circle,
                    ProductionGraphType::Step => MarkerShape::None,
                },
                point_color: stacked.production_color,
                line_style: LineStyle::Solid,
                line_color: stacked.production_color,
            }),
            CurveKind::Derivative(derivative) => Some(derivative.derivative_style),
        }
    }

    pub fn secondary_legend_name(&self) -> Option<&str> {
        match &self.kind {
            CurveKind::Simple => None,
            CurveKind::Stacked(stacked) => Some(&stacked.secondary_legend_name),
            CurveKind::Derivative(derivative) => Some(&derivative.derivative_legend_name),
        }
    }

    /// Serialize into the structured record the project file stores.
    pub fn to_record(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn from_record(record: &serde_json::Value) -> Result<Self, serde_json::Error> {
        CurveRecord::deserialize(record)
    }
}
