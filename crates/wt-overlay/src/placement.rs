//! Initial placement of characteristic lines and their annotations, and the
//! slope-preserving endpoint constraint used while stretching a line.

use crate::axes::{Axis, AxisScale, CoordinateTransform};
use crate::geometry::DataPoint;
use crate::overlay::{Annotation, Arrow, ArrowStart, CharacteristicLine, TextLabel};
use wt_core::Real;

/// Placement constants.
pub struct PlacementConfig;

impl PlacementConfig {
    /// Log-log lines span `center / LOG_SPAN ..= center * LOG_SPAN` in x.
    pub const LOG_SPAN: Real = 3.0;
    /// Linear lines start out this fraction of the x range wide.
    pub const LINEAR_WIDTH_FRACTION: Real = 0.15;
    /// Linear lines taller than this fraction of the y range are shrunk...
    pub const MAX_HEIGHT_FRACTION: Real = 0.5;
    /// ...to this fraction.
    pub const CLAMPED_HEIGHT_FRACTION: Real = 0.2;
    /// Slopes at or below this magnitude count as horizontal.
    pub const FLAT_SLOPE: Real = 1e-9;
    /// Smallest x a log-log endpoint may be dragged to.
    pub const MIN_LOG_X: Real = 1e-5;
    /// Annotation label height above the line midpoint on a log y axis (factor).
    pub const LOG_LABEL_FACTOR: Real = 1.5;
    /// Annotation label height above the line midpoint on a linear y axis
    /// (fraction of the y range).
    pub const LINEAR_LABEL_FRACTION: Real = 0.05;
    /// Tolerance when naming a flow regime from a slope.
    pub const REGIME_TOLERANCE: Real = 0.01;
}

/// Ratio of y range to x range; keeps linear slopes visually consistent
/// across zoom levels.
fn range_scale<T: CoordinateTransform + ?Sized>(view: &T) -> Real {
    let x_size = view.range(Axis::X).size();
    if x_size == 0.0 {
        return 0.0;
    }
    view.range(Axis::Y).size() / x_size
}

/// Endpoints of a new characteristic line of `slope` centered in the view.
///
/// Returns `(start, end, is_log_log)`. With one log and one linear axis no
/// slope is meaningful and the line is laid horizontally across the x range.
pub fn characteristic_line_endpoints<T: CoordinateTransform + ?Sized>(
    slope: Real,
    view: &T,
) -> (DataPoint, DataPoint, bool) {
    let x_range = view.range(Axis::X);
    let y_range = view.range(Axis::Y);
    let x_scale = view.scale(Axis::X);
    let y_scale = view.scale(Axis::Y);
    let cx = x_range.center(x_scale);
    let cy = y_range.center(y_scale);

    match (x_scale, y_scale) {
        (AxisScale::Logarithmic, AxisScale::Logarithmic) => {
            let x1 = cx / PlacementConfig::LOG_SPAN;
            let x2 = cx * PlacementConfig::LOG_SPAN;
            let y1 = cy * (x1 / cx).powf(slope);
            let y2 = cy * (x2 / cx).powf(slope);
            (DataPoint::new(x1, y1), DataPoint::new(x2, y2), true)
        }
        (AxisScale::Linear, AxisScale::Linear) => {
            let scale = range_scale(view);
            let mut dx = x_range.size() * PlacementConfig::LINEAR_WIDTH_FRACTION;
            let mut dy = slope * dx * scale;

            if dy.abs() > y_range.size() * PlacementConfig::MAX_HEIGHT_FRACTION {
                let sign = if slope >= 0.0 { 1.0 } else { -1.0 };
                dy = y_range.size() * PlacementConfig::CLAMPED_HEIGHT_FRACTION * sign;
                dx = if slope.abs() > PlacementConfig::FLAT_SLOPE {
                    dy / (slope * scale)
                } else {
                    x_range.size() * PlacementConfig::CLAMPED_HEIGHT_FRACTION
                };
            }

            (
                DataPoint::new(cx - dx / 2.0, cy - dy / 2.0),
                DataPoint::new(cx + dx / 2.0, cy + dy / 2.0),
                false,
            )
        }
        _ => {
            tracing::debug!(slope, "mixed axis scales, placing horizontal line");
            (
                DataPoint::new(x_range.lower, cy),
                DataPoint::new(x_range.upper, cy),
                false,
            )
        }
    }
}

/// New position of the moving endpoint when its x is dragged to `mouse_x`,
/// keeping the line's slope about the fixed endpoint.
pub fn constrain_endpoint<T: CoordinateTransform + ?Sized>(
    line: &CharacteristicLine,
    moving_start: bool,
    mouse_x: Real,
    view: &T,
) -> DataPoint {
    let fixed = line.anchor(moving_start);
    let k = line.fixed_slope;

    if line.is_log_log {
        let x_fixed = if fixed.x <= 0.0 {
            PlacementConfig::MIN_LOG_X
        } else {
            fixed.x
        };
        let x_new = if mouse_x <= 0.0 {
            PlacementConfig::MIN_LOG_X
        } else {
            mouse_x
        };
        DataPoint::new(x_new, fixed.y * (x_new / x_fixed).powf(k))
    } else {
        let y_new = fixed.y + k * range_scale(view) * (mouse_x - fixed.x);
        DataPoint::new(mouse_x, y_new)
    }
}

/// Suggested label for a line of `slope`, naming the flow regime it marks.
pub fn default_annotation_text(slope: Real) -> String {
    let near = |target: Real| (slope - target).abs() < PlacementConfig::REGIME_TOLERANCE;
    if near(0.0) {
        return "radial flow".to_string();
    }
    let regime = if near(1.0) {
        Some("wellbore storage")
    } else if near(0.5) {
        Some("linear flow")
    } else if near(0.25) {
        Some("bilinear flow")
    } else {
        None
    };
    match regime {
        Some(name) => format!("k={slope} ({name})"),
        None => format!("k={slope}"),
    }
}

/// Annotation for `line`: the label sits above the line midpoint and an
/// arrow runs from the label to the midpoint.
pub fn annotation_for_line<T: CoordinateTransform + ?Sized>(
    line: &CharacteristicLine,
    text: impl Into<String>,
    view: &T,
) -> Annotation {
    let mid = line.midpoint();
    let label_y = match view.scale(Axis::Y) {
        AxisScale::Logarithmic => mid.y * PlacementConfig::LOG_LABEL_FACTOR,
        AxisScale::Linear => {
            mid.y + view.range(Axis::Y).size() * PlacementConfig::LINEAR_LABEL_FRACTION
        }
    };
    Annotation {
        label: TextLabel::new(text, DataPoint::new(mid.x, label_y)),
        arrow: Some(Arrow {
            start: ArrowStart::AnchoredToText,
            end: mid,
        }),
    }
}
