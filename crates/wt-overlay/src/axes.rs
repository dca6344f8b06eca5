//! Axis description and the coordinate transform collaborator.
//!
//! The renderer owns the real axes. Overlay code only needs to map between
//! pixels and data, know each axis range and scale, and measure how far the
//! cursor is from a text label. Those needs are captured by
//! [`CoordinateTransform`] and [`PlotSurface`].

use crate::geometry::{DataPoint, PixelPoint};
use crate::overlay::TextLabel;
use wt_core::Real;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisScale {
    #[default]
    Linear,
    Logarithmic,
}

/// Visible data range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRange {
    pub lower: Real,
    pub upper: Real,
}

impl AxisRange {
    pub const fn new(lower: Real, upper: Real) -> Self {
        Self { lower, upper }
    }

    pub fn size(&self) -> Real {
        self.upper - self.lower
    }

    /// Visual center of the range: geometric mean on a log axis, arithmetic
    /// mean otherwise.
    ///
    /// A log range that reaches zero or below has no geometric mean and falls
    /// back to the arithmetic one.
    pub fn center(&self, scale: AxisScale) -> Real {
        match scale {
            AxisScale::Logarithmic if self.lower > 0.0 && self.upper > 0.0 => {
                (self.lower * self.upper).sqrt()
            }
            _ => (self.lower + self.upper) / 2.0,
        }
    }
}

/// Pixel/data conversion for one plot area.
pub trait CoordinateTransform {
    fn pixel_to_data(&self, axis: Axis, px: Real) -> Real;

    fn data_to_pixel(&self, axis: Axis, value: Real) -> Real;

    fn range(&self, axis: Axis) -> AxisRange;

    fn scale(&self, axis: Axis) -> AxisScale;

    fn to_pixel(&self, point: DataPoint) -> PixelPoint {
        PixelPoint::new(
            self.data_to_pixel(Axis::X, point.x),
            self.data_to_pixel(Axis::Y, point.y),
        )
    }

    fn to_data(&self, point: PixelPoint) -> DataPoint {
        DataPoint::new(
            self.pixel_to_data(Axis::X, point.x),
            self.pixel_to_data(Axis::Y, point.y),
        )
    }

    fn is_log_log(&self) -> bool {
        self.scale(Axis::X) == AxisScale::Logarithmic
            && self.scale(Axis::Y) == AxisScale::Logarithmic
    }
}

/// A transform that can also hit-test rendered text.
pub trait PlotSurface: CoordinateTransform {
    /// Pixel distance from `cursor` to the rendered label.
    ///
    /// Renderers that know the text's bounding box should override this; the
    /// default measures to the label anchor.
    fn text_distance(&self, label: &TextLabel, cursor: PixelPoint) -> Real {
        self.to_pixel(label.position).distance(cursor)
    }
}

/// Plot area in widget pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: Real,
    pub top: Real,
    pub width: Real,
    pub height: Real,
}

impl PixelRect {
    pub const fn new(left: Real, top: Real, width: Real, height: Real) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Self-contained [`PlotSurface`]: a pixel rectangle plus two scaled axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub rect: PixelRect,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}

impl Viewport {
    pub fn new(rect: PixelRect, x_range: AxisRange, y_range: AxisRange) -> Self {
        Self {
            rect,
            x_range,
            y_range,
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
        }
    }

    pub fn with_scales(mut self, x_scale: AxisScale, y_scale: AxisScale) -> Self {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self
    }

    pub fn log_log(rect: PixelRect, x_range: AxisRange, y_range: AxisRange) -> Self {
        Self::new(rect, x_range, y_range)
            .with_scales(AxisScale::Logarithmic, AxisScale::Logarithmic)
    }

    fn axis(&self, axis: Axis) -> (AxisRange, AxisScale, Real, Real) {
        match axis {
            Axis::X => (self.x_range, self.x_scale, self.rect.left, self.rect.width),
            Axis::Y => (self.y_range, self.y_scale, self.rect.top, self.rect.height),
        }
    }
}

/// Position of `value` within `range` as a fraction, in the axis' scale.
fn fraction(range: AxisRange, scale: AxisScale, value: Real) -> Real {
    match scale {
        AxisScale::Linear => {
            let size = range.size();
            if size == 0.0 { 0.0 } else { (value - range.lower) / size }
        }
        AxisScale::Logarithmic => {
            let span = range.upper.ln() - range.lower.ln();
            if span == 0.0 || !span.is_finite() {
                0.0
            } else {
                (value.ln() - range.lower.ln()) / span
            }
        }
    }
}

fn from_fraction(range: AxisRange, scale: AxisScale, f: Real) -> Real {
    match scale {
        AxisScale::Linear => range.lower + f * range.size(),
        AxisScale::Logarithmic => {
            (range.lower.ln() + f * (range.upper.ln() - range.lower.ln())).exp()
        }
    }
}

impl CoordinateTransform for Viewport {
    fn pixel_to_data(&self, axis: Axis, px: Real) -> Real {
        let (range, scale, origin, extent) = self.axis(axis);
        if extent == 0.0 {
            return range.lower;
        }
        let f = match axis {
            Axis::X => (px - origin) / extent,
            Axis::Y => 1.0 - (px - origin) / extent,
        };
        from_fraction(range, scale, f)
    }

    fn data_to_pixel(&self, axis: Axis, value: Real) -> Real {
        let (range, scale, origin, extent) = self.axis(axis);
        let f = fraction(range, scale, value);
        match axis {
            Axis::X => origin + f * extent,
            Axis::Y => origin + (1.0 - f) * extent,
        }
    }

    fn range(&self, axis: Axis) -> AxisRange {
        self.axis(axis).0
    }

    fn scale(&self, axis: Axis) -> AxisScale {
        self.axis(axis).1
    }
}

impl PlotSurface for Viewport {}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Real, b: Real) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn range_center() {
        let r = AxisRange::new(1.0, 100.0);
        assert!(close(r.center(AxisScale::Logarithmic), 10.0));
        assert_eq!(r.center(AxisScale::Linear), 50.5);
        assert_eq!(AxisRange::new(0.0, 10.0).center(AxisScale::Logarithmic), 5.0);
        assert_eq!(r.size(), 99.0);
    }

    #[test]
    fn linear_mapping_inverts_y() {
        let vp = Viewport::new(
            PixelRect::new(0.0, 0.0, 100.0, 50.0),
            AxisRange::new(0.0, 10.0),
            AxisRange::new(0.0, 5.0),
        );
        assert_eq!(vp.to_pixel(DataPoint::new(0.0, 0.0)), PixelPoint::new(0.0, 50.0));
        assert_eq!(vp.to_pixel(DataPoint::new(10.0, 5.0)), PixelPoint::new(100.0, 0.0));
        assert_eq!(vp.to_data(PixelPoint::new(50.0, 25.0)), DataPoint::new(5.0, 2.5));
        assert!(!vp.is_log_log());
    }

    #[test]
    fn log_mapping_round_trips() {
        let vp = Viewport::log_log(
            PixelRect::new(10.0, 20.0, 400.0, 300.0),
            AxisRange::new(1.0, 1000.0),
            AxisRange::new(0.1, 100.0),
        );
        assert!(vp.is_log_log());
        // one decade per third of the width
        assert!(close(vp.data_to_pixel(Axis::X, 10.0), 10.0 + 400.0 / 3.0));
        let p = DataPoint::new(42.0, 3.5);
        let back = vp.to_data(vp.to_pixel(p));
        assert!(close(back.x, p.x) && close(back.y, p.y));
    }

    #[test]
    fn default_text_distance_uses_anchor() {
        let vp = Viewport::new(
            PixelRect::new(0.0, 0.0, 100.0, 100.0),
            AxisRange::new(0.0, 100.0),
            AxisRange::new(0.0, 100.0),
        );
        let label = TextLabel::new("k=1", DataPoint::new(50.0, 50.0));
        assert_eq!(vp.text_distance(&label, PixelPoint::new(53.0, 54.0)), 5.0);
    }
}
