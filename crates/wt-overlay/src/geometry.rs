//! Points and segments in data and pixel space.

use wt_core::Real;

/// Point in plot data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPoint {
    pub x: Real,
    pub y: Real,
}

impl DataPoint {
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: DataPoint) -> DataPoint {
        DataPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Point in widget pixels; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: Real,
    pub y: Real,
}

impl PixelPoint {
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: PixelPoint) -> Real {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Displacement from `origin` to `self`.
    pub fn delta_from(self, origin: PixelPoint) -> (Real, Real) {
        (self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(self, (dx, dy): (Real, Real)) -> PixelPoint {
        PixelPoint::new(self.x + dx, self.y + dy)
    }
}

/// Distance from `p` to the segment `s`-`e`.
///
/// The projection parameter is clamped to `[0, 1]`; a zero-length segment
/// degrades to the distance to `s`.
pub fn dist_to_segment(p: PixelPoint, s: PixelPoint, e: PixelPoint) -> Real {
    let l2 = (s.x - e.x).powi(2) + (s.y - e.y).powi(2);
    if l2 == 0.0 {
        return p.distance(s);
    }
    let t = (((p.x - s.x) * (e.x - s.x) + (p.y - s.y) * (e.y - s.y)) / l2).clamp(0.0, 1.0);
    let proj = PixelPoint::new(s.x + t * (e.x - s.x), s.y + t * (e.y - s.y));
    p.distance(proj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_segment_interior() {
        let d = dist_to_segment(
            PixelPoint::new(5.0, 3.0),
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(10.0, 0.0),
        );
        assert_eq!(d, 3.0);
    }

    #[test]
    fn distance_to_segment_clamps_past_end() {
        let d = dist_to_segment(
            PixelPoint::new(13.0, 4.0),
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(10.0, 0.0),
        );
        assert_eq!(d, 5.0);
    }

    #[test]
    fn zero_length_segment_is_point_distance() {
        let s = PixelPoint::new(1.0, 1.0);
        assert_eq!(dist_to_segment(PixelPoint::new(4.0, 5.0), s, s), 5.0);
    }

    #[test]
    fn midpoint_and_offset() {
        let m = DataPoint::new(0.0, 2.0).midpoint(DataPoint::new(4.0, 6.0));
        assert_eq!(m, DataPoint::new(2.0, 4.0));
        let p = PixelPoint::new(1.0, 1.0).offset((2.0, -1.0));
        assert_eq!(p, PixelPoint::new(3.0, 0.0));
        assert_eq!(p.delta_from(PixelPoint::new(1.0, 1.0)), (2.0, -1.0));
    }
}
