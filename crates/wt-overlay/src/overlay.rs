//! Overlay items drawn on top of a chart.

use crate::geometry::DataPoint;
use core::fmt;
use wt_core::{OverlayId, Real};

/// Free text anchored at a data position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub position: DataPoint,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, position: DataPoint) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// Where an arrow starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowStart {
    /// Follows the label of the owning annotation.
    AnchoredToText,
    At(DataPoint),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub start: ArrowStart,
    pub end: DataPoint,
}

impl Arrow {
    pub fn new(start: DataPoint, end: DataPoint) -> Self {
        Self {
            start: ArrowStart::At(start),
            end,
        }
    }

    /// Resolved start position. An anchored start sits on `anchor`; without an
    /// anchor it collapses onto the tip.
    pub fn start_point(&self, anchor: Option<&TextLabel>) -> DataPoint {
        match (self.start, anchor) {
            (ArrowStart::At(p), _) => p,
            (ArrowStart::AnchoredToText, Some(label)) => label.position,
            (ArrowStart::AnchoredToText, None) => self.end,
        }
    }

    pub fn is_anchored(&self) -> bool {
        self.start == ArrowStart::AnchoredToText
    }
}

/// Label plus optional arrow pointing at a characteristic line.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub label: TextLabel,
    pub arrow: Option<Arrow>,
}

impl Annotation {
    pub fn arrow_start(&self) -> Option<DataPoint> {
        self.arrow.as_ref().map(|a| a.start_point(Some(&self.label)))
    }
}

/// Straight reference line of fixed slope used to identify flow regimes.
///
/// On log-log axes the slope is a power-law exponent (`y ∝ x^k`); otherwise
/// it is a visual slope scaled by the axis ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicLine {
    pub start: DataPoint,
    pub end: DataPoint,
    pub fixed_slope: Real,
    pub is_log_log: bool,
    pub annotation: Option<Annotation>,
}

impl CharacteristicLine {
    pub fn midpoint(&self) -> DataPoint {
        self.start.midpoint(self.end)
    }

    /// Endpoint opposite the one being moved.
    pub fn anchor(&self, moving_start: bool) -> DataPoint {
        if moving_start { self.end } else { self.start }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotOverlay {
    Line(CharacteristicLine),
    Text(TextLabel),
    Arrow(Arrow),
}

impl PlotOverlay {
    pub fn kind(&self) -> &'static str {
        match self {
            PlotOverlay::Line(_) => "line",
            PlotOverlay::Text(_) => "text",
            PlotOverlay::Arrow(_) => "arrow",
        }
    }

    pub fn as_line(&self) -> Option<&CharacteristicLine> {
        match self {
            PlotOverlay::Line(line) => Some(line),
            _ => None,
        }
    }
}

/// Which part of an overlay an [`ItemRef`] addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// The overlay itself.
    Whole,
    /// Label of the annotation owned by a line.
    AnnotationText,
    /// Arrow of the annotation owned by a line.
    AnnotationArrow,
}

/// Addresses a selectable thing in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub id: OverlayId,
    pub part: Part,
}

impl ItemRef {
    pub fn whole(id: OverlayId) -> Self {
        Self {
            id,
            part: Part::Whole,
        }
    }

    pub fn annotation_text(id: OverlayId) -> Self {
        Self {
            id,
            part: Part::AnnotationText,
        }
    }

    pub fn annotation_arrow(id: OverlayId) -> Self {
        Self {
            id,
            part: Part::AnnotationArrow,
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.part {
            Part::Whole => write!(f, "{}", self.id),
            Part::AnnotationText => write!(f, "{}/text", self.id),
            Part::AnnotationArrow => write!(f, "{}/arrow", self.id),
        }
    }
}
