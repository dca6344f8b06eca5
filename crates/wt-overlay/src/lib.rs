//! Plot overlays for well-test charts: characteristic lines, annotations and
//! the pointer interaction that edits them.
//!
//! # Architecture
//!
//! - Overlays live in data coordinates inside an [`OverlayScene`]
//! - Pixel/data conversion is delegated to a [`CoordinateTransform`] supplied by
//!   the rendering side; [`Viewport`] is a self-contained implementation
//! - Pointer handling is a pure [`transition`] function returning [`Effect`]s;
//!   [`InteractionController`] applies overlay updates and hands the rest back
//!   to the platform adapter
//!
//! Nothing here draws. A renderer reads the scene and reacts to effects such
//! as [`Effect::Replot`].

pub mod axes;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod overlay;
pub mod placement;
pub mod scene;

pub use axes::{Axis, AxisRange, AxisScale, CoordinateTransform, PixelRect, PlotSurface, Viewport};
pub use error::{OverlayError, OverlayResult};
pub use geometry::{DataPoint, PixelPoint, dist_to_segment};
pub use interaction::{
    Effect, InteractionConfig, InteractionController, InteractionMode, InteractionState,
    MouseButton, PointerEvent, transition,
};
pub use overlay::{
    Annotation, Arrow, ArrowStart, CharacteristicLine, ItemRef, Part, PlotOverlay, TextLabel,
};
pub use placement::{
    PlacementConfig, annotation_for_line, characteristic_line_endpoints, constrain_endpoint,
    default_annotation_text,
};
pub use scene::{OverlayScene, OverlayUpdate};
