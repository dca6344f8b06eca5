//! Pointer interaction over an overlay scene.
//!
//! [`transition`] is a pure function from (state, event, scene, surface) to a
//! new state and a list of [`Effect`]s. It never mutates the scene: overlay
//! edits come back as [`Effect::Update`] and are applied by
//! [`InteractionController`] or any other driver.
//!
//! Press hit-testing checks, in order:
//! 1. text labels (standalone and annotation labels)
//! 2. arrow endpoints (start before end)
//! 3. characteristic-line endpoints (start before end), then the line body

use crate::axes::PlotSurface;
use crate::geometry::{DataPoint, PixelPoint, dist_to_segment};
use crate::overlay::ItemRef;
use crate::placement::constrain_endpoint;
use crate::scene::{OverlayScene, OverlayUpdate};
use wt_core::{OverlayId, Real};

/// Hit-test tolerances in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InteractionConfig {
    pub hit_tolerance_px: Real,
    pub double_click_tolerance_px: Real,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance_px: 8.0,
            double_click_tolerance_px: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    None,
    DraggingLine(OverlayId),
    DraggingLineStart(OverlayId),
    DraggingLineEnd(OverlayId),
    DraggingText(ItemRef),
    DraggingArrowStart(ItemRef),
    DraggingArrowEnd(ItemRef),
}

impl InteractionMode {
    pub fn is_dragging(&self) -> bool {
        *self != InteractionMode::None
    }

    /// Item the drag operates on.
    pub fn item(&self) -> Option<ItemRef> {
        match *self {
            InteractionMode::None => None,
            InteractionMode::DraggingLine(id)
            | InteractionMode::DraggingLineStart(id)
            | InteractionMode::DraggingLineEnd(id) => Some(ItemRef::whole(id)),
            InteractionMode::DraggingText(item)
            | InteractionMode::DraggingArrowStart(item)
            | InteractionMode::DraggingArrowEnd(item) => Some(item),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    pub mode: InteractionMode,
    /// Cursor position at the last press or move.
    pub last_pos: PixelPoint,
    /// Item picked by the last press; survives release.
    pub active: Option<ItemRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { pos: PixelPoint, button: MouseButton },
    Move { pos: PixelPoint, primary_held: bool },
    Release { pos: PixelPoint, button: MouseButton },
    DoubleClick { pos: PixelPoint, button: MouseButton },
}

/// Something the driver or platform adapter has to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Update(OverlayUpdate),
    Select(ItemRef),
    DeselectAll,
    /// Turn off the chart's own pan/zoom/select while an overlay is dragged.
    SuspendDefaultInteractions,
    RestoreDefaultInteractions,
    /// Ask the user for new text for a label.
    EditText(ItemRef),
    Replot,
}

pub fn transition<S: PlotSurface + ?Sized>(
    state: &InteractionState,
    event: &PointerEvent,
    scene: &OverlayScene,
    surface: &S,
    config: &InteractionConfig,
) -> (InteractionState, Vec<Effect>) {
    match *event {
        PointerEvent::Press { pos, button } => {
            if button != MouseButton::Primary {
                return (*state, Vec::new());
            }
            press(pos, scene, surface, config)
        }
        PointerEvent::Move { pos, primary_held } => {
            if !state.mode.is_dragging() || !primary_held {
                return (*state, Vec::new());
            }
            drag(state, pos, scene, surface)
        }
        PointerEvent::Release { .. } => {
            let next = InteractionState {
                mode: InteractionMode::None,
                ..*state
            };
            let effects = if state.active.is_none() {
                vec![Effect::RestoreDefaultInteractions]
            } else {
                Vec::new()
            };
            (next, effects)
        }
        PointerEvent::DoubleClick { pos, button } => {
            if button != MouseButton::Primary {
                return (*state, Vec::new());
            }
            let effects = text_hit(pos, scene, surface, config.double_click_tolerance_px)
                .map(|item| vec![Effect::EditText(item)])
                .unwrap_or_default();
            (*state, effects)
        }
    }
}

fn text_hit<S: PlotSurface + ?Sized>(
    pos: PixelPoint,
    scene: &OverlayScene,
    surface: &S,
    tolerance: Real,
) -> Option<ItemRef> {
    scene.text_items().into_iter().find(|&item| {
        scene
            .label(item)
            .is_some_and(|label| surface.text_distance(label, pos) < tolerance)
    })
}

fn press<S: PlotSurface + ?Sized>(
    pos: PixelPoint,
    scene: &OverlayScene,
    surface: &S,
    config: &InteractionConfig,
) -> (InteractionState, Vec<Effect>) {
    let tolerance = config.hit_tolerance_px;
    let start_drag = |mode: InteractionMode| InteractionState {
        mode,
        last_pos: pos,
        active: mode.item(),
    };

    if let Some(item) = text_hit(pos, scene, surface, tolerance) {
        return (
            start_drag(InteractionMode::DraggingText(item)),
            vec![
                Effect::DeselectAll,
                Effect::Select(item),
                Effect::SuspendDefaultInteractions,
                Effect::Replot,
            ],
        );
    }

    for item in scene.arrow_items() {
        let Some((arrow, start)) = scene.arrow(item) else {
            continue;
        };
        let mode = if surface.to_pixel(start).distance(pos) < tolerance {
            InteractionMode::DraggingArrowStart(item)
        } else if surface.to_pixel(arrow.end).distance(pos) < tolerance {
            InteractionMode::DraggingArrowEnd(item)
        } else {
            continue;
        };
        return (start_drag(mode), vec![Effect::SuspendDefaultInteractions]);
    }

    for id in scene.line_ids() {
        let Some(line) = scene.line(id) else {
            continue;
        };
        let s = surface.to_pixel(line.start);
        let e = surface.to_pixel(line.end);
        let mode = if s.distance(pos) < tolerance {
            InteractionMode::DraggingLineStart(id)
        } else if e.distance(pos) < tolerance {
            InteractionMode::DraggingLineEnd(id)
        } else if dist_to_segment(pos, s, e) < tolerance {
            InteractionMode::DraggingLine(id)
        } else {
            continue;
        };
        return (
            start_drag(mode),
            vec![
                Effect::DeselectAll,
                Effect::Select(ItemRef::whole(id)),
                Effect::SuspendDefaultInteractions,
                Effect::Replot,
            ],
        );
    }

    let idle = InteractionState {
        mode: InteractionMode::None,
        last_pos: pos,
        active: None,
    };
    (
        idle,
        vec![
            Effect::RestoreDefaultInteractions,
            Effect::DeselectAll,
            Effect::Replot,
        ],
    )
}

fn drag<S: PlotSurface + ?Sized>(
    state: &InteractionState,
    pos: PixelPoint,
    scene: &OverlayScene,
    surface: &S,
) -> (InteractionState, Vec<Effect>) {
    let delta = pos.delta_from(state.last_pos);
    let shift = |p: DataPoint| surface.to_data(surface.to_pixel(p).offset(delta));
    let mouse = surface.to_data(pos);
    let mut updates = Vec::new();

    match state.mode {
        InteractionMode::None => {}
        InteractionMode::DraggingText(item) => {
            if let Some(label) = scene.label(item) {
                updates.push(OverlayUpdate::MoveText {
                    item,
                    position: shift(label.position),
                });
            }
        }
        InteractionMode::DraggingArrowStart(item) => {
            if scene.arrow(item).is_some() {
                updates.push(OverlayUpdate::MoveArrowStart {
                    item,
                    position: mouse,
                });
            }
        }
        InteractionMode::DraggingArrowEnd(item) => {
            if scene.arrow(item).is_some() {
                updates.push(OverlayUpdate::MoveArrowEnd {
                    item,
                    position: mouse,
                });
            }
        }
        InteractionMode::DraggingLine(id) => {
            if let Some(line) = scene.line(id) {
                updates.push(OverlayUpdate::MoveLine {
                    id,
                    start: shift(line.start),
                    end: shift(line.end),
                });
                if let Some(annotation) = &line.annotation {
                    updates.push(OverlayUpdate::MoveText {
                        item: ItemRef::annotation_text(id),
                        position: shift(annotation.label.position),
                    });
                    if let Some(arrow) = &annotation.arrow {
                        updates.push(OverlayUpdate::MoveArrowEnd {
                            item: ItemRef::annotation_arrow(id),
                            position: shift(arrow.end),
                        });
                    }
                }
            }
        }
        InteractionMode::DraggingLineStart(id) | InteractionMode::DraggingLineEnd(id) => {
            if let Some(line) = scene.line(id) {
                let moving_start = matches!(state.mode, InteractionMode::DraggingLineStart(_));
                let moved = constrain_endpoint(line, moving_start, mouse.x, surface);
                let (start, end) = if moving_start {
                    (moved, line.end)
                } else {
                    (line.start, moved)
                };
                updates.push(OverlayUpdate::MoveLine { id, start, end });
            }
        }
    }

    let mut effects: Vec<Effect> = updates.into_iter().map(Effect::Update).collect();
    effects.push(Effect::Replot);
    let next = InteractionState {
        last_pos: pos,
        ..*state
    };
    (next, effects)
}

/// Stateful driver: keeps the interaction state, applies overlay updates and
/// selection to the scene, and returns the effects the platform must handle.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    config: InteractionConfig,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: InteractionState::default(),
            config,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Feed one pointer event. Returns every effect except overlay updates,
    /// which have already been applied to `scene`.
    pub fn handle<S: PlotSurface + ?Sized>(
        &mut self,
        event: &PointerEvent,
        scene: &mut OverlayScene,
        surface: &S,
    ) -> Vec<Effect> {
        let (next, effects) = transition(&self.state, event, scene, surface, &self.config);
        self.state = next;

        let mut remaining = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::Update(update) => {
                    if let Err(err) = scene.apply(update) {
                        tracing::warn!(%err, "overlay update rejected");
                    }
                }
                Effect::Select(item) => {
                    if let Err(err) = scene.select(item) {
                        tracing::warn!(%err, "selection rejected");
                    }
                    remaining.push(effect);
                }
                Effect::DeselectAll => {
                    scene.deselect_all();
                    remaining.push(effect);
                }
                other => remaining.push(other),
            }
        }
        remaining
    }
}
