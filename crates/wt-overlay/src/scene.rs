//! Overlay storage, selection and edits.

use std::collections::BTreeMap;

use crate::axes::CoordinateTransform;
use crate::error::{OverlayError, OverlayResult};
use crate::geometry::DataPoint;
use crate::overlay::{Arrow, ArrowStart, CharacteristicLine, ItemRef, Part, PlotOverlay, TextLabel};
use crate::placement::{annotation_for_line, characteristic_line_endpoints};
use wt_core::{IdAllocator, OverlayId, Real};

/// A single edit produced by pointer interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayUpdate {
    MoveText { item: ItemRef, position: DataPoint },
    MoveLine { id: OverlayId, start: DataPoint, end: DataPoint },
    /// Places the arrow start and releases any anchor to a label.
    MoveArrowStart { item: ItemRef, position: DataPoint },
    MoveArrowEnd { item: ItemRef, position: DataPoint },
}

/// All overlays on one chart plus the current selection.
///
/// Ids are allocated in increasing order, so iteration follows creation order.
#[derive(Debug, Default, Clone)]
pub struct OverlayScene {
    items: BTreeMap<OverlayId, PlotOverlay>,
    ids: IdAllocator,
    selected: Option<ItemRef>,
}

impl OverlayScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: OverlayId) -> Option<&PlotOverlay> {
        self.items.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayId, &PlotOverlay)> + '_ {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn line(&self, id: OverlayId) -> Option<&CharacteristicLine> {
        self.items.get(&id).and_then(PlotOverlay::as_line)
    }

    fn line_mut(&mut self, id: OverlayId) -> OverlayResult<&mut CharacteristicLine> {
        match self.items.get_mut(&id) {
            Some(PlotOverlay::Line(line)) => Ok(line),
            Some(_) => Err(OverlayError::NotALine { id }),
            None => Err(OverlayError::UnknownItem {
                item: ItemRef::whole(id),
            }),
        }
    }

    pub fn insert(&mut self, overlay: PlotOverlay) -> OverlayId {
        let id = self.ids.allocate();
        tracing::debug!(%id, kind = overlay.kind(), "overlay added");
        self.items.insert(id, overlay);
        id
    }

    /// Add a line of `slope` centered in the current view.
    pub fn add_characteristic_line<T: CoordinateTransform + ?Sized>(
        &mut self,
        slope: Real,
        view: &T,
    ) -> OverlayId {
        let (start, end, is_log_log) = characteristic_line_endpoints(slope, view);
        self.insert(PlotOverlay::Line(CharacteristicLine {
            start,
            end,
            fixed_slope: slope,
            is_log_log,
            annotation: None,
        }))
    }

    pub fn add_text(&mut self, text: impl Into<String>, position: DataPoint) -> OverlayId {
        self.insert(PlotOverlay::Text(TextLabel::new(text, position)))
    }

    pub fn add_arrow(&mut self, start: DataPoint, end: DataPoint) -> OverlayId {
        self.insert(PlotOverlay::Arrow(Arrow::new(start, end)))
    }

    /// Attach an annotation to a line, replacing any it already has.
    pub fn annotate_line<T: CoordinateTransform + ?Sized>(
        &mut self,
        id: OverlayId,
        text: impl Into<String>,
        view: &T,
    ) -> OverlayResult<()> {
        let text = text.into();
        if text.is_empty() {
            return Err(OverlayError::InvalidArg {
                what: "annotation text must not be empty",
            });
        }
        let line = self.line_mut(id)?;
        let annotation = annotation_for_line(line, text, view);
        line.annotation = Some(annotation);
        Ok(())
    }

    /// Text label addressed by `item`, if it names one.
    pub fn label(&self, item: ItemRef) -> Option<&TextLabel> {
        match (self.items.get(&item.id)?, item.part) {
            (PlotOverlay::Text(label), Part::Whole) => Some(label),
            (PlotOverlay::Line(line), Part::AnnotationText) => {
                line.annotation.as_ref().map(|a| &a.label)
            }
            _ => None,
        }
    }

    /// Arrow addressed by `item` together with its resolved start point.
    pub fn arrow(&self, item: ItemRef) -> Option<(&Arrow, DataPoint)> {
        match (self.items.get(&item.id)?, item.part) {
            (PlotOverlay::Arrow(arrow), Part::Whole) => Some((arrow, arrow.start_point(None))),
            (PlotOverlay::Line(line), Part::AnnotationArrow) => {
                let annotation = line.annotation.as_ref()?;
                let arrow = annotation.arrow.as_ref()?;
                Some((arrow, arrow.start_point(Some(&annotation.label))))
            }
            _ => None,
        }
    }

    fn arrow_mut(&mut self, item: ItemRef) -> OverlayResult<&mut Arrow> {
        let found = match (self.items.get_mut(&item.id), item.part) {
            (Some(PlotOverlay::Arrow(arrow)), Part::Whole) => Some(arrow),
            (Some(PlotOverlay::Line(line)), Part::AnnotationArrow) => {
                line.annotation.as_mut().and_then(|a| a.arrow.as_mut())
            }
            _ => None,
        };
        found.ok_or(OverlayError::UnknownItem { item })
    }

    fn label_mut(&mut self, item: ItemRef) -> OverlayResult<&mut TextLabel> {
        let found = match (self.items.get_mut(&item.id), item.part) {
            (Some(PlotOverlay::Text(label)), Part::Whole) => Some(label),
            (Some(PlotOverlay::Line(line)), Part::AnnotationText) => {
                line.annotation.as_mut().map(|a| &mut a.label)
            }
            _ => None,
        };
        found.ok_or(OverlayError::NotText { item })
    }

    /// Every text label, standalone or owned by a line, in creation order.
    pub fn text_items(&self) -> Vec<ItemRef> {
        self.iter()
            .filter_map(|(id, item)| match item {
                PlotOverlay::Text(_) => Some(ItemRef::whole(id)),
                PlotOverlay::Line(line) if line.annotation.is_some() => {
                    Some(ItemRef::annotation_text(id))
                }
                _ => None,
            })
            .collect()
    }

    /// Every arrow, standalone or owned by a line annotation, in creation order.
    pub fn arrow_items(&self) -> Vec<ItemRef> {
        self.iter()
            .filter_map(|(id, item)| match item {
                PlotOverlay::Arrow(_) => Some(ItemRef::whole(id)),
                PlotOverlay::Line(line)
                    if line.annotation.as_ref().is_some_and(|a| a.arrow.is_some()) =>
                {
                    Some(ItemRef::annotation_arrow(id))
                }
                _ => None,
            })
            .collect()
    }

    pub fn line_ids(&self) -> Vec<OverlayId> {
        self.iter()
            .filter(|(_, item)| matches!(item, PlotOverlay::Line(_)))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn contains(&self, item: ItemRef) -> bool {
        match item.part {
            Part::Whole => self.items.contains_key(&item.id),
            Part::AnnotationText => self.label(item).is_some(),
            Part::AnnotationArrow => self.arrow(item).is_some(),
        }
    }

    pub fn selected(&self) -> Option<ItemRef> {
        self.selected
    }

    pub fn select(&mut self, item: ItemRef) -> OverlayResult<()> {
        if !self.contains(item) {
            return Err(OverlayError::UnknownItem { item });
        }
        self.selected = Some(item);
        Ok(())
    }

    pub fn deselect_all(&mut self) {
        self.selected = None;
    }

    /// Remove an item. Removing a line drops its annotation; removing an
    /// annotation label drops the annotation arrow with it.
    pub fn remove(&mut self, item: ItemRef) -> OverlayResult<()> {
        match item.part {
            Part::Whole => {
                self.items
                    .remove(&item.id)
                    .ok_or(OverlayError::UnknownItem { item })?;
            }
            Part::AnnotationText => {
                let line = self.line_mut(item.id)?;
                line.annotation
                    .take()
                    .ok_or(OverlayError::UnknownItem { item })?;
            }
            Part::AnnotationArrow => {
                let line = self.line_mut(item.id)?;
                line.annotation
                    .as_mut()
                    .and_then(|a| a.arrow.take())
                    .ok_or(OverlayError::UnknownItem { item })?;
            }
        }
        tracing::debug!(%item, "overlay removed");

        if self.selected.is_some_and(|s| !self.contains(s)) {
            self.selected = None;
        }
        Ok(())
    }

    /// Remove the selected item, if any, and return what was removed.
    pub fn delete_selected(&mut self) -> OverlayResult<Option<ItemRef>> {
        let Some(item) = self.selected.take() else {
            return Ok(None);
        };
        self.remove(item)?;
        Ok(Some(item))
    }

    /// Replace the text of a label, e.g. with the result of an edit dialog.
    pub fn set_text(&mut self, item: ItemRef, text: impl Into<String>) -> OverlayResult<()> {
        let text = text.into();
        if text.is_empty() {
            return Err(OverlayError::InvalidArg {
                what: "text must not be empty",
            });
        }
        self.label_mut(item)?.text = text;
        Ok(())
    }

    pub fn apply(&mut self, update: OverlayUpdate) -> OverlayResult<()> {
        match update {
            OverlayUpdate::MoveText { item, position } => {
                self.label_mut(item)?.position = position;
            }
            OverlayUpdate::MoveLine { id, start, end } => {
                let line = self.line_mut(id)?;
                line.start = start;
                line.end = end;
            }
            OverlayUpdate::MoveArrowStart { item, position } => {
                self.arrow_mut(item)?.start = ArrowStart::At(position);
            }
            OverlayUpdate::MoveArrowEnd { item, position } => {
                self.arrow_mut(item)?.end = position;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{AxisRange, PixelRect, Viewport};

    fn view() -> Viewport {
        Viewport::log_log(
            PixelRect::new(0.0, 0.0, 600.0, 400.0),
            AxisRange::new(1.0, 100.0),
            AxisRange::new(10.0, 1000.0),
        )
    }

    #[test]
    fn lines_keep_creation_order() {
        let mut scene = OverlayScene::new();
        let a = scene.add_characteristic_line(1.0, &view());
        let t = scene.add_text("note", DataPoint::new(5.0, 50.0));
        let b = scene.add_characteristic_line(0.0, &view());
        assert_eq!(scene.line_ids(), vec![a, b]);
        assert_eq!(scene.text_items(), vec![ItemRef::whole(t)]);
        assert!(scene.line(b).unwrap().is_log_log);
    }

    #[test]
    fn annotate_replaces_previous_annotation() {
        let mut scene = OverlayScene::new();
        let id = scene.add_characteristic_line(0.5, &view());
        scene.annotate_line(id, "first", &view()).unwrap();
        scene.annotate_line(id, "second", &view()).unwrap();
        let label = scene.label(ItemRef::annotation_text(id)).unwrap();
        assert_eq!(label.text, "second");
        assert_eq!(scene.text_items(), vec![ItemRef::annotation_text(id)]);
        assert_eq!(scene.arrow_items(), vec![ItemRef::annotation_arrow(id)]);
    }

    #[test]
    fn annotate_requires_line() {
        let mut scene = OverlayScene::new();
        let t = scene.add_text("x", DataPoint::new(1.0, 1.0));
        assert_eq!(
            scene.annotate_line(t, "k", &view()),
            Err(OverlayError::NotALine { id: t })
        );
    }

    #[test]
    fn removing_line_removes_annotation() {
        let mut scene = OverlayScene::new();
        let id = scene.add_characteristic_line(1.0, &view());
        scene.annotate_line(id, "k=1", &view()).unwrap();
        scene.select(ItemRef::whole(id)).unwrap();
        assert_eq!(scene.delete_selected().unwrap(), Some(ItemRef::whole(id)));
        assert!(scene.is_empty());
        assert!(scene.text_items().is_empty());
        assert!(scene.arrow_items().is_empty());
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn removing_annotation_text_removes_its_arrow() {
        let mut scene = OverlayScene::new();
        let id = scene.add_characteristic_line(1.0, &view());
        scene.annotate_line(id, "k=1", &view()).unwrap();
        scene.remove(ItemRef::annotation_text(id)).unwrap();
        assert!(scene.line(id).unwrap().annotation.is_none());
        assert!(scene.arrow_items().is_empty());
    }

    #[test]
    fn removing_annotation_arrow_keeps_text() {
        let mut scene = OverlayScene::new();
        let id = scene.add_characteristic_line(1.0, &view());
        scene.annotate_line(id, "k=1", &view()).unwrap();
        scene.select(ItemRef::annotation_text(id)).unwrap();
        scene.remove(ItemRef::annotation_arrow(id)).unwrap();
        assert_eq!(scene.text_items(), vec![ItemRef::annotation_text(id)]);
        assert_eq!(scene.selected(), Some(ItemRef::annotation_text(id)));
    }

    #[test]
    fn delete_without_selection_is_noop() {
        let mut scene = OverlayScene::new();
        scene.add_text("x", DataPoint::new(1.0, 1.0));
        assert_eq!(scene.delete_selected().unwrap(), None);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn set_text_on_labels_only() {
        let mut scene = OverlayScene::new();
        let t = scene.add_text("old", DataPoint::new(1.0, 1.0));
        let a = scene.add_arrow(DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0));
        scene.set_text(ItemRef::whole(t), "new").unwrap();
        assert_eq!(scene.label(ItemRef::whole(t)).unwrap().text, "new");
        assert!(matches!(
            scene.set_text(ItemRef::whole(a), "nope"),
            Err(OverlayError::NotText { .. })
        ));
        assert!(scene.set_text(ItemRef::whole(t), "").is_err());
    }

    #[test]
    fn moving_arrow_start_releases_anchor() {
        let mut scene = OverlayScene::new();
        let id = scene.add_characteristic_line(1.0, &view());
        scene.annotate_line(id, "k=1", &view()).unwrap();
        let item = ItemRef::annotation_arrow(id);
        assert!(scene.arrow(item).unwrap().0.is_anchored());

        let to = DataPoint::new(3.0, 300.0);
        scene.apply(OverlayUpdate::MoveArrowStart { item, position: to }).unwrap();
        let (arrow, start) = scene.arrow(item).unwrap();
        assert!(!arrow.is_anchored());
        assert_eq!(start, to);
    }
}
