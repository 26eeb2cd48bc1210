use std::time::Duration;

use crate::{
    animation::clock::AnimationClock,
    conveyor::lane::ConveyorLane,
    foundation::core::{Point, Rect},
    mount::cell::{MediaBackend, MountOnVisible},
    visibility::{
        hysteresis::VisibilityEdge,
        observer::{ElementAllocator, ElementId, IntersectionSample, ObservationHost},
        tracker::{TrackingMode, VisibilityTracker},
    },
};

/// A running conveyor: lane geometry, a pausable clock and one cell per displayed slot.
///
/// Motion is a pure function of the clock, so hovering only freezes the clock and the lane
/// resumes from the same offset.
#[derive(Debug)]
pub struct Conveyor {
    lane: ConveyorLane,
    origin: Point,
    clock: AnimationClock,
    first_element: ElementId,
    cells: Vec<MountOnVisible>,
}

impl Conveyor {
    /// Build a conveyor whose untranslated lane starts at `origin` (page space).
    pub fn new(
        lane: ConveyorLane,
        origin: Point,
        ids: &mut ElementAllocator,
        mode: TrackingMode,
    ) -> Self {
        let size = lane.cell_size();
        let mut first_element = None;
        let cells = (0..lane.displayed_len())
            .filter_map(|i| {
                let item = lane.displayed_item(i)?.clone();
                let id = ids.next_id();
                first_element.get_or_insert(id);
                Some(MountOnVisible::new(
                    item,
                    size,
                    id,
                    VisibilityTracker::new(mode),
                ))
            })
            .collect();
        Self {
            lane,
            origin,
            clock: AnimationClock::new(),
            first_element: first_element.unwrap_or(ElementId(u64::MAX)),
            cells,
        }
    }

    /// Lane geometry.
    pub fn lane(&self) -> &ConveyorLane {
        &self.lane
    }

    /// Untranslated lane origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// All `2L` cells in display order.
    pub fn cells(&self) -> &[MountOnVisible] {
        &self.cells
    }

    /// Effective animation time.
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Current translation in pixels.
    pub fn offset_px(&self) -> f64 {
        self.lane.offset_at(self.clock.elapsed())
    }

    /// Current translation as a fraction of lane width.
    pub fn offset_fraction(&self) -> f64 {
        self.lane.offset_fraction_at(self.clock.elapsed())
    }

    /// Pointer entered (`true`) or left (`false`) the lane.
    pub fn set_hover(&mut self, hovered: bool) {
        self.clock.set_paused(hovered);
    }

    /// Return `true` while hover holds the animation.
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Feed host time progress to the clock and every cell.
    pub fn advance(&mut self, dt: Duration) {
        self.clock.advance(dt);
        for c in &mut self.cells {
            c.advance(dt);
        }
    }

    /// Page-space box of displayed cell `i` at the current offset.
    pub fn cell_rect(&self, i: usize) -> Rect {
        self.lane.cell_rect(i, self.offset_px(), self.origin)
    }

    /// Page-space box of the lane row (clip region).
    pub fn row_rect(&self, clip_width: f64) -> Rect {
        let h = self.lane.cell_size().height;
        Rect::new(0.0, self.origin.y, clip_width, self.origin.y + h)
    }

    fn index_of(&self, element: ElementId) -> Option<usize> {
        let i = element.0.checked_sub(self.first_element.0)?;
        let i = usize::try_from(i).ok()?;
        (i < self.cells.len()).then_some(i)
    }

    /// Box of the cell observed through `element`, if it belongs to this conveyor.
    pub fn rect_of(&self, element: ElementId) -> Option<Rect> {
        self.index_of(element).map(|i| self.cell_rect(i))
    }

    /// Return `true` when `element` is one of this conveyor's cells.
    pub fn owns(&self, element: ElementId) -> bool {
        self.index_of(element).is_some()
    }

    /// Start observing every cell.
    pub fn mount(&mut self, host: &mut dyn ObservationHost) {
        for c in &mut self.cells {
            c.mount(host);
        }
    }

    /// Stop observing every cell and release all media.
    pub fn unmount(&mut self, host: &mut dyn ObservationHost, backend: &mut dyn MediaBackend) {
        for c in &mut self.cells {
            c.unmount(host, backend);
        }
    }

    /// Route a sample to the owning cell.
    pub fn on_sample(
        &mut self,
        host: &mut dyn ObservationHost,
        backend: &mut dyn MediaBackend,
        element: ElementId,
        sample: IntersectionSample,
    ) -> Option<VisibilityEdge> {
        let i = self.index_of(element)?;
        self.cells[i].on_sample(host, backend, sample)
    }

    /// Mutable access to the cell observed through `element`.
    pub fn cell_mut(&mut self, element: ElementId) -> Option<&mut MountOnVisible> {
        let i = self.index_of(element)?;
        self.cells.get_mut(i)
    }

    /// Number of cells holding media.
    pub fn mounted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_mounted()).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/conveyor/motion.rs"]
mod tests;
