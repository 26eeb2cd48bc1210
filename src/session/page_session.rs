use std::time::Duration;

use crate::{
    animation::{
        clock::loop_phase,
        transition::{RevealTransition, TransitionSpec},
    },
    conveyor::motion::Conveyor,
    foundation::{
        core::{Rect, Vec2, Viewport},
        error::{ReelError, ReelResult},
    },
    media::item::{AssetRef, CacheBust, CacheBustMode, MediaItem},
    mount::{
        cell::{DecoderPool, MediaBackend, MediaHandle, MountOnVisible},
        slot::{LoadState, MediaSlot},
    },
    page::{
        gif_layout::GifLayoutConfig,
        model::{ImageBox, Page},
    },
    session::snapshot::{EagerView, LaneView, OverlayView, PageSnapshot, RevealView, RowView},
    visibility::{
        observer::{ElementAllocator, ElementId, IntersectionSample, ViewportObserver},
        tracker::VisibilityTracker,
    },
};

/// Options for [`PageSession::new`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
    /// Initial scroll position.
    pub scroll_y: f64,
    /// Cache-bust token source, resolved once per session.
    pub cache_bust: CacheBustMode,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            scroll_y: 0.0,
            cache_bust: CacheBustMode::default(),
        }
    }
}

/// Counters describing the live resources of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SessionStats {
    /// Elements registered with the observation host.
    pub observed: usize,
    /// Media handles currently held.
    pub live_media: usize,
    /// High-water mark of `live_media`.
    pub peak_media: usize,
    /// Handles acquired over the session lifetime.
    pub acquired_total: u64,
    /// Conveyor cells holding media.
    pub mounted_cells: usize,
    /// Reveal-stack items currently revealed.
    pub revealed_blocks: usize,
    /// Slots whose data arrived.
    pub loaded: usize,
    /// Slots whose load failed; their spinner never clears.
    pub stalled: usize,
}

#[derive(Debug)]
struct RevealItem {
    element: ElementId,
    image: ImageBox,
    z: usize,
    tracker: VisibilityTracker,
    transition: RevealTransition,
    spec: TransitionSpec,
}

impl RevealItem {
    fn observed_rect(&self) -> Rect {
        self.image.rect + Vec2::new(0.0, self.transition.style().translate_y_px)
    }
}

#[derive(Debug)]
struct EagerMedia {
    element: ElementId,
    rect: Rect,
    handle: MediaHandle,
    slot: MediaSlot,
}

impl EagerMedia {
    fn acquire(
        element: ElementId,
        item: MediaItem,
        rect: Rect,
        backend: &mut dyn MediaBackend,
    ) -> Self {
        let handle = backend.acquire(&item, rect.size());
        Self {
            element,
            rect,
            handle,
            slot: MediaSlot::new(item),
        }
    }

    fn view(&self) -> EagerView {
        EagerView {
            element: self.element,
            item: self.slot.item().clone(),
            rect: self.rect,
            opacity: self.slot.opacity(),
            spinner: self.slot.shows_spinner(),
        }
    }
}

#[derive(Debug)]
struct Row {
    label: String,
    round: bool,
    media: Vec<EagerMedia>,
}

#[derive(Debug)]
struct Overlay {
    media: EagerMedia,
    config: GifLayoutConfig,
}

enum Target {
    Reveal(usize),
    Conveyor(usize),
}

/// A live page: observation host, decoder pool and every tracked component.
///
/// Scrolling and time progress are pushed in; each push samples the observer and routes
/// samples to their trackers before returning, so a [`snapshot`](Self::snapshot) always
/// reflects a settled state. Dropping the session unmounts everything.
#[derive(Debug)]
pub struct PageSession {
    page: Page,
    cache_bust: CacheBust,
    viewport: Viewport,
    elapsed: Duration,
    host: ViewportObserver,
    pool: DecoderPool,
    reveal: Vec<RevealItem>,
    conveyors: Vec<Conveyor>,
    backdrop: Option<EagerMedia>,
    rows: Vec<Row>,
    overlays: Vec<Overlay>,
}

impl PageSession {
    /// Validate `page`, build and mount every component, then apply overlay patches.
    #[tracing::instrument(skip(page))]
    pub fn new(page: Page, opts: SessionOpts) -> ReelResult<Self> {
        page.validate()?;
        let viewport = Viewport::new(opts.scroll_y, opts.viewport_width, opts.viewport_height)?;
        let cache_bust = opts.cache_bust.resolve();
        let container = f64::from(page.canvas.width);
        let mut ids = ElementAllocator::new();
        let mut host = ViewportObserver::new();
        let mut pool = DecoderPool::new();

        let stack = &page.reveal;
        let rect = stack.item_rect(container);
        let mut reveal = Vec::with_capacity(stack.images.len());
        for (i, asset) in stack.images.iter().enumerate() {
            let spec = stack.item_transition(i);
            let mut item = RevealItem {
                element: ids.next_id(),
                image: ImageBox {
                    asset: asset.clone(),
                    rect,
                },
                z: stack.z_index(i),
                tracker: VisibilityTracker::new(stack.tracking),
                transition: RevealTransition::new(spec, stack.rise_px),
                spec,
            };
            item.tracker.mount(&mut host, Some(item.element));
            reveal.push(item);
        }

        let mut conveyors = Vec::new();
        for (i, lane) in page.conveyors.build_lanes(&cache_bust)?.into_iter().enumerate() {
            let mut c = Conveyor::new(
                lane,
                page.conveyors.lane_origin(i),
                &mut ids,
                page.conveyors.tracking,
            );
            c.mount(&mut host);
            conveyors.push(c);
        }

        let backdrop = page.backdrop.as_ref().map(|b| {
            EagerMedia::acquire(
                ids.next_id(),
                MediaItem::new(&b.asset, &cache_bust),
                b.rect,
                &mut pool,
            )
        });

        let mut rows = Vec::with_capacity(page.rows.len());
        for row in &page.rows {
            let rects = row.cell_rects(container)?;
            let media = row
                .names
                .iter()
                .zip(rects)
                .map(|(name, rect)| {
                    let item = MediaItem::new(&AssetRef::Video(name.clone()), &cache_bust);
                    EagerMedia::acquire(ids.next_id(), item, rect, &mut pool)
                })
                .collect();
            rows.push(Row {
                label: row.label.clone(),
                round: row.round,
                media,
            });
        }

        let grid = &page.overlays;
        let mut overlays: Vec<Overlay> = grid
            .items
            .iter()
            .zip(grid.initial_configs())
            .enumerate()
            .map(|(i, (asset, config))| Overlay {
                media: EagerMedia::acquire(
                    ids.next_id(),
                    MediaItem::new(asset, &cache_bust),
                    grid.cell_rect(i),
                    &mut pool,
                ),
                config,
            })
            .collect();
        for p in &grid.patches {
            if let Some(o) = overlays.get_mut(p.index) {
                o.config.merge(&p.patch);
                tracing::debug!(
                    index = p.index,
                    transform = %o.config.css_transform(),
                    "overlay patched"
                );
            }
        }

        let mut session = Self {
            page,
            cache_bust,
            viewport,
            elapsed: Duration::ZERO,
            host,
            pool,
            reveal,
            conveyors,
            backdrop,
            rows,
            overlays,
        };
        session.pump();
        tracing::debug!(observed = session.host.active_count(), "page session mounted");
        Ok(session)
    }

    /// Page the session was built from.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Token shared by every media URL of this session.
    pub fn cache_bust(&self) -> &CacheBust {
        &self.cache_bust
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Session time.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Largest scroll position that keeps the viewport on the page.
    pub fn max_scroll(&self) -> f64 {
        (f64::from(self.page.canvas.height) - self.viewport.height).max(0.0)
    }

    /// Scroll to `y` (clamped to the page) and deliver the resulting samples.
    #[tracing::instrument(skip(self))]
    pub fn scroll_to(&mut self, y: f64) -> ReelResult<()> {
        if !y.is_finite() {
            return Err(ReelError::session("scroll position must be finite"));
        }
        self.viewport = self.viewport.scrolled_to(y.clamp(0.0, self.max_scroll()));
        self.pump();
        Ok(())
    }

    /// Advance session time: conveyor clocks, transitions and fades, then resample.
    #[tracing::instrument(skip(self))]
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        for c in &mut self.conveyors {
            c.advance(dt);
        }
        for r in &mut self.reveal {
            r.transition.advance(dt);
        }
        for m in self.eager_mut() {
            m.slot.advance(dt);
        }
        self.pump();
    }

    /// Pointer entered or left conveyor lane `lane`.
    #[tracing::instrument(skip(self))]
    pub fn set_hover(&mut self, lane: usize, hovered: bool) -> ReelResult<()> {
        let n = self.conveyors.len();
        let c = self
            .conveyors
            .get_mut(lane)
            .ok_or_else(|| ReelError::session(format!("no conveyor lane {lane} (have {n})")))?;
        c.set_hover(hovered);
        Ok(())
    }

    /// Number of conveyor lanes.
    pub fn lane_count(&self) -> usize {
        self.conveyors.len()
    }

    /// Conveyor lane `i`.
    pub fn conveyor(&self, i: usize) -> Option<&Conveyor> {
        self.conveyors.get(i)
    }

    /// Element ids of every eagerly mounted media slot, in page order.
    pub fn eager_elements(&self) -> Vec<ElementId> {
        self.eager().map(|m| m.element).collect()
    }

    /// First data arrived for the media behind `element`.
    ///
    /// Signals for cells that are not mounted are ignored.
    #[tracing::instrument(skip(self))]
    pub fn media_loaded(&mut self, element: ElementId) -> ReelResult<()> {
        self.with_media(element, |slot| slot.on_loaded_data(), |cell| cell.media_loaded())
    }

    /// Load failure for the media behind `element`; the spinner stays up.
    #[tracing::instrument(skip(self))]
    pub fn media_failed(&mut self, element: ElementId) -> ReelResult<()> {
        self.with_media(element, |slot| slot.on_error(), |cell| cell.media_failed())
    }

    /// Render-ready state.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            canvas: self.page.canvas,
            viewport: self.viewport,
            elapsed: self.elapsed,
            backdrop: self.backdrop.as_ref().map(EagerMedia::view),
            hero: self.page.hero.clone(),
            reveal: self
                .reveal
                .iter()
                .map(|r| RevealView {
                    element: r.element,
                    image: r.image.clone(),
                    z: r.z,
                    revealed: r.tracker.revealed(),
                    style: r.transition.style(),
                    target: r.transition.target_style(),
                    transition: r.spec,
                    rise_px: self.page.reveal.rise_px,
                    tracking: self.page.reveal.tracking,
                })
                .collect(),
            lanes: self
                .conveyors
                .iter()
                .map(|c| LaneView {
                    origin: c.origin(),
                    cell: c.lane().cell_size(),
                    gap_px: c.lane().gap_px(),
                    period: c.lane().period(),
                    direction: c.lane().direction(),
                    offset_px: c.offset_px(),
                    offset_fraction: c.offset_fraction(),
                    phase: loop_phase(c.elapsed(), c.lane().period()),
                    paused: c.is_paused(),
                    cells: c
                        .cells()
                        .iter()
                        .map(|cell| (cell.element(), cell.view()))
                        .collect(),
                    sources: c.cells().iter().map(|cell| cell.item().clone()).collect(),
                    tracking: self.page.conveyors.tracking,
                })
                .collect(),
            rows: self
                .rows
                .iter()
                .map(|r| RowView {
                    label: r.label.clone(),
                    round: r.round,
                    cells: r.media.iter().map(EagerMedia::view).collect(),
                })
                .collect(),
            layers: self.page.layers.clone(),
            overlays: self
                .overlays
                .iter()
                .map(|o| OverlayView {
                    media: o.media.view(),
                    config: o.config,
                })
                .collect(),
        }
    }

    /// Resource counters.
    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats {
            observed: self.host.active_count(),
            live_media: self.pool.live(),
            peak_media: self.pool.peak(),
            acquired_total: self.pool.acquired_total(),
            revealed_blocks: self.reveal.iter().filter(|r| r.tracker.revealed()).count(),
            ..SessionStats::default()
        };
        let mut count = |state: LoadState| match state {
            LoadState::Loaded => stats.loaded += 1,
            LoadState::Stalled => stats.stalled += 1,
            LoadState::Pending => {}
        };
        for c in &self.conveyors {
            for cell in c.cells() {
                if let Some(state) = cell.load_state() {
                    count(state);
                }
            }
        }
        for m in self.eager() {
            count(m.slot.load_state());
        }
        stats.mounted_cells = self.conveyors.iter().map(Conveyor::mounted_count).sum();
        stats
    }

    /// Stop every observation and release all media. Idempotent; also run on drop.
    pub fn teardown(&mut self) {
        for r in &mut self.reveal {
            r.tracker.unmount(&mut self.host);
        }
        for c in &mut self.conveyors {
            c.unmount(&mut self.host, &mut self.pool);
        }
        let handles: Vec<MediaHandle> = self.eager().map(|m| m.handle).collect();
        for h in handles {
            if self.pool.is_live(h) {
                self.pool.release(h);
            }
        }
    }

    fn eager(&self) -> impl Iterator<Item = &EagerMedia> {
        self.backdrop
            .iter()
            .chain(self.rows.iter().flat_map(|r| r.media.iter()))
            .chain(self.overlays.iter().map(|o| &o.media))
    }

    fn eager_mut(&mut self) -> impl Iterator<Item = &mut EagerMedia> {
        self.backdrop
            .iter_mut()
            .chain(self.rows.iter_mut().flat_map(|r| r.media.iter_mut()))
            .chain(self.overlays.iter_mut().map(|o| &mut o.media))
    }

    fn with_media(
        &mut self,
        element: ElementId,
        on_slot: impl FnOnce(&mut MediaSlot),
        on_cell: impl FnOnce(&mut MountOnVisible),
    ) -> ReelResult<()> {
        for c in &mut self.conveyors {
            if let Some(cell) = c.cell_mut(element) {
                on_cell(cell);
                return Ok(());
            }
        }
        if let Some(m) = self.eager_mut().find(|m| m.element == element) {
            on_slot(&mut m.slot);
            return Ok(());
        }
        Err(ReelError::session(format!(
            "element {} has no media",
            element.0
        )))
    }

    fn target_of(&self, element: ElementId) -> Option<Target> {
        if let Some(i) = self.reveal.iter().position(|r| r.element == element) {
            return Some(Target::Reveal(i));
        }
        self.conveyors
            .iter()
            .position(|c| c.owns(element))
            .map(Target::Conveyor)
    }

    fn rect_of(&self, element: ElementId) -> Option<Rect> {
        match self.target_of(element)? {
            Target::Reveal(i) => Some(self.reveal[i].observed_rect()),
            Target::Conveyor(i) => self.conveyors[i].rect_of(element),
        }
    }

    fn pump(&mut self) {
        let viewport = self.viewport.rect();
        let samples = {
            let mut host = std::mem::take(&mut self.host);
            let samples = host.sample(viewport, |id| self.rect_of(id));
            self.host = host;
            samples
        };
        for (element, sample) in samples {
            self.deliver(element, sample);
        }
    }

    fn deliver(&mut self, element: ElementId, sample: IntersectionSample) {
        let edge = match self.target_of(element) {
            Some(Target::Reveal(i)) => {
                let r = &mut self.reveal[i];
                let edge = r.tracker.on_sample(&mut self.host, sample);
                if edge.is_some() {
                    r.transition.set_revealed(r.tracker.revealed());
                }
                edge
            }
            Some(Target::Conveyor(i)) => {
                self.conveyors[i].on_sample(&mut self.host, &mut self.pool, element, sample)
            }
            None => None,
        };
        if let Some(edge) = edge {
            tracing::trace!(element = element.0, ?edge, ratio = sample.ratio, "visibility edge");
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/page_session.rs"]
mod tests;
