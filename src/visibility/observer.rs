use std::collections::BTreeMap;

use crate::foundation::core::{Rect, intersection_ratio, is_intersecting};

/// Opaque identity of an observed on-page element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

/// Hands out unique [`ElementId`]s in creation order.
#[derive(Clone, Debug, Default)]
pub struct ElementAllocator {
    next: u64,
}

impl ElementAllocator {
    /// Allocator starting at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused id.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }
}

/// One intersection sample delivered for an observed element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IntersectionSample {
    /// Fraction of the element inside the viewport, in `[0, 1]`.
    pub ratio: f64,
    /// Whether the element touches the viewport at all.
    pub is_intersecting: bool,
}

/// Live registration handed out by [`ObservationHost::observe`].
///
/// Not `Clone`: exactly one owner can release it.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    element: ElementId,
}

impl Subscription {
    /// Registration token for `element`; hosts create one per `observe` call.
    pub fn new(element: ElementId) -> Self {
        Self { element }
    }

    /// Observed element.
    pub fn element(&self) -> ElementId {
        self.element
    }
}

/// The host runtime's viewport-intersection primitive.
pub trait ObservationHost {
    /// Start observing `element`; samples fire whenever `thresholds` are crossed.
    fn observe(&mut self, element: ElementId, thresholds: &[f64]) -> Subscription;

    /// Stop observing and drop all state for the subscription's element.
    fn unobserve(&mut self, subscription: Subscription);
}

#[derive(Clone, Debug)]
struct Observed {
    thresholds: Vec<f64>,
    last: Option<(usize, bool)>,
}

/// Deterministic [`ObservationHost`] over explicit element rectangles.
///
/// Mirrors browser delivery: the first sample after `observe` always fires; later samples
/// fire only when the element moves into a different threshold band or its intersecting
/// flag changes. Elements without a rectangle yield nothing.
#[derive(Clone, Debug, Default)]
pub struct ViewportObserver {
    observed: BTreeMap<ElementId, Observed>,
}

impl ViewportObserver {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn active_count(&self) -> usize {
        self.observed.len()
    }

    /// Return `true` when `element` is observed.
    pub fn is_observing(&self, element: ElementId) -> bool {
        self.observed.contains_key(&element)
    }

    /// Compute samples for every observed element against `viewport`.
    ///
    /// `rect_of` resolves the current layout box; `None` means not rendered.
    pub fn sample<F>(
        &mut self,
        viewport: Rect,
        mut rect_of: F,
    ) -> Vec<(ElementId, IntersectionSample)>
    where
        F: FnMut(ElementId) -> Option<Rect>,
    {
        let mut out = Vec::new();
        for (&id, obs) in &mut self.observed {
            let Some(rect) = rect_of(id) else {
                continue;
            };
            let intersecting = is_intersecting(rect, viewport);
            let ratio = if intersecting {
                intersection_ratio(rect, viewport)
            } else {
                0.0
            };
            let band = if intersecting {
                obs.thresholds.iter().filter(|&&t| ratio >= t).count()
            } else {
                0
            };
            if obs.last == Some((band, intersecting)) {
                continue;
            }
            obs.last = Some((band, intersecting));
            out.push((
                id,
                IntersectionSample {
                    ratio,
                    is_intersecting: intersecting,
                },
            ));
        }
        out
    }
}

impl ObservationHost for ViewportObserver {
    fn observe(&mut self, element: ElementId, thresholds: &[f64]) -> Subscription {
        let mut thresholds: Vec<f64> = thresholds
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(0.0, 1.0))
            .collect();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        tracing::trace!(element = element.0, ?thresholds, "observe");
        self.observed.insert(
            element,
            Observed {
                thresholds,
                last: None,
            },
        );
        Subscription { element }
    }

    fn unobserve(&mut self, subscription: Subscription) {
        tracing::trace!(element = subscription.element.0, "unobserve");
        self.observed.remove(&subscription.element);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/observer.rs"]
mod tests;
