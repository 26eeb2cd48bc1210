use super::*;
use crate::foundation::core::Rect;
use crate::visibility::observer::ViewportObserver;

fn sample(ratio: f64) -> IntersectionSample {
    IntersectionSample {
        ratio,
        is_intersecting: ratio > 0.0,
    }
}

#[test]
fn mount_registers_and_unmount_releases() {
    let mut host = ViewportObserver::new();
    let mut t = VisibilityTracker::with_hysteresis();
    t.mount(&mut host, Some(ElementId(3)));
    assert!(t.is_observing());
    assert_eq!(t.element(), Some(ElementId(3)));
    assert_eq!(host.active_count(), 1);

    t.unmount(&mut host);
    t.unmount(&mut host);
    assert!(!t.is_observing());
    assert_eq!(host.active_count(), 0);
}

#[test]
fn remount_does_not_leak_registrations() {
    let mut host = ViewportObserver::new();
    let mut t = VisibilityTracker::with_hysteresis();
    t.mount(&mut host, Some(ElementId(1)));
    t.mount(&mut host, Some(ElementId(2)));
    assert_eq!(host.active_count(), 1);
    assert!(host.is_observing(ElementId(2)));
    t.unmount(&mut host);
}

#[test]
fn absent_element_keeps_last_value() {
    let mut host = ViewportObserver::new();
    let mut t = VisibilityTracker::with_hysteresis();
    t.mount(&mut host, Some(ElementId(1)));
    assert_eq!(t.on_sample(&mut host, sample(0.5)), Some(VisibilityEdge::Reveal));

    t.mount(&mut host, None);
    assert!(!t.is_observing());
    assert_eq!(host.active_count(), 0);
    assert_eq!(t.on_sample(&mut host, sample(0.0)), None);
    assert!(t.revealed());
}

#[test]
fn hysteresis_mode_flips_both_ways() {
    let mut host = ViewportObserver::new();
    let mut t = VisibilityTracker::with_hysteresis();
    t.mount(&mut host, Some(ElementId(1)));
    assert_eq!(t.on_sample(&mut host, sample(0.1)), None);
    assert_eq!(t.on_sample(&mut host, sample(0.16)), Some(VisibilityEdge::Reveal));
    assert_eq!(t.on_sample(&mut host, sample(0.06)), None);
    assert_eq!(t.on_sample(&mut host, sample(0.04)), Some(VisibilityEdge::Hide));
    assert!(t.is_observing());
    t.unmount(&mut host);
}

#[test]
fn once_mode_stops_observing_after_reveal() {
    let mut host = ViewportObserver::new();
    let mut t = VisibilityTracker::new(TrackingMode::Once {
        threshold: ONCE_DEFAULT_THRESHOLD,
    });
    t.mount(&mut host, Some(ElementId(9)));
    assert_eq!(t.on_sample(&mut host, sample(0.05)), None);
    assert_eq!(t.on_sample(&mut host, sample(0.1)), Some(VisibilityEdge::Reveal));
    assert!(!t.is_observing());
    assert_eq!(host.active_count(), 0);

    t.mount(&mut host, Some(ElementId(9)));
    assert_eq!(host.active_count(), 0);
    assert!(t.revealed());
}

#[test]
fn tracker_follows_host_delivery() {
    let mut host = ViewportObserver::new();
    let mut t = VisibilityTracker::with_hysteresis();
    t.mount(&mut host, Some(ElementId(1)));

    let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut revealed = Vec::new();
    // Ratios: 0, 0.12, 0.17, 0.9 (same band, silent), 0.08, 0.03, 0.
    for y in [150.0, 88.0, 83.0, 10.0, 92.0, 97.0, 300.0] {
        let el = Rect::new(0.0, y, 100.0, y + 100.0);
        for (_, s) in host.sample(viewport, |_| Some(el)) {
            t.on_sample(&mut host, s);
        }
        revealed.push(t.revealed());
    }
    assert_eq!(
        revealed,
        vec![false, false, true, true, true, false, false]
    );
    t.unmount(&mut host);
}

#[test]
fn invalid_once_threshold_is_rejected() {
    assert!(TrackingMode::Once { threshold: 2.0 }.validate().is_err());
    assert!(TrackingMode::default().validate().is_ok());
}
