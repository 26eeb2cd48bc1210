use super::*;
use crate::visibility::hysteresis::SAMPLE_THRESHOLDS;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

fn element_at(y: f64) -> Rect {
    Rect::new(0.0, y, 100.0, y + 100.0)
}

#[test]
fn first_sample_always_fires() {
    let mut host = ViewportObserver::new();
    let _sub = host.observe(ElementId(1), &SAMPLE_THRESHOLDS);
    let out = host.sample(VIEWPORT, |_| Some(element_at(500.0)));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].1.ratio, 0.0);
    assert!(!out[0].1.is_intersecting);
}

#[test]
fn samples_fire_only_on_band_changes() {
    let mut host = ViewportObserver::new();
    let _sub = host.observe(ElementId(1), &SAMPLE_THRESHOLDS);

    let mut fired = Vec::new();
    for y in [100.0, 98.0, 97.0, 90.0, 80.0, 50.0, 0.0, 0.0] {
        let out = host.sample(VIEWPORT, |_| Some(element_at(y)));
        fired.push(out.first().map(|(_, s)| s.ratio));
    }
    // 100: touching (band 1), 98: 0.02 (band 1, silent), 97: 0.03 (silent),
    // 90: 0.1 (band 2), 80: 0.2 (band 3), 50: 0.5 (silent), 0: 1.0 (band 4), 0: silent.
    assert_eq!(
        fired,
        vec![
            Some(0.0),
            None,
            None,
            Some(0.1),
            Some(0.2),
            None,
            Some(1.0),
            None
        ]
    );
}

#[test]
fn missing_rect_yields_nothing() {
    let mut host = ViewportObserver::new();
    let _sub = host.observe(ElementId(7), &SAMPLE_THRESHOLDS);
    assert!(host.sample(VIEWPORT, |_| None).is_empty());
    assert_eq!(host.sample(VIEWPORT, |_| Some(element_at(0.0))).len(), 1);
}

#[test]
fn unobserve_releases_registration() {
    let mut host = ViewportObserver::new();
    let a = host.observe(ElementId(1), &SAMPLE_THRESHOLDS);
    let _b = host.observe(ElementId(2), &SAMPLE_THRESHOLDS);
    assert_eq!(host.active_count(), 2);
    host.unobserve(a);
    assert_eq!(host.active_count(), 1);
    assert!(!host.is_observing(ElementId(1)));
    let out = host.sample(VIEWPORT, |_| Some(element_at(0.0)));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].0, ElementId(2));
}

#[test]
fn empty_threshold_list_defaults_to_zero() {
    let mut host = ViewportObserver::new();
    let _sub = host.observe(ElementId(1), &[f64::NAN]);
    assert_eq!(host.sample(VIEWPORT, |_| Some(element_at(0.0))).len(), 1);
    assert!(host.sample(VIEWPORT, |_| Some(element_at(10.0))).is_empty());
}
