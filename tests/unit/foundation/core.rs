use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(1920, 8192).unwrap();
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 1920.0, 8192.0));
}

#[test]
fn viewport_rect_follows_scroll() {
    let v = Viewport::new(100.0, 1920.0, 1080.0).unwrap();
    assert_eq!(v.rect(), Rect::new(0.0, 100.0, 1920.0, 1180.0));
    assert_eq!(v.scrolled_to(0.0).rect().y0, 0.0);
    assert!(Viewport::new(f64::NAN, 1.0, 1.0).is_err());
    assert!(Viewport::new(0.0, 0.0, 1.0).is_err());
}

#[test]
fn ratio_is_covered_fraction_of_element() {
    let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(
        intersection_ratio(Rect::new(0.0, 0.0, 10.0, 10.0), viewport),
        1.0
    );
    assert_eq!(
        intersection_ratio(Rect::new(0.0, 90.0, 10.0, 110.0), viewport),
        0.5
    );
    assert_eq!(
        intersection_ratio(Rect::new(0.0, 200.0, 10.0, 210.0), viewport),
        0.0
    );
}

#[test]
fn zero_area_elements_are_binary() {
    let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(
        intersection_ratio(Rect::new(5.0, 5.0, 5.0, 5.0), viewport),
        1.0
    );
    assert_eq!(
        intersection_ratio(Rect::new(500.0, 5.0, 500.0, 5.0), viewport),
        0.0
    );
}

#[test]
fn edge_adjacent_rects_intersect() {
    let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(is_intersecting(Rect::new(0.0, 100.0, 10.0, 120.0), viewport));
    assert!(!is_intersecting(Rect::new(0.0, 101.0, 10.0, 120.0), viewport));
}
