use super::*;

fn page() -> Page {
    Page::portfolio().unwrap()
}

#[test]
fn json_roundtrip_preserves_page() {
    let p = page();
    let s = p.to_json().unwrap();
    let de = Page::from_json(&s).unwrap();
    assert_eq!(de, p);
    de.validate().unwrap();
}

#[test]
fn parse_errors_are_serde_errors() {
    let err = Page::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
}

#[test]
fn missing_file_is_reported() {
    let err = Page::from_path("/nonexistent/page.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/page.json"));
}

#[test]
fn rejects_empty_lane() {
    let mut p = page();
    p.conveyors.lanes[0].names.clear();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_zero_period_and_negative_gap() {
    let mut p = page();
    p.conveyors.period_ms = 0;
    assert!(p.validate().is_err());

    let mut p = page();
    p.conveyors.gap_px = -1.0;
    assert!(p.validate().is_err());
}

#[test]
fn rejects_bad_asset_names() {
    let mut p = page();
    p.conveyors.lanes[1].names[0] = "../etc".into();
    assert!(p.validate().is_err());

    let mut p = page();
    p.overlays.items[0] = AssetRef::Gif(String::new());
    assert!(p.validate().is_err());
}

#[test]
fn rejects_dangling_overlay_patch() {
    let mut p = page();
    p.overlays.patches.push(OverlayPatch {
        index: 9,
        patch: GifLayoutPatch::full(1.0, 0.0, 0.0),
    });
    let err = p.validate().unwrap_err();
    assert!(err.to_string().contains("missing overlay 9"));
}

#[test]
fn rejects_invalid_thresholds() {
    let mut p = page();
    p.reveal.tracking = TrackingMode::Hysteresis(crate::visibility::hysteresis::Hysteresis {
        enter: 0.01,
        exit: 0.5,
    });
    assert!(p.validate().is_err());
}

#[test]
fn oversized_row_is_a_layout_error() {
    let mut p = page();
    p.rows[0].width_frac = 0.3;
    p.rows[0].max_width_px = None;
    let err = p.validate().unwrap_err();
    assert!(matches!(err, ReelError::Layout(_)));
}

#[test]
fn lane_origins_stack_with_spacing() {
    let p = page();
    assert_eq!(p.conveyors.lane_origin(0), Point::new(0.0, 2200.0));
    assert_eq!(p.conveyors.lane_origin(1), Point::new(0.0, 2448.0));
    assert_eq!(p.conveyors.height(), 464.0);
}

#[test]
fn grid_cells_wrap_by_columns() {
    let mut grid = page().overlays;
    grid.columns = 2;
    assert_eq!(grid.cell_rect(2), Rect::new(16.0, 3272.0, 464.0, 3720.0));
    assert_eq!(grid.initial_configs().len(), 4);
}

#[test]
fn reveal_item_is_centered() {
    let p = page();
    assert_eq!(
        p.reveal.item_rect(1920.0),
        Rect::new(320.0, 1260.0, 1600.0, 1980.0)
    );
}
