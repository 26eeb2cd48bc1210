use super::*;

#[test]
fn patch_merges_only_set_fields() {
    let mut cfg = GifLayoutConfig::default();
    cfg.merge(&GifLayoutPatch {
        offset_y: Some(42.0),
        ..GifLayoutPatch::default()
    });
    assert_eq!(cfg.scale, 1.0);
    assert_eq!(cfg.offset_x, 0.0);
    assert_eq!(cfg.offset_y, 42.0);
}

#[test]
fn scale_zero_hides() {
    let mut cfg = GifLayoutConfig::default();
    assert!(!cfg.is_hidden());
    cfg.merge(&GifLayoutPatch::full(0.0, 0.0, 0.0));
    assert!(cfg.is_hidden());
    assert_eq!(cfg.apply(Rect::new(0.0, 0.0, 100.0, 100.0)).area(), 0.0);
}

#[test]
fn apply_scales_about_center_then_translates() {
    let cfg = GifLayoutConfig {
        scale: 1.5,
        offset_x: 196.0,
        offset_y: 42.0,
    };
    let r = cfg.apply(Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(r, Rect::new(171.0, 17.0, 321.0, 167.0));
}

#[test]
fn css_transform_matches_inline_style() {
    let cfg = GifLayoutConfig {
        scale: 1.75,
        offset_x: 250.0,
        offset_y: 3075.0,
    };
    assert_eq!(cfg.css_transform(), "translate(250px, 3075px) scale(1.75)");
}

#[test]
fn invalid_patches_are_rejected() {
    assert!(GifLayoutPatch::full(-1.0, 0.0, 0.0).validate().is_err());
    assert!(
        GifLayoutPatch {
            offset_x: Some(f64::INFINITY),
            ..GifLayoutPatch::default()
        }
        .validate()
        .is_err()
    );
    assert!(GifLayoutPatch::default().validate().is_ok());
}
