use super::*;
use crate::page::model::Page;

#[test]
fn missing_sections_fail_build() {
    let canvas = Canvas::new(1920, 1080).unwrap();
    let err = PageBuilder::new(canvas).build().unwrap_err();
    assert!(err.to_string().contains("hero"));

    let full = Page::portfolio().unwrap();
    let err = PageBuilder::new(canvas)
        .hero(full.hero.clone())
        .reveal(full.reveal.clone())
        .conveyors(full.conveyors.clone())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("overlay grid"));
}

#[test]
fn builder_validates_sections() {
    let full = Page::portfolio().unwrap();
    let mut conveyors = full.conveyors.clone();
    conveyors.cell.width = 0.0;
    let res = PageBuilder::new(full.canvas)
        .hero(full.hero)
        .reveal(full.reveal)
        .conveyors(conveyors)
        .overlays(full.overlays)
        .build();
    assert!(res.is_err());
}

#[test]
fn row_builder_defaults() {
    let row = RowBuilder::new("r", 10.0, &["a", "b"]).build().unwrap();
    assert_eq!(row.names, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(row.justify, Justify::Center);
    assert!(!row.round);
    assert!((row.aspect - 16.0 / 9.0).abs() < 1e-12);
    assert!(RowBuilder::new(" ", 0.0, &["a"]).build().is_err());
}
