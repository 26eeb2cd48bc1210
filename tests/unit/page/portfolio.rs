use super::*;

#[test]
fn portfolio_page_validates() {
    let page = Page::portfolio().unwrap();
    assert_eq!(page.canvas, Canvas { width: 1920, height: 8192 });
    assert_eq!(page.conveyors.lanes.len(), 2);
    assert_eq!(page.conveyors.lanes[1].direction, Direction::Reverse);
    assert_eq!(page.conveyors.period_ms, 39_000);
}

#[test]
fn about_images_run_from_seven_down_to_one() {
    let page = Page::portfolio().unwrap();
    let paths: Vec<String> = page.reveal.images.iter().map(AssetRef::path).collect();
    assert_eq!(paths.first().map(String::as_str), Some("/images/about_me_7.png"));
    assert_eq!(paths.last().map(String::as_str), Some("/images/about_me_1.png"));
    assert_eq!(page.reveal.z_index(0), 7);
    assert_eq!(page.reveal.z_index(6), 1);
    assert_eq!(page.reveal.item_transition(3).delay_ms, 450);
}

fn close(a: Rect, b: Rect) -> bool {
    [(a.x0, b.x0), (a.y0, b.y0), (a.x1, b.x1), (a.y1, b.y1)]
        .iter()
        .all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn row_geometry_matches_layout() {
    let page = Page::portfolio().unwrap();
    let rows: Vec<Vec<Rect>> = page
        .rows
        .iter()
        .map(|r| r.cell_rects(1920.0).unwrap())
        .collect();
    assert!(close(rows[0][0], Rect::new(156.0, 3775.0, 540.0, 3991.0)));
    assert!((rows[0][3].x0 - 1380.0).abs() < 1e-9);
    assert!((rows[1][0].height() - 512.0).abs() < 1e-9);
    assert!((rows[1][0].x0 - 416.0 / 6.0).abs() < 1e-9);
    assert!(close(rows[2][0], Rect::new(574.0, 7160.0, 766.0, 7352.0)));
    assert!(page.rows[2].round);
    assert!((rows[3][0].x0 - 368.0).abs() < 1e-9);
}

#[test]
fn overlay_patches_cover_every_gif() {
    let page = Page::portfolio().unwrap();
    let indices: Vec<usize> = page.overlays.patches.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(page.overlays.patches[3].patch.scale, Some(0.0));
}

#[test]
fn asset_list_includes_every_block() {
    let page = Page::portfolio().unwrap();
    let paths: Vec<String> = page.assets().iter().map(AssetRef::path).collect();
    for expected in [
        "/gifs/size.gif",
        "/images/logo.png",
        "/videos/space.mp4",
        "/videos/trance.mp4",
        "/videos/square3.mp4",
        "/images/final.png",
        "/gifs/strive.gif",
    ] {
        assert!(paths.iter().any(|p| p == expected), "missing {expected}");
    }
    // 1 backdrop + 2 hero + 7 about + 20 conveyor + 15 row videos + 4 layers + 4 gifs
    assert_eq!(paths.len(), 53);
}
