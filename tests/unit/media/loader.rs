use super::*;

#[test]
fn preload_hint_follows_extension() {
    assert_eq!(preload_as("/videos/a.mp4?v=1"), Some(PreloadAs::Video));
    assert_eq!(preload_as("/images/logo.PNG"), Some(PreloadAs::Image));
    assert_eq!(preload_as("/gifs/x.gif#top"), Some(PreloadAs::Image));
    assert_eq!(preload_as("/images/photo.jpeg"), Some(PreloadAs::Image));
    assert_eq!(preload_as("/fonts/a.woff2"), None);
    assert_eq!(PreloadAs::Video.as_str(), "video");
}

#[test]
fn lazy_load_window_is_one_and_a_half_viewports() {
    assert!(!should_lazy_load(1000.0, 0.0, 1080.0));
    assert!(!should_lazy_load(1620.0, 0.0, 1080.0));
    assert!(should_lazy_load(1621.0, 0.0, 1080.0));
    assert!(!should_lazy_load(3000.0, 2000.0, 1080.0));
}
