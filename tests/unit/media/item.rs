use super::*;

#[test]
fn asset_conventions_map_to_directories() {
    assert_eq!(AssetRef::Video("space".into()).path(), "/videos/space.mp4");
    assert_eq!(AssetRef::Gif("a0".into()).path(), "/gifs/a0.gif");
    assert_eq!(AssetRef::Png("logo".into()).path(), "/images/logo.png");
    assert_eq!(
        AssetRef::Path("/gifs/size.gif".into()).path(),
        "/gifs/size.gif"
    );
}

#[test]
fn kinds_follow_asset_type() {
    assert_eq!(AssetRef::Video("x".into()).kind(), MediaKind::Video);
    assert_eq!(AssetRef::Gif("x".into()).kind(), MediaKind::Image);
    assert_eq!(AssetRef::Png("x".into()).kind(), MediaKind::Image);
    assert_eq!(AssetRef::Path("/a/b.mp4".into()).kind(), MediaKind::Video);
}

#[test]
fn cache_bust_suffixes_query() {
    let item = MediaItem::new(&AssetRef::Video("jazz".into()), &CacheBust::fixed("1700"));
    assert_eq!(item.url(), "/videos/jazz.mp4?v=1700");
    assert_eq!(item.href("/portfolio"), "/portfolio/videos/jazz.mp4?v=1700");
    assert_eq!(item.href("/portfolio/"), "/portfolio/videos/jazz.mp4?v=1700");
    assert_eq!(item.href(""), "/videos/jazz.mp4?v=1700");

    let plain = MediaItem::new(&AssetRef::Video("jazz".into()), &CacheBust::disabled());
    assert_eq!(plain.url(), "/videos/jazz.mp4");
}

#[test]
fn process_start_token_is_shared() {
    let a = CacheBust::process_start();
    let b = CacheBust::process_start();
    assert_eq!(a, b);
    assert!(a.token().unwrap().parse::<u128>().is_ok());
}

#[test]
fn expansion_shares_one_token() {
    let bust = CacheBust::fixed("42");
    let items = expand_videos(&["a", "b"], &bust);
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.cache_bust == "42"));
    assert_eq!(items[1].source_url, "/videos/b.mp4");
}

#[test]
fn names_with_separators_are_rejected() {
    assert!(AssetRef::Video("../x".into()).validate().is_err());
    assert!(AssetRef::Png("a/b".into()).validate().is_err());
    assert!(AssetRef::Gif(" ".into()).validate().is_err());
    assert!(AssetRef::Path("relative.gif".into()).validate().is_err());
    assert!(AssetRef::Path("/gifs/../x.gif".into()).validate().is_err());
    assert!(AssetRef::Path("/gifs/size.gif".into()).validate().is_ok());
}

#[test]
fn cache_bust_mode_resolves_tokens() {
    assert_eq!(CacheBustMode::Disabled.resolve().token(), None);
    assert_eq!(CacheBustMode::Fixed("7".into()).resolve().token(), Some("7"));
    assert_eq!(
        CacheBustMode::default().resolve(),
        CacheBustMode::ProcessStart.resolve()
    );
}
