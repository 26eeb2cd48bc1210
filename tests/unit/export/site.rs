use super::*;
use crate::media::item::CacheBustMode;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "reelpage_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn writes_index_and_page_model() {
    let out = temp_dir("export_site");
    let opts = ExportOpts {
        cache_bust: CacheBustMode::Fixed("7".into()),
        ..ExportOpts::default()
    };
    let report = export_site(Page::portfolio().unwrap(), &out, &opts).unwrap();

    assert_eq!(report.index, out.join("index.html"));
    assert_eq!(report.url, "/portfolio/");
    assert_eq!(report.stats.mounted_cells, 0);
    assert_eq!(report.stats.live_media, 20);

    let html = std::fs::read_to_string(&report.index).unwrap();
    assert_eq!(html.len(), report.html_bytes);
    assert!(html.contains("/portfolio/videos/row1.mp4?v=7"));
    assert!(!html.contains("<video src=\"/portfolio/videos/space.mp4"));

    let page = Page::from_path(&report.page_json).unwrap();
    page.validate().unwrap();
    assert_eq!(page.assets(), Page::portfolio().unwrap().assets());

    std::fs::remove_dir_all(&out).unwrap();
}

#[test]
fn exported_page_reveals_and_mounts_after_load() {
    let out = temp_dir("export_site_script");
    let report = export_site(Page::portfolio().unwrap(), &out, &ExportOpts::default()).unwrap();
    let html = std::fs::read_to_string(&report.index).unwrap();

    assert_eq!(html.matches("<script>").count(), 1);
    assert!(html.contains("IntersectionObserver"));
    // Reveal items start hidden but are observed by the inline script.
    assert_eq!(html.matches("data-track=\"reveal\" data-revealed=\"0\"").count(), 7);
    // Every conveyor placeholder knows which video to mount.
    assert_eq!(html.matches("data-track=\"cell\"").count(), 40);
    assert_eq!(html.matches("data-src=\"/portfolio/videos/").count(), 40);

    std::fs::remove_dir_all(&out).unwrap();
}

#[test]
fn invalid_opts_write_nothing() {
    let out = temp_dir("export_site_invalid");
    let opts = ExportOpts {
        base_path: "portfolio".into(),
        ..ExportOpts::default()
    };
    assert!(export_site(Page::portfolio().unwrap(), &out, &opts).is_err());
    assert!(!out.exists());
}
