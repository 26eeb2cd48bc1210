use super::*;

#[test]
fn defaults_match_hosted_site() {
    let o = ExportOpts::default();
    assert_eq!(o.base_path, "/portfolio");
    assert_eq!(o.asset_prefix, "/portfolio");
    assert!(o.trailing_slash);
    o.validate().unwrap();
}

#[test]
fn routes_map_to_folder_index() {
    let o = ExportOpts::default();
    assert_eq!(o.route_file("/"), PathBuf::from("index.html"));
    assert_eq!(o.route_file("/about/"), PathBuf::from("about/index.html"));
    assert_eq!(o.route_url("/"), "/portfolio/");
    assert_eq!(o.route_url("about"), "/portfolio/about/");

    let flat = ExportOpts {
        trailing_slash: false,
        base_path: String::new(),
        ..ExportOpts::default()
    };
    assert_eq!(flat.route_file("/about"), PathBuf::from("about.html"));
    assert_eq!(flat.route_url("/about"), "/about");
}

#[test]
fn partial_json_keeps_defaults() {
    let o: ExportOpts =
        serde_json::from_str(r#"{"asset_prefix": "", "cache_bust": "disabled"}"#).unwrap();
    assert_eq!(o.asset_prefix, "");
    assert_eq!(o.base_path, "/portfolio");
    assert_eq!(o.cache_bust, CacheBustMode::Disabled);
}

#[test]
fn relative_prefix_is_rejected() {
    let o = ExportOpts {
        asset_prefix: "portfolio".into(),
        ..ExportOpts::default()
    };
    assert!(o.validate().is_err());
}
