//! Loading heuristics: preload hints and the lazy-load policy.

/// `as` attribute of a `<link rel="preload">` hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreloadAs {
    /// Video resource.
    Video,
    /// Image resource.
    Image,
}

impl PreloadAs {
    /// Attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

/// Classify a critical asset for preloading by its extension.
///
/// Query strings are ignored; unknown extensions get no `as` hint.
pub fn preload_as(url: &str) -> Option<PreloadAs> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".mp4") {
        Some(PreloadAs::Video)
    } else if [".gif", ".png", ".jpg", ".jpeg"]
        .iter()
        .any(|ext| lower.ends_with(ext))
    {
        Some(PreloadAs::Image)
    } else {
        None
    }
}

/// Distance, in viewport heights, below the fold at which media starts loading.
pub const LAZY_LOAD_BUFFER_VIEWPORTS: f64 = 1.5;

/// Return `true` when an element at `element_top` is still too far below the viewport to load.
pub fn should_lazy_load(element_top: f64, scroll_y: f64, viewport_height: f64) -> bool {
    element_top > scroll_y + viewport_height * LAZY_LOAD_BUFFER_VIEWPORTS
}

#[cfg(test)]
#[path = "../../tests/unit/media/loader.rs"]
mod tests;
