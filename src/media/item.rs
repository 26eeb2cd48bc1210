use std::{
    sync::OnceLock,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::foundation::error::{ReelError, ReelResult};

/// Decoded media category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Autoplaying, looping, muted video.
    Video,
    /// Still or animated raster image.
    Image,
}

/// Asset reference resolved through the site's directory conventions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRef {
    /// `/videos/{name}.mp4`
    Video(String),
    /// `/gifs/{name}.gif`
    Gif(String),
    /// `/images/{name}.png`
    Png(String),
    /// Explicit site-absolute path, used verbatim.
    Path(String),
}

impl AssetRef {
    /// Site-absolute path of the asset.
    pub fn path(&self) -> String {
        match self {
            Self::Video(name) => format!("/videos/{name}.mp4"),
            Self::Gif(name) => format!("/gifs/{name}.gif"),
            Self::Png(name) => format!("/images/{name}.png"),
            Self::Path(p) => p.clone(),
        }
    }

    /// Media category decoded from this asset.
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Video(_) => MediaKind::Video,
            Self::Gif(_) | Self::Png(_) => MediaKind::Image,
            Self::Path(p) => {
                if p.ends_with(".mp4") || p.ends_with(".webm") {
                    MediaKind::Video
                } else {
                    MediaKind::Image
                }
            }
        }
    }

    /// Validate the asset name or path.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Video(name) | Self::Gif(name) | Self::Png(name) => {
                if name.trim().is_empty() {
                    return Err(ReelError::validation("asset name must be non-empty"));
                }
                if name.contains('/') || name.contains('\\') || name.contains("..") {
                    return Err(ReelError::validation(format!(
                        "asset name '{name}' must not contain path separators or '..'"
                    )));
                }
                Ok(())
            }
            Self::Path(p) => {
                if !p.starts_with('/') {
                    return Err(ReelError::validation(format!(
                        "asset path '{p}' must be site-absolute"
                    )));
                }
                if p.split('/').any(|part| part == "..") {
                    return Err(ReelError::validation(format!(
                        "asset path '{p}' must not contain '..'"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Cache-busting query token shared by every media item of a session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CacheBust(Option<String>);

impl CacheBust {
    /// Token equal to the process start time in milliseconds since the Unix epoch.
    ///
    /// Every call within one process returns the same token.
    pub fn process_start() -> Self {
        static START_MS: OnceLock<u128> = OnceLock::new();
        let ms = *START_MS.get_or_init(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0)
        });
        Self(Some(ms.to_string()))
    }

    /// A fixed token, for reproducible exports.
    pub fn fixed(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// No query suffix.
    pub fn disabled() -> Self {
        Self(None)
    }

    /// Token value, when enabled.
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Configured source of the cache-bust token.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBustMode {
    /// [`CacheBust::process_start`].
    #[default]
    ProcessStart,
    /// [`CacheBust::fixed`].
    Fixed(String),
    /// [`CacheBust::disabled`].
    Disabled,
}

impl CacheBustMode {
    /// Resolve the token for this process.
    pub fn resolve(&self) -> CacheBust {
        match self {
            Self::ProcessStart => CacheBust::process_start(),
            Self::Fixed(t) => CacheBust::fixed(t.clone()),
            Self::Disabled => CacheBust::disabled(),
        }
    }
}

/// One media asset as rendered by the page; immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct MediaItem {
    /// Media category.
    pub kind: MediaKind,
    /// Site-absolute source path.
    pub source_url: String,
    /// Cache-busting token (empty when disabled).
    pub cache_bust: String,
}

impl MediaItem {
    /// Resolve `asset` with the session's cache-bust token.
    pub fn new(asset: &AssetRef, cache_bust: &CacheBust) -> Self {
        Self {
            kind: asset.kind(),
            source_url: asset.path(),
            cache_bust: cache_bust.token().unwrap_or_default().to_string(),
        }
    }

    /// Source URL with the cache-busting query appended.
    pub fn url(&self) -> String {
        if self.cache_bust.is_empty() {
            self.source_url.clone()
        } else {
            format!("{}?v={}", self.source_url, self.cache_bust)
        }
    }

    /// [`Self::url`] under a deployment asset prefix such as `/portfolio`.
    pub fn href(&self, asset_prefix: &str) -> String {
        format!("{}{}", asset_prefix.trim_end_matches('/'), self.url())
    }
}

/// Expand a static list of video names into media items, once, with one shared token.
pub fn expand_videos<S: AsRef<str>>(names: &[S], cache_bust: &CacheBust) -> Vec<MediaItem> {
    names
        .iter()
        .map(|n| MediaItem::new(&AssetRef::Video(n.as_ref().to_string()), cache_bust))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/media/item.rs"]
mod tests;
