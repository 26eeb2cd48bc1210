use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    foundation::error::{ReelError, ReelResult},
    media::item::CacheBustMode,
};

/// Static export settings, mirroring the deployment config of the hosted site.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOpts {
    /// Path the site is served under.
    pub base_path: String,
    /// Prefix for every asset URL.
    pub asset_prefix: String,
    /// Map every route to `route/index.html`.
    pub trailing_slash: bool,
    /// Cache-bust token source for media URLs.
    pub cache_bust: CacheBustMode,
    /// Viewport height used to decide which images load eagerly.
    pub viewport_height: f64,
    /// Document title.
    pub title: String,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            base_path: "/portfolio".to_string(),
            asset_prefix: "/portfolio".to_string(),
            trailing_slash: true,
            cache_bust: CacheBustMode::ProcessStart,
            viewport_height: 1080.0,
            title: "Portfolio".to_string(),
        }
    }
}

impl ExportOpts {
    /// Read options from a JSON file; missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open export config '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ReelError::serde(format!("parse export config JSON: {e}")))
    }

    /// Check path shapes.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [("base_path", &self.base_path), ("asset_prefix", &self.asset_prefix)] {
            if !v.is_empty() && !v.starts_with('/') {
                return Err(ReelError::validation(format!(
                    "{name} must be empty or start with '/' (got '{v}')"
                )));
            }
        }
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(ReelError::validation("export viewport height must be finite and > 0"));
        }
        Ok(())
    }

    /// Output file for `route` relative to the export root.
    ///
    /// `/` is always `index.html`; other routes become `route/index.html` with trailing
    /// slashes and `route.html` without.
    pub fn route_file(&self, route: &str) -> PathBuf {
        let trimmed = route.trim_matches('/');
        if trimmed.is_empty() {
            return PathBuf::from("index.html");
        }
        if self.trailing_slash {
            PathBuf::from(trimmed).join("index.html")
        } else {
            PathBuf::from(format!("{trimmed}.html"))
        }
    }

    /// Public URL of `route` under [`base_path`](Self::base_path).
    pub fn route_url(&self, route: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        let trimmed = route.trim_matches('/');
        match (trimmed.is_empty(), self.trailing_slash) {
            (true, _) => format!("{base}/"),
            (false, true) => format!("{base}/{trimmed}/"),
            (false, false) => format!("{base}/{trimmed}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/opts.rs"]
mod tests;
