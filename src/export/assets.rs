use std::path::{Path, PathBuf};

use crate::{
    media::item::{AssetRef, MediaKind},
    page::model::Page,
};

/// Result of probing one referenced asset on disk.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AssetProbe {
    /// Site-absolute path as referenced by the page.
    pub path: String,
    /// Resolved file under the asset root.
    pub file: PathBuf,
    /// Media category.
    pub kind: MediaKind,
    /// Decoded pixel size for images.
    pub dimensions: Option<(u32, u32)>,
    /// File size in bytes.
    pub bytes: Option<u64>,
    /// Why the asset is unusable, if it is.
    pub problem: Option<String>,
}

/// Probes for every distinct asset a page references.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct AssetReport {
    /// One entry per distinct path, in page order.
    pub probes: Vec<AssetProbe>,
}

impl AssetReport {
    /// Probes that found a problem.
    pub fn problems(&self) -> impl Iterator<Item = &AssetProbe> {
        self.probes.iter().filter(|p| p.problem.is_some())
    }

    /// `true` when every asset resolved.
    pub fn is_ok(&self) -> bool {
        self.problems().next().is_none()
    }
}

/// Resolve every asset of `page` under `root` (the site's `public/` directory) and probe it.
///
/// Missing files and undecodable images are reported, never raised. Images are checked
/// with [`image::image_dimensions`], videos only for presence and size.
#[tracing::instrument(skip(page))]
pub fn check_assets(page: &Page, root: &Path) -> AssetReport {
    let mut seen = std::collections::BTreeSet::new();
    let mut probes = Vec::new();
    for asset in page.assets() {
        let path = asset.path();
        if !seen.insert(path.clone()) {
            continue;
        }
        let probe = probe(&asset, root);
        if let Some(problem) = &probe.problem {
            tracing::warn!(path = %probe.path, %problem, "asset unusable");
        }
        probes.push(probe);
    }
    tracing::debug!(distinct = probes.len(), "assets probed");
    AssetReport { probes }
}

fn probe(asset: &AssetRef, root: &Path) -> AssetProbe {
    let path = asset.path();
    let file = root.join(path.trim_start_matches('/'));
    let kind = asset.kind();
    let mut out = AssetProbe {
        path,
        file: file.clone(),
        kind,
        dimensions: None,
        bytes: None,
        problem: None,
    };

    match std::fs::metadata(&file) {
        Ok(meta) if meta.is_file() => out.bytes = Some(meta.len()),
        Ok(_) => {
            out.problem = Some("not a regular file".to_string());
            return out;
        }
        Err(e) => {
            out.problem = Some(format!("missing: {e}"));
            return out;
        }
    }

    if kind == MediaKind::Image {
        match image::image_dimensions(&file) {
            Ok(dims) => out.dimensions = Some(dims),
            Err(e) => out.problem = Some(format!("undecodable image: {e}")),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/assets.rs"]
mod tests;
