use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    export::opts::ExportOpts,
    foundation::error::ReelResult,
    page::model::Page,
    render::html::{HtmlOpts, render_document},
    session::page_session::{PageSession, SessionOpts, SessionStats},
};

/// What [`export_site`] wrote.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ExportReport {
    /// Rendered document.
    pub index: PathBuf,
    /// Page model the document was rendered from.
    pub page_json: PathBuf,
    /// Public URL of the document.
    pub url: String,
    /// Document size in bytes.
    pub html_bytes: usize,
    /// Session counters at render time.
    pub stats: SessionStats,
}

/// Render the first screen of `page` and write it under `out_dir`.
///
/// The document starts from the initial snapshot. Its inline observer script takes over
/// reveals and conveyor mounting once the page loads.
#[tracing::instrument(skip(page, out_dir, opts), fields(out_dir = %out_dir.display()))]
pub fn export_site(page: Page, out_dir: &Path, opts: &ExportOpts) -> ReelResult<ExportReport> {
    opts.validate()?;

    let session_opts = SessionOpts {
        viewport_width: f64::from(page.canvas.width),
        viewport_height: opts.viewport_height,
        scroll_y: 0.0,
        cache_bust: opts.cache_bust.clone(),
    };
    let mut session = PageSession::new(page, session_opts)?;
    let snapshot = session.snapshot();
    let stats = session.stats();

    let html = render_document(
        &snapshot,
        &HtmlOpts {
            asset_prefix: opts.asset_prefix.clone(),
            title: opts.title.clone(),
        },
    );
    let page_json = session.page().to_json()?;
    session.teardown();

    let index = out_dir.join(opts.route_file("/"));
    if let Some(parent) = index.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create export dir '{}'", parent.display()))?;
    }
    std::fs::write(&index, &html).with_context(|| format!("write '{}'", index.display()))?;

    let page_json_path = out_dir.join("page.json");
    std::fs::write(&page_json_path, page_json)
        .with_context(|| format!("write '{}'", page_json_path.display()))?;

    tracing::info!(bytes = html.len(), index = %index.display(), "site exported");
    Ok(ExportReport {
        index,
        page_json: page_json_path,
        url: opts.route_url("/"),
        html_bytes: html.len(),
        stats,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/site.rs"]
mod tests;
