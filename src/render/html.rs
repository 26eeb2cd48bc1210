use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    conveyor::lane::Direction,
    foundation::core::Rect,
    media::{
        item::{CacheBust, MediaItem, MediaKind},
        loader::{PreloadAs, preload_as, should_lazy_load},
    },
    mount::{cell::CellView, slot::VideoAttrs},
    page::model::ImageBox,
    session::snapshot::{EagerView, LaneView, PageSnapshot, RevealView},
    visibility::{hysteresis::SAMPLE_THRESHOLDS, tracker::TrackingMode},
};

/// Options for [`render_document`].
#[derive(Clone, Debug, PartialEq)]
pub struct HtmlOpts {
    /// Prefix prepended to every asset URL (for example `/portfolio`).
    pub asset_prefix: String,
    /// Document title.
    pub title: String,
}

impl Default for HtmlOpts {
    fn default() -> Self {
        Self {
            asset_prefix: String::new(),
            title: "Portfolio".to_string(),
        }
    }
}

const BASE_CSS: &str = "\
html, body { margin: 0; background: #000; overflow-anchor: none; }
.page { position: relative; margin: 0 auto; overflow: visible; }
.abs { position: absolute; }
@keyframes scroll { 0% { transform: translateX(0); } 100% { transform: translateX(-50%); } }
@keyframes scroll-reverse { 0% { transform: translateX(-50%); } 100% { transform: translateX(0); } }
.scroll-animate { animation-name: scroll; }
.scroll-animate-reverse { animation-name: scroll-reverse; }
.scroll-animate, .scroll-animate-reverse {
  display: flex; animation-timing-function: linear; animation-iteration-count: infinite;
  will-change: transform; backface-visibility: hidden;
}
.group:hover .scroll-animate, .group:hover .scroll-animate-reverse { animation-play-state: paused; }
.cell { flex: none; }
.gif-wrapper {
  border-radius: 8px; overflow: hidden; transition: transform .3s ease;
  will-change: transform; backface-visibility: hidden;
}
.gif-wrapper:hover { transform: scale(1.1); z-index: 10; }
.media { position: relative; width: 100%; height: 100%; }
.media video, .media img { width: 100%; height: 100%; object-fit: cover; display: block; }
.spinner-wrap {
  position: absolute; inset: 0; display: flex; align-items: center; justify-content: center;
  background: rgba(0,0,0,.1);
}
.spinner {
  width: 32px; height: 32px; border: 4px solid #fff; border-top-color: transparent;
  border-radius: 50%; animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.round { border-radius: 50%; overflow: hidden; }
.logo:hover { animation: shake .4s ease-in-out; }
@keyframes shake {
  0% { transform: translate(0,0) rotate(0); }
  25% { transform: translate(2px,0) rotate(1deg); }
  50% { transform: translate(-2px,0) rotate(-1deg); }
  75% { transform: translate(2px,0) rotate(1deg); }
  100% { transform: translate(0,0) rotate(0); }
}
";

fn px(v: f64) -> String {
    let r = v.round();
    if (v - r).abs() < 1e-9 {
        format!("{r}px")
    } else {
        format!("{v:.3}px")
    }
}

fn box_style(r: Rect) -> String {
    format!(
        "left: {}; top: {}; width: {}; height: {};",
        px(r.x0),
        px(r.y0),
        px(r.width()),
        px(r.height())
    )
}

/// Client-side reveal driver. Mirrors the hysteresis and once rules of the tracker: each
/// `[data-track]` element carries its bounds, reveal items toggle their style and cells
/// mount media on reveal and drop it on hide.
const CLIENT_JS: &str = r#"(function () {
  var thresholds = __THRESHOLDS__;
  function loaded(el) {
    var spin = el.parentNode.querySelector('.spinner-wrap');
    if (spin) spin.remove();
    el.style.opacity = '1';
  }
  function watch(el) {
    if (el.tagName === 'VIDEO') {
      if (el.readyState >= 2) return loaded(el);
      el.addEventListener('loadeddata', function () { loaded(el); }, { once: true });
    } else {
      if (el.complete && el.naturalWidth > 0) return loaded(el);
      el.addEventListener('load', function () { loaded(el); }, { once: true });
    }
  }
  function mountMedia(cell) {
    var wrap = document.createElement('div');
    wrap.className = 'media';
    wrap.innerHTML = '<div class="spinner-wrap"><div class="spinner"></div></div>';
    var video = cell.dataset.kind === 'video';
    var el = document.createElement(video ? 'video' : 'img');
    if (video) {
      el.autoplay = true;
      el.loop = true;
      el.muted = true;
      el.playsInline = true;
    }
    el.style.opacity = '0';
    el.style.transition = 'opacity 300ms';
    el.src = cell.dataset.src;
    wrap.appendChild(el);
    cell.appendChild(wrap);
    cell.classList.add('gif-wrapper');
    watch(el);
  }
  function unmountMedia(cell) {
    var wrap = cell.querySelector('.media');
    if (!wrap) return;
    var v = wrap.querySelector('video');
    if (v) {
      v.pause();
      v.removeAttribute('src');
      v.load();
    }
    wrap.remove();
    cell.classList.remove('gif-wrapper');
  }
  function apply(el, on) {
    el.dataset.revealed = on ? '1' : '0';
    if (el.dataset.track === 'reveal') {
      el.classList.toggle('revealed', on);
      el.style.opacity = on ? '1' : '0';
      el.style.transform = 'translateY(' + (on ? 0 : el.dataset.rise) + 'px)';
    } else if (on) {
      if (!el.querySelector('.media')) mountMedia(el);
    } else {
      unmountMedia(el);
    }
  }
  var io = new IntersectionObserver(function (entries) {
    entries.forEach(function (e) {
      var el = e.target, r = e.intersectionRatio, on = el.dataset.revealed === '1';
      if (el.dataset.once !== undefined) {
        if (e.isIntersecting && r >= +el.dataset.once) {
          apply(el, true);
          io.unobserve(el);
        }
        return;
      }
      if (!on && r > +el.dataset.enter) apply(el, true);
      else if (on && r < +el.dataset.exit) apply(el, false);
    });
  }, { threshold: thresholds });
  document.querySelectorAll('[data-track]').forEach(function (el) {
    if (el.dataset.once !== undefined && el.dataset.revealed === '1') return;
    io.observe(el);
  });
  document.querySelectorAll('.media video, .media img').forEach(watch);
})();"#;

/// `enter`, `exit` and `once` attribute values of a tracked element.
fn tracking_attrs(mode: TrackingMode) -> (Option<f64>, Option<f64>, Option<f64>) {
    match mode {
        TrackingMode::Hysteresis(h) => (Some(h.enter), Some(h.exit), None),
        TrackingMode::Once { threshold } => (None, None, Some(threshold)),
    }
}

fn revealed_flag(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}

/// Observer thresholds covering every tracking mode on the page.
fn client_thresholds(snap: &PageSnapshot) -> Vec<f64> {
    let mut t = SAMPLE_THRESHOLDS.to_vec();
    for mode in snap
        .reveal
        .iter()
        .map(|r| r.tracking)
        .chain(snap.lanes.iter().map(|l| l.tracking))
    {
        t.extend(mode.thresholds());
    }
    t.sort_by(f64::total_cmp);
    t.dedup();
    t
}

fn client_script(snap: &PageSnapshot) -> String {
    let thresholds = client_thresholds(snap)
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    CLIENT_JS.replace("__THRESHOLDS__", &format!("[{thresholds}]"))
}

fn media(item: &MediaItem, opacity: f64, spinner: bool, lazy: bool, opts: &HtmlOpts) -> Markup {
    let src = item.href(&opts.asset_prefix);
    let style = if spinner {
        "opacity: 0;".to_string()
    } else {
        format!("opacity: {opacity:.3}; transition: opacity 300ms;")
    };
    let loading = if lazy { "lazy" } else { "eager" };
    let attrs = VideoAttrs::AMBIENT;
    html! {
        div.media {
            @if spinner {
                div.spinner-wrap { div.spinner {} }
            }
            @match item.kind {
                MediaKind::Video => {
                    video src=(src) autoplay[attrs.autoplay] loop[attrs.looping] muted[attrs.muted]
                        playsinline[attrs.plays_inline] controls[attrs.controls] style=(style) {}
                }
                MediaKind::Image => {
                    img src=(src) alt="Animated GIF" loading=(loading) style=(style);
                }
            }
        }
    }
}

fn eager(view: &EagerView, class: &str, extra: &str, lazy: bool, opts: &HtmlOpts) -> Markup {
    html! {
        div class=(format!("abs {class}")) data-element=(view.element.0)
            style=(format!("{}{extra}", box_style(view.rect))) {
            (media(&view.item, view.opacity, view.spinner, lazy, opts))
        }
    }
}

fn image(b: &ImageBox, class: &str, loading: &str, opts: &HtmlOpts) -> Markup {
    let src = MediaItem::new(&b.asset, &CacheBust::disabled()).href(&opts.asset_prefix);
    html! {
        img class=(format!("abs {class}")) src=(src) alt=(class) loading=(loading)
            style=(box_style(b.rect));
    }
}

fn reveal(r: &RevealView, opts: &HtmlOpts) -> Markup {
    let class = if r.revealed { "abs reveal revealed" } else { "abs reveal" };
    let style = format!(
        "{} z-index: {}; opacity: {:.3}; transform: translateY({}); transition: {};",
        box_style(r.image.rect),
        r.z,
        r.style.opacity,
        px(r.style.translate_y_px),
        r.transition.css(&["opacity", "transform"]),
    );
    let src = MediaItem::new(&r.image.asset, &CacheBust::disabled()).href(&opts.asset_prefix);
    let (enter, exit, once) = tracking_attrs(r.tracking);
    html! {
        div class=(class) data-element=(r.element.0) data-track="reveal"
            data-revealed=(revealed_flag(r.revealed)) data-rise=(r.rise_px)
            data-enter=[enter] data-exit=[exit] data-once=[once] style=(style) {
            img src=(src) alt="About" loading="lazy"
                style="width: 100%; height: auto; display: block;";
        }
    }
}

fn lane(l: &LaneView, canvas_width: f64, opts: &HtmlOpts) -> Markup {
    let track_class = match l.direction {
        Direction::Forward => "scroll-animate",
        Direction::Reverse => "scroll-animate-reverse",
    };
    let row = Rect::new(0.0, l.origin.y, canvas_width, l.origin.y + l.cell.height);
    let mut track_style = format!(
        "animation-duration: {}s; animation-delay: -{:.3}s;",
        l.period.as_secs_f64(),
        l.phase * l.period.as_secs_f64()
    );
    if l.paused {
        track_style.push_str(" animation-play-state: paused;");
    }
    let cell_style = format!(
        "width: {}; height: {}; margin-right: {};",
        px(l.cell.width),
        px(l.cell.height),
        px(l.gap_px)
    );
    let (enter, exit, once) = tracking_attrs(l.tracking);
    html! {
        div.abs.group style=(format!("{} overflow: hidden;", box_style(row))) {
            div class=(track_class) style=(track_style) {
                @for ((element, view), source) in l.cells.iter().zip(&l.sources) {
                    @let kind = match source.kind {
                        MediaKind::Video => "video",
                        MediaKind::Image => "image",
                    };
                    @let mounted = matches!(view, CellView::Media { .. });
                    div class=(if mounted { "cell gif-wrapper" } else { "cell" })
                        data-element=(element.0) data-track="cell"
                        data-revealed=(revealed_flag(mounted))
                        data-src=(source.href(&opts.asset_prefix)) data-kind=(kind)
                        data-enter=[enter] data-exit=[exit] data-once=[once]
                        style=(cell_style) {
                        @if let (CellView::Media { item, opacity, spinner, .. }) = view {
                            (media(item, *opacity, *spinner, false, opts))
                        }
                    }
                }
            }
        }
    }
}

/// Preload hints for assets above the fold.
fn preloads(snap: &PageSnapshot, opts: &HtmlOpts) -> Vec<(String, PreloadAs)> {
    let mut out = Vec::new();
    for b in [&snap.hero.logo, &snap.hero.title] {
        let url = b.asset.path();
        if let Some(kind) = preload_as(&url) {
            out.push((format!("{}{url}", opts.asset_prefix.trim_end_matches('/')), kind));
        }
    }
    out
}

/// Render a snapshot as a standalone HTML document.
///
/// The document carries a small observer script, so reveal items and conveyor cells keep
/// responding to scrolling after load.
pub fn render_document(snap: &PageSnapshot, opts: &HtmlOpts) -> String {
    let width = f64::from(snap.canvas.width);
    let height = f64::from(snap.canvas.height);
    let vp = snap.viewport;
    let hero = Rect::new(0.0, 0.0, width, snap.hero.height);
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (opts.title) }
                @for (href, kind) in preloads(snap, opts) {
                    link rel="preload" href=(href) as=(kind.as_str());
                }
                style { (PreEscaped(BASE_CSS)) }
            }
            body {
                div.page style=(format!("width: {}; height: {};", px(width), px(height))) {
                    @if let Some(b) = &snap.backdrop {
                        (eager(b, "backdrop", " z-index: 0; pointer-events: none;", false, opts))
                    }
                    section.abs.hero style=(box_style(hero)) {}
                    (image(&snap.hero.logo, "logo", "eager", opts))
                    (image(&snap.hero.title, "title", "eager", opts))
                    @for r in &snap.reveal {
                        (reveal(r, opts))
                    }
                    @for l in &snap.lanes {
                        (lane(l, width, opts))
                    }
                    @for row in &snap.rows {
                        @let class = if row.round { "row round" } else { "row" };
                        @for cell in &row.cells {
                            (eager(cell, class, " z-index: 10;", false, opts))
                        }
                    }
                    @for layer in &snap.layers {
                        @let lazy = should_lazy_load(layer.top, vp.scroll_y, vp.height);
                        @let src = MediaItem::new(&layer.asset, &CacheBust::disabled())
                            .href(&opts.asset_prefix);
                        img.abs.layer src=(src) alt="" loading=(if lazy { "lazy" } else { "eager" })
                            style=(format!("{} z-index: {};", box_style(layer.rect()), layer.z));
                    }
                    @for o in &snap.overlays {
                        @let placement = format!(
                            " z-index: 10; transform: {};",
                            o.config.css_transform()
                        );
                        @let lazy = should_lazy_load(o.painted_rect().y0, vp.scroll_y, vp.height);
                        (eager(&o.media, "overlay gif-wrapper", &placement, lazy, opts))
                    }
                }
                script { (PreEscaped(client_script(snap))) }
            }
        }
    };
    markup.into_string()
}

#[cfg(test)]
#[path = "../../tests/unit/render/html.rs"]
mod tests;
