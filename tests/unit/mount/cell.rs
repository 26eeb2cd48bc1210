use super::*;
use crate::media::item::{AssetRef, CacheBust};
use crate::visibility::observer::ViewportObserver;

fn cell() -> MountOnVisible {
    MountOnVisible::new(
        MediaItem::new(&AssetRef::Video("space".into()), &CacheBust::fixed("1")),
        Size::new(384.0, 216.0),
        ElementId(1),
        VisibilityTracker::with_hysteresis(),
    )
}

fn s(ratio: f64) -> IntersectionSample {
    IntersectionSample {
        ratio,
        is_intersecting: ratio > 0.0,
    }
}

#[test]
fn hidden_cell_is_a_same_size_placeholder() {
    let mut host = ViewportObserver::new();
    let mut pool = DecoderPool::new();
    let mut c = cell();
    c.mount(&mut host);
    assert_eq!(
        c.view(),
        CellView::Placeholder {
            size: Size::new(384.0, 216.0)
        }
    );
    assert_eq!(pool.acquired_total(), 0);
    c.unmount(&mut host, &mut pool);
}

#[test]
fn media_present_iff_revealed() {
    let mut host = ViewportObserver::new();
    let mut pool = DecoderPool::new();
    let mut c = cell();
    c.mount(&mut host);

    for r in [0.0, 0.1, 0.2, 0.5, 0.1, 0.06, 0.04, 0.0, 0.9, 0.1] {
        c.on_sample(&mut host, &mut pool, s(r));
        assert_eq!(c.is_mounted(), c.revealed());
        assert_eq!(pool.live(), usize::from(c.revealed()));
        assert_eq!(matches!(c.view(), CellView::Media { .. }), c.revealed());
    }
    c.unmount(&mut host, &mut pool);
    assert_eq!(pool.live(), 0);
    assert_eq!(host.active_count(), 0);
}

#[test]
fn hide_releases_the_handle() {
    let mut host = ViewportObserver::new();
    let mut pool = DecoderPool::new();
    let mut c = cell();
    c.mount(&mut host);
    c.on_sample(&mut host, &mut pool, s(0.5));
    let h = c.handle().unwrap();
    assert!(pool.is_live(h));
    assert_eq!(pool.live_urls().collect::<Vec<_>>(), vec!["/videos/space.mp4?v=1"]);

    c.on_sample(&mut host, &mut pool, s(0.0));
    assert!(!pool.is_live(h));
    assert!(c.handle().is_none());
    c.unmount(&mut host, &mut pool);
}

#[test]
fn remount_starts_with_fresh_loaded_flag() {
    let mut host = ViewportObserver::new();
    let mut pool = DecoderPool::new();
    let mut c = cell();
    c.mount(&mut host);

    c.on_sample(&mut host, &mut pool, s(0.5));
    c.media_loaded();
    c.advance(Duration::from_millis(300));
    let CellView::Media { spinner, opacity, .. } = c.view() else {
        panic!("expected mounted media");
    };
    assert!(!spinner);
    assert_eq!(opacity, 1.0);
    let first = c.handle().unwrap();

    c.on_sample(&mut host, &mut pool, s(0.0));
    c.on_sample(&mut host, &mut pool, s(0.5));
    let second = c.handle().unwrap();
    assert_ne!(first, second);
    assert_eq!(c.load_state(), Some(LoadState::Pending));
    let CellView::Media { spinner, opacity, .. } = c.view() else {
        panic!("expected mounted media");
    };
    assert!(spinner);
    assert_eq!(opacity, 0.0);
    assert_eq!(pool.acquired_total(), 2);
    c.unmount(&mut host, &mut pool);
}

#[test]
fn load_events_while_unmounted_are_ignored() {
    let mut c = cell();
    c.media_loaded();
    c.media_failed();
    assert!(c.load_state().is_none());
}

#[test]
fn pool_tracks_peak_concurrency() {
    let mut pool = DecoderPool::new();
    let item = MediaItem::new(&AssetRef::Video("a".into()), &CacheBust::disabled());
    let a = pool.acquire(&item, Size::ZERO);
    let b = pool.acquire(&item, Size::ZERO);
    pool.release(a);
    let _c = pool.acquire(&item, Size::ZERO);
    pool.release(b);
    assert_eq!(pool.peak(), 2);
    assert_eq!(pool.live(), 1);
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn warnings_during(f: impl FnOnce()) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = out.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn dropping_a_mounted_cell_warns_about_the_leaked_handle() {
    let mut host = ViewportObserver::new();
    let mut pool = DecoderPool::new();
    let logs = warnings_during(|| {
        let mut c = cell();
        c.mount(&mut host);
        c.on_sample(&mut host, &mut pool, s(0.5));
        drop(c);
    });
    assert!(logs.contains("media cell dropped while still mounted"));
    assert!(logs.contains("/videos/space.mp4?v=1"));
    assert_eq!(pool.live(), 1);
}

#[test]
fn dropping_an_unmounted_cell_is_silent() {
    let mut host = ViewportObserver::new();
    let mut pool = DecoderPool::new();
    let logs = warnings_during(|| {
        let mut c = cell();
        c.mount(&mut host);
        c.on_sample(&mut host, &mut pool, s(0.5));
        c.unmount(&mut host, &mut pool);
        drop(c);
    });
    assert!(logs.is_empty(), "unexpected warnings: {logs}");
    assert_eq!(pool.live(), 0);
}
