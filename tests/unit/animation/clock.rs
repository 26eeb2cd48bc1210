use super::*;

#[test]
fn running_clock_accumulates() {
    let mut c = AnimationClock::new();
    c.advance(Duration::from_millis(250));
    c.advance(Duration::from_millis(750));
    assert_eq!(c.elapsed(), Duration::from_secs(1));
}

#[test]
fn pause_preserves_elapsed_across_resume() {
    let mut c = AnimationClock::new();
    c.advance(Duration::from_secs(5));
    c.pause();
    c.advance(Duration::from_secs(30));
    assert_eq!(c.elapsed(), Duration::from_secs(5));
    c.resume();
    assert_eq!(c.elapsed(), Duration::from_secs(5));
    c.advance(Duration::from_secs(1));
    assert_eq!(c.elapsed(), Duration::from_secs(6));
}

#[test]
fn loop_phase_wraps_at_period() {
    let p = Duration::from_secs(39);
    assert_eq!(loop_phase(Duration::ZERO, p), 0.0);
    assert_eq!(loop_phase(Duration::from_millis(19_500), p), 0.5);
    assert_eq!(loop_phase(Duration::from_secs(39), p), 0.0);
    assert_eq!(loop_phase(Duration::from_millis(39_000 + 9_750), p), 0.25);
}

#[test]
fn zero_period_has_no_phase() {
    assert_eq!(loop_phase(Duration::from_secs(3), Duration::ZERO), 0.0);
}
