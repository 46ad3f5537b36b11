// Host-side tests for the title phase machine.

use fx_core::*;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn shipped_timings() -> TitleTimings {
    TitleTimings {
        forming: ms(1200),
        holding: ms(2800),
        pre_exit: Some(ms(800)),
        dissolving: ms(1200),
    }
}

/// Advance on a fixed frame clock, returning the phase observed at each requested time.
fn phases_at(clock: &mut PhaseClock, times: &[u64], frame_ms: u64) -> Vec<Phase> {
    let mut out = Vec::new();
    let mut t = 0;
    let last = *times.iter().max().unwrap();
    while t <= last {
        clock.advance(ms(t));
        if times.contains(&t) {
            out.push(clock.phase());
        }
        t += frame_ms;
    }
    out
}

#[test]
fn shipped_schedule_reports_expected_phases() {
    let mut clock = PhaseClock::new(shipped_timings(), Duration::ZERO);
    let seen = phases_at(&mut clock, &[500, 1500, 4200, 4900, 6000], 10);
    assert_eq!(
        seen,
        vec![
            Phase::Forming,
            Phase::Holding,
            Phase::PreExit,
            Phase::Dissolving,
            Phase::Complete
        ]
    );
}

#[test]
fn completion_is_not_reached_before_total() {
    let timings = shipped_timings();
    assert_eq!(timings.total(), ms(6000));
    let mut clock = PhaseClock::new(timings, Duration::ZERO);
    let mut t = 0;
    while t < 6000 {
        clock.advance(ms(t));
        assert_ne!(clock.phase(), Phase::Complete, "complete at {t}ms");
        t += 16;
    }
}

#[test]
fn late_frames_never_skip_a_phase() {
    let mut clock = PhaseClock::new(shipped_timings(), Duration::ZERO);
    let far = ms(60_000);
    let mut order = vec![clock.phase()];
    while let Some(tr) = clock.advance(far) {
        assert_eq!(tr.from, *order.last().unwrap());
        order.push(tr.to);
    }
    assert_eq!(
        order,
        vec![
            Phase::Forming,
            Phase::Holding,
            Phase::PreExit,
            Phase::Dissolving,
            Phase::Complete
        ]
    );
    // scheduled starts follow the configured durations, not the late frame time
    assert_eq!(clock.phase_start(), ms(6000));
}

#[test]
fn phases_only_move_forward() {
    let mut clock = PhaseClock::new(shipped_timings(), Duration::ZERO);
    let mut prev = clock.phase();
    for t in (0..7000).step_by(7) {
        clock.advance(ms(t));
        assert!(clock.phase() >= prev);
        prev = clock.phase();
    }
    // a clock going backwards does not regress the phase either
    clock.advance(ms(10));
    assert_eq!(clock.phase(), Phase::Complete);
}

#[test]
fn disabled_pre_exit_goes_straight_to_dissolving() {
    let timings = TitleTimings {
        pre_exit: None,
        ..shipped_timings()
    };
    let mut clock = PhaseClock::new(timings, Duration::ZERO);
    clock.advance(ms(1200));
    let tr = clock.advance(ms(4000)).unwrap();
    assert_eq!((tr.from, tr.to), (Phase::Holding, Phase::Dissolving));
    assert_eq!(clock.duration_of(Phase::PreExit), None);
}

#[test]
fn transition_starts_are_exact() {
    let mut clock = PhaseClock::new(shipped_timings(), ms(100));
    // frame lands 13ms after forming should have ended
    let tr = clock.advance(ms(1313)).unwrap();
    assert_eq!(tr.at, ms(1300));
    assert_eq!(clock.elapsed(ms(1313)), ms(13));
}

#[test]
fn progress_is_clamped() {
    let clock = PhaseClock::new(shipped_timings(), ms(1000));
    assert_eq!(clock.progress(ms(0)), 0.0);
    assert!((clock.progress(ms(1600)) - 0.5).abs() < 1e-6);
    assert_eq!(clock.progress(ms(9000)), 1.0);
}

#[test]
fn restart_returns_to_forming() {
    let mut clock = PhaseClock::new(shipped_timings(), Duration::ZERO);
    clock.advance(ms(1300));
    assert_eq!(clock.phase(), Phase::Holding);
    clock.restart(ms(2000));
    assert_eq!(clock.phase(), Phase::Forming);
    assert_eq!(clock.phase_start(), ms(2000));
}
