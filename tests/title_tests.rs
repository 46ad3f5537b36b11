// Host-side tests for the loading-screen title effect.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use fx_core::constants::{BACKGROUND, PRE_EXIT_SPREAD, PRE_EXIT_WAVE_BOOST, TITLE_PALETTE};
use fx_core::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn seeded(seed: u64) -> TitleConfig {
    TitleConfig {
        seed: Some(seed),
        ..TitleConfig::default()
    }
}

fn title(config: TitleConfig) -> TitleAnimator {
    TitleAnimator::new(config, 400, 300, Duration::ZERO).unwrap()
}

fn mean_distance(t: &TitleAnimator) -> f32 {
    let sum: f32 = t
        .particles()
        .iter()
        .map(|tp| tp.particle.distance_to_target())
        .sum();
    sum / t.particle_count() as f32
}

#[test]
fn particle_count_matches_on_cells() {
    let t = title(seeded(1));
    assert_eq!(t.particle_count(), 90);
    assert_eq!(t.phase(), Phase::Forming);

    let custom = TitleConfig {
        word: "BD".into(),
        ..seeded(1)
    };
    assert_eq!(title(custom).particle_count(), 31 + 28);
}

#[test]
fn particles_start_on_the_surface_with_valid_attributes() {
    let t = title(seeded(7));
    for tp in t.particles() {
        let p = &tp.particle;
        assert!((0.0..400.0).contains(&p.pos.x));
        assert!((0.0..300.0).contains(&p.pos.y));
        assert!(p.size >= 3.0 && p.size < 5.0);
        assert!(p.opacity >= 0.3 && p.opacity < 1.0);
        assert!(p.wave_amplitude >= 2.0 && p.wave_amplitude < 6.0);
        assert!(TITLE_PALETTE.contains(&p.color));
        assert_eq!(tp.base_opacity, p.opacity);
        assert!(tp.dissolve_from.is_none());
    }
}

#[test]
fn same_seed_same_particles() {
    let a = title(seeded(42));
    let b = title(seeded(42));
    let c = title(seeded(43));
    let pos = |t: &TitleAnimator| {
        t.particles()
            .iter()
            .map(|tp| tp.particle.pos)
            .collect::<Vec<_>>()
    };
    assert_eq!(pos(&a), pos(&b));
    assert_ne!(pos(&a), pos(&c));
}

#[test]
fn invalid_configuration_is_rejected() {
    let unknown = TitleConfig {
        word: "DSQ".into(),
        ..TitleConfig::default()
    };
    assert_eq!(
        TitleAnimator::new(unknown, 400, 300, Duration::ZERO).err(),
        Some(ConfigError::UnknownGlyph('Q'))
    );
    let mut zero = TitleConfig::default();
    zero.timings.dissolving = Duration::ZERO;
    assert!(matches!(
        TitleAnimator::new(zero, 400, 300, Duration::ZERO),
        Err(ConfigError::ZeroDuration("dissolving"))
    ));
}

#[test]
fn forming_pulls_particles_toward_their_targets() {
    let mut t = title(seeded(3));
    let start = mean_distance(&t);
    let mut now = 0;
    while now < 1200 {
        t.step(ms(now));
        now += 16;
    }
    assert_eq!(t.phase(), Phase::Forming);
    assert!(mean_distance(&t) < start * 0.5);
}

#[test]
fn default_run_fires_completion_once_at_six_seconds() {
    let fired = Rc::new(Cell::new(0u32));
    let counter = fired.clone();
    let mut runner =
        Runner::new(title(seeded(5))).on_complete(move || counter.set(counter.get() + 1));
    let mut surface = PixelSurface::new(400, 300);

    let mut seen = Vec::new();
    let mut now = 0;
    while now < 6000 {
        let control = runner.tick(ms(now), Some(&mut surface));
        assert_eq!(control, Control::Continue, "stopped early at {now}ms");
        if [500, 1500, 4200, 4900].contains(&now) {
            seen.push(runner.effect().phase());
        }
        now += 10;
    }
    assert_eq!(
        seen,
        vec![Phase::Forming, Phase::Holding, Phase::PreExit, Phase::Dissolving]
    );
    assert_eq!(fired.get(), 0);

    assert_eq!(runner.tick(ms(6000), Some(&mut surface)), Control::Stop);
    assert_eq!(fired.get(), 1);
    assert_eq!(runner.effect().phase(), Phase::Complete);
    assert!(runner.is_finished());

    // later frames neither restart nor fire again
    for extra in 1..5 {
        assert_eq!(runner.tick(ms(6000 + extra * 16), Some(&mut surface)), Control::Stop);
    }
    assert_eq!(fired.get(), 1);
}

#[test]
fn holding_oscillation_averages_to_the_target() {
    let config = TitleConfig {
        timings: TitleTimings {
            forming: ms(16),
            holding: ms(120_000),
            pre_exit: None,
            dissolving: ms(100),
        },
        ..seeded(9)
    };
    let mut t = title(config);
    let n = t.particle_count();
    let mut sums = vec![glam::Vec2::ZERO; n];
    let mut samples = 0u32;
    let mut now = 0;
    while now < 120_016 {
        t.step(ms(now));
        if t.phase() == Phase::Holding {
            for (sum, tp) in sums.iter_mut().zip(t.particles()) {
                *sum += tp.particle.pos - tp.particle.target;
            }
            samples += 1;
        }
        now += 16;
    }
    assert!(samples > 7000);
    for (i, sum) in sums.iter().enumerate() {
        let mean = *sum / samples as f32;
        assert!(mean.length() < 0.5, "particle {i} drifted by {mean:?}");
    }
}

#[test]
fn holding_stays_close_to_target() {
    let mut t = title(seeded(11));
    let mut now = 0;
    while now <= 2000 {
        t.step(ms(now));
        now += 16;
    }
    assert_eq!(t.phase(), Phase::Holding);
    for tp in t.particles() {
        // wave amplitude is below 6px on x and below 3.6px on y
        let off = tp.particle.pos - tp.particle.target;
        assert!(off.x.abs() <= 6.0 && off.y.abs() <= 3.6, "{off:?}");
    }
}

#[test]
fn pre_exit_raises_opacity_toward_full() {
    let mut t = title(seeded(12));
    let mut now = 0;
    while now <= 4790 {
        t.step(ms(now));
        now += 10;
    }
    assert_eq!(t.phase(), Phase::PreExit);
    for tp in t.particles() {
        assert!(tp.particle.opacity >= tp.base_opacity);
        assert!(tp.particle.opacity <= 1.0);
    }
    let mean: f32 =
        t.particles().iter().map(|tp| tp.particle.opacity).sum::<f32>() / t.particle_count() as f32;
    assert!(mean > 0.95, "mean opacity {mean}");
}

#[test]
fn dissolving_opacity_only_falls_and_ends_at_zero() {
    let mut t = title(seeded(13));
    let mut now = 0;
    let mut prev: Option<Vec<f32>> = None;
    let mut finished = false;
    while now <= 7000 {
        let step = t.step(ms(now));
        if t.phase() >= Phase::Dissolving {
            let opacities: Vec<f32> = t.particles().iter().map(|tp| tp.particle.opacity).collect();
            if let Some(prev) = &prev {
                for (before, after) in prev.iter().zip(&opacities) {
                    assert!(after <= before, "opacity rose from {before} to {after}");
                }
            }
            prev = Some(opacities);
        }
        if step == Step::Finished {
            finished = true;
            break;
        }
        now += 16;
    }
    assert!(finished);
    assert!(now >= 6000);
    assert!(t.particles().iter().all(|tp| tp.particle.opacity == 0.0));
    assert!(t.particles().iter().all(|tp| tp.dissolve_from.is_some()));
}

#[test]
fn burst_dissolve_moves_particles_away_from_the_centroid() {
    let config = TitleConfig {
        dissolve: DissolveStyle::Burst,
        ..seeded(14)
    };
    let mut t = title(config);
    let mut now = 0;
    while t.phase() != Phase::Dissolving {
        t.step(ms(now));
        now += 16;
    }
    let c = t.centroid();
    let outward = t
        .particles()
        .iter()
        .filter(|tp| (tp.particle.pos - c).dot(tp.particle.vel) > 0.0)
        .count();
    assert!(outward * 10 >= t.particle_count() * 9);
}

#[test]
fn disabled_pre_exit_still_completes() {
    let mut config = seeded(15);
    config.timings.pre_exit = None;
    let mut t = title(config);
    let mut phases = vec![t.phase()];
    let mut now = 0;
    while t.step(ms(now)) == Step::Running {
        if t.phase() != *phases.last().unwrap() {
            phases.push(t.phase());
        }
        now += 16;
    }
    phases.push(t.phase());
    phases.dedup();
    assert_eq!(
        phases,
        vec![Phase::Forming, Phase::Holding, Phase::Dissolving, Phase::Complete]
    );
    assert!(now >= 5200);
}

#[test]
fn resize_restarts_from_forming_with_new_layout() {
    let mut t = title(seeded(16));
    let mut now = 0;
    while now <= 2000 {
        t.step(ms(now));
        now += 16;
    }
    assert_eq!(t.phase(), Phase::Holding);

    t.resize(800, 600, ms(2000));
    assert_eq!(t.phase(), Phase::Forming);
    assert_eq!(t.size(), (800, 600));
    assert_eq!(t.particle_count(), 90);
    let expected = GlyphTable::builtin().spell("DSB").unwrap().layout(800.0, 600.0, 8.0);
    for (tp, target) in t.particles().iter().zip(&expected) {
        assert_eq!(tp.particle.target, *target);
        assert!((0.0..800.0).contains(&tp.particle.pos.x));
        assert!((0.0..600.0).contains(&tp.particle.pos.y));
    }

    // the restarted run keeps the full phase budget from the resize time
    t.step(ms(2000 + 1199));
    assert_eq!(t.phase(), Phase::Forming);
    t.step(ms(2000 + 1200));
    assert_eq!(t.phase(), Phase::Holding);
}

#[test]
fn glow_is_drawn_only_while_holding() {
    let config = TitleConfig {
        background: Rgb::new(0, 0, 0),
        ..seeded(17)
    };
    let mut t = title(config);
    let mut surface = PixelSurface::new(400, 300);

    // glow color is blue-dominant; on black it tints a wide halo around every particle
    let tinted = |s: &PixelSurface| {
        s.pixels()
            .iter()
            .filter(|p| p.b > p.r && p.b > 0 && p.r > 0)
            .count()
    };

    t.step(ms(0));
    t.draw(&mut surface, ms(0));
    let forming = tinted(&surface);

    let mut now = 16;
    while now <= 2000 {
        t.step(ms(now));
        now += 16;
    }
    t.draw(&mut surface, ms(2000));
    let holding = tinted(&surface);
    assert!(holding > forming * 2, "glow {holding} vs {forming}");
}

#[test]
fn drawing_clears_to_the_background() {
    let t = title(seeded(18));
    let mut surface = PixelSurface::new(400, 300);
    surface.clear(Some(Rgb::WHITE));
    t.draw(&mut surface, Duration::ZERO);
    let bg = Rgba8::opaque(BACKGROUND);
    let cleared = surface.pixels().iter().filter(|p| **p == bg).count();
    assert!(cleared > 400 * 300 * 9 / 10);
    assert!(surface.pixels().iter().all(|p| p.a == 255));
}

/// Step on a 10ms clock from `now` until `phase` is reached; returns the time of that step.
fn step_until(t: &mut TitleAnimator, mut now: u64, phase: Phase) -> u64 {
    loop {
        t.step(ms(now));
        if t.phase() == phase {
            return now;
        }
        now += 10;
        assert!(now < 10_000, "never reached {phase:?}");
    }
}

#[test]
fn late_pre_exit_spreads_away_from_the_centroid() {
    let mut t = title(seeded(19));
    let mut now = step_until(&mut t, 0, Phase::PreExit);
    while now < 4790 {
        now += 10;
        t.step(ms(now));
    }
    assert_eq!(t.phase(), Phase::PreExit);

    let c = t.centroid();
    let s = smoothstep(t.clock().progress(ms(now)));
    let spread = 1.0 + PRE_EXIT_SPREAD * s;
    let wave_gain = 1.0 + PRE_EXIT_WAVE_BOOST * s;
    let time = ms(now).as_secs_f32() * 1000.0;
    assert!(spread > 1.05);
    for tp in t.particles() {
        let p = &tp.particle;
        let wave = p.wave_offset(time, p.target.x) * wave_gain;
        let expected = c + (p.target - c) * spread + wave;
        assert!(p.pos.distance(expected) < 1e-3, "{:?} vs {expected:?}", p.pos);
        // farther out than the letter target, up to the boosted wave
        let reach = (p.target - c).length();
        assert!(p.pos.distance(c) >= reach * 1.05 - wave.length() - 1e-3);
    }
}

#[test]
fn brightening_grows_with_pre_exit_progress() {
    let mut t = title(seeded(20));
    let start = step_until(&mut t, 0, Phase::PreExit);
    assert!(t.particles().iter().all(|tp| !tp.bright));

    let mut early = 0;
    let mut late = 0;
    let mut frames = (0, 0);
    let mut now = start;
    while t.phase() == Phase::PreExit {
        let bright = t.particles().iter().filter(|tp| tp.bright).count();
        let progress = t.clock().progress(ms(now));
        if progress <= 0.1 {
            early += bright;
            frames.0 += 1;
        } else if progress >= 0.9 {
            late += bright;
            frames.1 += 1;
        }
        now += 10;
        t.step(ms(now));
    }
    assert!(frames.0 >= 8 && frames.1 >= 7, "{frames:?}");
    let n = t.particle_count();
    let late_share = late as f32 / (frames.1 * n) as f32;
    assert!(early * 10 < late, "early {early}, late {late}");
    assert!((0.45..0.75).contains(&late_share), "late share {late_share}");
    // dissolving drops the shimmer
    assert_eq!(t.phase(), Phase::Dissolving);
    assert!(t.particles().iter().all(|tp| !tp.bright));
}

fn assert_restarted(t: &TitleAnimator, at: u64, size: (u32, u32)) {
    assert_eq!(t.phase(), Phase::Forming);
    assert_eq!(t.size(), size);
    assert_eq!(t.particle_count(), 90);
    assert_eq!(t.clock().phase_start(), ms(at));
    for tp in t.particles() {
        assert!(tp.dissolve_from.is_none());
        assert!(!tp.bright);
        assert_eq!(tp.particle.vel, glam::Vec2::ZERO);
        assert_eq!(tp.base_opacity, tp.particle.opacity);
    }
}

#[test]
fn resize_restarts_from_any_running_phase() {
    for (seed, phase) in [
        (21, Phase::Forming),
        (22, Phase::Holding),
        (23, Phase::PreExit),
        (24, Phase::Dissolving),
    ] {
        let mut t = title(seeded(seed));
        let mut now = step_until(&mut t, 0, phase);
        // well inside the phase
        for _ in 0..20 {
            now += 10;
            t.step(ms(now));
        }
        assert_eq!(t.phase(), phase);

        t.resize(640, 480, ms(now));
        assert_restarted(&t, now, (640, 480));

        // the restarted run completes one full budget after the resize
        let end = now + 6000;
        while now < end - 10 {
            now += 10;
            assert_eq!(t.step(ms(now)), Step::Running, "{phase:?} resize, {now}ms");
        }
        assert_eq!(t.step(ms(end)), Step::Finished);
    }
}

#[test]
fn repeated_resizes_keep_one_clean_layout() {
    let mut t = title(seeded(25));
    step_until(&mut t, 0, Phase::Holding);
    let sizes = [(320, 240), (1024, 768), (1, 1), (800, 600)];
    let mut now = 2000;
    for i in 0..10 {
        let size = sizes[i % sizes.len()];
        t.resize(size.0, size.1, ms(now));
        assert_restarted(&t, now, size);
        t.step(ms(now + 5));
        now += 16;
    }
    let last = now - 16;
    assert_eq!(t.size(), (1024, 768));
    let expected = GlyphTable::builtin()
        .spell("DSB")
        .unwrap()
        .layout(1024.0, 768.0, 8.0);
    let targets: Vec<_> = t.particles().iter().map(|tp| tp.particle.target).collect();
    assert_eq!(targets, expected);

    // one completion, one budget after the last resize
    let mut finished_at = None;
    let mut now = last + 10;
    while now <= last + 7000 {
        if t.step(ms(now)) == Step::Finished && finished_at.is_none() {
            finished_at = Some(now);
        }
        now += 10;
    }
    assert_eq!(finished_at, Some(last + 6000));
}
