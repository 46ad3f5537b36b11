// Tests for the fixed-clock driver and PNG frame dumps.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use fx_core::*;
use fx_native::{drive, save_frame, DriveOptions, FrameDump};
use glam::Vec2;

fn options(dump: Option<FrameDump>) -> DriveOptions {
    DriveOptions {
        width: 200,
        height: 150,
        fps: 60.0,
        dump,
    }
}

fn title_runner(fired: Rc<Cell<u32>>) -> Runner<TitleAnimator> {
    let config = TitleConfig {
        seed: Some(21),
        ..TitleConfig::default()
    };
    let title = TitleAnimator::new(config, 200, 150, Duration::ZERO).unwrap();
    Runner::new(title).on_complete(move || fired.set(fired.get() + 1))
}

#[test]
fn title_completes_within_its_frame_budget() {
    let fired = Rc::new(Cell::new(0));
    let mut runner = title_runner(fired.clone());
    let mut phases = vec![Phase::Forming];
    let frames = drive(&mut runner, &options(None), 600, |title, _| {
        if phases.last() != Some(&title.phase()) {
            phases.push(title.phase());
        }
    })
    .unwrap();

    // 6s of phases at 60fps; the stopping frame is not counted
    assert_eq!(frames, 360);
    assert_eq!(fired.get(), 1);
    assert!(runner.is_finished());
    assert_eq!(
        phases,
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
fn frame_cap_stops_an_endless_effect() {
    let config = AmbientConfig {
        seed: Some(3),
        ..AmbientConfig::default()
    };
    let field = AmbientField::new(config, 200, 150, Duration::ZERO).unwrap();
    let mut runner = Runner::new(field);
    let mut seen = Vec::new();
    let frames = drive(&mut runner, &options(None), 30, |_, now| seen.push(now)).unwrap();
    assert_eq!(frames, 30);
    assert_eq!(seen.len(), 30);
    assert_eq!(seen[0], Duration::ZERO);
    assert_eq!(seen[30 - 1], Duration::from_secs_f64(29.0 / 60.0));
    assert!(!runner.is_stopped());
}

#[test]
fn non_positive_fps_is_rejected() {
    let mut runner = title_runner(Rc::new(Cell::new(0)));
    let opts = DriveOptions {
        fps: 0.0,
        ..options(None)
    };
    assert!(drive(&mut runner, &opts, 10, |_, _| {}).is_err());
    assert_eq!(runner.frames(), 0);
}

#[test]
fn dumps_every_nth_frame_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frames");
    let mut runner = title_runner(Rc::new(Cell::new(0)));
    let dump = FrameDump {
        dir: out.clone(),
        every: 100,
    };
    drive(&mut runner, &options(Some(dump)), 600, |_, _| {}).unwrap();

    let mut names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "frame_00000.png",
            "frame_00100.png",
            "frame_00200.png",
            "frame_00300.png"
        ]
    );

    let img = image::open(out.join("frame_00100.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (200, 150));
    // the title clears to an opaque background every frame
    assert!(img.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn saved_frames_keep_transparency_and_colors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dot.png");
    let mut surface = PixelSurface::new(16, 8);
    surface.fill_circle(Vec2::new(4.0, 4.0), 2.0, Rgb::new(99, 102, 241), 1.0);
    save_frame(&path, &surface).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (16, 8));
    assert_eq!(img.get_pixel(4, 4).0, [99, 102, 241, 255]);
    assert_eq!(img.get_pixel(15, 7).0, [0, 0, 0, 0]);
    assert_eq!(img.as_raw().as_slice(), surface.as_bytes());
}
