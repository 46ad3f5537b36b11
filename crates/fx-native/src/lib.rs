//! Off-screen driver for the particle effects.
//!
//! Ticks a [`Runner`] on a fixed-rate clock against a [`PixelSurface`] and
//! optionally saves frames as PNG images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use fx_core::{Control, Effect, PixelSurface, Runner, Surface};

/// Where and how often `drive` saves frames.
#[derive(Clone, Debug)]
pub struct FrameDump {
    pub dir: PathBuf,
    /// Save every Nth frame, starting with frame 0.
    pub every: u64,
}

#[derive(Clone, Debug)]
pub struct DriveOptions {
    pub width: u32,
    pub height: u32,
    /// Simulated display refresh rate.
    pub fps: f64,
    pub dump: Option<FrameDump>,
}

impl DriveOptions {
    /// File name of frame `frame` inside the dump directory.
    pub fn frame_name(frame: u64) -> String {
        format!("frame_{:05}.png", frame)
    }
}

/// Tick `runner` on a fixed clock until it stops or `max_frames` is reached.
///
/// Returns the number of frames that ran to completion; the frame on which
/// the runner reports [`Control::Stop`] is not counted.
pub fn drive<E: Effect>(
    runner: &mut Runner<E>,
    opts: &DriveOptions,
    max_frames: u64,
    mut observe: impl FnMut(&E, Duration),
) -> anyhow::Result<u64> {
    anyhow::ensure!(
        opts.fps.is_finite() && opts.fps > 0.0,
        "fps must be positive, got {}",
        opts.fps
    );
    if let Some(dump) = &opts.dump {
        fs::create_dir_all(&dump.dir)
            .with_context(|| format!("creating {}", dump.dir.display()))?;
    }
    let mut surface = PixelSurface::new(opts.width, opts.height);
    let mut frame = 0u64;
    while frame < max_frames {
        let now = Duration::from_secs_f64(frame as f64 / opts.fps);
        let control = runner.tick(now, Some(&mut surface as &mut dyn Surface));
        observe(runner.effect(), now);
        if control == Control::Stop {
            break;
        }
        if let Some(dump) = &opts.dump {
            if frame % dump.every.max(1) == 0 {
                save_frame(&dump.dir.join(DriveOptions::frame_name(frame)), &surface)?;
            }
        }
        frame += 1;
    }
    Ok(frame)
}

/// Encode `surface` as an RGBA PNG; the format follows the file extension.
pub fn save_frame(path: &Path, surface: &PixelSurface) -> anyhow::Result<()> {
    let (w, h) = surface.size();
    let img = image::RgbaImage::from_raw(w, h, surface.as_bytes().to_vec())
        .with_context(|| format!("{}x{} surface does not fill its buffer", w, h))?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
