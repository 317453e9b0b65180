//! Headless recording of the fluid background to PNG frames.

use std::f64::consts::TAU;

use glam::DVec2;
use log::{debug, info, warn};

use crate::background::FluidBackground;
use crate::error::FluidError;
use crate::field::FluidField;
use crate::frame::{run_frames, FrameControl};
use crate::params::RecordingConfig;
use crate::surface::{HeadlessSurface, RenderSurface};

/// Scripted pointer: a slow Lissajous sweep across the surface at `t` seconds
pub fn pointer_path(t: f64) -> DVec2 {
    DVec2::new(
        0.5 + 0.35 * (TAU * 0.13 * t).sin(),
        0.5 + 0.25 * (TAU * 0.21 * t + 0.7).sin(),
    )
}

/// Record `config.total_frames()` frames of `field` into `config.frames_dir()`.
///
/// Returns the number of frames written.
pub fn record(config: &RecordingConfig, field: FluidField) -> Result<usize, FluidError> {
    std::fs::create_dir_all(config.frames_dir())?;

    let mut surface = HeadlessSurface::new(config.width, config.height);
    let Some(mut background) = FluidBackground::mount(&mut surface, field) else {
        warn!("Headless surface has no drawing context, nothing recorded");
        return Ok(0);
    };

    let total = config.total_frames();
    let fps = config.fps.max(1) as f64;
    info!(
        "Recording {} frames at {}x{} to {}",
        total,
        config.width,
        config.height,
        config.frames_dir().display()
    );

    let token = background.cancellation_token();
    let mut written = 0;
    let mut failure = None;

    run_frames(&token, |n| {
        if n as usize >= total {
            return FrameControl::Stop;
        }

        let p = pointer_path(n as f64 / fps);
        surface.move_pointer(p.x, p.y);
        background.frame(&mut surface);

        let Some(canvas) = surface.context() else {
            return FrameControl::Stop;
        };
        let (width, height) = canvas.size();
        let path = config.frame_path(n as usize);
        if let Err(e) = image::save_buffer(
            &path,
            canvas.as_bytes(),
            width,
            height,
            image::ColorType::Rgba8,
        ) {
            failure = Some(e);
            return FrameControl::Stop;
        }

        written += 1;
        if written % config.fps.max(1) as usize == 0 {
            debug!("Recorded {}/{} frames", written, total);
        }
        FrameControl::Continue
    });

    background.unmount();

    if let Some(e) = failure {
        return Err(e.into());
    }

    info!("Recording complete: {} frames", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FieldParams, Palette};

    #[test]
    fn test_pointer_path_stays_on_surface() {
        for k in 0..600 {
            let p = pointer_path(k as f64 / 60.0);
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_record_writes_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RecordingConfig::new(0.5);
        config.output_dir = dir.path().to_path_buf();
        config.fps = 6;
        config.width = 48;
        config.height = 32;

        let field = FluidField::with_simplex(FieldParams::default(), Palette::default());
        let written = record(&config, field).unwrap();
        assert_eq!(written, 3);

        for n in 0..3 {
            let img = image::open(config.frame_path(n)).unwrap();
            assert_eq!((img.width(), img.height()), (48, 32));
        }
        assert!(!config.frame_path(3).exists());
    }

    #[test]
    fn test_zero_duration_records_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RecordingConfig::new(0.0);
        config.output_dir = dir.path().to_path_buf();

        let field = FluidField::with_simplex(FieldParams::default(), Palette::default());
        assert_eq!(record(&config, field).unwrap(), 0);
    }
}
