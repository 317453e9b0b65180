//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use crate::noise::NoiseKind;
use crate::params::{FieldParams, RecordingConfig, RenderConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "truelayer-fluid")]
#[command(about = "Pointer-reactive fluid noise background", long_about = None)]
pub struct Args {
    /// Noise permutation seed
    #[arg(long, default_value_t = 0)]
    pub seed: u32,

    /// Noise generator: simplex (default), open-simplex
    #[arg(long, value_name = "KIND", default_value = "simplex")]
    pub noise: String,

    /// Grid cell size (logical pixels)
    #[arg(long, value_name = "PX", default_value_t = 32.0)]
    pub cell_size: f64,

    /// Window or frame width (pixels)
    #[arg(long)]
    pub width: Option<u32>,

    /// Window or frame height (pixels)
    #[arg(long)]
    pub height: Option<u32>,

    /// Record headless frames instead of opening a window (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Recording frame rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Recording output directory
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub output: PathBuf,
}

impl Args {
    /// Parse noise generator from command-line arguments
    pub fn parse_noise_kind(&self) -> NoiseKind {
        match self.noise.to_lowercase().as_str() {
            "simplex" => NoiseKind::Simplex,
            "open-simplex" | "opensimplex" => {
                info!("Noise: OpenSimplex");
                NoiseKind::OpenSimplex
            }
            other => {
                warn!("Unknown noise kind '{}', using simplex", other);
                NoiseKind::Simplex
            }
        }
    }

    /// Field parameters with command-line overrides applied
    pub fn field_params(&self) -> FieldParams {
        FieldParams {
            noise_seed: self.seed,
            cell_size_px: self.cell_size,
            ..FieldParams::default()
        }
    }

    /// Viewer configuration with command-line overrides applied
    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        if let Some(width) = self.width {
            config.window_width = width;
        }
        if let Some(height) = self.height {
            config.window_height = height;
        }
        config
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| {
            let mut config = RecordingConfig::new(duration);
            config.output_dir = self.output.clone();
            config.fps = self.fps;
            if let Some(width) = self.width {
                config.width = width;
            }
            if let Some(height) = self.height {
                config.height = height;
            }
            config
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["truelayer-fluid"]);
        assert_eq!(args.parse_noise_kind(), NoiseKind::Simplex);
        assert!(args.recording_config().is_none());

        let params = args.field_params();
        assert_eq!(params.noise_seed, 0);
        assert_eq!(params.cell_size_px, 32.0);
        assert_eq!(args.render_config().window_width, 1280);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "truelayer-fluid",
            "--seed",
            "9",
            "--noise",
            "Open-Simplex",
            "--cell-size",
            "16",
            "--record",
            "2",
            "--fps",
            "24",
            "--width",
            "320",
            "--output",
            "out",
        ]);
        assert_eq!(args.parse_noise_kind(), NoiseKind::OpenSimplex);
        assert_eq!(args.field_params().noise_seed, 9);
        assert_eq!(args.field_params().cell_size_px, 16.0);

        let recording = args.recording_config().unwrap();
        assert_eq!(recording.total_frames(), 48);
        assert_eq!(recording.width, 320);
        assert_eq!(recording.height, 360);
        assert_eq!(recording.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_unknown_noise_falls_back() {
        let args = Args::parse_from(["truelayer-fluid", "--noise", "perlin"]);
        assert_eq!(args.parse_noise_kind(), NoiseKind::Simplex);
    }
}
