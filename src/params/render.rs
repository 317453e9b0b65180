//! Viewer and recording configuration.

use std::path::PathBuf;

/// Viewer configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (logical pixels)
    pub window_width: u32,

    /// Window height (logical pixels)
    pub window_height: u32,

    /// Upper bound on the pixel ratio applied to cell sizes
    /// 2.0 keeps high-DPI displays from quadrupling the cell count
    pub max_pixel_ratio: f64,

    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            max_pixel_ratio: 2.0,
            title: "Truelayer - Fluid Field".to_string(),
        }
    }
}

/// Headless recording configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,

    /// Frame size (pixels)
    pub width: u32,
    pub height: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: PathBuf::from("recording"),
            fps: 60,
            width: 640,
            height: 360,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs.max(0.0) * self.fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Path of frame `n`
    pub fn frame_path(&self, n: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{:05}.png", n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_frames_rounds_up() {
        let mut config = RecordingConfig::new(0.5);
        config.fps = 30;
        assert_eq!(config.total_frames(), 15);

        config.duration_secs = 0.51;
        assert_eq!(config.total_frames(), 16);
    }

    #[test]
    fn test_frame_path_layout() {
        let config = RecordingConfig::new(1.0);
        assert_eq!(
            config.frame_path(7),
            PathBuf::from("recording/frames/frame_00007.png")
        );
    }
}
