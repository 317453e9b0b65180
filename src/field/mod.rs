//! Domain-warped noise field driven by pointer position and a clock phase.

mod compositor;
mod system;

pub use compositor::{paint_frame, FrameInputs};
pub use system::FluidField;

use glam::DVec2;

/// Linear interpolation from `a` toward `b`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Pointer proximity weight: `exp(-falloff * distance) * strength`
pub fn mouse_influence(distance: f64, falloff: f64, strength: f64) -> f64 {
    (-falloff * distance).exp() * strength
}

/// Smoothed pointer in normalized [0, 1] surface coordinates.
///
/// `target` follows raw pointer events; `current` chases it by a fixed
/// fraction per frame, so rendered motion lags the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub current: DVec2,
    pub target: DVec2,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            current: DVec2::splat(0.5),
            target: DVec2::splat(0.5),
        }
    }
}

impl PointerState {
    pub fn set_target(&mut self, target: DVec2) {
        self.target = target;
    }

    /// Advance `current` toward `target` by `factor`
    pub fn step(&mut self, factor: f64) {
        self.current.x = lerp(self.current.x, self.target.x, factor);
        self.current.y = lerp(self.current.y, self.target.y, factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_converges_within_90_steps() {
        let mut pointer = PointerState::default();
        pointer.current = DVec2::ZERO;
        pointer.set_target(DVec2::new(1.0, 0.8));

        let initial = (pointer.target - pointer.current).length();
        for _ in 0..90 {
            pointer.step(0.05);
        }
        let remaining = (pointer.target - pointer.current).length();
        assert!(remaining < initial * 0.01, "remaining {remaining}");
    }

    #[test]
    fn test_smoothing_lags_target() {
        let mut pointer = PointerState::default();
        pointer.set_target(DVec2::new(1.0, 1.0));
        pointer.step(0.05);
        assert!((pointer.current.x - 0.525).abs() < 1e-12);
        assert!(pointer.current.x < pointer.target.x);
    }

    #[test]
    fn test_influence_peak_and_falloff() {
        assert_eq!(mouse_influence(0.0, 3.0, 0.3), 0.3);

        let mut previous = mouse_influence(0.0, 3.0, 0.3);
        for k in 1..200 {
            let value = mouse_influence(k as f64 * 0.05, 3.0, 0.3);
            assert!(value < previous);
            assert!(value > 0.0);
            previous = value;
        }
        assert!(mouse_influence(50.0, 3.0, 0.3) < 1e-12);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }
}
