//! Noise field state: generator, smoothed pointer and clock phase.

use glam::DVec2;
use noise::NoiseFn;

use super::compositor::{paint_frame, FrameInputs};
use super::PointerState;
use crate::canvas::Canvas;
use crate::noise::{NoiseKind, SimplexNoise};
use crate::params::{FieldParams, Palette};

/// Animated noise field, built once per mount
pub struct FluidField {
    noise: Box<dyn NoiseFn<f64, 2>>,
    params: FieldParams,
    palette: Palette,
    pointer: PointerState,
    clock_phase: f64,
}

impl FluidField {
    /// Create a field sampling `noise`
    pub fn new(noise: Box<dyn NoiseFn<f64, 2>>, params: FieldParams, palette: Palette) -> Self {
        Self {
            noise,
            params,
            palette,
            pointer: PointerState::default(),
            clock_phase: 0.0,
        }
    }

    /// Create a field over the site's simplex kernel, seeded from `params`
    pub fn with_simplex(params: FieldParams, palette: Palette) -> Self {
        let noise = SimplexNoise::new(params.noise_seed);
        Self::new(Box::new(noise), params, palette)
    }

    /// Create a field over the chosen generator, seeded from `params`
    pub fn with_kind(kind: NoiseKind, params: FieldParams, palette: Palette) -> Self {
        let noise = kind.build(params.noise_seed);
        Self::new(noise, params, palette)
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn clock_phase(&self) -> f64 {
        self.clock_phase
    }

    /// Record the latest raw pointer position (normalized)
    pub fn set_pointer_target(&mut self, target: DVec2) {
        self.pointer.set_target(target);
    }

    /// Advance time and pointer smoothing by one frame
    pub fn advance(&mut self) {
        self.clock_phase += self.params.clock_increment;
        self.pointer.step(self.params.pointer_smoothing);
    }

    /// Paint the current state without advancing it
    pub fn paint(&self, canvas: &mut Canvas, pixel_ratio: f64) -> usize {
        paint_frame(
            canvas,
            &*self.noise,
            &self.params,
            &self.palette,
            FrameInputs {
                pointer: self.pointer.current,
                clock: self.clock_phase,
                pixel_ratio,
            },
        )
    }

    /// Advance one frame, then paint it
    pub fn render(&mut self, canvas: &mut Canvas, pixel_ratio: f64) -> usize {
        self.advance();
        self.paint(canvas, pixel_ratio)
    }
}
