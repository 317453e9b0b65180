//! Noise field dynamics and palette.

use crate::canvas::{ColorStop, Rgba};
use crate::error::FluidError;

/// Noise field animation and sampling parameters
#[derive(Debug, Clone)]
pub struct FieldParams {
    /// Permutation table seed
    pub noise_seed: u32,

    /// Clock phase advance per rendered frame (noise units)
    pub clock_increment: f64,

    /// Fraction of the remaining pointer distance covered each frame, in (0, 1]
    pub pointer_smoothing: f64,

    /// Grid cell edge in logical pixels (scaled by the surface pixel ratio)
    pub cell_size_px: f64,

    /// Exponential falloff rate of pointer influence per normalized unit
    pub influence_falloff: f64,

    /// Pointer influence at distance zero
    pub influence_strength: f64,

    /// Spatial frequency of the warp sample
    pub warp_scale: f64,

    /// Amplitude of the warp offset fed into the main sample
    pub warp_amplitude: f64,

    /// Spatial frequency of the main sample
    pub base_scale: f64,

    /// Cell alpha = alpha_base + value * alpha_value + influence * alpha_influence
    pub alpha_base: f32,
    pub alpha_value: f32,
    pub alpha_influence: f32,

    /// Highlight radius as a fraction of canvas width
    pub highlight_radius: f64,

    /// Vignette radii as fractions of canvas height
    pub vignette_inner: f64,
    pub vignette_outer: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            noise_seed: 0,
            clock_increment: 0.003,
            pointer_smoothing: 0.05,
            cell_size_px: 32.0, // Coarse on purpose, one fill per cell
            influence_falloff: 3.0,
            influence_strength: 0.3,
            warp_scale: 2.0,
            warp_amplitude: 0.5,
            base_scale: 1.5,
            alpha_base: 0.05,
            alpha_value: 0.1,
            alpha_influence: 0.2,
            highlight_radius: 0.4,
            vignette_inner: 0.2,
            vignette_outer: 0.9,
        }
    }
}

impl FieldParams {
    /// Validate configuration (cell size at least one pixel, smoothing in (0, 1], etc.)
    pub fn validate(&self) -> Result<(), FluidError> {
        let finite = [
            self.clock_increment,
            self.pointer_smoothing,
            self.cell_size_px,
            self.influence_falloff,
            self.influence_strength,
            self.warp_scale,
            self.warp_amplitude,
            self.base_scale,
            self.highlight_radius,
            self.vignette_inner,
            self.vignette_outer,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(FluidError::InvalidParams(
                "field parameters must be finite".to_string(),
            ));
        }
        if self.cell_size_px < 1.0 {
            return Err(FluidError::InvalidParams(format!(
                "cell size must be >= 1 px, got {}",
                self.cell_size_px
            )));
        }
        if self.pointer_smoothing <= 0.0 || self.pointer_smoothing > 1.0 {
            return Err(FluidError::InvalidParams(format!(
                "pointer smoothing must be in (0, 1], got {}",
                self.pointer_smoothing
            )));
        }
        if self.influence_falloff < 0.0 {
            return Err(FluidError::InvalidParams(format!(
                "influence falloff must be >= 0, got {}",
                self.influence_falloff
            )));
        }
        Ok(())
    }
}

/// Colours of the background, cells, highlight and vignette
#[derive(Debug, Clone)]
pub struct Palette {
    /// Vertical background gradient, top to bottom
    pub background: Vec<ColorStop>,

    /// Cell colour at noise value 0 (deep blue)
    pub accent_low: Rgba,

    /// Cell colour at noise value 1 (cyan)
    pub accent_high: Rgba,

    /// Specular highlight stops, centred on the pointer
    pub highlight: Vec<ColorStop>,

    /// Vignette stops, centred on the canvas
    pub vignette: Vec<ColorStop>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: vec![
                ColorStop::new(0.0, Rgba::from_hex(0x0a0a0f)),
                ColorStop::new(0.5, Rgba::from_hex(0x0f0f1a)),
                ColorStop::new(1.0, Rgba::from_hex(0x0a0a0f)),
            ],
            accent_low: Rgba::new(10, 80, 150, 1.0),
            accent_high: Rgba::new(40, 140, 220, 1.0),
            highlight: vec![
                ColorStop::new(0.0, Rgba::new(100, 200, 255, 0.08)),
                ColorStop::new(0.5, Rgba::new(50, 100, 200, 0.03)),
                ColorStop::new(1.0, Rgba::TRANSPARENT),
            ],
            vignette: vec![
                ColorStop::new(0.0, Rgba::TRANSPARENT),
                ColorStop::new(1.0, Rgba::new(0, 0, 0, 0.6)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(FieldParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut params = FieldParams::default();
        params.cell_size_px = 0.0;
        assert!(params.validate().is_err());

        let mut params = FieldParams::default();
        params.cell_size_px = 1e-6;
        assert!(params.validate().is_err());

        let mut params = FieldParams::default();
        params.pointer_smoothing = 1.5;
        assert!(params.validate().is_err());

        let mut params = FieldParams::default();
        params.warp_scale = f64::NAN;
        assert!(params.validate().is_err());

        let mut params = FieldParams::default();
        params.influence_falloff = -1.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_one_pixel_cells_accepted() {
        let params = FieldParams {
            cell_size_px: 1.0,
            ..FieldParams::default()
        };
        assert!(params.validate().is_ok());
    }
}
