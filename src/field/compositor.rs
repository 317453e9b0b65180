//! Per-frame compositing of the fluid background onto a canvas.

use glam::DVec2;
use noise::NoiseFn;

use super::mouse_influence;
use crate::canvas::{Canvas, ColorRamp, LinearGradient, Paint, RadialGradient};
use crate::params::{FieldParams, Palette};

/// Per-frame inputs to the compositor
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs {
    /// Smoothed pointer, normalized to [0, 1]
    pub pointer: DVec2,

    /// Clock phase (noise units)
    pub clock: f64,

    /// Physical pixels per logical pixel; scales the grid cell size
    pub pixel_ratio: f64,
}

/// Paint one frame: background gradient, noise grid, highlight, vignette.
///
/// Returns the number of grid cells filled.
pub fn paint_frame(
    canvas: &mut Canvas,
    noise: &dyn NoiseFn<f64, 2>,
    params: &FieldParams,
    palette: &Palette,
    inputs: FrameInputs,
) -> usize {
    let (w, h) = canvas.size();
    if w == 0 || h == 0 {
        return 0;
    }
    let width = w as f64;
    let height = h as f64;

    // Vertical background gradient
    canvas.fill(&Paint::Linear(LinearGradient {
        start: [0.0, 0.0],
        end: [0.0, height],
        ramp: ColorRamp::new(palette.background.clone()),
    }));

    let cells = paint_cells(canvas, noise, params, palette, inputs);

    // Specular highlight follows the pointer
    let highlight_center = [width * inputs.pointer.x, height * inputs.pointer.y];
    canvas.fill(&Paint::Radial(RadialGradient {
        center: highlight_center,
        inner_radius: 0.0,
        outer_radius: width * params.highlight_radius,
        ramp: ColorRamp::new(palette.highlight.clone()),
    }));

    canvas.fill(&Paint::Radial(RadialGradient {
        center: [width / 2.0, height / 2.0],
        inner_radius: height * params.vignette_inner,
        outer_radius: height * params.vignette_outer,
        ramp: ColorRamp::new(palette.vignette.clone()),
    }));

    cells
}

fn paint_cells(
    canvas: &mut Canvas,
    noise: &dyn NoiseFn<f64, 2>,
    params: &FieldParams,
    palette: &Palette,
    inputs: FrameInputs,
) -> usize {
    let (w, h) = canvas.size();
    let width = w as f64;
    let height = h as f64;

    // Never finer than one physical pixel
    let cell = (params.cell_size_px * inputs.pixel_ratio).max(1.0);
    let cols = (width / cell).ceil() as usize;
    let rows = (height / cell).ceil() as usize;

    for row in 0..rows {
        for col in 0..cols {
            let px = col as f64 * cell;
            let py = row as f64 * cell;

            let nx = px / width;
            let ny = py / height;

            let dist = DVec2::new(nx, ny).distance(inputs.pointer);
            let influence =
                mouse_influence(dist, params.influence_falloff, params.influence_strength);

            // Domain warp: a lower-amplitude sample offsets the main one
            let warp = noise.get([nx * params.warp_scale + inputs.clock, ny * params.warp_scale])
                * params.warp_amplitude;

            let n = noise.get([
                nx * params.base_scale + warp + influence,
                ny * params.base_scale + influence,
            ]);

            let value = ((n + 1.0) * 0.5) as f32;
            let alpha = params.alpha_base
                + value * params.alpha_value
                + influence as f32 * params.alpha_influence;

            let color = palette
                .accent_low
                .lerp(palette.accent_high, value)
                .with_alpha(alpha);
            canvas.fill_rect(px, py, cell, cell, &Paint::Solid(color));
        }
    }

    rows * cols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Rgba;
    use crate::noise::SimplexNoise;

    fn inputs() -> FrameInputs {
        FrameInputs {
            pointer: DVec2::splat(0.5),
            clock: 0.0,
            pixel_ratio: 1.0,
        }
    }

    fn render(params: &FieldParams, palette: &Palette, inputs: FrameInputs) -> Canvas {
        let mut canvas = Canvas::new(128, 128);
        paint_frame(&mut canvas, &SimplexNoise::new(0), params, palette, inputs);
        canvas
    }

    fn blue(canvas: &Canvas, x: u32, y: u32) -> i32 {
        canvas.pixel(x, y).unwrap()[2] as i32
    }

    /// Cells in one flat colour with no overlays, so only alpha varies
    fn flat_palette() -> Palette {
        let accent = Rgba::new(10, 80, 150, 1.0);
        Palette {
            accent_low: accent,
            accent_high: accent,
            highlight: Vec::new(),
            vignette: Vec::new(),
            ..Palette::default()
        }
    }

    #[test]
    fn test_cell_count_rounds_up() {
        let mut canvas = Canvas::new(100, 70);
        let noise = SimplexNoise::new(0);
        let cells = paint_frame(
            &mut canvas,
            &noise,
            &FieldParams::default(),
            &Palette::default(),
            inputs(),
        );
        // ceil(100 / 32) * ceil(70 / 32)
        assert_eq!(cells, 4 * 3);
    }

    #[test]
    fn test_pixel_ratio_scales_cells() {
        let mut canvas = Canvas::new(128, 64);
        let noise = SimplexNoise::new(0);
        let cells = paint_frame(
            &mut canvas,
            &noise,
            &FieldParams::default(),
            &Palette::default(),
            FrameInputs {
                pixel_ratio: 2.0,
                ..inputs()
            },
        );
        assert_eq!(cells, 2);
    }

    #[test]
    fn test_frame_is_opaque_and_dark() {
        let mut canvas = Canvas::new(64, 64);
        let noise = SimplexNoise::new(0);
        paint_frame(
            &mut canvas,
            &noise,
            &FieldParams::default(),
            &Palette::default(),
            inputs(),
        );
        for y in 0..64 {
            for x in 0..64 {
                let p = canvas.pixel(x, y).unwrap();
                assert_eq!(p[3], 255);
                // Background is near-black; cells tint it blue at low alpha
                assert!(p[2] >= p[0]);
                assert!(p[2] < 128);
            }
        }
    }

    #[test]
    fn test_same_inputs_same_pixels() {
        let params = FieldParams::default();
        let palette = Palette::default();
        let frame = |seed| {
            let mut canvas = Canvas::new(96, 64);
            paint_frame(
                &mut canvas,
                &SimplexNoise::new(seed),
                &params,
                &palette,
                FrameInputs {
                    clock: 0.42,
                    ..inputs()
                },
            );
            canvas.as_bytes().to_vec()
        };
        assert_eq!(frame(5), frame(5));
    }

    #[test]
    fn test_empty_canvas_paints_nothing() {
        let mut canvas = Canvas::new(0, 10);
        let noise = SimplexNoise::new(0);
        let cells = paint_frame(
            &mut canvas,
            &noise,
            &FieldParams::default(),
            &Palette::default(),
            inputs(),
        );
        assert_eq!(cells, 0);
    }

    #[test]
    fn test_tiny_cells_clamped_to_one_pixel() {
        let mut canvas = Canvas::new(16, 16);
        let params = FieldParams {
            cell_size_px: 1e-6,
            ..FieldParams::default()
        };
        let cells = paint_frame(
            &mut canvas,
            &SimplexNoise::new(0),
            &params,
            &Palette::default(),
            inputs(),
        );
        assert_eq!(cells, 16 * 16);
    }

    #[test]
    fn test_zero_pixel_ratio_clamped_to_one_pixel() {
        let mut canvas = Canvas::new(8, 8);
        let cells = paint_frame(
            &mut canvas,
            &SimplexNoise::new(0),
            &FieldParams::default(),
            &Palette::default(),
            FrameInputs {
                pixel_ratio: 0.0,
                ..inputs()
            },
        );
        assert_eq!(cells, 64);
    }

    #[test]
    fn test_clock_moves_the_field() {
        let params = FieldParams::default();
        let palette = Palette::default();
        let still = render(&params, &palette, inputs());
        let later = render(
            &params,
            &palette,
            FrameInputs {
                clock: 1.0,
                ..inputs()
            },
        );
        assert_ne!(still.as_bytes(), later.as_bytes());
    }

    #[test]
    fn test_pointer_raises_nearby_cell_alpha() {
        let palette = flat_palette();
        let params = FieldParams {
            alpha_value: 0.0,
            ..FieldParams::default()
        };
        let unaffected = FieldParams {
            influence_strength: 0.0,
            ..params.clone()
        };
        let at_origin = FrameInputs {
            pointer: DVec2::ZERO,
            ..inputs()
        };

        let pulled = render(&params, &palette, at_origin);
        let plain = render(&unaffected, &palette, at_origin);

        // Cell under the pointer vs. the far corner cell
        let near = blue(&pulled, 16, 16) - blue(&plain, 16, 16);
        let far = blue(&pulled, 112, 112) - blue(&plain, 112, 112);
        assert!(near >= 5, "near gain {near}");
        assert!(near > far + 3, "near {near}, far {far}");
    }

    #[test]
    fn test_highlight_brightens_under_pointer() {
        let params = FieldParams::default();
        let lit = render(&params, &Palette::default(), inputs());
        let unlit = render(
            &params,
            &Palette {
                highlight: Vec::new(),
                ..Palette::default()
            },
            inputs(),
        );

        let a = lit.pixel(64, 64).unwrap();
        let b = unlit.pixel(64, 64).unwrap();
        assert!(a[1] > b[1], "{a:?} vs {b:?}");
        assert!(a[2] as i32 > b[2] as i32 + 5, "{a:?} vs {b:?}");
    }

    #[test]
    fn test_vignette_darkens_corners_only() {
        let params = FieldParams::default();
        let vignetted = render(&params, &Palette::default(), inputs());
        let open = render(
            &params,
            &Palette {
                vignette: Vec::new(),
                ..Palette::default()
            },
            inputs(),
        );

        let sum = |p: [u8; 4]| p[0] as i32 + p[1] as i32 + p[2] as i32;
        let corner_loss = sum(open.pixel(0, 0).unwrap()) - sum(vignetted.pixel(0, 0).unwrap());
        assert!(corner_loss > 10, "corner loss {corner_loss}");
        assert_eq!(vignetted.pixel(64, 64), open.pixel(64, 64));
    }
}
