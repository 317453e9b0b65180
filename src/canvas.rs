//! Software RGBA canvas with source-over compositing.
//!
//! Stands in for a browser 2D drawing context: solid fills, linear and radial
//! gradients, and anti-aliased rings. Pixels are stored non-premultiplied as
//! tightly packed RGBA8 so they can be uploaded or saved directly.

/// Colour with 8-bit channels and a fractional alpha (CSS `rgba()` style)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise interpolation, `t` clamped to [0, 1]
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Gradient colour stop; `offset` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Ordered colour ramp shared by both gradient kinds
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { stops }
    }

    /// Colour at `t`; clamps to the first/last stop outside their range
    pub fn sample(&self, t: f32) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                if span <= f32::EPSILON {
                    return hi.color;
                }
                return lo.color.lerp(hi.color, (t - lo.offset) / span);
            }
        }
        last.color
    }
}

/// Gradient along the line from `start` to `end` (canvas pixels)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub ramp: ColorRamp,
}

impl LinearGradient {
    fn sample(&self, x: f64, y: f64) -> Rgba {
        let dx = self.end[0] - self.start[0];
        let dy = self.end[1] - self.start[1];
        let len_sq = dx * dx + dy * dy;
        if len_sq <= f64::EPSILON {
            return self.ramp.sample(0.0);
        }
        let t = ((x - self.start[0]) * dx + (y - self.start[1]) * dy) / len_sq;
        self.ramp.sample(t as f32)
    }
}

/// Concentric radial gradient between `inner_radius` and `outer_radius`
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: [f64; 2],
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub ramp: ColorRamp,
}

impl RadialGradient {
    fn sample(&self, x: f64, y: f64) -> Rgba {
        let dist = ((x - self.center[0]).powi(2) + (y - self.center[1]).powi(2)).sqrt();
        let span = self.outer_radius - self.inner_radius;
        let t = if span <= f64::EPSILON {
            if dist < self.outer_radius {
                0.0
            } else {
                1.0
            }
        } else {
            (dist - self.inner_radius) / span
        };
        self.ramp.sample(t as f32)
    }
}

/// Fill style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    fn color_at(&self, x: f64, y: f64) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear(g) => g.sample(x, y),
            Paint::Radial(g) => g.sample(x, y),
        }
    }
}

/// RGBA8 raster target
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize and clear to transparent
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, [0, 0, 0, 0]);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Packed RGBA8 bytes, row-major, no padding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fill the whole canvas
    pub fn fill(&mut self, paint: &Paint) {
        self.fill_rect(0.0, 0.0, self.width as f64, self.height as f64, paint);
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas.
    ///
    /// A pixel is covered when its centre lies inside the rectangle.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let x_start = (x - 0.5).ceil().max(0.0) as u32;
        let y_start = (y - 0.5).ceil().max(0.0) as u32;
        let x_end = ((x + w - 0.5).ceil().max(0.0) as u32).min(self.width);
        let y_end = ((y + h - 0.5).ceil().max(0.0) as u32).min(self.height);

        for py in y_start..y_end {
            for px in x_start..x_end {
                let color = paint.color_at(px as f64 + 0.5, py as f64 + 0.5);
                self.blend(px, py, color, 1.0);
            }
        }
    }

    /// Fill a circle with one pixel of edge anti-aliasing
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        let coverage = |dist: f64| (radius + 0.5 - dist).clamp(0.0, 1.0);
        self.shade_disc(cx, cy, radius + 0.5, coverage, color);
    }

    /// Stroke a ring of `width` pixels centred on `radius`
    pub fn stroke_ring(&mut self, cx: f64, cy: f64, radius: f64, width: f64, color: Rgba) {
        let half = width / 2.0;
        let coverage = |dist: f64| (half + 0.5 - (dist - radius).abs()).clamp(0.0, 1.0);
        self.shade_disc(cx, cy, radius + half + 0.5, coverage, color);
    }

    fn shade_disc(
        &mut self,
        cx: f64,
        cy: f64,
        extent: f64,
        coverage: impl Fn(f64) -> f64,
        color: Rgba,
    ) {
        if extent <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let x_start = (cx - extent).floor().max(0.0) as u32;
        let y_start = (cy - extent).floor().max(0.0) as u32;
        let x_end = ((cx + extent).ceil().max(0.0) as u32).min(self.width);
        let y_end = ((cy + extent).ceil().max(0.0) as u32).min(self.height);

        for py in y_start..y_end {
            for px in x_start..x_end {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                let c = coverage((dx * dx + dy * dy).sqrt());
                if c > 0.0 {
                    self.blend(px, py, color, c as f32);
                }
            }
        }
    }

    /// Source-over blend of `color` scaled by `coverage` into one pixel
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let src_a = (color.a * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[(y * self.width + x) as usize];
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let channel = |s: u8, d: u8| -> u8 {
            let s = s as f32;
            let d = d as f32;
            let v = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        *dst = [
            channel(color.r, dst[0]),
            channel(color.g, dst[1]),
            channel(color.b, dst[2]),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ];
    }
}
