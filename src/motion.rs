//! Pointer-following motion: springs, the cursor follower ring, magnetic
//! pull and tilt.

use glam::DVec2;

use crate::canvas::{Canvas, Rgba};
use crate::params::{CursorParams, CursorStyle, SpringConfig};

/// Largest integration sub-step (seconds)
const MAX_SUBSTEP_S: f64 = 1.0 / 240.0;

/// One-dimensional damped spring chasing a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub config: SpringConfig,
    pub value: f64,
    pub velocity: f64,
    pub target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Integrate `dt` seconds (semi-implicit Euler in bounded sub-steps)
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let steps = (dt / MAX_SUBSTEP_S).ceil().max(1.0) as usize;
        let h = dt / steps as f64;
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        let mass = mass.max(f64::EPSILON);

        for _ in 0..steps {
            let force = -stiffness * (self.value - self.target) - damping * self.velocity;
            self.velocity += force / mass * h;
            self.value += self.velocity * h;
        }
    }

    /// Within `epsilon` of the target and nearly at rest
    pub fn is_settled(&self, epsilon: f64) -> bool {
        (self.value - self.target).abs() < epsilon && self.velocity.abs() < epsilon
    }
}

/// Axis-aligned element bounds in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Magnetic button offset: pulls toward the pointer while it is within
/// `1.5 * width` of the centre, otherwise rests at zero.
pub fn magnetic_offset(pointer: DVec2, bounds: Bounds, pull: f64) -> DVec2 {
    let delta = pointer - bounds.center();
    if delta.length() < bounds.width * 1.5 {
        delta * pull
    } else {
        DVec2::ZERO
    }
}

/// Tilt card rotation `(rotate_x, rotate_y)` in degrees.
///
/// Pointer offset from the centre is taken relative to the card size and
/// clamped to ±0.5; the edges map to ±`max_deg`.
pub fn tilt_angles(pointer: DVec2, bounds: Bounds, max_deg: f64) -> (f64, f64) {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return (0.0, 0.0);
    }
    let rel = (pointer - bounds.center()) / DVec2::new(bounds.width, bounds.height);
    let rel = rel.clamp(DVec2::splat(-0.5), DVec2::splat(0.5));
    (-rel.y * 2.0 * max_deg, rel.x * 2.0 * max_deg)
}

/// Magnetic button: a spring pair easing toward [`magnetic_offset`]
#[derive(Debug, Clone)]
pub struct MagneticMotion {
    pub pull: f64,
    x: Spring,
    y: Spring,
}

impl MagneticMotion {
    pub fn new(pull: f64) -> Self {
        Self {
            pull,
            x: Spring::new(SpringConfig::MAGNETIC, 0.0),
            y: Spring::new(SpringConfig::MAGNETIC, 0.0),
        }
    }

    pub fn pointer_moved(&mut self, pointer: DVec2, bounds: Bounds) {
        let target = magnetic_offset(pointer, bounds, self.pull);
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    /// Pointer left the element; spring back to rest
    pub fn release(&mut self) {
        self.x.set_target(0.0);
        self.y.set_target(0.0);
    }

    pub fn step(&mut self, dt: f64) {
        self.x.step(dt);
        self.y.step(dt);
    }

    pub fn offset(&self) -> DVec2 {
        DVec2::new(self.x.value, self.y.value)
    }
}

/// Tilt card: springs easing `(rotate_x, rotate_y)` toward [`tilt_angles`]
#[derive(Debug, Clone)]
pub struct TiltMotion {
    pub max_deg: f64,
    rotate_x: Spring,
    rotate_y: Spring,
}

impl TiltMotion {
    pub fn new(max_deg: f64) -> Self {
        Self {
            max_deg,
            rotate_x: Spring::new(SpringConfig::TILT, 0.0),
            rotate_y: Spring::new(SpringConfig::TILT, 0.0),
        }
    }

    pub fn pointer_moved(&mut self, pointer: DVec2, bounds: Bounds) {
        let (rx, ry) = tilt_angles(pointer, bounds, self.max_deg);
        self.rotate_x.set_target(rx);
        self.rotate_y.set_target(ry);
    }

    pub fn release(&mut self) {
        self.rotate_x.set_target(0.0);
        self.rotate_y.set_target(0.0);
    }

    pub fn step(&mut self, dt: f64) {
        self.rotate_x.step(dt);
        self.rotate_y.step(dt);
    }

    /// Current `(rotate_x, rotate_y)` in degrees
    pub fn angles(&self) -> (f64, f64) {
        (self.rotate_x.value, self.rotate_y.value)
    }
}

/// Cursor follower look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorVariant {
    #[default]
    Default,
    Link,
    Magnetic,
}

/// Ring that trails the pointer on springs
#[derive(Debug, Clone)]
pub struct CursorFollower {
    params: CursorParams,
    x: Spring,
    y: Spring,
    variant: CursorVariant,
}

impl CursorFollower {
    pub fn new(params: CursorParams) -> Self {
        let [sx, sy] = params.start;
        Self {
            x: Spring::new(params.spring, sx),
            y: Spring::new(params.spring, sy),
            params,
            variant: CursorVariant::Default,
        }
    }

    /// Raw pointer position (logical pixels)
    pub fn set_target(&mut self, position: DVec2) {
        self.x.set_target(position.x);
        self.y.set_target(position.y);
    }

    pub fn step(&mut self, dt: f64) {
        self.x.step(dt);
        self.y.step(dt);
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x.value, self.y.value)
    }

    pub fn variant(&self) -> CursorVariant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: CursorVariant) {
        self.variant = variant;
    }

    pub fn style(&self) -> &CursorStyle {
        match self.variant {
            CursorVariant::Default => &self.params.default_style,
            CursorVariant::Link => &self.params.link_style,
            CursorVariant::Magnetic => &self.params.magnetic_style,
        }
    }

    /// Draw the ring centred on the follower; `scale` converts logical to
    /// canvas pixels
    pub fn paint(&self, canvas: &mut Canvas, scale: f64) {
        let style = *self.style();
        let center = self.position() * scale;
        let radius = style.diameter * scale / 2.0;
        let border = style.border_width * scale;

        let faded = |c: Rgba| c.with_alpha(c.a * style.opacity);
        canvas.fill_circle(center.x, center.y, radius, faded(style.fill));
        canvas.stroke_ring(
            center.x,
            center.y,
            radius - border / 2.0,
            border,
            faded(style.border),
        );
    }
}
