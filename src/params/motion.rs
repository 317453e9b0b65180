//! Spring and cursor follower configuration.

use crate::canvas::Rgba;

/// Damped spring constants (same meaning as a UI motion library's spring)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Restoring force per pixel of displacement
    pub stiffness: f64,

    /// Velocity damping coefficient
    pub damping: f64,

    /// Mass (lower = snappier)
    pub mass: f64,
}

impl SpringConfig {
    /// Cursor follower ring: smooth, stable trailing
    pub const CURSOR: SpringConfig = SpringConfig {
        stiffness: 250.0,
        damping: 30.0,
        mass: 0.5,
    };

    /// Magnetic button pull
    pub const MAGNETIC: SpringConfig = SpringConfig {
        stiffness: 150.0,
        damping: 15.0,
        mass: 0.1,
    };

    /// Tilt card rotation
    pub const TILT: SpringConfig = SpringConfig {
        stiffness: 150.0,
        damping: 20.0,
        mass: 0.5,
    };
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::CURSOR
    }
}

/// Visual style of one cursor variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorStyle {
    /// Ring diameter (logical pixels)
    pub diameter: f64,

    /// Overall opacity multiplier
    pub opacity: f32,

    /// Border width (logical pixels)
    pub border_width: f64,

    pub border: Rgba,
    pub fill: Rgba,
}

/// Cursor follower configuration
#[derive(Debug, Clone)]
pub struct CursorParams {
    pub spring: SpringConfig,

    /// Off-screen start position (logical pixels)
    pub start: [f64; 2],

    pub default_style: CursorStyle,
    pub link_style: CursorStyle,
    pub magnetic_style: CursorStyle,
}

impl Default for CursorParams {
    fn default() -> Self {
        let cyan = Rgba::new(6, 182, 212, 1.0);
        Self {
            spring: SpringConfig::CURSOR,
            start: [-100.0, -100.0],
            default_style: CursorStyle {
                diameter: 32.0,
                opacity: 0.4,
                border_width: 1.0,
                border: Rgba::new(255, 255, 255, 0.5),
                fill: Rgba::TRANSPARENT,
            },
            link_style: CursorStyle {
                diameter: 60.0,
                opacity: 0.6,
                border_width: 1.0,
                border: cyan.with_alpha(0.5),
                fill: cyan.with_alpha(0.05),
            },
            magnetic_style: CursorStyle {
                diameter: 80.0,
                opacity: 0.8,
                border_width: 2.0,
                border: cyan.with_alpha(0.8),
                fill: cyan.with_alpha(0.1),
            },
        }
    }
}
