//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants of the fluid background are extracted here with:
//! - Units (pixels, per-frame increments, normalized coordinates)
//! - Documented ranges and meanings
//! - `Default` values matching the site's look

mod field;
mod motion;
mod render;

// Re-export all types
pub use field::{FieldParams, Palette};
pub use motion::{CursorParams, CursorStyle, SpringConfig};
pub use render::{RecordingConfig, RenderConfig};
