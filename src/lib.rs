//! Truelayer fluid field - pointer-reactive simplex noise background

pub mod background;
pub mod canvas;
pub mod cli;
pub mod error;
pub mod field;
pub mod frame;
pub mod motion;
pub mod noise;
pub mod params;
pub mod recording;
pub mod rendering;
pub mod surface;
