//! Parameter definitions with units and documented semantics.
//!
//! All tunables live here with:
//! - Units (domain units, seconds, pixels)
//! - Documented ranges and meanings
//! - Validation where a bad value would break the grid

mod camera;
mod render;
mod water;

// Re-export all types
pub use camera::CameraOrbit;
pub use render::{RenderConfig, SurfaceColors};
pub use water::{WaterParams, ROUGHNESS_RANGE};
