//! Wave-particle water simulation.
//!
//! Wavefronts are rings of particles spreading from random impact points.
//! Each tick the particles move, decay and are binned on an N×N grid; the
//! rings are refined as they spread, and the height of every grid sample is
//! the sum of the displacement kernels of the particles binned around it.

mod clock;
mod heightfield;
mod mesh;
mod particle;
mod spatial;
mod system;
mod wavefront;

// Re-export public types
pub use clock::{ManualClock, SimulationClock, TimeSource, WallClock};
pub use heightfield::HeightField;
pub use mesh::{SurfaceMesh, Vertex};
pub use particle::{rect_window, WaveParticle, PARTICLE_RADIUS, PARTICLE_SPEED};
pub use spatial::SpatialBinIndex;
pub use system::{StepReport, WaterSystem};
pub use wavefront::{WaveFront, WaveFrontSet};

/// Uniform random floats over `[low, high]`
pub trait UniformSource {
    fn uniform(&mut self, low: f32, high: f32) -> f32;
}

impl<R: rand::Rng> UniformSource for R {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        self.gen_range(low..=high)
    }
}
