//! High-level water system: owns the particles, bins, height field and mesh.

use log::{info, trace};
use rand::rngs::StdRng;

use super::clock::{SimulationClock, TimeSource, WallClock};
use super::heightfield::HeightField;
use super::mesh::SurfaceMesh;
use super::particle::WaveParticle;
use super::spatial::SpatialBinIndex;
use super::wavefront::WaveFrontSet;
use super::UniformSource;
use crate::params::{WaterParams, ROUGHNESS_RANGE};

/// What a call to [`WaterSystem::simulate`] did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// A simulation tick ran and the surface mesh changed
    pub ticked: bool,
    /// A new wavefront was spawned
    pub spawned: bool,
}

/// Wave-particle water simulation
pub struct WaterSystem<T: TimeSource = WallClock, R: UniformSource = StdRng> {
    params: WaterParams,
    wavefronts: WaveFrontSet,
    bins: SpatialBinIndex,
    field: HeightField,
    surface: SurfaceMesh,
    clock: SimulationClock,
    time: T,
    rng: R,
    ticks: u64,
}

impl<T: TimeSource, R: UniformSource> WaterSystem<T, R> {
    /// Create a calm water plane at `base_height`
    pub fn new(params: WaterParams, time: T, rng: R) -> Result<Self, String> {
        params
            .validate()
            .map_err(|e| format!("Invalid water config: {}", e))?;

        info!(
            "Water plane: [-{w}, {w}]², {n}x{n} grid, base amplitude {a}",
            w = params.width,
            n = params.resolution,
            a = params.base_amplitude
        );

        let bins = SpatialBinIndex::new(params.width, params.resolution);
        let field = HeightField::new(params.width, params.resolution, params.base_height);
        let surface = SurfaceMesh::new(&field);

        Ok(Self {
            params,
            wavefronts: WaveFrontSet::new(),
            bins,
            field,
            surface,
            clock: SimulationClock::new(),
            time,
            rng,
            ticks: 0,
        })
    }

    /// Run whichever timers are due
    ///
    /// At most one tick and one spawn per call; a no-op when neither timer has elapsed.
    pub fn simulate(&mut self) -> StepReport {
        let now = self.time.now_s();
        let mut report = StepReport::default();

        if self.clock.tick_due(now, self.params.tick_rate_s) {
            self.tick();
            report.ticked = true;
        }

        if self.params.playing && self.clock.spawn_due(now, self.params.spawn_period_s()) {
            self.spawn_random_wave();
            report.spawned = true;
        }

        report
    }

    /// One simulation step: advance, refine, synthesize heights, rebuild the mesh
    pub fn tick(&mut self) {
        self.wavefronts.iterate(&self.params, &mut self.bins);
        let inserted = self.wavefronts.refine();
        self.field
            .compute(&self.bins, self.params.base_height, self.params.adjacent);
        self.surface.update(&self.field);
        self.ticks += 1;

        trace!(
            "Tick {}: {} fronts, {} particles (+{} refined)",
            self.ticks,
            self.wavefronts.len(),
            self.wavefronts.particle_count(),
            inserted
        );
    }

    /// Spawn a wavefront at a random domain location
    pub fn spawn_random_wave(&mut self) {
        self.wavefronts.spawn_random(&mut self.rng, &self.params);
    }

    pub fn is_playing(&self) -> bool {
        self.params.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.params.playing = playing;
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.params.playing = !self.params.playing;
        self.params.playing
    }

    pub fn roughness(&self) -> f32 {
        self.params.roughness
    }

    /// Set roughness, clamped to the control range
    pub fn set_roughness(&mut self, roughness: f32) {
        self.params.roughness = roughness.clamp(ROUGHNESS_RANGE.0, ROUGHNESS_RANGE.1);
    }

    pub fn params(&self) -> &WaterParams {
        &self.params
    }

    /// Read-only snapshot of the last synthesized heights
    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// Mesh matching the current height field
    pub fn surface(&self) -> &SurfaceMesh {
        &self.surface
    }

    pub fn wavefronts(&self) -> &WaveFrontSet {
        &self.wavefronts
    }

    /// Live particles, for debug visualisation
    pub fn active_particles(&self) -> impl Iterator<Item = &WaveParticle> {
        self.wavefronts.particles()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}
