//! Wavefronts: rings of wave particles expanding from a spawn event.
//!
//! Each tick the set is advanced ([`WaveFrontSet::iterate`]), which also prunes dead
//! particles and rebuilds the spatial bins, and then refined
//! ([`WaveFrontSet::refine`]), which keeps every ring dense as it grows.

use glam::Vec2;
use log::debug;

use super::particle::{normalize_or_fallback, WaveParticle, PARTICLE_RADIUS, PARTICLE_SPEED};
use super::spatial::SpatialBinIndex;
use super::UniformSource;
use crate::params::WaterParams;

/// Spawn directions with their ring tags, in ring order (N, E, S, W)
const CARDINALS: [(Vec2, f32); 4] = [
    (Vec2::new(0.0, 1.0), 0.0),
    (Vec2::new(1.0, 0.0), 180.0),
    (Vec2::new(0.0, -1.0), 90.0),
    (Vec2::new(-1.0, 0.0), 270.0),
];

/// Ordered cyclic ring of particles from one spawn event
#[derive(Debug, Clone, Default)]
pub struct WaveFront {
    pub particles: Vec<WaveParticle>,
}

impl WaveFront {
    pub fn new(particles: Vec<WaveParticle>) -> Self {
        Self { particles }
    }

    /// Four particles one grid step away from `center`, heading outward
    ///
    /// Every particle's origin is its own starting position.
    pub fn cardinal(center: Vec2, step: f32, amplitude: f32) -> Self {
        let particles = CARDINALS
            .iter()
            .map(|&(direction, disp_angle)| {
                WaveParticle::new(center + direction * step, direction, amplitude, disp_angle)
            })
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Insert a midpoint particle between every adjacent pair further apart than half a radius
    ///
    /// The ring wraps (the last particle pairs with the first). A split of pair
    /// `(k, k+1)` halves particle `k+1` and gives the new particle that halved
    /// amplitude; particle 0 is halved by the split of its leading pair `(0, 1)`
    /// instead. Each particle is halved at most once per pass, so a fully split
    /// ring keeps its total amplitude. Returns the number of inserted particles.
    pub fn refine(&mut self) -> usize {
        let n = self.particles.len();
        if n < 2 {
            return 0;
        }

        let splits: Vec<bool> = (0..n)
            .map(|k| {
                let (p1, p2) = (&self.particles[k], &self.particles[(k + 1) % n]);
                p1.position.distance(p2.position) > 0.5 * p1.radius
            })
            .collect();

        let inserted = splits.iter().filter(|&&split| split).count();
        let mut refined = Vec::with_capacity(n + inserted);
        for k in 0..n {
            let mut particle = self.particles[k];
            let halved = if k == 0 { splits[0] } else { splits[k - 1] };
            if halved {
                particle.amplitude /= 2.0;
            }
            refined.push(particle);

            if splits[k] {
                let next = (k + 1) % n;
                refined.push(midpoint(&self.particles[k], &self.particles[next]));
            }
        }
        self.particles = refined;
        inserted
    }
}

/// New particle on `p2`'s ring between `p1` and `p2`
fn midpoint(p1: &WaveParticle, p2: &WaveParticle) -> WaveParticle {
    let direction = normalize_or_fallback((p1.direction + p2.direction) / 2.0);
    let ring_distance = p2.origin.distance(p2.position);

    WaveParticle {
        origin: p2.origin,
        position: p2.origin + direction * ring_distance,
        direction,
        amplitude: p2.amplitude / 2.0,
        radius: PARTICLE_RADIUS,
        speed: PARTICLE_SPEED,
        disp_angle: p1.disp_angle + 0.5 * (p2.disp_angle - p1.disp_angle),
    }
}

/// All live wavefronts
#[derive(Debug, Clone, Default)]
pub struct WaveFrontSet {
    fronts: Vec<WaveFront>,
}

impl WaveFrontSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fronts(&self) -> &[WaveFront] {
        &self.fronts
    }

    /// Every live particle, front by front
    pub fn particles(&self) -> impl Iterator<Item = &WaveParticle> {
        self.fronts.iter().flat_map(|front| front.particles.iter())
    }

    pub fn particle_count(&self) -> usize {
        self.fronts.iter().map(WaveFront::len).sum()
    }

    pub fn len(&self) -> usize {
        self.fronts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }

    /// Add a front; empty fronts are ignored
    pub fn push(&mut self, front: WaveFront) {
        if !front.is_empty() {
            self.fronts.push(front);
        }
    }

    /// Spawn a four-particle front centred on a uniformly random domain point
    pub fn spawn_random<R: UniformSource + ?Sized>(&mut self, rng: &mut R, params: &WaterParams) {
        let ri = rng.uniform(0.0, 2.0 * params.width);
        let rj = rng.uniform(0.0, 2.0 * params.width);
        let center = Vec2::splat(-params.width) + Vec2::new(ri, rj);

        debug!(
            "Spawning wavefront at ({:.1}, {:.1}), {} fronts live",
            center.x,
            center.y,
            self.fronts.len() + 1
        );
        self.push(WaveFront::cardinal(
            center,
            params.step_size(),
            params.base_amplitude,
        ));
    }

    /// Advance every particle one step, prune, damp, and rebuild `bins`
    ///
    /// Survival is decided on the new position and the pre-damping amplitude:
    /// the particle must be strictly inside `(-width, width)` on both axes and
    /// above the amplitude threshold.
    pub fn iterate(&mut self, params: &WaterParams, bins: &mut SpatialBinIndex) {
        let width = params.width;
        let before = self.particle_count();
        bins.clear();

        let mut survivors = Vec::with_capacity(self.fronts.len());
        for front in self.fronts.drain(..) {
            let mut kept = Vec::with_capacity(front.len());
            for mut particle in front.particles {
                particle.position += particle.direction * particle.speed;

                let p = particle.position;
                let inside = p.x > -width && p.x < width && p.y > -width && p.y < width;
                if inside && particle.amplitude > params.amplitude_threshold {
                    particle.amplitude -= params.damping;
                    bins.insert(particle);
                    kept.push(particle);
                }
            }
            if !kept.is_empty() {
                survivors.push(WaveFront::new(kept));
            }
        }
        self.fronts = survivors;

        let pruned = before - self.particle_count();
        if pruned > 0 {
            debug!(
                "Pruned {} particles, {} fronts remain",
                pruned,
                self.fronts.len()
            );
        }
    }

    /// Refine every front; returns the number of inserted particles
    pub fn refine(&mut self) -> usize {
        self.fronts.iter_mut().map(WaveFront::refine).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params() -> WaterParams {
        WaterParams::default()
    }

    fn bins(params: &WaterParams) -> SpatialBinIndex {
        SpatialBinIndex::new(params.width, params.resolution)
    }

    /// Four particles sharing `center` as origin, `ring` units out
    fn ring(center: Vec2, ring: f32, amplitude: f32) -> WaveFront {
        let particles = CARDINALS
            .iter()
            .map(|&(direction, disp_angle)| {
                let mut p = WaveParticle::new(center, direction, amplitude, disp_angle);
                p.position = center + direction * ring;
                p
            })
            .collect();
        WaveFront::new(particles)
    }

    #[test]
    fn test_cardinal_front_layout() {
        let front = WaveFront::cardinal(Vec2::new(5.0, -5.0), 1.0, 30.0);

        assert_eq!(front.len(), 4);
        assert_eq!(front.particles[0].position, Vec2::new(5.0, -4.0));
        assert_eq!(front.particles[1].position, Vec2::new(6.0, -5.0));
        for p in &front.particles {
            assert_eq!(p.origin, p.position);
            assert_eq!(p.amplitude, 30.0);
            assert_eq!(p.radius, PARTICLE_RADIUS);
        }
    }

    #[test]
    fn test_iterate_damps_survivors_once() {
        let params = params();
        let mut bins = bins(&params);
        let mut set = WaveFrontSet::new();
        set.push(WaveFront::cardinal(
            Vec2::ZERO,
            params.step_size(),
            params.base_amplitude,
        ));

        set.iterate(&params, &mut bins);

        assert_eq!(set.particle_count(), 4);
        assert_eq!(bins.len(), 4);
        for p in set.particles() {
            assert!((p.amplitude - (params.base_amplitude - 0.01)).abs() < 1e-5);
            assert!((p.origin.distance(p.position) - PARTICLE_SPEED).abs() < 1e-5);
        }
    }

    #[test]
    fn test_amplitude_never_increases() {
        let params = params();
        let mut bins = bins(&params);
        let mut set = WaveFrontSet::new();
        set.push(WaveFront::cardinal(Vec2::new(10.0, 20.0), 1.0, 5.0));

        let mut previous: Vec<f32> = set.particles().map(|p| p.amplitude).collect();
        for _ in 0..20 {
            set.iterate(&params, &mut bins);
            let current: Vec<f32> = set.particles().map(|p| p.amplitude).collect();
            assert_eq!(current.len(), previous.len());
            for (now, before) in current.iter().zip(&previous) {
                assert!(now <= before);
            }
            previous = current;
        }
    }

    #[test]
    fn test_weak_and_escaping_particles_are_pruned() {
        let params = params();
        let mut bins = bins(&params);
        let mut set = WaveFrontSet::new();

        // At the threshold: removed even though it is well inside the domain
        set.push(WaveFront::cardinal(
            Vec2::ZERO,
            1.0,
            params.amplitude_threshold,
        ));
        // Heading out through the +x edge on this step
        set.push(WaveFront::new(vec![WaveParticle::new(
            Vec2::new(params.width - 0.5, 0.0),
            Vec2::X,
            10.0,
            0.0,
        )]));
        // Healthy particle that must survive
        set.push(WaveFront::new(vec![WaveParticle::new(
            Vec2::new(-50.0, 50.0),
            Vec2::Y,
            10.0,
            0.0,
        )]));

        set.iterate(&params, &mut bins);

        assert_eq!(set.len(), 1);
        assert_eq!(set.particle_count(), 1);
        assert_eq!(bins.len(), 1);
        for p in set.particles() {
            assert!(p.position.x.abs() < params.width && p.position.y.abs() < params.width);
        }
    }

    #[test]
    fn test_refine_splits_sparse_ring() {
        let mut front = ring(Vec2::ZERO, 10.0, 8.0);

        let inserted = front.refine();

        assert_eq!(inserted, 4);
        assert_eq!(front.len(), 8);
        let amplitudes: Vec<f32> = front.particles.iter().map(|p| p.amplitude).collect();
        assert_eq!(amplitudes, vec![4.0; 8]);
        assert_eq!(amplitudes.iter().sum::<f32>(), 32.0);

        // Midpoints sit on the ring along the averaged direction
        let mid = front.particles[1];
        let diagonal = Vec2::new(1.0, 1.0).normalize();
        assert!((mid.direction - diagonal).length() < 1e-5);
        assert!((mid.position - diagonal * 10.0).length() < 1e-4);
        assert_eq!(mid.disp_angle, 90.0);
        assert_eq!(front.particles[7].disp_angle, 135.0);
    }

    #[test]
    fn test_refine_halves_each_particle_once() {
        // a-b is too close to split; b-c and the wrapping c-a both split
        let particle = |x: f32| {
            let mut p = WaveParticle::new(Vec2::ZERO, Vec2::X, 8.0, 0.0);
            p.position = Vec2::new(x, 0.0);
            p
        };
        let mut front = WaveFront::new(vec![particle(0.0), particle(1.0), particle(10.0)]);

        assert_eq!(front.refine(), 2);

        // a, b, mid(b, c), c, mid(c, a)
        let amplitudes: Vec<f32> = front.particles.iter().map(|p| p.amplitude).collect();
        assert_eq!(amplitudes, vec![8.0, 8.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_refine_is_idempotent_on_dense_ring() {
        // Adjacent spacing is sqrt(2) * 2 ≈ 2.83, below half a radius (3)
        let mut front = ring(Vec2::new(3.0, 4.0), 2.0, 8.0);

        assert_eq!(front.refine(), 0);
        assert_eq!(front.refine(), 0);
        assert_eq!(front.len(), 4);
        assert!(front.particles.iter().all(|p| p.amplitude == 8.0));
    }

    #[test]
    fn test_refine_opposite_directions_stay_finite() {
        let mut a = WaveParticle::new(Vec2::ZERO, Vec2::X, 4.0, 0.0);
        a.position = Vec2::new(10.0, 0.0);
        let mut b = WaveParticle::new(Vec2::ZERO, Vec2::NEG_X, 4.0, 180.0);
        b.position = Vec2::new(-10.0, 0.0);
        let mut front = WaveFront::new(vec![a, b]);

        front.refine();

        assert_eq!(front.len(), 4);
        for p in &front.particles {
            assert!(p.position.is_finite());
            assert!(p.direction.is_finite());
        }
    }

    #[test]
    fn test_refine_never_removes_particles() {
        let params = params();
        let mut bins = bins(&params);
        let mut set = WaveFrontSet::new();
        set.push(WaveFront::cardinal(Vec2::ZERO, 1.0, params.base_amplitude));

        for _ in 0..30 {
            set.iterate(&params, &mut bins);
            let before = set.particle_count();
            set.refine();
            assert!(set.particle_count() >= before);
        }
        assert!(set.particle_count() > 4);
    }

    #[test]
    fn test_spawn_random_stays_in_domain() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(7);
        let mut set = WaveFrontSet::new();

        for _ in 0..50 {
            set.spawn_random(&mut rng, &params);
        }

        assert_eq!(set.len(), 50);
        for front in set.fronts() {
            let center = front
                .particles
                .iter()
                .fold(Vec2::ZERO, |acc, p| acc + p.position)
                / 4.0;
            assert!(center.x >= -params.width && center.x <= params.width);
            assert!(center.y >= -params.width && center.y <= params.width);
        }
    }
}
