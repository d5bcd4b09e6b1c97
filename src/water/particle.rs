//! Wave particle: one sample of an expanding wavefront and its displacement kernel.

use glam::Vec2;
use std::f32::consts::PI;

/// Influence radius of every particle (domain units)
pub const PARTICLE_RADIUS: f32 = 6.0;

/// Distance travelled per simulation tick (domain units)
pub const PARTICLE_SPEED: f32 = 0.9;

/// Direction used when a direction average cancels out
pub const FALLBACK_DIRECTION: Vec2 = Vec2::X;

/// A single traveling wavefront sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParticle {
    /// Where this particle's ring started
    pub origin: Vec2,
    pub position: Vec2,
    /// Unit outward travel direction, fixed at creation
    pub direction: Vec2,
    pub amplitude: f32,
    pub radius: f32,
    pub speed: f32,
    /// Ring position tag (degrees); bookkeeping only
    pub disp_angle: f32,
}

impl WaveParticle {
    /// Create a particle at rest on its own origin
    pub fn new(position: Vec2, direction: Vec2, amplitude: f32, disp_angle: f32) -> Self {
        Self {
            origin: position,
            position,
            direction: normalize_or_fallback(direction),
            amplitude,
            radius: PARTICLE_RADIUS,
            speed: PARTICLE_SPEED,
            disp_angle,
        }
    }

    /// Height contribution of this particle at `query`
    ///
    /// Raised-cosine pulse windowed by a stepped rectangle function. The cosine
    /// keeps oscillating past `radius`; the window is what cuts it off at `1.6 * radius`.
    pub fn displacement(&self, query: Vec2) -> f32 {
        let d = query.distance(self.position);
        let pulse = (PI * d / self.radius).cos() + 1.0;
        let window = rect_window(d / (2.0 * self.radius));
        (self.amplitude / 2.0) * pulse * window
    }
}

/// Stepped falloff: 1 inside 0.5, then 0.5, then 0.2, then nothing past 0.8
pub fn rect_window(x: f32) -> f32 {
    let x = x.abs();
    if x < 0.5 {
        1.0
    } else if x < 0.6 {
        0.5
    } else if x < 0.8 {
        0.2
    } else {
        0.0
    }
}

/// Normalize, substituting [`FALLBACK_DIRECTION`] for zero-length or non-finite input
pub fn normalize_or_fallback(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(FALLBACK_DIRECTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at_origin(amplitude: f32) -> WaveParticle {
        WaveParticle::new(Vec2::ZERO, Vec2::Y, amplitude, 0.0)
    }

    #[test]
    fn test_displacement_peak_equals_amplitude() {
        let p = particle_at_origin(30.0);
        assert!((p.displacement(p.position) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_displacement_vanishes_past_cutoff() {
        let p = particle_at_origin(30.0);
        let cutoff = 1.6 * p.radius;

        assert_eq!(p.displacement(Vec2::new(cutoff + 0.01, 0.0)), 0.0);
        assert_eq!(p.displacement(Vec2::new(0.0, 2.0 * p.radius)), 0.0);
        assert_eq!(p.displacement(Vec2::new(50.0, -50.0)), 0.0);
        // Just inside the cutoff the 0.2 step is still active
        assert!(p.displacement(Vec2::new(cutoff - 0.1, 0.0)) != 0.0);
    }

    #[test]
    fn test_rect_window_steps() {
        assert_eq!(rect_window(0.0), 1.0);
        assert_eq!(rect_window(0.49), 1.0);
        assert_eq!(rect_window(0.5), 0.5);
        assert_eq!(rect_window(-0.55), 0.5);
        assert_eq!(rect_window(0.6), 0.2);
        assert_eq!(rect_window(0.79), 0.2);
        assert_eq!(rect_window(0.8), 0.0);
    }

    #[test]
    fn test_zero_direction_falls_back() {
        assert_eq!(normalize_or_fallback(Vec2::ZERO), FALLBACK_DIRECTION);
        assert_eq!(normalize_or_fallback(Vec2::new(0.0, 3.0)), Vec2::Y);

        let p = WaveParticle::new(Vec2::ONE, Vec2::ZERO, 1.0, 0.0);
        assert!(p.direction.is_finite());
    }
}
