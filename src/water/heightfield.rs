//! Height-field synthesis from binned wave particles.

use glam::Vec2;

use super::spatial::SpatialBinIndex;

/// N×N grid of surface heights, row-major (`heights[i * N + j]`)
///
/// Row index `i` follows the domain x axis, column index `j` the y axis.
#[derive(Clone, Debug)]
pub struct HeightField {
    width: f32,
    resolution: usize,
    heights: Vec<f32>,
}

impl HeightField {
    /// Create a flat field at `base_height`
    pub fn new(width: f32, resolution: usize, base_height: f32) -> Self {
        Self {
            width,
            resolution,
            heights: vec![base_height; resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Distance between neighbouring samples
    pub fn step_size(&self) -> f32 {
        2.0 * self.width / self.resolution as f32
    }

    /// Domain position of sample `(i, j)`
    ///
    /// This is the only place grid indices are turned into domain coordinates.
    #[inline]
    pub fn sample_point(&self, i: usize, j: usize) -> Vec2 {
        Vec2::splat(-self.width) + Vec2::new(i as f32, j as f32) * self.step_size()
    }

    /// Height at sample `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.heights[i * self.resolution + j]
    }

    /// Raw row-major samples
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Lowest and highest sample
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }

    /// Recompute every sample as `base_height` plus the displacement of nearby particles
    ///
    /// Neighbours come from the bins within `adjacent` cells of the sample
    /// (bins and samples share the same N×N layout).
    pub fn compute(&mut self, bins: &SpatialBinIndex, base_height: f32, adjacent: usize) {
        debug_assert_eq!(bins.resolution(), self.resolution);
        let n = self.resolution;

        for i in 0..n {
            for j in 0..n {
                let query = self.sample_point(i, j);
                let displacement: f32 = bins
                    .adjacent(i, j, adjacent)
                    .map(|particle| particle.displacement(query))
                    .sum();
                self.heights[i * n + j] = base_height + displacement;
            }
        }
    }
}
