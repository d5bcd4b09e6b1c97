//! Spatial binning of wave particles for neighbour queries.
//!
//! The square domain `[-width, width]²` is split into an N×N grid of buckets.
//! The grid is rebuilt from scratch every tick; a height sample only has to
//! look at the particles in the buckets around it instead of every live particle.

use glam::Vec2;

use super::particle::WaveParticle;

/// N×N grid of particle buckets over `[-width, width]²`
#[derive(Debug, Clone)]
pub struct SpatialBinIndex {
    width: f32,
    resolution: usize,
    /// Row-major buckets, `cells[i * resolution + j]` holds bin `(i, j)`
    cells: Vec<Vec<WaveParticle>>,
}

impl SpatialBinIndex {
    /// Create an empty index
    pub fn new(width: f32, resolution: usize) -> Self {
        Self {
            width,
            resolution,
            cells: vec![Vec::new(); resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Bin index along one axis: `floor(((x + width) / (2 width)) * N)`, clamped into `[0, N)`
    #[inline]
    fn axis_cell(&self, x: f32) -> usize {
        let cell = (((x + self.width) / (2.0 * self.width)) * self.resolution as f32).floor();
        // `as` saturates negatives and NaN to 0
        (cell as usize).min(self.resolution - 1)
    }

    /// Bin `(i, j)` for a domain position; `i` follows x, `j` follows y
    #[inline]
    pub fn cell_of(&self, position: Vec2) -> (usize, usize) {
        (self.axis_cell(position.x), self.axis_cell(position.y))
    }

    /// Drop every particle (call before a full rebuild)
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Insert a particle into the bin its current position maps to
    pub fn insert(&mut self, particle: WaveParticle) {
        let (i, j) = self.cell_of(particle.position);
        self.cells[i * self.resolution + j].push(particle);
    }

    /// Particles in bin `(i, j)`; empty slice when out of range
    pub fn cell(&self, i: usize, j: usize) -> &[WaveParticle] {
        if i < self.resolution && j < self.resolution {
            &self.cells[i * self.resolution + j]
        } else {
            &[]
        }
    }

    /// Particles from bins `[i - rad, i + rad) × [j - rad, j + rad)` clipped to the grid
    pub fn adjacent(&self, i: usize, j: usize, rad: usize) -> impl Iterator<Item = &WaveParticle> {
        let rows = i.saturating_sub(rad)..(i + rad).min(self.resolution);
        let cols = j.saturating_sub(rad)..(j + rad).min(self.resolution);
        rows.flat_map(move |row| {
            cols.clone()
                .flat_map(move |col| self.cells[row * self.resolution + col].iter())
        })
    }

    /// Total number of binned particles
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 100.0;
    const N: usize = 200;

    fn particle_at(x: f32, y: f32) -> WaveParticle {
        WaveParticle::new(Vec2::new(x, y), Vec2::X, 1.0, 0.0)
    }

    #[test]
    fn test_domain_corners_map_to_corner_cells() {
        let index = SpatialBinIndex::new(WIDTH, N);
        let eps = 1e-3;

        assert_eq!(index.cell_of(Vec2::new(-WIDTH, -WIDTH)), (0, 0));
        assert_eq!(
            index.cell_of(Vec2::new(WIDTH - eps, WIDTH - eps)),
            (N - 1, N - 1)
        );
        // Rounding can push `width - ε` onto N; it must still land in the last bin
        assert_eq!(index.cell_of(Vec2::new(WIDTH, WIDTH)), (N - 1, N - 1));
        assert_eq!(index.cell_of(Vec2::ZERO), (N / 2, N / 2));
    }

    #[test]
    fn test_insert_places_particle_in_its_bin() {
        let mut index = SpatialBinIndex::new(WIDTH, N);
        index.insert(particle_at(-99.5, 10.2));

        assert_eq!(index.len(), 1);
        assert_eq!(index.cell(0, 110).len(), 1);
        assert!(index.cell(N, 0).is_empty());

        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn test_adjacent_clips_at_grid_origin() {
        let mut index = SpatialBinIndex::new(WIDTH, N);
        // One particle per bin along the diagonal (bin k sits at -width + k + 0.5)
        for k in 0..10 {
            let c = -WIDTH + k as f32 + 0.5;
            index.insert(particle_at(c, c));
        }

        let found: Vec<_> = index.adjacent(0, 0, 4).collect();
        assert_eq!(found.len(), 4);
        for p in found {
            let (i, j) = index.cell_of(p.position);
            assert!(i < 4 && j < 4);
        }
    }

    #[test]
    fn test_adjacent_clips_at_grid_end() {
        let mut index = SpatialBinIndex::new(WIDTH, N);
        index.insert(particle_at(WIDTH - 0.5, WIDTH - 0.5));

        assert_eq!(index.adjacent(N - 1, N - 1, 4).count(), 1);
        assert_eq!(index.adjacent(N - 6, N - 6, 4).count(), 0);
    }
}
