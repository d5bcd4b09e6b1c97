//! Surface mesh built from the height field.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::heightfield::HeightField;

/// Vertex data for the water mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Triangle mesh over the N×N height samples
///
/// Sample `(i, j)` becomes vertex `i * N + j` at world `(x, height, z)` with
/// `x`/`z` the sample's domain x/y. Indices never change after construction;
/// only vertex heights and normals follow the field.
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    resolution: usize,
}

impl SurfaceMesh {
    /// Build a mesh matching `field`
    pub fn new(field: &HeightField) -> Self {
        let n = field.resolution();
        let mut indices = Vec::with_capacity(n.saturating_sub(1).pow(2) * 6);

        // Two upward-facing (counter-clockwise seen from +Y) triangles per quad
        for i in 0..n.saturating_sub(1) {
            for j in 0..n - 1 {
                let a = (i * n + j) as u32;
                let b = a + n as u32;
                let c = b + 1;
                let d = a + 1;

                indices.extend_from_slice(&[a, c, b, a, d, c]);
            }
        }

        let mut mesh = Self {
            vertices: vec![Vertex::zeroed(); n * n],
            indices,
            resolution: n,
        };
        mesh.update(field);
        mesh
    }

    /// Rewrite vertex positions and normals from `field`
    pub fn update(&mut self, field: &HeightField) {
        let n = self.resolution;
        debug_assert_eq!(field.resolution(), n);
        let uv_span = n.saturating_sub(1).max(1) as f32;

        for i in 0..n {
            for j in 0..n {
                let point = field.sample_point(i, j);
                self.vertices[i * n + j] = Vertex {
                    position: [point.x, field.get(i, j), point.y],
                    normal: surface_normal(field, i, j).to_array(),
                    uv: [i as f32 / uv_span, j as f32 / uv_span],
                };
            }
        }
    }
}

/// Normal from height differences of the neighbouring samples
///
/// Central differences inside the grid, one-sided along the border.
fn surface_normal(field: &HeightField, i: usize, j: usize) -> Vec3 {
    let last = field.resolution() - 1;
    let step = field.step_size();

    let (i0, i1) = (i.saturating_sub(1), (i + 1).min(last));
    let (j0, j1) = (j.saturating_sub(1), (j + 1).min(last));
    if i0 == i1 || j0 == j1 {
        return Vec3::Y;
    }

    let dx = (field.get(i1, j) - field.get(i0, j)) / ((i1 - i0) as f32 * step);
    let dz = (field.get(i, j1) - field.get(i, j0)) / ((j1 - j0) as f32 * step);

    Vec3::new(-dx, 1.0, -dz).normalize()
}
