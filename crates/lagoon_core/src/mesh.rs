//! Geometry buffers for world objects.
//!
//! A [`Mesh`] holds per-vertex positions, normals and texture coordinates
//! plus a triangle list. It is GPU-agnostic; [`Mesh::interleaved`] packs the
//! vertex attributes into [`Vertex`] records for upload by a renderer.

use lagoon_math::{Aabb, Vec2, Vec3};

/// Interleaved vertex layout for GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Triangle mesh with one normal and one texture coordinate per vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (same length as positions)
    pub normals: Vec<Vec3>,

    /// Texture coordinates (same length as positions)
    pub tex_coords: Vec<Vec2>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a mesh; bounds are computed from the positions.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        tex_coords: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Self {
        let bounds = Aabb::from_points(&positions);
        let mesh = Self {
            positions,
            normals,
            tex_coords,
            indices,
            bounds,
        };
        debug_assert!(mesh.is_consistent(), "inconsistent mesh buffers");
        mesh
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check the buffer invariants: equal per-vertex lengths, a whole number
    /// of triangles, and every index in range.
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len();
        self.normals.len() == n
            && self.tex_coords.len() == n
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Pack positions, normals and texture coordinates into one buffer.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.tex_coords)
            .map(|((p, n), t)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                tex_coord: t.to_array(),
            })
            .collect()
    }

    /// Flat position buffer, three floats per vertex.
    pub fn position_floats(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Flat normal buffer, three floats per vertex.
    pub fn normal_floats(&self) -> Vec<f32> {
        self.normals.iter().flat_map(|n| n.to_array()).collect()
    }

    /// Flat texture coordinate buffer, two floats per vertex.
    pub fn tex_coord_floats(&self) -> Vec<f32> {
        self.tex_coords.iter().flat_map(|t| t.to_array()).collect()
    }

    /// Extract triangle vertices as `[v0, v1, v2]` triplets.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }
}
